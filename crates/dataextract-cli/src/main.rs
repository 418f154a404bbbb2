//! DataExtract command-line interface.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dataextract::config::DataExtractConfig;
use dataextract::pipeline::{Pipeline, PipelineEvent, StageState};
use dataextract::store::{HistoryStore, JsonFileStore, SettingsStore};
use dataextract::types::OutputFormat;
use dataextract::{convert, export, FileSet};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "dataextract",
    version,
    about = "Turn screenshots of tables, flowcharts, forms and charts into structured data"
)]
struct Cli {
    /// Path to a dataextract.toml config file (default: discover upward)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON state file for history/settings
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run OCR extraction over one or more image/PDF files
    Analyze {
        /// Image or PDF files, processed in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: json, yaml, csv or xml
        #[arg(short, long)]
        format: Option<String>,

        /// OCR language code (e.g. eng, deu)
        #[arg(short, long)]
        language: Option<String>,

        /// OCR accuracy: 1 = fast, 2 = medium, 3 = high
        #[arg(short, long)]
        accuracy: Option<u8>,

        /// OCR backend name
        #[arg(short, long)]
        backend: Option<String>,

        /// Save the rendered result to history
        #[arg(long)]
        save: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print per-stage progress to stderr
        #[arg(long)]
        progress: bool,
    },

    /// Convert a JSON extraction result into another format
    Convert {
        /// JSON input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Target format: json, yaml, csv or xml
        #[arg(long)]
        to: String,
    },

    /// Check that input parses as JSON
    Validate {
        /// JSON input file (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Re-indent JSON with canonical 2-space formatting
    Prettify {
        /// JSON input file (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Inspect or prune saved extraction history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Bundle the whole history into a zip archive (or JSON document)
    Export {
        /// Directory the archive is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Force the single-document JSON export instead of a zip
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Print the full content of one entry (0 = newest)
    Show { index: usize },
    /// Delete all entries
    Clear,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<DataExtractConfig> {
    match &cli.config {
        Some(path) => DataExtractConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(DataExtractConfig::discover()?.unwrap_or_default()),
    }
}

fn open_state(cli: &Cli, config: &DataExtractConfig) -> Result<Arc<JsonFileStore>> {
    let path = cli
        .state
        .clone()
        .or_else(|| config.state_path.clone())
        .map(Ok)
        .unwrap_or_else(JsonFileStore::default_path)?;
    Ok(Arc::new(JsonFileStore::open(path)?))
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    s.parse::<OutputFormat>()
        .map_err(|_| anyhow::anyhow!("unsupported format '{}' (expected json, yaml, csv or xml)", s))
}

/// Read and validate the uploads for an analyze run.
///
/// Unsupported file types are skipped with a warning on stderr; the run
/// only fails when no supported file remains (or a file can't be read).
fn collect_uploads(paths: &[PathBuf]) -> Result<FileSet> {
    let mut file_set = FileSet::new();
    for path in paths {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        match file_set.add(&name, bytes) {
            Ok(file) => {
                tracing::info!(file = %file.name, size = %file.size, label = %file.label, "queued");
            }
            Err(dataextract::DataExtractError::UnsupportedFormat(reason)) => {
                eprintln!("Skipping {}: {}", path.display(), reason);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("rejected upload {}", path.display()));
            }
        }
    }
    if file_set.is_empty() {
        bail!("no supported files to analyze");
    }
    Ok(file_set)
}

#[allow(clippy::too_many_arguments)]
async fn run_analyze(
    cli: &Cli,
    files: &[PathBuf],
    format: Option<&str>,
    language: Option<&str>,
    accuracy: Option<u8>,
    backend: Option<&str>,
    save: bool,
    output: Option<&PathBuf>,
    progress: bool,
) -> Result<()> {
    let config = load_config(cli)?;
    let state = open_state(cli, &config)?;
    let settings = SettingsStore::new(state.clone() as Arc<dyn dataextract::store::KeyValueStore>).load()?;

    // Precedence: flag > saved settings > config file defaults.
    let mut ocr_config = config.ocr.clone();
    ocr_config.language = language
        .map(str::to_string)
        .unwrap_or_else(|| settings.ocr_language.clone());
    ocr_config.accuracy = accuracy.unwrap_or(settings.ocr_accuracy);
    if let Some(backend) = backend {
        ocr_config.backend = backend.to_string();
    }
    ocr_config.validate()?;

    let render_format = match format {
        Some(s) => parse_format(s)?,
        None => settings.default_format,
    };

    let file_set = collect_uploads(files)?;

    let pipeline = Pipeline::new(ocr_config);
    let observer = move |event: PipelineEvent| {
        if !progress {
            return;
        }
        match event {
            PipelineEvent::FileStarted { index, filename } => {
                eprintln!("[{}] {}", index + 1, filename);
            }
            PipelineEvent::Stage { stage, state: StageState::Active } => {
                eprintln!("  {} ...", stage.as_str());
            }
            PipelineEvent::OcrProgress(p) => {
                eprintln!("  ocr {:>3.0}% {}", p.fraction * 100.0, p.message);
            }
            _ => {}
        }
    };

    let result = pipeline.analyze_with_observer(file_set.files(), &observer).await?;
    let value = result.to_value()?;
    let rendered = convert::render(&value, render_format)?;

    if save {
        let history = HistoryStore::new(state);
        history.add(&rendered, render_format)?;
        eprintln!("Saved to history");
    }

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn run_history(cli: &Cli, command: &HistoryCommand) -> Result<()> {
    let config = load_config(cli)?;
    let history = HistoryStore::new(open_state(cli, &config)?);

    match command {
        HistoryCommand::List { limit } => {
            let entries = history.list()?;
            if entries.is_empty() {
                println!("No results yet");
                return Ok(());
            }
            for (index, entry) in entries.iter().take(*limit).enumerate() {
                println!(
                    "{:>3}  {}  {:<4}  {}",
                    index,
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.format,
                    entry.preview.replace('\n', " ")
                );
            }
        }
        HistoryCommand::Show { index } => match history.get(*index)? {
            Some(entry) => println!("{}", entry.content),
            None => bail!("no history entry at index {}", index),
        },
        HistoryCommand::Clear => {
            history.clear()?;
            eprintln!("History cleared");
        }
    }
    Ok(())
}

fn run_export(cli: &Cli, output_dir: &PathBuf, force_json: bool) -> Result<()> {
    let config = load_config(cli)?;
    let history = HistoryStore::new(open_state(cli, &config)?);
    let entries = history.list()?;

    let path = if force_json {
        export::export_history_json(&entries, output_dir)?
    } else {
        export::export_history(&entries, output_dir)?
    };
    println!("{}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dataextract::ocr::register_default_backends();

    match &cli.command {
        Command::Analyze {
            files,
            format,
            language,
            accuracy,
            backend,
            save,
            output,
            progress,
        } => {
            run_analyze(
                &cli,
                files,
                format.as_deref(),
                language.as_deref(),
                *accuracy,
                backend.as_deref(),
                *save,
                output.as_ref(),
                *progress,
            )
            .await
        }
        Command::Convert { input, to } => {
            let format = parse_format(to)?;
            let content = read_input(input.as_ref())?;
            let value: serde_json::Value =
                serde_json::from_str(&content).context("input is not valid JSON")?;
            println!("{}", convert::render(&value, format)?);
            Ok(())
        }
        Command::Validate { input } => {
            let content = read_input(input.as_ref())?;
            match convert::validate_json(&content) {
                Ok(()) => {
                    println!("JSON is valid");
                    Ok(())
                }
                Err(err) => bail!("JSON is invalid: {}", err),
            }
        }
        Command::Prettify { input } => {
            let content = read_input(input.as_ref())?;
            println!("{}", convert::prettify_json(&content)?);
            Ok(())
        }
        Command::History { command } => run_history(&cli, command),
        Command::Export { output_dir, json } => run_export(&cli, output_dir, *json),
    }
}
