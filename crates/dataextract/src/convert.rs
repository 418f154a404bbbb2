//! Format conversion for the structured editor buffer.
//!
//! All renderers operate on a `serde_json::Value` (key order preserved).
//! JSON is the canonical round-trip format; YAML, CSV and XML are
//! presentational, one-directional renderings with no escaping guarantees.

use crate::error::{DataExtractError, Result};
use crate::types::OutputFormat;
use serde_json::Value;

/// Sentinel returned when CSV is requested for a non-table value.
pub const CSV_UNAVAILABLE: &str = "CSV format not available for this data type";

/// Render a structured value in the requested format.
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_pretty_json(value),
        OutputFormat::Yaml => Ok(to_yaml(value)),
        OutputFormat::Csv => Ok(to_csv(value)),
        OutputFormat::Xml => Ok(to_xml(value)),
    }
}

/// Canonical 2-space pretty-printed JSON.
pub fn to_pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Check that a string parses as JSON.
///
/// # Errors
///
/// Returns `DataExtractError::Serialization` with the parser's message.
pub fn validate_json(content: &str) -> Result<()> {
    serde_json::from_str::<Value>(content)
        .map(|_| ())
        .map_err(DataExtractError::from)
}

/// Re-serialize a JSON string with canonical 2-space indentation.
pub fn prettify_json(content: &str) -> Result<String> {
    let value: Value = serde_json::from_str(content)?;
    to_pretty_json(&value)
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Presentational YAML-like rendering.
///
/// Nested objects indent one level under `key:`; arrays render as `- `
/// bullets with object items nested recursively. Values are not quoted or
/// escaped; the output is for display, not for parsing.
pub fn to_yaml(value: &Value) -> String {
    match value {
        Value::Object(_) => yaml_object(value, 0),
        other => scalar_to_string(other),
    }
}

fn yaml_object(value: &Value, indent: usize) -> String {
    let mut yaml = String::new();
    let spaces = "  ".repeat(indent);

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Object(_) => {
                    yaml.push_str(&format!("{}{}:\n", spaces, key));
                    yaml.push_str(&yaml_object(val, indent + 1));
                }
                Value::Array(items) => {
                    yaml.push_str(&format!("{}{}:\n", spaces, key));
                    for item in items {
                        match item {
                            Value::Object(_) => {
                                yaml.push_str(&format!("{}  -\n", spaces));
                                yaml.push_str(&yaml_object(item, indent + 2));
                            }
                            other => {
                                yaml.push_str(&format!(
                                    "{}  - {}\n",
                                    spaces,
                                    scalar_to_string(other)
                                ));
                            }
                        }
                    }
                }
                scalar => {
                    yaml.push_str(&format!("{}{}: {}\n", spaces, key, scalar_to_string(scalar)));
                }
            }
        }
    }

    yaml
}

/// CSV rendering, only defined for the table shape.
///
/// Header row from the declared `headers` (or the first row's keys when
/// absent), then one line per row with every cell double-quoted; missing
/// cells render as `""`. Any other shape yields [`CSV_UNAVAILABLE`].
pub fn to_csv(value: &Value) -> String {
    let is_table = value.get("type").and_then(Value::as_str) == Some("table");
    let rows = value.get("data").and_then(Value::as_array);

    let (Some(rows), true) = (rows, is_table) else {
        return CSV_UNAVAILABLE.to_string();
    };

    let headers: Vec<String> = match value.get("headers").and_then(Value::as_array) {
        Some(headers) if !headers.is_empty() => {
            headers.iter().map(scalar_to_string).collect()
        }
        _ => rows
            .first()
            .and_then(Value::as_object)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default(),
    };

    let mut csv = headers.join(",");
    csv.push('\n');

    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| {
                let cell = row.get(header).map(scalar_to_string).unwrap_or_default();
                format!("\"{}\"", cell)
            })
            .collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }

    csv
}

/// XML rendering under a `<data>` root with a UTF-8 declaration.
///
/// Objects nest, arrays repeat their key once per item, scalars inline as
/// tag text. Keys are assumed to be valid tag names; no escaping is done.
pub fn to_xml(value: &Value) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<data>\n");
    xml.push_str(&xml_object(value, 1));
    xml.push_str("</data>");
    xml
}

fn xml_object(value: &Value, indent: usize) -> String {
    let mut xml = String::new();
    let spaces = "  ".repeat(indent);

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Object(_) => {
                    xml.push_str(&format!(
                        "{}<{}>\n{}{}</{}>\n",
                        spaces,
                        key,
                        xml_object(val, indent + 1),
                        spaces,
                        key
                    ));
                }
                Value::Array(items) => {
                    for item in items {
                        match item {
                            Value::Object(_) => {
                                xml.push_str(&format!(
                                    "{}<{}>\n{}{}</{}>\n",
                                    spaces,
                                    key,
                                    xml_object(item, indent + 1),
                                    spaces,
                                    key
                                ));
                            }
                            other => {
                                xml.push_str(&format!(
                                    "{}<{}>{}</{}>\n",
                                    spaces,
                                    key,
                                    scalar_to_string(other),
                                    key
                                ));
                            }
                        }
                    }
                }
                scalar => {
                    xml.push_str(&format!(
                        "{}<{}>{}</{}>\n",
                        spaces,
                        key,
                        scalar_to_string(scalar),
                        key
                    ));
                }
            }
        }
    }

    xml
}
