//! Global OCR backend registry.
//!
//! Backends register by name and are resolved at pipeline time from
//! `OcrConfig::backend`. The registry is process-global and thread-safe.

use crate::error::{DataExtractError, Result};
use crate::ocr::backend::OcrBackend;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

static REGISTRY: Lazy<RwLock<HashMap<String, Arc<dyn OcrBackend>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Validate a backend name before registration.
///
/// Names must be non-empty and contain no whitespace.
fn validate_backend_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DataExtractError::validation("Backend name cannot be empty"));
    }
    if name.contains(char::is_whitespace) {
        return Err(DataExtractError::validation(format!(
            "Backend name '{}' cannot contain whitespace",
            name
        )));
    }
    Ok(())
}

/// Register an OCR backend under its `name()`.
///
/// Re-registering a name replaces the previous backend.
///
/// # Errors
///
/// Returns `DataExtractError::Validation` if the name is empty or contains
/// whitespace.
pub fn register_ocr_backend(backend: Arc<dyn OcrBackend>) -> Result<()> {
    let name = backend.name().to_string();
    validate_backend_name(&name)?;

    tracing::debug!(backend = %name, "registering OCR backend");
    REGISTRY.write().insert(name, backend);
    Ok(())
}

/// Look up a registered backend by name.
///
/// # Errors
///
/// Returns `DataExtractError::Validation` if no backend with that name is
/// registered.
pub fn get_ocr_backend(name: &str) -> Result<Arc<dyn OcrBackend>> {
    REGISTRY.read().get(name).cloned().ok_or_else(|| {
        let registered = list_ocr_backends().join(", ");
        DataExtractError::validation(format!(
            "Unknown OCR backend '{}'. Registered backends: [{}]",
            name, registered
        ))
    })
}

/// Remove a backend by name. Removing an unknown name is a no-op.
pub fn unregister_ocr_backend(name: &str) {
    REGISTRY.write().remove(name);
}

/// Names of all registered backends, sorted.
pub fn list_ocr_backends() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY.read().keys().cloned().collect();
    names.sort();
    names
}
