use crate::error::{Plan2DslError, Result};
use crate::models::PlanDocument;
use std::fs;
use std::path::Path;

/// Load a serialized test plan from a file
///
/// The format is chosen by extension: `.json` parses as JSON, everything
/// else as YAML. The document is validated before it is returned.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanDocument> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        Plan2DslError::PlanLoadError(format!("Failed to read file {}: {}", path.display(), e))
    })?;

    let document: PlanDocument = if is_json(path) {
        serde_json::from_str(&content).map_err(|e| {
            Plan2DslError::PlanLoadError(format!("Failed to parse plan JSON: {}", e))
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|e| {
            Plan2DslError::PlanLoadError(format!("Failed to parse plan YAML: {}", e))
        })?
    };

    document.validate()?;

    Ok(document)
}

/// Save a test plan document to a YAML file
pub fn save_plan<P: AsRef<Path>>(path: P, document: &PlanDocument) -> Result<()> {
    let path = path.as_ref();

    document.validate()?;

    let yaml = serde_yaml::to_string(document).map_err(|e| {
        Plan2DslError::PlanLoadError(format!("Failed to serialize plan to YAML: {}", e))
    })?;

    fs::write(path, yaml).map_err(|e| {
        Plan2DslError::PlanLoadError(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
