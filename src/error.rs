use thiserror::Error;

#[derive(Error, Debug)]
pub enum Plan2DslError {
    #[error("Failed to load plan file: {0}")]
    PlanLoadError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Malformed property '{property}' at {path}: {reason}")]
    MalformedProperty {
        path: String,
        property: String,
        reason: String,
    },

    #[error(
        "Property '{property}' of {element_type} at {path} holds the template expression {raw:?}, \
         which has no literal DSL equivalent. Expression support can be requested as an issue in \
         the project repository."
    )]
    UnsupportedExpression {
        path: String,
        element_type: String,
        property: String,
        raw: String,
    },

    #[error("No builder registered for element type '{element_type}' at {path}")]
    NoBuilderFound { path: String, element_type: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Plan2DslError>;
