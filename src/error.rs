use std::path::PathBuf;

pub const NO_FILE_SELECTED: &str = "No file selected";
pub const INVALID_EXTENSION: &str = "Please upload a valid Excel file (.xlsx or .xls)";
pub const READ_FAILED: &str = "An error occurred while reading the file";
pub const UNKNOWN_FAILURE: &str = "An unknown error occurred while processing the file";

#[derive(Debug, thiserror::Error)]
pub enum ShoutoutError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("`{name}` is not an Excel workbook (.xlsx or .xls)")]
    InvalidExtension { name: String },
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Decode(String),
    #[error("failed to load config `{path}`: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
    #[error("failed to render cards: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("failed to serialize cards: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid quote column pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ShoutoutError {
    /// The text shown in the error banner.
    ///
    /// Validation and read failures map to fixed messages; decode failures
    /// surface the decoder's own message, falling back to a generic one when
    /// the decoder gave nothing usable.
    pub fn user_message(&self) -> String {
        match self {
            ShoutoutError::NoFileSelected => NO_FILE_SELECTED.to_string(),
            ShoutoutError::InvalidExtension { .. } => INVALID_EXTENSION.to_string(),
            ShoutoutError::Read { .. } => READ_FAILED.to_string(),
            ShoutoutError::Decode(message) if !message.trim().is_empty() => message.clone(),
            ShoutoutError::Decode(_) => UNKNOWN_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}
