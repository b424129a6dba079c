use thiserror::Error;

pub type BannerResult<T> = Result<T, BannerError>;

#[derive(Error, Debug)]
pub enum BannerError {
    #[error("Markup error at line {line}, column {column}: {message}")]
    Markup {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("SVG document has no root element")]
    EmptySvg,

    #[error("Failed to fetch track data: {0}")]
    Fetch(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Track response is missing field '{field}'")]
    MissingTrackField { field: &'static str },

    #[error("Failed to load asset '{source_path}': {reason}")]
    Asset { source_path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to turn a utility-class string into inline styles.
///
/// Recoverable: the style resolver keeps the raw class string instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    #[error("Malformed utility class '{token}': {reason}")]
    Malformed { token: String, reason: String },

    #[error("Variant '{variant}' in '{token}' has no inline-style equivalent")]
    UnsupportedVariant { token: String, variant: String },
}

impl From<roxmltree::Error> for BannerError {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        BannerError::Markup {
            line: pos.row,
            column: pos.col,
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for BannerError {
    fn from(err: reqwest::Error) -> Self {
        BannerError::Fetch(err.to_string())
    }
}

impl From<serde_yaml::Error> for BannerError {
    fn from(err: serde_yaml::Error) -> Self {
        BannerError::Config(err.to_string())
    }
}
