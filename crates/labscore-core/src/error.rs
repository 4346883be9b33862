use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse log line {line:?}: {message}")]
    LogParse { line: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Revision conflict while writing {path}: the file changed since it was read")]
    RevisionConflict { path: String },

    #[error("Content store error at {path}: {message}")]
    Store { path: String, message: String },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("{0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn store(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Store {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        let message = match &e {
            ureq::Error::StatusCode(code) => format!("HTTP {} error", code),
            ureq::Error::Timeout(_) => format!("Request timed out: {}", e),
            ureq::Error::Io(_) | ureq::Error::ConnectionFailed | ureq::Error::HostNotFound => {
                format!("Connection failed: {}", e)
            }
            _ => format!("HTTP error: {}", e),
        };
        Error::Http(message)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.to_string())
    }
}
