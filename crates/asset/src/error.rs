use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load OBJ file: {reason} ({status} from {url})")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to read OBJ file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Loader runtime error: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LoadError::Timeout
        } else {
            LoadError::Network(err.to_string())
        }
    }
}
