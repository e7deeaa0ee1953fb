use std::fmt;

#[derive(Debug)]
pub enum PageError {
    InvalidConfig(String),
    InvalidRecord(String),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
            PageError::InvalidRecord(e) => write!(f, "Invalid record: {}", e),
            PageError::Json(e) => write!(f, "JSON parsing error: {}", e),
            PageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PageError {}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        PageError::Json(err)
    }
}

impl From<std::io::Error> for PageError {
    fn from(err: std::io::Error) -> Self {
        PageError::Io(err)
    }
}
