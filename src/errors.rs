use thiserror::Error as ThisError;
#[derive(ThisError, Debug)]
pub enum ScraperError {
    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
    #[error("Selector error: {0}")]
    SelectorError(String),
    #[error("Fetch error: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },
    #[error("SqliteConnectionError: {0}")]
    SqliteConnectionError(#[from] rusqlite::Error),
    #[error("Json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Persistence failed (store: {}, snapshot: {})", .store.as_deref().unwrap_or("ok"), .snapshot.as_deref().unwrap_or("ok"))]
    PersistError {
        store: Option<String>,
        snapshot: Option<String>,
    },
    #[error("Error: {0}")]
    CustomError(String),
}

impl ScraperError {
    /// Status code of a failed fetch, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScraperError::HttpStatus { status, .. } => Some(*status),
            ScraperError::FetchError(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
