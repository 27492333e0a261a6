use thiserror::Error;

/// Maximum length for response bodies carried inside error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Version(String),

    #[error("No download URL found for the plugin update")]
    MissingUpdateAsset,

    #[error("Nuance feed returned no secrets")]
    NoNuance,

    #[error("Cannot generate one-time password: {0}")]
    Totp(String),

    #[error("Web view error: {0}")]
    WebView(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Build an HTTP error, truncating the body to avoid logging excessive data.
    pub fn http(status: u16, body: &str) -> Self {
        let body = if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        };
        Error::Http { status, body }
    }
}
