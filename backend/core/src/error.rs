use thiserror::Error;

/// Top-level error type for the CoinLens service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoinError {
    /// Local rejection of an uploaded file (type, size, read failure).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The bundled default asset could not be loaded.
    #[error("load failed: {0}")]
    Load(String),

    /// The external analyzer call failed; the message is opaque to us.
    #[error("analyzer failed: {0}")]
    Analyzer(String),
}

impl CoinError {
    /// The user-visible message carried by this error, without the
    /// variant prefix. Empty analyzer messages fall back to a generic
    /// string so the UI never shows a blank error.
    pub fn user_message(&self) -> String {
        match self {
            CoinError::Validation(msg) | CoinError::Load(msg) => msg.clone(),
            CoinError::Analyzer(msg) if msg.trim().is_empty() => {
                "image analysis failed".to_string()
            }
            CoinError::Analyzer(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzer_message_is_verbatim() {
        let err = CoinError::Analyzer("quota exceeded".to_string());
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn empty_analyzer_message_falls_back() {
        let err = CoinError::Analyzer(String::new());
        assert_eq!(err.user_message(), "image analysis failed");
    }
}
