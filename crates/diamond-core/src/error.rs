//! Error types for Diamond

use thiserror::Error;

/// Result type alias for Diamond operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Main error type for Diamond
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("WebView error: {0}")]
    WebView(String),

    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new window error
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }

    /// Create a new WebView error
    pub fn webview(msg: impl Into<String>) -> Self {
        Self::WebView(msg.into())
    }

    /// Create a new IPC error
    pub fn ipc(msg: impl Into<String>) -> Self {
        Self::Ipc(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = ShellError::webview("child view refused bounds");
        assert_eq!(err.to_string(), "WebView error: child view refused bounds");
    }

    #[test]
    fn test_url_error_converts() {
        let err: ShellError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ShellError::Url(_)));
    }
}
