//! Error types for the nonstop-core crate.

/// Errors raised while loading policy configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Lexical failure while word-splitting a command string.
///
/// Every variant resolves to a denial at the authorization boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unterminated quote, trailing escape, or other input the shell lexer rejects.
    #[error("Could not tokenize clause: {0}")]
    Lexical(String),
}
