use thiserror::Error;

/// The main error type for cards-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Parse error for configuration values
  #[error("Parse error: {0}")]
  Parse(String),
}

/// Result type alias for cards-* crates
pub type Result<T> = std::result::Result<T, Error>;
