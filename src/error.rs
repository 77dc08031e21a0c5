use thiserror::Error;

/// Errors raised by the terminal host around the widget
#[derive(Debug, Error)]
pub enum Error {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Invalid log filter '{filter}': {reason}")]
    LogFilter { filter: String, reason: String },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
