//! Error types for conlog.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot find module '{0}'")]
    ModuleNotFound(String),

    #[error("Module '{id}' failed while loading")]
    ModuleBody {
        id: String,
        #[source]
        source: Box<ConsoleError>,
    },

    #[error("Module '{id}' does not export a {expected}")]
    ExportType { id: String, expected: &'static str },

    #[error("Lock poisoned: {0}")]
    Poisoned(String),

    #[error("{0}")]
    Other(String),
}

impl<T> From<std::sync::PoisonError<T>> for ConsoleError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ConsoleError::Poisoned(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
