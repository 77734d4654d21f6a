//! # Application Errors
//!
//! Top-level failures of the binary: bad configuration, a listener that
//! cannot bind, a server that stops serving. Request-level failures are
//! handled inside the API module and never reach this type.

use thiserror::Error;
use wardflow_core::FlowError;

/// Errors that abort a CLI command or the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// The config file could not be read or parsed, or an override is malformed.
    #[error("Config error: {0}")]
    Config(String),

    /// A tunable from config, environment or flags was rejected by the engine.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// Bind or serve failure.
    #[error("IO error: {0}")]
    Io(String),
}
