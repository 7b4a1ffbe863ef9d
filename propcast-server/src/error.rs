use std::net::SocketAddr;

use propcast_core::PropcastError;
use thiserror::Error;

/// Errors that stop the server from starting or keep running.
///
/// Requests themselves cannot fail at the application level, so there is no
/// HTTP mapping here; these surface from `main` and end the process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid server configuration: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Core(#[from] PropcastError), // Automatically convert from PropcastError

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
