// Declare modules to be part of the library crate

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod startup;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use state::AppState;
