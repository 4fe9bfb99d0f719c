//! smsfilter Server
//!
//! Serves the SMS spam classifier over HTTP. At startup the model artifact is
//! resolved (reused from disk or downloaded from a release bundle) and loaded
//! once; handlers share it through [`AppState`].

pub mod config;
pub mod docs;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ServerConfig, ServerConfigError};
pub use routes::create_router;
pub use server::run;
pub use state::AppState;
