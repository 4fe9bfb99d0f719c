//! smsfilter Tools
//!
//! Small utilities around the classifier project:
//! - [`version`]: read and bump the version string in build metadata
//! - [`dataset`]: print an overview of the SMS Spam Collection dataset

pub mod dataset;
pub mod version;

pub use version::{Outcome, VersionError, VersionFlags};

/// Initialize tracing/logging for the command-line tools
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
