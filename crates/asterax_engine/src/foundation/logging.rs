//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with the default filter
///
/// `RUST_LOG` still wins when it is set.
pub fn init() {
    init_with_level("info");
}

/// Initialize logging, falling back to `level` when `RUST_LOG` is unset
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
}
