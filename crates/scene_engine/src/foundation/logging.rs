//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

use crate::core::EngineConfig;

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still takes precedence when set. Calling this more than once
/// is harmless; later calls leave the first logger in place.
pub fn init_with_level(level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .try_init();
}

/// Initialize logging from the engine configuration
pub fn init_from_config(config: &EngineConfig) {
    let level = if config.debug_mode && config.log_level == "info" {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_with_level(level);
    log::info!("Logging initialized at '{}'", level);
}
