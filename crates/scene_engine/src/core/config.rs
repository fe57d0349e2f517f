//! # Unified Configuration System
//!
//! Configuration structures for the engine core, the scene tree driver and
//! the batched 2D renderer. Every structure is serializable, so a whole
//! [`ApplicationConfig`] can be loaded from TOML or RON through [`Config`].
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Logging and debug features
//! - **Scene Tree Config**: Frame stepping behavior
//! - **Renderer Config**: Batch sizing

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// Default maximum number of quads accumulated before a batch is flushed
pub const DEFAULT_MAX_BATCH_QUADS: usize = 1000;

/// Largest batch the 32-bit index buffer can address
pub const MAX_ADDRESSABLE_QUADS: usize = (u32::MAX as usize) / 4;

/// # Engine Configuration
///
/// Core engine behavior configuration including logging and debug features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Scene Tree Configuration
///
/// Controls how the scene tree turns clock readings into update deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneTreeConfig {
    /// Upper bound on the delta handed to `on_update`, in seconds.
    ///
    /// Long stalls (debugger breaks, window drags) would otherwise produce a
    /// single huge step. `None` passes the measured delta through untouched.
    pub max_frame_delta: Option<f32>,
}

impl SceneTreeConfig {
    /// Create a new scene tree configuration
    pub fn new() -> Self {
        Self {
            max_frame_delta: Some(0.25),
        }
    }

    /// Set the delta clamp
    #[must_use]
    pub fn with_max_frame_delta(mut self, max: Option<f32>) -> Self {
        self.max_frame_delta = max;
        self
    }

    /// Clamp a measured delta according to this configuration
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        match self.max_frame_delta {
            Some(max) => delta.clamp(0.0, max),
            None => delta.max(0.0),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max) = self.max_frame_delta {
            if !(max > 0.0 && max.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "max_frame_delta must be a positive number of seconds, got {max}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SceneTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Renderer Configuration
///
/// Sizing of the batched 2D renderer. The index buffer is generated once for
/// `max_batch_quads` and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Maximum number of quads per batch
    pub max_batch_quads: usize,
}

impl RendererConfig {
    /// Create a new renderer configuration
    pub fn new() -> Self {
        Self {
            max_batch_quads: DEFAULT_MAX_BATCH_QUADS,
        }
    }

    /// Set the batch capacity
    #[must_use]
    pub fn with_max_batch_quads(mut self, quads: usize) -> Self {
        self.max_batch_quads = quads;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_quads == 0 {
            return Err(ConfigError::Invalid(
                "max_batch_quads must be at least 1".to_string(),
            ));
        }
        if self.max_batch_quads > MAX_ADDRESSABLE_QUADS {
            return Err(ConfigError::Invalid(format!(
                "max_batch_quads {} exceeds the 32-bit index range",
                self.max_batch_quads
            )));
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
/// This is the main configuration structure applications should use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Scene tree configuration
    #[serde(default)]
    pub scene: SceneTreeConfig,
    /// Rendering system configuration
    #[serde(default)]
    pub renderer: RendererConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate()?;
        self.renderer.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.renderer.max_batch_quads, DEFAULT_MAX_BATCH_QUADS);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let renderer = RendererConfig::new().with_max_batch_quads(0);
        assert!(matches!(renderer.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_delta_clamp() {
        let scene = SceneTreeConfig::new().with_max_frame_delta(Some(0.1));
        assert_eq!(scene.clamp_delta(2.0), 0.1);
        assert_eq!(scene.clamp_delta(0.05), 0.05);

        let unclamped = SceneTreeConfig::new().with_max_frame_delta(None);
        assert_eq!(unclamped.clamp_delta(2.0), 2.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ApplicationConfig {
            renderer: RendererConfig::new().with_max_batch_quads(64),
            ..ApplicationConfig::default()
        };
        let text = toml::to_string_pretty(&config).expect("serialize");
        let parsed: ApplicationConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.renderer.max_batch_quads, 64);
        assert_eq!(parsed.scene.max_frame_delta, config.scene.max_frame_delta);
    }

    #[test]
    fn test_ron_partial_document_uses_defaults() {
        let parsed: ApplicationConfig =
            ron::from_str("(engine: (log_level: \"debug\", debug_mode: false))").expect("parse");
        assert_eq!(parsed.engine.log_level, "debug");
        assert_eq!(parsed.renderer.max_batch_quads, DEFAULT_MAX_BATCH_QUADS);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = ApplicationConfig::load_from_file("settings.ini");
        assert!(result.is_err());
    }
}
