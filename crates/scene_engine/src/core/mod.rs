//! # Core Engine Module
//!
//! Shared configuration for the scene and rendering subsystems.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the engine, scene tree and renderer

pub mod config;

pub use config::{
    ApplicationConfig,
    Config,
    ConfigError,
    EngineConfig,
    RendererConfig,
    SceneTreeConfig,
};
