//! Encoder Configuration Module
//!
//! Selects the target format version, optional per-record stride overrides
//! and which aggregate families are encoded.
//!
//! ## Loading Order
//!
//! 1. `RST_ENCODER_CONFIG` environment variable (path to TOML file)
//! 2. `rst_encoder.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The config is passed explicitly to [`crate::restart::encode_restart_step`];
//! there is no process-wide instance.

mod encoder_config;
pub mod validation;

pub use encoder_config::*;
