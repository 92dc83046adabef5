//! Encoder configuration: target format, stride overrides, aggregate toggles.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::header::{FormatLayout, FormatVersion};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "RST_ENCODER_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "rst_encoder.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EncoderConfig {
    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub aggregates: AggregateConfig,

    #[serde(default)]
    pub series: SeriesConfig,
}

impl EncoderConfig {
    /// Load configuration using the standard search order:
    /// `RST_ENCODER_CONFIG`, then `./rst_encoder.toml`, then defaults.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), version = %config.format.version, "Loaded encoder config from RST_ENCODER_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from RST_ENCODER_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "RST_ENCODER_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./rst_encoder.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(version = %config.format.version, "Loaded encoder config from ./rst_encoder.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./rst_encoder.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No rst_encoder.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        for warning in super::validation::validate_unknown_keys(&contents) {
            warn!(field = %warning.field, "{}", warning);
        }

        let config: EncoderConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Saved encoder config");
        Ok(())
    }

    /// Reject stride overrides that cannot hold the items the encoder writes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_strides(self);
        for warning in &warnings {
            warn!(field = %warning.field, "{}", warning);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Format layout for the configured version with stride overrides applied.
    pub fn layout(&self) -> FormatLayout {
        let mut layout = self.format.version.layout();
        let s = &self.format.strides;

        let apply = |slot: &mut i32, value: Option<i32>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        apply(&mut layout.nwelz[0], s.niwelz);
        apply(&mut layout.nwelz[1], s.nswelz);
        apply(&mut layout.nwelz[2], s.nxwelz);
        apply(&mut layout.nwelz[3], s.nzwelz);
        apply(&mut layout.nconz[0], s.niconz);
        apply(&mut layout.nconz[1], s.nsconz);
        apply(&mut layout.nconz[2], s.nxconz);
        apply(&mut layout.nigrpz_base, s.nigrpz_base);
        apply(&mut layout.nsgrpz, s.nsgrpz);
        apply(&mut layout.nxgrpz, s.nxgrpz);
        apply(&mut layout.nzgrpz, s.nzgrpz);
        apply(&mut layout.nisegz, s.nisegz);
        apply(&mut layout.nrsegz, s.nrsegz);
        apply(&mut layout.nilbrz, s.nilbrz);

        if !s.is_empty() {
            debug!(version = %self.format.version, "Applied record stride overrides");
        }
        layout
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {e}"),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Format
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormatConfig {
    /// Target restart-format version
    #[serde(default)]
    pub version: FormatVersion,

    #[serde(default, skip_serializing_if = "StrideOverrides::is_empty")]
    pub strides: StrideOverrides,
}

/// Per-record lengths replacing the version defaults.
///
/// The default strides were matched against reference decks; override
/// them only to track a different simulator release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StrideOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niwelz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nswelz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nxwelz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nzwelz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niconz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsconz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nxconz: Option<i32>,
    /// IGRP length without the child slots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nigrpz_base: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsgrpz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nxgrpz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nzgrpz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nisegz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nrsegz: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nilbrz: Option<i32>,
}

impl StrideOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// Which aggregate families are encoded. Disabled families are emitted
/// as empty arrays; the headers are always written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateConfig {
    #[serde(default = "default_true")]
    pub wells: bool,

    #[serde(default = "default_true")]
    pub groups: bool,

    #[serde(default = "default_true")]
    pub connections: bool,

    #[serde(default = "default_true")]
    pub segments: bool,

    /// Fill XWEL/XGRP/XCON from simulator results when a state is supplied
    #[serde(default = "default_true")]
    pub dynamic_results: bool,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            wells: true,
            groups: true,
            connections: true,
            segments: true,
            dynamic_results: true,
        }
    }
}

// ============================================================================
// Series
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Encode report-step series on the rayon pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn default_true() -> bool { true }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = EncoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout(), FormatLayout::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: EncoderConfig = toml::from_str(
            r#"
            [aggregates]
            segments = false
            "#,
        )
        .unwrap();
        assert!(!config.aggregates.segments);
        assert!(config.aggregates.wells);
        assert!(config.series.parallel);
        assert_eq!(config.format.version, FormatVersion::Eclipse2017_02);
    }

    #[test]
    fn test_stride_override_applied_to_layout() {
        let config: EncoderConfig = toml::from_str(
            r#"
            [format]
            version = "2017.02"

            [format.strides]
            niwelz = 160
            nilbrz = 12
            "#,
        )
        .unwrap();
        let layout = config.layout();
        assert_eq!(layout.nwelz, [160, 122, 130, 3]);
        assert_eq!(layout.nilbrz, 12);
        assert_eq!(layout.nisegz, 22);
    }

    #[test]
    fn test_too_small_stride_fails_validation() {
        let mut config = EncoderConfig::default();
        config.format.strides.nxconz = Some(10);
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("nxconz"), "got: {}", errors[0]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_toml_roundtrip_omits_empty_overrides() {
        let config = EncoderConfig::default();
        let text = config.to_toml().unwrap();
        assert!(!text.contains("strides"));
        let back: EncoderConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
