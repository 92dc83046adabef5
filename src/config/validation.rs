//! Config validation: unknown-key detection with Levenshtein suggestions
//! and stride range checks.
//!
//! Unknown keys are found on the raw `toml::Value` tree before serde
//! deserialization and reported as warnings only, so a config with a typo
//! still loads.

use std::collections::HashSet;

use super::EncoderConfig;
use crate::aggregate::{connections, groups, segments, wells};

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of [`EncoderConfig`].
///
/// Kept by hand in step with encoder_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [format]
        "format",
        "format.version",
        // [format.strides]
        "format.strides",
        "format.strides.niwelz",
        "format.strides.nswelz",
        "format.strides.nxwelz",
        "format.strides.nzwelz",
        "format.strides.niconz",
        "format.strides.nsconz",
        "format.strides.nxconz",
        "format.strides.nigrpz_base",
        "format.strides.nsgrpz",
        "format.strides.nxgrpz",
        "format.strides.nzgrpz",
        "format.strides.nisegz",
        "format.strides.nrsegz",
        "format.strides.nilbrz",
        // [aggregates]
        "aggregates",
        "aggregates.wells",
        "aggregates.groups",
        "aggregates.connections",
        "aggregates.segments",
        "aggregates.dynamic_results",
        // [series]
        "series",
        "series.parallel",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walker
// ============================================================================

/// Dotted paths of every key in a parsed config, sections included.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    collect_key_paths(value, prefix, &mut keys);
    keys
}

fn collect_key_paths(value: &toml::Value, prefix: &str, out: &mut Vec<String>) {
    let Some(table) = value.as_table() else {
        return;
    };
    for (key, child) in table {
        let path = match prefix {
            "" => key.clone(),
            _ => format!("{prefix}.{key}"),
        };
        out.push(path.clone());
        collect_key_paths(child, &path, out);
    }
}

// ============================================================================
// Edit Distance
// ============================================================================

/// Character edit distance, one row of the table kept at a time.
fn levenshtein(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in target.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[target.len()]
}

/// Closest known key within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        // Ties resolve alphabetically so the suggestion is stable.
        let better = match best {
            None => true,
            Some((best_key, best_dist)) => dist < best_dist || (dist == best_dist && k < best_key),
        };
        if better {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every key in `raw_toml` the config does not define.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // serde reports the parse error
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Stride Validation
// ============================================================================

/// Overrides this many times the version default are reported as suspicious.
const SUSPICIOUS_STRIDE_FACTOR: i32 = 4;

/// Check stride overrides against the highest item the encoder writes.
///
/// Returns (errors, warnings). A stride too short for the written items
/// would make the aggregate builders fail on every step.
pub fn validate_strides(config: &EncoderConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let s = &config.format.strides;
    let defaults = config.format.version.layout();

    let checks: [(&str, Option<i32>, usize, i32); 14] = [
        ("niwelz", s.niwelz, wells::iwell::LAST, defaults.nwelz[0]),
        ("nswelz", s.nswelz, wells::swell::LAST, defaults.nwelz[1]),
        ("nxwelz", s.nxwelz, wells::xwell::LAST, defaults.nwelz[2]),
        ("nzwelz", s.nzwelz, 0, defaults.nwelz[3]),
        ("niconz", s.niconz, connections::icon::LAST, defaults.nconz[0]),
        ("nsconz", s.nsconz, connections::scon::LAST, defaults.nconz[1]),
        ("nxconz", s.nxconz, connections::xcon::LAST, defaults.nconz[2]),
        ("nigrpz_base", s.nigrpz_base, groups::igrp::LAST, defaults.nigrpz_base),
        ("nsgrpz", s.nsgrpz, groups::sgrp::LAST, defaults.nsgrpz),
        ("nxgrpz", s.nxgrpz, groups::xgrp::LAST, defaults.nxgrpz),
        ("nzgrpz", s.nzgrpz, 0, defaults.nzgrpz),
        ("nisegz", s.nisegz, segments::iseg::LAST, defaults.nisegz),
        ("nrsegz", s.nrsegz, segments::rseg::LAST, defaults.nrsegz),
        ("nilbrz", s.nilbrz, segments::ilbr::LAST, defaults.nilbrz),
    ];

    for (name, value, highest_item, default) in checks {
        let Some(value) = value else { continue };
        let fits = usize::try_from(value).is_ok_and(|v| v > highest_item);
        if !fits {
            errors.push(format!(
                "format.strides.{name} = {value} is too small (item {highest_item} is written, need at least {})",
                highest_item + 1
            ));
        } else if value > default.saturating_mul(SUSPICIOUS_STRIDE_FACTOR) {
            warnings.push(ValidationWarning {
                field: format!("format.strides.{name}"),
                message: format!(
                    "{name} = {value} is far above the {} default of {default}",
                    config.format.version
                ),
                suggestion: None,
            });
        }
    }

    let a = &config.aggregates;
    if !(a.wells || a.groups || a.connections || a.segments) {
        warnings.push(ValidationWarning {
            field: "aggregates".to_string(),
            message: "All aggregate families are disabled; only headers will be encoded"
                .to_string(),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
