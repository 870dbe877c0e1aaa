//! Parameter resolution: TOML file, then per-parameter overrides.
//!
//! Source priority for the file: explicit `--config` > `CONVEYOR_CONFIG` env >
//! none (built-in line defaults). Overrides always win over the file.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use clap::Args;
use conveyor_core::Parameters;
use schemars::JsonSchema;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "CONVEYOR_CONFIG";

/// Optional per-parameter overrides. Shared by the CLI flags and the MCP
/// tool requests.
#[derive(Args, Clone, Debug, Default, Deserialize, JsonSchema)]
pub struct ParamOverrides {
    /// Tote input rate (totes/hour)
    #[arg(long, global = true)]
    pub input_rate: Option<f64>,

    /// Total packing tables
    #[arg(long, global = true)]
    pub packer_count: Option<u32>,

    /// Tables running at 70% of the base rate
    #[arg(long, global = true)]
    pub slow_tables: Option<u32>,

    /// Conveyor length (m)
    #[arg(long, global = true)]
    pub conveyor_length: Option<f64>,

    /// Conveyor speed (m/s)
    #[arg(long, global = true)]
    pub conveyor_speed: Option<f64>,

    /// Tote length (m)
    #[arg(long, global = true)]
    pub tote_length: Option<f64>,

    /// Pause between animation frames (seconds)
    #[arg(long, global = true)]
    pub animation_speed: Option<f64>,

    /// Totes sent down the belt in the animation
    #[arg(long, global = true)]
    pub num_totes: Option<u32>,
}

impl ParamOverrides {
    pub fn apply(&self, params: &mut Parameters) {
        if let Some(v) = self.input_rate {
            params.input_rate = v;
        }
        if let Some(v) = self.packer_count {
            params.packer_count = v;
        }
        if let Some(v) = self.slow_tables {
            params.slow_tables = v;
        }
        if let Some(v) = self.conveyor_length {
            params.conveyor_length = v;
        }
        if let Some(v) = self.conveyor_speed {
            params.conveyor_speed = v;
        }
        if let Some(v) = self.tote_length {
            params.tote_length = v;
        }
        if let Some(v) = self.animation_speed {
            params.animation_speed = v;
        }
        if let Some(v) = self.num_totes {
            params.num_totes = v;
        }
    }

    /// `base` with these overrides layered on top.
    pub fn over(&self, base: &Parameters) -> Parameters {
        let mut params = base.clone();
        self.apply(&mut params);
        params
    }
}

/// Pick the config file, if any.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn parse_params(content: &str) -> Result<Parameters> {
    toml::from_str(content).context("invalid line config")
}

/// Load parameters from the config file (or defaults) and apply overrides.
///
/// Range checks are left to the core so every host reports the same errors.
pub fn resolve_params(explicit: Option<&Path>, overrides: &ParamOverrides) -> Result<Parameters> {
    let mut params = match config_path(explicit) {
        Some(path) => {
            tracing::info!("loading line config from {}", path.display());
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_params(&content).with_context(|| format!("in {}", path.display()))?
        }
        None => {
            tracing::debug!("no config file, using line defaults");
            Parameters::default()
        }
    };

    overrides.apply(&mut params);
    tracing::debug!(?params, "resolved line parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml() {
        let params = parse_params("input_rate = 150.0\nslow_tables = 5\n").unwrap();
        assert_eq!(params.input_rate, 150.0);
        assert_eq!(params.slow_tables, 5);
        assert_eq!(params.packer_count, Parameters::default().packer_count);
    }

    #[test]
    fn test_parse_empty_toml_is_default() {
        assert_eq!(parse_params("").unwrap(), Parameters::default());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(parse_params("belt_colour = \"red\"\n").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(parse_params("packer_count = \"thirteen\"\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ParamOverrides {
            input_rate: Some(90.0),
            num_totes: Some(8),
            ..ParamOverrides::default()
        };
        let params = overrides.over(&Parameters::default());
        assert_eq!(params.input_rate, 90.0);
        assert_eq!(params.num_totes, 8);
        assert_eq!(params.tote_length, Parameters::default().tote_length);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let base = Parameters::default();
        assert_eq!(ParamOverrides::default().over(&base), base);
    }

    #[test]
    fn test_explicit_path_beats_env() {
        let explicit = Path::new("/tmp/explicit.toml");
        assert_eq!(config_path(Some(explicit)), Some(explicit.to_path_buf()));
    }

    #[test]
    fn test_resolve_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("line.toml");
        fs::write(&path, "packer_count = 20\nnum_totes = 2\n").unwrap();

        let overrides = ParamOverrides {
            num_totes: Some(3),
            ..ParamOverrides::default()
        };
        let params = resolve_params(Some(&path), &overrides).unwrap();
        assert_eq!(params.packer_count, 20);
        assert_eq!(params.num_totes, 3);
    }

    #[test]
    fn test_resolve_missing_file_errors() {
        let err = resolve_params(Some(Path::new("/nonexistent/line.toml")), &ParamOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
