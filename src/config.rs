use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Regulation length of a curling game, in ends.
pub const DEFAULT_REGULATION_ENDS: u32 = 8;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    #[serde(default = "default_ends_path")]
    pub ends: PathBuf,
    #[serde(default = "default_games_path")]
    pub games: PathBuf,
    #[serde(default = "default_output_path")]
    pub output: PathBuf,
}

fn default_ends_path() -> PathBuf { PathBuf::from("data/raw/Ends.csv") }
fn default_games_path() -> PathBuf { PathBuf::from("data/raw/Games.csv") }
fn default_output_path() -> PathBuf { PathBuf::from("outputs/team_end_table.csv") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            ends: default_ends_path(),
            games: default_games_path(),
            output: default_output_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Ends played in a regulation game. The first end past this is overtime.
    #[serde(default = "default_regulation_ends")]
    pub regulation_ends: u32,
    /// Rows shown in the post-run preview table.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_regulation_ends() -> u32 { DEFAULT_REGULATION_ENDS }
fn default_preview_rows() -> usize { 10 }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            regulation_ends: DEFAULT_REGULATION_ENDS,
            preview_rows: 10,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.regulation_ends == 0 {
            anyhow::bail!("pipeline.regulation_ends must be at least 1");
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}
