//! Configuration settings for the ecosystem grid tools

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub world_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// When set, the final world is also written here in the terse format
    pub output_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Terse,
    Pretty,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Overrides the generation count from the world file
    pub generations: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` wins when set
    pub filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                world_file: PathBuf::from("input/worlds/single_rabbit.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Both,
                output_file: None,
            },
            simulation: SimulationConfig { generations: None },
            logging: LoggingConfig {
                filter: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Load settings from a YAML file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !self.input.world_file.exists() {
            anyhow::bail!("World file does not exist: {}", self.input.world_file.display());
        }

        if self.logging.filter.trim().is_empty() {
            anyhow::bail!("Logging filter cannot be empty");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref world_file) = cli_overrides.world_file {
            self.input.world_file = world_file.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_file) = cli_overrides.output_file {
            self.output.output_file = Some(output_file.clone());
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = Some(generations);
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub world_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub generations: Option<u32>,
}
