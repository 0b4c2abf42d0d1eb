//! Configuration management for the ecosystem grid tools

pub mod settings;

pub use settings::{
    Settings, InputConfig, OutputConfig, SimulationConfig, LoggingConfig, OutputFormat, CliOverrides
};
