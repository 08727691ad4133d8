//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::EngineError;

/// Errors that can occur while configuring or running a calculation.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Error in custom functions: {0}")]
    RhaiCompile(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
