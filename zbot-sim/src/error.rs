//! Simulator errors

use thiserror::Error;
use zbot_core::config::ConfigError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(ConfigError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("bad argument for `{command}`: {message}")]
    BadArgument {
        command: &'static str,
        message: String,
    },

    #[error("bad script entry `{entry}`: {message}")]
    Script { entry: String, message: String },
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::InvalidConfig(e)
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
