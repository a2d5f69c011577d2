use std::fmt;

use thiserror::Error;

use crate::models::Config;

/// Settings that would make the server misbehave. Loading fails on any.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("server.port must not be 0")]
    ZeroPort,
    #[error("query.default_limit must be at least 1")]
    ZeroDefaultLimit,
    #[error("query.max_limit ({max_limit}) must be >= query.default_limit ({default_limit})")]
    MaxBelowDefault { default_limit: u32, max_limit: u32 },
    #[error("database.max_connections must be at least 1")]
    ZeroConnections,
}

/// A non-fatal configuration finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} ({})", self.message, hint),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWarnings {
    items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(&mut self, message: impl Into<String>, hint: impl Into<String>) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    /// Emit every warning through `tracing`.
    pub fn log(&self) {
        for warning in &self.items {
            tracing::warn!("{}", warning);
        }
    }
}

pub fn check(config: &Config) -> Result<(), ConfigGuardRailError> {
    if config.server.port == 0 {
        return Err(ConfigGuardRailError::ZeroPort);
    }
    if config.database.max_connections == 0 {
        return Err(ConfigGuardRailError::ZeroConnections);
    }
    let query = &config.query;
    if query.default_limit == 0 {
        return Err(ConfigGuardRailError::ZeroDefaultLimit);
    }
    if query.max_limit < query.default_limit {
        return Err(ConfigGuardRailError::MaxBelowDefault {
            default_limit: query.default_limit,
            max_limit: query.max_limit,
        });
    }
    Ok(())
}
