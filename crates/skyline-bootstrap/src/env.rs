//! Read-only environment lookup.

use std::collections::HashMap;
use std::env::VarError;

use skyline_common::error::{Result, SkylineError};

/// Key to string lookup over some environment.
pub trait EnvSource {
    /// Looks up a variable by name.
    ///
    /// `Ok(None)` means the key is absent, which is not the same as
    /// `Ok(Some(""))`.
    ///
    /// # Errors
    ///
    /// Returns `NonUnicodeEnvironmentVariable` when the variable is set to a
    /// value that is not valid Unicode.
    fn var(&self, name: &str) -> Result<Option<String>>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Result<Option<String>> {
        classify(name, std::env::var(name))
    }
}

/// Only `NotPresent` counts as absent; a set but undecodable value is an error.
fn classify(name: &str, lookup: std::result::Result<String, VarError>) -> Result<Option<String>> {
    match lookup {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(SkylineError::NonUnicodeEnvironmentVariable {
            name: name.to_string(),
        }),
    }
}

/// In-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, returning the updated environment.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Result<Option<String>> {
        Ok(self.vars.get(name).cloned())
    }
}
