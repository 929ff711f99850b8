//! Profiling parameters and their optional YAML override file.
//!
//! Defaults are `top_n = 5`, `rare_threshold = 10` and `histogram_bins = 20`.
//! A config file may set any subset of the three keys; command-line flags are
//! layered on top with [`ProfileOptions::with_overrides`].

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_RARE_THRESHOLD: usize = 10;
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOptions {
    pub top_n: usize,
    pub rare_threshold: usize,
    pub histogram_bins: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            rare_threshold: DEFAULT_RARE_THRESHOLD,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl ProfileOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options: ProfileOptions =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        options.validate()
    }

    /// Applies explicitly supplied values on top of `self`.
    pub fn with_overrides(
        mut self,
        top_n: Option<usize>,
        rare_threshold: Option<usize>,
        histogram_bins: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = top_n {
            self.top_n = value;
        }
        if let Some(value) = rare_threshold {
            self.rare_threshold = value;
        }
        if let Some(value) = histogram_bins {
            self.histogram_bins = value;
        }
        self.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        for (option, value) in [
            ("top_n", self.top_n),
            ("rare_threshold", self.rare_threshold),
            ("histogram_bins", self.histogram_bins),
        ] {
            if value < 1 {
                return Err(ConfigError::BelowMinimum { option, value });
            }
        }
        Ok(self)
    }
}
