//! Typed failures for ingestion and configuration.
//!
//! Profiling and correlation never fail; undefined statistics degrade to
//! `NaN` or empty collections instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The file extension is not one of `.csv`, `.xls`, `.xlsx`.
    #[error("{0} is currently unsupported.")]
    UnsupportedFormat(String),
    #[error("Couldn't match the separator in the supported separators [{tried}]")]
    DelimiterDetectionFailed { tried: String },
    /// The container was recognised but its contents could not be read.
    #[error("Sorry, your file contains some feature that is currently unsupported: {0}")]
    UnsupportedFeature(String),
    #[error("Reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub fn unsupported_feature(detail: impl std::fmt::Display) -> Self {
        IngestError::UnsupportedFeature(detail.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{option} must be at least 1 (got {value})")]
    BelowMinimum { option: &'static str, value: usize },
    #[error("Reading config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parsing config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_the_extension() {
        let err = IngestError::UnsupportedFormat(".json".to_string());
        assert_eq!(err.to_string(), ".json is currently unsupported.");
    }

    #[test]
    fn delimiter_failure_lists_candidates() {
        let err = IngestError::DelimiterDetectionFailed {
            tried: "',', ';'".to_string(),
        };
        assert!(err.to_string().contains("',', ';'"));
    }
}
