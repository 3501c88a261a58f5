use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::model::profile::{MafColumns, ReviewProfile};
use crate::schema::FieldConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Optional JSON overrides layered on top of a reviewer profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    pub maf_columns: Option<MafColumns>,
    pub default_maf_sample_cols: Option<Vec<String>>,
    /// Annotation fields registered after the defaults.
    pub fields: Vec<FieldConfig>,
}

impl ReviewConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(self, mut profile: ReviewProfile) -> ReviewProfile {
        if let Some(columns) = self.maf_columns {
            if profile.configurable_maf_columns {
                profile.maf_columns = columns;
            } else {
                tracing::warn!(
                    "{} reviewer uses fixed MAF column names; ignoring maf_columns override",
                    profile.kind.as_str()
                );
            }
        }
        if let Some(cols) = self.default_maf_sample_cols {
            profile.default_maf_sample_cols = cols;
        }
        profile
    }
}
