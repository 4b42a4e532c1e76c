// Analysis configuration.
//
// Loaded from JSON; every field has a default so an empty object (or no
// config file at all) gives the standard behavior. Unknown keys are rejected
// so typos surface as errors instead of being silently ignored.
//
// Example:
//
//     {
//       "dataset_path": "/usr/share/dict/cmudict.dict",
//       "rhyme": { "slant_policy": "vowel_family", "orthographic_fallback": true },
//       "internal_rhymes": false,
//       "form": "ABAB CDCD EFEF GG"
//     }

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rhyme::RhymeConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// CMU-format dictionary to load instead of the embedded one.
    pub dataset_path: Option<PathBuf>,
    pub rhyme: RhymeConfig,
    /// Whether `Analyzer::analyze` scans for internal rhymes.
    pub internal_rhymes: bool,
    /// Expected rhyme form, e.g. "ABAB CDCD EFEF GG".
    pub form: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            dataset_path: None,
            rhyme: RhymeConfig::default(),
            internal_rhymes: true,
            form: None,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
