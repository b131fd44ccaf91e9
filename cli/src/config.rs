//! Host configuration, read from an optional TOML file.
//!
//! ```toml
//! knowledge_base = "kb/clinic.toml"
//! locale = "hi"
//!
//! [simulation]
//! count = 50
//! seed = 7
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use tracing::debug;

use triage_contracts::{
    error::{TriageError, TriageResult},
    profile::Locale,
};
use triage_knowledge::KnowledgeBase;
use triage_simulator::DEFAULT_RUNS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Knowledge base TOML; the built-in document when absent.
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,
    /// Applied to profiles that do not carry their own locale.
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    #[serde(default = "default_runs")]
    pub count: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_runs() -> usize {
    DEFAULT_RUNS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_RUNS,
            seed: None,
        }
    }
}

impl TriageConfig {
    pub fn from_toml_str(toml_str: &str) -> TriageResult<Self> {
        toml::from_str(toml_str).map_err(|e| TriageError::Config {
            reason: format!("failed to parse config TOML: {e}"),
        })
    }

    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The file at `path`, or defaults when no path was given.
    pub fn load(path: Option<&Path>) -> TriageResult<Self> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                debug!(path = %path.display(), "configuration loaded");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn knowledge_base(&self) -> TriageResult<Arc<KnowledgeBase>> {
        let kb = match &self.knowledge_base {
            Some(path) => KnowledgeBase::from_file(path)?,
            None => KnowledgeBase::builtin()?,
        };
        Ok(Arc::new(kb))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
