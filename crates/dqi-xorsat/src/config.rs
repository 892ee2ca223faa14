//! Solver configuration.
//!
//! Loaded from YAML, then overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DQI_SHOTS` | `shots` |
//! | `DQI_SEED` | `seed` |
//! | `DQI_CORRECTION` | `correction` (`legacy` or `full-match`) |
//! | `DQI_OUTPUT_DIR` | `output_dir` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assembler::DEFAULT_PHASE;
use crate::corrector::CorrectionMode;
use crate::error::ConfigError;
use crate::matrix::{ParityCheckMatrix, WIDTH};

/// Solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqiConfig {
    /// Parity-check matrix, as rows of 0/1.
    #[serde(default)]
    pub matrix: ParityCheckMatrix,

    /// Per-slot phase weights; only the sign matters.
    #[serde(default = "default_phase")]
    pub phase: Vec<f64>,

    /// How corrections match the measured syndrome.
    #[serde(default)]
    pub correction: CorrectionMode,

    /// Number of shots per run.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Simulator seed; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Where export collaborators write their files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_phase() -> Vec<f64> {
    DEFAULT_PHASE.to_vec()
}

fn default_shots() -> u32 {
    1024
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

impl Default for DqiConfig {
    fn default() -> Self {
        Self {
            matrix: ParityCheckMatrix::default(),
            phase: default_phase(),
            correction: CorrectionMode::default(),
            shots: default_shots(),
            seed: None,
            output_dir: default_output_dir(),
        }
    }
}

impl DqiConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: DqiConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load from `config_file` (or defaults), apply environment overrides,
    /// and validate.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => DqiConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    fn merge_env(self) -> Self {
        self.merge_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unset keys leave the field alone;
    /// unparseable values are logged and ignored.
    fn merge_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("DQI_SHOTS") {
            match v.parse() {
                Ok(n) => self.shots = n,
                Err(_) => warn!(value = %v, "ignoring invalid DQI_SHOTS"),
            }
        }
        if let Some(v) = lookup("DQI_SEED") {
            match v.parse() {
                Ok(n) => self.seed = Some(n),
                Err(_) => warn!(value = %v, "ignoring invalid DQI_SEED"),
            }
        }
        if let Some(v) = lookup("DQI_CORRECTION") {
            match v.parse() {
                Ok(mode) => self.correction = mode,
                Err(_) => warn!(value = %v, "ignoring invalid DQI_CORRECTION"),
            }
        }
        if let Some(v) = lookup("DQI_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        self
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phase.len() != WIDTH {
            return Err(ConfigError::PhaseLength {
                expected: WIDTH,
                got: self.phase.len(),
            });
        }

        if let Some(bad) = self.phase.iter().find(|w| !w.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "Phase weights must be finite, got {bad}"
            )));
        }

        if self.shots == 0 {
            return Err(ConfigError::InvalidShots(self.shots));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Phase weights as a fixed array.
    pub fn phase_array(&self) -> Result<[f64; WIDTH], ConfigError> {
        self.phase
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::PhaseLength {
                expected: WIDTH,
                got: self.phase.len(),
            })
    }
}
