//! `paye.toml` settings.
//!
//! Every key is optional. A missing default file means "use the defaults";
//! flags on the command line win over anything read here.

use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::format::NAIRA;
use tax_core::{DEFAULT_NHF_RATE, DEFAULT_NHIS_RATE, DEFAULT_PENSION_RATE, TaxCalculationInput};
use thiserror::Error;
use tracing::{debug, info};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "paye.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub currency_symbol: String,
    /// Bracket table CSV used instead of the built-in schedule.
    pub brackets_file: Option<PathBuf>,
    /// Any `EnvFilter` directive. Unset leaves `RUST_LOG` (or `info`) in charge.
    pub log_level: Option<String>,
    pub reliefs: ReliefDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: NAIRA.to_string(),
            brackets_file: None,
            log_level: None,
            reliefs: ReliefDefaults::default(),
        }
    }
}

/// Relief values applied when the user does not supply their own.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReliefDefaults {
    pub pension_rate: Decimal,
    pub nhf_rate: Decimal,
    pub nhis_rate: Decimal,
    pub life_assurance: Decimal,
    pub other_reliefs: Decimal,
}

impl Default for ReliefDefaults {
    fn default() -> Self {
        Self {
            pension_rate: DEFAULT_PENSION_RATE,
            nhf_rate: DEFAULT_NHF_RATE,
            nhis_rate: DEFAULT_NHIS_RATE,
            life_assurance: Decimal::ZERO,
            other_reliefs: Decimal::ZERO,
        }
    }
}

impl ReliefDefaults {
    /// An input with these reliefs and zero annual income.
    pub fn template(&self) -> TaxCalculationInput {
        TaxCalculationInput {
            pension_rate: self.pension_rate,
            nhf_rate: self.nhf_rate,
            nhis_rate: self.nhis_rate,
            life_assurance: self.life_assurance,
            other_reliefs: self.other_reliefs,
            ..TaxCalculationInput::default()
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, which must exist. A relative `brackets_file` is taken
    /// relative to the directory holding the config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text, path)?;
        if let Some(dir) = path.parent() {
            config.brackets_file = config
                .brackets_file
                .take()
                .map(|file| if file.is_relative() { dir.join(file) } else { file });
        }
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reads `path` if it exists and falls back to the defaults otherwise.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}
