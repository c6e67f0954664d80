//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! absence configuration from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{AbsenceError, AbsenceResult};

use super::types::{PolicyFile, RateConfig, StatutoryConfig};

/// Loads and provides access to statutory configuration.
///
/// # Directory Structure
///
/// ```text
/// config/uk_statutory/
/// ├── policy.yaml          # SSP day model, bereavement window, overlap policy
/// └── rates/
///     └── 2025-04-06.yaml  # SSP weekly rate effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use absence_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/uk_statutory").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let weekly = loader.ssp_weekly_rate(date).unwrap();
/// println!("SSP weekly rate: £{}", weekly);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with [`AbsenceError::ConfigNotFound`] if `policy.yaml` or the
    /// `rates` directory is missing or holds no rate files, and with
    /// [`AbsenceError::ConfigParseError`] if any file is not valid.
    pub fn load<P: AsRef<Path>>(path: P) -> AbsenceResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        Ok(Self {
            config: StatutoryConfig::new(policy, rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AbsenceResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AbsenceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AbsenceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> AbsenceResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| AbsenceError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| AbsenceError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(AbsenceError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Gets the SSP weekly flat rate in force on `date`.
    ///
    /// Returns the most recent rate whose effective date is on or before
    /// `date`, or [`AbsenceError::RateNotFound`].
    pub fn ssp_weekly_rate(&self, date: NaiveDate) -> AbsenceResult<Decimal> {
        self.config
            .rates()
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= date)
            .map(|rc| rc.ssp_weekly_rate)
            .ok_or(AbsenceError::RateNotFound { date })
    }
}
