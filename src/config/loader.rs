//! Rate table loading functionality.
//!
//! This module provides the [`RatesLoader`] type for loading statutory
//! rates from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::StatutoryRates;

/// Loads and provides access to the statutory rate table.
///
/// # File format
///
/// ```text
/// employee:
///   retirement: "0.11"
///   health_insurance: "0.03"
///   social_security_law: "0.03"
/// employer:
///   retirement: "0.16"
///   health_insurance: "0.06"
///   workplace_insurance: "0.03"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::RatesLoader;
///
/// let loader = RatesLoader::load("./config/rates.yaml").unwrap();
/// println!("retirement rate: {}", loader.rates().employee.retirement);
/// ```
#[derive(Debug, Clone)]
pub struct RatesLoader {
    rates: StatutoryRates,
}

impl RatesLoader {
    /// Loads the rate table from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when the file is missing and
    /// [`EngineError::ConfigParseError`] when it contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let rates: StatutoryRates =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { rates })
    }

    /// Returns the loaded rate table.
    pub fn rates(&self) -> &StatutoryRates {
        &self.rates
    }

    /// Consumes the loader and returns the rate table.
    pub fn into_rates(self) -> StatutoryRates {
        self.rates
    }
}
