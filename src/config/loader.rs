//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a
//! jurisdiction's payroll configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{MaterialWeights, PayrollConfig, PayrollRules, TaxConfig};

/// Loads and provides access to a jurisdiction's payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/png/
/// ├── tax.yaml        # PAYE bracket tables by residency
/// ├── payroll.yaml    # Period hours, overtime multiplier, super rate
/// └── materials.yaml  # Advisory material unit weights
/// ```
///
/// # Example
///
/// ```no_run
/// use sitepay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/png").unwrap();
/// println!("Tax tables revision: {}", loader.config().tax().version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/png")
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A tax table is not exhaustive and non-overlapping for either
    ///   residency state, or the payroll rules are out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax = Self::load_yaml::<TaxConfig>(&path.join("tax.yaml"))?;
        let rules = Self::load_yaml::<PayrollRules>(&path.join("payroll.yaml"))?;
        let materials = Self::load_yaml::<MaterialWeights>(&path.join("materials.yaml"))?;

        let config = PayrollConfig::new(tax, rules, materials)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the validated payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}
