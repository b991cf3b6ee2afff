//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load a jurisdiction's payroll
//! rules from YAML files: PAYE bracket tables by residency, pay-period
//! overtime parameters, the superannuation contribution rate, and the
//! advisory material unit-weight table.
//!
//! # Example
//!
//! ```no_run
//! use sitepay_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/png").unwrap();
//! println!("Standard hours per period: {}", loader.config().standard_hours());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    MaterialWeights, PayrollConfig, PayrollRules, PeriodRules, SuperRules, TaxBracket, TaxConfig,
    TaxTable,
};
