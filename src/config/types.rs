//! Configuration types for the payroll rules of a jurisdiction.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: progressive PAYE
//! bracket tables by residency, pay-period overtime rules, the
//! superannuation contribution rate, and the advisory material
//! unit-weight table. The tables are data, not logic: a new tax year
//! ships as new YAML, never as a code change.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::MaterialLine;

/// One bracket of a progressive tax table.
///
/// Tax for a gross amount falling in this bracket is
/// `base + rate × (gross − lower)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (inclusive).
    pub lower: Decimal,
    /// Upper bound of the bracket (exclusive). `None` marks the top
    /// bracket, which is unbounded.
    pub upper: Option<Decimal>,
    /// Marginal rate applied above the lower bound.
    pub rate: Decimal,
    /// Tax accumulated by all brackets below this one.
    pub base: Decimal,
}

/// An ordered progressive bracket table for one residency state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxTable {
    /// Brackets ordered by lower bound.
    pub brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Validates that the table is exhaustive and non-overlapping:
    /// it starts at zero, each bracket's upper bound equals the next
    /// bracket's lower bound, the top bracket is unbounded, and every
    /// rate sits in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTaxTable`] naming the residency
    /// state and the first defect found. A broken table is a deployment
    /// defect, not bad caller input.
    pub fn validate(&self, residency: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTaxTable {
            residency: residency.to_string(),
            message,
        };

        let first = self
            .brackets
            .first()
            .ok_or_else(|| invalid("table has no brackets".to_string()))?;
        if first.lower != Decimal::ZERO {
            return Err(invalid(format!(
                "first bracket starts at {}, not 0",
                first.lower
            )));
        }

        for pair in self.brackets.windows(2) {
            let upper = pair[0].upper.ok_or_else(|| {
                invalid(format!(
                    "bracket starting at {} is unbounded but not last",
                    pair[0].lower
                ))
            })?;
            if upper != pair[1].lower {
                return Err(invalid(format!(
                    "bracket ending at {} does not meet next bracket starting at {}",
                    upper, pair[1].lower
                )));
            }
        }

        for bracket in &self.brackets {
            if let Some(upper) = bracket.upper {
                if upper <= bracket.lower {
                    return Err(invalid(format!(
                        "bracket upper bound {} is not above lower bound {}",
                        upper, bracket.lower
                    )));
                }
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "rate {} outside [0, 1] in bracket starting at {}",
                    bracket.rate, bracket.lower
                )));
            }
            if bracket.base < Decimal::ZERO {
                return Err(invalid(format!(
                    "negative base amount in bracket starting at {}",
                    bracket.lower
                )));
            }
        }

        let last = self.brackets.last().ok_or_else(|| {
            invalid("table has no brackets".to_string())
        })?;
        if last.upper.is_some() {
            return Err(invalid("top bracket must be unbounded".to_string()));
        }

        Ok(())
    }

    /// Finds the bracket a gross amount falls into. Lower bounds are
    /// inclusive, upper bounds exclusive.
    ///
    /// # Errors
    ///
    /// Returns a misconfiguration error when no bracket matches, which a
    /// validated table makes impossible for non-negative gross amounts.
    pub fn bracket_for(&self, gross: Decimal) -> EngineResult<&TaxBracket> {
        self.brackets
            .iter()
            .find(|b| gross >= b.lower && b.upper.map_or(true, |u| gross < u))
            .ok_or_else(|| EngineError::Misconfiguration {
                message: format!("no tax bracket covers gross earnings of {}", gross),
            })
    }
}

/// Tax configuration from tax.yaml: one table per residency state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxConfig {
    /// The effective date or revision of the tables.
    pub version: String,
    /// URL to the revenue authority's published tables.
    #[serde(default)]
    pub source_url: Option<String>,
    /// Table for tax residents.
    pub resident: TaxTable,
    /// Table for non-residents.
    pub non_resident: TaxTable,
}

/// Per-period hour rules from payroll.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PeriodRules {
    /// Hours per pay period before overtime applies.
    pub standard_hours: Decimal,
    /// Multiplier applied to the base rate for overtime hours.
    pub overtime_multiplier: Decimal,
}

/// Superannuation rules from payroll.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuperRules {
    /// The fund scheme name (e.g. "nasfund").
    pub scheme: String,
    /// Employee contribution as a fraction of gross earnings.
    pub employee_rate: Decimal,
}

/// Payroll rules configuration file structure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayrollRules {
    /// Per-period hour rules.
    pub period: PeriodRules,
    /// Superannuation rules.
    pub superannuation: SuperRules,
}

impl PayrollRules {
    /// Validates the numeric ranges of the rules.
    ///
    /// # Errors
    ///
    /// Returns a misconfiguration error for a non-positive overtime
    /// threshold, a multiplier below 1, or a contribution rate outside
    /// `[0, 1]`.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::Misconfiguration { message };
        if self.period.standard_hours <= Decimal::ZERO {
            return Err(invalid(format!(
                "standard hours per period must be positive, got {}",
                self.period.standard_hours
            )));
        }
        if self.period.overtime_multiplier < Decimal::ONE {
            return Err(invalid(format!(
                "overtime multiplier must be at least 1, got {}",
                self.period.overtime_multiplier
            )));
        }
        if self.superannuation.employee_rate < Decimal::ZERO
            || self.superannuation.employee_rate > Decimal::ONE
        {
            return Err(invalid(format!(
                "superannuation employee rate must sit in [0, 1], got {}",
                self.superannuation.employee_rate
            )));
        }
        Ok(())
    }
}

/// Advisory material weight table from materials.yaml.
///
/// Keyed by a material *type* (e.g. "cement_bag"), never by matching on
/// free-text item names. The figure it produces is an entry-time hint; a
/// weight the submitter entered deliberately always wins.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MaterialWeights {
    /// Kilograms per unit, keyed by material type.
    pub unit_weights: HashMap<String, Decimal>,
}

impl MaterialWeights {
    /// Computes the advisory kilogram figure for a material line.
    ///
    /// Returns `None` when the submitter already entered a weight, when
    /// the line carries no material type, or when the type has no table
    /// entry.
    ///
    /// # Example
    ///
    /// ```
    /// use sitepay_engine::config::MaterialWeights;
    /// use sitepay_engine::models::MaterialLine;
    /// use rust_decimal::Decimal;
    /// use std::collections::HashMap;
    /// use std::str::FromStr;
    ///
    /// let weights = MaterialWeights {
    ///     unit_weights: HashMap::from([(
    ///         "cement_bag".to_string(),
    ///         Decimal::from_str("50").unwrap(),
    ///     )]),
    /// };
    /// let line = MaterialLine {
    ///     item: "Cement".to_string(),
    ///     quantity: Decimal::from_str("10").unwrap(),
    ///     unit: "bags".to_string(),
    ///     material_type: Some("cement_bag".to_string()),
    ///     calculated_kg: None,
    ///     notes: None,
    /// };
    /// assert_eq!(weights.advisory_kg(&line), Some(Decimal::from_str("500").unwrap()));
    /// ```
    pub fn advisory_kg(&self, line: &MaterialLine) -> Option<Decimal> {
        if line.calculated_kg.is_some() {
            return None;
        }
        let material_type = line.material_type.as_deref()?;
        let per_unit = self.unit_weights.get(material_type)?;
        Some(line.quantity * per_unit)
    }
}

/// The complete payroll configuration for a jurisdiction.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollConfig {
    tax: TaxConfig,
    rules: PayrollRules,
    materials: MaterialWeights,
}

impl PayrollConfig {
    /// Assembles and validates a configuration from its parts.
    ///
    /// # Errors
    ///
    /// Returns the first defect found in either tax table or the payroll
    /// rules.
    pub fn new(
        tax: TaxConfig,
        rules: PayrollRules,
        materials: MaterialWeights,
    ) -> EngineResult<Self> {
        tax.resident.validate("resident")?;
        tax.non_resident.validate("non-resident")?;
        rules.validate()?;
        Ok(Self {
            tax,
            rules,
            materials,
        })
    }

    /// Returns the tax table for the given residency flag.
    pub fn tax_table(&self, is_resident: bool) -> &TaxTable {
        if is_resident {
            &self.tax.resident
        } else {
            &self.tax.non_resident
        }
    }

    /// Returns the tax configuration.
    pub fn tax(&self) -> &TaxConfig {
        &self.tax
    }

    /// Hours per pay period before overtime applies.
    pub fn standard_hours(&self) -> Decimal {
        self.rules.period.standard_hours
    }

    /// Multiplier applied to the base rate for overtime hours.
    pub fn overtime_multiplier(&self) -> Decimal {
        self.rules.period.overtime_multiplier
    }

    /// Employee superannuation contribution rate.
    pub fn super_rate(&self) -> Decimal {
        self.rules.superannuation.employee_rate
    }

    /// The superannuation scheme name.
    pub fn super_scheme(&self) -> &str {
        &self.rules.superannuation.scheme
    }

    /// The advisory material weight table.
    pub fn material_weights(&self) -> &MaterialWeights {
        &self.materials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(lower: &str, upper: Option<&str>, rate: &str, base: &str) -> TaxBracket {
        TaxBracket {
            lower: dec(lower),
            upper: upper.map(dec),
            rate: dec(rate),
            base: dec(base),
        }
    }

    fn simple_table() -> TaxTable {
        TaxTable {
            brackets: vec![
                bracket("0", Some("1000"), "0", "0"),
                bracket("1000", None, "0.22", "0"),
            ],
        }
    }

    #[test]
    fn test_valid_table_passes() {
        assert!(simple_table().validate("resident").is_ok());
    }

    #[test]
    fn test_empty_table_fails() {
        let table = TaxTable { brackets: vec![] };
        assert!(matches!(
            table.validate("resident"),
            Err(EngineError::InvalidTaxTable { .. })
        ));
    }

    #[test]
    fn test_table_not_starting_at_zero_fails() {
        let table = TaxTable {
            brackets: vec![bracket("100", None, "0.22", "0")],
        };
        let err = table.validate("resident").unwrap_err();
        assert!(err.to_string().contains("not 0"));
    }

    #[test]
    fn test_gap_between_brackets_fails() {
        let table = TaxTable {
            brackets: vec![
                bracket("0", Some("1000"), "0", "0"),
                bracket("1200", None, "0.22", "0"),
            ],
        };
        let err = table.validate("resident").unwrap_err();
        assert!(err.to_string().contains("does not meet"));
    }

    #[test]
    fn test_bounded_top_bracket_fails() {
        let table = TaxTable {
            brackets: vec![
                bracket("0", Some("1000"), "0", "0"),
                bracket("1000", Some("5000"), "0.22", "0"),
            ],
        };
        let err = table.validate("resident").unwrap_err();
        assert!(err.to_string().contains("unbounded"));
    }

    #[test]
    fn test_unbounded_middle_bracket_fails() {
        let table = TaxTable {
            brackets: vec![
                bracket("0", None, "0", "0"),
                bracket("1000", None, "0.22", "0"),
            ],
        };
        assert!(table.validate("resident").is_err());
    }

    #[test]
    fn test_rate_above_one_fails() {
        let table = TaxTable {
            brackets: vec![bracket("0", None, "1.5", "0")],
        };
        let err = table.validate("non-resident").unwrap_err();
        assert!(err.to_string().contains("non-resident"));
    }

    #[test]
    fn test_bracket_for_picks_by_inclusive_lower_bound() {
        let table = simple_table();
        assert_eq!(table.bracket_for(dec("999.99")).unwrap().rate, dec("0"));
        // The boundary value belongs to the upper bracket.
        assert_eq!(table.bracket_for(dec("1000")).unwrap().rate, dec("0.22"));
        assert_eq!(table.bracket_for(dec("50000")).unwrap().rate, dec("0.22"));
    }

    #[test]
    fn test_payroll_rules_validation() {
        let rules = PayrollRules {
            period: PeriodRules {
                standard_hours: dec("80"),
                overtime_multiplier: dec("1.5"),
            },
            superannuation: SuperRules {
                scheme: "nasfund".to_string(),
                employee_rate: dec("0.06"),
            },
        };
        assert!(rules.validate().is_ok());

        let mut broken = rules.clone();
        broken.period.standard_hours = dec("0");
        assert!(matches!(
            broken.validate(),
            Err(EngineError::Misconfiguration { .. })
        ));

        let mut broken = rules.clone();
        broken.period.overtime_multiplier = dec("0.5");
        assert!(broken.validate().is_err());

        let mut broken = rules;
        broken.superannuation.employee_rate = dec("1.2");
        assert!(broken.validate().is_err());
    }

    #[test]
    fn test_advisory_kg_from_type_table() {
        let weights = MaterialWeights {
            unit_weights: HashMap::from([("cement_bag".to_string(), dec("50"))]),
        };
        let line = MaterialLine {
            item: "Cement".to_string(),
            quantity: dec("10"),
            unit: "bags".to_string(),
            material_type: Some("cement_bag".to_string()),
            calculated_kg: None,
            notes: None,
        };
        assert_eq!(weights.advisory_kg(&line), Some(dec("500")));
    }

    #[test]
    fn test_advisory_kg_never_overwrites_submitter_value() {
        let weights = MaterialWeights {
            unit_weights: HashMap::from([("cement_bag".to_string(), dec("50"))]),
        };
        let line = MaterialLine {
            item: "Cement".to_string(),
            quantity: dec("10"),
            unit: "bags".to_string(),
            material_type: Some("cement_bag".to_string()),
            // The submitter weighed a part-used pallet; keep their figure.
            calculated_kg: Some(dec("480")),
            notes: None,
        };
        assert_eq!(weights.advisory_kg(&line), None);
    }

    #[test]
    fn test_advisory_kg_requires_a_typed_material() {
        let weights = MaterialWeights {
            unit_weights: HashMap::from([("cement_bag".to_string(), dec("50"))]),
        };
        // Item name says cement, but without a material type the table
        // is never consulted.
        let line = MaterialLine {
            item: "Cement premium".to_string(),
            quantity: dec("10"),
            unit: "bags".to_string(),
            material_type: None,
            calculated_kg: None,
            notes: None,
        };
        assert_eq!(weights.advisory_kg(&line), None);
    }

    #[test]
    fn test_config_new_validates_both_tables() {
        let tax = TaxConfig {
            version: "test".to_string(),
            source_url: None,
            resident: simple_table(),
            non_resident: TaxTable {
                brackets: vec![bracket("100", None, "0.22", "0")],
            },
        };
        let rules = PayrollRules {
            period: PeriodRules {
                standard_hours: dec("80"),
                overtime_multiplier: dec("1.5"),
            },
            superannuation: SuperRules {
                scheme: "nasfund".to_string(),
                employee_rate: dec("0.06"),
            },
        };
        let result = PayrollConfig::new(tax, rules, MaterialWeights::default());
        assert!(matches!(
            result,
            Err(EngineError::InvalidTaxTable { residency, .. }) if residency == "non-resident"
        ));
    }
}
