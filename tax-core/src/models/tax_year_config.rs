use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketTable, FilingStatus, TaxBracket};
use crate::parameters::ParameterError;

/// State and local tax deduction limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltConfig {
    /// Cap before any income-based reduction.
    pub cap_base: Decimal,
    /// The phase-down never takes the cap below this amount.
    pub cap_floor: Decimal,
    /// AGI above which the cap starts shrinking.
    pub phase_down_threshold: BTreeMap<FilingStatus, Decimal>,
    /// Cap reduction per dollar of AGI over the threshold.
    pub phase_down_rate: Decimal,
}

/// Child tax credit amounts. Carried for the Schedule 8812 hookup; the
/// engine does not compute the credit itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxCreditConfig {
    pub amount_per_child: Decimal,
    pub other_dependent_amount: Decimal,
    pub refundable_max_per_child: Decimal,
    pub phase_out_threshold: BTreeMap<FilingStatus, Decimal>,
    pub phase_out_rate: Decimal,
}

/// Every legislated constant one tax year's calculation depends on.
///
/// Instances are read-only once built; the built-in tables are shared by all
/// calculations through [`TaxYearConfig::for_year`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub standard_deduction: BTreeMap<FilingStatus, Decimal>,
    /// Extra standard deduction for age 65+ or blindness (not applied).
    pub additional_standard_deduction: BTreeMap<FilingStatus, Decimal>,
    pub ordinary_brackets: BracketTable,
    /// Qualified dividend / long-term capital gain rates.
    pub preferential_brackets: BracketTable,
    pub salt: SaltConfig,
    /// Fraction of AGI that medical expenses must exceed.
    pub medical_expense_agi_floor: Decimal,
    /// Maximum net capital loss deductible in one year.
    pub capital_loss_limit: Decimal,
    /// Interest or dividends above this amount require Schedule B.
    pub schedule_b_threshold: Decimal,
    /// Flat fraction of net Social Security benefits treated as taxable.
    pub social_security_taxable_fraction: Decimal,
    pub child_tax_credit: ChildTaxCreditConfig,
}

impl TaxYearConfig {
    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        self.standard_deduction
            .get(&status)
            .copied()
            .unwrap_or_default()
    }

    pub fn salt_phase_down_threshold(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        self.salt
            .phase_down_threshold
            .get(&status)
            .copied()
            .unwrap_or(Decimal::MAX)
    }

    pub fn ordinary_brackets(
        &self,
        status: FilingStatus,
    ) -> &[TaxBracket] {
        self.ordinary_brackets.for_status(status)
    }

    pub fn preferential_brackets(
        &self,
        status: FilingStatus,
    ) -> &[TaxBracket] {
        self.preferential_brackets.for_status(status)
    }

    /// Returns a copy of this configuration with both bracket tables replaced.
    pub fn with_brackets(
        &self,
        ordinary: BracketTable,
        preferential: BracketTable,
    ) -> Self {
        Self {
            ordinary_brackets: ordinary,
            preferential_brackets: preferential,
            ..self.clone()
        }
    }

    /// Checks that every filing status has a standard deduction and two
    /// well-formed rate schedules.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] for the first problem found.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for status in [FilingStatus::Single, FilingStatus::MarriedFilingJointly] {
            if !self.standard_deduction.contains_key(&status) {
                return Err(ParameterError::MissingStandardDeduction(status));
            }
            validate_schedule("ordinary", status, self.ordinary_brackets(status))?;
            validate_schedule("preferential", status, self.preferential_brackets(status))?;
        }
        Ok(())
    }
}

fn validate_schedule(
    table: &'static str,
    status: FilingStatus,
    brackets: &[TaxBracket],
) -> Result<(), ParameterError> {
    let Some((last, body)) = brackets.split_last() else {
        return Err(ParameterError::EmptySchedule { table, status });
    };

    if last.upper_limit.is_some() {
        return Err(ParameterError::BoundedTopBracket { table, status });
    }

    let mut previous = Decimal::ZERO;
    for bracket in body {
        let Some(limit) = bracket.upper_limit else {
            return Err(ParameterError::UnboundedInnerBracket { table, status });
        };
        if limit <= previous {
            return Err(ParameterError::BoundsNotAscending {
                table,
                status,
                limit,
            });
        }
        previous = limit;
    }

    if let Some(bad) = brackets
        .iter()
        .find(|b| b.rate < Decimal::ZERO || b.rate > Decimal::ONE)
    {
        return Err(ParameterError::InvalidRate {
            table,
            status,
            rate: bad.rate,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn config() -> TaxYearConfig {
        TaxYearConfig::for_year(2025).unwrap().clone()
    }

    #[test]
    fn built_in_config_is_valid() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bounded_top_bracket() {
        let table = BracketTable::new()
            .with_schedule(
                FilingStatus::Single,
                vec![TaxBracket::new(dec!(0.10), dec!(10000))],
            )
            .with_schedule(
                FilingStatus::MarriedFilingJointly,
                vec![TaxBracket::unbounded(dec!(0.10))],
            );
        let cfg = config().with_brackets(table.clone(), table);

        assert_eq!(
            cfg.validate(),
            Err(ParameterError::BoundedTopBracket {
                table: "ordinary",
                status: FilingStatus::Single,
            })
        );
    }

    #[test]
    fn validate_rejects_descending_bounds() {
        let table = BracketTable::new()
            .with_schedule(
                FilingStatus::Single,
                vec![
                    TaxBracket::new(dec!(0.10), dec!(20000)),
                    TaxBracket::new(dec!(0.12), dec!(10000)),
                    TaxBracket::unbounded(dec!(0.22)),
                ],
            )
            .with_schedule(
                FilingStatus::MarriedFilingJointly,
                vec![TaxBracket::unbounded(dec!(0.10))],
            );
        let cfg = config().with_brackets(table.clone(), table);

        assert_eq!(
            cfg.validate(),
            Err(ParameterError::BoundsNotAscending {
                table: "ordinary",
                status: FilingStatus::Single,
                limit: dec!(10000),
            })
        );
    }

    #[test]
    fn validate_rejects_missing_schedule() {
        let table = BracketTable::new().with_schedule(
            FilingStatus::Single,
            vec![TaxBracket::unbounded(dec!(0.10))],
        );
        let cfg = config().with_brackets(table.clone(), table);

        assert_eq!(
            cfg.validate(),
            Err(ParameterError::EmptySchedule {
                table: "ordinary",
                status: FilingStatus::MarriedFilingJointly,
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let good = config().ordinary_brackets.clone();
        let bad = BracketTable::new()
            .with_schedule(FilingStatus::Single, vec![TaxBracket::unbounded(dec!(1.5))])
            .with_schedule(
                FilingStatus::MarriedFilingJointly,
                vec![TaxBracket::unbounded(dec!(0.2))],
            );
        let cfg = config().with_brackets(good, bad);

        assert_eq!(
            cfg.validate(),
            Err(ParameterError::InvalidRate {
                table: "preferential",
                status: FilingStatus::Single,
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn salt_threshold_falls_back_to_unlimited() {
        let mut cfg = config();
        cfg.salt.phase_down_threshold.clear();

        assert_eq!(cfg.salt_phase_down_threshold(FilingStatus::Single), Decimal::MAX);
    }
}
