//! Schedule A, Itemized Deductions.
//!
//! Medical expenses are deductible above an AGI-proportional floor. State and
//! local taxes are capped, and the cap phases down linearly once AGI passes
//! the filing-status threshold (never below the floor amount).
//!
//! AGI is read from the [`CalculationContext`], so this form must be ordered
//! after [`Form1040Income`](super::Form1040Income).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CalculationContext, ComputedForms, ContextError, FormId};
use crate::calculations::common::{max, min, round_half_up};
use crate::{FilingStatus, ReturnSnapshot, TaxYearConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleALines {
    #[serde(rename = "line_1")]
    pub medical_expenses: Decimal,
    #[serde(rename = "line_2")]
    pub agi: Decimal,
    #[serde(rename = "line_3")]
    pub medical_floor: Decimal,
    #[serde(rename = "line_4")]
    pub medical_deduction: Decimal,
    #[serde(rename = "line_5a")]
    pub state_income_tax: Decimal,
    #[serde(rename = "line_5b")]
    pub real_estate_tax: Decimal,
    #[serde(rename = "line_5c")]
    pub personal_property_tax: Decimal,
    #[serde(rename = "line_5d")]
    pub total_salt: Decimal,
    #[serde(rename = "line_5e")]
    pub limited_salt: Decimal,
    #[serde(rename = "line_7")]
    pub total_taxes: Decimal,
    /// Cap in effect after the phase-down.
    pub salt_cap: Decimal,
    #[serde(rename = "line_8a")]
    pub mortgage_interest_1098: Decimal,
    #[serde(rename = "line_8b")]
    pub mortgage_interest_not_1098: Decimal,
    #[serde(rename = "line_8c")]
    pub mortgage_points: Decimal,
    #[serde(rename = "line_9")]
    pub investment_interest: Decimal,
    #[serde(rename = "line_10")]
    pub total_interest: Decimal,
    #[serde(rename = "line_11")]
    pub cash_charitable: Decimal,
    #[serde(rename = "line_12")]
    pub noncash_charitable: Decimal,
    #[serde(rename = "line_13")]
    pub carryover_charitable: Decimal,
    #[serde(rename = "line_14")]
    pub total_charitable: Decimal,
    #[serde(rename = "line_15")]
    pub casualty_loss: Decimal,
    #[serde(rename = "line_16")]
    pub other_deductions: Decimal,
    #[serde(rename = "line_17")]
    pub total_itemized: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleA<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> ScheduleA<'a> {
    pub const ID: FormId = FormId::ScheduleA;
    pub const DEPENDENCIES: &'static [FormId] = &[FormId::Form1040Income];

    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Returns all-zero lines when the return has no itemized record.
    ///
    /// # Errors
    ///
    /// [`ContextError::AgiUnavailable`] if AGI has not been published yet.
    pub fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
        _deps: &ComputedForms<'_>,
        ctx: &CalculationContext,
    ) -> Result<ScheduleALines, ContextError> {
        let Some(itemized) = snapshot.itemized_deduction.as_ref() else {
            return Ok(ScheduleALines::default());
        };
        let agi = ctx.agi()?;

        let medical_expenses = round_half_up(itemized.medical_expenses);
        let raw_medical_floor = agi * self.config.medical_expense_agi_floor;
        let medical_floor = round_half_up(raw_medical_floor);
        let medical_deduction =
            round_half_up(max(medical_expenses - raw_medical_floor, Decimal::ZERO));

        let state_income_tax = round_half_up(itemized.state_income_tax_paid);
        let real_estate_tax = round_half_up(itemized.real_estate_tax_paid);
        let personal_property_tax = round_half_up(itemized.personal_property_tax);
        let total_salt = round_half_up(state_income_tax + real_estate_tax + personal_property_tax);
        let raw_salt_cap = self.phased_down_cap(agi, snapshot.filing_status);
        let salt_cap = round_half_up(raw_salt_cap);
        let limited_salt = round_half_up(min(total_salt, raw_salt_cap));

        let mortgage_interest_1098 = round_half_up(itemized.mortgage_interest_1098);
        let mortgage_interest_not_1098 = round_half_up(itemized.mortgage_interest_not_1098);
        let mortgage_points = round_half_up(itemized.mortgage_points);
        let investment_interest = round_half_up(itemized.investment_interest);
        let total_interest = round_half_up(
            mortgage_interest_1098 + mortgage_interest_not_1098 + mortgage_points + investment_interest,
        );

        let cash_charitable = round_half_up(itemized.cash_charitable);
        let noncash_charitable = round_half_up(itemized.noncash_charitable);
        let carryover_charitable = round_half_up(itemized.carryover_charitable);
        let total_charitable =
            round_half_up(cash_charitable + noncash_charitable + carryover_charitable);

        let casualty_loss = round_half_up(itemized.casualty_loss);
        let other_deductions = round_half_up(itemized.other_deductions);

        let total_itemized = round_half_up(
            medical_deduction
                + limited_salt
                + total_interest
                + total_charitable
                + casualty_loss
                + other_deductions,
        );

        debug!(
            agi = %agi,
            salt_cap = %salt_cap,
            total_itemized = %total_itemized,
            "Computed Schedule A"
        );

        Ok(ScheduleALines {
            medical_expenses,
            agi,
            medical_floor,
            medical_deduction,
            state_income_tax,
            real_estate_tax,
            personal_property_tax,
            total_salt,
            limited_salt,
            total_taxes: limited_salt,
            salt_cap,
            mortgage_interest_1098,
            mortgage_interest_not_1098,
            mortgage_points,
            investment_interest,
            total_interest,
            cash_charitable,
            noncash_charitable,
            carryover_charitable,
            total_charitable,
            casualty_loss,
            other_deductions,
            total_itemized,
        })
    }

    /// SALT cap after the income-based phase-down.
    pub fn salt_cap(
        &self,
        agi: Decimal,
        status: FilingStatus,
    ) -> Decimal {
        round_half_up(self.phased_down_cap(agi, status))
    }

    fn phased_down_cap(
        &self,
        agi: Decimal,
        status: FilingStatus,
    ) -> Decimal {
        let salt = &self.config.salt;
        let threshold = self.config.salt_phase_down_threshold(status);
        if agi <= threshold {
            return salt.cap_base;
        }

        let reduction = (agi - threshold) * salt.phase_down_rate;
        max(salt.cap_floor, salt.cap_base - reduction)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ItemizedDeduction;

    fn schedule_a() -> ScheduleA<'static> {
        ScheduleA::new(TaxYearConfig::for_year(2025).unwrap())
    }

    fn context_with_agi(agi: Decimal) -> CalculationContext {
        let mut ctx = CalculationContext::new();
        ctx.set_agi(agi).unwrap();
        ctx
    }

    // =========================================================================
    // salt_cap
    // =========================================================================

    #[test]
    fn salt_cap_full_at_or_below_threshold() {
        assert_eq!(schedule_a().salt_cap(dec!(500000), FilingStatus::Single), dec!(40000));
        assert_eq!(
            schedule_a().salt_cap(dec!(120000), FilingStatus::MarriedFilingJointly),
            dec!(40000)
        );
    }

    #[test]
    fn salt_cap_phases_down_above_threshold() {
        // 40000 - 0.30 * 50000
        assert_eq!(schedule_a().salt_cap(dec!(550000), FilingStatus::Single), dec!(25000));
    }

    #[test]
    fn salt_cap_never_below_floor() {
        assert_eq!(schedule_a().salt_cap(dec!(700000), FilingStatus::Single), dec!(10000));
        assert_eq!(schedule_a().salt_cap(dec!(5000000), FilingStatus::Single), dec!(10000));
    }

    // =========================================================================
    // calculate
    // =========================================================================

    #[test]
    fn no_itemized_record_yields_zero_lines_without_agi() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single);

        let lines = schedule_a()
            .calculate(&snapshot, &ComputedForms::new(), &CalculationContext::new())
            .unwrap();

        assert_eq!(lines, ScheduleALines::default());
    }

    #[test]
    fn itemized_record_requires_agi() {
        let snapshot =
            ReturnSnapshot::new(FilingStatus::Single).with_itemized(ItemizedDeduction::default());

        let result =
            schedule_a().calculate(&snapshot, &ComputedForms::new(), &CalculationContext::new());

        assert_eq!(result, Err(ContextError::AgiUnavailable));
    }

    #[test]
    fn sums_categories_into_total() {
        let snapshot =
            ReturnSnapshot::new(FilingStatus::Single).with_itemized(ItemizedDeduction {
                state_income_tax_paid: dec!(8000),
                real_estate_tax_paid: dec!(6000),
                mortgage_interest_1098: dec!(12000),
                cash_charitable: dec!(5000),
                ..ItemizedDeduction::default()
            });

        let lines = schedule_a()
            .calculate(&snapshot, &ComputedForms::new(), &context_with_agi(dec!(100000)))
            .unwrap();

        assert_eq!(lines.agi, dec!(100000));
        assert_eq!(lines.total_salt, dec!(14000));
        assert_eq!(lines.limited_salt, dec!(14000));
        assert_eq!(lines.total_taxes, dec!(14000));
        assert_eq!(lines.total_interest, dec!(12000));
        assert_eq!(lines.total_charitable, dec!(5000));
        assert_eq!(lines.total_itemized, dec!(31000));
    }

    #[test]
    fn medical_deductible_only_above_floor() {
        let snapshot =
            ReturnSnapshot::new(FilingStatus::Single).with_itemized(ItemizedDeduction {
                medical_expenses: dec!(10000),
                ..ItemizedDeduction::default()
            });

        let lines = schedule_a()
            .calculate(&snapshot, &ComputedForms::new(), &context_with_agi(dec!(80000)))
            .unwrap();

        assert_eq!(lines.medical_floor, dec!(6000));
        assert_eq!(lines.medical_deduction, dec!(4000));
        assert_eq!(lines.total_itemized, dec!(4000));
    }

    #[test]
    fn medical_deduction_uses_unrounded_floor() {
        let snapshot =
            ReturnSnapshot::new(FilingStatus::Single).with_itemized(ItemizedDeduction {
                medical_expenses: dec!(2.00),
                ..ItemizedDeduction::default()
            });

        let lines = schedule_a()
            .calculate(&snapshot, &ComputedForms::new(), &context_with_agi(dec!(13.40)))
            .unwrap();

        // Floor is 1.005: the line shows 1.01, the deduction is 2.00 - 1.005
        assert_eq!(lines.medical_floor, dec!(1.01));
        assert_eq!(lines.medical_deduction, dec!(1.00));
    }

    #[test]
    fn salt_cap_line_rounds_partial_cent_phase_down() {
        let snapshot =
            ReturnSnapshot::new(FilingStatus::Single).with_itemized(ItemizedDeduction {
                state_income_tax_paid: dec!(45000),
                ..ItemizedDeduction::default()
            });

        let lines = schedule_a()
            .calculate(&snapshot, &ComputedForms::new(), &context_with_agi(dec!(500000.05)))
            .unwrap();

        // 40000 - 0.30 * 0.05 = 39999.985
        assert_eq!(lines.salt_cap, dec!(39999.99));
        assert_eq!(lines.limited_salt, dec!(39999.99));
    }

    #[test]
    fn medical_below_floor_deducts_nothing() {
        let snapshot =
            ReturnSnapshot::new(FilingStatus::Single).with_itemized(ItemizedDeduction {
                medical_expenses: dec!(3000),
                ..ItemizedDeduction::default()
            });

        let lines = schedule_a()
            .calculate(&snapshot, &ComputedForms::new(), &context_with_agi(dec!(80000)))
            .unwrap();

        assert_eq!(lines.medical_deduction, dec!(0));
    }

    #[test]
    fn salt_limited_by_phased_down_cap() {
        let snapshot =
            ReturnSnapshot::new(FilingStatus::MarriedFilingJointly).with_itemized(
                ItemizedDeduction {
                    state_income_tax_paid: dec!(45000),
                    real_estate_tax_paid: dec!(15000),
                    ..ItemizedDeduction::default()
                },
            );

        let lines = schedule_a()
            .calculate(&snapshot, &ComputedForms::new(), &context_with_agi(dec!(560000)))
            .unwrap();

        assert_eq!(lines.total_salt, dec!(60000));
        assert_eq!(lines.salt_cap, dec!(22000));
        assert_eq!(lines.limited_salt, dec!(22000));
        assert!(lines.limited_salt <= lines.total_salt);
    }
}
