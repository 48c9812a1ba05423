//! Form 1040, U.S. Individual Income Tax Return.
//!
//! Finishes the return started by [`Form1040Income`](super::Form1040Income):
//! picks the deduction, computes tax (through the qualified dividends
//! worksheet when preferential income exists), applies credits, totals
//! payments and settles on a refund or an amount owed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CalculationError, ComputedForms, Form1040IncomeLines, FormId};
use crate::calculations::QualifiedDividendsWorksheet;
use crate::calculations::brackets::{bracket_tax, marginal_rate};
use crate::calculations::common::{max, round_half_up};
use crate::{DeductionMethod, ReturnSnapshot, TaxYearConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form1040Lines {
    /// Lines 1a through 11.
    #[serde(flatten)]
    pub income: Form1040IncomeLines,

    #[serde(rename = "line_12")]
    pub deduction: Decimal,
    pub standard_deduction: Decimal,
    pub itemized_deduction: Decimal,
    pub deduction_method: DeductionMethod,
    /// Qualified business income deduction. Always zero.
    #[serde(rename = "line_13")]
    pub qbi_deduction: Decimal,
    #[serde(rename = "line_14")]
    pub total_deductions: Decimal,
    #[serde(rename = "line_15")]
    pub taxable_income: Decimal,

    #[serde(rename = "line_16")]
    pub tax: Decimal,
    /// Schedule 2 Part I. Always zero.
    #[serde(rename = "line_17")]
    pub additional_tax: Decimal,
    #[serde(rename = "line_18")]
    pub tax_before_credits: Decimal,
    #[serde(rename = "line_19")]
    pub child_tax_credit: Decimal,
    #[serde(rename = "line_20")]
    pub total_credits: Decimal,
    #[serde(rename = "line_21")]
    pub tax_after_credits: Decimal,
    /// Schedule 2 Part II. Always zero.
    #[serde(rename = "line_22")]
    pub other_taxes: Decimal,
    #[serde(rename = "line_23")]
    pub tax_with_other_taxes: Decimal,
    #[serde(rename = "line_24")]
    pub total_tax: Decimal,

    #[serde(rename = "line_25a")]
    pub w2_withholding: Decimal,
    #[serde(rename = "line_25b")]
    pub form_1099_withholding: Decimal,
    #[serde(rename = "line_25d")]
    pub total_withholding: Decimal,
    #[serde(rename = "line_26")]
    pub estimated_payments: Decimal,
    #[serde(rename = "line_27")]
    pub earned_income_credit: Decimal,
    #[serde(rename = "line_28")]
    pub additional_child_tax_credit: Decimal,
    #[serde(rename = "line_29")]
    pub american_opportunity_credit: Decimal,
    #[serde(rename = "line_33")]
    pub total_payments: Decimal,

    #[serde(rename = "line_34")]
    pub overpaid: Decimal,
    #[serde(rename = "line_35a")]
    pub refund: Decimal,
    #[serde(rename = "line_37")]
    pub amount_owed: Decimal,

    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct Form1040<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> Form1040<'a> {
    pub const ID: FormId = FormId::Form1040;
    pub const DEPENDENCIES: &'static [FormId] = &[
        FormId::Form1040Income,
        FormId::ScheduleB,
        FormId::ScheduleD,
        FormId::ScheduleA,
        FormId::Schedule8812,
        FormId::Schedule3,
    ];

    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// [`CalculationError::MissingRequiredForm`] when the income section was
    /// not computed first.
    pub fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
        deps: &ComputedForms<'_>,
    ) -> Result<Form1040Lines, CalculationError> {
        let status = snapshot.filing_status;
        let income = deps
            .form_1040_income()
            .cloned()
            .ok_or(CalculationError::MissingRequiredForm(FormId::Form1040Income))?;
        let agi = income.agi;

        // Deduction
        let standard_deduction = self.config.standard_deduction(status);
        let itemized_deduction = deps
            .schedule_a()
            .map(|a| a.total_itemized)
            .unwrap_or_default();
        let deduction_method = if itemized_deduction > standard_deduction
            && snapshot.itemized_deduction.is_some()
        {
            DeductionMethod::Itemized
        } else {
            DeductionMethod::Standard
        };
        let deduction = match deduction_method {
            DeductionMethod::Itemized => itemized_deduction,
            DeductionMethod::Standard => standard_deduction,
        };
        let qbi_deduction = Decimal::ZERO;
        let total_deductions = round_half_up(deduction + qbi_deduction);
        let taxable_income = round_half_up(max(agi - total_deductions, Decimal::ZERO));

        // Tax
        let net_capital_gain = deps
            .schedule_d()
            .map(|d| d.net_capital_gain)
            .unwrap_or_default();
        let tax = self.tax(taxable_income, income.qualified_dividends, net_capital_gain, snapshot);
        let additional_tax = Decimal::ZERO;
        let tax_before_credits = round_half_up(tax + additional_tax);

        // Credits
        let schedule_8812 = deps.schedule_8812().cloned().unwrap_or_default();
        let schedule_3 = deps.schedule_3().cloned().unwrap_or_default();
        let child_tax_credit = round_half_up(schedule_8812.nonrefundable_ctc);
        let total_credits = round_half_up(child_tax_credit + schedule_3.nonrefundable_credits);
        let tax_after_credits =
            round_half_up(max(tax_before_credits - total_credits, Decimal::ZERO));
        let other_taxes = Decimal::ZERO;
        let total_tax = round_half_up(tax_after_credits + other_taxes);

        // Payments
        let w2_withholding = round_half_up(
            snapshot
                .w2_incomes
                .iter()
                .map(|w| w.box_2_fed_tax_withheld)
                .sum(),
        );
        let form_1099_withholding = round_half_up(form_1099_withholding(snapshot, deps));
        let total_withholding = round_half_up(w2_withholding + form_1099_withholding);
        let additional_child_tax_credit = round_half_up(schedule_8812.refundable_ctc);
        let american_opportunity_credit = round_half_up(schedule_3.refundable_aotc);
        let total_payments = round_half_up(
            total_withholding + additional_child_tax_credit + american_opportunity_credit,
        );

        // Refund or amount owed
        let (refund, amount_owed) = if total_payments > total_tax {
            (round_half_up(total_payments - total_tax), Decimal::ZERO)
        } else {
            (Decimal::ZERO, round_half_up(total_tax - total_payments))
        };

        let effective_rate = if agi > Decimal::ZERO {
            round_half_up(total_tax / agi)
        } else {
            Decimal::ZERO
        };
        let marginal_rate = marginal_rate(taxable_income, self.config.ordinary_brackets(status));

        debug!(
            deduction_method = %deduction_method,
            taxable_income = %taxable_income,
            total_tax = %total_tax,
            total_payments = %total_payments,
            "Computed Form 1040"
        );

        Ok(Form1040Lines {
            income,
            deduction,
            standard_deduction,
            itemized_deduction,
            deduction_method,
            qbi_deduction,
            total_deductions,
            taxable_income,
            tax,
            additional_tax,
            tax_before_credits,
            child_tax_credit,
            total_credits,
            tax_after_credits,
            other_taxes,
            tax_with_other_taxes: total_tax,
            total_tax,
            w2_withholding,
            form_1099_withholding,
            total_withholding,
            estimated_payments: Decimal::ZERO,
            earned_income_credit: Decimal::ZERO,
            additional_child_tax_credit,
            american_opportunity_credit,
            total_payments,
            overpaid: refund,
            refund,
            amount_owed,
            effective_rate,
            marginal_rate,
        })
    }

    /// Line 16. Preferential income goes through the worksheet; otherwise the
    /// ordinary schedule alone applies.
    fn tax(
        &self,
        taxable_income: Decimal,
        qualified_dividends: Decimal,
        net_capital_gain: Decimal,
        snapshot: &ReturnSnapshot,
    ) -> Decimal {
        let status = snapshot.filing_status;
        if qualified_dividends > Decimal::ZERO || net_capital_gain > Decimal::ZERO {
            QualifiedDividendsWorksheet::new(self.config).compute(
                taxable_income,
                qualified_dividends,
                net_capital_gain,
                status,
            )
        } else {
            bracket_tax(taxable_income, self.config.ordinary_brackets(status))
        }
    }
}

/// Federal withholding reported on every 1099 the return carries.
fn form_1099_withholding(
    snapshot: &ReturnSnapshot,
    deps: &ComputedForms<'_>,
) -> Decimal {
    let interest_and_dividends = deps
        .schedule_b()
        .map(|b| b.fed_tax_withheld)
        .unwrap_or_default();
    let retirement: Decimal = snapshot
        .retirement_1099rs
        .iter()
        .map(|r| r.box_4_fed_tax_withheld)
        .sum();
    let government: Decimal = snapshot
        .government_1099gs
        .iter()
        .map(|g| g.box_4_fed_tax_withheld)
        .sum();
    let social_security: Decimal = snapshot
        .ssa_1099s
        .iter()
        .map(|s| s.box_6_voluntary_withholding)
        .sum();

    interest_and_dividends + retirement + government + social_security
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::forms::{
        FormLines, FormResult, Schedule3Lines, Schedule8812Lines, ScheduleALines, ScheduleDLines,
    };
    use crate::{FilingStatus, ItemizedDeduction, Retirement1099R, W2Income};

    fn form() -> Form1040<'static> {
        Form1040::new(TaxYearConfig::for_year(2025).unwrap())
    }

    fn income(agi: Decimal) -> FormResult {
        FormResult::new(FormLines::Form1040Income(Form1040IncomeLines {
            w2_wages: agi,
            total_wages: agi,
            total_income: agi,
            agi,
            ..Form1040IncomeLines::default()
        }))
    }

    fn wages(
        amount: Decimal,
        withheld: Decimal,
    ) -> ReturnSnapshot {
        ReturnSnapshot::new(FilingStatus::Single).with_w2(W2Income::new(amount, withheld))
    }

    // =========================================================================
    // calculate
    // =========================================================================

    #[test]
    fn missing_income_section_is_fatal() {
        let result = form().calculate(&wages(dec!(1000), dec!(0)), &ComputedForms::new());

        assert!(matches!(
            result,
            Err(CalculationError::MissingRequiredForm(FormId::Form1040Income))
        ));
    }

    #[test]
    fn standard_deduction_and_refund() {
        let income = income(dec!(75000));
        let mut deps = ComputedForms::new();
        deps.insert(&income);

        let lines = form()
            .calculate(&wages(dec!(75000), dec!(9500)), &deps)
            .unwrap();

        assert_eq!(lines.deduction_method, DeductionMethod::Standard);
        assert_eq!(lines.deduction, dec!(15750));
        assert_eq!(lines.taxable_income, dec!(59250));
        assert_eq!(lines.tax, dec!(7949.00));
        assert_eq!(lines.total_tax, dec!(7949.00));
        assert_eq!(lines.total_payments, dec!(9500));
        assert_eq!(lines.refund, dec!(1551.00));
        assert_eq!(lines.amount_owed, dec!(0));
        assert_eq!(lines.marginal_rate, dec!(0.22));
        // 7949 / 75000 = 0.10598...
        assert_eq!(lines.effective_rate, dec!(0.11));
    }

    #[test]
    fn underwithheld_return_owes() {
        let income = income(dec!(100000));
        let mut deps = ComputedForms::new();
        deps.insert(&income);

        let lines = form()
            .calculate(&wages(dec!(100000), dec!(5000)), &deps)
            .unwrap();

        assert_eq!(lines.refund, dec!(0));
        assert!(lines.amount_owed > dec!(0));
        assert_eq!(lines.amount_owed, lines.total_tax - lines.total_payments);
        // 13449 / 100000 = 0.13449
        assert_eq!(lines.effective_rate, dec!(0.13));
    }

    #[test]
    fn itemized_used_only_when_larger_than_standard() {
        let income = income(dec!(100000));
        let schedule_a = FormResult::new(FormLines::ScheduleA(ScheduleALines {
            total_itemized: dec!(31000),
            ..ScheduleALines::default()
        }));
        let mut deps = ComputedForms::new();
        deps.insert(&income);
        deps.insert(&schedule_a);
        let snapshot = wages(dec!(100000), dec!(0)).with_itemized(ItemizedDeduction::default());

        let lines = form().calculate(&snapshot, &deps).unwrap();

        assert_eq!(lines.deduction_method, DeductionMethod::Itemized);
        assert_eq!(lines.itemized_deduction, dec!(31000));
        assert_eq!(lines.standard_deduction, dec!(15750));
        assert_eq!(lines.taxable_income, dec!(69000));
    }

    #[test]
    fn smaller_itemized_total_falls_back_to_standard() {
        let income = income(dec!(100000));
        let schedule_a = FormResult::new(FormLines::ScheduleA(ScheduleALines {
            total_itemized: dec!(9000),
            ..ScheduleALines::default()
        }));
        let mut deps = ComputedForms::new();
        deps.insert(&income);
        deps.insert(&schedule_a);
        let snapshot = wages(dec!(100000), dec!(0)).with_itemized(ItemizedDeduction::default());

        let lines = form().calculate(&snapshot, &deps).unwrap();

        assert_eq!(lines.deduction_method, DeductionMethod::Standard);
        assert_eq!(lines.deduction, dec!(15750));
    }

    #[test]
    fn deduction_larger_than_agi_floors_taxable_income_at_zero() {
        let income = income(dec!(9000));
        let mut deps = ComputedForms::new();
        deps.insert(&income);

        let lines = form()
            .calculate(&wages(dec!(9000), dec!(300)), &deps)
            .unwrap();

        assert_eq!(lines.taxable_income, dec!(0));
        assert_eq!(lines.total_tax, dec!(0));
        assert_eq!(lines.refund, dec!(300));
        assert_eq!(lines.marginal_rate, dec!(0.10));
    }

    #[test]
    fn zero_agi_has_zero_effective_rate() {
        let income = income(dec!(0));
        let mut deps = ComputedForms::new();
        deps.insert(&income);

        let lines = form()
            .calculate(&ReturnSnapshot::new(FilingStatus::Single), &deps)
            .unwrap();

        assert_eq!(lines.effective_rate, dec!(0));
        assert_eq!(lines.refund, dec!(0));
        assert_eq!(lines.amount_owed, dec!(0));
    }

    #[test]
    fn net_capital_gain_routes_through_worksheet() {
        let income = income(dec!(53000));
        let schedule_d = FormResult::new(FormLines::ScheduleD(ScheduleDLines {
            net_capital_gain: dec!(5000),
            ..ScheduleDLines::default()
        }));
        let mut deps = ComputedForms::new();
        deps.insert(&income);
        deps.insert(&schedule_d);

        let lines = form()
            .calculate(&wages(dec!(50000), dec!(0)), &deps)
            .unwrap();

        assert_eq!(lines.taxable_income, dec!(37250));
        // Ordinary tax on 32250; the 5000 gain falls in the 0% band.
        assert_eq!(lines.tax, dec!(3631.50));
    }

    #[test]
    fn credits_reduce_tax_and_refundable_credits_count_as_payments() {
        let income = income(dec!(75000));
        let schedule_8812 = FormResult::new(FormLines::Schedule8812(Schedule8812Lines {
            nonrefundable_ctc: dec!(2200),
            refundable_ctc: dec!(300),
        }));
        let schedule_3 = FormResult::new(FormLines::Schedule3(Schedule3Lines {
            nonrefundable_credits: dec!(500),
            refundable_aotc: dec!(1000),
        }));
        let mut deps = ComputedForms::new();
        deps.insert(&income);
        deps.insert(&schedule_8812);
        deps.insert(&schedule_3);

        let lines = form()
            .calculate(&wages(dec!(75000), dec!(9500)), &deps)
            .unwrap();

        assert_eq!(lines.child_tax_credit, dec!(2200));
        assert_eq!(lines.total_credits, dec!(2700));
        assert_eq!(lines.tax_after_credits, dec!(5249.00));
        assert_eq!(lines.additional_child_tax_credit, dec!(300));
        assert_eq!(lines.american_opportunity_credit, dec!(1000));
        assert_eq!(lines.total_payments, dec!(10800));
    }

    #[test]
    fn credits_cannot_push_tax_below_zero() {
        let income = income(dec!(20000));
        let schedule_3 = FormResult::new(FormLines::Schedule3(Schedule3Lines {
            nonrefundable_credits: dec!(5000),
            ..Schedule3Lines::default()
        }));
        let mut deps = ComputedForms::new();
        deps.insert(&income);
        deps.insert(&schedule_3);

        let lines = form()
            .calculate(&wages(dec!(20000), dec!(0)), &deps)
            .unwrap();

        assert_eq!(lines.tax_after_credits, dec!(0));
        assert_eq!(lines.total_tax, dec!(0));
    }

    #[test]
    fn withholding_from_1099s_lands_on_line_25b() {
        let income = income(dec!(40000));
        let mut deps = ComputedForms::new();
        deps.insert(&income);
        let mut snapshot = wages(dec!(30000), dec!(2000));
        snapshot.retirement_1099rs.push(Retirement1099R {
            box_2a_taxable_amount: dec!(10000),
            box_4_fed_tax_withheld: dec!(1000),
            ..Retirement1099R::default()
        });

        let lines = form().calculate(&snapshot, &deps).unwrap();

        assert_eq!(lines.w2_withholding, dec!(2000));
        assert_eq!(lines.form_1099_withholding, dec!(1000));
        assert_eq!(lines.total_withholding, dec!(3000));
    }
}
