//! Form 1040 income section, lines 1 through 11.
//!
//! Runs before Schedule A so that AGI exists when itemized deductions need it.
//! Publishing AGI into the [`CalculationContext`] is part of this step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CalculationContext, ComputedForms, ContextError, FormId};
use crate::calculations::common::round_half_up;
use crate::{ReturnSnapshot, TaxYearConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form1040IncomeLines {
    #[serde(rename = "line_1a")]
    pub w2_wages: Decimal,
    #[serde(rename = "line_1z")]
    pub total_wages: Decimal,
    #[serde(rename = "line_2a")]
    pub tax_exempt_interest: Decimal,
    #[serde(rename = "line_2b")]
    pub taxable_interest: Decimal,
    #[serde(rename = "line_3a")]
    pub qualified_dividends: Decimal,
    #[serde(rename = "line_3b")]
    pub ordinary_dividends: Decimal,
    #[serde(rename = "line_4a")]
    pub ira_distributions: Decimal,
    #[serde(rename = "line_4b")]
    pub taxable_ira_distributions: Decimal,
    #[serde(rename = "line_5a")]
    pub pensions: Decimal,
    #[serde(rename = "line_5b")]
    pub taxable_pensions: Decimal,
    #[serde(rename = "line_6a")]
    pub social_security_benefits: Decimal,
    #[serde(rename = "line_6b")]
    pub taxable_social_security: Decimal,
    #[serde(rename = "line_7")]
    pub capital_gain_or_loss: Decimal,
    /// Schedule 1 additional income. Only unemployment is supported.
    #[serde(rename = "line_8")]
    pub additional_income: Decimal,
    #[serde(rename = "line_9")]
    pub total_income: Decimal,
    #[serde(rename = "line_10")]
    pub adjustments: Decimal,
    #[serde(rename = "line_11")]
    pub agi: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct Form1040Income<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> Form1040Income<'a> {
    pub const ID: FormId = FormId::Form1040Income;
    pub const DEPENDENCIES: &'static [FormId] = &[FormId::ScheduleB, FormId::ScheduleD];

    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// [`ContextError::AgiAlreadySet`] if AGI was already published for this
    /// calculation.
    pub fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
        deps: &ComputedForms<'_>,
        ctx: &mut CalculationContext,
    ) -> Result<Form1040IncomeLines, ContextError> {
        let w2_wages = round_half_up(snapshot.w2_incomes.iter().map(|w| w.box_1_wages).sum());

        let schedule_b = deps.schedule_b().cloned().unwrap_or_default();

        let ira_distributions = round_half_up(
            snapshot
                .retirement_1099rs
                .iter()
                .map(|r| r.box_1_gross_distribution)
                .sum(),
        );
        let taxable_ira_distributions = round_half_up(
            snapshot
                .retirement_1099rs
                .iter()
                .map(|r| r.box_2a_taxable_amount)
                .sum(),
        );

        let social_security_benefits = round_half_up(
            snapshot
                .ssa_1099s
                .iter()
                .map(|s| s.box_5_net_benefits)
                .sum(),
        );
        let taxable_social_security = self.taxable_social_security(social_security_benefits);

        let capital_gain_or_loss = deps
            .schedule_d()
            .map(|d| d.reportable)
            .unwrap_or_default();

        let additional_income = round_half_up(
            snapshot
                .government_1099gs
                .iter()
                .map(|g| g.box_1_unemployment)
                .sum(),
        );

        let total_income = round_half_up(
            w2_wages
                + schedule_b.total_interest
                + schedule_b.total_ordinary_dividends
                + taxable_ira_distributions
                + taxable_social_security
                + capital_gain_or_loss
                + additional_income,
        );
        let adjustments = Decimal::ZERO;
        let agi = round_half_up(total_income - adjustments);

        ctx.set_agi(agi)?;
        debug!(total_income = %total_income, agi = %agi, "Computed Form 1040 income section");

        Ok(Form1040IncomeLines {
            w2_wages,
            total_wages: w2_wages,
            tax_exempt_interest: schedule_b.tax_exempt_interest,
            taxable_interest: schedule_b.total_interest,
            qualified_dividends: schedule_b.qualified_dividends,
            ordinary_dividends: schedule_b.total_ordinary_dividends,
            ira_distributions,
            taxable_ira_distributions,
            pensions: Decimal::ZERO,
            taxable_pensions: Decimal::ZERO,
            social_security_benefits,
            taxable_social_security,
            capital_gain_or_loss,
            additional_income,
            total_income,
            adjustments,
            agi,
        })
    }

    // Flat fraction of net benefits; the provisional-income worksheet is not
    // modelled.
    fn taxable_social_security(
        &self,
        benefits: Decimal,
    ) -> Decimal {
        if benefits <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        round_half_up(benefits * self.config.social_security_taxable_fraction)
    }
}
