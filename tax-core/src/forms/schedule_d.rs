//! Schedule D, Capital Gains and Losses.
//!
//! | Line | Description |
//! |------|-------------|
//! | 7    | Net short-term gain or loss (Form 8949 Part I) |
//! | 13   | Capital gain distributions (1099-DIV box 2a) |
//! | 15   | Net long-term gain or loss (Form 8949 Part II + line 13) |
//! | 16   | Combine lines 7 and 15 |
//! | 21   | Line 16 if a gain, else the loss limited to the annual ceiling |
//!
//! A loss beyond the ceiling is recorded as a carry-forward and not used
//! further in the current year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ComputedForms, FormId};
use crate::calculations::common::{max, round_half_up};
use crate::{ReturnSnapshot, TaxYearConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDLines {
    #[serde(rename = "line_7")]
    pub net_short_term: Decimal,
    #[serde(rename = "line_13")]
    pub capital_gain_distributions: Decimal,
    #[serde(rename = "line_15")]
    pub net_long_term: Decimal,
    #[serde(rename = "line_16")]
    pub net_capital: Decimal,
    /// Amount carried to Form 1040 line 7.
    #[serde(rename = "line_21")]
    pub reportable: Decimal,
    pub carryforward_loss: Decimal,
    pub has_gain: bool,
    /// Long-term gain eligible for preferential rates: line 15 floored at
    /// zero.
    #[serde(rename = "net_lt_gain")]
    pub net_capital_gain: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleD<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> ScheduleD<'a> {
    pub const ID: FormId = FormId::ScheduleD;
    pub const DEPENDENCIES: &'static [FormId] = &[FormId::Form8949];

    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
        deps: &ComputedForms<'_>,
    ) -> ScheduleDLines {
        let (st_gain_loss, lt_gain_loss) = deps
            .form_8949()
            .map(|f| (f.st_gain_loss, f.lt_gain_loss))
            .unwrap_or_default();

        let net_short_term = round_half_up(st_gain_loss);
        let capital_gain_distributions = round_half_up(
            snapshot
                .dividend_1099s
                .iter()
                .map(|d| d.box_2a_total_capital_gain)
                .sum(),
        );
        let net_long_term = round_half_up(lt_gain_loss + capital_gain_distributions);
        let net_capital = round_half_up(net_short_term + net_long_term);

        let (reportable, carryforward_loss) = self.limit_loss(net_capital);

        ScheduleDLines {
            net_short_term,
            capital_gain_distributions,
            net_long_term,
            net_capital,
            reportable,
            carryforward_loss,
            has_gain: net_capital > Decimal::ZERO,
            net_capital_gain: max(net_long_term, Decimal::ZERO),
        }
    }

    /// Splits line 16 into the current-year amount and the carry-forward.
    fn limit_loss(
        &self,
        net_capital: Decimal,
    ) -> (Decimal, Decimal) {
        if net_capital > Decimal::ZERO {
            return (net_capital, Decimal::ZERO);
        }

        let allowed = max(net_capital, -self.config.capital_loss_limit);
        let carryforward = round_half_up(net_capital - allowed);
        if carryforward < Decimal::ZERO {
            warn!(
                net_capital = %net_capital,
                allowed = %allowed,
                carryforward = %carryforward,
                "Capital loss exceeds annual limit; excess carried forward"
            );
        }

        (round_half_up(allowed), carryforward)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::forms::{Form8949Lines, FormLines, FormResult};
    use crate::{Dividend1099, FilingStatus};

    fn schedule_d() -> ScheduleD<'static> {
        ScheduleD::new(TaxYearConfig::for_year(2025).unwrap())
    }

    fn form_8949(
        st: Decimal,
        lt: Decimal,
    ) -> FormResult {
        FormResult::new(FormLines::Form8949(Form8949Lines {
            st_gain_loss: st,
            lt_gain_loss: lt,
            transaction_count: 2,
            ..Form8949Lines::default()
        }))
    }

    fn calculate_with(
        snapshot: &ReturnSnapshot,
        f8949: &FormResult,
    ) -> ScheduleDLines {
        let mut deps = ComputedForms::new();
        deps.insert(f8949);
        schedule_d().calculate(snapshot, &deps)
    }

    #[test]
    fn missing_form_8949_is_treated_as_zero() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single);

        let lines = schedule_d().calculate(&snapshot, &ComputedForms::new());

        assert_eq!(lines.net_capital, dec!(0));
        assert_eq!(lines.reportable, dec!(0));
        assert_eq!(lines.carryforward_loss, dec!(0));
        assert!(!lines.has_gain);
    }

    #[test]
    fn combines_short_and_long_term_gain() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single);

        let lines = calculate_with(&snapshot, &form_8949(dec!(-2000), dec!(5000)));

        assert_eq!(lines.net_short_term, dec!(-2000));
        assert_eq!(lines.net_long_term, dec!(5000));
        assert_eq!(lines.net_capital, dec!(3000));
        assert_eq!(lines.reportable, dec!(3000));
        assert!(lines.has_gain);
        // Line 15, not reduced by the short-term loss
        assert_eq!(lines.net_capital_gain, dec!(5000));
    }

    #[test]
    fn distributions_count_as_long_term() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single).with_dividend(Dividend1099 {
            box_2a_total_capital_gain: dec!(750),
            ..Dividend1099::default()
        });

        let lines = calculate_with(&snapshot, &form_8949(dec!(100), dec!(250)));

        assert_eq!(lines.capital_gain_distributions, dec!(750));
        assert_eq!(lines.net_long_term, dec!(1000));
        assert_eq!(lines.net_short_term + lines.net_long_term, dec!(1100));
    }

    #[test]
    fn loss_within_limit_is_fully_deductible() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single);

        let lines = calculate_with(&snapshot, &form_8949(dec!(-1200), dec!(-800)));

        assert_eq!(lines.net_capital, dec!(-2000));
        assert_eq!(lines.reportable, dec!(-2000));
        assert_eq!(lines.carryforward_loss, dec!(0));
        assert_eq!(lines.net_capital_gain, dec!(0));
    }

    #[test]
    fn loss_beyond_limit_is_clamped_and_carried_forward() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single);

        let lines = calculate_with(&snapshot, &form_8949(dec!(-6500), dec!(1000)));

        assert_eq!(lines.net_capital, dec!(-5500));
        assert_eq!(lines.reportable, dec!(-3000));
        assert_eq!(lines.carryforward_loss, dec!(-2500));
        assert_eq!(lines.net_capital - lines.reportable, lines.carryforward_loss);
    }

    #[test]
    fn preferential_gain_is_line_15_even_when_line_16_is_a_loss() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single);

        let lines = calculate_with(&snapshot, &form_8949(dec!(-4000), dec!(3000)));

        assert_eq!(lines.net_capital, dec!(-1000));
        assert_eq!(lines.net_capital_gain, dec!(3000));
    }

    #[test]
    fn long_term_loss_has_no_preferential_gain() {
        let snapshot = ReturnSnapshot::new(FilingStatus::Single);

        let lines = calculate_with(&snapshot, &form_8949(dec!(4000), dec!(-3000)));

        assert_eq!(lines.net_long_term, dec!(-3000));
        assert_eq!(lines.net_capital_gain, dec!(0));
    }
}
