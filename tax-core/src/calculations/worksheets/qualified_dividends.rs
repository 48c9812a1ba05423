//! Qualified Dividends and Capital Gain Tax Worksheet (Form 1040, line 16).
//!
//! Used whenever a return has qualified dividends or a net long-term capital
//! gain. Preferential income is taxed at the 0% / 15% / 20% rates, stacked on
//! top of ordinary income to decide which of those rates applies.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable income |
//! | 2    | Qualified dividends |
//! | 3    | Net long-term capital gain |
//! | 4    | Preferential income: smaller of (2 + 3) and 1 |
//! | 5    | Ordinary income: 1 - 4 |
//! | 6    | Tax on 5 using the ordinary schedule |
//! | 7    | Tax on 4 using the preferential schedule, starting at 5 |
//! | 8    | Tax on 1 using the ordinary schedule alone |
//! | 9    | Tax: smaller of (6 + 7) and 8 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FilingStatus, TaxYearConfig};
//! use tax_core::calculations::QualifiedDividendsWorksheet;
//!
//! let config = TaxYearConfig::for_year(2025).unwrap();
//! let worksheet = QualifiedDividendsWorksheet::new(config);
//!
//! let tax = worksheet.compute(dec!(49250), dec!(2500), dec!(0), FilingStatus::Single);
//!
//! assert_eq!(tax, dec!(5506.50));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::brackets::bracket_tax;
use crate::calculations::common::{min, round_half_up};
use crate::{FilingStatus, TaxBracket, TaxYearConfig};

/// Intermediate figures of one worksheet run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedDividendsWorksheetResult {
    pub preferential_income: Decimal,
    pub ordinary_income: Decimal,
    pub ordinary_tax: Decimal,
    pub preferential_tax: Decimal,
    pub all_ordinary_tax: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone)]
pub struct QualifiedDividendsWorksheet<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> QualifiedDividendsWorksheet<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Total tax on `taxable_income` with preferential rates applied.
    pub fn compute(
        &self,
        taxable_income: Decimal,
        qualified_dividends: Decimal,
        net_long_term_gain: Decimal,
        status: FilingStatus,
    ) -> Decimal {
        self.calculate(
            taxable_income,
            qualified_dividends,
            net_long_term_gain,
            status,
        )
        .tax
    }

    /// Runs the worksheet and returns every intermediate line.
    pub fn calculate(
        &self,
        taxable_income: Decimal,
        qualified_dividends: Decimal,
        net_long_term_gain: Decimal,
        status: FilingStatus,
    ) -> QualifiedDividendsWorksheetResult {
        if taxable_income <= Decimal::ZERO {
            return QualifiedDividendsWorksheetResult::default();
        }

        let ordinary = self.config.ordinary_brackets(status);
        let preferential = self.config.preferential_brackets(status);

        let preferential_income = min(qualified_dividends + net_long_term_gain, taxable_income);
        let ordinary_income = taxable_income - preferential_income;

        let ordinary_tax = bracket_tax(ordinary_income, ordinary);
        let preferential_tax = stacked_tax(ordinary_income, preferential_income, preferential);
        let all_ordinary_tax = bracket_tax(taxable_income, ordinary);

        let tax = min(ordinary_tax + preferential_tax, all_ordinary_tax);

        QualifiedDividendsWorksheetResult {
            preferential_income,
            ordinary_income,
            ordinary_tax,
            preferential_tax,
            all_ordinary_tax,
            tax,
        }
    }
}

/// Tax on `amount` placed on top of `floor` within `brackets`.
fn stacked_tax(
    floor: Decimal,
    amount: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut floor = floor;
    let mut remaining = amount;

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        if floor >= bracket.ceiling() {
            continue;
        }

        let room = bracket.ceiling() - floor;
        let taxable_in_bracket = min(remaining, room);
        tax += taxable_in_bracket * bracket.rate;
        remaining -= taxable_in_bracket;
        floor += taxable_in_bracket;
    }

    round_half_up(tax)
}
