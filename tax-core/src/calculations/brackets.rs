//! Progressive rate schedule arithmetic.
//!
//! Brackets are expressed as `(rate, cumulative upper limit)` pairs; the tax
//! on an amount is the sum, over every bracket, of the portion of the amount
//! falling between the previous limit and this one, times the bracket rate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxBracket;
//! use tax_core::calculations::brackets::{bracket_tax, marginal_rate};
//!
//! let brackets = vec![
//!     TaxBracket::new(dec!(0.10), dec!(11925)),
//!     TaxBracket::new(dec!(0.12), dec!(48475)),
//!     TaxBracket::unbounded(dec!(0.22)),
//! ];
//!
//! assert_eq!(bracket_tax(dec!(30000), &brackets), dec!(3361.50));
//! assert_eq!(marginal_rate(dec!(30000), &brackets), dec!(0.12));
//! ```

use rust_decimal::Decimal;

use crate::TaxBracket;
use crate::calculations::common::{min, round_half_up};

/// Tax on `income` under a progressive schedule, rounded once to the cent.
///
/// Zero or negative income yields zero.
pub fn bracket_tax(
    income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut previous_limit = Decimal::ZERO;

    for bracket in brackets {
        if income <= previous_limit {
            break;
        }
        let taxable_in_bracket = min(income, bracket.ceiling()) - previous_limit;
        if taxable_in_bracket > Decimal::ZERO {
            tax += taxable_in_bracket * bracket.rate;
        }
        previous_limit = bracket.ceiling();
    }

    round_half_up(tax)
}

/// Rate of the bracket containing `taxable_income`.
///
/// An amount equal to a bracket's upper limit belongs to that bracket. An
/// empty schedule yields zero.
pub fn marginal_rate(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    brackets
        .iter()
        .find(|b| taxable_income <= b.ceiling())
        .or_else(|| brackets.last())
        .map(|b| b.rate)
        .unwrap_or_default()
}
