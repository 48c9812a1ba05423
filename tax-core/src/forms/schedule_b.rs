//! Schedule B, Interest and Ordinary Dividends.
//!
//! Besides the two Schedule B totals this also tracks qualified dividends,
//! tax-exempt interest and federal withholding from 1099-INT/1099-DIV. Those
//! never appear on Schedule B itself but Form 1040 needs them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FormId;
use crate::ReturnSnapshot;
use crate::calculations::common::round_half_up;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBLines {
    #[serde(rename = "line_1")]
    pub interest: Decimal,
    /// Part I total.
    #[serde(rename = "line_4")]
    pub total_interest: Decimal,
    #[serde(rename = "line_5")]
    pub ordinary_dividends: Decimal,
    /// Part II total.
    #[serde(rename = "line_6")]
    pub total_ordinary_dividends: Decimal,
    pub qualified_dividends: Decimal,
    pub tax_exempt_interest: Decimal,
    pub fed_tax_withheld: Decimal,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleB;

impl ScheduleB {
    pub const ID: FormId = FormId::ScheduleB;
    pub const DEPENDENCIES: &'static [FormId] = &[];

    pub fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
    ) -> ScheduleBLines {
        let interest = round_half_up(
            snapshot
                .interest_1099s
                .iter()
                .map(|i| i.box_1_interest)
                .sum(),
        );
        let ordinary_dividends = round_half_up(
            snapshot
                .dividend_1099s
                .iter()
                .map(|d| d.box_1a_ordinary_dividends)
                .sum(),
        );
        let qualified_dividends = round_half_up(
            snapshot
                .dividend_1099s
                .iter()
                .map(|d| d.box_1b_qualified_dividends)
                .sum(),
        );
        let tax_exempt_interest = round_half_up(
            snapshot
                .interest_1099s
                .iter()
                .map(|i| i.box_8_tax_exempt_interest)
                .sum(),
        );

        let interest_withheld: Decimal = snapshot
            .interest_1099s
            .iter()
            .map(|i| i.box_4_fed_tax_withheld)
            .sum();
        let dividend_withheld: Decimal = snapshot
            .dividend_1099s
            .iter()
            .map(|d| d.box_4_fed_tax_withheld)
            .sum();

        ScheduleBLines {
            interest,
            total_interest: interest,
            ordinary_dividends,
            total_ordinary_dividends: ordinary_dividends,
            qualified_dividends,
            tax_exempt_interest,
            fed_tax_withheld: round_half_up(interest_withheld + dividend_withheld),
        }
    }
}
