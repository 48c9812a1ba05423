//! Form 8949, Sales and Other Dispositions of Capital Assets.
//!
//! Splits sales into Part I (short-term) and Part II (long-term) and totals
//! each part. Gain or loss per sale is proceeds minus basis plus adjustment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FormId;
use crate::calculations::common::round_half_up;
use crate::{CapitalAssetSale, HoldingPeriod, ReturnSnapshot};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form8949Lines {
    pub st_proceeds: Decimal,
    pub st_basis: Decimal,
    pub st_adjustment: Decimal,
    pub st_gain_loss: Decimal,
    pub lt_proceeds: Decimal,
    pub lt_basis: Decimal,
    pub lt_adjustment: Decimal,
    pub lt_gain_loss: Decimal,
    /// Number of sales reported; zero means the form is not filed.
    pub transaction_count: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct PartTotals {
    proceeds: Decimal,
    basis: Decimal,
    adjustment: Decimal,
    gain_loss: Decimal,
}

impl PartTotals {
    fn add(
        &mut self,
        sale: &CapitalAssetSale,
    ) {
        self.proceeds += sale.proceeds;
        self.basis += sale.cost_basis;
        self.adjustment += sale.adjustment_amount;
        self.gain_loss += sale.gain_loss();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Form8949;

impl Form8949 {
    pub const ID: FormId = FormId::Form8949;
    pub const DEPENDENCIES: &'static [FormId] = &[];

    pub fn calculate(
        &self,
        snapshot: &ReturnSnapshot,
    ) -> Form8949Lines {
        let mut short_term = PartTotals::default();
        let mut long_term = PartTotals::default();

        for sale in &snapshot.capital_asset_sales {
            match sale.holding_period {
                HoldingPeriod::ShortTerm => short_term.add(sale),
                HoldingPeriod::LongTerm => long_term.add(sale),
            }
        }

        Form8949Lines {
            st_proceeds: round_half_up(short_term.proceeds),
            st_basis: round_half_up(short_term.basis),
            st_adjustment: round_half_up(short_term.adjustment),
            st_gain_loss: round_half_up(short_term.gain_loss),
            lt_proceeds: round_half_up(long_term.proceeds),
            lt_basis: round_half_up(long_term.basis),
            lt_adjustment: round_half_up(long_term.adjustment),
            lt_gain_loss: round_half_up(long_term.gain_loss),
            transaction_count: u32::try_from(snapshot.capital_asset_sales.len())
                .unwrap_or(u32::MAX),
        }
    }
}
