use serde::{Deserialize, Serialize};

use super::{
    CapitalAssetSale, Dependent, Dividend1099, FilingStatus, Government1099G, Interest1099,
    ItemizedDeduction, Retirement1099R, Ssa1099, W2Income,
};

/// Tax year assumed when a snapshot does not state one.
pub const DEFAULT_TAX_YEAR: i32 = 2025;

fn default_tax_year() -> i32 {
    DEFAULT_TAX_YEAR
}

/// Every input the engine needs for one return, fully materialized.
///
/// The engine only ever borrows a snapshot immutably; values derived during a
/// calculation (AGI in particular) travel in the
/// [`CalculationContext`](crate::forms::CalculationContext) instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnSnapshot {
    #[serde(default = "default_tax_year")]
    pub tax_year: i32,
    #[serde(default)]
    pub filing_status: FilingStatus,
    #[serde(default)]
    pub w2_incomes: Vec<W2Income>,
    #[serde(default)]
    pub interest_1099s: Vec<Interest1099>,
    #[serde(default)]
    pub dividend_1099s: Vec<Dividend1099>,
    #[serde(default)]
    pub retirement_1099rs: Vec<Retirement1099R>,
    #[serde(default)]
    pub government_1099gs: Vec<Government1099G>,
    #[serde(default)]
    pub ssa_1099s: Vec<Ssa1099>,
    #[serde(default)]
    pub capital_asset_sales: Vec<CapitalAssetSale>,
    #[serde(default)]
    pub itemized_deduction: Option<ItemizedDeduction>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

impl Default for ReturnSnapshot {
    fn default() -> Self {
        Self {
            tax_year: DEFAULT_TAX_YEAR,
            filing_status: FilingStatus::default(),
            w2_incomes: Vec::new(),
            interest_1099s: Vec::new(),
            dividend_1099s: Vec::new(),
            retirement_1099rs: Vec::new(),
            government_1099gs: Vec::new(),
            ssa_1099s: Vec::new(),
            capital_asset_sales: Vec::new(),
            itemized_deduction: None,
            dependents: Vec::new(),
        }
    }
}

impl ReturnSnapshot {
    /// An empty return for the default tax year.
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            ..Self::default()
        }
    }

    pub fn with_w2(
        mut self,
        w2: W2Income,
    ) -> Self {
        self.w2_incomes.push(w2);
        self
    }

    pub fn with_interest(
        mut self,
        record: Interest1099,
    ) -> Self {
        self.interest_1099s.push(record);
        self
    }

    pub fn with_dividend(
        mut self,
        record: Dividend1099,
    ) -> Self {
        self.dividend_1099s.push(record);
        self
    }

    pub fn with_sale(
        mut self,
        sale: CapitalAssetSale,
    ) -> Self {
        self.capital_asset_sales.push(sale);
        self
    }

    pub fn with_itemized(
        mut self,
        itemized: ItemizedDeduction,
    ) -> Self {
        self.itemized_deduction = Some(itemized);
        self
    }
}
