mod calculation_result;
mod deductions;
mod dependent;
mod filing_status;
mod income;
mod return_snapshot;
mod tax_bracket;
mod tax_year_config;

pub use calculation_result::{CalculationResult, DeductionMethod};
pub use deductions::ItemizedDeduction;
pub use dependent::Dependent;
pub use filing_status::FilingStatus;
pub use income::{
    CapitalAssetSale, Dividend1099, Government1099G, HoldingPeriod, Interest1099,
    Retirement1099R, Ssa1099, W2Income,
};
pub use return_snapshot::{DEFAULT_TAX_YEAR, ReturnSnapshot};
pub use tax_bracket::{BracketTable, TaxBracket};
pub use tax_year_config::{ChildTaxCreditConfig, SaltConfig, TaxYearConfig};
