//! Worksheets that sit beside the forms rather than on them.

pub mod qualified_dividends;

pub use qualified_dividends::{QualifiedDividendsWorksheet, QualifiedDividendsWorksheetResult};
