//! Tax arithmetic shared by the form calculators: rounding, progressive
//! rate schedules and the preferential-rate worksheet.

pub mod brackets;
pub mod common;
pub mod worksheets;

pub use worksheets::{QualifiedDividendsWorksheet, QualifiedDividendsWorksheetResult};
