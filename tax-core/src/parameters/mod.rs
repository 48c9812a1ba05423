//! Built-in, per-tax-year parameter tables.
//!
//! Tables are constructed once on first use and shared read-only for the
//! life of the process. Callers that need different brackets build their
//! own [`TaxYearConfig`] via [`TaxYearConfig::with_brackets`].

mod y2025;

use std::sync::LazyLock;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{FilingStatus, TaxYearConfig};

/// Errors raised while looking up or validating tax year parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    /// No built-in table exists for the requested year.
    #[error("no parameters available for tax year {0}")]
    UnsupportedTaxYear(i32),

    #[error("no standard deduction configured for filing status {0}")]
    MissingStandardDeduction(FilingStatus),

    #[error("{table} rate schedule for {status} is empty")]
    EmptySchedule {
        table: &'static str,
        status: FilingStatus,
    },

    #[error("{table} rate schedule for {status} must end with an unbounded bracket")]
    BoundedTopBracket {
        table: &'static str,
        status: FilingStatus,
    },

    #[error("{table} rate schedule for {status} has an unbounded bracket before the last one")]
    UnboundedInnerBracket {
        table: &'static str,
        status: FilingStatus,
    },

    #[error("{table} rate schedule for {status} has non-ascending upper limit {limit}")]
    BoundsNotAscending {
        table: &'static str,
        status: FilingStatus,
        limit: Decimal,
    },

    #[error("{table} rate schedule for {status} has rate {rate} outside [0, 1]")]
    InvalidRate {
        table: &'static str,
        status: FilingStatus,
        rate: Decimal,
    },
}

static TAX_YEAR_2025: LazyLock<TaxYearConfig> = LazyLock::new(y2025::config);

/// Tax years with a built-in table.
pub const SUPPORTED_TAX_YEARS: &[i32] = &[2025];

impl TaxYearConfig {
    /// Returns the built-in parameters for `tax_year`.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::UnsupportedTaxYear`] for any year without a
    /// built-in table.
    pub fn for_year(tax_year: i32) -> Result<&'static TaxYearConfig, ParameterError> {
        match tax_year {
            2025 => Ok(&TAX_YEAR_2025),
            other => Err(ParameterError::UnsupportedTaxYear(other)),
        }
    }
}
