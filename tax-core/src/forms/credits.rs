//! Line records for the credit forms Form 1040 reads when present.
//!
//! The engine registers no calculator for either form, so on a standard run
//! both are absent and Form 1040 treats every credit as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Schedule 8812, Credits for Qualifying Children and Other Dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule8812Lines {
    /// Feeds Form 1040 line 19.
    pub nonrefundable_ctc: Decimal,
    /// Additional child tax credit; feeds Form 1040 line 28.
    pub refundable_ctc: Decimal,
}

/// Schedule 3, Additional Credits and Payments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule3Lines {
    /// Total nonrefundable credits.
    #[serde(rename = "line_8")]
    pub nonrefundable_credits: Decimal,
    /// Refundable American opportunity credit; feeds Form 1040 line 29.
    pub refundable_aotc: Decimal,
}
