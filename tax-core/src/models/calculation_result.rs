use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FilingStatus;
use crate::forms::{FormId, FormLines};

/// Which deduction Form 1040 line 12 carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMethod {
    #[default]
    Standard,
    Itemized,
}

impl DeductionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Itemized => "itemized",
        }
    }
}

impl fmt::Display for DeductionMethod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one engine run.
///
/// Exactly one of `refund_amount` and `amount_owed` is positive, or both are
/// zero when payments equal tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationResult {
    pub tax_year: i32,
    pub filing_status: FilingStatus,

    pub total_income: Decimal,
    pub agi: Decimal,
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
    pub total_credits: Decimal,
    pub total_payments: Decimal,
    pub refund_amount: Decimal,
    pub amount_owed: Decimal,
    pub effective_tax_rate: Decimal,
    pub marginal_tax_rate: Decimal,

    pub standard_deduction_amount: Decimal,
    pub itemized_deduction_amount: Decimal,
    pub deduction_method: DeductionMethod,

    /// Every computed form keyed by id. The Form 1040 income phase is folded
    /// into `form_1040` and not listed on its own.
    pub form_results: BTreeMap<FormId, FormLines>,
    /// Forms the taxpayer must file, in filing order.
    pub required_forms: Vec<FormId>,

    // Reserved for input validation; the engine itself never fills these.
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CalculationResult {
    pub fn is_refund(&self) -> bool {
        self.refund_amount > Decimal::ZERO
    }

    pub fn form(
        &self,
        id: FormId,
    ) -> Option<&FormLines> {
        self.form_results.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deduction_method_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(DeductionMethod::Itemized).unwrap(),
            serde_json::json!("itemized")
        );
        assert_eq!(DeductionMethod::default().to_string(), "standard");
    }
}
