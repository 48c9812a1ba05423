use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw Schedule A inputs. Its presence on a return is what allows the
/// itemized deduction to be chosen at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemizedDeduction {
    // Medical and dental
    pub medical_expenses: Decimal,

    // State and local taxes
    pub state_income_tax_paid: Decimal,
    pub real_estate_tax_paid: Decimal,
    pub personal_property_tax: Decimal,

    // Interest
    pub mortgage_interest_1098: Decimal,
    pub mortgage_interest_not_1098: Decimal,
    pub mortgage_points: Decimal,
    pub investment_interest: Decimal,

    // Gifts to charity
    pub cash_charitable: Decimal,
    pub noncash_charitable: Decimal,
    pub carryover_charitable: Decimal,

    pub casualty_loss: Decimal,
    pub other_deductions: Decimal,
    pub other_deductions_description: Option<String>,
}
