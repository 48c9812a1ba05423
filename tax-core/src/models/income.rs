//! Income source records, one struct per information return.
//!
//! Box numbers follow the IRS forms the records are transcribed from. Every
//! amount defaults to zero when absent from the input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Form W-2, Wage and Tax Statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct W2Income {
    pub employer_name: Option<String>,
    pub employer_ein: Option<String>,
    pub box_1_wages: Decimal,
    pub box_2_fed_tax_withheld: Decimal,
    pub box_3_ss_wages: Decimal,
    pub box_4_ss_tax: Decimal,
    pub box_5_medicare_wages: Decimal,
    pub box_6_medicare_tax: Decimal,
    pub state: Option<String>,
    pub state_wages: Decimal,
    pub state_tax_withheld: Decimal,
}

impl W2Income {
    pub fn new(
        wages: Decimal,
        fed_tax_withheld: Decimal,
    ) -> Self {
        Self {
            box_1_wages: wages,
            box_2_fed_tax_withheld: fed_tax_withheld,
            ..Self::default()
        }
    }
}

/// Form 1099-INT, Interest Income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interest1099 {
    pub payer_name: Option<String>,
    pub box_1_interest: Decimal,
    pub box_2_early_withdrawal_penalty: Decimal,
    pub box_3_us_savings_bond: Decimal,
    pub box_4_fed_tax_withheld: Decimal,
    pub box_8_tax_exempt_interest: Decimal,
}

/// Form 1099-DIV, Dividends and Distributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dividend1099 {
    pub payer_name: Option<String>,
    pub box_1a_ordinary_dividends: Decimal,
    pub box_1b_qualified_dividends: Decimal,
    pub box_2a_total_capital_gain: Decimal,
    pub box_4_fed_tax_withheld: Decimal,
    pub box_7_foreign_tax_paid: Decimal,
}

/// Form 1099-R, retirement plan and IRA distributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Retirement1099R {
    pub payer_name: Option<String>,
    pub box_1_gross_distribution: Decimal,
    pub box_2a_taxable_amount: Decimal,
    pub box_4_fed_tax_withheld: Decimal,
    pub box_7_distribution_code: Option<String>,
}

/// Form 1099-G, Certain Government Payments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Government1099G {
    pub payer_name: Option<String>,
    pub box_1_unemployment: Decimal,
    pub box_2_state_tax_refund: Decimal,
    pub box_4_fed_tax_withheld: Decimal,
}

/// Form SSA-1099, Social Security Benefit Statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ssa1099 {
    pub box_3_benefits_paid: Decimal,
    pub box_4_benefits_repaid: Decimal,
    pub box_5_net_benefits: Decimal,
    pub box_6_voluntary_withholding: Decimal,
}

/// Short-term means held one year or less.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingPeriod {
    #[default]
    ShortTerm,
    LongTerm,
}

/// A single disposition of a capital asset (one Form 8949 row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalAssetSale {
    pub description: Option<String>,
    pub date_acquired: Option<NaiveDate>,
    pub date_sold: Option<NaiveDate>,
    pub proceeds: Decimal,
    pub cost_basis: Decimal,
    pub adjustment_code: Option<String>,
    pub adjustment_amount: Decimal,
    pub holding_period: HoldingPeriod,
    pub basis_reported_to_irs: bool,
    pub brokerage_name: Option<String>,
}

impl Default for CapitalAssetSale {
    fn default() -> Self {
        Self {
            description: None,
            date_acquired: None,
            date_sold: None,
            proceeds: Decimal::ZERO,
            cost_basis: Decimal::ZERO,
            adjustment_code: None,
            adjustment_amount: Decimal::ZERO,
            holding_period: HoldingPeriod::ShortTerm,
            basis_reported_to_irs: true,
            brokerage_name: None,
        }
    }
}

impl CapitalAssetSale {
    pub fn new(
        proceeds: Decimal,
        cost_basis: Decimal,
        holding_period: HoldingPeriod,
    ) -> Self {
        Self {
            proceeds,
            cost_basis,
            holding_period,
            ..Self::default()
        }
    }

    /// Proceeds minus basis plus adjustment.
    pub fn gain_loss(&self) -> Decimal {
        self.proceeds - self.cost_basis + self.adjustment_amount
    }
}
