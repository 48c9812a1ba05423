//! Tax year 2025 (returns filed in 2026).

use std::collections::BTreeMap;

use rust_decimal_macros::dec;

use crate::models::{
    BracketTable, ChildTaxCreditConfig, FilingStatus, SaltConfig, TaxBracket, TaxYearConfig,
};

use FilingStatus::{MarriedFilingJointly as Mfj, Single};

pub(super) fn config() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2025,
        standard_deduction: BTreeMap::from([(Single, dec!(15750)), (Mfj, dec!(31500))]),
        additional_standard_deduction: BTreeMap::from([(Single, dec!(2000)), (Mfj, dec!(1600))]),
        ordinary_brackets: ordinary_brackets(),
        preferential_brackets: preferential_brackets(),
        salt: SaltConfig {
            cap_base: dec!(40000),
            cap_floor: dec!(10000),
            phase_down_threshold: BTreeMap::from([(Single, dec!(500000)), (Mfj, dec!(500000))]),
            phase_down_rate: dec!(0.30),
        },
        medical_expense_agi_floor: dec!(0.075),
        capital_loss_limit: dec!(3000),
        schedule_b_threshold: dec!(1500),
        social_security_taxable_fraction: dec!(0.85),
        child_tax_credit: ChildTaxCreditConfig {
            amount_per_child: dec!(2200),
            other_dependent_amount: dec!(500),
            refundable_max_per_child: dec!(1700),
            phase_out_threshold: BTreeMap::from([(Single, dec!(200000)), (Mfj, dec!(400000))]),
            phase_out_rate: dec!(0.05),
        },
    }
}

fn ordinary_brackets() -> BracketTable {
    BracketTable::new()
        .with_schedule(
            Single,
            vec![
                TaxBracket::new(dec!(0.10), dec!(11925)),
                TaxBracket::new(dec!(0.12), dec!(48475)),
                TaxBracket::new(dec!(0.22), dec!(103350)),
                TaxBracket::new(dec!(0.24), dec!(197300)),
                TaxBracket::new(dec!(0.32), dec!(250525)),
                TaxBracket::new(dec!(0.35), dec!(626350)),
                TaxBracket::unbounded(dec!(0.37)),
            ],
        )
        .with_schedule(
            Mfj,
            vec![
                TaxBracket::new(dec!(0.10), dec!(23850)),
                TaxBracket::new(dec!(0.12), dec!(96950)),
                TaxBracket::new(dec!(0.22), dec!(206700)),
                TaxBracket::new(dec!(0.24), dec!(394600)),
                TaxBracket::new(dec!(0.32), dec!(501050)),
                TaxBracket::new(dec!(0.35), dec!(751600)),
                TaxBracket::unbounded(dec!(0.37)),
            ],
        )
}

fn preferential_brackets() -> BracketTable {
    BracketTable::new()
        .with_schedule(
            Single,
            vec![
                TaxBracket::new(dec!(0.00), dec!(48350)),
                TaxBracket::new(dec!(0.15), dec!(533400)),
                TaxBracket::unbounded(dec!(0.20)),
            ],
        )
        .with_schedule(
            Mfj,
            vec![
                TaxBracket::new(dec!(0.00), dec!(96700)),
                TaxBracket::new(dec!(0.15), dec!(600050)),
                TaxBracket::unbounded(dec!(0.20)),
            ],
        )
}
