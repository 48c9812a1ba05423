use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// One tier of a progressive rate schedule.
///
/// `upper_limit` is the cumulative upper bound of the tier; `None` marks the
/// top, unbounded tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub rate: Decimal,
    pub upper_limit: Option<Decimal>,
}

impl TaxBracket {
    pub fn new(
        rate: Decimal,
        upper_limit: Decimal,
    ) -> Self {
        Self {
            rate,
            upper_limit: Some(upper_limit),
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            rate,
            upper_limit: None,
        }
    }

    /// Upper bound with the unbounded tier mapped to `Decimal::MAX`.
    pub fn ceiling(&self) -> Decimal {
        self.upper_limit.unwrap_or(Decimal::MAX)
    }
}

/// Ordered bracket lists keyed by filing status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    schedules: BTreeMap<FilingStatus, Vec<TaxBracket>>,
}

impl BracketTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(
        mut self,
        status: FilingStatus,
        brackets: Vec<TaxBracket>,
    ) -> Self {
        self.schedules.insert(status, brackets);
        self
    }

    pub fn insert(
        &mut self,
        status: FilingStatus,
        brackets: Vec<TaxBracket>,
    ) {
        self.schedules.insert(status, brackets);
    }

    /// Brackets for `status`; empty when the table has no schedule for it.
    pub fn for_status(
        &self,
        status: FilingStatus,
    ) -> &[TaxBracket] {
        self.schedules
            .get(&status)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilingStatus, &Vec<TaxBracket>)> {
        self.schedules.iter()
    }
}
