use std::io::Read;

use tax_core::ReturnSnapshot;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a return snapshot.
#[derive(Debug, Error)]
pub enum ReturnLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ReturnLoadError {
    fn from(err: serde_json::Error) -> Self {
        ReturnLoadError::JsonParse(err.to_string())
    }
}

/// Loader for return snapshots stored as JSON.
///
/// Field names match the record types in `tax_core`. Every list may be
/// omitted, as may any monetary field (treated as zero) and the tax year
/// (treated as the current default year).
pub struct ReturnLoader;

impl ReturnLoader {
    /// Parse a snapshot from any reader, such as a file or a byte slice.
    pub fn from_json<R: Read>(reader: R) -> Result<ReturnSnapshot, ReturnLoadError> {
        let snapshot: ReturnSnapshot = serde_json::from_reader(reader)?;

        debug!(
            tax_year = snapshot.tax_year,
            filing_status = %snapshot.filing_status,
            w2s = snapshot.w2_incomes.len(),
            sales = snapshot.capital_asset_sales.len(),
            itemized = snapshot.itemized_deduction.is_some(),
            "Loaded return snapshot"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{FilingStatus, HoldingPeriod};

    use super::*;

    const SAMPLE_RETURN: &str = include_str!("../test-data/sample_return.json");

    #[test]
    fn test_load_sample_return() {
        let snapshot = ReturnLoader::from_json(SAMPLE_RETURN.as_bytes()).unwrap();

        assert_eq!(snapshot.tax_year, 2025);
        assert_eq!(snapshot.filing_status, FilingStatus::Single);
        assert_eq!(snapshot.w2_incomes.len(), 1);
        assert_eq!(snapshot.w2_incomes[0].box_1_wages, dec!(60000));
        assert_eq!(snapshot.dividend_1099s[0].box_1b_qualified_dividends, dec!(2500));
        assert_eq!(snapshot.capital_asset_sales.len(), 2);
        assert_eq!(
            snapshot.capital_asset_sales[0].holding_period,
            HoldingPeriod::LongTerm
        );
        assert!(snapshot.itemized_deduction.is_none());
    }

    #[test]
    fn test_minimal_return_uses_defaults() {
        let snapshot = ReturnLoader::from_json(r#"{"filing_status": "married_filing_jointly"}"#.as_bytes())
            .unwrap();

        assert_eq!(snapshot.tax_year, 2025);
        assert_eq!(snapshot.filing_status, FilingStatus::MarriedFilingJointly);
        assert!(snapshot.w2_incomes.is_empty());
        assert!(snapshot.dependents.is_empty());
    }

    #[test]
    fn test_numbers_and_strings_both_accepted_for_amounts() {
        let json = r#"{
            "w2_incomes": [
                {"box_1_wages": 1000.50, "box_2_fed_tax_withheld": "120.25"}
            ]
        }"#;

        let snapshot = ReturnLoader::from_json(json.as_bytes()).unwrap();

        assert_eq!(snapshot.w2_incomes[0].box_1_wages, dec!(1000.50));
        assert_eq!(snapshot.w2_incomes[0].box_2_fed_tax_withheld, dec!(120.25));
    }

    #[test]
    fn test_unknown_filing_status_rejected() {
        let result = ReturnLoader::from_json(r#"{"filing_status": "head_of_household"}"#.as_bytes());

        assert!(matches!(result, Err(ReturnLoadError::JsonParse(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = ReturnLoader::from_json("{".as_bytes());

        assert!(matches!(result, Err(ReturnLoadError::JsonParse(_))));
    }
}
