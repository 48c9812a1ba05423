use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{FilingStatus, ParameterError, TaxBracket, TaxYearConfig};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum BracketLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Bracket file contains no records")]
    Empty,

    #[error("Bracket record for tax year {found} cannot override tax year {expected}")]
    TaxYearMismatch { expected: i32, found: i32 },

    #[error("Invalid bracket table: {0}")]
    InvalidTable(#[from] ParameterError),
}

impl From<csv::Error> for BracketLoadError {
    fn from(err: csv::Error) -> Self {
        BracketLoadError::CsvParse(err.to_string())
    }
}

/// Which rate schedule a bracket record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketTableKind {
    Ordinary,
    Preferential,
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2025)
/// - `table`: `ordinary` or `preferential` (qualified dividends / long-term gains)
/// - `filing_status`: `single` or `married_filing_jointly`
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
/// - `upper_limit`: The top of the bracket (empty for unlimited)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub table: BracketTableKind,
    pub filing_status: FilingStatus,
    pub rate: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
}

impl BracketRecord {
    fn bracket(&self) -> TaxBracket {
        TaxBracket {
            rate: self.rate,
            upper_limit: self.upper_limit,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket table overrides from CSV files.
///
/// Only the schedules present in the file are replaced; every other
/// schedule keeps its built-in brackets.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoadError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a copy of `config` with the loaded schedules swapped in.
    ///
    /// Records are grouped by (table, filing status). Within a group the
    /// brackets are ordered by upper limit, so the file need not be sorted.
    /// The resulting configuration is validated before it is returned.
    pub fn apply(
        config: &TaxYearConfig,
        records: &[BracketRecord],
    ) -> Result<TaxYearConfig, BracketLoadError> {
        if records.is_empty() {
            return Err(BracketLoadError::Empty);
        }

        let mut groups: BTreeMap<(BracketTableKind, FilingStatus), Vec<TaxBracket>> =
            BTreeMap::new();

        for record in records {
            if record.tax_year != config.tax_year {
                return Err(BracketLoadError::TaxYearMismatch {
                    expected: config.tax_year,
                    found: record.tax_year,
                });
            }
            groups
                .entry((record.table, record.filing_status))
                .or_default()
                .push(record.bracket());
        }

        let mut ordinary = config.ordinary_brackets.clone();
        let mut preferential = config.preferential_brackets.clone();

        for ((table, status), mut brackets) in groups {
            brackets.sort_by_key(TaxBracket::ceiling);
            debug!(?table, %status, count = brackets.len(), "Replacing rate schedule");
            match table {
                BracketTableKind::Ordinary => ordinary.insert(status, brackets),
                BracketTableKind::Preferential => preferential.insert(status, brackets),
            }
        }

        let updated = config.with_brackets(ordinary, preferential);
        updated.validate()?;

        info!(
            tax_year = config.tax_year,
            records = records.len(),
            "Applied bracket overrides"
        );

        Ok(updated)
    }
}
