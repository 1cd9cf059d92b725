use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

use crate::dates;

const COL_ASSET: &str = "Asset name";
const COL_PROCEEDS: &str = "Proceeds (USD)";
const COL_COST_BASIS: &str = "Cost basis (USD)";
const COL_ACQUIRED: &str = "Date Acquired";
const COL_DISPOSED: &str = "Date of Disposition";

/// Columns every input file must provide, by exact header name.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_ASSET,
    COL_PROCEEDS,
    COL_COST_BASIS,
    COL_ACQUIRED,
    COL_DISPOSED,
];

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("missing expected column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: invalid amount in '{column}': '{value}'")]
    InvalidAmount {
        row: u64,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: invalid date in '{column}': '{value}'")]
    InvalidDate {
        row: u64,
        column: &'static str,
        value: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// CSV row as exported, before validation. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    #[serde(rename = "Asset name")]
    asset: String,
    #[serde(rename = "Proceeds (USD)")]
    proceeds: String,
    #[serde(rename = "Cost basis (USD)")]
    cost_basis: String,
    #[serde(rename = "Date Acquired")]
    acquired: String,
    #[serde(rename = "Date of Disposition")]
    disposed: String,
}

/// A validated disposal: one sale of one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisposalRecord {
    pub asset: String,
    pub proceeds: Decimal,
    pub cost_basis: Decimal,
    pub acquired: NaiveDate,
    pub disposed: NaiveDate,
}

/// Read disposal records from CSV, validating every field.
///
/// The header is checked up front so a missing column is reported by name
/// rather than as a deserialization failure on the first row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<DisposalRecord>, RecordError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    check_header(&headers)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        // True 1-based file line; blank interior lines still advance it.
        let row = record.position().map_or(0, |p| p.line());
        let raw: RawRecord = record.deserialize(Some(&headers))?;
        records.push(raw.validate(row)?);
    }
    Ok(records)
}

fn check_header(headers: &csv::StringRecord) -> Result<(), RecordError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(RecordError::MissingColumn(column));
        }
    }
    Ok(())
}

impl RawRecord {
    fn validate(self, row: u64) -> Result<DisposalRecord, RecordError> {
        let proceeds = parse_amount(&self.proceeds, row, COL_PROCEEDS)?;
        let cost_basis = parse_amount(&self.cost_basis, row, COL_COST_BASIS)?;
        let acquired = parse_date(&self.acquired, row, COL_ACQUIRED)?;
        let disposed = parse_date(&self.disposed, row, COL_DISPOSED)?;

        Ok(DisposalRecord {
            asset: self.asset,
            proceeds,
            cost_basis,
            acquired,
            disposed,
        })
    }
}

fn parse_amount(value: &str, row: u64, column: &'static str) -> Result<Decimal, RecordError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| RecordError::InvalidAmount {
            row,
            column,
            value: value.to_string(),
        })
}

fn parse_date(value: &str, row: u64, column: &'static str) -> Result<NaiveDate, RecordError> {
    dates::parse_date(value).ok_or_else(|| RecordError::InvalidDate {
        row,
        column,
        value: value.to_string(),
    })
}
