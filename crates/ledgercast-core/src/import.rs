//! History import from CSV and JSON exports
//!
//! CSV layout: a header row with `month_key,total_in,total_out` (camelCase
//! `monthKey,totalIn,totalOut` also accepted, in any column order). Every
//! other column is an account id; an empty cell means the account had no
//! booking that month.
//!
//! JSON layout: an array of `MonthlyAggregate` objects.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{History, MonthKey, MonthlyAggregate};

/// Supported history file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFormat {
    Csv,
    Json,
}

impl HistoryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        ext.parse()
    }
}

impl FromStr for HistoryFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(Error::Import(format!(
                "Unsupported history format: '{}' (valid: csv, json)",
                s
            ))),
        }
    }
}

/// Load a history file, picking the parser from the extension
pub fn load_history(path: &Path) -> Result<History> {
    let format = HistoryFormat::from_path(path)?;
    let file = File::open(path)?;
    let history = parse_history(BufReader::new(file), format)?;
    debug!(
        path = %path.display(),
        format = format.as_str(),
        months = history.len(),
        "Loaded history"
    );
    Ok(history)
}

/// Parse history from a reader in the given format
pub fn parse_history<R: Read>(reader: R, format: HistoryFormat) -> Result<History> {
    match format {
        HistoryFormat::Csv => parse_csv(reader),
        HistoryFormat::Json => parse_json(reader),
    }
}

/// Parse a JSON array of monthly aggregates
pub fn parse_json<R: Read>(reader: R) -> Result<History> {
    let months: Vec<MonthlyAggregate> = serde_json::from_reader(reader)?;
    History::new(months)
}

/// Column positions resolved from the header row
struct Columns {
    month_key: usize,
    total_in: usize,
    total_out: usize,
    accounts: Vec<(usize, String)>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut month_key = None;
        let mut total_in = None;
        let mut total_out = None;
        let mut accounts = Vec::new();

        for (i, header) in headers.iter().enumerate() {
            let name = header.trim();
            match normalize_header(name).as_str() {
                "monthkey" => month_key = Some(i),
                "totalin" => total_in = Some(i),
                "totalout" => total_out = Some(i),
                _ if name.is_empty() => {
                    return Err(Error::Import(format!("Empty header in column {}", i + 1)))
                }
                _ => accounts.push((i, name.to_string())),
            }
        }

        let require = |col: Option<usize>, name: &str| {
            col.ok_or_else(|| Error::Import(format!("Missing required column: {}", name)))
        };

        Ok(Self {
            month_key: require(month_key, "month_key")?,
            total_in: require(total_in, "total_in")?,
            total_out: require(total_out, "total_out")?,
            accounts,
        })
    }
}

/// Lowercase and drop separators so `month_key`, `monthKey` and `Month Key` match
fn normalize_header(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Parse CSV monthly aggregates
pub fn parse_csv<R: Read>(reader: R) -> Result<History> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::from_headers(&headers)?;
    let mut months = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;

        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let cell = |col: usize, name: &str| {
            record
                .get(col)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::Import(format!("Line {}: missing {}", line, name)))
        };

        let month_key = parse_month(cell(columns.month_key, "month_key")?)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        let total_in = parse_amount(cell(columns.total_in, "total_in")?)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        let total_out = parse_amount(cell(columns.total_out, "total_out")?)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        let mut by_account = BTreeMap::new();
        for (col, account) in &columns.accounts {
            if let Some(raw) = record.get(*col).filter(|s| !s.is_empty()) {
                let amount = parse_amount(raw)
                    .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
                by_account.insert(account.clone(), amount);
            }
        }

        months.push(MonthlyAggregate {
            month_key,
            total_in,
            total_out,
            by_account,
        });
    }

    History::new(months)
}

/// Parse a month cell: `MMYYYY`, or `YYYY-MM` as written by spreadsheet exports
fn parse_month(s: &str) -> Result<MonthKey> {
    if let Ok(key) = s.parse::<MonthKey>() {
        return Ok(key);
    }

    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| Error::Import(format!("Unable to parse month: {}", s)))
        .and_then(MonthKey::from_date)
}

/// Parse an amount, tolerating thousands separators and accounting negatives
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
