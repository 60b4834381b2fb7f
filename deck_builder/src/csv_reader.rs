//! CSV reader for desired-card lists
//!
//! Headers are matched case-insensitively. Only the card name column is
//! required; set, quantity, collector number and Scryfall id are optional.

use log::{debug, info, warn};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::CsvError;
use crate::models::{CardRequest, Rule, ValidationIssue};

const NAME_HEADERS: &[&str] = &["card name", "name", "card"];
const SET_HEADERS: &[&str] = &["set code / set name", "set", "set code", "set name", "edition"];
const QUANTITY_HEADERS: &[&str] = &["quantity", "qty", "count"];
const NUMBER_HEADERS: &[&str] = &["card number", "collector number", "number", "cn"];
const ID_HEADERS: &[&str] = &["scryfall id", "scryfall_id", "id"];

/// Largest quantity accepted for a single row
pub const MAX_QUANTITY: u32 = 1000;

/// A CSV row that could not be turned into a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn to_issue(&self) -> ValidationIssue {
        ValidationIssue::error(
            Rule::MalformedRow,
            None,
            format!("Row {}: {}", self.row, self.message),
        )
    }
}

/// Parsed requests in file order plus the rows that were skipped
#[derive(Debug, Clone, Default)]
pub struct CsvLoad {
    pub requests: Vec<CardRequest>,
    pub row_errors: Vec<RowError>,
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct Columns {
    name: usize,
    set: Option<usize>,
    quantity: Option<usize>,
    number: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, CsvError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias))
        };

        Ok(Self {
            name: find(NAME_HEADERS).ok_or(CsvError::MissingColumn("card name"))?,
            set: find(SET_HEADERS),
            quantity: find(QUANTITY_HEADERS),
            number: find(NUMBER_HEADERS),
            id: find(ID_HEADERS),
        })
    }
}

/// Read card requests from a CSV file
pub fn read_card_requests<P: AsRef<Path>>(path: P) -> Result<CsvLoad, CsvError> {
    let path = path.as_ref();
    info!("Loading card list from CSV file: {}", path.display());

    let file = File::open(path).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_card_requests(file)
}

/// Parse card requests from any reader producing CSV text
pub fn parse_card_requests<R: io::Read>(reader: R) -> Result<CsvLoad, CsvError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvError::Empty);
    }
    let columns = Columns::from_headers(&headers)?;
    debug!("CSV columns: {:?}", columns);

    let mut load = CsvLoad::default();

    for (index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => match e.position() {
                Some(pos) => {
                    let error = RowError {
                        row: pos.line() as usize,
                        message: format!("unreadable row: {}", e),
                    };
                    warn!("Skipping row {}: {}", error.row, error.message);
                    load.row_errors.push(error);
                    continue;
                }
                None => return Err(CsvError::Csv(e)),
            },
        };
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        if record.iter().all(|field| field.is_empty()) {
            debug!("Skipping empty row {}", row);
            continue;
        }

        match parse_row(&record, &columns, row) {
            Ok(request) => load.requests.push(request),
            Err(error) => {
                warn!("Skipping row {}: {}", error.row, error.message);
                load.row_errors.push(error);
            }
        }
    }

    if load.requests.is_empty() {
        return Err(CsvError::Empty);
    }

    info!(
        "Loaded {} card requests ({} rows skipped)",
        load.requests.len(),
        load.row_errors.len()
    );
    Ok(load)
}

fn field(record: &csv::StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &Columns,
    row: usize,
) -> Result<CardRequest, RowError> {
    let name = field(record, Some(columns.name)).ok_or_else(|| RowError {
        row,
        message: "missing card name".to_string(),
    })?;

    let quantity = match field(record, columns.quantity) {
        None => 1,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n > i64::from(MAX_QUANTITY) => {
                return Err(RowError {
                    row,
                    message: format!(
                        "quantity {} for '{}' exceeds the maximum of {}",
                        n, name, MAX_QUANTITY
                    ),
                })
            }
            Ok(n) if n >= 1 => n as u32,
            Ok(n) => {
                warn!("Row {}: quantity {} for '{}' raised to 1", row, n, name);
                1
            }
            Err(_) => {
                return Err(RowError {
                    row,
                    message: format!("invalid quantity '{}' for '{}'", raw, name),
                })
            }
        },
    };

    Ok(CardRequest {
        row: Some(row),
        name,
        set: field(record, columns.set),
        quantity,
        collector_number: field(record, columns.number),
        scryfall_id: field(record, columns.id),
    })
}

#[cfg(test)]
#[path = "csv_reader_tests.rs"]
mod tests;
