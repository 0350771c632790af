/*!
# CSV Validation & I/O

Reading and writing allocation lists and claim sheets, and the checks an
allocation list must pass before a split is compiled from it.
*/

use crate::{
    errors::{CsvError, CsvResult},
    schemas::{
        AllocationCsvRow, AllocationRows, ClaimCsvRow, IndexedAllocationCsvRow,
        ALLOCATIONS_CSV_HEADERS, CLAIMS_CSV_HEADERS, INDEXED_ALLOCATIONS_CSV_HEADERS,
    },
};
use csv::{Reader, Writer};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

// ================================================================================================
// CSV Reading with Validation
// ================================================================================================

/// Read an allocations CSV file. The layout (v1 or v2) is chosen by its headers.
pub fn read_allocations_csv<P: AsRef<Path>>(path: P) -> CsvResult<AllocationRows> {
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let rows = if headers.first().map(String::as_str) == Some("index") {
        validate_headers(
            headers.iter().map(String::as_str),
            INDEXED_ALLOCATIONS_CSV_HEADERS,
            "allocations.csv",
        )?;
        AllocationRows::V2(deserialize_rows::<IndexedAllocationCsvRow, _>(&mut rdr)?)
    } else {
        validate_headers(
            headers.iter().map(String::as_str),
            ALLOCATIONS_CSV_HEADERS,
            "allocations.csv",
        )?;
        AllocationRows::V1(deserialize_rows::<AllocationCsvRow, _>(&mut rdr)?)
    };

    if rows.is_empty() {
        return Err(CsvError::SchemaValidation(
            "Allocations CSV file is empty".to_string(),
        ));
    }

    Ok(rows)
}

/// Read and validate a claims CSV file
pub fn read_claims_csv<P: AsRef<Path>>(path: P) -> CsvResult<Vec<ClaimCsvRow>> {
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);

    let headers = rdr.headers()?;
    validate_headers(headers.iter(), CLAIMS_CSV_HEADERS, "claims.csv")?;

    let rows: Vec<ClaimCsvRow> = deserialize_rows(&mut rdr)?;
    if rows.is_empty() {
        return Err(CsvError::SchemaValidation(
            "Claims CSV file is empty".to_string(),
        ));
    }

    Ok(rows)
}

fn deserialize_rows<T, R>(rdr: &mut Reader<R>) -> CsvResult<Vec<T>>
where
    T: DeserializeOwned,
    R: std::io::Read,
{
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: T = result?;
        rows.push(row);
    }
    Ok(rows)
}

// ================================================================================================
// CSV Writing
// ================================================================================================

/// Write an allocations CSV (csv crate writes the headers from the row type)
pub fn write_allocations_csv<P: AsRef<Path>>(path: P, rows: &AllocationRows) -> CsvResult<()> {
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    match rows {
        AllocationRows::V1(rows) => {
            for row in rows {
                wtr.serialize(row)?;
            }
        }
        AllocationRows::V2(rows) => {
            for row in rows {
                wtr.serialize(row)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write a claims CSV
pub fn write_claims_csv<P: AsRef<Path>>(path: P, rows: &[ClaimCsvRow]) -> CsvResult<()> {
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

// ================================================================================================
// Allocation Validation
// ================================================================================================

/// Validate an allocation list against a scale
///
/// Ensures:
/// - Every allocation is positive
/// - Accounts (v1) or indexes (v2) are unique
/// - Allocations sum to exactly `scale`
pub fn validate_allocation_rows(rows: &AllocationRows, scale: u64) -> CsvResult<()> {
    if rows.is_empty() {
        return Err(CsvError::DataInconsistency(
            "allocation list is empty".to_string(),
        ));
    }

    match rows {
        AllocationRows::V1(rows) => {
            let mut seen = HashSet::new();
            for row in rows {
                if !seen.insert(row.account) {
                    return Err(CsvError::DataInconsistency(format!(
                        "Account {} appears more than once",
                        row.account
                    )));
                }
            }
        }
        AllocationRows::V2(rows) => {
            let mut seen = HashSet::new();
            for row in rows {
                if !seen.insert(row.index) {
                    return Err(CsvError::DataInconsistency(format!(
                        "Index {} appears more than once",
                        row.index
                    )));
                }
            }
        }
    }

    if let Some((_, account, _)) = rows.entries().iter().find(|(_, _, allocation)| *allocation == 0) {
        return Err(CsvError::DataInconsistency(format!(
            "Account {} has a zero allocation",
            account
        )));
    }

    let total = rows.total_allocation();
    if total != u128::from(scale) {
        return Err(CsvError::DataInconsistency(format!(
            "Allocations sum to {}, expected {}",
            total, scale
        )));
    }

    Ok(())
}

// ================================================================================================
// Header Validation
// ================================================================================================

fn validate_headers<'a, I>(actual: I, expected: &[&str], file_type: &str) -> CsvResult<()>
where
    I: Iterator<Item = &'a str>,
{
    let actual_headers: Vec<&str> = actual.collect();

    if actual_headers.len() != expected.len() {
        return Err(CsvError::SchemaValidation(format!(
            "{}: expected {} headers, found {}",
            file_type,
            expected.len(),
            actual_headers.len()
        )));
    }

    for (i, (actual, expected)) in actual_headers.iter().zip(expected.iter()).enumerate() {
        if actual != expected {
            return Err(CsvError::SchemaValidation(format!(
                "{}: header {} should be '{}', found '{}'",
                file_type,
                i + 1,
                expected,
                actual
            )));
        }
    }

    Ok(())
}

// ================================================================================================
// Tests
// ================================================================================================
