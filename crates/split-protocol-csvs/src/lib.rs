/*!
# Split Protocol CSV Schema Definitions

This crate provides the **authoritative CSV schemas** used throughout Split Protocol.

## Purpose

It is the single source of truth for the CSV contracts between:

- **`compile-split`** (consumer) → reads allocation lists, writes claim sheets
- **`verify-claim`** / **`check-eligibility`** (consumers) → read claim sheets
- **`simulate`** (consumer) → reads allocation lists named by a split config

## Schema Files

### Allocations CSV (`allocations.csv`)
One row per recipient. Two layouts, matching the two leaf schemes:
- scheme v1: `account,allocation`
- scheme v2: `index,account,allocation`

`account` is a base58 public key; `allocation` is the recipient's share in units
of the split's scale (parts-per-million by default).

### Claims CSV (`claims.csv`)
One row per leaf with its proof:
- `index`: leaf index (empty for scheme v1)
- `account`, `allocation`
- `proof`: hex sibling digests joined by `:`

## Usage

```rust,no_run
use split_protocol_csvs::{read_allocations_csv, validate_allocation_rows, CsvResult};

fn example() -> CsvResult<()> {
    let rows = read_allocations_csv("allocations.csv")?;
    validate_allocation_rows(&rows, 1_000_000)?;
    Ok(())
}
```
*/

pub mod errors;
pub mod schemas;
pub mod validation;

// Re-export main types for convenience
pub use errors::{CsvError, CsvResult};
pub use schemas::{
    AllocationCsvRow, AllocationRows, ClaimCsvRow, IndexedAllocationCsvRow,
    ALLOCATIONS_CSV_HEADERS, CLAIMS_CSV_HEADERS, CURRENT_SCHEMA_VERSION,
    INDEXED_ALLOCATIONS_CSV_HEADERS,
};
pub use validation::{
    read_allocations_csv, read_claims_csv, validate_allocation_rows, write_allocations_csv,
    write_claims_csv,
};
