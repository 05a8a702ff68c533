//! sql-utils library
//!
//! Converts comma-delimited text files into SQL INSERT statements.
//!
//! The pipeline is a single pass: the line reader (the
//! `sql-utils-csv-line` crate) produces one row per source line, the
//! column and order resolvers fix the INSERT column list and field
//! permutation up front, and the emitter streams escaped value tuples to
//! the output file, optionally starting a new statement every N rows.
//!
//! # CLI Usage
//!
//! ```bash
//! # Convert a CSV with a header row
//! sql-utils csv-to-inserts --path data.csv --table-name people
//!
//! # Explicit columns, reordered, 1000 rows per statement
//! sql-utils cti -p data.csv -t people \
//!   -H false -u false -c "name,age" -s "1,0" -r 1000
//! ```

pub mod columns;
pub mod convert;
pub mod escape;
