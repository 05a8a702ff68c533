//! Column and field-order resolution
//!
//! Columns come either from the file's header row or from an explicit
//! `--columns` list; the order is an optional index permutation applied to
//! the column names once and to every row thereafter. Both are resolved
//! before any output is written, so every error here aborts the run with
//! the output path untouched.

use anyhow::{bail, Context, Result};
use sql_utils_csv_line::CsvLineReader;
use tokio::io::AsyncRead;

/// Resolve the output column names.
///
/// When the header is present but not used for column names, the header
/// line is still consumed so it is not emitted as a data row.
pub async fn determine_columns<R: AsyncRead + Unpin>(
    reader: &mut CsvLineReader<R>,
    use_headers_as_cols: bool,
    has_header: bool,
    columns: Option<&str>,
) -> Result<Vec<String>> {
    if use_headers_as_cols && !has_header {
        bail!("--use-headers-as-cols requires --has-header to be set");
    }

    if has_header && use_headers_as_cols {
        let header = reader.read_header().await?;
        if header.is_empty() {
            bail!("file has no header line, but --has-header is set");
        }
        return Ok(header);
    }

    // Discard the header line; a no-op when the reader has no header.
    reader.read_header().await?;

    let Some(columns) = columns.filter(|columns| !columns.is_empty()) else {
        bail!("--use-headers-as-cols is false but --columns is empty");
    };

    let parts: Vec<String> = columns
        .split(',')
        .map(|part| part.trim().to_string())
        .collect();
    if parts.is_empty() {
        bail!("--columns does not name any columns");
    }

    Ok(parts)
}

/// Resolve the field-order permutation.
///
/// An absent or empty `--splits` yields the identity permutation.
/// Duplicate indexes are allowed and simply repeat a column; anything
/// unparseable or outside `[0, column_count)` is a configuration error.
pub fn determine_order(splits: Option<&str>, column_count: usize) -> Result<Vec<usize>> {
    let Some(splits) = splits.filter(|splits| !splits.is_empty()) else {
        return Ok((0..column_count).collect());
    };

    splits
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            let index = entry
                .parse::<usize>()
                .ok()
                .filter(|index| *index < column_count)
                .with_context(|| format!("`{entry}` is not a valid column index"))?;
            Ok(index)
        })
        .collect()
}

/// Apply the permutation to a sequence of fields.
///
/// Rows shorter than a requested index are reported as errors rather than
/// panicking; the caller adds the row number.
pub fn reorder(order: &[usize], fields: &[String]) -> Result<Vec<String>> {
    order
        .iter()
        .map(|&index| {
            fields.get(index).cloned().with_context(|| {
                format!(
                    "column index {index} is out of range for a record with {} fields",
                    fields.len()
                )
            })
        })
        .collect()
}
