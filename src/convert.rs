//! The csv-to-inserts verb
//!
//! Streams a delimited text file and writes SQL INSERT statements
//! reproducing its rows. Single pass: columns and field order are resolved
//! once, before the output file is created, then each row is escaped,
//! reordered, and appended to the current statement.

use anyhow::{Context, Result};
use clap::Parser;
use sql_utils_csv_line::CsvLineReader;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, error, info};

use crate::columns::{determine_columns, determine_order, reorder};
use crate::escape::escape_row;

/// Options for the csv-to-inserts verb.
#[derive(Parser, Clone)]
pub struct CsvToInsertsOpts {
    /// Path to the source CSV file
    #[arg(short, long)]
    pub path: PathBuf,

    /// Where to save the generated SQL; overwritten if it exists
    #[arg(short, long, default_value = "output.sql")]
    pub output: PathBuf,

    /// Column order as a comma-separated list of zero-based indexes
    /// (e.g. "2,0,1"); leaving it blank keeps the natural order
    #[arg(short, long)]
    pub splits: Option<String>,

    /// Rows per INSERT statement; leaving it blank puts all rows in a
    /// single statement. Useful for SQL Server, which caps an insert at
    /// 1000 rows
    #[arg(short, long)]
    pub record_split: Option<usize>,

    /// Treat the first line of the file as a header record
    #[arg(short = 'H', long, default_value_t = true, action = clap::ArgAction::Set)]
    pub has_header: bool,

    /// Use the header record as the column names; requires --has-header
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_headers_as_cols: bool,

    /// Table name for the INSERT statements, inserted verbatim
    #[arg(short, long)]
    pub table_name: String,

    /// Explicit comma-separated column names; required when
    /// --use-headers-as-cols is false
    #[arg(short, long)]
    pub columns: Option<String>,

    /// Text substituted for embedded single quotes in values
    #[arg(short, long, default_value = "'")]
    pub escape_char: String,
}

/// Run the conversion.
///
/// Returns the process exit code: 0 on success, 1 when the source file
/// does not exist. Configuration errors propagate as errors before the
/// output path is touched.
pub async fn run(opts: &CsvToInsertsOpts) -> Result<i32> {
    if !opts.path.exists() {
        error!("\"{}\" does not exist", opts.path.display());
        return Ok(1);
    }

    let mut reader = CsvLineReader::open(&opts.path, opts.has_header).await?;

    let columns = determine_columns(
        &mut reader,
        opts.use_headers_as_cols,
        opts.has_header,
        opts.columns.as_deref(),
    )
    .await?;
    let order = determine_order(opts.splits.as_deref(), columns.len())?;
    let columns = reorder(&order, &columns)?;
    debug!(columns = ?columns, "resolved insert columns");

    // Configuration is fully resolved; only now touch the output path.
    let output = File::create(&opts.output)
        .await
        .with_context(|| format!("failed to create {}", opts.output.display()))?;

    let preamble = insert_preamble(&opts.table_name, &columns);
    let mut writer =
        InsertWriter::begin(BufWriter::new(output), preamble, opts.record_split).await?;

    let mut rows: u64 = 0;
    while let Some(record) = reader.next_row().await? {
        let escaped = escape_row(&record, &opts.escape_char);
        let values = reorder(&order, &escaped).with_context(|| format!("record {}", rows + 1))?;
        writer.write_row(&values).await?;
        rows += 1;
    }
    writer.finish().await?;

    info!("wrote {rows} rows to {}", opts.output.display());
    Ok(0)
}

fn insert_preamble(table: &str, columns: &[String]) -> String {
    format!("INSERT INTO {table} ({}) VALUES", columns.join(", "))
}

/// Emits INSERT statements, starting a new statement whenever the
/// configured batch size is reached.
struct InsertWriter<W> {
    out: W,
    preamble: String,
    record_split: Option<usize>,
    rows_in_batch: usize,
}

impl<W: AsyncWrite + Unpin> InsertWriter<W> {
    /// Write the opening preamble and enter the first batch.
    async fn begin(mut out: W, preamble: String, record_split: Option<usize>) -> Result<Self> {
        out.write_all(preamble.as_bytes()).await?;
        out.write_all(b"\n").await?;
        Ok(Self {
            out,
            preamble,
            record_split,
            rows_in_batch: 0,
        })
    }

    /// Append one value tuple, crossing a statement boundary first when
    /// the current batch is full.
    async fn write_row(&mut self, values: &[String]) -> Result<()> {
        if self
            .record_split
            .is_some_and(|limit| self.rows_in_batch >= limit)
        {
            self.out.write_all(b";\n\n").await?;
            self.out.write_all(self.preamble.as_bytes()).await?;
            self.out.write_all(b"\n").await?;
            self.rows_in_batch = 0;
        } else if self.rows_in_batch != 0 {
            self.out.write_all(b",\n").await?;
        }

        self.out
            .write_all(format!("({})", values.join(", ")).as_bytes())
            .await?;
        self.rows_in_batch += 1;
        Ok(())
    }

    /// Terminate the final statement and flush the sink.
    async fn finish(mut self) -> Result<()> {
        self.out.write_all(b";").await?;
        self.out.flush().await?;
        Ok(())
    }
}
