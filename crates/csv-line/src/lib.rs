//! Line-oriented reader for comma-delimited text files
//!
//! Each line is split on the comma delimiter; every resulting field is
//! stripped of surrounding double quotes, then of surrounding whitespace.
//! This is a deliberately naive split: fields containing an embedded
//! delimiter or newline are not honored. That limitation is part of the
//! contract, not a bug.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

/// The fixed field delimiter.
pub const DELIMITER: char = ',';

/// Reads a delimited text source one line at a time.
///
/// The reader owns its source: dropping the reader releases the buffered
/// wrapper and closes the underlying file or stream.
pub struct CsvLineReader<R> {
    lines: Lines<BufReader<R>>,
    has_header: bool,
}

impl CsvLineReader<File> {
    /// Open a local file for reading.
    pub async fn open(path: impl AsRef<Path>, has_header: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .with_context(|| format!("failed to open {}", path.display()))?;
        tracing::debug!("reading lines from {}", path.display());
        Ok(Self::new(file, has_header))
    }
}

impl<R: AsyncRead + Unpin> CsvLineReader<R> {
    /// Wrap an already-open source, taking ownership of it.
    pub fn new(input: R, has_header: bool) -> Self {
        Self {
            lines: BufReader::new(input).lines(),
            has_header,
        }
    }

    /// Consume and parse the header line.
    ///
    /// Returns an empty Vec without touching the source when the reader
    /// was built without a header, and an empty Vec when the source is
    /// already exhausted; the caller decides whether the latter is an
    /// error.
    pub async fn read_header(&mut self) -> Result<Vec<String>> {
        if !self.has_header {
            return Ok(Vec::new());
        }

        match self
            .lines
            .next_line()
            .await
            .context("failed to read header line")?
        {
            Some(line) => Ok(parse_line(&line)),
            None => Ok(Vec::new()),
        }
    }

    /// Read the next data row, or `None` at end of stream.
    ///
    /// Rows are produced lazily in source order; the sequence is
    /// forward-only and cannot be restarted.
    pub async fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        let line = self.lines.next_line().await.context("failed to read line")?;
        Ok(line.map(|line| parse_line(&line)))
    }
}

/// Split a raw line into fields, trimming quotes then whitespace.
pub fn parse_line(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(|piece| piece.trim_matches('"').trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_line_plain() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_line_trims_quotes_then_whitespace() {
        assert_eq!(
            parse_line("\"Alice\", 30 ,\" Bob \""),
            vec!["Alice", "30", "Bob"]
        );
    }

    #[test]
    fn test_parse_line_does_not_honor_quoted_delimiters() {
        // Naive split: the embedded comma still separates fields.
        assert_eq!(parse_line("\"a,b\",c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_line_empty_fields() {
        assert_eq!(parse_line("a,,c"), vec!["a", "", "c"]);
        assert_eq!(parse_line(""), vec![""]);
    }

    #[tokio::test]
    async fn test_read_header_without_flag_leaves_source_untouched() {
        let mut reader = CsvLineReader::new(&b"a,b\n1,2\n"[..], false);

        assert!(reader.read_header().await.unwrap().is_empty());
        assert_eq!(
            reader.next_row().await.unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[tokio::test]
    async fn test_read_header_consumes_one_line() {
        let mut reader = CsvLineReader::new(&b"name,age\nAlice,30\n"[..], true);

        assert_eq!(
            reader.read_header().await.unwrap(),
            vec!["name".to_string(), "age".to_string()]
        );
        assert_eq!(
            reader.next_row().await.unwrap(),
            Some(vec!["Alice".to_string(), "30".to_string()])
        );
        assert_eq!(reader.next_row().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_header_on_empty_source() {
        let mut reader = CsvLineReader::new(&b""[..], true);
        assert!(reader.read_header().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rows_in_source_order_until_end() {
        let mut reader = CsvLineReader::new(&b"1,2\n3,4\n5,6"[..], false);

        let mut rows = Vec::new();
        while let Some(row) = reader.next_row().await.unwrap() {
            rows.push(row);
        }

        assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"], vec!["5", "6"]]);
        // Exhausted readers stay exhausted.
        assert_eq!(reader.next_row().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_open_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.csv");
        std::fs::write(&file_path, "id,name\n1,Alice\n").unwrap();

        let mut reader = CsvLineReader::open(&file_path, true).await.unwrap();
        assert_eq!(
            reader.read_header().await.unwrap(),
            vec!["id".to_string(), "name".to_string()]
        );
        assert_eq!(
            reader.next_row().await.unwrap(),
            Some(vec!["1".to_string(), "Alice".to_string()])
        );
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = CsvLineReader::open(temp_dir.path().join("absent.csv"), true).await;
        assert!(result.is_err());
    }
}
