//! CSV tables addressed by header name

use crate::reader::{IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A CSV file held in memory as strings
///
/// Cells stay untyped until a column is requested; numeric columns parse
/// lazily and map unparseable cells to NaN so the statistics layer can drop
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    source: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Open a comma-separated file with a header row
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let mut table = Self::from_reader(BufReader::new(file))?;
        table.source = Some(path.display().to_string());
        Ok(table)
    }

    /// Read a table from any reader
    pub fn from_reader<R: Read>(reader: R) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() {
            return Err(IoError::InvalidFormat("missing header row".to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Self {
            source: None,
            headers,
            rows,
        })
    }

    /// Concatenate tables, aligning columns by the first table's headers
    ///
    /// Cells for headers a later table lacks are left empty.
    pub fn merge(tables: Vec<CsvTable>) -> Self {
        let mut iter = tables.into_iter();
        let Some(mut merged) = iter.next() else {
            return Self::default();
        };

        for table in iter {
            let mapping: Vec<Option<usize>> = merged
                .headers
                .iter()
                .map(|h| table.column_index(h))
                .collect();
            for row in table.rows {
                merged.rows.push(
                    mapping
                        .iter()
                        .map(|idx| idx.and_then(|i| row.get(i).cloned()).unwrap_or_default())
                        .collect(),
                );
            }
        }
        merged.source = None;
        merged
    }

    /// Path the table was read from, if any
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw cells of a column; short rows yield empty cells
    pub fn column(&self, name: &str) -> IoResult<Vec<&str>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
            .collect())
    }

    /// Numeric column multiplied by `scale`; unparseable cells become NaN
    pub fn numeric_column(&self, name: &str, scale: f64) -> IoResult<Vec<f64>> {
        Ok(self
            .column(name)?
            .into_iter()
            .map(|cell| parse_number(cell) * scale)
            .collect())
    }
}

/// Parse a cell as a float, NaN when it is not a number
pub fn parse_number(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(f64::NAN)
}
