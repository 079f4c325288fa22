//! Delimited text tables with a header row.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

use super::read_lines;

/// Field separator of a delimited text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Tab,
    #[default]
    Comma,
    Semicolon,
    /// Tab when the header line contains one, comma otherwise.
    Auto,
}

impl Delimiter {
    fn resolve(self, header: &str) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Auto => {
                if header.contains('\t') {
                    b'\t'
                } else {
                    b','
                }
            }
        }
    }

    /// Parses a delimiter name. Case insensitive.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tab" | "\\t" => Some(Self::Tab),
            "comma" | "," => Some(Self::Comma),
            "semicolon" | ";" => Some(Self::Semicolon),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Header row plus data rows of verbatim string cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Builds a table from text lines. The first non-blank line is the header;
    /// blank lines are skipped. Rows may be shorter or longer than the header.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], delimiter: Delimiter) -> Self {
        let kept: Vec<&str> = lines
            .iter()
            .map(|l| l.as_ref().trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        let Some(header) = kept.first() else {
            return Self::default();
        };
        let text = kept.join("\n");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.resolve(header))
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = match reader.headers() {
            Ok(record) => record.iter().map(|h| h.trim().to_string()).collect(),
            Err(e) => {
                log::warn!("unreadable header line: {e}");
                return Self::default();
            }
        };
        let mut rows = Vec::with_capacity(kept.len() - 1);
        for (i, record) in reader.records().enumerate() {
            match record {
                Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
                Err(e) => log::warn!("skipping unreadable row {}: {e}", i + 1),
            }
        }
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column whose header contains `token`, ignoring case.
    pub fn find_column(&self, token: &str) -> Option<usize> {
        let token = token.to_lowercase();
        self.headers
            .iter()
            .position(|h| h.to_lowercase().contains(&token))
    }

    /// Index of the first column whose header equals `name`, ignoring case.
    pub fn column_by_name(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.headers.iter().position(|h| h.to_lowercase() == name)
    }

    /// Cell at `(row, col)`; `None` when the row is shorter than the header.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Reads a delimited text file into a [`Table`].
pub fn read_table(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<Table> {
    let path = path.as_ref();
    let lines = read_lines(path).map_err(|e| ProfileError::read(path, e))?;
    let table = Table::from_lines(&lines, delimiter);
    log::debug!(
        "read {} rows x {} columns from {}",
        table.rows().len(),
        table.headers().len(),
        path.display()
    );
    Ok(table)
}

/// Numeric value of a cell. Empty, `NaN` and unparseable cells are missing.
pub fn parse_number(cell: &str) -> Option<f64> {
    let v = cell.trim().parse::<f64>().ok()?;
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}
