//! Textual matrix format
//!
//! A matrix renders as delimiter-bounded rows inside a delimiter-bounded
//! matrix, `{{1, 2}, {3, 4}}` with the default [`TextFormat`]. Raw rendering
//! uses the shortest representation that parses back to the same `f64`, so
//! `Display` followed by `FromStr` reproduces the matrix exactly.

use super::types::Matrix;
use crate::error::{MatrixError, MatrixResult};
use std::fmt;
use std::str::FromStr;

/// Delimiters of the textual format
///
/// The same `open`/`close` pair bounds both the matrix and each row. When a
/// `decimal_point` is set it replaces `.` in rendered numbers and is mapped
/// back during parsing, so it must differ from `element_separator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFormat {
    pub open: char,
    pub close: char,
    pub element_separator: char,
    pub row_separator: char,
    /// Written after each separator; one leading occurrence is skipped
    /// when parsing
    pub spacer: char,
    pub decimal_point: Option<char>,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            open: '{',
            close: '}',
            element_separator: ',',
            row_separator: ',',
            spacer: ' ',
            decimal_point: None,
        }
    }
}

/// Options for [`Matrix::to_strings`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringOptions {
    /// Round every cell to this many decimals
    pub decimals: Option<usize>,
    /// Right-align every cell to the widest one
    pub aligned: bool,
}

/// Locale-specific number parsing hook
///
/// Returning `None` falls back to the default decimal parse of the cell.
pub trait CellParser {
    fn parse_cell(&self, cell: &str) -> Option<f64>;
}

impl<F> CellParser for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn parse_cell(&self, cell: &str) -> Option<f64> {
        self(cell)
    }
}

fn format_cell(value: f64, decimals: Option<usize>, format: &TextFormat) -> String {
    let text = match decimals {
        Some(d) => format!("{:.*}", d, value),
        None => value.to_string(),
    };
    match format.decimal_point {
        Some(c) if c != '.' => text.replace('.', &c.to_string()),
        _ => text,
    }
}

impl Matrix {
    fn cell_strings(&self, decimals: Option<usize>, format: &TextFormat) -> Vec<String> {
        self.as_slice()
            .iter()
            .map(|&x| format_cell(x, decimals, format))
            .collect()
    }

    fn render(&self, format: &TextFormat, decimals: Option<usize>) -> String {
        let cells = self.cell_strings(decimals, format);
        let element_join = format!("{}{}", format.element_separator, format.spacer);
        let row_join = format!("{}{}", format.row_separator, format.spacer);

        let rows: Vec<String> = cells
            .chunks_exact(self.cols)
            .map(|row| format!("{}{}{}", format.open, row.join(&element_join), format.close))
            .collect();
        format!("{}{}{}", format.open, rows.join(&row_join), format.close)
    }

    /// Render with custom delimiters
    pub fn to_string_with(&self, format: &TextFormat) -> String {
        self.render(format, None)
    }

    /// Render with every cell rounded to `decimals` places
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0 / 3.0, 2.0]]).unwrap();
    /// assert_eq!(a.to_string_rounded(2), "{{0.33, 2.00}}");
    /// ```
    pub fn to_string_rounded(&self, decimals: usize) -> String {
        self.render(&TextFormat::default(), Some(decimals))
    }

    /// One string per row, optionally rounded and aligned to a common width
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::{Matrix, StringOptions};
    ///
    /// let a = Matrix::from_rows(&[[1.0, -20.5], [300.0, 4.0]]).unwrap();
    /// let rows = a.to_strings(&StringOptions { decimals: Some(1), aligned: true });
    /// assert_eq!(rows, vec!["{  1.0, -20.5}", "{300.0,   4.0}"]);
    /// ```
    pub fn to_strings(&self, options: &StringOptions) -> Vec<String> {
        let format = TextFormat::default();
        let mut cells = self.cell_strings(options.decimals, &format);
        if options.aligned {
            let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
            for cell in &mut cells {
                *cell = format!("{:>width$}", cell, width = width);
            }
        }
        let join = format!("{}{}", format.element_separator, format.spacer);
        cells
            .chunks_exact(self.cols)
            .map(|row| format!("{}{}{}", format.open, row.join(&join), format.close))
            .collect()
    }

    /// Parse text written with `format`, trying `parser` on each cell first
    ///
    /// # Examples
    ///
    /// ```
    /// use matrso_core::{Matrix, TextFormat};
    ///
    /// let format = TextFormat {
    ///     open: '[',
    ///     close: ']',
    ///     element_separator: ';',
    ///     row_separator: ';',
    ///     spacer: ' ',
    ///     decimal_point: Some(','),
    /// };
    /// let a = Matrix::parse_with("[[1,5; 2]; [3; 4,25]]", &format, None).unwrap();
    /// assert_eq!(a.to_vec(), vec![1.5, 2.0, 3.0, 4.25]);
    /// ```
    pub fn parse_with(
        text: &str,
        format: &TextFormat,
        parser: Option<&dyn CellParser>,
    ) -> MatrixResult<Matrix> {
        let body = text
            .trim()
            .strip_prefix(format.open)
            .and_then(|b| b.strip_suffix(format.close))
            .ok_or_else(|| {
                MatrixError::Parse(format!(
                    "expected matrix bounded by '{}' and '{}'",
                    format.open, format.close
                ))
            })?;

        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut rest = body.trim_start();
        while !rest.is_empty() {
            if !rows.is_empty() {
                rest = rest
                    .strip_prefix(format.row_separator)
                    .ok_or_else(|| {
                        MatrixError::Parse(format!(
                            "expected '{}' between rows {} and {}",
                            format.row_separator,
                            rows.len() - 1,
                            rows.len()
                        ))
                    })?;
                rest = strip_spacer(rest, format.spacer);
            }
            let inner = rest.strip_prefix(format.open).ok_or_else(|| {
                MatrixError::Parse(format!("row {} does not start with '{}'", rows.len(), format.open))
            })?;
            let end = inner.find(format.close).ok_or_else(|| {
                MatrixError::Parse(format!("row {} is not closed by '{}'", rows.len(), format.close))
            })?;
            rows.push(parse_row(&inner[..end], rows.len(), format, parser)?);
            rest = inner[end + format.close.len_utf8()..].trim_start();
        }

        if rows.is_empty() {
            return Err(MatrixError::Parse("matrix has no rows".to_string()));
        }
        Matrix::from_rows(&rows).map_err(|e| MatrixError::Parse(e.to_string()))
    }
}

fn parse_row(
    text: &str,
    row: usize,
    format: &TextFormat,
    parser: Option<&dyn CellParser>,
) -> MatrixResult<Vec<f64>> {
    text.split(format.element_separator)
        .enumerate()
        .map(|(col, cell)| {
            let cell = strip_spacer(cell, format.spacer).trim_end();
            parser
                .and_then(|p| p.parse_cell(cell))
                .or_else(|| default_parse(cell, format))
                .ok_or_else(|| {
                    MatrixError::Parse(format!("invalid number '{}' at ({}, {})", cell, row, col))
                })
        })
        .collect()
}

/// Skip leading whitespace and at most one `spacer`
fn strip_spacer(text: &str, spacer: char) -> &str {
    let text = text.trim_start();
    text.strip_prefix(spacer).unwrap_or(text).trim_start()
}

fn default_parse(cell: &str, format: &TextFormat) -> Option<f64> {
    match format.decimal_point {
        Some(c) if c != '.' => cell.replace(c, ".").parse().ok(),
        _ => cell.parse().ok(),
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&TextFormat::default(), None))
    }
}

impl FromStr for Matrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Matrix::parse_with(s, &TextFormat::default(), None)
    }
}
