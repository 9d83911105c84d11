//! Column-aligned plain-text tables
//!
//! Every column except the last is padded to a common width, which is the
//! widest cell plus padding but never less than the configured minimum.
//! Widths are measured in terminal columns, not bytes.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

/// Buffered table that is laid out once all rows are known.
#[derive(Debug, Clone)]
pub struct TableWriter {
    min_width: usize,
    padding: usize,
    rows: Vec<Vec<String>>,
}

impl TableWriter {
    /// Create an empty table.
    #[must_use]
    pub const fn new(min_width: usize, padding: usize) -> Self {
        Self {
            min_width,
            padding,
            rows: Vec::new(),
        }
    }

    /// Append a row of cells.
    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Append an empty separator row.
    pub fn blank(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Number of rows appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![self.min_width; columns.saturating_sub(1)];
        for row in &self.rows {
            for (cell, width) in row.iter().zip(widths.iter_mut()) {
                *width = (*width).max(cell.width() + self.padding);
            }
        }
        widths
    }

    /// Lay out the table as a string. Lines carry no trailing whitespace.
    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();
        for row in &self.rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let fill = widths[i].saturating_sub(cell.width());
                    line.extend(std::iter::repeat(' ').take(fill));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Write the laid out table in a single call.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_width_applies() {
        let mut t = TableWriter::new(8, 2);
        t.row(["a:", "1", "2"]);
        assert_eq!(t.render(), format!("{:<8}{:<8}2\n", "a:", "1"));
    }

    #[test]
    fn test_wide_cells_grow_column() {
        let mut t = TableWriter::new(4, 2);
        t.row(["learning_rate:", "1", "2"]);
        t.row(["lr:", "10", "20"]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], format!("{:<16}{:<4}2", "learning_rate:", "1"));
        assert_eq!(lines[1], format!("{:<16}{:<4}20", "lr:", "10"));
    }

    #[test]
    fn test_blank_and_trailing_whitespace() {
        let mut t = TableWriter::new(6, 2);
        t.row(["Params", "", ""]);
        t.blank();
        assert_eq!(t.render(), "Params\n\n");
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_unicode_width() {
        let mut t = TableWriter::new(0, 1);
        t.row(["é", "x"]);
        t.row(["ab", "y"]);
        assert_eq!(t.render(), "é  x\nab y\n");
    }
}
