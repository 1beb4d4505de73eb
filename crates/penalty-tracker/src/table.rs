//! In-memory tables and their comma-separated text form.
//!
//! A [`Table`] is a header row plus a list of string rows, every row exactly
//! as wide as the header. It is the unit the table stores load and save, and
//! the shape of the exported statistics report.

use crate::error::{Error, Result};

/// A rectangular grid of strings with named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A borrowed view of one table row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Row<'a> {
    /// Get the value in the named column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i].as_str())
    }

    /// All values in column order.
    #[must_use]
    pub fn values(&self) -> &'a [String] {
        self.values
    }

    /// Check if every cell in the row is blank.
    ///
    /// Whitespace-only cells count as blank, so a row of spaces is dropped on
    /// load like an empty one.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }
}

impl Table {
    /// Create an empty table with the given columns.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from a header and rows.
    ///
    /// Short rows are padded with blanks.
    ///
    /// # Errors
    ///
    /// Returns an error if a row has more cells than the header.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = columns.len();
        let mut table = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(Error::malformed_table(
                    i + 2,
                    format!("expected {width} fields, found {}", row.len()),
                ));
            }
            row.resize(width, String::new());
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Get a single row.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Iterate over all rows in table order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Append a row given as `(column, value)` pairs.
    ///
    /// Columns the table doesn't have yet are added first; columns not named
    /// in `fields` are left blank.
    pub fn push_record(&mut self, fields: &[(&str, String)]) {
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        self.ensure_columns(&names);

        let mut row = vec![String::new(); self.columns.len()];
        for (name, value) in fields {
            if let Some(i) = self.column_index(name) {
                row[i].clone_from(value);
            }
        }
        self.rows.push(row);
    }

    /// Keep only rows matching the predicate; returns how many were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Row<'_>) -> bool,
    {
        let before = self.rows.len();
        let columns = &self.columns;
        self.rows.retain(|values| keep(Row { columns, values }));
        before - self.rows.len()
    }

    /// Remove rows whose cells are all blank; returns how many were removed.
    pub fn drop_blank_rows(&mut self) -> usize {
        self.retain(|row| !row.is_blank())
    }

    /// Append any missing columns, filling existing rows with blanks.
    pub fn ensure_columns(&mut self, names: &[&str]) {
        for name in names {
            if self.column_index(name).is_none() {
                self.columns.push((*name).to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }
    }

    /// Render as comma-separated text with a header line.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_line(&mut out, &self.columns);
        for row in &self.rows {
            write_line(&mut out, row);
        }
        out
    }

    /// Parse comma-separated text whose first non-blank line is the header.
    ///
    /// Empty input gives a table with no columns.
    ///
    /// # Errors
    ///
    /// Returns an error on an unterminated quoted field or a row wider than
    /// the header.
    pub fn from_csv(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = parse_records(text)?.into_iter();

        let Some(header) = records.find(|r| r.iter().any(|v| !v.trim().is_empty())) else {
            return Ok(Self::default());
        };
        let columns = header.into_iter().map(|c| c.trim().to_string()).collect();
        Self::from_parts(columns, records.collect())
    }
}

fn write_line(out: &mut String, values: &[String]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(value));
    }
    out.push('\n');
}

fn escape_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => {
                    in_quotes = true;
                    quote_line = line;
                }
                ',' => record.push(std::mem::take(&mut field)),
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                    line += 1;
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(Error::malformed_table(
            quote_line,
            "unterminated quoted field",
        ));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}
