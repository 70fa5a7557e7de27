//! Core, source-agnostic types for l10ngen.
//! Importers decode into a [`Table`]; generators read from it.

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// One record of imported data: an ordered sequence of cells.
pub type Row = Vec<String>;

/// Index of the key column in every row.
pub const KEY_COLUMN: usize = 0;
/// Index of the description column in every row.
pub const DESCRIPTION_COLUMN: usize = 1;
/// Index of the first locale column in the header.
pub const FIRST_LOCALE_COLUMN: usize = 2;

/// Imported tabular data: a header row followed by data rows.
///
/// The table makes no promise about its shape; [`Table::locales`] is where
/// "a header and at least one data row" gets enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table from raw rows, header first.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// All rows including the header.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, if any.
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Every row after the header.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Extracts the locale labels from the header (columns 2 and onward).
    ///
    /// Fails with [`Error::InsufficientData`] unless there is a header and at
    /// least one data row. Labels are not validated; a label that does not look
    /// like a language identifier is only logged.
    pub fn locales(&self) -> Result<Vec<String>, Error> {
        if self.rows.len() < 2 {
            return Err(Error::InsufficientData(format!(
                "expected a header row and at least one data row, found {} row(s)",
                self.rows.len()
            )));
        }
        let locales: Vec<String> = self.rows[0]
            .iter()
            .skip(FIRST_LOCALE_COLUMN)
            .cloned()
            .collect();
        for locale in &locales {
            if locale.parse::<LanguageIdentifier>().is_err() {
                tracing::warn!(event = "unrecognized_locale_label", locale = %locale);
            }
        }
        Ok(locales)
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// A data row viewed through the fixed column layout.
///
/// Missing trailing cells read as empty strings.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    cells: &'a [String],
}

impl<'a> RowView<'a> {
    pub fn new(cells: &'a [String]) -> Self {
        Self { cells }
    }

    pub fn key(&self) -> &'a str {
        self.cell(KEY_COLUMN)
    }

    pub fn description(&self) -> &'a str {
        self.cell(DESCRIPTION_COLUMN)
    }

    /// The translation at `offset` locale columns after the description.
    pub fn translation(&self, offset: usize) -> &'a str {
        self.cell(FIRST_LOCALE_COLUMN + offset)
    }

    fn cell(&self, index: usize) -> &'a str {
        self.cells.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// One generated output file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name relative to the output directory (e.g. `app_en.arb`).
    pub name: String,
    /// Full UTF-8 file content.
    pub content: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
