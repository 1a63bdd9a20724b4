#![deny(unsafe_code)]

use std::collections::HashMap;

use crate::{CellValue, ModelError, Result};

static MISSING: CellValue = CellValue::Missing;

/// A parsed source sheet: unique, ordered column names and row-major cells.
///
/// Rows are immutable once pushed. Every row holds exactly one cell per
/// column; short rows are padded with [`CellValue::Missing`].
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            if positions.insert(name.clone(), idx).is_some() {
                return Err(ModelError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            columns,
            positions,
            rows: Vec::new(),
        })
    }

    /// Build a table from header names and rows in one step.
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, mut cells: Vec<CellValue>) -> Result<()> {
        let expected = self.columns.len();
        if cells.len() > expected {
            return Err(ModelError::RowTooWide {
                row: self.rows.len(),
                expected,
                found: cells.len(),
            });
        }
        cells.resize(expected, CellValue::Missing);
        self.rows.push(cells);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Returns the number of records.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<SourceRecord<'_>> {
        (index < self.rows.len()).then_some(SourceRecord { table: self, index })
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = SourceRecord<'_>> {
        (0..self.rows.len()).map(move |index| SourceRecord { table: self, index })
    }

    /// Values of one column in row order; all missing when the column is absent.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a CellValue> + use<'a> {
        let position = self.positions.get(name).copied();
        self.rows.iter().map(move |row| match position {
            Some(idx) => &row[idx],
            None => &MISSING,
        })
    }
}

/// One row of a [`SourceTable`], looked up by column name.
#[derive(Debug, Clone, Copy)]
pub struct SourceRecord<'a> {
    table: &'a SourceTable,
    index: usize,
}

impl<'a> SourceRecord<'a> {
    /// Position of this record in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell under `column`, or [`CellValue::Missing`] when the table has no
    /// such column.
    pub fn get(&self, column: &str) -> &'a CellValue {
        match self.table.positions.get(column) {
            Some(&idx) => &self.table.rows[self.index][idx],
            None => &MISSING,
        }
    }

    pub fn cells(&self) -> &'a [CellValue] {
        &self.table.rows[self.index]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> + use<'a> {
        self.table
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.table.rows[self.index].iter())
    }
}
