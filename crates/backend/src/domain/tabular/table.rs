use std::collections::HashMap;

use super::cell::CellValue;
use crate::domain::error::{PipelineError, Result};

/// In-memory table with named columns and row-major untyped cells.
///
/// Column lookup is by name; when a sheet carries duplicate header names the
/// first occurrence wins. Rows are always exactly as wide as the column set.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            columns,
            index,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<CellValue>] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_idx(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Validates the schema up front so a renamed upstream column fails the
    /// request immediately instead of deep inside the pipeline.
    pub fn require(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.index.contains_key(*name) {
                return Err(PipelineError::MissingColumn((*name).to_string()));
            }
        }
        Ok(())
    }

    /// Pads or truncates to the column count, so ragged source rows cannot
    /// desynchronize positional access.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_idx(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Appends a computed column. `values` must hold one cell per row.
    pub fn add_column(&mut self, name: &str, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.rows.len());
        let idx = self.columns.len();
        self.columns.push(name.to_string());
        self.index.entry(name.to_string()).or_insert(idx);
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().unwrap_or(CellValue::Null));
        }
    }

    /// Projects onto `names`, in that order. Missing columns are a schema
    /// error, same as `require`.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = self
                .column_idx(name)
                .ok_or_else(|| PipelineError::MissingColumn((*name).to_string()))?;
            indices.push(idx);
        }
        let mut out = Table::new(names.iter().map(|n| n.to_string()).collect());
        for row in &self.rows {
            out.push_row(indices.iter().map(|&i| row[i].clone()).collect());
        }
        Ok(out)
    }

    /// Renames columns per `mapping` (old → new); unlisted columns keep
    /// their original name.
    pub fn rename(&mut self, mapping: &[(&str, &str)]) {
        for (old, new) in mapping {
            if let Some(idx) = self.index.remove(*old) {
                self.columns[idx] = (*new).to_string();
                self.index.entry((*new).to_string()).or_insert(idx);
            }
        }
    }

    /// New table with the rows for which `pred` returns true, original
    /// order preserved.
    pub fn filter_rows<F>(&self, mut pred: F) -> Table
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let mut out = Table::new(self.columns.clone());
        for row in &self.rows {
            if pred(row) {
                out.push_row(row.clone());
            }
        }
        out
    }
}
