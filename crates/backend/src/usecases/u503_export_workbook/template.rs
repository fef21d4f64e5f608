use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::domain::error::{PipelineError, Result};
use crate::domain::tabular::CellValue;

/// Name of the structured table the export template must carry.
pub const TEMPLATE_TABLE: &str = "Tabla24";

/// Everything the exporter needs from the template workbook: the named
/// table's extent and column titles, plus every cell value and formula of
/// the sheet so the output can reproduce them. Coordinates are 0-based.
#[derive(Debug)]
pub struct TemplateSheet {
    pub sheet_name: String,
    pub header_row: u32,
    pub first_col: u16,
    pub last_col: u16,
    /// Last occupied row of the current table extent; new rows go below it.
    pub last_row: u32,
    pub table_columns: Vec<String>,
    pub cells: Vec<(u32, u16, CellValue)>,
    pub formulas: Vec<(u32, u16, String)>,
}

pub fn read_template(path: &Path, table_name: &str) -> Result<TemplateSheet> {
    if !path.exists() {
        return Err(PipelineError::SourceNotFound(path.to_path_buf()));
    }
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    workbook.load_tables()?;

    let table = workbook
        .table_by_name(table_name)
        .map_err(|_| PipelineError::TemplateInvalid(table_name.to_string()))?;
    let sheet_name = table.sheet_name().to_string();
    let table_columns = table.columns().to_vec();
    let data = table.data();
    let (data_row, first_col) = data
        .start()
        .ok_or_else(|| PipelineError::TemplateInvalid(table_name.to_string()))?;
    let (last_row, last_col) = data
        .end()
        .ok_or_else(|| PipelineError::TemplateInvalid(table_name.to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;

    // The table range may or may not include its header row; probe the top
    // row of the range against the first column title to find the header.
    let header_row = match range.get_value((data_row, first_col)) {
        Some(Data::String(s)) if !table_columns.is_empty() && *s == table_columns[0] => data_row,
        _ => data_row.saturating_sub(1),
    };

    let mut cells = Vec::new();
    if let Some((r0, c0)) = range.start() {
        for (i, row) in range.rows().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                if !matches!(cell, Data::Empty) {
                    cells.push((r0 + i as u32, (c0 + j as u32) as u16, CellValue::from(cell)));
                }
            }
        }
    }

    let mut formulas = Vec::new();
    let formula_range = workbook.worksheet_formula(&sheet_name)?;
    if let Some((r0, c0)) = formula_range.start() {
        for (i, row) in formula_range.rows().enumerate() {
            for (j, formula) in row.iter().enumerate() {
                if !formula.is_empty() {
                    formulas.push((r0 + i as u32, (c0 + j as u32) as u16, formula.clone()));
                }
            }
        }
    }

    Ok(TemplateSheet {
        sheet_name,
        header_row,
        first_col: first_col as u16,
        last_col: last_col as u16,
        last_row,
        table_columns,
        cells,
        formulas,
    })
}
