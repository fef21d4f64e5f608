use chrono::NaiveDate;
use contracts::api::QueryMode;
use rust_xlsxwriter::{Table as SheetTable, TableColumn, Workbook, Worksheet, XlsxError};

use super::template::{read_template, TemplateSheet, TEMPLATE_TABLE};
use crate::domain::error::{PipelineError, Result};
use crate::domain::shipments::{
    filter::{filter_rows, summarize},
    join::prepare_for_export,
    EXPORT_COLUMNS,
};
use crate::domain::tabular::{CellValue, Table};
use crate::shared::config::Config;
use crate::usecases::u502_shipment_query::executor::load_joined;

// Summary cells of the template sheet, 0-based: D2, D4, D5 and K2 to K6.
const CELL_TRANSPORTISTA: (u32, u16) = (1, 3);
const CELL_EMBARQUE: (u32, u16) = (3, 3);
const CELL_WAYBILL: (u32, u16) = (4, 3);
const CELL_PROVEEDOR: (u32, u16) = (1, 10);
const CELL_INCOTERM: (u32, u16) = (2, 10);
const CELL_FORMA_PAGO: (u32, u16) = (3, 10);
const CELL_ESTADO: (u32, u16) = (4, 10);
const CELL_MARCA: (u32, u16) = (5, 10);

/// Export path: join, rename, filter, then rebuild the template workbook
/// with the filtered rows appended to its named table. Returns the xlsx
/// bytes; nothing is written to a shared location.
pub fn run(config: &Config, mode: QueryMode, value: &str) -> Result<Vec<u8>> {
    let mut joined = load_joined(config)?;
    prepare_for_export(&mut joined);
    let filtered = filter_rows(&joined, mode, value)?;
    if filtered.is_empty() {
        return Err(PipelineError::NoMatchingRows);
    }

    let mut info = summarize(&filtered).unwrap_or_default();
    if let Some(cell) = filtered.get(0, "FECHA FACTURA") {
        info.fecha_factura = format_invoice_date(cell);
    }

    let projected = filtered.select(&EXPORT_COLUMNS)?;
    let template = read_template(&config.files.template_path(), TEMPLATE_TABLE)?;
    build_workbook(&template, &projected, &info)
}

fn build_workbook(
    template: &TemplateSheet,
    rows: &Table,
    info: &contracts::api::SummaryInfo,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name(&template.sheet_name)?;

    for (row, col, value) in &template.cells {
        write_cell(ws, *row, *col, value)?;
    }
    for (row, col, formula) in &template.formulas {
        ws.write_formula(*row, *col, formula.as_str())?;
    }

    let start_row = template.last_row + 1;
    for (i, row) in rows.rows().iter().enumerate() {
        let r = start_row + i as u32;
        for (j, cell) in row.iter().enumerate() {
            write_cell(ws, r, template.first_col + j as u16, cell)?;
        }
    }
    let last_row = template.last_row + rows.len() as u32;
    write_row_formulas(ws, rows, template.first_col, start_row, last_row)?;

    write_text(ws, CELL_TRANSPORTISTA, &info.transportista)?;
    write_text(ws, CELL_EMBARQUE, &info.num_embarque)?;
    write_text(ws, CELL_WAYBILL, &info.air_waybill)?;
    write_text(ws, CELL_PROVEEDOR, &info.proveedor)?;
    write_text(ws, CELL_INCOTERM, &info.incoterm)?;
    write_text(ws, CELL_FORMA_PAGO, &info.forma_pago)?;
    write_text(ws, CELL_ESTADO, &info.estado)?;
    write_text(ws, CELL_MARCA, &info.marca)?;

    let columns: Vec<TableColumn> = template
        .table_columns
        .iter()
        .map(|h| TableColumn::new().set_header(h))
        .collect();
    let table = SheetTable::new()
        .set_name(TEMPLATE_TABLE)
        .set_columns(&columns);
    ws.add_table(
        template.header_row,
        template.first_col,
        last_row,
        template.last_col,
        &table,
    )?;

    Ok(workbook.save_to_buffer()?)
}

/// Sub Total and Precio Total stay live in the sheet, recomputed from the
/// unit price, quantity and freight cells of the same row.
fn write_row_formulas(
    ws: &mut Worksheet,
    rows: &Table,
    first_col: u16,
    start_row: u32,
    last_row: u32,
) -> Result<()> {
    let col = |name: &str| -> Result<u16> {
        rows.column_idx(name)
            .map(|i| first_col + i as u16)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    };
    let cant = column_letter(col("Cant")?);
    let precio = column_letter(col("Precio Unitario")?);
    let sub_col = col("Sub Total")?;
    let sub = column_letter(sub_col);
    let flete = column_letter(col("Flete")?);
    let total_col = col("Precio Total")?;

    for r in start_row..=last_row {
        let fila = r + 1;
        ws.write_formula(r, sub_col, format!("={precio}{fila}*{cant}{fila}").as_str())?;
        ws.write_formula(
            r,
            total_col,
            format!("={flete}{fila}+{sub}{fila}").as_str(),
        )?;
    }
    Ok(())
}

fn write_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Null => {}
        CellValue::Text(s) => {
            ws.write_string(row, col, s.as_str())?;
        }
        CellValue::Number(n) => {
            ws.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        CellValue::DateTime(dt) => {
            ws.write_string(row, col, dt.format("%Y-%m-%d %H:%M:%S").to_string())?;
        }
    }
    Ok(())
}

fn write_text(
    ws: &mut Worksheet,
    cell: (u32, u16),
    value: &str,
) -> std::result::Result<(), XlsxError> {
    ws.write_string(cell.0, cell.1, value)?;
    Ok(())
}

fn column_letter(col: u16) -> String {
    let mut n = col as u32 + 1;
    let mut letters = String::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.insert(0, (b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters
}

/// The invoice date travels to the summary as DD/MM/YYYY whatever shape it
/// arrived in: a real datetime, a serial number or a text date.
fn format_invoice_date(cell: &CellValue) -> String {
    match cell {
        CellValue::DateTime(dt) => dt.date().format("%d/%m/%Y").to_string(),
        CellValue::Text(s) => parse_date_text(s)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| s.clone()),
        CellValue::Number(n) => serial_to_date(*n)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| cell.display_or_empty()),
        _ => cell.display_or_empty(),
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

// Excel serial dates count days from 1899-12-30.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30).map(|epoch| epoch + chrono::Duration::days(serial as i64))
}
