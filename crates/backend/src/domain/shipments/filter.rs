use contracts::api::{QueryMode, SummaryInfo};

use super::{FILTER_EMBARQUE, FILTER_WAYBILL};
use crate::domain::error::Result;
use crate::domain::tabular::Table;

/// Retains rows whose target column contains `value` as a case-insensitive
/// substring. Null cells never match. An empty result is a valid outcome
/// here; the export path turns it into an error at its own boundary.
pub fn filter_rows(table: &Table, mode: QueryMode, value: &str) -> Result<Table> {
    let column = match mode {
        QueryMode::Embarque => FILTER_EMBARQUE,
        QueryMode::Waybill => FILTER_WAYBILL,
    };
    table.require(&[column])?;
    let idx = table.column_idx(column).unwrap();
    let needle = value.to_lowercase();

    Ok(table.filter_rows(|row| {
        row[idx]
            .display()
            .map(|s| s.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }))
}

/// Summary record from the first filtered row; the left join keeps purchase
/// order, so "first" is the first matching purchase row. Null and missing
/// columns become empty strings. `None` when the filter matched nothing.
pub fn summarize(filtered: &Table) -> Option<SummaryInfo> {
    if filtered.is_empty() {
        return None;
    }
    let field = |column: &str| {
        filtered
            .get(0, column)
            .map(|c| c.display_or_empty())
            .unwrap_or_default()
    };
    Some(SummaryInfo {
        transportista: field("TRANSPORTISTA"),
        fecha_factura: field("FECHA FACTURA"),
        num_embarque: field(FILTER_EMBARQUE),
        air_waybill: field(FILTER_WAYBILL),
        marca: field("Marca"),
        proveedor: field("PROVEEDOR"),
        incoterm: field("INCOTERM"),
        forma_pago: field("FORMA DE PAGO"),
        estado: field("ESTADO"),
    })
}
