//! Workbook builders shared by the usecase tests. They reproduce the real
//! source layouts: banner rows above the headers, a decorative leading
//! column in the translation file and a named table in the export template.

use std::path::Path;

use rust_xlsxwriter::{Table, TableColumn, Workbook};

use crate::domain::shipments::EXPORT_COLUMNS;
use crate::shared::config::Config;

/// Purchases workbook: two banner rows, header on the third row.
pub fn write_purchases(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.write_string(0, 0, "COMPRAS OCI").unwrap();

    let headers = [
        "Item",
        "Cantidad",
        "Num_OC",
        "Num_invoice",
        "PaisOrigen",
        "Moneda",
        "PCU1",
        "Flete_US$",
        "OperadorLogistico",
        "Fecha_Invoice",
        "GrupoImportacion",
        "Num_DocTransporte",
        "RazonSocial_Proveedor",
        "Incoterm",
        "Forma_Pago",
        "Status_OCI",
        "Marca",
        "Codigo_Comercial",
    ];
    for (col, h) in headers.iter().enumerate() {
        ws.write_string(2, col as u16, *h).unwrap();
    }

    // Row matched by the reference table.
    let row1: [(&str, Option<f64>); 18] = [
        ("", Some(1.0)),
        ("", Some(3.0)),
        ("OC-100", None),
        ("INV-9", None),
        ("China", None),
        ("USD", None),
        ("", Some(10.0)),
        ("", Some(5.0)),
        ("DHL", None),
        ("2024-03-01", None),
        ("EMB-2024-01", None),
        ("AWB-777", None),
        ("Proveedor SA", None),
        ("FOB", None),
        ("30 dias", None),
        ("En transito", None),
        ("ACME", None),
        ("M1", None),
    ];
    for (col, (text, num)) in row1.iter().enumerate() {
        match num {
            Some(n) => ws.write_number(3, col as u16, *n).unwrap(),
            None => ws.write_string(3, col as u16, *text).unwrap(),
        };
    }

    // Row without a reference match and with junk numerics.
    ws.write_number(4, 0, 2.0).unwrap();
    ws.write_string(4, 1, "n/a").unwrap();
    ws.write_string(4, 2, "OC-101").unwrap();
    ws.write_string(4, 6, "abc").unwrap();
    ws.write_string(4, 10, "EMB-2024-02").unwrap();
    ws.write_string(4, 17, "M-SIN-TRADUCCION").unwrap();

    workbook.save(path).unwrap();
}

/// Translation workbook: sheet `Datos`, four banner rows, one leading
/// decorative column.
pub fn write_reference(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Datos").unwrap();
    ws.write_string(0, 0, "TRADUCCION DE EQUIPOS").unwrap();

    let headers = ["Modelo", "Codigo", "Descripcion", "Material", "Uso"];
    for (col, h) in headers.iter().enumerate() {
        ws.write_string(4, (col + 1) as u16, *h).unwrap();
    }
    // Duplicate Modelo: the first occurrence must win.
    for (row, cells) in [
        ["M1", "C1", "Equipo uno", "Acero", "Industrial"],
        ["M1", "C2", "Equipo uno bis", "Cobre", "Hogar"],
        ["M2", "C3", "Equipo dos", "Acero", "Industrial"],
    ]
    .iter()
    .enumerate()
    {
        for (col, value) in cells.iter().enumerate() {
            ws.write_string((row + 5) as u32, (col + 1) as u16, *value)
                .unwrap();
        }
    }
    workbook.save(path).unwrap();
}

/// Export template: summary labels at the top, the `Tabla24` table starting
/// at column B on row 8, with one placeholder data row.
pub fn write_template(path: &Path) {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Validacion").unwrap();

    ws.write_string(1, 2, "TRANSPORTISTA:").unwrap();
    ws.write_string(3, 2, "Nº EMBARQUE:").unwrap();
    ws.write_string(4, 2, "AIR WAYBILL:").unwrap();
    ws.write_string(1, 9, "PROVEEDOR:").unwrap();
    ws.write_string(2, 9, "INCOTERM:").unwrap();
    ws.write_string(3, 9, "FORMA DE PAGO:").unwrap();
    ws.write_string(4, 9, "ESTADO:").unwrap();
    ws.write_string(5, 9, "MARCA:").unwrap();

    let columns: Vec<TableColumn> = EXPORT_COLUMNS
        .iter()
        .map(|h| TableColumn::new().set_header(*h))
        .collect();
    let table = Table::new().set_name("Tabla24").set_columns(&columns);
    ws.write_string(8, 1, "placeholder").unwrap();
    ws.write_number(8, 2, 0.0).unwrap();
    ws.add_table(7, 1, 8, 15, &table).unwrap();

    workbook.save(path).unwrap();
}

pub fn test_config(dir: &Path) -> Config {
    let toml = format!(
        r#"
[server]
bind = "127.0.0.1:0"

[graph]
site_host = "example.sharepoint.com"
site_path = "/sites/test"
drive_hint = "Documentos"

[files]
download_dir = "{}"
purchases = "002_Compras_OCI.xlsx"
reference = "Traduccion-Equipos.xlsx"
template = "Plantilla.xlsx"
sources = []
"#,
        dir.display()
    );
    toml::from_str(&toml).unwrap()
}

/// Writes both data sources into the configured download directory.
pub fn setup_sources(dir: &Path) -> Config {
    let config = test_config(dir);
    write_purchases(&config.files.purchases_path());
    write_reference(&config.files.reference_path());
    config
}
