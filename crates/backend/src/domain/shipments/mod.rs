//! Business rules for the purchase/translation join: fixed sheet layouts,
//! the column sets each path projects, and the display renames.

pub mod dedup;
pub mod filter;
pub mod join;

/// Purchases workbook: two banner rows, header on the third.
pub const PURCHASES_SKIP_ROWS: usize = 2;

/// Translation workbook: sheet `Datos`, four banner rows, one decorative
/// leading column.
pub const REFERENCE_SHEET: &str = "Datos";
pub const REFERENCE_SKIP_ROWS: usize = 4;
pub const REFERENCE_DROP_COLS: usize = 1;

/// Business key shared by both tables after deduplication.
pub const JOIN_KEY: &str = "Codigo_Comercial";

pub const COL_MODELO: &str = "Modelo";
pub const COL_CODIGO: &str = "Codigo";

/// Read-path projection, in response order, applied after the derived
/// monetary fields are computed and before the display renames.
pub const READ_COLUMNS: [&str; 24] = [
    "Item",
    "Cantidad",
    "Num_OC",
    "Num_invoice",
    "Codigo",
    "Modelo",
    "Descripcion",
    "Material",
    "Uso",
    "PaisOrigen",
    "Moneda",
    "PCU1",
    "Sub Total",
    "Flete_US$",
    "Precio Total",
    "OperadorLogistico",
    "Fecha_Invoice",
    "GrupoImportacion",
    "Num_DocTransporte",
    "RazonSocial_Proveedor",
    "Incoterm",
    "Forma_Pago",
    "Status_OCI",
    "Marca",
];

/// Business name → display name. Unlisted columns keep their original name.
pub const DISPLAY_RENAMES: [(&str, &str); 14] = [
    ("Cantidad", "Cant"),
    ("Num_OC", "Nº O.COMPRA"),
    ("Num_invoice", "FACTURA"),
    ("PaisOrigen", "País De Origen"),
    ("PCU1", "Precio Unitario"),
    ("Flete_US$", "Flete"),
    ("OperadorLogistico", "TRANSPORTISTA"),
    ("Fecha_Invoice", "FECHA FACTURA"),
    ("GrupoImportacion", "Nº EMBARQUE"),
    ("Num_DocTransporte", "Air Waybill"),
    ("RazonSocial_Proveedor", "PROVEEDOR"),
    ("Incoterm", "INCOTERM"),
    ("Forma_Pago", "FORMA DE PAGO"),
    ("Status_OCI", "ESTADO"),
];

/// Export projection (display names), column-aligned to the template table.
pub const EXPORT_COLUMNS: [&str; 15] = [
    "Item",
    "Cant",
    "Nº O.COMPRA",
    "FACTURA",
    "Codigo",
    "Modelo",
    "Descripcion",
    "Material",
    "Uso",
    "País De Origen",
    "Moneda",
    "Precio Unitario",
    "Sub Total",
    "Flete",
    "Precio Total",
];

/// Filter target per query mode (display names).
pub const FILTER_EMBARQUE: &str = "Nº EMBARQUE";
pub const FILTER_WAYBILL: &str = "Air Waybill";
