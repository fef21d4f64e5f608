use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `GET /`: liveness plus whether the source files are usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub mensaje: String,
    pub archivos_inicializados: bool,
}

/// Which identifier column a query filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Embarque,
    Waybill,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Embarque => "embarque",
            QueryMode::Waybill => "waybill",
        }
    }
}

/// Query parameters shared by `GET /data` and `POST /export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentQuery {
    #[serde(rename = "type")]
    pub mode: QueryMode,
    pub value: String,
}

/// Header-level metadata extracted from the first row of a filtered result.
/// Missing source values become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryInfo {
    #[serde(rename = "TRANSPORTISTA")]
    pub transportista: String,
    #[serde(rename = "FECHA FACTURA")]
    pub fecha_factura: String,
    #[serde(rename = "Nº EMBARQUE")]
    pub num_embarque: String,
    #[serde(rename = "Air Waybill")]
    pub air_waybill: String,
    #[serde(rename = "MARCA")]
    pub marca: String,
    #[serde(rename = "PROVEEDOR")]
    pub proveedor: String,
    #[serde(rename = "INCOTERM")]
    pub incoterm: String,
    #[serde(rename = "FORMA DE PAGO")]
    pub forma_pago: String,
    #[serde(rename = "ESTADO")]
    pub estado: String,
}

/// Response of `GET /data`. An empty filter result is not an error: it comes
/// back as an empty `data` array, a null `info` and a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Vec<Map<String, Value>>,
    pub info: Option<SummaryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_mode_deserializes_lowercase() {
        let mode: QueryMode = serde_json::from_str("\"embarque\"").unwrap();
        assert_eq!(mode, QueryMode::Embarque);
        let mode: QueryMode = serde_json::from_str("\"waybill\"").unwrap();
        assert_eq!(mode, QueryMode::Waybill);
        assert!(serde_json::from_str::<QueryMode>("\"otro\"").is_err());
    }

    #[test]
    fn summary_uses_display_column_names() {
        let info = SummaryInfo {
            transportista: "DHL".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["TRANSPORTISTA"], "DHL");
        assert_eq!(json["Nº EMBARQUE"], "");
        assert_eq!(json["FORMA DE PAGO"], "");
    }

    #[test]
    fn empty_data_response_keeps_null_info_and_message() {
        let resp = DataResponse {
            data: vec![],
            info: None,
            mensaje: Some("No se encontraron resultados".to_string()),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["info"].is_null());
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }
}
