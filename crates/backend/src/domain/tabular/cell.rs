use chrono::NaiveDateTime;
use serde_json::Value;

/// One cell of a source table. Values come from calamine and keep just
/// enough typing for the pipeline: numeric coercion, display text and a
/// join-key normal form.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl From<&calamine::Data> for CellValue {
    fn from(data: &calamine::Data) -> Self {
        use calamine::Data;
        match data {
            Data::Empty => CellValue::Null,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ndt) => CellValue::DateTime(ndt),
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            // Cell errors (#N/A, #DIV/0!, ...) carry no usable value.
            Data::Error(_) => CellValue::Null,
        }
    }
}

impl CellValue {
    /// Display string, `None` for null cells. Integral floats render without
    /// a decimal part so that codes read from numeric cells stay usable as
    /// identifiers ("12345", not "12345.0").
    pub fn display(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    pub fn display_or_empty(&self) -> String {
        self.display().unwrap_or_default()
    }

    /// Normal form used to match join keys across the two tables. Null never
    /// joins with anything.
    pub fn join_key(&self) -> Option<String> {
        self.display()
    }

    /// Numeric coercion with the pipeline's defined fallback: anything that
    /// is not (or does not parse as) a number becomes 0.
    pub fn to_f64_or_zero(&self) -> f64 {
        match self {
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// JSON projection for the read path. Non-finite numbers become null,
    /// date-times become strings.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
