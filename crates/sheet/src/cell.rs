use crate::sparse::CellPayload;
use std::fmt;

/// A resolved value in a dense row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// The empty-string fill used outside the data region.
    #[must_use]
    pub fn blank() -> Self {
        CellValue::String(String::new())
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Resolve the payload of one sparse cell.
    ///
    /// Text is kept verbatim. Numbers are stored as floats in Tilia files, so
    /// integral numbers collapse to [`CellValue::Int`] and print without a
    /// decimal point. A missing or unparseable payload is logged and resolves
    /// to [`CellValue::Null`].
    #[must_use]
    pub fn resolve(payload: &CellPayload) -> CellValue {
        match payload {
            CellPayload::Text(text) => CellValue::String(text.clone()),
            CellPayload::Number(raw) => match raw.trim().parse::<f64>() {
                Ok(number) => CellValue::from_number(number),
                Err(e) => {
                    tracing::warn!("Unparseable numeric cell {raw:?}: {e}");
                    CellValue::Null
                }
            },
            CellPayload::Missing => {
                tracing::warn!("Unknown cell: neither text nor value present");
                CellValue::Null
            }
        }
    }

    /// Collapse a float to an integer when it has no fractional part.
    #[must_use]
    pub fn from_number(number: f64) -> CellValue {
        // i64::MAX is not representable as f64; stay strictly below 2^63.
        const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
        if number.is_finite() && number.fract() == 0.0 && number.abs() < I64_BOUND {
            CellValue::Int(number as i64)
        } else {
            CellValue::Float(number)
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write_float(f, *fl),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

/// Shortest round-trip digits, switching to `1e-05` style exponents below
/// `1e-4` and from `1e16` upwards.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if value != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    } else {
        write!(f, "{value}")
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}
