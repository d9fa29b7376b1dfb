use calamine::{Data, DataRef, ExcelDateTime};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Largest integer an f64 holds exactly (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

//==============================================================================
// Cell values
//==============================================================================

/// A single scalar read from a worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// Integer cell (xls, xlsb, ods), kept exact beyond 2^53
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Empty,
}

impl CellValue {
    /// Absent cell or zero-length text
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Empty, numeric zero, or `false`
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Integer(i) => *i == 0,
            CellValue::Number(n) => *n == 0.0,
            CellValue::Boolean(b) => !*b,
            other => other.is_empty(),
        }
    }

    /// Text used when this cell names a header field
    ///
    /// Empty cells name the field `""` and booleans read `true`/`false`.
    pub fn as_header(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Timestamp(ts) => format_timestamp(ts),
            CellValue::Empty => String::new(),
        }
    }

    /// JSON form used inside a serialized record
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Integer(i) => Value::from(*i),
            CellValue::Number(n) => match as_exact_integer(*n) {
                Some(i) => Value::from(i),
                // NaN and infinities have no JSON form
                None => serde_json::Number::from_f64(*n)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            },
            CellValue::Boolean(b) => Value::Bool(*b),
            CellValue::Timestamp(ts) => Value::String(format_timestamp(ts)),
            CellValue::Empty => Value::Null,
        }
    }

    fn from_excel_datetime(dt: &ExcelDateTime) -> Self {
        if dt.is_duration() {
            return CellValue::Number(dt.as_f64());
        }
        match dt.as_datetime() {
            Some(ts) => CellValue::Timestamp(ts),
            None => CellValue::Number(dt.as_f64()),
        }
    }

    fn from_iso(text: &str) -> Self {
        parse_iso_timestamp(text)
            .map(CellValue::Timestamp)
            .unwrap_or_else(|| CellValue::Text(text.to_string()))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_header())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&Data> for CellValue {
    #[allow(unreachable_patterns)]
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Integer(*i),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) => CellValue::from_excel_datetime(dt),
            Data::DateTimeIso(s) => CellValue::from_iso(s),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<&DataRef<'_>> for CellValue {
    #[allow(unreachable_patterns)]
    fn from(cell: &DataRef<'_>) -> Self {
        match cell {
            DataRef::Empty => CellValue::Empty,
            DataRef::String(s) => CellValue::Text(s.clone()),
            DataRef::SharedString(s) => CellValue::Text((*s).to_string()),
            DataRef::Int(i) => CellValue::Integer(*i),
            DataRef::Float(f) => CellValue::Number(*f),
            DataRef::Bool(b) => CellValue::Boolean(*b),
            DataRef::DateTime(dt) => CellValue::from_excel_datetime(dt),
            DataRef::DateTimeIso(s) => CellValue::from_iso(s),
            DataRef::DurationIso(s) => CellValue::Text(s.clone()),
            DataRef::Error(e) => CellValue::Text(e.to_string()),
            _ => CellValue::Empty,
        }
    }
}

fn as_exact_integer(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

fn format_number(n: f64) -> String {
    match as_exact_integer(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}

fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

fn parse_iso_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

//==============================================================================
// Record filtering
//==============================================================================

/// Which record fields are dropped before serialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldFilter {
    /// Drop every falsy value: empty cells, empty text, `0` and `false`
    #[default]
    Falsy,
    /// Drop only empty cells and empty text
    EmptyOnly,
}

impl FieldFilter {
    pub fn keeps(&self, value: &CellValue) -> bool {
        match self {
            FieldFilter::Falsy => !value.is_falsy(),
            FieldFilter::EmptyOnly => !value.is_empty(),
        }
    }
}

//==============================================================================
// Documents
//==============================================================================

/// Text payload handed back to the ingestion pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page_content.is_empty()
    }
}
