// Core structs: FieldValue, AssetRecord, error types
use std::fmt;
use thiserror::Error;

/// One upstream JSON value, reduced to the shapes the exporter cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Objects and arrays. Exported as their compact JSON text.
    Nested(serde_json::Value),
}

impl FieldValue {
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            // integers past 2^53 lose precision; the sheet stores f64 anyway
            serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Null),
            serde_json::Value::String(s) => FieldValue::Text(s),
            nested => FieldValue::Nested(nested),
        }
    }

    /// Textual form used for cell text and width computation.
    /// `None` for values that produce an empty cell.
    pub fn render(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(if *b { "TRUE".into() } else { "FALSE".into() }),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) if s.is_empty() => None,
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Nested(v) => Some(v.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// One tracked asset for the current cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    /// Coerced 24h change; `None` when upstream sent something non-numeric.
    pub price_change_percentage_24h: Option<f64>,
    /// Every upstream field in upstream order, raw.
    pub fields: Vec<(String, FieldValue)>,
}

impl AssetRecord {
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl fmt::Display for AssetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol.to_uppercase())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("rate limit exceeded (status code 429)")]
    RateLimited,

    #[error("unable to fetch data (status code {0})")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(#[from] ParserError),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of assets, got {0}")]
    NotAnArray(&'static str),

    #[error("asset #{0} is not a JSON object")]
    NotAnObject(usize),
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("no records to analyze")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("sheet too large: {0}")]
    OutOfRange(String),
}
