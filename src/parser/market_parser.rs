// CoinGecko `/coins/markets` response parsing
use crate::model::{AssetRecord, FieldValue, ParserError};
use crate::normalizer::normalize_record;
use serde_json::Value;

pub trait Parser {
    fn parse(&self, body: &str) -> Result<Vec<AssetRecord>, ParserError>;
}

pub struct MarketParser;

impl MarketParser {
    pub fn new() -> Self {
        Self
    }

    /// Decodes an already-parsed JSON document. Record order and field order follow upstream.
    pub fn parse_value(&self, document: Value) -> Result<Vec<AssetRecord>, ParserError> {
        let items = match document {
            Value::Array(items) => items,
            Value::Object(_) => return Err(ParserError::NotAnArray("an object")),
            Value::String(_) => return Err(ParserError::NotAnArray("a string")),
            Value::Number(_) => return Err(ParserError::NotAnArray("a number")),
            Value::Bool(_) => return Err(ParserError::NotAnArray("a boolean")),
            Value::Null => return Err(ParserError::NotAnArray("null")),
        };

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => {
                    let fields = map
                        .into_iter()
                        .map(|(key, value)| (key, FieldValue::from_json(value)))
                        .collect();
                    Ok(normalize_record(fields))
                }
                _ => Err(ParserError::NotAnObject(idx)),
            })
            .collect()
    }
}

impl Parser for MarketParser {
    fn parse(&self, body: &str) -> Result<Vec<AssetRecord>, ParserError> {
        let document: Value = serde_json::from_str(body)?;
        self.parse_value(document)
    }
}
