use crate::model::{AssetRecord, FieldValue};

pub const SYMBOL: &str = "symbol";
pub const NAME: &str = "name";
pub const CURRENT_PRICE: &str = "current_price";
pub const MARKET_CAP: &str = "market_cap";
pub const PRICE_CHANGE_24H: &str = "price_change_percentage_24h";

/// Lenient numeric coercion: numbers pass through, numeric text is parsed,
/// everything else (and NaN/inf) is missing.
pub fn coerce_numeric(value: &FieldValue) -> Option<f64> {
    let n = match value {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Builds a record from raw upstream fields, filling the typed columns the analyzer reads.
pub fn normalize_record(fields: Vec<(String, FieldValue)>) -> AssetRecord {
    let text = |key: &str| match lookup(&fields, key) {
        Some(FieldValue::Text(s)) => s.clone(),
        Some(other) => other.render().unwrap_or_default(),
        None => String::new(),
    };
    let number = |key: &str| lookup(&fields, key).and_then(FieldValue::as_f64);

    AssetRecord {
        symbol: text(SYMBOL),
        name: text(NAME),
        current_price: number(CURRENT_PRICE),
        market_cap: number(MARKET_CAP),
        price_change_percentage_24h: lookup(&fields, PRICE_CHANGE_24H).and_then(coerce_numeric),
        fields,
    }
}

fn lookup<'a>(fields: &'a [(String, FieldValue)], key: &str) -> Option<&'a FieldValue> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(chg: FieldValue) -> Vec<(String, FieldValue)> {
        vec![
            ("symbol".into(), FieldValue::Text("btc".into())),
            ("name".into(), FieldValue::Text("Bitcoin".into())),
            ("current_price".into(), FieldValue::Number(60000.0)),
            ("market_cap".into(), FieldValue::Number(1.2e12)),
            ("price_change_percentage_24h".into(), chg),
        ]
    }

    #[test]
    fn coerces_numeric_text() {
        assert_eq!(coerce_numeric(&FieldValue::Text("2.5".into())), Some(2.5));
        assert_eq!(coerce_numeric(&FieldValue::Text(" -1.0 ".into())), Some(-1.0));
        assert_eq!(coerce_numeric(&FieldValue::Number(3.0)), Some(3.0));
    }

    #[test]
    fn coercion_failures_are_missing_not_zero() {
        assert_eq!(coerce_numeric(&FieldValue::Text("bad".into())), None);
        assert_eq!(coerce_numeric(&FieldValue::Text("NaN".into())), None);
        assert_eq!(coerce_numeric(&FieldValue::Null), None);
        assert_eq!(coerce_numeric(&FieldValue::Bool(true)), None);
    }

    #[test]
    fn normalize_keeps_raw_fields_and_fills_typed_ones() {
        let record = normalize_record(fields(FieldValue::Text("2.5".into())));
        assert_eq!(record.symbol, "btc");
        assert_eq!(record.name, "Bitcoin");
        assert_eq!(record.current_price, Some(60000.0));
        assert_eq!(record.market_cap, Some(1.2e12));
        assert_eq!(record.price_change_percentage_24h, Some(2.5));
        // raw value survives for export
        assert_eq!(record.field(PRICE_CHANGE_24H), Some(&FieldValue::Text("2.5".into())));
        assert_eq!(record.fields.len(), 5);
    }

    #[test]
    fn missing_fields_leave_typed_columns_empty() {
        let record = normalize_record(vec![("id".into(), FieldValue::Text("x".into()))]);
        assert_eq!(record.name, "");
        assert_eq!(record.current_price, None);
        assert_eq!(record.market_cap, None);
        assert_eq!(record.price_change_percentage_24h, None);
    }
}
