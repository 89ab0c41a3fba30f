// Numeric sanitization at the calculator boundary.
//
// Operator input arrives as loosely-typed JSON: numbers, numeric strings,
// nulls, empty strings or outright garbage such as "NaN". None of that is
// ever escalated; anything that does not parse as a finite decimal reads
// as zero, and so does any magnitude above MAX_INPUT. Monetary values are
// floored at zero and percentages clamped into [0, 100].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest magnitude accepted for any quantity, rate, charge or payment
/// (10^12). Two such values multiply well inside `Decimal`'s range.
pub const MAX_INPUT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Parse a JSON value into a decimal, returning None for anything
/// non-numeric or out of range
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    let parsed = match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    };
    parsed.filter(|d| within_input_range(*d))
}

pub fn within_input_range(value: Decimal) -> bool {
    value.abs() <= MAX_INPUT
}

fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Floor a monetary value at zero
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamp a percentage into [0, 100]
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(HUNDRED)
}

/// Serde adapter: any numeric-looking input becomes a decimal, everything else zero
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_decimal).unwrap_or(Decimal::ZERO))
}

/// Serde adapter: keeps "absent" distinct from zero; unparseable input is absent
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_decimal))
}

/// Recursively drop null members from objects.
///
/// The document store rejects null values, so records are passed through
/// this before every write. Nulls inside arrays are removed as well.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}
