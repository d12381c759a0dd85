//! Canonical JSON encoding used to compare result rows.
//!
//! Both the engine's rows and the author's expected literal are turned into the
//! same JSON value model and serialized compactly with sorted object keys, so
//! whitespace and key order never affect a comparison.

use crate::db::{ResultSet, Value, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Number, Value as Json};
use std::collections::BTreeMap;

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Encodes engine rows as a canonical JSON array of objects.
pub fn encode_rows(result: &ResultSet) -> String {
    let rows: Vec<Json> = result
        .named_rows()
        .map(|row| {
            // Later duplicates of a column name overwrite earlier ones
            let fields: BTreeMap<&str, Json> = row
                .into_iter()
                .map(|(name, value)| (name, value_to_json(value)))
                .collect();
            Json::Object(
                fields
                    .into_iter()
                    .map(|(name, json)| (name.to_string(), json))
                    .collect(),
            )
        })
        .collect();
    Json::Array(rows).to_string()
}

/// Parses an expected-rows literal and re-encodes it canonically.
///
/// The literal must be a JSON array of objects. A bare `null` stands for no
/// rows and encodes like an empty result.
pub fn encode_expected(text: &str) -> Result<String, serde_json::Error> {
    let rows: Option<Vec<Map<String, Json>>> = serde_json::from_str(text)?;
    let rows: Vec<Json> = rows
        .unwrap_or_default()
        .into_iter()
        .map(|row| normalize(Json::Object(row)))
        .collect();
    Ok(Json::Array(rows).to_string())
}

/// Canonicalizes an arbitrary JSON document.
///
/// Applying it to its own output returns that output unchanged.
pub fn canonicalize(text: &str) -> Result<String, serde_json::Error> {
    let json: Json = serde_json::from_str(text)?;
    Ok(normalize(json).to_string())
}

/// Converts an engine value to its JSON form.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::from(*i),
        Value::Float(f) => float_to_json(*f),
        Value::Text(s) => Json::String(s.clone()),
        Value::Bytes(b) => Json::String(STANDARD.encode(b)),
        Value::Date(d) => Json::String(d.format(DATE_FORMAT).to_string()),
        Value::Time(t) => Json::String(t.format(TIME_FORMAT).to_string()),
        Value::DateTime(dt) => Json::String(dt.format(DATETIME_FORMAT).to_string()),
    }
}

/// Rewrites numbers to their canonical form and rebuilds objects in key order.
fn normalize(json: Json) -> Json {
    match json {
        Json::Number(n) => normalize_number(n),
        Json::Array(items) => Json::Array(items.into_iter().map(normalize).collect()),
        Json::Object(map) => {
            let sorted: BTreeMap<String, Json> =
                map.into_iter().map(|(k, v)| (k, normalize(v))).collect();
            Json::Object(sorted.into_iter().collect())
        }
        other => other,
    }
}

fn normalize_number(n: Number) -> Json {
    if n.is_i64() || n.is_u64() {
        return Json::Number(n);
    }
    match n.as_f64() {
        Some(f) => float_to_json(f),
        None => Json::Number(n),
    }
}

/// Integral floats within the exact range encode as integers, so `1` and `1.0`
/// compare equal. Non-finite floats have no JSON form and encode as null.
fn float_to_json(f: f64) -> Json {
    if !f.is_finite() {
        return Json::Null;
    }
    if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER {
        return Json::from(f as i64);
    }
    Number::from_f64(f).map(Json::Number).unwrap_or(Json::Null)
}
