//! String-to-value coercion, one function per parameter kind.

use crate::registry::ParameterKind;
use crate::value::Value;

/// Parses `raw` as `kind`, returning a short reason on failure.
pub(crate) fn coerce(kind: ParameterKind, raw: &str) -> Result<Value, String> {
    match kind {
        ParameterKind::Bool => parse_bool(raw).map(Value::Bool),
        ParameterKind::Int => parse_int(raw).map(Value::Int),
        ParameterKind::UInt => parse_uint(raw).map(Value::UInt),
        ParameterKind::Float => parse_float(raw).map(Value::Float),
        ParameterKind::String => Ok(Value::Text(raw.to_owned())),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(String::from("expected one of 1, t, true, 0, f, false")),
    }
}

fn parse_int(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>().map_err(|error| error.to_string())
}

// `u64::from_str` tolerates a leading `+`; unsigned values take no sign.
fn parse_uint(raw: &str) -> Result<u64, String> {
    if raw.starts_with('+') {
        return Err(String::from("unsigned values take no sign"));
    }
    raw.parse::<u64>().map_err(|error| error.to_string())
}

// Finite literals that overflow to infinity are out of range rather than
// silently becoming `inf`.
fn parse_float(raw: &str) -> Result<f64, String> {
    let value = raw.parse::<f64>().map_err(|error| error.to_string())?;
    if value.is_infinite() && !spells_infinity(raw) {
        return Err(String::from("value out of range"));
    }
    Ok(value)
}

fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
