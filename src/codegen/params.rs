//! Parameter extraction and classification
//!
//! Converts a raw element property plus the builder's documented default
//! into a classified parameter value.

use crate::error::{Plan2DslError, Result};
use crate::models::PropertyValue;
use regex::Regex;
use std::sync::OnceLock;

/// Tolerance used when comparing float-valued parameters against defaults
const FLOAT_DEFAULT_TOLERANCE: f64 = 1e-9;

/// Declared type of a builder parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
}

impl ParamType {
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Str => "string",
            ParamType::Int => "integer",
            ParamType::Float => "float",
            ParamType::Bool => "boolean",
        }
    }
}

/// A parsed literal value carried into a generated call
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl LiteralValue {
    /// Equality under the declared comparison rules: floats compare with a
    /// small tolerance, everything else exactly
    pub fn equals_default(&self, default: &LiteralValue) -> bool {
        match (self, default) {
            (LiteralValue::Float(a), LiteralValue::Float(b)) => {
                (a - b).abs() <= FLOAT_DEFAULT_TOLERANCE
            }
            (a, b) => a == b,
        }
    }
}

/// Specification of one builder parameter
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Property name the parameter is read from
    pub property: &'static str,

    /// Declared type the raw value must parse into
    pub param_type: ParamType,

    /// Documented default; `None` marks the parameter as required
    pub default: Option<LiteralValue>,
}

impl ParamSpec {
    pub fn required(property: &'static str, param_type: ParamType) -> Self {
        Self {
            property,
            param_type,
            default: None,
        }
    }

    pub fn with_default(
        property: &'static str,
        param_type: ParamType,
        default: LiteralValue,
    ) -> Self {
        Self {
            property,
            param_type,
            default: Some(default),
        }
    }
}

/// Classified result of extracting one parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A plain literal the DSL can carry verbatim
    Literal(LiteralValue),

    /// An unresolved template expression; never evaluated, always fatal
    UnsupportedExpression(String),

    /// The value equals the builder's documented default
    EqualsDefault,
}

fn expression_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches the ${...} placeholder syntax used by the authoring tool for
    // variables and functions, e.g. ${BASE_URL} or ${__Random(1,10)}.
    RE.get_or_init(|| Regex::new(r"\$\{[^}]*\}").expect("invalid expression marker pattern"))
}

/// Check whether a raw textual value contains unresolved template syntax
pub fn contains_expression(text: &str) -> bool {
    expression_marker().is_match(text)
}

/// Extract and classify one parameter
///
/// `raw` is the property value as authored (absent properties classify as
/// `EqualsDefault`). Fails only when the raw value cannot be parsed into the
/// declared type.
pub fn extract(raw: Option<&PropertyValue>, spec: &ParamSpec, path: &str) -> Result<ParamValue> {
    let Some(raw) = raw else {
        return match &spec.default {
            Some(_) => Ok(ParamValue::EqualsDefault),
            None => Err(Plan2DslError::MalformedProperty {
                path: path.to_string(),
                property: spec.property.to_string(),
                reason: "required property is missing".to_string(),
            }),
        };
    };

    let text = raw.as_text();
    if contains_expression(&text) {
        return Ok(ParamValue::UnsupportedExpression(text));
    }

    let literal = parse_literal(raw, spec, path)?;

    match &spec.default {
        Some(default) if literal.equals_default(default) => Ok(ParamValue::EqualsDefault),
        _ => Ok(ParamValue::Literal(literal)),
    }
}

fn parse_literal(raw: &PropertyValue, spec: &ParamSpec, path: &str) -> Result<LiteralValue> {
    let malformed = |reason: String| Plan2DslError::MalformedProperty {
        path: path.to_string(),
        property: spec.property.to_string(),
        reason,
    };

    match spec.param_type {
        // String parameters accept any scalar; the authoring tool stores
        // everything as text anyway.
        ParamType::Str => Ok(LiteralValue::Str(raw.as_text())),
        ParamType::Int => match raw {
            PropertyValue::Int(i) => Ok(LiteralValue::Int(*i)),
            PropertyValue::Str(s) => s
                .trim()
                .parse::<i64>()
                .map(LiteralValue::Int)
                .map_err(|_| malformed(format!("cannot parse {s:?} as an integer"))),
            other => Err(malformed(format!(
                "expected an integer, found {:?}",
                other.as_text()
            ))),
        },
        ParamType::Float => match raw {
            PropertyValue::Float(f) => Ok(LiteralValue::Float(*f)),
            PropertyValue::Int(i) => Ok(LiteralValue::Float(*i as f64)),
            PropertyValue::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(LiteralValue::Float)
                .map_err(|_| malformed(format!("cannot parse {s:?} as a float"))),
            other => Err(malformed(format!(
                "expected a float, found {:?}",
                other.as_text()
            ))),
        },
        ParamType::Bool => match raw {
            PropertyValue::Bool(b) => Ok(LiteralValue::Bool(*b)),
            PropertyValue::Str(s) => match s.trim() {
                "true" => Ok(LiteralValue::Bool(true)),
                "false" => Ok(LiteralValue::Bool(false)),
                other => Err(malformed(format!("cannot parse {other:?} as a boolean"))),
            },
            other => Err(malformed(format!(
                "expected a boolean, found {:?}",
                other.as_text()
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_spec(default: i64) -> ParamSpec {
        ParamSpec::with_default("delay_ms", ParamType::Int, LiteralValue::Int(default))
    }

    #[test]
    fn test_extract_literal_int() {
        let raw = PropertyValue::Int(1500);
        let value = extract(Some(&raw), &int_spec(0), "/constant_timer").unwrap();
        assert_eq!(value, ParamValue::Literal(LiteralValue::Int(1500)));
    }

    #[test]
    fn test_extract_parses_numeric_strings() {
        let raw = PropertyValue::Str("1500".to_string());
        let value = extract(Some(&raw), &int_spec(0), "/constant_timer").unwrap();
        assert_eq!(value, ParamValue::Literal(LiteralValue::Int(1500)));
    }

    #[test]
    fn test_extract_default_valued_property() {
        let raw = PropertyValue::Int(0);
        let value = extract(Some(&raw), &int_spec(0), "/constant_timer").unwrap();
        assert_eq!(value, ParamValue::EqualsDefault);
    }

    #[test]
    fn test_extract_absent_property_equals_default() {
        let value = extract(None, &int_spec(0), "/constant_timer").unwrap();
        assert_eq!(value, ParamValue::EqualsDefault);
    }

    #[test]
    fn test_extract_absent_required_property_fails() {
        let spec = ParamSpec::required("url", ParamType::Str);
        let err = extract(None, &spec, "/http_sampler").unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_extract_template_expression_is_unsupported() {
        let raw = PropertyValue::Str("${BASE_URL}/login".to_string());
        let spec = ParamSpec::required("url", ParamType::Str);
        let value = extract(Some(&raw), &spec, "/http_sampler").unwrap();
        assert_eq!(
            value,
            ParamValue::UnsupportedExpression("${BASE_URL}/login".to_string())
        );
    }

    #[test]
    fn test_extract_function_expression_is_unsupported() {
        let raw = PropertyValue::Str("${__Random(1,10)}".to_string());
        let value = extract(Some(&raw), &int_spec(0), "/constant_timer").unwrap();
        assert!(matches!(value, ParamValue::UnsupportedExpression(_)));
    }

    #[test]
    fn test_extract_malformed_int_fails() {
        let raw = PropertyValue::Str("soon".to_string());
        let err = extract(Some(&raw), &int_spec(0), "/constant_timer").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("delay_ms"), "unexpected message: {message}");
        assert!(
            message.contains("/constant_timer"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn test_float_default_comparison_uses_tolerance() {
        let spec = ParamSpec::with_default("factor", ParamType::Float, LiteralValue::Float(1.0));
        let raw = PropertyValue::Float(1.0 + 1e-12);
        let value = extract(Some(&raw), &spec, "/throughput_timer").unwrap();
        assert_eq!(value, ParamValue::EqualsDefault);
    }

    #[test]
    fn test_bool_parsing() {
        let spec =
            ParamSpec::with_default("ignore_status", ParamType::Bool, LiteralValue::Bool(false));
        let raw = PropertyValue::Str("true".to_string());
        let value = extract(Some(&raw), &spec, "/response_assertion").unwrap();
        assert_eq!(value, ParamValue::Literal(LiteralValue::Bool(true)));
    }
}
