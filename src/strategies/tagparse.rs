//! Shared grammar for `@urlParam` / `@queryParam` / `@bodyParam` tag values:
//! `name [type] [required] [description ... [Example: value]]`.

use crate::errors::StrategyError;
use crate::model::ParamType;
use serde_json::Value;

#[derive(Debug, Clone)]
pub(crate) struct TagParam {
    pub name: String,
    pub ty: ParamType,
    /// Whether the tag spelled out a type (placeholder-derived parameters
    /// keep their inferred type otherwise).
    pub explicit_type: bool,
    pub required: bool,
    pub description: String,
    pub example: Option<Value>,
}

pub(crate) fn parse_param_tag(tag: &'static str, value: &str) -> Result<TagParam, StrategyError> {
    let (value, example_text) = split_example(value);
    let mut tokens = value.split_whitespace().peekable();

    let name = tokens
        .next()
        .ok_or(StrategyError::MalformedTag {
            tag,
            reason: "missing parameter name".to_string(),
        })?
        .to_string();

    let mut ty = ParamType::String;
    let mut explicit_type = false;
    if let Some(parsed) = tokens.peek().and_then(|t| ParamType::from_token(t)) {
        ty = parsed;
        explicit_type = true;
        tokens.next();
    }

    let mut required = false;
    if tokens.peek().map(|t| t.eq_ignore_ascii_case("required")) == Some(true) {
        required = true;
        tokens.next();
    }

    let description = tokens.collect::<Vec<_>>().join(" ");
    let example = example_text.map(|raw| typed_example(ty, raw));

    Ok(TagParam {
        name,
        ty,
        explicit_type,
        required,
        description,
        example,
    })
}

/// Split a trailing `Example: ...` marker off the tag value.
fn split_example(value: &str) -> (&str, Option<&str>) {
    match value.rfind("Example:") {
        Some(at) => {
            let (head, tail) = value.split_at(at);
            (head, Some(tail["Example:".len()..].trim()))
        }
        None => (value, None),
    }
}

/// Interpret the literal example per the declared type, falling back to the
/// raw string when it does not parse.
pub(crate) fn typed_example(ty: ParamType, raw: &str) -> Value {
    match ty {
        ParamType::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        ParamType::Number => raw
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        ParamType::Boolean => match raw {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            other => Value::String(other.to_string()),
        },
        ParamType::Object | ParamType::Array => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        ParamType::String => Value::String(raw.to_string()),
    }
}
