use super::endpoint::Parameter;
use serde_json::{Map, Value};

/// Assemble the example request body from the ordered body-parameter list.
///
/// Dotted names nest: `user.name` becomes `{"user": {"name": ...}}`, a `*`
/// segment wraps the remainder in a single-element array, so `tags.*` is
/// `{"tags": [...]}` and `items.*.id` is `{"items": [{"id": ...}]}`.
pub fn body_parameters_to_json(parameters: &[Parameter]) -> Value {
    let mut root = Value::Object(Map::new());
    for parameter in parameters {
        let segments: Vec<&str> = parameter.name.split('.').collect();
        insert(&mut root, &segments, parameter.example.clone());
    }
    root
}

fn insert(target: &mut Value, segments: &[&str], value: Value) {
    match segments.split_first() {
        None => *target = value,
        Some((&"*", rest)) => {
            if !matches!(target, Value::Array(_)) {
                *target = Value::Array(vec![Value::Object(Map::new())]);
            }
            if let Value::Array(items) = target {
                if items.is_empty() {
                    items.push(Value::Object(Map::new()));
                }
                if rest.is_empty() {
                    items[0] = value;
                } else {
                    insert(&mut items[0], rest, value);
                }
            }
        }
        Some((segment, rest)) => {
            if !matches!(target, Value::Object(_)) {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(map) = target {
                let entry = map
                    .entry(segment.to_string())
                    .or_insert(Value::Object(Map::new()));
                insert(entry, rest, value);
            }
        }
    }
}
