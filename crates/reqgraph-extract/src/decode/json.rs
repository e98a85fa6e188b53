use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::graph::{Graph, Link, Node, NodeKind};

type Object = Map<String, Value>;

/// Decode a scanned JSON block into a graph.
///
/// The object must carry both `nodes` and `links` arrays. Node `type` (or
/// `kind`) values are normalized but not checked here; unrecognized values
/// reach the validator untouched.
pub fn decode_json_graph(block: &str) -> Result<Graph, DecodeError> {
    let value: Value = serde_json::from_str(block)?;
    let root = value.as_object().ok_or_else(|| {
        DecodeError::UnexpectedShape(format!(
            "expected a JSON object at the top level, found {}",
            type_name(&value)
        ))
    })?;

    let nodes = required_array(root, "nodes", "$")?
        .iter()
        .enumerate()
        .map(|(idx, value)| decode_node(value, &format!("nodes[{}]", idx)))
        .collect::<Result<Vec<_>, _>>()?;

    let links = required_array(root, "links", "$")?
        .iter()
        .enumerate()
        .map(|(idx, value)| decode_link(value, &format!("links[{}]", idx)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Graph::new(nodes, links))
}

fn decode_node(value: &Value, path: &str) -> Result<Node, DecodeError> {
    let object = as_object(value, path)?;

    let id = required_str(object, "id", path)?;
    // `type` is the documented wire name, `kind` shows up often enough to accept
    let kind = match optional_str(object, "type", path)? {
        Some(kind) => kind,
        None => optional_str(object, "kind", path)?.ok_or_else(|| DecodeError::MissingField {
            field: "type",
            path: path.to_string(),
        })?,
    };
    let text = required_str(object, "text", path)?;
    let description = optional_str(object, "description", path)?;

    Ok(Node::new(id, NodeKind::parse(&kind), text, description))
}

fn decode_link(value: &Value, path: &str) -> Result<Link, DecodeError> {
    let object = as_object(value, path)?;

    Ok(Link::new(
        required_str(object, "source", path)?,
        required_str(object, "target", path)?,
        required_str(object, "label", path)?,
    ))
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, DecodeError> {
    value.as_object().ok_or_else(|| {
        DecodeError::UnexpectedShape(format!(
            "expected an object at {}, found {}",
            path,
            type_name(value)
        ))
    })
}

fn required_array<'a>(
    object: &'a Object,
    field: &'static str,
    path: &str,
) -> Result<&'a Vec<Value>, DecodeError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField {
            field,
            path: path.to_string(),
        }),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(DecodeError::InvalidField {
            field,
            path: path.to_string(),
            expected: "an array",
        }),
    }
}

fn required_str(object: &Object, field: &'static str, path: &str) -> Result<String, DecodeError> {
    optional_str(object, field, path)?.ok_or_else(|| DecodeError::MissingField {
        field,
        path: path.to_string(),
    })
}

fn optional_str(
    object: &Object,
    field: &'static str,
    path: &str,
) -> Result<Option<String>, DecodeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DecodeError::InvalidField {
            field,
            path: path.to_string(),
            expected: "a string",
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
