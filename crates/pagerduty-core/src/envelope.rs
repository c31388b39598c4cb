//! JSON envelope handling.
//!
//! Every PagerDuty payload is wrapped in an object keyed by the resource's root field:
//! `{"escalation_policy": {...}}` for single records and
//! `{"escalation_policies": [...], "limit": 25, ...}` for lists.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::pagination::{ListMeta, ListPage};

fn parse_object(body: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Decode(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn take_root(map: &mut Map<String, Value>, root: &str) -> Result<Value> {
    map.remove(root)
        .ok_or_else(|| Error::MissingField(root.to_string()))
}

/// Decode the value stored under `root` in a response body.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the body is not a JSON object or the root value does not
/// match `T`, and [`Error::MissingField`] if the object has no `root` key.
pub fn unwrap_root<T>(body: &[u8], root: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut map = parse_object(body)?;
    let value = take_root(&mut map, root)?;
    serde_json::from_value(value)
        .map_err(|err| Error::Decode(format!("invalid `{root}` value: {err}")))
}

/// Decode a list envelope whose items live under `collection_key`.
///
/// # Errors
///
/// Same failure modes as [`unwrap_root`]; pagination fields are optional.
pub fn unwrap_list<T>(body: &[u8], collection_key: &str) -> Result<ListPage<T>>
where
    T: DeserializeOwned,
{
    let mut map = parse_object(body)?;
    let items = take_root(&mut map, collection_key)?;
    let items: Vec<T> = serde_json::from_value(items)
        .map_err(|err| Error::Decode(format!("invalid `{collection_key}` list: {err}")))?;
    let meta: ListMeta = serde_json::from_value(Value::Object(map))
        .map_err(|err| Error::Decode(format!("invalid pagination metadata: {err}")))?;

    Ok(ListPage { meta, items })
}

/// Wrap a request payload under its root key.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the payload cannot be serialized.
pub fn wrap_root<T>(root: &str, value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value)
        .map_err(|err| Error::InvalidRequest(format!("cannot encode `{root}`: {err}")))?;
    let mut map = Map::with_capacity(1);
    map.insert(root.to_string(), value);
    Ok(Value::Object(map))
}
