use serde_json::Value;

use super::error::ApiClientError;

/// Flattens a serialized request into a URL-encoded query string.
///
/// Read endpoints carry their parameters in the query string rather than a
/// body. The request value must serialize to a JSON object (or null for
/// parameterless operations); fields that were skipped during serialization
/// are simply absent, which preserves the "unset means omit" contract.
///
/// Encoding rules:
/// - scalars become `name=value`
/// - arrays become indexed pairs `name[0]=a&name[1]=b`
/// - `null` members are dropped
/// - nested objects are rejected ([`ApiClientError::UnsupportedQueryParameter`])
///
/// Returns `Ok(None)` when there is nothing to encode.
pub(super) fn to_query_string(payload: &Value) -> Result<Option<String>, ApiClientError> {
    let object = match payload {
        Value::Null => return Ok(None),
        Value::Object(object) => object,
        other => {
            return Err(ApiClientError::UnsupportedQueryPayload {
                value: other.clone(),
            });
        }
    };

    let mut pairs: Vec<(String, String)> = Vec::new();
    for (name, value) in object {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let scalar = scalar_to_string(name, item)?;
                    pairs.push((format!("{name}[{index}]"), scalar));
                }
            }
            Value::Object(_) => {
                return Err(ApiClientError::UnsupportedQueryParameter { name: name.clone() });
            }
            scalar => pairs.push((name.clone(), scalar_to_string(name, scalar)?)),
        }
    }

    if pairs.is_empty() {
        return Ok(None);
    }
    let encoded = serde_urlencoded::to_string(&pairs)?;
    Ok(Some(encoded))
}

fn scalar_to_string(name: &str, value: &Value) -> Result<String, ApiClientError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(ApiClientError::UnsupportedQueryParameter {
            name: name.to_string(),
        }),
    }
}
