use serde_json::Value;

/// Parses a translation file and normalizes its keys.
///
/// # Errors
/// Returns the `serde_json` error when the text is not valid JSON.
pub fn parse_translation(source: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(source).map(normalize_keys)
}

/// Trims and lowercases every object key, recursively. Values are kept as is.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.trim().to_lowercase(), normalize_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Key of a folder's entry in the translation aggregate.
pub fn folder_key(folder: &str) -> String {
    folder.to_uppercase()
}
