pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw JSON from the `--input` file, else from piped stdin.
pub fn read_document(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return file::read_json(path).map(Some);
    }
    let piped = stdin::read_stdin()?;
    if piped.is_some() {
        tracing::debug!("reading input from stdin");
    }
    Ok(piped)
}

/// Resolve a command's input: `--input` file first, then piped stdin, then
/// the individual flags.
pub fn resolve<T, F>(path: Option<&str>, from_flags: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    match read_document(path)? {
        Some(doc) => Ok(serde_json::from_value(doc)?),
        None => from_flags(),
    }
}

/// Insert `value` under `key` unless the document already sets it.
pub fn fill_missing(doc: &mut Value, key: &str, value: Value) {
    if let Value::Object(map) = doc {
        map.entry(key.to_string()).or_insert(value);
    }
}
