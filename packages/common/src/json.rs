use crate::error::CommonError;
use crate::result::CommonResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CommonResult<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CommonError::InvalidFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value to JSON text
pub fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> CommonResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Serialize a value and write it to `path`, replacing any existing file
pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> CommonResult<()> {
    let mut json = to_json_string(value, pretty)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}
