use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use xml::attribute::OwnedAttribute;

use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: impl AsRef<Path>) -> Result<T> {
    let data = fs::read_to_string(file_path.as_ref())?;

    let parsed_data: T = serde_json::from_str(&data)?;

    Ok(parsed_data)
}

/// Serializes `value` as JSON with a two space indent and writes it atomically.
pub fn write_json_file<T: Serialize>(file_path: impl AsRef<Path>, value: &T) -> Result<()> {
    let mut buffer = serde_json::to_vec_pretty(value)?;
    buffer.push(b'\n');
    write_atomically(file_path.as_ref(), &buffer)
}

/// Writes `contents` to a sibling temporary file first and renames it over `file_path`,
/// so readers never observe a half written artifact.
pub fn write_atomically(file_path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = file_path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "artifact".to_string());
    let tmp_path = file_path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp_path, contents)?;
    if let Err(e) = fs::rename(&tmp_path, file_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::IoError(e));
    }

    Ok(())
}

pub(crate) fn attribute<'a>(attributes: &'a [OwnedAttribute], name: &str) -> Option<&'a str> {
    attributes.iter().find(|a| a.name.local_name == name).map(|a| a.value.as_str())
}

pub(crate) fn required_attribute<'a>(attributes: &'a [OwnedAttribute], element: &str, name: &str, source_name: &str) -> Result<&'a str> {
    attribute(attributes, name).ok_or_else(|| Error::malformed(source_name, format!("<{}> element without '{}' attribute", element, name)))
}

pub(crate) fn parse_number(value: &str, element: &str, name: &str, source_name: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::malformed(source_name, format!("<{}> attribute '{}' is not a number: '{}'", element, name, value)))
}
