//! Rows of the people and groups exports.

use std::path::Path;

use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A row of the people export.
///
/// Name and first address line are required columns; their cells are kept
/// raw because together they form the identity key. Empty or whitespace-only
/// cells in the other columns become `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonRow {
    #[serde(rename = "FirstName")]
    pub first_name: String,

    #[serde(rename = "LastName")]
    pub last_name: String,

    /// month/day/year
    #[serde(rename = "Birth Date", default, deserialize_with = "empty_string_as_none")]
    pub birth_date: Option<String>,

    #[serde(rename = "HomePhone", default, deserialize_with = "empty_string_as_none")]
    pub home_phone: Option<String>,

    #[serde(rename = "MobilePhone", default, deserialize_with = "empty_string_as_none")]
    pub mobile_phone: Option<String>,

    #[serde(rename = "WorkPhone", default, deserialize_with = "empty_string_as_none")]
    pub work_phone: Option<String>,

    /// Single-letter code, `M` or `F`
    #[serde(rename = "Gender", default, deserialize_with = "empty_string_as_none")]
    pub gender: Option<String>,

    #[serde(rename = "Allergy/child notes", default, deserialize_with = "empty_string_as_none")]
    pub notes: Option<String>,

    #[serde(rename = "Emergency Contact", default, deserialize_with = "empty_string_as_none")]
    pub emergency_contact: Option<String>,

    #[serde(rename = "Address1")]
    pub address1: String,

    #[serde(rename = "Address2", default, deserialize_with = "empty_string_as_none")]
    pub address2: Option<String>,

    #[serde(rename = "City", default, deserialize_with = "empty_string_as_none")]
    pub city: Option<String>,

    #[serde(rename = "State", default, deserialize_with = "empty_string_as_none")]
    pub state: Option<String>,

    #[serde(rename = "ZipCode", default, deserialize_with = "empty_string_as_none")]
    pub zip_code: Option<String>,
}

/// A row of the groups export: one person's membership in one group.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRow {
    #[serde(rename = "GroupName")]
    pub group_name: String,

    #[serde(rename = "GroupDescription", default, deserialize_with = "empty_string_as_none")]
    pub group_description: Option<String>,

    #[serde(rename = "FirstName")]
    pub first_name: String,

    #[serde(rename = "LastName")]
    pub last_name: String,

    #[serde(rename = "Address1")]
    pub address1: String,

    #[serde(rename = "GroupMemberType", default, deserialize_with = "empty_string_as_none")]
    pub member_type: Option<String>,
}

/// Deserialize empty strings as None.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Decode `bytes` and parse every row. Fails on the first malformed row.
pub fn parse_rows<T: DeserializeOwned>(bytes: &[u8], encoding: &'static Encoding) -> Result<Vec<T>> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        bail!("input is not valid {}", encoding.name());
    }

    // Short rows are allowed; missing trailing cells read as absent.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<T>().enumerate() {
        let line = idx + 2; // CSV line number (1-indexed, skip header)
        let row = result.with_context(|| format!("line {}", line))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read and parse a whole export file.
pub fn read_rows<T: DeserializeOwned>(path: &Path, encoding: &'static Encoding) -> Result<Vec<T>> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_rows(&bytes, encoding).with_context(|| format!("Failed to parse {}", path.display()))
}
