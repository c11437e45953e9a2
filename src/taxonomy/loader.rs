//! JSON loaders for taxonomy and program files.
//!
//! Both files are either a bare JSON array or an object wrapping the array
//! (`occupations` / `programs`). Every taxonomy problem is fatal: an index
//! built from a partial taxonomy would silently drop codes.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::types::{OccupationEntry, QueryRecord};
use crate::error::{OmError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default, alias = "soc_code", alias = "socCode")]
    code: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    major_group: Option<String>,
    #[serde(default)]
    minor_group: Option<String>,
    #[serde(default)]
    broad_group: Option<String>,
}

impl RawEntry {
    fn into_entry(self, index: usize) -> Result<OccupationEntry> {
        let code = self
            .code
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| OmError::InvalidEntry {
                index,
                reason: "missing code".to_string(),
            })?;
        let title = self.title.ok_or_else(|| OmError::InvalidEntry {
            index,
            reason: format!("entry {code} has no title"),
        })?;

        Ok(OccupationEntry {
            code,
            title,
            major_group: self.major_group.unwrap_or_default(),
            minor_group: self.minor_group.unwrap_or_default(),
            broad_group: self.broad_group.unwrap_or_default(),
        })
    }
}

/// Load occupation entries from a JSON file.
pub fn load_taxonomy(path: &Path) -> Result<Vec<OccupationEntry>> {
    if !path.exists() {
        return Err(OmError::TaxonomyNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    let entries = parse_taxonomy(&raw)?;
    if entries.is_empty() {
        return Err(OmError::EmptyTaxonomy);
    }
    info!(path = %path.display(), entries = entries.len(), "Loaded taxonomy");
    Ok(entries)
}

/// Parse occupation entries from JSON text.
pub fn parse_taxonomy(raw: &str) -> Result<Vec<OccupationEntry>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| OmError::TaxonomyParse(e.to_string()))?;
    let items = unwrap_list(value, "occupations").ok_or_else(|| {
        OmError::TaxonomyParse("expected an array or an object with `occupations`".to_string())
    })?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawEntry =
                serde_json::from_value(item).map_err(|e| OmError::InvalidEntry {
                    index,
                    reason: e.to_string(),
                })?;
            raw.into_entry(index)
        })
        .collect()
}

/// Load program query records from a JSON file.
pub fn load_programs(path: &Path) -> Result<Vec<QueryRecord>> {
    if !path.exists() {
        return Err(OmError::ProgramParse(format!(
            "file not found: {}",
            path.display()
        )));
    }
    let raw = std::fs::read_to_string(path)?;
    let programs = parse_programs(&raw)?;
    debug!(path = %path.display(), programs = programs.len(), "Loaded programs");
    Ok(programs)
}

/// Parse program query records from JSON text.
pub fn parse_programs(raw: &str) -> Result<Vec<QueryRecord>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| OmError::ProgramParse(e.to_string()))?;
    let items = unwrap_list(value, "programs").ok_or_else(|| {
        OmError::ProgramParse("expected an array or an object with `programs`".to_string())
    })?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(normalize_id(item))
                .map_err(|e| OmError::ProgramParse(format!("program at index {index}: {e}")))
        })
        .collect()
}

fn unwrap_list(value: Value, key: &str) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

// Program ids are often numeric in exported data.
fn normalize_id(mut item: Value) -> Value {
    let numeric = match item.get("id") {
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    };
    if let (Some(id), Value::Object(map)) = (numeric, &mut item) {
        map.insert("id".to_string(), Value::String(id));
    }
    item
}
