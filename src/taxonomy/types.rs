//! Occupation entries and program query records.

use serde::{Deserialize, Serialize};

/// A canonical occupation record from the taxonomy.
///
/// Loaded once at startup and never mutated afterwards. Group labels are
/// empty strings when the source omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationEntry {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub major_group: String,
    #[serde(default)]
    pub minor_group: String,
    #[serde(default)]
    pub broad_group: String,
}

impl OccupationEntry {
    /// Create an entry with no group labels.
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            major_group: String::new(),
            minor_group: String::new(),
            broad_group: String::new(),
        }
    }

    #[must_use]
    pub fn with_major_group(mut self, label: impl Into<String>) -> Self {
        self.major_group = label.into();
        self
    }

    #[must_use]
    pub fn with_minor_group(mut self, label: impl Into<String>) -> Self {
        self.minor_group = label.into();
        self
    }

    #[must_use]
    pub fn with_broad_group(mut self, label: impl Into<String>) -> Self {
        self.broad_group = label.into();
        self
    }

    /// Title and group labels joined by single spaces, in indexing order.
    #[must_use]
    pub fn indexed_text(&self) -> String {
        [
            self.title.as_str(),
            self.major_group.as_str(),
            self.minor_group.as_str(),
            self.broad_group.as_str(),
        ]
        .join(" ")
    }
}

/// A caller-supplied academic program description.
///
/// Every field is optional; absent and empty fields are skipped when the
/// query text is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    /// CIP-like classification code. Carried through, not scored.
    #[serde(default, alias = "cipCode", skip_serializing_if = "Option::is_none")]
    pub cip: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree_designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl QueryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    #[must_use]
    pub fn long_name(mut self, value: impl Into<String>) -> Self {
        self.long_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn cip(mut self, value: impl Into<String>) -> Self {
        self.cip = Some(value.into());
        self
    }

    #[must_use]
    pub fn program_type(mut self, value: impl Into<String>) -> Self {
        self.program_type = Some(value.into());
        self
    }

    #[must_use]
    pub fn degree_designation(mut self, value: impl Into<String>) -> Self {
        self.degree_designation = Some(value.into());
        self
    }

    #[must_use]
    pub fn college(mut self, value: impl Into<String>) -> Self {
        self.college = Some(value.into());
        self
    }

    #[must_use]
    pub fn level(mut self, value: impl Into<String>) -> Self {
        self.level = Some(value.into());
        self
    }

    /// Text used for matching.
    ///
    /// Fields are taken in the fixed order long name, name, type, degree
    /// designation, college, level; absent or empty ones are skipped.
    #[must_use]
    pub fn query_text(&self) -> String {
        [
            &self.long_name,
            &self.name,
            &self.program_type,
            &self.degree_designation,
            &self.college,
            &self.level,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Whether no text-bearing field is set.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.query_text().is_empty()
    }
}
