//! Structured host profile: ordered sections of named entries

use crate::constants::VALUE_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of inspecting a remote host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub sections: Vec<Section>,
}

impl Profile {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

/// Titled group of entries, e.g. "System" or "Storage"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(title: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }
}

/// One named fact within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub values: EntryValues,
}

impl Entry {
    pub fn new(name: impl Into<String>, values: impl Into<EntryValues>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }
}

/// Ordered values of an entry
///
/// Renders as the non-empty values joined with `", "`. An entry with no
/// values, or only empty ones, renders to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawValues", into = "Vec<String>")]
pub struct EntryValues(Vec<String>);

impl EntryValues {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// True when the values render to the empty string
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|v| v.is_empty())
    }
}

impl fmt::Display for EntryValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in self.0.iter().filter(|v| !v.is_empty()) {
            if !first {
                f.write_str(VALUE_SEPARATOR)?;
            }
            f.write_str(value)?;
            first = false;
        }
        Ok(())
    }
}

impl From<Vec<String>> for EntryValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<&str> for EntryValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for EntryValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<EntryValues> for Vec<String> {
    fn from(values: EntryValues) -> Self {
        values.0
    }
}

/// Accepts `"value"` as well as `["a", "b"]` in profile files
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValues {
    One(String),
    Many(Vec<String>),
}

impl From<RawValues> for EntryValues {
    fn from(raw: RawValues) -> Self {
        match raw {
            RawValues::One(value) => Self(vec![value]),
            RawValues::Many(values) => Self(values),
        }
    }
}
