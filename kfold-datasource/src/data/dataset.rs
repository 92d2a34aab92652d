//! Source dataset description.
//!
//! A `DatasetSpec` is supplied by the caller and is never mutated; every
//! split of every fold points back at the same location and schema.

use serde::{Deserialize, Serialize};

/// Schema descriptor, either raw text or an inline JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSchema {
    Inline(String),
    Document(serde_json::Value),
}

impl DataSchema {
    /// Text form sent to the provider, which only accepts a string.
    pub fn to_wire_string(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::Document(value) => serde_json::to_string(value),
        }
    }
}

impl From<&str> for DataSchema {
    fn from(text: &str) -> Self {
        Self::Inline(text.to_string())
    }
}

impl From<String> for DataSchema {
    fn from(text: String) -> Self {
        Self::Inline(text)
    }
}

impl From<serde_json::Value> for DataSchema {
    fn from(value: serde_json::Value) -> Self {
        Self::Document(value)
    }
}

/// Dataset that folds are carved out of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// User-facing name, used as the prefix of every split name.
    pub name: String,
    /// Where the data lives (e.g. "s3://bucket/data.csv").
    pub data_location: String,
    /// Schema of the data at `data_location`.
    pub schema: DataSchema,
}

impl DatasetSpec {
    pub fn new(
        name: impl Into<String>,
        data_location: impl Into<String>,
        schema: impl Into<DataSchema>,
    ) -> Self {
        Self {
            name: name.into(),
            data_location: data_location.into(),
            schema: schema.into(),
        }
    }
}
