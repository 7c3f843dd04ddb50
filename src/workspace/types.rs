//! Definitions persisted by the workspace store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A model definition as stored in `models/<name>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,

    /// Base model, omitted when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Only written when explicitly set; REST exposure normally lives in the registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ModelDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            public: None,
            properties: Map::new(),
        }
    }

    /// File stem used for the definition file
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Registry entry in `<component>/models.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(rename = "dataSource")]
    pub data_source: Option<String>,
    pub public: bool,
}

/// Property value types offered by the property generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Date,
    Buffer,
    GeoPoint,
    Any,
}

impl PropertyType {
    pub const ALL: [PropertyType; 9] = [
        PropertyType::String,
        PropertyType::Number,
        PropertyType::Boolean,
        PropertyType::Object,
        PropertyType::Array,
        PropertyType::Date,
        PropertyType::Buffer,
        PropertyType::GeoPoint,
        PropertyType::Any,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Object => "object",
            PropertyType::Array => "array",
            PropertyType::Date => "date",
            PropertyType::Buffer => "buffer",
            PropertyType::GeoPoint => "geopoint",
            PropertyType::Any => "any",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// A data source entry in `<component>/datasources.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceDefinition {
    pub name: String,
    pub connector: String,
    /// Connector-specific settings (host, database, ...)
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl DataSourceDefinition {
    pub fn new(name: impl Into<String>, connector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connector: connector.into(),
            settings: Map::new(),
        }
    }
}
