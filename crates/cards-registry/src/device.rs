//! Device registry entries
//!
//! Devices carry two independent membership signals the cards use to decide
//! which integration a device belongs to: identifier tuples and config
//! entry ids.

use serde::{Deserialize, Serialize};

/// A device identifier tuple, e.g. `["zwave_js", "3245146787-12"]`
///
/// Integrations write tuples of two or more parts, and some write numbers.
/// Every part is kept as a string, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceIdentifier(pub Vec<String>);

impl<'de> Deserialize<'de> for DeviceIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, SeqAccess, Visitor};

        struct DeviceIdentifierVisitor;

        impl<'de> Visitor<'de> for DeviceIdentifierVisitor {
            type Value = DeviceIdentifier;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a tuple of string or number parts")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut parts: Vec<String> = Vec::new();
                while let Some(value) = seq.next_element::<serde_json::Value>()? {
                    let part = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Number(n) => n.to_string(),
                        _ => return Err(de::Error::custom("identifier parts must be string or number")),
                    };
                    parts.push(part);
                }
                Ok(DeviceIdentifier(parts))
            }
        }

        deserializer.deserialize_seq(DeviceIdentifierVisitor)
    }
}

impl DeviceIdentifier {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Check if any part of the tuple equals `token` exactly
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|part| part == token)
    }
}

/// A registered device entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEntry {
    /// Registry id
    pub id: String,

    /// Identifier tuples (e.g., [["hue", "bridge123"]])
    #[serde(default)]
    pub identifiers: Vec<DeviceIdentifier>,

    /// Associated config entries
    #[serde(default)]
    pub config_entries: Vec<String>,

    /// Primary config entry ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_config_entry: Option<String>,

    /// Device name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// User-set name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_by_user: Option<String>,

    /// Manufacturer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Software/firmware version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,

    /// Assigned area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
}

impl DeviceEntry {
    /// Create a device entry with only an id and an optional name
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            identifiers: Vec::new(),
            config_entries: Vec::new(),
            primary_config_entry: None,
            name: name.map(|s| s.to_string()),
            name_by_user: None,
            manufacturer: None,
            model: None,
            sw_version: None,
            area_id: None,
        }
    }

    /// Get display name (user name or device name)
    pub fn display_name(&self) -> Option<&str> {
        self.name_by_user.as_deref().or(self.name.as_deref())
    }

    /// Add an identifier tuple
    pub fn with_identifier<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers.push(DeviceIdentifier::new(parts));
        self
    }

    /// Add a config entry
    pub fn with_config_entry(mut self, config_entry_id: impl Into<String>) -> Self {
        let id = config_entry_id.into();
        if self.primary_config_entry.is_none() {
            self.primary_config_entry = Some(id.clone());
        }
        if !self.config_entries.contains(&id) {
            self.config_entries.push(id);
        }
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the user-chosen name
    pub fn with_name_by_user(mut self, name: impl Into<String>) -> Self {
        self.name_by_user = Some(name.into());
        self
    }
}
