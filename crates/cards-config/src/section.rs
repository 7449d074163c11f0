//! Display sections

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// One of the four display groupings of a device's entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Controls,
    Configurations,
    Sensors,
    Diagnostics,
}

impl SectionKey {
    /// Default display order
    pub const ALL: [SectionKey; 4] = [
        SectionKey::Controls,
        SectionKey::Configurations,
        SectionKey::Sensors,
        SectionKey::Diagnostics,
    ];

    /// Configuration key, as written in `section_order` and `exclude_sections`
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Controls => "controls",
            SectionKey::Configurations => "configurations",
            SectionKey::Sensors => "sensors",
            SectionKey::Diagnostics => "diagnostics",
        }
    }

    /// Heading shown above the section
    pub fn label(&self) -> &'static str {
        match self {
            SectionKey::Controls => "Controls",
            SectionKey::Configurations => "Configuration",
            SectionKey::Sensors => "Sensors",
            SectionKey::Diagnostics => "Diagnostic",
        }
    }
}

impl FromStr for SectionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse configured section names, dropping the ones that are not sections
pub fn parse_section_keys(names: &[String]) -> Vec<SectionKey> {
    names
        .iter()
        .filter_map(|name| match name.parse() {
            Ok(key) => Some(key),
            Err(()) => {
                trace!(section = %name, "Ignoring unknown section name");
                None
            }
        })
        .collect()
}
