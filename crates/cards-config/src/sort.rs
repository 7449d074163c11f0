//! Sort configuration

use serde::{Deserialize, Serialize};

/// Key entities are sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    /// Entity id prefix before the first `.`
    Domain,
    /// Raw entity id
    EntityId,
    /// Friendly name, falling back to the entity id
    Name,
    /// Raw state string
    State,
    /// Anything else; sorting leaves the order untouched
    #[serde(other)]
    Unknown,
}

/// Sort direction; anything other than `desc` sorts ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Desc,
    #[default]
    #[serde(other)]
    Asc,
}

/// The `sort` block of a card configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(rename = "type")]
    pub sort_type: SortType,

    #[serde(default)]
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(sort_type: SortType, direction: SortDirection) -> Self {
        Self {
            sort_type,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direction_defaults_to_asc() {
        let sort: SortConfig = serde_json::from_value(json!({"type": "entity_id"})).unwrap();
        assert_eq!(sort, SortConfig::new(SortType::EntityId, SortDirection::Asc));
    }

    #[test]
    fn test_unknown_direction_sorts_ascending() {
        let sort: SortConfig = serde_json::from_value(json!({"type": "name"})).unwrap();
        assert_eq!(sort.direction, SortDirection::Asc);

        let sort: SortConfig =
            serde_json::from_value(json!({"type": "name", "direction": "sideways"})).unwrap();
        assert_eq!(sort, SortConfig::new(SortType::Name, SortDirection::Asc));

        // Serializes with the configuration names
        let value = serde_json::to_value(SortConfig::new(SortType::Name, SortDirection::Desc)).unwrap();
        assert_eq!(value, json!({"type": "name", "direction": "desc"}));
    }

    #[test]
    fn test_unknown_values_degrade() {
        let sort: SortConfig =
            serde_json::from_value(json!({"type": "area", "direction": "sideways"})).unwrap();
        assert_eq!(sort.sort_type, SortType::Unknown);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_desc() {
        let sort: SortConfig =
            serde_json::from_value(json!({"type": "state", "direction": "desc"})).unwrap();
        assert_eq!(sort, SortConfig::new(SortType::State, SortDirection::Desc));
    }
}
