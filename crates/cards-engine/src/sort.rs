//! Entity ordering within a section

use std::cmp::Ordering;

use cards_config::{SortConfig, SortDirection, SortType};

use crate::classify::EntityInformation;

/// Key an entity is compared by; `None` for unknown sort types
fn sort_key(entity: &EntityInformation, sort_type: SortType) -> Option<&str> {
    match sort_type {
        SortType::Domain => Some(entity.domain()),
        SortType::EntityId => Some(entity.entity_id.as_str()),
        SortType::Name => Some(
            entity
                .friendly_name
                .as_deref()
                .unwrap_or(&entity.entity_id),
        ),
        SortType::State => Some(entity.state.as_str()),
        SortType::Unknown => None,
    }
}

fn compare(a: &EntityInformation, b: &EntityInformation, sort: &SortConfig) -> Ordering {
    let ordering = match (sort_key(a, sort.sort_type), sort_key(b, sort.sort_type)) {
        (Some(a), Some(b)) => a.cmp(b),
        _ => Ordering::Equal,
    };
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Return a sorted copy of `entities`
///
/// Comparison is plain string ordering. Equal keys keep their input order.
/// Without a sort config the copy is in input order.
pub fn sort_entities(
    entities: &[EntityInformation],
    sort: Option<&SortConfig>,
) -> Vec<EntityInformation> {
    let mut sorted = entities.to_vec();
    if let Some(sort) = sort {
        sorted.sort_by(|a, b| compare(a, b, sort));
    }
    sorted
}
