//! Entity ID helpers for `domain.object_id` strings

/// Domain part of an entity id: everything before the first `.`
///
/// Registry data is not validated by the cards, so this never fails. An id
/// without a separator is returned whole.
pub fn compute_domain(entity_id: &str) -> &str {
    entity_id
        .split_once('.')
        .map(|(domain, _)| domain)
        .unwrap_or(entity_id)
}
