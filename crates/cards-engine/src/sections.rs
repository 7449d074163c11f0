//! Section ordering

use cards_config::SectionKey;

/// Arrange the four sections
///
/// Requested sections come first, in the requested order, with repeats
/// dropped. The remaining sections follow in default order. An empty
/// request gives the default order.
pub fn order_sections(requested: &[SectionKey]) -> Vec<SectionKey> {
    let mut ordered: Vec<SectionKey> = Vec::with_capacity(SectionKey::ALL.len());
    for key in requested.iter().copied().chain(SectionKey::ALL) {
        if !ordered.contains(&key) {
            ordered.push(key);
        }
    }
    ordered
}
