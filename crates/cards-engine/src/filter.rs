//! Device-level include/exclude filtering
//!
//! Two defaults coexist for a missing include list. [`should_include`] is
//! opt-in and answers `false`; [`is_device_kept`] keeps everything unless an
//! include list is given. Callers pick the one matching their context.

use cards_config::CardConfig;

use crate::pattern::PatternSet;

/// True iff `include_devices` is non-empty and a pattern matches id or name
pub fn should_include(id: &str, name: Option<&str>, config: &CardConfig) -> bool {
    match config.include_devices.as_deref() {
        Some(patterns) if !patterns.is_empty() => {
            PatternSet::new(patterns).is_match_any(&[Some(id), name])
        }
        _ => false,
    }
}

/// True iff `exclude_devices` is non-empty and a pattern matches id or name
pub fn should_exclude(id: &str, name: Option<&str>, config: &CardConfig) -> bool {
    match config.exclude_devices.as_deref() {
        Some(patterns) if !patterns.is_empty() => {
            PatternSet::new(patterns).is_match_any(&[Some(id), name])
        }
        _ => false,
    }
}

/// Keep a device iff it is included (or no include list exists) and not
/// excluded. Exclusion wins when both match.
pub fn is_device_kept(id: &str, name: Option<&str>, config: &CardConfig) -> bool {
    let included = config.include_devices.is_none() || should_include(id, name, config);
    included && !should_exclude(id, name, config)
}
