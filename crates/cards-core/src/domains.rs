//! Domain sets and constants
//!
//! Fixed tables the classifier consults to decide which section an entity
//! without a registry category belongs to.

/// Domains that only report values. Entities of these domains go to the
/// sensors section; every other domain is a control.
pub static SENSOR_DOMAINS: &[&str] = &[
    "sensor",
    "binary_sensor",
    "calendar",
    "camera",
    "device_tracker",
    "image",
    "weather",
];

/// Domains the PetKit cards treat as controls. Everything else is a sensor.
pub static PETKIT_CONTROL_DOMAINS: &[&str] = &["text", "button", "switch", "select"];

/// Translation key the PetKit integration uses for the desiccant counter,
/// which is always surfaced as a problem entity.
pub const PETKIT_PROBLEM_TRANSLATION_KEY: &str = "desiccant_left_days";

/// Device class marking an entity as a problem indicator
pub const DEVICE_CLASS_PROBLEM: &str = "problem";

/// Check if a domain belongs in the sensors section
pub fn is_sensor_domain(domain: &str) -> bool {
    SENSOR_DOMAINS.contains(&domain)
}

/// Check if a domain is one of the PetKit control domains
pub fn is_petkit_control_domain(domain: &str) -> bool {
    PETKIT_CONTROL_DOMAINS.contains(&domain)
}
