//! Active-state predicate
//!
//! Decides whether an entity reads as "on" for display purposes. The card
//! core treats this as a collaborator: anything implementing [`ActiveState`]
//! can be plugged in, closures included. [`DefaultActiveState`] mirrors the
//! rules of the host front end.

use crate::{compute_domain, State, STATE_OFF, STATE_UNAVAILABLE, STATE_UNKNOWN};

/// Predicate answering "is this entity active right now?"
pub trait ActiveState {
    fn is_active(&self, state: &State) -> bool;
}

impl<F> ActiveState for F
where
    F: Fn(&State) -> bool,
{
    fn is_active(&self, state: &State) -> bool {
        self(state)
    }
}

/// The host front end's notion of an active entity
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultActiveState;

impl ActiveState for DefaultActiveState {
    fn is_active(&self, state: &State) -> bool {
        let domain = compute_domain(&state.entity_id);
        let value = state.state.as_str();

        // Stateless domains are active as long as they can be used
        if matches!(domain, "button" | "event" | "input_button" | "scene") {
            return value != STATE_UNAVAILABLE;
        }

        if matches!(value, STATE_UNAVAILABLE | STATE_UNKNOWN | STATE_OFF) {
            return false;
        }

        match domain {
            "alarm_control_panel" => value != "disarmed",
            "alert" => value != "idle",
            "cover" | "valve" => value != "closed",
            "device_tracker" | "person" => value != "not_home",
            "lock" => value != "locked",
            "media_player" => value != "standby",
            "vacuum" => !matches!(value, "idle" | "docked" | "paused"),
            "plant" => value == "problem",
            "group" => matches!(value, "on" | "home" | "open" | "locked" | "problem"),
            "timer" => value == "active",
            "camera" => value == "streaming",
            _ => true,
        }
    }
}
