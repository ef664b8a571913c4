//! Countdown timer component

use crate::ecs::component::EntityHook;

/// Component running a countdown toward an expiry hook
///
/// The timer system fires `on_expire` once when `time_left` crosses zero.
/// The hook may re-arm the timer by setting `time_left` positive again, or
/// replace `on_expire` to chain a different followup; a timer left expired
/// is detached after the hook returns.
pub struct Timer {
    /// Seconds until expiry
    pub time_left: f32,

    /// Invoked when the countdown crosses zero
    pub on_expire: Option<EntityHook>,
}

impl Timer {
    /// Create a timer expiring after `seconds`
    pub fn new(seconds: f32) -> Self {
        Self {
            time_left: seconds,
            on_expire: None,
        }
    }

    /// Create a timer with an expiry hook
    pub fn with_hook(seconds: f32, on_expire: EntityHook) -> Self {
        Self {
            time_left: seconds,
            on_expire: Some(on_expire),
        }
    }
}
