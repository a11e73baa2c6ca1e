//! Speed selection.
//!
//! The fan knows exactly three speeds. In the browser they are bound to the
//! `#high`, `#medium` and `#low` buttons, natively to the keyboard. Both end up
//! as a [`crate::flow::FanEvent::SetSpeed`] on the event loop.

/// One of the three sanctioned blade speeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Speed {
    High,
    #[default]
    Medium,
    Low,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::High, Speed::Medium, Speed::Low];

    /// Radians the blades turn per frame.
    pub fn value(self) -> f64 {
        match self {
            Speed::High => 0.75,
            Speed::Medium => 0.5,
            Speed::Low => 0.25,
        }
    }

    /// Id of the DOM element that selects this speed.
    pub fn button_id(self) -> &'static str {
        match self {
            Speed::High => "high",
            Speed::Medium => "medium",
            Speed::Low => "low",
        }
    }

    /// Keyboard shortcut used when there is no DOM to host buttons.
    pub fn from_key(key: &str) -> Option<Speed> {
        match key.to_ascii_lowercase().as_str() {
            "1" | "h" => Some(Speed::High),
            "2" | "m" => Some(Speed::Medium),
            "3" | "l" => Some(Speed::Low),
            _ => None,
        }
    }
}
