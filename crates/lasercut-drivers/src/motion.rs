//! Per-job motion state
//!
//! Drivers only emit power and speed fields when they change. The last
//! emitted values and the values requested for the next line live in a
//! [`MotionState`] owned by the job runner, created fresh for each job and
//! handed to every emission call.

/// Last emitted and next requested power/speed. `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    /// Feed rate last put on the wire: mm/min after a travel move,
    /// percent of max speed after a line
    pub current_speed: Option<f64>,
    /// S value last put on the wire
    pub current_power: Option<f64>,
    /// Speed requested for the next line (percent of max speed)
    pub next_speed: Option<f64>,
    /// S value requested for the next line
    pub next_power: Option<f64>,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending power if it differs from what was last emitted,
    /// recording it as emitted.
    pub fn take_power_change(&mut self) -> Option<f64> {
        match self.next_power {
            Some(power) if self.current_power != Some(power) => {
                self.current_power = Some(power);
                Some(power)
            }
            _ => None,
        }
    }

    /// Take the pending speed if it differs from what was last emitted,
    /// recording it as emitted.
    pub fn take_speed_change(&mut self) -> Option<f64> {
        match self.next_speed {
            Some(speed) if self.current_speed != Some(speed) => {
                self.current_speed = Some(speed);
                Some(speed)
            }
            _ => None,
        }
    }
}
