mod logic;
mod ui;

pub use logic::{AxisTransition, LinearScale};

/// Seconds a rebound x-axis glides from the old point positions to the new.
pub const X_TRANSITION_SECS: f64 = 1.0;
/// Seconds a rebound y-axis glides from the old point positions to the new.
pub const Y_TRANSITION_SECS: f64 = 0.75;

/// Scatter view of the loaded survey.
///
/// The chart holds no record data of its own, only the in-flight axis
/// transitions and the animation clock of the most recently drawn frame.
#[derive(Default)]
pub struct Chart {
    x_transition: Option<AxisTransition>,
    y_transition: Option<AxisTransition>,
    last_time: f64,
}

impl Chart {
    /// Drop any in-flight animation, e.g. when a freshly loaded dataset
    /// replaces the records mid-transition.
    pub fn reset(&mut self) {
        self.x_transition = None;
        self.y_transition = None;
    }
}
