mod logic;
mod ui;

use crate::backend_state::Field;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Which survey field drives which axis. There is exactly one field per
/// axis, so the "one active label per axis" rule holds by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisSelection {
    x: Field,
    y: Field,
}
