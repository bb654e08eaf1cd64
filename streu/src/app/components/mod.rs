mod axes;
mod chart;
mod dataset;

pub use axes::{Axis, AxisSelection};
pub use chart::Chart;
pub use dataset::Dataset;
