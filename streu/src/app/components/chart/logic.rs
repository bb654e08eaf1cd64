use crate::app::components::Axis;
use crate::backend_state::{Field, SurveyData};

use super::{Chart, X_TRANSITION_SECS, Y_TRANSITION_SECS};

/// Fraction of the data span added on both ends of an axis domain so no
/// point sits on the plot border.
const DOMAIN_PADDING: f64 = 0.1;

// ----------------------------------------------------------------------------
//
//
// Scales and Domains
//
//
// ----------------------------------------------------------------------------

/// Affine map from a data domain onto an output range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value onto the range. A collapsed domain sends every
    /// value to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return 0.5 * (r0 + r1);
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a range value back into the domain. A collapsed range sends
    /// every value to the middle of the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return 0.5 * (d0 + d1);
        }
        d0 + (value - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Data extent of `field` stretched by [`DOMAIN_PADDING`] on both ends.
///
/// An empty dataset falls back to the unit interval. When all records
/// share one value the domain stays collapsed and [`LinearScale::map`]
/// handles the midpoint placement.
pub fn padded_domain(data: &SurveyData, field: Field) -> (f64, f64) {
    match data.extent(field) {
        Some((min, max)) => {
            let pad = (max - min) * DOMAIN_PADDING;
            (min - pad, max + pad)
        }
        None => (0.0, 1.0),
    }
}

/// Padded domain of `field` together with every record's position in it,
/// expressed as a fraction of the domain span.
pub fn axis_state(data: &SurveyData, field: Field) -> ((f64, f64), Vec<f64>) {
    let domain = padded_domain(data, field);
    let scale = LinearScale::new(domain, (0.0, 1.0));
    let fracs = data
        .records
        .iter()
        .map(|record| scale.map(record.value(field)))
        .collect();
    (domain, fracs)
}

// ----------------------------------------------------------------------------
//
//
// Axis Transitions
//
//
// ----------------------------------------------------------------------------

/// One axis mid-flight between two field bindings.
///
/// Positions are tracked as fractions of the axis domain, so a glide
/// survives window resizes without retargeting. The clock starts on the
/// first frame that draws the transition, not when the triggering click
/// is handled.
#[derive(Clone, Debug)]
pub struct AxisTransition {
    start_domain: (f64, f64),
    target_domain: (f64, f64),
    start_fracs: Vec<f64>,
    target_fracs: Vec<f64>,
    duration: f64,
    started_at: Option<f64>,
}

impl AxisTransition {
    pub fn new(
        start_domain: (f64, f64),
        target_domain: (f64, f64),
        start_fracs: Vec<f64>,
        target_fracs: Vec<f64>,
        duration: f64,
    ) -> Self {
        Self {
            start_domain,
            target_domain,
            start_fracs,
            target_fracs,
            duration,
            started_at: None,
        }
    }

    /// Number of records this transition carries positions for.
    pub fn record_count(&self) -> usize {
        self.target_fracs.len()
    }

    /// Start the clock if it is not running yet.
    pub fn tick(&mut self, now: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn is_finished(&self, now: f64) -> bool {
        match self.started_at {
            Some(started_at) => now - started_at >= self.duration,
            None => false,
        }
    }

    /// Eased progress in [0, 1] at time `now`. A transition that has not
    /// ticked yet reports zero progress.
    fn progress(&self, now: f64) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let t = ((now - started_at) / self.duration).clamp(0.0, 1.0);
        ease_in_out_cubic(t)
    }

    /// Domain bounds interpolated between the two bindings.
    pub fn domain(&self, now: f64) -> (f64, f64) {
        let t = self.progress(now);
        (
            lerp(self.start_domain.0, self.target_domain.0, t),
            lerp(self.start_domain.1, self.target_domain.1, t),
        )
    }

    /// Record positions as domain fractions at time `now`.
    pub fn fracs(&self, now: f64) -> Vec<f64> {
        let t = self.progress(now);
        self.start_fracs
            .iter()
            .zip(self.target_fracs.iter())
            .map(|(start, target)| lerp(*start, *target, t))
            .collect()
    }
}

impl Chart {
    /// Glide `axis` from the positions currently on screen to the
    /// positions `to` dictates. The other axis is left untouched.
    ///
    /// When the axis is still mid-flight from an earlier rebind, the new
    /// transition starts from the interpolated state instead of queueing
    /// behind the old one.
    pub fn animate_rebind(&mut self, axis: Axis, from: Field, to: Field, data: &SurveyData) {
        let now = self.last_time;
        let (slot, duration) = match axis {
            Axis::X => (&mut self.x_transition, X_TRANSITION_SECS),
            Axis::Y => (&mut self.y_transition, Y_TRANSITION_SECS),
        };

        let (start_domain, start_fracs) = match slot.take() {
            Some(transition) if transition.record_count() == data.records.len() => {
                (transition.domain(now), transition.fracs(now))
            }
            _ => axis_state(data, from),
        };
        let (target_domain, target_fracs) = axis_state(data, to);

        *slot = Some(AxisTransition::new(
            start_domain,
            target_domain,
            start_fracs,
            target_fracs,
            duration,
        ));
    }

    /// Domain and record fractions to draw for `axis` at time `now`.
    ///
    /// Finished transitions, and transitions whose record count no longer
    /// matches the dataset, are dropped in favor of the static layout.
    pub fn axis_positions(
        &mut self,
        axis: Axis,
        data: &SurveyData,
        field: Field,
        now: f64,
    ) -> ((f64, f64), Vec<f64>) {
        let slot = match axis {
            Axis::X => &mut self.x_transition,
            Axis::Y => &mut self.y_transition,
        };
        if let Some(transition) = slot {
            if transition.record_count() != data.records.len() || transition.is_finished(now) {
                *slot = None;
            } else {
                transition.tick(now);
                return (transition.domain(now), transition.fracs(now));
            }
        }
        axis_state(data, field)
    }

    pub fn is_animating(&self) -> bool {
        self.x_transition.is_some() || self.y_transition.is_some()
    }
}

/// Cubic in-out easing, the symmetric slow-fast-slow curve.
fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
