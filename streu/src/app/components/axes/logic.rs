use crate::backend_state::Field;

use super::{Axis, AxisSelection};

impl Axis {
    /// The fields that may drive this axis: demographics on x, health
    /// risks on y.
    pub fn allowed_fields(&self) -> [Field; 3] {
        match self {
            Axis::X => [Field::Poverty, Field::Age, Field::Income],
            Axis::Y => [Field::Healthcare, Field::Obesity, Field::Smokes],
        }
    }
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self {
            x: Field::Poverty,
            y: Field::Healthcare,
        }
    }
}

impl AxisSelection {
    pub fn field(&self, axis: Axis) -> Field {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn x_field(&self) -> Field {
        self.x
    }

    pub fn y_field(&self) -> Field {
        self.y
    }

    /// Bind `field` to `axis`. Returns `false` without touching any state
    /// when the field is already active or not allowed on that axis,
    /// `true` after an actual rebind. The other axis is never changed.
    pub fn select(&mut self, axis: Axis, field: Field) -> bool {
        if !axis.allowed_fields().contains(&field) {
            log::warn!("field {:?} cannot drive the {:?} axis", field, axis);
            return false;
        }
        if self.field(axis) == field {
            return false;
        }
        match axis {
            Axis::X => self.x = field,
            Axis::Y => self.y = field,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn reselecting_the_active_field_is_a_noop() {
        init();
        let mut selection = AxisSelection::default();
        assert!(!selection.select(Axis::X, Field::Poverty));
        assert_eq!(selection, AxisSelection::default());
    }

    #[test]
    fn rejects_fields_on_the_wrong_axis() {
        init();
        let mut selection = AxisSelection::default();
        assert!(!selection.select(Axis::X, Field::Obesity));
        assert!(!selection.select(Axis::Y, Field::Income));
        assert_eq!(selection, AxisSelection::default());
    }

    #[test]
    fn rebinding_one_axis_leaves_the_other_untouched() {
        init();
        let mut selection = AxisSelection::default();
        assert!(selection.select(Axis::X, Field::Income));
        assert_eq!(selection.x_field(), Field::Income);
        assert_eq!(selection.y_field(), Field::Healthcare);

        assert!(selection.select(Axis::Y, Field::Smokes));
        assert_eq!(selection.x_field(), Field::Income);
        assert_eq!(selection.y_field(), Field::Smokes);
    }

    #[test]
    fn round_trip_restores_the_starting_selection() {
        init();
        let mut selection = AxisSelection::default();
        assert!(selection.select(Axis::X, Field::Age));
        assert!(selection.select(Axis::X, Field::Poverty));
        assert_eq!(selection, AxisSelection::default());
    }

    #[test]
    fn every_allowed_field_is_selectable() {
        init();
        let mut selection = AxisSelection::default();
        for axis in [Axis::X, Axis::Y] {
            for field in axis.allowed_fields() {
                let was_active = selection.field(axis) == field;
                assert_eq!(selection.select(axis, field), !was_active);
                assert_eq!(selection.field(axis), field);
            }
        }
    }
}
