use crate::app::events::{EventQueue, SelectAxisField};
use crate::backend_state::Field;
use crate::EguiApp;

use super::{Axis, AxisSelection};

impl AxisSelection {
    /// Vertical stack of y-axis labels, drawn left of the chart.
    pub fn render_y_labels(&self, event_queue: &mut EventQueue<EguiApp>, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            for field in Axis::Y.allowed_fields() {
                self.label(Axis::Y, field, event_queue, ui);
            }
        });
    }

    /// Horizontal row of x-axis labels, drawn beneath the chart.
    pub fn render_x_labels(&self, event_queue: &mut EventQueue<EguiApp>, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(ui.available_width() * 0.3);
            for field in Axis::X.allowed_fields() {
                self.label(Axis::X, field, event_queue, ui);
            }
        });
    }

    fn label(
        &self,
        axis: Axis,
        field: Field,
        event_queue: &mut EventQueue<EguiApp>,
        ui: &mut egui::Ui,
    ) {
        let active = self.field(axis) == field;
        let response = ui.selectable_label(active, field.axis_title());
        // Clicking the label that is already active changes nothing.
        if response.clicked() && !active {
            log::debug!("axis label clicked: {:?} -> {:?}", axis, field);
            event_queue.queue_event(Box::new(SelectAxisField::new(axis, field)));
        }
    }
}
