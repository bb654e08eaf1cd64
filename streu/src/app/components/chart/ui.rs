use egui::{Align2, Color32, RichText};
use egui_plot::{PlotBounds, PlotPoint, Points, Text};

use crate::app::components::{Axis, AxisSelection};
use crate::backend_state::SurveyData;

use super::LinearScale;

/// Fill of the scatter points, drawn translucent while resting.
const POINT_FILL: Color32 = Color32::from_rgb(70, 130, 180);
/// Extra radius a hovered point gains.
const HOVER_GROWTH: f32 = 4.0;
/// Font size of the short state codes inside the points.
const LABEL_FONT_SIZE: f32 = 10.0;
/// Screen-space slack around a point that still counts as hovering it.
const PICK_SLACK: f32 = 2.0;

impl super::Chart {
    pub fn render(
        &mut self,
        data: &SurveyData,
        selection: &AxisSelection,
        point_radius: f32,
        height: f32,
        ui: &mut egui::Ui,
    ) {
        let now = ui.input(|i| i.time);
        self.last_time = now;

        let (x_domain, x_fracs) = self.axis_positions(Axis::X, data, selection.x_field(), now);
        let (y_domain, y_fracs) = self.axis_positions(Axis::Y, data, selection.y_field(), now);

        // Fractions only become coordinates once the (possibly animated)
        // domain of this frame is known.
        let x_scale = LinearScale::new((0.0, 1.0), x_domain);
        let y_scale = LinearScale::new((0.0, 1.0), y_domain);
        let positions: Vec<[f64; 2]> = x_fracs
            .iter()
            .zip(y_fracs.iter())
            .map(|(x_frac, y_frac)| [x_scale.map(*x_frac), y_scale.map(*y_frac)])
            .collect();

        egui_plot::Plot::new("survey_scatter")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_x(false)
            .show_y(false)
            .height(height)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [x_domain.0, y_domain.0],
                    [x_domain.1, y_domain.1],
                ));

                let hovered = hovered_record(plot_ui, &positions, point_radius);

                let resting: Vec<[f64; 2]> = positions
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| Some(*idx) != hovered)
                    .map(|(_, position)| *position)
                    .collect();
                plot_ui.points(
                    Points::new(resting)
                        .radius(point_radius)
                        .color(POINT_FILL.gamma_multiply(0.55))
                        .filled(true),
                );
                if let Some(idx) = hovered {
                    plot_ui.points(
                        Points::new(vec![positions[idx]])
                            .radius(point_radius + HOVER_GROWTH)
                            .color(POINT_FILL)
                            .filled(true),
                    );
                    // Unfilled marker on top reads as the hover stroke.
                    plot_ui.points(
                        Points::new(vec![positions[idx]])
                            .radius(point_radius + HOVER_GROWTH)
                            .color(Color32::WHITE)
                            .filled(false),
                    );
                }

                for (record, [x, y]) in data.records.iter().zip(positions.iter()) {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(*x, *y),
                            RichText::new(record.abbr.as_str())
                                .size(LABEL_FONT_SIZE)
                                .color(Color32::WHITE),
                        )
                        .anchor(Align2::CENTER_CENTER),
                    );
                }

                if let Some(record) = hovered.and_then(|idx| data.records.get(idx)) {
                    let (x_field, y_field) = (selection.x_field(), selection.y_field());
                    plot_ui.response().clone().on_hover_ui_at_pointer(|ui| {
                        ui.strong(record.state.as_str());
                        ui.label(format!(
                            "{}: {}",
                            x_field.tooltip_label(),
                            x_field.format_value(record.value(x_field))
                        ));
                        ui.label(format!(
                            "{}: {}",
                            y_field.tooltip_label(),
                            y_field.format_value(record.value(y_field))
                        ));
                    });
                }
            });

        if self.is_animating() {
            ui.ctx().request_repaint();
        }
    }
}

/// Index of the record under the pointer, if any. Ties go to the closest
/// point center in screen space.
fn hovered_record(
    plot_ui: &egui_plot::PlotUi,
    positions: &[[f64; 2]],
    point_radius: f32,
) -> Option<usize> {
    let pointer = plot_ui.response().hover_pos()?;
    let mut best_idx = None;
    let mut best_dist = point_radius + PICK_SLACK;
    for (idx, [x, y]) in positions.iter().enumerate() {
        let center = plot_ui
            .transform()
            .position_from_point(&PlotPoint::new(*x, *y));
        let dist = center.distance(pointer);
        if dist <= best_dist {
            best_dist = dist;
            best_idx = Some(idx);
        }
    }
    best_idx
}
