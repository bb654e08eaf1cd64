use crate::app::events::{EventQueue, ReloadDataset};
use crate::backend_state::Field;
use crate::EguiApp;

use super::Dataset;

impl Dataset {
    /// Tabular view of the loaded records, one row per state.
    pub fn render(&mut self, event_queue: &mut EventQueue<EguiApp>, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.path() {
                Some(path) => ui.monospace(path.display().to_string()),
                None => ui.label("no dataset loaded"),
            };
            if ui.button("Reload").clicked() {
                event_queue.queue_event(Box::new(ReloadDataset::new()));
            }
        });

        if !self.data.is_up_to_date() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("loading dataset ...");
            });
            return;
        }

        let data = match self.data.value() {
            Ok(data) => data,
            Err(error) => {
                ui.label(error).highlight();
                return;
            }
        };
        if data.skipped_rows > 0 {
            ui.label(format!(
                "{} malformed row(s) were skipped while parsing",
                data.skipped_rows
            ));
        }

        ui.separator();

        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("survey_table")
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Abbr");
                    ui.strong("State");
                    for field in Field::ALL {
                        ui.strong(field.axis_title());
                    }
                    ui.end_row();

                    for record in data.records.iter() {
                        ui.monospace(record.abbr.as_str());
                        ui.label(record.state.as_str());
                        for field in Field::ALL {
                            ui.monospace(field.format_value(record.value(field)));
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
