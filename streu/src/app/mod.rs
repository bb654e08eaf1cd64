mod components;
pub mod config;
mod events;

use std::{sync::mpsc::Sender, thread::JoinHandle};

use crate::BackendAppState;
use app_core::backend::BackendRequest;
use components::{AxisSelection, Chart, Dataset};
use config::Config;
use events::{EventQueue, OpenDatasetRequested, ReloadDataset};

pub type DynRequestSender = Sender<Box<dyn BackendRequest<BackendAppState>>>;

/// Height reserved below the chart for the clickable x-axis labels.
const AXIS_LABEL_STRIP_HEIGHT: f32 = 28.0;

pub struct EguiApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    axes: AxisSelection,
    chart: Chart,
    dataset: Dataset,
    request_tx: DynRequestSender,
    shortcuts_modal_open: bool,
    ui_selection: UISelection,
    event_queue: EventQueue<Self>,
    request_redraw: Option<()>,
}

#[derive(Debug, PartialEq, Eq)]
enum UISelection {
    Chart,
    DataTable,
    Preferences,
}

impl UISelection {
    fn next(&self) -> Self {
        match self {
            UISelection::Chart => Self::DataTable,
            UISelection::DataTable => Self::Chart,
            UISelection::Preferences => Self::Chart,
        }
    }
}

impl EguiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        mut request_tx: Sender<Box<dyn BackendRequest<BackendAppState>>>,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        let mut dataset = Dataset::default();
        if config.data_path.is_file() {
            dataset.load(config.data_path.clone(), &mut request_tx);
        } else {
            log::info!(
                "dataset {:?} does not exist, starting with an empty session",
                config.data_path
            );
        }

        Self {
            config,
            backend_thread_handle: Some(backend_thread_handle),
            axes: Default::default(),
            chart: Default::default(),
            dataset,
            request_tx,
            shortcuts_modal_open: false,
            ui_selection: UISelection::Chart,
            event_queue: EventQueue::<Self>::new(),
            request_redraw: None,
        }
    }

    fn reset_state(&mut self) {
        self.dataset = Default::default();
        self.axes = Default::default();
        self.chart.reset();
        self.event_queue.discard_events();
    }

    fn update_state(&mut self) {
        self.run_events();
        if self.dataset.try_update() {
            // A transition still in flight was computed from the previous
            // records, even when the record count happens to match.
            self.chart.reset();
            self.request_redraw();
        }
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(_) = self.request_redraw.take() {
            ctx.request_repaint();
        }

        self.update_state();

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Circle main window view.
            if i.key_pressed(egui::Key::F3) {
                self.ui_selection = self.ui_selection.next();
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                // Quitting cannot be requested from within here, the UI stops,
                // but not the backend thread.
                should_quit = true;
            }
            // Open preferences.
            if i.key_pressed(egui::Key::F12) {
                self.ui_selection = UISelection::Preferences;
            }
            if i.key_pressed(egui::Key::O) && i.modifiers.ctrl {
                log::debug!("open dialog to select a dataset");
                let handle = std::thread::spawn(open_dataset_dialog);
                let event = OpenDatasetRequested::new(Some(handle));
                self.event_queue.queue_event(Box::new(event));
            }
        });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui);
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.request_tx, handle);
        }
    }
}

impl EguiApp {
    fn central_panel(&mut self, ui: &mut egui::Ui) {
        use UISelection as U;
        match self.ui_selection {
            U::Chart => self.chart_view(ui),
            U::DataTable => self.dataset.render(&mut self.event_queue, ui),
            U::Preferences => self.config.render(ui),
        }
    }

    fn chart_view(&mut self, ui: &mut egui::Ui) {
        if !self.dataset.data.is_up_to_date() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("loading dataset ...");
            });
            return;
        }
        let data = match self.dataset.data.value() {
            Ok(data) => data,
            Err(error) => {
                ui.label(error).highlight();
                ui.label("Load a dataset via File > Open Dataset (CTRL + O).");
                return;
            }
        };

        ui.horizontal(|ui| {
            self.axes.render_y_labels(&mut self.event_queue, ui);
            ui.vertical(|ui| {
                let chart_height = (ui.available_height() - AXIS_LABEL_STRIP_HEIGHT).max(120.0);
                self.chart.render(
                    data,
                    &self.axes,
                    self.config.point_radius,
                    chart_height,
                    ui,
                );
                self.axes.render_x_labels(&mut self.event_queue, ui);
            });
        });
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Dataset ...").clicked() {
                        log::debug!("open dialog to select a dataset");
                        let handle = std::thread::spawn(open_dataset_dialog);
                        let event = OpenDatasetRequested::new(Some(handle));
                        self.event_queue.queue_event(Box::new(event));
                    }
                    if ui.button("Reload").clicked() {
                        self.event_queue.queue_event(Box::new(ReloadDataset::new()));
                    }
                    if ui.button("Preferences").clicked() {
                        self.ui_selection = UISelection::Preferences
                    };
                    if ui.button("Reset Session").clicked() {
                        self.reset_state();
                    };
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                // Selection of ui view.
                ui.menu_button("View", |ui| {
                    ui.selectable_value(&mut self.ui_selection, UISelection::Chart, "Chart");
                    ui.selectable_value(
                        &mut self.ui_selection,
                        UISelection::DataTable,
                        "Data Table",
                    );
                });

                ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_buttons(ui);
                });
            };
        });
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + O = Open Dataset");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F3 = Cycle View");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                    ui.label("F12 = Open Preferences");
                    ui.separator();
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }
}

fn open_dataset_dialog() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter("delimited text", &["csv", "tsv", "txt"])
        .pick_file()
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::time::{Duration, Instant};

    use app_core::backend::{request_stop, BackendEventLoop};

    use crate::backend_state::{Field, Record, SurveyData};

    use super::components::Axis;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn test_app(request_tx: DynRequestSender) -> EguiApp {
        EguiApp {
            config: Config::default(),
            backend_thread_handle: None,
            axes: Default::default(),
            chart: Default::default(),
            dataset: Default::default(),
            request_tx,
            shortcuts_modal_open: false,
            ui_selection: UISelection::Chart,
            event_queue: EventQueue::new(),
            request_redraw: None,
        }
    }

    #[test]
    fn a_dataset_arriving_mid_glide_drops_the_transition() {
        init();
        let (request_tx, request_rx) = channel();
        let handle = BackendEventLoop::new(request_rx, BackendAppState::default()).run();
        let mut app = test_app(request_tx);

        // Same record count as the file below, so the glide could not be
        // recognized as stale by counting records.
        let stale = SurveyData {
            path: std::path::PathBuf::from("stale.csv"),
            records: vec![Record {
                abbr: "ZZ".to_string(),
                state: "Nowhere".to_string(),
                poverty: 99.0,
                age: 99.0,
                income: 99.0,
                healthcare: 99.0,
                obesity: 99.0,
                smokes: 99.0,
            }],
            skipped_rows: 0,
        };
        app.chart
            .animate_rebind(Axis::X, Field::Poverty, Field::Income, &stale);
        assert!(app.chart.is_animating());

        let path = std::env::temp_dir().join("streu_test_arrival_drops_glide.csv");
        std::fs::write(
            &path,
            "abbr,state,poverty,age,income,healthcare,obesity,smokes\n\
             TX,Texas,17.2,34.3,53035,22.1,31.9,14.5\n",
        )
        .unwrap();
        app.dataset.load(path.clone(), &mut app.request_tx);

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.dataset.survey().is_none() && Instant::now() < deadline {
            app.update_state();
            std::thread::sleep(Duration::from_millis(10));
        }
        std::fs::remove_file(&path).unwrap();

        assert!(app.dataset.survey().is_some());
        assert!(!app.chart.is_animating());

        request_stop(&app.request_tx, handle);
    }
}
