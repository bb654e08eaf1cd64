use std::{path::PathBuf, thread::JoinHandle};

use derive_new::new;

use app_core::event::{AppEvent, EventState};

use super::{components::Axis, EguiApp};
use crate::backend_state::Field;

// ---------------------------------------------------------------------------
//
//
// EventQueue
//
//
// ---------------------------------------------------------------------------

// TODO: move this into app-core once the borrowing rules around
// `run_events` allow it.

/// The EventQueue stores events that are processed each iteration
/// of the application GUI event loop.
pub struct EventQueue<EguiApp> {
    /// Stores events for later processing.
    queue: Vec<Box<dyn AppEvent<App = EguiApp>>>,
    /// Temporarily stores events that have not yet finished running.
    tmp_backlog: Vec<Box<dyn AppEvent<App = EguiApp>>>,
}

impl<EguiApp> EventQueue<EguiApp> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            tmp_backlog: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: Box<dyn AppEvent<App = EguiApp>>) {
        self.queue.push(event);
    }

    pub fn discard_events(&mut self) {
        self.queue.drain(..);
        self.tmp_backlog.drain(..);
    }
}

impl EguiApp {
    pub fn run_events(&mut self) {
        // Fully drain all queued events.
        while let Some(mut event) = self.event_queue.queue.pop() {
            match event.apply(self) {
                Ok(EventState::Finished) => {
                    self.request_redraw();
                }
                Ok(EventState::Busy) => {
                    // Add busy event to the backlog.
                    self.event_queue.tmp_backlog.push(event);
                }
                Err(err) => {
                    log::error!("event failed: {:?}", err)
                }
            }
        }

        // Putting the backlog back in the queue by swapping the
        // vectors.
        std::mem::swap(
            &mut self.event_queue.queue,
            &mut self.event_queue.tmp_backlog,
        );
    }
}

// ---------------------------------------------------------------------------
//
//
// Events
//
//
// ---------------------------------------------------------------------------

/// Bind a new survey field to one of the chart axes.
#[derive(new)]
pub struct SelectAxisField {
    axis: Axis,
    field: Field,
}

/// Waits for the file dialog thread and loads the picked dataset.
#[derive(new)]
pub struct OpenDatasetRequested {
    thread_handle: Option<JoinHandle<Option<PathBuf>>>,
}

/// Parse the active dataset again from disk.
#[derive(new)]
pub struct ReloadDataset;

// ---------------------------------------------------------------------------
//
//
// apply()
//
//
// ---------------------------------------------------------------------------

impl AppEvent for SelectAxisField {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let previous = app.axes.field(self.axis);
        // Clicking the active field again falls through here unchanged.
        if !app.axes.select(self.axis, self.field) {
            return Ok(EventState::Finished);
        }
        if let Some(data) = app.dataset.survey() {
            app.chart.animate_rebind(self.axis, previous, self.field, data);
        }
        Ok(EventState::Finished)
    }
}

impl AppEvent for OpenDatasetRequested {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        if let Some(handle) = self.thread_handle.take_if(|handle| handle.is_finished()) {
            match handle.join() {
                Ok(Some(path)) => {
                    app.chart.reset();
                    app.dataset.load(path, &mut app.request_tx);
                }
                Ok(None) => (),
                Err(err) => {
                    log::error!("unable to open dataset: {:?}", err)
                }
            };
            Ok(EventState::Finished)
        } else {
            Ok(EventState::Busy)
        }
    }
}

impl AppEvent for ReloadDataset {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        let path = match app.dataset.path() {
            Some(path) => path.to_owned(),
            None if app.config.data_path.is_file() => app.config.data_path.clone(),
            None => {
                return Err(format!(
                    "no dataset to reload, {:?} does not exist",
                    app.config.data_path
                ))
            }
        };
        app.chart.reset();
        app.dataset.load(path, &mut app.request_tx);
        Ok(EventState::Finished)
    }
}
