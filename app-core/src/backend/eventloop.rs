use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::{BackendLink, BackendRequest, BackendState};

const REQUEST_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs on its own thread and owns the backend state `S`. UI threads hand
/// it work as boxed [`BackendRequest`]s over the request channel.
pub struct BackendEventLoop<S: BackendState> {
    pub state: S,
    request_rx: Receiver<Box<dyn BackendRequest<S>>>,
    should_stop: bool,
}

impl<S: BackendState + Send + 'static> BackendEventLoop<S> {
    pub fn new(request_rx: Receiver<Box<dyn BackendRequest<S>>>, state: S) -> Self {
        Self {
            state,
            request_rx,
            should_stop: false,
        }
    }

    /// Waits for the next request and runs it. Returns `false` when the
    /// loop should wind down.
    fn update(&mut self) -> bool {
        match self.request_rx.recv_timeout(REQUEST_POLL_INTERVAL) {
            Ok(request) => {
                log::debug!("running request '{}'", request.describe());
                request.run_on_backend(self);
            }
            Err(RecvTimeoutError::Timeout) => (),
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("request channel disconnected, stopping backend event loop");
                self.should_stop = true;
            }
        }
        !self.should_stop
    }

    pub fn run(mut self) -> JoinHandle<()> {
        log::debug!("starting backend event loop");
        std::thread::spawn(move || while self.update() {})
    }

    pub fn signal_stop(&mut self) {
        self.should_stop = true;
    }
}

/// Asks the event loop to stop and blocks until its thread has joined.
pub fn request_stop<S: BackendState + Send + 'static>(
    request_tx: &Sender<Box<dyn BackendRequest<S>>>,
    handle: JoinHandle<()>,
) {
    let (rx, linker) = BackendLink::new("stop event loop", |backend: &mut BackendEventLoop<S>| {
        backend.signal_stop();
        true
    });
    // The receiver has to stay alive until the loop confirms the request,
    // dropping it earlier would cancel the stop.
    if request_tx.send(Box::new(linker)).is_err() {
        log::warn!("backend event loop already gone");
    } else if let Err(err) = rx.recv_timeout(Duration::from_secs(10)) {
        log::warn!("backend did not confirm the stop request: {}", err);
    }
    if handle.join().is_err() {
        log::error!("backend event loop panicked");
    }
}
