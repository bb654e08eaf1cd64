use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError},
    Arc,
};
use std::time::Duration;

use super::{BackendEventLoop, BackendState};

/// A request sent to the backend event loop. The loop does not know the
/// result type of the wrapped action, hence the object-safe indirection.
pub trait BackendRequest<S: BackendState>: Send {
    fn run_on_backend(self: Box<Self>, backend: &mut BackendEventLoop<S>);
    fn describe(&self) -> &str;
}

/// Links a closure to be run on the backend with the channel over which the
/// result is returned. The `cancelled` flag is shared with the result
/// receiver, which raises it when dropped.
pub struct BackendLink<T, S, F>
where
    S: BackendState,
    F: FnOnce(&mut BackendEventLoop<S>) -> T,
{
    description: String,
    action: F,
    result_tx: Sender<T>,
    cancelled: Arc<AtomicBool>,
    _marker: std::marker::PhantomData<S>,
}

/// Receiving end of a [`BackendLink`]. Dropping it cancels the linked
/// request if the backend has not started running it yet.
pub struct LinkReceiver<T> {
    rx: Receiver<T>,
    cancelled: Arc<AtomicBool>,
}

impl<T, S, F> BackendLink<T, S, F>
where
    S: BackendState,
    F: FnOnce(&mut BackendEventLoop<S>) -> T,
{
    pub fn new(description: impl Into<String>, action: F) -> (LinkReceiver<T>, Self) {
        let (result_tx, rx) = channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let receiver = LinkReceiver {
            rx,
            cancelled: Arc::clone(&cancelled),
        };
        let linker = Self {
            description: description.into(),
            action,
            result_tx,
            cancelled,
            _marker: std::marker::PhantomData,
        };
        (receiver, linker)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl<T, S, F> BackendRequest<S> for BackendLink<T, S, F>
where
    T: Send,
    S: BackendState + Send,
    F: FnOnce(&mut BackendEventLoop<S>) -> T + Send,
{
    fn run_on_backend(self: Box<Self>, backend: &mut BackendEventLoop<S>) {
        if self.is_cancelled() {
            log::debug!("request '{}' cancelled before start", self.description);
            return;
        }
        let Self {
            description,
            action,
            result_tx,
            cancelled,
            _marker,
        } = *self;
        let result = action(backend);
        if cancelled.load(Ordering::Acquire) {
            log::debug!("request '{}' cancelled while running", description);
            return;
        }
        // The receiver may have hung up between the check above and this
        // send, which is fine, the result is simply dropped.
        let _ = result_tx.send(result);
    }

    fn describe(&self) -> &str {
        &self.description
    }
}

impl<T> LinkReceiver<T> {
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

impl<T> Drop for LinkReceiver<T> {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
