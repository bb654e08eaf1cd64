use std::sync::mpsc::TryRecvError;

use crate::backend::LinkReceiver;

/// A value displayed in the UI that may be recomputed by the backend. While
/// a recomputation is pending the stale value stays readable, so immediate
/// mode rendering never blocks on the backend.
pub struct UIParameter<T> {
    pending_update_rx: Option<LinkReceiver<T>>,
    value: T,
}

impl<T> UIParameter<T> {
    pub fn new(value: T) -> Self {
        Self {
            pending_update_rx: None,
            value,
        }
    }

    /// Polls the pending update, if any. Returns `true` exactly when a new
    /// value arrived in this call, so callers can trigger a redraw.
    pub fn try_update(&mut self) -> bool {
        let Some(rx) = &self.pending_update_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(value) => {
                self.value = value;
                self.pending_update_rx = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                log::error!("backend dropped a pending update, keeping stale value");
                self.pending_update_rx = None;
                false
            }
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending_update_rx.is_none()
    }

    pub fn set_recv(&mut self, rx: LinkReceiver<T>) {
        self.pending_update_rx = Some(rx);
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}
