#![warn(clippy::all, rust_2018_idioms)]

//! Frontend/backend plumbing shared by the streu app: a backend event loop
//! running on its own thread, request linkers with drop-cancellation, and
//! the `UIParameter` cell that carries asynchronously computed values into
//! immediate-mode UI state.

pub mod backend;
pub mod event;
pub mod frontend;
pub mod string_error;

/// Panic message for sends on the request channel; the backend outlives the
/// UI by construction, so a closed channel means the loop died early.
pub const BACKEND_HUNG_UP_MSG: &str = "backend event loop hung up unexpectedly";

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::backend::{request_stop, BackendEventLoop, BackendLink, BackendState};
    use crate::frontend::UIParameter;

    struct TestState;
    impl BackendState for TestState {}

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn dropping_the_receiver_cancels_a_pending_request() {
        init();

        let (request_tx, request_rx) = std::sync::mpsc::channel();
        let eventloop_handle = BackendEventLoop::new(request_rx, TestState).run();

        let tic = Instant::now();
        let (rx, linker) = BackendLink::new(
            "sleep for one second",
            |_: &mut BackendEventLoop<TestState>| {
                std::thread::sleep(Duration::from_millis(1000));
            },
        );

        // Dropping the receiver marks the request cancelled, so the backend
        // must skip the one second sleep ...
        drop(rx);
        assert!(linker.is_cancelled());
        request_tx.send(Box::new(linker)).unwrap();

        // ... and stopping joins the loop, which would otherwise be stuck
        // sleeping well past the assertion below.
        request_stop(&request_tx, eventloop_handle);
        assert!(tic.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn ui_parameter_receives_a_backend_result() {
        init();

        let (request_tx, request_rx) = std::sync::mpsc::channel();
        let eventloop_handle = BackendEventLoop::new(request_rx, TestState).run();

        let mut param = UIParameter::new(0);
        assert!(param.is_up_to_date());

        let (rx, linker) = BackendLink::new(
            "compute the answer",
            |_: &mut BackendEventLoop<TestState>| 7,
        );
        param.set_recv(rx);
        assert!(!param.is_up_to_date());
        request_tx.send(Box::new(linker)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while !param.try_update() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(*param.value(), 7);
        assert!(param.is_up_to_date());

        request_stop(&request_tx, eventloop_handle);
    }
}
