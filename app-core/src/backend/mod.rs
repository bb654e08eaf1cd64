mod backend_link;
mod eventloop;

pub use backend_link::{BackendLink, BackendRequest, LinkReceiver};
pub use eventloop::{request_stop, BackendEventLoop};

/// Marker for the state struct owned by the backend event loop.
pub trait BackendState {}
