/// An action triggered in the UI that mutates application state. Events
/// that wait on the backend return [`EventState::Busy`] and are requeued
/// by the caller until they finish.
pub trait AppEvent {
    type App;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}

pub enum EventState {
    Finished,
    Busy,
}
