//! Actions returned by screen event handlers.

/// Something the [`App`](super::App) has to do after a key was handled.
///
/// Everything that only touches form state is applied by the screen directly;
/// these are the effects that need the runtime or end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No further work.
    None,
    /// Validate and send the form.
    Submit,
    /// Leave the application.
    Quit,
}
