/// Lifecycle of one submission attempt.
///
/// `Idle → Loading → (Success | Error)`, returning to `Idle` on the next edit
/// or attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl SubmissionStatus {
    /// Returns `true` while a submission is in flight.
    pub fn is_loading(self) -> bool {
        self == Self::Loading
    }

    /// Text of the submit button in this state.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Loading => "Sending…",
            Self::Success => "Sent!",
            Self::Idle | Self::Error => "Send Message",
        }
    }
}
