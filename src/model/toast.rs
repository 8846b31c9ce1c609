//! Transient notifications.

use std::time::{Duration, Instant};

use super::countdown::Countdown;

pub const TOAST_FIX_ERRORS: &str = "Please fix the highlighted errors before submitting.";
pub const TOAST_SENT: &str = "Message sent successfully!";
pub const TOAST_FAILED: &str = "Submission failed — please try again.";
pub const TOAST_DRAFT_CLEARED: &str = "Draft cleared";

/// Visual weight of a toast, inferred from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Failure,
    Warning,
    Info,
}

impl Severity {
    /// Classifies a toast message by its wording.
    pub fn infer(message: &str) -> Self {
        if message.contains("successfully") {
            Self::Success
        } else if message.contains("failed") {
            Self::Failure
        } else if message.contains("Please fix") {
            Self::Warning
        } else {
            Self::Info
        }
    }
}

/// A single notification that expires on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    message: String,
    severity: Severity,
    countdown: Countdown,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        let message = message.into();
        Self {
            severity: Severity::infer(&message),
            message,
            countdown: Countdown::new(duration),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Advances the expiry timer; returns `true` once the toast should be removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.countdown.tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_of_fixed_messages() {
        assert_eq!(Severity::infer(TOAST_SENT), Severity::Success);
        assert_eq!(Severity::infer(TOAST_FAILED), Severity::Failure);
        assert_eq!(Severity::infer(TOAST_FIX_ERRORS), Severity::Warning);
        assert_eq!(Severity::infer(TOAST_DRAFT_CLEARED), Severity::Info);
    }

    #[test]
    fn success_wins_over_failure_wording() {
        assert_eq!(
            Severity::infer("retry failed, then sent successfully"),
            Severity::Success
        );
    }

    #[test]
    fn toast_expires_after_duration() {
        let mut toast = Toast::new(TOAST_SENT, Duration::from_secs(2));
        let t0 = Instant::now();
        assert!(!toast.tick(t0));
        assert!(!toast.tick(t0 + Duration::from_millis(1999)));
        assert!(toast.tick(t0 + Duration::from_secs(2)));
    }
}
