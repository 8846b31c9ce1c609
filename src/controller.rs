//! The contact form controller.
//!
//! [`ContactForm`] is the single source of truth for field values, errors,
//! touched flags, submission status, the toast, the confirmation modal and
//! keyboard focus. Every external event has one entry point here; rendering
//! only reads.

use std::time::Instant;

use crate::clipboard::Clipboard;
use crate::config::{Config, ErrorDisplay};
use crate::model::{
    Control, Countdown, Field, FieldErrors, FocusTrap, FormFields, PartialFields,
    SubmissionStatus, TOAST_DRAFT_CLEARED, TOAST_FAILED, TOAST_FIX_ERRORS, TOAST_SENT, Toast,
    Touched, ValidationError, validate, validate_field,
};
use crate::storage::{KeyValueStore, delete_draft, load_draft, save_draft};
use crate::submit::{ChallengeProvider, Submission, SubmitError, Transport, obtain_token};

/// Inline message shown next to the button after a successful submission.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Thank you—your message has been sent.";

/// Controls inside the confirmation modal, in tab order.
const THANKS_CONTROLS: [Control; 2] = [Control::ThanksCopyEmail, Control::ThanksClose];

/// Why a submit attempt did not produce a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// A submission is already in flight, or the confirmation is still open.
    Busy,
    /// At least one field failed validation.
    Invalid,
    /// The honeypot was filled in.
    Trapped,
}

/// State and event handlers for the lead-capture form.
pub struct ContactForm {
    config: Config,
    store: Box<dyn KeyValueStore>,
    clipboard: Box<dyn Clipboard>,
    fields: FormFields,
    honeypot: String,
    errors: FieldErrors,
    touched: Touched,
    status: SubmissionStatus,
    submit_message: Option<String>,
    toast: Option<Toast>,
    thanks: Option<FocusTrap<Control>>,
    focus: Control,
    copied: Option<Countdown>,
}

impl ContactForm {
    /// Creates the controller and restores any saved draft.
    pub fn mount(
        config: Config,
        store: Box<dyn KeyValueStore>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let fields = load_draft(store.as_ref(), &config.draft_storage_key).unwrap_or_default();
        if !fields.is_blank() {
            tracing::info!("restored draft");
        }
        Self {
            config,
            store,
            clipboard,
            fields,
            honeypot: String::new(),
            errors: FieldErrors::default(),
            touched: Touched::default(),
            status: SubmissionStatus::Idle,
            submit_message: None,
            toast: None,
            thanks: None,
            focus: Control::Name,
            copied: None,
        }
    }

    // --- editing ---

    /// Replaces a field value, revalidates that field and saves the draft.
    pub fn on_field_change(&mut self, field: Field, value: String) {
        if self.thanks.is_some() {
            return;
        }
        self.errors.set(field, validate_field(field, &value));
        self.fields.set(field, value);
        save_draft(
            self.store.as_ref(),
            &self.config.draft_storage_key,
            &self.fields,
        );
        if matches!(
            self.status,
            SubmissionStatus::Success | SubmissionStatus::Error
        ) {
            self.status = SubmissionStatus::Idle;
        }
    }

    /// Marks a field touched and revalidates it.
    pub fn on_field_blur(&mut self, field: Field) {
        self.touched.mark(field);
        let errors = validate(&PartialFields::only(field, self.fields.get(field)));
        self.errors.set(field, errors.get(field).copied());
    }

    /// Sets the hidden bot-trap field.
    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.honeypot = value.into();
    }

    // --- submission ---

    /// Starts a submission attempt.
    ///
    /// On success the status is `Loading` and the returned body must be sent,
    /// with the outcome reported through [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<Submission, Refusal> {
        if self.status.is_loading() || self.thanks.is_some() {
            tracing::debug!(status = ?self.status, "submit ignored");
            return Err(Refusal::Busy);
        }

        self.errors = validate(&PartialFields::from(&self.fields));
        if !self.errors.is_empty() {
            self.touched.mark_all();
            self.set_toast(TOAST_FIX_ERRORS);
            return Err(Refusal::Invalid);
        }

        if !self.honeypot.is_empty() {
            tracing::info!("honeypot filled, dropping submission");
            return Err(Refusal::Trapped);
        }

        self.status = SubmissionStatus::Loading;
        self.submit_message = None;
        Ok(Submission::from_fields(&self.fields))
    }

    /// Applies the outcome of the request started by [`begin_submit`](Self::begin_submit).
    ///
    /// Ignored unless a submission is in flight.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        if !self.status.is_loading() {
            tracing::warn!(status = ?self.status, "submission outcome without a pending submission");
            return;
        }
        match result {
            Ok(()) => {
                self.status = SubmissionStatus::Success;
                self.submit_message = Some(SUBMIT_SUCCESS_MESSAGE.to_string());
                self.set_toast(TOAST_SENT);
                delete_draft(self.store.as_ref(), &self.config.draft_storage_key);
                self.fields.clear();
                self.errors = FieldErrors::default();
                self.touched.reset();
                self.open_thanks();
            }
            Err(error) => {
                tracing::warn!(%error, "submission failed");
                self.status = SubmissionStatus::Error;
                self.submit_message = Some(self.failure_message(&error));
                self.set_toast(TOAST_FAILED);
            }
        }
    }

    /// Runs a whole submission: validate, get a token, send, apply the outcome.
    ///
    /// Returns the final status, or why no request was made.
    pub async fn submit(
        &mut self,
        transport: &dyn Transport,
        challenge: Option<&dyn ChallengeProvider>,
    ) -> Result<SubmissionStatus, Refusal> {
        let submission = self.begin_submit()?;
        let site_key = self.config.challenge_site_key().map(str::to_string);
        let limit = self.config.challenge_timeout();
        let token = obtain_token(site_key.as_deref(), challenge, limit).await;
        let result = transport.send(&submission.with_token(token)).await;
        self.finish_submit(result);
        Ok(self.status)
    }

    fn failure_message(&self, error: &SubmitError) -> String {
        let email = &self.config.contact_email;
        match error {
            SubmitError::Rejected {
                message: Some(detail),
                ..
            } => format!("Sorry, something went wrong ({detail}). Please email {email} directly."),
            _ => format!("Sorry, something went wrong. Please email {email} directly."),
        }
    }

    // --- auxiliary actions ---

    /// Copies the contact address. Failures only reset the indicator.
    pub fn copy_email(&mut self) {
        match self.clipboard.write_text(&self.config.contact_email) {
            Ok(()) => {
                self.copied = Some(Countdown::new(self.config.copied_indicator_duration()));
            }
            Err(error) => {
                tracing::debug!(%error, "copy to clipboard failed");
                self.copied = None;
            }
        }
    }

    /// Discards the draft and blanks the form.
    ///
    /// Returns `false` without doing anything when the action is disabled or
    /// a submission is in flight.
    pub fn clear_draft(&mut self) -> bool {
        if !self.config.allow_clear_draft || self.status.is_loading() {
            return false;
        }
        delete_draft(self.store.as_ref(), &self.config.draft_storage_key);
        self.fields.clear();
        self.errors = FieldErrors::default();
        self.touched.reset();
        self.status = SubmissionStatus::Idle;
        self.submit_message = None;
        self.set_toast(TOAST_DRAFT_CLEARED);
        true
    }

    /// Shows `message`, replacing any current toast.
    pub fn set_toast(&mut self, message: &str) {
        self.toast = Some(Toast::new(message, self.config.toast_duration()));
    }

    /// Advances the toast and "copied" timers.
    pub fn tick(&mut self, now: Instant) {
        if let Some(toast) = &mut self.toast
            && toast.tick(now)
        {
            self.toast = None;
        }
        if let Some(copied) = &mut self.copied
            && copied.tick(now)
        {
            self.copied = None;
        }
    }

    // --- focus and modal ---

    /// Controls reachable with Tab while the form is active.
    pub fn form_controls(&self) -> Vec<Control> {
        let mut controls = vec![
            Control::Name,
            Control::Email,
            Control::Message,
            Control::Send,
            Control::CopyEmail,
        ];
        if self.config.allow_clear_draft {
            controls.push(Control::ClearDraft);
        }
        controls
    }

    /// The focused control; inside the modal while it is open.
    pub fn focused(&self) -> Control {
        self.thanks.as_ref().map_or(self.focus, FocusTrap::current)
    }

    /// Tab.
    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    /// Shift+Tab.
    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, step: isize) {
        if let Some(trap) = &mut self.thanks {
            if step > 0 {
                trap.next();
            } else {
                trap.prev();
            }
            return;
        }
        let controls = self.form_controls();
        let len = controls.len() as isize;
        let index = controls.iter().position(|c| *c == self.focus).unwrap_or(0) as isize;
        let target = controls[(index + step).rem_euclid(len) as usize];
        self.move_focus(target);
    }

    /// Moves focus to `control` if it is reachable; returns whether it moved.
    pub fn focus(&mut self, control: Control) -> bool {
        if let Some(trap) = &mut self.thanks {
            return trap.focus(control);
        }
        if !self.form_controls().contains(&control) {
            return false;
        }
        self.move_focus(control);
        true
    }

    fn move_focus(&mut self, target: Control) {
        if target != self.focus
            && let Some(field) = self.focus.field()
        {
            self.on_field_blur(field);
        }
        self.focus = target;
    }

    fn open_thanks(&mut self) {
        self.thanks = FocusTrap::engage(
            self.focus,
            THANKS_CONTROLS.to_vec(),
            Some(Control::ThanksClose),
        );
    }

    /// Closes the confirmation and restores the focus it took.
    pub fn close_thanks(&mut self) {
        if let Some(trap) = self.thanks.take() {
            self.focus = trap.release();
        }
    }

    pub fn is_thanks_open(&self) -> bool {
        self.thanks.is_some()
    }

    // --- read access ---

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// All computed errors, regardless of display policy.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn touched(&self) -> &Touched {
        &self.touched
    }

    /// The error to display for `field` under the configured policy.
    pub fn visible_error(&self, field: Field) -> Option<&ValidationError> {
        match self.config.error_display {
            ErrorDisplay::Eager => self.errors.get(field),
            ErrorDisplay::Touched if self.touched.get(field) => self.errors.get(field),
            ErrorDisplay::Touched => None,
        }
    }

    /// Banner text summarising the visible errors.
    pub fn error_summary(&self) -> Option<String> {
        let count = Field::ALL
            .iter()
            .filter(|f| self.visible_error(**f).is_some())
            .count();
        match count {
            0 => None,
            1 => Some("Please fix 1 error below.".to_string()),
            n => Some(format!("Please fix {n} errors below.")),
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn submit_message(&self) -> Option<&str> {
        self.submit_message.as_deref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Whether the "Copied!" indicator is showing.
    pub fn is_copied(&self) -> bool {
        self.copied.is_some()
    }
}
