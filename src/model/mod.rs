mod countdown;
mod fields;
mod focus;
mod status;
mod toast;
mod validation;

pub use countdown::Countdown;
pub use fields::{Field, FieldErrors, FormFields, PartialFields, Touched};
pub use focus::{Control, FocusTrap};
pub use status::SubmissionStatus;
pub use toast::{
    Severity, TOAST_DRAFT_CLEARED, TOAST_FAILED, TOAST_FIX_ERRORS, TOAST_SENT, Toast,
};
pub use validation::{
    MIN_MESSAGE_CHARS, ValidationError, is_valid_email, validate, validate_field,
};
