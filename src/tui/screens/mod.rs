//! TUI screen implementations.

pub mod contact;

pub use contact::{draw_contact, handle_key};
