//! Reusable TUI widgets.

pub mod form;
pub mod modal;
pub mod toast;

pub use form::{FieldView, draw_field};
pub use modal::{button, centered, draw_thanks_modal};
pub use toast::draw_toast;

/// Flattens a buffer into one line of text per row, one char per cell.
#[cfg(test)]
pub(crate) fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let mut s = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        s.push('\n');
    }
    s
}
