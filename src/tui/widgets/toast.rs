//! Toast widget: one notification pinned to the bottom-right corner.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::{Severity, Toast};

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Failure => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Magenta,
    }
}

/// Area the toast occupies inside `area`: three rows high, hugging the corner.
pub fn toast_area(message: &str, area: Rect) -> Rect {
    let width = (message.chars().count() as u16 + 4).min(area.width);
    let height = 3.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    }
}

/// Renders `toast` over whatever is underneath.
#[mutants::skip]
pub fn draw_toast(toast: &Toast, frame: &mut Frame, area: Rect) {
    let color = severity_color(toast.severity());
    let rect = toast_area(toast.message(), area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(Line::from(toast.message()))
        .style(Style::default().fg(color))
        .block(block);
    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}
