//! Confirmation dialog shown after a successful submission.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::model::Control;

pub const THANKS_TITLE: &str = " Thank you for reaching out ";
pub const THANKS_BODY: &str =
    "Your message was sent successfully. I typically respond during evenings and weekends.";

/// Renders a focusable control as `[ label ]`, highlighted when focused.
pub fn button(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Centers a `width` x `height` box inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Renders the thanks dialog with `focused` highlighted.
#[mutants::skip]
pub fn draw_thanks_modal(focused: Control, copied: bool, frame: &mut Frame, area: Rect) {
    let rect = centered(area, 52.min(area.width), 9.min(area.height));
    let block = Block::default()
        .title(THANKS_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let [body_area, _spacer, buttons_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let body = Paragraph::new(THANKS_BODY).wrap(Wrap { trim: true });
    frame.render_widget(body, body_area);

    let copy_label = if copied { "Copied!" } else { "Copy Email" };
    let buttons = Line::from(vec![
        button(copy_label, focused == Control::ThanksCopyEmail),
        Span::raw("  "),
        button("Close", focused == Control::ThanksClose),
    ])
    .right_aligned();
    frame.render_widget(Paragraph::new(buttons), buttons_area);
}
