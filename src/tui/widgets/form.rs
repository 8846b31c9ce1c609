//! Text input widget for the contact form fields.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Everything needed to render one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView<'a> {
    /// Display label shown in the border.
    pub label: &'a str,
    /// Current text value.
    pub value: &'a str,
    /// Hint shown while the value is empty.
    pub placeholder: &'a str,
    /// Error to show under the input, if any.
    pub error: Option<String>,
    pub focused: bool,
    /// Multi-line inputs wrap and keep line breaks.
    pub multiline: bool,
}

/// Renders a bordered input; the error, if any, overlaps the bottom border.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_field(view: &FieldView<'_>, frame: &mut Frame, area: Rect) {
    let border_color = if view.error.is_some() {
        Color::Red
    } else if view.focused {
        Color::Magenta
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!("{} *", view.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let cursor = Span::styled(
        "\u{2588}",
        Style::default().add_modifier(Modifier::SLOW_BLINK),
    );

    let mut lines: Vec<Line> = if view.value.is_empty() {
        vec![Line::from(Span::styled(
            view.placeholder,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        view.value.split('\n').map(Line::from).collect()
    };

    if view.focused {
        if view.value.is_empty() {
            lines = vec![Line::from(cursor)];
        } else if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let mut paragraph = Paragraph::new(lines).block(block);
    if view.multiline {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    frame.render_widget(paragraph, area);

    if let Some(ref err) = view.error {
        let error_line = Paragraph::new(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        ));
        let err_area = Rect {
            x: area.x + 2,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(error_line, err_area);
    }
}
