//! Contact screen: the lead form, contact details and the thanks modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::controller::ContactForm;
use crate::model::{Control, Field, SubmissionStatus};
use crate::tui::action::Action;
use crate::tui::widgets::{FieldView, button, draw_field, draw_thanks_modal, draw_toast};

/// Business name shown in the title bar and footer.
pub const BUSINESS_NAME: &str = "Premier Virtual Solutions";

/// Handles a key press on the contact screen.
pub fn handle_key(form: &mut ContactForm, key: KeyEvent) -> Action {
    if form.is_thanks_open() {
        return handle_modal_key(form, key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => Action::Submit,
        KeyCode::Tab => {
            form.focus_next();
            Action::None
        }
        KeyCode::BackTab => {
            form.focus_prev();
            Action::None
        }
        KeyCode::Esc => Action::Quit,
        code => {
            let focused = form.focused();
            match focused.field() {
                Some(field) if !ctrl => edit_field(form, field, code),
                Some(_) => Action::None,
                None => activate(form, focused, code),
            }
        }
    }
}

/// The modal only answers Tab/Shift+Tab and activation; Esc does not close it.
fn handle_modal_key(form: &mut ContactForm, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => match form.focused() {
            Control::ThanksClose => form.close_thanks(),
            Control::ThanksCopyEmail => form.copy_email(),
            _ => {}
        },
        _ => {}
    }
    Action::None
}

fn edit_field(form: &mut ContactForm, field: Field, code: KeyCode) -> Action {
    let mut value = form.fields().get(field).to_string();
    match code {
        KeyCode::Char(ch) => value.push(ch),
        KeyCode::Backspace => {
            if value.pop().is_none() {
                return Action::None;
            }
        }
        KeyCode::Enter if field == Field::Message => value.push('\n'),
        KeyCode::Enter => return Action::Submit,
        _ => return Action::None,
    }
    form.on_field_change(field, value);
    Action::None
}

fn activate(form: &mut ContactForm, control: Control, code: KeyCode) -> Action {
    if !matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
        return Action::None;
    }
    match control {
        Control::Send => return Action::Submit,
        Control::CopyEmail => form.copy_email(),
        Control::ClearDraft => {
            form.clear_draft();
        }
        _ => {}
    }
    Action::None
}

fn control_for(field: Field) -> Control {
    match field {
        Field::Name => Control::Name,
        Field::Email => Control::Email,
        Field::Message => Control::Message,
    }
}

fn field_view(form: &ContactForm, field: Field) -> FieldView<'_> {
    FieldView {
        label: field.label(),
        value: form.fields().get(field),
        placeholder: field.placeholder(),
        error: form.visible_error(field).map(ToString::to_string),
        focused: form.focused() == control_for(field),
        multiline: field == Field::Message,
    }
}

fn status_color(status: SubmissionStatus) -> Color {
    match status {
        SubmissionStatus::Success => Color::Green,
        SubmissionStatus::Error => Color::Red,
        SubmissionStatus::Idle | SubmissionStatus::Loading => Color::Gray,
    }
}

/// Renders the whole contact screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_contact(form: &ContactForm, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {BUSINESS_NAME} — Contact "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    let [form_area, details_area] =
        Layout::horizontal([Constraint::Min(40), Constraint::Length(42)]).areas(body_area);

    draw_form_column(form, frame, form_area);
    draw_details(form, frame, details_area);

    let hints = if form.is_thanks_open() {
        "Tab/Shift+Tab: move  Enter: select  Ctrl+C: quit"
    } else {
        "Tab/Shift+Tab: next/prev  Enter: send/select  Ctrl+S: send  Esc: quit"
    };
    let footer = Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    if let Some(toast) = form.toast() {
        draw_toast(toast, frame, body_area);
    }
    if form.is_thanks_open() {
        draw_thanks_modal(form.focused(), form.is_copied(), frame, area);
    }
}

fn draw_form_column(form: &ContactForm, frame: &mut Frame, area: Rect) {
    let [
        banner_area,
        name_area,
        email_area,
        message_area,
        buttons_area,
        status_area,
    ] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    if let Some(summary) = form.error_summary() {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("Heads up: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(summary),
        ]))
        .style(Style::default().fg(Color::Red));
        frame.render_widget(banner, banner_area);
    }

    draw_field(&field_view(form, Field::Name), frame, name_area);
    draw_field(&field_view(form, Field::Email), frame, email_area);
    draw_field(&field_view(form, Field::Message), frame, message_area);

    let focused = form.focused();
    let mut buttons = vec![
        button(form.status().button_label(), focused == Control::Send),
        Span::raw("  "),
        button(
            if form.is_copied() { "Copied!" } else { "Copy Email" },
            focused == Control::CopyEmail,
        ),
    ];
    if form.config().allow_clear_draft {
        buttons.push(Span::raw("  "));
        buttons.push(button("Clear Draft", focused == Control::ClearDraft));
    }
    frame.render_widget(Paragraph::new(Line::from(buttons)), buttons_area);

    if let Some(message) = form.submit_message() {
        let status = Paragraph::new(message).style(Style::default().fg(status_color(form.status())));
        frame.render_widget(status, status_area);
    }
}

fn draw_details(form: &ContactForm, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Get in touch ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let label = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Email:", label)),
        Line::from(Span::styled(
            form.config().contact_email.as_str(),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Hours: ", label),
            Span::raw("Evenings and weekends"),
        ]),
        Line::from(vec![
            Span::styled("Support Mode: ", label),
            Span::raw("100% Virtual"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("© {} {BUSINESS_NAME}", chrono::Local::now().format("%Y")),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
