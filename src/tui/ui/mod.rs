//! UI module: View components for the TUI.
//!
//! Every view draws from a [`UiDescription`]; none of them reads the
//! view-model directly.

pub mod form;
pub mod result;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::presenter::Notification;
use crate::application::UiDescription;
use crate::tui::styles::{MedicalTheme, APP_TITLE};

/// Draw the whole screen for one frame.
pub fn render_screen(f: &mut Frame, ui: &UiDescription) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Disclaimer
        ])
        .split(area);

    render_title_bar(f, chunks[0]);

    if ui.form_visible {
        form::render_form(f, chunks[1], ui);
    } else if let Some(result) = &ui.result {
        result::render_result(f, chunks[1], result);
    }

    render_disclaimer(f, chunks[2]);

    if let Some(note) = &ui.notification {
        render_notification(f, area, note);
    }
}

fn render_title_bar(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {APP_TITLE} "), MedicalTheme::header()),
        Span::styled(" Heart Disease Risk Assessment", MedicalTheme::text_secondary()),
    ]));
    f.render_widget(bar, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: This tool provides indicative estimates and does not replace professional medical evaluation.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Predictions come from a remote statistical model.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Modal popup; the app ignores other keys while it is open.
fn render_notification(f: &mut Frame, area: Rect, note: &Notification) {
    let popup = centered(area, 60, 7);
    let border = if note.is_error {
        MedicalTheme::danger()
    } else {
        MedicalTheme::border_focused()
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", note.title), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(border);

    let body = Paragraph::new(vec![
        Line::from(Span::styled(note.message.as_str(), MedicalTheme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("OK", MedicalTheme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);

    f.render_widget(Clear, popup);
    f.render_widget(body, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
