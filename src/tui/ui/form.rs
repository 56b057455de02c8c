//! Clinical input form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::presenter::FieldView;
use crate::application::UiDescription;
use crate::tui::styles::MedicalTheme;

/// Render the form, the submit control and key hints.
pub fn render_form(f: &mut Frame, area: Rect, ui: &UiDescription) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Submit
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], &ui.fields);
    render_submit(f, chunks[2], ui.submit_label, ui.submit_enabled);
    render_form_footer(f, chunks[3]);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Clinical Inputs", MedicalTheme::title()),
        Span::styled(" │ 12 indicators", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, fields: &[FieldView]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = fields.len().div_ceil(2);
    render_field_column(f, columns[0], &fields[..mid]);
    render_field_column(f, columns[1], &fields[mid..]);
}

fn render_field_column(f: &mut Frame, area: Rect, fields: &[FieldView]) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let (border_style, title_style) = if field.selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut spans = vec![Span::raw(" ")];
        if field.is_choice {
            spans.push(Span::styled("\u{2039} ", MedicalTheme::text_muted()));
            spans.push(Span::styled(field.value.as_str(), MedicalTheme::text()));
            spans.push(Span::styled(" \u{203a}", MedicalTheme::text_muted()));
        } else if field.value.is_empty() {
            spans.push(Span::styled(field.hint, MedicalTheme::text_muted()));
        } else {
            spans.push(Span::styled(field.value.as_str(), MedicalTheme::text()));
        }
        if field.selected && !field.is_choice {
            spans.push(Span::styled("▌", MedicalTheme::cursor()));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_submit(f: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let style = if enabled {
        MedicalTheme::button()
    } else {
        MedicalTheme::button_disabled()
    };

    let button = Paragraph::new(Line::from(Span::styled(format!("  {label}  "), style)))
        .alignment(Alignment::Center);
    f.render_widget(button, area);
}

fn render_form_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
        Span::styled("[←→] ", MedicalTheme::key_hint()),
        Span::styled("Change ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Predict ", MedicalTheme::key_desc()),
        Span::styled("[S] ", MedicalTheme::key_hint()),
        Span::styled("Sample Data ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
