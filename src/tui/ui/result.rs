//! Result panel: probability ring, risk badge, charts and explanations.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType,
        Paragraph, Wrap,
    },
    Frame,
};

use crate::application::animation::{circumference, RING_RADIUS};
use crate::application::presenter::ResultView;
use crate::domain::{Comparison, SHORT_LABELS};
use crate::tui::styles::MedicalTheme;

/// Samples along a full turn of the ring.
const RING_SAMPLES: usize = 360;

/// Render the result panel
pub fn render_result(f: &mut Frame, area: Rect, view: &ResultView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(12), // Ring + badge
            Constraint::Min(8),     // Charts
            Constraint::Length(8),  // Explanations
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(chunks[1]);
    render_ring(f, top[0], view);
    render_badge(f, top[1], view);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    render_comparison_bars(f, charts[0], &view.comparison);
    render_profile(f, charts[1], &view.comparison);

    render_explanations(f, chunks[3], &view.explanations);
    render_result_footer(f, chunks[4], view.animating);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Assessment Result", MedicalTheme::title()),
        Span::styled(" │ Remote model estimate", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Points of the visible arc, clockwise from twelve o'clock.
fn arc_points(stroke_offset: f64) -> Vec<(f64, f64)> {
    let filled = (1.0 - stroke_offset / circumference()).clamp(0.0, 1.0);
    let samples = (RING_SAMPLES as f64 * filled).round() as usize;

    (0..samples)
        .flat_map(|i| {
            let theta = FRAC_PI_2 - TAU * (i as f64) / RING_SAMPLES as f64;
            [RING_RADIUS - 3.0, RING_RADIUS, RING_RADIUS + 3.0]
                .map(|r| (r * theta.cos(), r * theta.sin()))
        })
        .collect()
}

fn render_ring(f: &mut Frame, area: Rect, view: &ResultView) {
    let color = MedicalTheme::risk_color(view.tier);
    let arc = arc_points(view.stroke_offset);
    let label = view.percent_text.clone();
    let bound = RING_RADIUS + 10.0;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .marker(Marker::Braille)
        .x_bounds([-bound, bound])
        .y_bounds([-bound, bound])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RING_RADIUS,
                color: MedicalTheme::BG_CARD,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &arc,
                color,
            });
            ctx.print(
                -12.0,
                0.0,
                Span::styled(
                    label.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            );
        });

    f.render_widget(canvas, area);
}

fn render_badge(f: &mut Frame, area: Rect, view: &ResultView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let badge = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", view.badge),
        MedicalTheme::badge(view.tier),
    )))
    .alignment(Alignment::Center);
    f.render_widget(badge, chunks[0]);

    let description = Paragraph::new(Line::from(Span::styled(
        view.description,
        MedicalTheme::text_secondary(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(description, chunks[1]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Disease Probability ",
                    MedicalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::risk(view.tier))
        .percent(u16::from(view.percent))
        .label(view.percent_text.as_str());
    f.render_widget(gauge, chunks[2]);
}

fn bar_value(v: f64) -> (u64, String) {
    if v.is_nan() {
        (0, "-".to_string())
    } else if v.fract() == 0.0 {
        (v.max(0.0) as u64, format!("{v:.0}"))
    } else {
        (v.max(0.0).round() as u64, format!("{v:.1}"))
    }
}

fn render_comparison_bars(f: &mut Frame, area: Rect, comparison: &Comparison) {
    let mut chart = BarChart::default()
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::styled(" Patient ", MedicalTheme::info()),
                    Span::styled("vs ", MedicalTheme::text_muted()),
                    Span::styled("Healthy ", MedicalTheme::text_secondary()),
                ]))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .bar_width(4)
        .bar_gap(0)
        .group_gap(2)
        .value_style(MedicalTheme::text());

    for (_, short, user, baseline) in comparison.rows() {
        let (user_value, user_text) = bar_value(user);
        let (base_value, base_text) = bar_value(baseline);
        let bars = [
            Bar::default()
                .value(user_value)
                .text_value(user_text)
                .style(MedicalTheme::info()),
            Bar::default()
                .value(base_value)
                .text_value(base_text)
                .style(MedicalTheme::border()),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(short)).bars(&bars));
    }

    f.render_widget(chart, area);
}

fn render_profile(f: &mut Frame, area: Rect, comparison: &Comparison) {
    let points: Vec<(f64, f64)> = comparison
        .ratios()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_finite())
        .map(|(i, r)| (i as f64, *r))
        .collect();
    let baseline = [(0.0, 1.0), (4.0, 1.0)];

    let top = points
        .iter()
        .map(|(_, r)| *r)
        .fold(2.0_f64, f64::max)
        .ceil();

    let datasets = vec![
        Dataset::default()
            .name("Healthy")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(MedicalTheme::border())
            .data(&baseline),
        Dataset::default()
            .name("Patient")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(MedicalTheme::info())
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(" Profile (x healthy) ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .x_axis(
            Axis::default()
                .style(MedicalTheme::text_muted())
                .bounds([0.0, 4.0])
                .labels(SHORT_LABELS.to_vec()),
        )
        .y_axis(
            Axis::default()
                .style(MedicalTheme::text_muted())
                .bounds([0.0, top])
                .labels(vec!["0".to_string(), "1".to_string(), format!("{top:.0}")]),
        );

    f.render_widget(chart, area);
}

fn render_explanations(f: &mut Frame, area: Rect, explanations: &[String]) {
    let lines: Vec<Line> = explanations
        .iter()
        .map(|e| {
            Line::from(vec![
                Span::styled(" • ", MedicalTheme::focused()),
                Span::styled(e.as_str(), MedicalTheme::text()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Key Indicators ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn render_result_footer(f: &mut Frame, area: Rect, animating: bool) {
    let mut spans = Vec::new();
    if animating {
        spans.push(Span::styled("[Space] ", MedicalTheme::key_hint()));
        spans.push(Span::styled("Skip ", MedicalTheme::key_desc()));
    }
    spans.extend([
        Span::styled("[E] ", MedicalTheme::key_hint()),
        Span::styled("Export Report ", MedicalTheme::key_desc()),
        Span::styled("[N] ", MedicalTheme::key_hint()),
        Span::styled("New Assessment ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::animation::stroke_offset;

    #[test]
    fn test_arc_tracks_percentage() {
        assert!(arc_points(stroke_offset(0)).is_empty());
        assert_eq!(arc_points(stroke_offset(100)).len(), RING_SAMPLES * 3);
        assert_eq!(arc_points(stroke_offset(50)).len(), RING_SAMPLES / 2 * 3);
    }

    #[test]
    fn test_arc_starts_at_top() {
        let points = arc_points(stroke_offset(10));
        let (x, y) = points[1];
        assert!(x.abs() < 1e-9);
        assert!((y - RING_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_bar_value_formatting() {
        assert_eq!(bar_value(145.0), (145, "145".to_string()));
        assert_eq!(bar_value(2.3), (2, "2.3".to_string()));
        assert_eq!(bar_value(f64::NAN), (0, "-".to_string()));
    }
}
