//! PDF report adapter: Implementation of ReportExporter.
//!
//! The document is first laid out as positioned text and rules, then drawn
//! with printpdf. Layout coordinates are millimetres from the top-left
//! corner of an A4 page; PDF space starts bottom-left, so drawing flips y.

use std::fs;
use std::path::PathBuf;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

use crate::domain::RiskTier;
use crate::ports::{Report, ReportError, ReportExporter};

/// File name of the exported document.
pub const REPORT_FILE_NAME: &str = "CardioPulse_Medical_Report.pdf";

const TITLE: &str = "CardioPulse AI";
const SUBTITLE: &str = "Advanced Diagnostic Report";
const FOOTER: &str =
    "Generated by CardioPulse Neural Engine. Consult a physician for clinical diagnosis.";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const HEADER_HEIGHT: f32 = 40.0;
const MARGIN: f32 = 20.0;
const FACTORS_TOP: f32 = 170.0;
const CONTINUATION_TOP: f32 = 30.0;
/// Factor lines stop here to stay clear of the footer.
const BODY_BOTTOM: f32 = 265.0;
const FACTOR_SPACING: f32 = 8.0;
const FOOTER_Y: f32 = 280.0;
const PAGE_COUNTER_Y: f32 = 288.0;
const PT_TO_MM: f32 = 0.3528;

type Rgb8 = (u8, u8, u8);

const BRAND: Rgb8 = (59, 130, 246);
const WHITE: Rgb8 = (255, 255, 255);
const INK: Rgb8 = (0, 0, 0);
const GREY: Rgb8 = (80, 80, 80);
const FOOTER_GREY: Rgb8 = (150, 150, 150);
const RULE_GREY: Rgb8 = (200, 200, 200);
const DANGER: Rgb8 = (220, 53, 69);
const SAFE: Rgb8 = (40, 167, 69);

/// Exporter writing a PDF into a fixed directory.
pub struct PdfReportExporter {
    dir: PathBuf,
}

impl PdfReportExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportExporter for PdfReportExporter {
    fn export(&self, report: &Report) -> Result<PathBuf, ReportError> {
        let bytes = render_pdf(&layout(report))?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(REPORT_FILE_NAME);
        fs::write(&path, bytes)?;
        tracing::info!("Report written to {}", path.display());
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
struct Text {
    content: String,
    x: f32,
    y: f32,
    size: f32,
    weight: Weight,
    color: Rgb8,
}

impl Text {
    fn new(content: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        Self {
            content: content.into(),
            x,
            y,
            size,
            weight: Weight::Regular,
            color: INK,
        }
    }

    fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    fn color(mut self, color: Rgb8) -> Self {
        self.color = color;
        self
    }
}

/// One laid-out page.
#[derive(Debug, Clone, Default, PartialEq)]
struct Page {
    header_bar: bool,
    texts: Vec<Text>,
    /// Horizontal rules, by y
    rules: Vec<f32>,
}

impl Page {
    fn push(&mut self, text: Text) {
        self.texts.push(text);
    }

    /// Heading plus underline; returns where the section body starts.
    fn section(&mut self, title: &str, top: f32) -> f32 {
        self.push(Text::new(title, MARGIN, top, 14.0).bold());
        self.rules.push(top + 5.0);
        top + 15.0
    }
}

fn status_color(tier: RiskTier) -> Rgb8 {
    match tier {
        RiskTier::High => DANGER,
        RiskTier::Low => SAFE,
    }
}

/// Helvetica averages about half an em per glyph.
fn centered_x(text: &str, size: f32) -> f32 {
    let width = text.chars().count() as f32 * size * 0.5 * PT_TO_MM;
    ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
}

fn first_page(report: &Report) -> Page {
    let v = &report.vitals;
    let mut page = Page {
        header_bar: true,
        ..Page::default()
    };

    page.push(Text::new(TITLE, MARGIN, 20.0, 22.0).bold().color(WHITE));
    page.push(Text::new(SUBTITLE, MARGIN, 30.0, 10.0).color(WHITE));
    page.push(
        Text::new(
            format!("Date: {}", report.generated_at.format("%Y-%m-%d")),
            150.0,
            30.0,
            10.0,
        )
        .color(WHITE),
    );

    let top = page.section("Patient Vitals", 60.0);
    let left = MARGIN + 5.0;
    let right = 110.0;
    page.push(Text::new(format!("- Age: {}", v.age), left, top, 12.0));
    page.push(Text::new(format!("- Sex: {}", v.sex), right, top, 12.0));
    page.push(Text::new(
        format!("- Resting BP: {} mm Hg", v.resting_bp),
        left,
        top + 10.0,
        12.0,
    ));
    page.push(Text::new(
        format!("- Cholesterol: {} mg/dl", v.cholesterol),
        right,
        top + 10.0,
        12.0,
    ));
    page.push(Text::new(
        format!("- Max Heart Rate: {} bpm", v.max_hr),
        left,
        top + 20.0,
        12.0,
    ));

    page.section("AI Analysis Result", 120.0);
    page.push(
        Text::new(format!("Status: {}", report.risk_label), MARGIN, 140.0, 18.0)
            .bold()
            .color(status_color(report.tier)),
    );
    page.push(
        Text::new(
            format!("Calculated Probability: {}", report.probability),
            MARGIN,
            150.0,
            12.0,
        )
        .color(GREY),
    );

    page
}

/// Lay out every page, footers and page counters included.
fn layout(report: &Report) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = first_page(report);

    if !report.factors.is_empty() {
        let mut y = current.section("Contributing Factors", FACTORS_TOP);
        for factor in &report.factors {
            if y > BODY_BOTTOM {
                pages.push(std::mem::take(&mut current));
                y = current.section("Contributing Factors (continued)", CONTINUATION_TOP);
            }
            current.push(Text::new(format!("- {factor}"), MARGIN + 5.0, y, 11.0));
            y += FACTOR_SPACING;
        }
    }
    pages.push(current);

    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        page.push(Text::new(FOOTER, centered_x(FOOTER, 9.0), FOOTER_Y, 9.0).color(FOOTER_GREY));
        page.push(
            Text::new(
                format!("Page {} of {}", i + 1, total),
                PAGE_WIDTH - MARGIN - 15.0,
                PAGE_COUNTER_Y,
                9.0,
            )
            .color(FOOTER_GREY),
        );
    }

    pages
}

fn rgb((r, g, b): Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn point(x: f32, y: f32) -> Point {
    Point::new(Mm(x), Mm(PAGE_HEIGHT - y))
}

fn pdf_error(e: printpdf::Error) -> ReportError {
    ReportError::Pdf(e.to_string())
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    if page.header_bar {
        layer.set_fill_color(rgb(BRAND));
        layer.add_rect(Rect::new(
            Mm(0.0),
            Mm(PAGE_HEIGHT - HEADER_HEIGHT),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
        ));
    }

    layer.set_outline_color(rgb(RULE_GREY));
    layer.set_outline_thickness(0.5);
    for &y in &page.rules {
        layer.add_line(Line {
            points: vec![
                (point(MARGIN, y), false),
                (point(PAGE_WIDTH - MARGIN, y), false),
            ],
            is_closed: false,
        });
    }

    for text in &page.texts {
        let font = match text.weight {
            Weight::Regular => regular,
            Weight::Bold => bold,
        };
        layer.set_fill_color(rgb(text.color));
        layer.use_text(
            text.content.as_str(),
            text.size,
            Mm(text.x),
            Mm(PAGE_HEIGHT - text.y),
            font,
        );
    }
}

fn render_pdf(pages: &[Page]) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(p).get_layer(l)
        };
        draw_page(&layer, page, &regular, &bold);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ReportVitals;
    use chrono::TimeZone;

    fn report(tier: RiskTier, factors: usize) -> Report {
        Report {
            generated_at: chrono::Local
                .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
                .single()
                .expect("Should build timestamp"),
            vitals: ReportVitals {
                age: "63".to_string(),
                sex: "Male".to_string(),
                resting_bp: "145".to_string(),
                cholesterol: "233".to_string(),
                max_hr: "150".to_string(),
            },
            tier,
            risk_label: tier.badge().to_string(),
            probability: "72%".to_string(),
            factors: (0..factors).map(|i| format!("Factor {i}")).collect(),
        }
    }

    fn find<'a>(page: &'a Page, content: &str) -> Option<&'a Text> {
        page.texts.iter().find(|t| t.content == content)
    }

    #[test]
    fn test_layout_sections() {
        let pages = layout(&report(RiskTier::High, 2));
        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert!(page.header_bar);

        let title = find(page, "CardioPulse AI").expect("Should have title");
        assert_eq!(title.color, WHITE);
        assert_eq!(title.weight, Weight::Bold);
        assert!(find(page, "Date: 2026-03-14").is_some());

        for expected in [
            "Patient Vitals",
            "- Age: 63",
            "- Sex: Male",
            "- Resting BP: 145 mm Hg",
            "- Cholesterol: 233 mg/dl",
            "- Max Heart Rate: 150 bpm",
            "AI Analysis Result",
            "Calculated Probability: 72%",
            "Contributing Factors",
            "- Factor 1",
            FOOTER,
            "Page 1 of 1",
        ] {
            assert!(find(page, expected).is_some(), "missing {expected}");
        }

        let status = find(page, "Status: HIGH RISK").expect("Should have status");
        assert_eq!(status.color, DANGER);
        assert_eq!(page.rules, vec![65.0, 125.0, 175.0]);
    }

    #[test]
    fn test_low_risk_status_is_green() {
        let pages = layout(&report(RiskTier::Low, 1));
        let status = find(&pages[0], "Status: LOW RISK").expect("Should have status");
        assert_eq!(status.color, SAFE);
    }

    #[test]
    fn test_long_report_paginates() {
        // Eleven factors fit under the analysis section
        assert_eq!(layout(&report(RiskTier::High, 11)).len(), 1);

        let pages = layout(&report(RiskTier::High, 12));
        assert_eq!(pages.len(), 2);
        assert!(!pages[1].header_bar);
        assert!(find(&pages[1], "Contributing Factors (continued)").is_some());
        assert!(find(&pages[1], "- Factor 11").is_some());
        assert!(find(&pages[0], "Page 1 of 2").is_some());
        assert!(find(&pages[1], "Page 2 of 2").is_some());
        assert!(pages.iter().all(|p| find(p, FOOTER).is_some()));
        assert!(pages
            .iter()
            .flat_map(|p| &p.texts)
            .filter(|t| t.content.starts_with("- Factor"))
            .all(|t| t.y <= BODY_BOTTOM));
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let exporter = PdfReportExporter::new(dir.path().join("reports"));

        let path = exporter
            .export(&report(RiskTier::High, 12))
            .expect("Should export");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(REPORT_FILE_NAME));

        let written = fs::read(&path).expect("Should read report");
        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_under_regular_file_fails() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").expect("Should create file");

        let exporter = PdfReportExporter::new(blocker.join("reports"));
        assert!(matches!(
            exporter.export(&report(RiskTier::Low, 1)),
            Err(ReportError::Io(_))
        ));
    }
}
