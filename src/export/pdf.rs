//! One-page PDF summary report.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::{DashboardError, DashboardResult};
use crate::summary::SummaryRecord;

/// Conventional download name for the summary report.
pub const DEFAULT_PDF_FILE_NAME: &str = "kfh_report.pdf";

/// Title line at the top of the report.
pub const REPORT_TITLE: &str = "KFH Attendance and Product Dashboard Report";

// A4 in points, 10 mm margins and line height, 12 pt monospace text.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 28.35;
const LINE_HEIGHT: f32 = 28.35;
const FONT_SIZE: f32 = 12.0;
// Courier glyphs are all 600/1000 em wide.
const CHAR_WIDTH: f32 = FONT_SIZE * 0.6;

/// Render the summary as a single-page PDF document.
///
/// Layout: the centered title, one blank line, then one `Label: value` line per summary field.
pub fn render_pdf(summary: &SummaryRecord) -> DashboardResult<Vec<u8>> {
    let mut operations = Vec::new();

    let title_x = ((PAGE_WIDTH - REPORT_TITLE.len() as f32 * CHAR_WIDTH) / 2.0).max(MARGIN);
    push_line(&mut operations, REPORT_TITLE, title_x, 0);

    for (row, (label, value)) in summary.lines().iter().enumerate() {
        push_line(&mut operations, &format!("{label}: {value}"), MARGIN, row + 2);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(PAGE_WIDTH), Object::Real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

/// Render the summary and write it to `path`, replacing any existing file.
pub fn export_pdf(summary: &SummaryRecord, path: impl AsRef<Path>) -> DashboardResult<()> {
    let path = path.as_ref();
    let _span = tracing::debug_span!("export_pdf", path = %path.display()).entered();
    let bytes = render_pdf(summary).map_err(|e| DashboardError::export(path, e))?;
    super::write_atomically(path, |out| {
        std::io::Write::write_all(out, &bytes)?;
        Ok(())
    })
}

fn push_line(operations: &mut Vec<Operation>, text: &str, x: f32, row: usize) {
    let y = PAGE_HEIGHT - MARGIN - LINE_HEIGHT * (row as f32 + 1.0) + (LINE_HEIGHT - FONT_SIZE) / 2.0;
    operations.extend([
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Real(FONT_SIZE)]),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]);
}
