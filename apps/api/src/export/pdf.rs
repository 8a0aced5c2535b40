//! PDF report rendering via `printpdf`: "CV Ranking Report" header, session
//! metadata, then one block per candidate in rank order. A4, builtin
//! Helvetica, in-memory bytes.

use printpdf::*;
use std::io::BufWriter;

use crate::errors::AppError;
use crate::models::session::{RankedCvRow, SessionRow};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_Y: f32 = 20.0;
const WRAP_COLS: usize = 90;

struct PdfCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
}

impl<'a> PdfCursor<'a> {
    /// Starts a new page when fewer than `needed` millimetres remain.
    fn ensure_space(&mut self, needed: f32) {
        if self.y.0 - needed < BOTTOM_Y {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = Mm(TOP_Y);
        }
    }

    fn line(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef, advance: f32) {
        self.ensure_space(advance);
        self.layer.use_text(text, size, Mm(x), self.y, font);
        self.y -= Mm(advance);
    }

    /// Word-wraps `text` and writes each resulting line.
    fn wrapped(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef, advance: f32) {
        for line in wrap_text(text, WRAP_COLS) {
            self.line(&line, size, x, font, advance);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= Mm(mm);
    }
}

/// Renders the full ranking report. `cvs` must be in rank order.
pub fn render_session_pdf(
    session: &SessionRow,
    cvs: &[RankedCvRow],
) -> Result<Vec<u8>, AppError> {
    let (doc, page1, layer1) = PdfDocument::new(
        "CV Ranking Report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Export(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Export(format!("PDF font error: {e}")))?;

    let mut cursor = PdfCursor {
        layer: doc.get_page(page1).get_layer(layer1),
        y: Mm(TOP_Y),
        doc: &doc,
    };

    // Header
    cursor.line("CV Ranking Report", 20.0, MARGIN_LEFT, &bold, 10.0);
    cursor.line(
        &format!("Session ID: {}", session.id),
        12.0,
        MARGIN_LEFT,
        &font,
        5.5,
    );
    cursor.line(
        &format!("Created At: {}", session.created_at),
        12.0,
        MARGIN_LEFT,
        &font,
        5.5,
    );
    cursor.gap(4.0);

    cursor.line("Job Description:", 12.0, MARGIN_LEFT, &bold, 5.5);
    cursor.wrapped(&session.job_description, 10.0, MARGIN_LEFT, &font, 4.5);
    cursor.gap(4.0);

    cursor.line("Required Keywords:", 12.0, MARGIN_LEFT, &bold, 5.5);
    cursor.wrapped(
        &join_or_dash(&session.required_keywords),
        10.0,
        MARGIN_LEFT,
        &font,
        4.5,
    );

    // One block per candidate, best first
    for (index, cv) in cvs.iter().enumerate() {
        cursor.gap(6.0);
        cursor.ensure_space(30.0);
        cursor.line(
            &format!("Candidate #{}: {}", index + 1, cv.cv_name),
            14.0,
            MARGIN_LEFT,
            &bold,
            6.0,
        );
        cursor.line(
            &format!("Final Score: {:.1}", cv.final_score),
            10.0,
            MARGIN_LEFT,
            &font,
            4.5,
        );
        cursor.line(
            &format!("Semantic Score: {:.1}", cv.semantic_score),
            10.0,
            MARGIN_LEFT,
            &font,
            4.5,
        );
        cursor.line(
            &format!("Keyword Score: {:.1}", cv.keyword_score),
            10.0,
            MARGIN_LEFT,
            &font,
            4.5,
        );
        if let Some(reason) = &cv.reason {
            cursor.wrapped(
                &format!("Reason: {reason}"),
                10.0,
                MARGIN_LEFT,
                &font,
                4.5,
            );
        }
        cursor.wrapped(
            &format!("Matched Keywords: {}", join_or_dash(&cv.matched_keywords)),
            10.0,
            MARGIN_LEFT,
            &font,
            4.5,
        );
        cursor.wrapped(
            &format!("Missing Keywords: {}", join_or_dash(&cv.missing_keywords)),
            10.0,
            MARGIN_LEFT,
            &font,
            4.5,
        );
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| AppError::Export(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| AppError::Export(format!("PDF buffer error: {e}")))
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}

/// Greedy word wrap at `max_cols` characters. Words longer than the column
/// limit get their own line rather than being split.
fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_cols {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn session() -> SessionRow {
        SessionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_description: "Senior Rust engineer building payment infrastructure.".to_string(),
            required_keywords: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            created_at: Utc::now(),
        }
    }

    fn cv(name: &str, rank: i32) -> RankedCvRow {
        RankedCvRow {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            rank,
            cv_name: name.to_string(),
            cv_text: "text".to_string(),
            semantic_score: 80.0,
            keyword_score: 50.0,
            final_score: 68.0,
            reason: Some("Solid systems background".to_string()),
            matched_keywords: vec!["Rust".to_string()],
            missing_keywords: vec![],
            job_id: None,
        }
    }

    #[test]
    fn test_wrap_text_respects_column_limit() {
        let text = "one two three four five six seven eight nine ten";
        for line in wrap_text(text, 15) {
            assert!(line.chars().count() <= 15, "line too long: {line}");
        }
    }

    #[test]
    fn test_wrap_text_keeps_long_word_whole() {
        let lines = wrap_text("short supercalifragilisticexpialidocious end", 10);
        assert!(lines.contains(&"supercalifragilisticexpialidocious".to_string()));
    }

    #[test]
    fn test_wrap_text_empty_input_yields_one_empty_line() {
        assert_eq!(wrap_text("", 40), vec![String::new()]);
    }

    #[test]
    fn test_join_or_dash_empty_is_dash() {
        assert_eq!(join_or_dash(&[]), "—");
        assert_eq!(
            join_or_dash(&["a".to_string(), "b".to_string()]),
            "a, b"
        );
    }

    #[test]
    fn test_render_pdf_produces_nonempty_document() {
        let cvs = vec![cv("jane.pdf", 1), cv("bob.pdf", 2)];
        let bytes = render_session_pdf(&session(), &cvs).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_pdf_handles_large_batch_with_page_breaks() {
        let cvs: Vec<_> = (1..=40).map(|i| cv(&format!("cv_{i}.pdf"), i)).collect();
        let bytes = render_session_pdf(&session(), &cvs).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
