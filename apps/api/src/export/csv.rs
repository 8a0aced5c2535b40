//! CSV rendering of a ranking session: one row per CV, in rank order.

use crate::errors::AppError;
use crate::models::session::RankedCvRow;

const HEADER: [&str; 7] = [
    "CV Name",
    "Semantic Score",
    "Keyword Score",
    "Final Score",
    "Reason",
    "Matched Keywords",
    "Missing Keywords",
];

/// Renders the session's CVs as CSV bytes. `cvs` must be in rank order.
pub fn render_session_csv(cvs: &[RankedCvRow]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::Export(format!("CSV write failed: {e}")))?;

    for cv in cvs {
        writer
            .write_record([
                cv.cv_name.clone(),
                cv.semantic_score.to_string(),
                cv.keyword_score.to_string(),
                cv.final_score.to_string(),
                cv.reason.clone().unwrap_or_default(),
                cv.matched_keywords.join(", "),
                cv.missing_keywords.join(", "),
            ])
            .map_err(|e| AppError::Export(format!("CSV write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn cv(name: &str, final_score: f64, rank: i32) -> RankedCvRow {
        RankedCvRow {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            rank,
            cv_name: name.to_string(),
            cv_text: "text".to_string(),
            semantic_score: 80.0,
            keyword_score: 50.0,
            final_score,
            reason: Some("good match".to_string()),
            matched_keywords: vec!["Rust".to_string(), "SQL".to_string()],
            missing_keywords: vec![],
            job_id: None,
        }
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_cv() {
        let cvs = vec![cv("jane.pdf", 68.0, 1), cv("bob.pdf", 40.0, 2)];
        let bytes = render_session_csv(&cvs).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("CV Name,Semantic Score,Keyword Score,Final Score"));
        assert!(lines[1].starts_with("jane.pdf,"));
        assert!(lines[2].starts_with("bob.pdf,"));
    }

    #[test]
    fn test_csv_joins_keywords_with_comma_space() {
        let cvs = vec![cv("jane.pdf", 68.0, 1)];
        let text = String::from_utf8(render_session_csv(&cvs).unwrap()).unwrap();
        // A joined list contains a comma, so the field must be quoted
        assert!(text.contains("\"Rust, SQL\""));
    }

    #[test]
    fn test_csv_empty_session_is_header_only() {
        let text = String::from_utf8(render_session_csv(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_csv_missing_reason_renders_empty_field() {
        let mut row = cv("jane.pdf", 68.0, 1);
        row.reason = None;
        let text = String::from_utf8(render_session_csv(&[row]).unwrap()).unwrap();
        assert!(text.contains(",68,,"));
    }
}
