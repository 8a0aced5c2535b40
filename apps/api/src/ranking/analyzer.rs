//! Resume analysis — scores each CV against a job description via one hosted
//! LLM call, then ranks the batch by final score.
//!
//! Pluggable, trait-based scorer: `AppState` holds an `Arc<dyn ResumeScorer>`
//! so the Groq backend can be swapped without touching handler code. Model
//! output is never trusted for arithmetic: scores are clamped to 0–100 and
//! the final score is recomputed server-side from the 0.6/0.4 formula.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::ranking::prompts::{SCORING_PROMPT_TEMPLATE, SCORING_SYSTEM};

/// Weight of the semantic similarity component in the final score.
pub const SEMANTIC_WEIGHT: f64 = 0.6;
/// Weight of the keyword match component in the final score.
pub const KEYWORD_WEIGHT: f64 = 0.4;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One CV submitted for ranking. `content` is extracted resume text —
/// file parsing happens client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvInput {
    pub name: String,
    pub content: String,
    /// Optional link to a saved job description.
    #[serde(default)]
    pub job_id: Option<Uuid>,
}

/// Raw scoring output from one LLM call, as the model returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvAnalysis {
    pub semantic_score: f64,
    pub keyword_score: f64,
    pub final_score: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

/// A fully analyzed CV: normalized scores plus the submitted name and text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedCv {
    pub cv_name: String,
    pub cv_text: String,
    pub semantic_score: f64,
    pub keyword_score: f64,
    pub final_score: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub job_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The resume scorer trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn ResumeScorer>`.
#[async_trait]
pub trait ResumeScorer: Send + Sync {
    async fn score(
        &self,
        job_description: &str,
        required_keywords: &[String],
        cv_text: &str,
    ) -> Result<CvAnalysis, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// GroqScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Scores a CV with one Groq chat-completion call.
pub struct GroqScorer {
    llm: LlmClient,
}

impl GroqScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeScorer for GroqScorer {
    async fn score(
        &self,
        job_description: &str,
        required_keywords: &[String],
        cv_text: &str,
    ) -> Result<CvAnalysis, AppError> {
        let prompt = SCORING_PROMPT_TEMPLATE
            .replace("{job_description}", job_description)
            .replace("{required_keywords}", &required_keywords.join(", "))
            .replace("{cv_text}", cv_text);

        self.llm
            .call_json::<CvAnalysis>(&prompt, SCORING_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("CV scoring failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Scores every CV in the batch sequentially, one LLM call each.
///
/// A failure mid-loop aborts the whole request — callers persist nothing
/// until the full batch has been scored.
pub async fn analyze_resumes(
    scorer: &dyn ResumeScorer,
    job_description: &str,
    required_keywords: &[String],
    cvs: &[CvInput],
) -> Result<Vec<AnalyzedCv>, AppError> {
    let mut analyzed = Vec::with_capacity(cvs.len());

    for (i, cv) in cvs.iter().enumerate() {
        info!("Scoring CV {}/{}: {}", i + 1, cvs.len(), cv.name);
        let analysis = scorer
            .score(job_description, required_keywords, &cv.content)
            .await?;
        let analysis = normalize(analysis);

        analyzed.push(AnalyzedCv {
            cv_name: cv.name.clone(),
            cv_text: cv.content.clone(),
            semantic_score: analysis.semantic_score,
            keyword_score: analysis.keyword_score,
            final_score: analysis.final_score,
            reason: analysis.reason,
            matched_keywords: analysis.matched_keywords,
            missing_keywords: analysis.missing_keywords,
            job_id: cv.job_id,
        });
    }

    Ok(analyzed)
}

/// Clamps component scores to 0–100 and recomputes the final score from the
/// weighted formula. The model's own arithmetic is discarded.
pub fn normalize(analysis: CvAnalysis) -> CvAnalysis {
    let semantic_score = analysis.semantic_score.clamp(0.0, 100.0);
    let keyword_score = analysis.keyword_score.clamp(0.0, 100.0);
    CvAnalysis {
        semantic_score,
        keyword_score,
        final_score: SEMANTIC_WEIGHT * semantic_score + KEYWORD_WEIGHT * keyword_score,
        ..analysis
    }
}

/// Sorts CVs by final score, best first. Stable: ties keep analysis order.
pub fn rank(analyzed: &mut [AnalyzedCv]) {
    analyzed.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzed(name: &str, final_score: f64) -> AnalyzedCv {
        AnalyzedCv {
            cv_name: name.to_string(),
            cv_text: "text".to_string(),
            semantic_score: final_score,
            keyword_score: final_score,
            final_score,
            reason: None,
            matched_keywords: vec![],
            missing_keywords: vec![],
            job_id: None,
        }
    }

    #[test]
    fn test_cv_analysis_deserializes_model_output() {
        let json = r#"{
            "semantic_score": 72.0,
            "keyword_score": 60.0,
            "final_score": 67.2,
            "reason": "Strong Rust background, missing Kubernetes",
            "matched_keywords": ["Rust", "PostgreSQL"],
            "missing_keywords": ["Kubernetes"]
        }"#;
        let analysis: CvAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.matched_keywords.len(), 2);
        assert_eq!(analysis.missing_keywords, vec!["Kubernetes"]);
        assert!((analysis.final_score - 67.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cv_analysis_tolerates_missing_optional_fields() {
        // Models sometimes drop reason/keyword lists — must not fail the request
        let json = r#"{"semantic_score": 50, "keyword_score": 40, "final_score": 46}"#;
        let analysis: CvAnalysis = serde_json::from_str(json).unwrap();
        assert!(analysis.reason.is_none());
        assert!(analysis.matched_keywords.is_empty());
    }

    #[test]
    fn test_normalize_recomputes_final_score() {
        let analysis = CvAnalysis {
            semantic_score: 80.0,
            keyword_score: 50.0,
            final_score: 99.0, // wrong on purpose
            reason: None,
            matched_keywords: vec![],
            missing_keywords: vec![],
        };
        let normalized = normalize(analysis);
        // 0.6*80 + 0.4*50 = 68
        assert!((normalized.final_score - 68.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_clamps_out_of_range_scores() {
        let analysis = CvAnalysis {
            semantic_score: 140.0,
            keyword_score: -20.0,
            final_score: 0.0,
            reason: None,
            matched_keywords: vec![],
            missing_keywords: vec![],
        };
        let normalized = normalize(analysis);
        assert_eq!(normalized.semantic_score, 100.0);
        assert_eq!(normalized.keyword_score, 0.0);
        assert_eq!(normalized.final_score, 60.0);
    }

    #[test]
    fn test_rank_sorts_descending() {
        let mut cvs = vec![
            analyzed("low", 30.0),
            analyzed("high", 90.0),
            analyzed("mid", 60.0),
        ];
        rank(&mut cvs);
        let names: Vec<_> = cvs.iter().map(|c| c.cv_name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_rank_ties_keep_analysis_order() {
        let mut cvs = vec![
            analyzed("first", 50.0),
            analyzed("second", 50.0),
            analyzed("third", 50.0),
        ];
        rank(&mut cvs);
        let names: Vec<_> = cvs.iter().map(|c| c.cv_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_cv_input_job_id_defaults_to_none() {
        let json = r#"{"name": "jane.pdf", "content": "ten years of Rust"}"#;
        let cv: CvInput = serde_json::from_str(json).unwrap();
        assert!(cv.job_id.is_none());
    }
}
