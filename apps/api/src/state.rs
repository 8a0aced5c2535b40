use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::LlmClient;
use crate::ranking::analyzer::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Raw LLM client, reserved for future endpoints. All scoring goes
    /// through `scorer`.
    #[allow(dead_code)]
    pub llm: LlmClient,
    /// Pluggable resume scorer. Default: GroqScorer (one hosted-model call per CV).
    pub scorer: Arc<dyn ResumeScorer>,
}
