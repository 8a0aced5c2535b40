// Ranking pipeline: validate request → one LLM scoring call per CV →
// normalize scores → sort by final score → persist session → respond.
// All LLM calls go through llm_client — no direct Groq calls here.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
pub mod store;
