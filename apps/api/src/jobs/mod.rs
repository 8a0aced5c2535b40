// Saved job descriptions: plain ownership-checked CRUD, no LLM involvement.

pub mod handlers;
