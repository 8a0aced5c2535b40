// Session exports: field-to-row CSV and a paginated PDF report.
// Both render fully in memory and stream back as attachments — no temp files.

pub mod csv;
pub mod handlers;
pub mod pdf;
