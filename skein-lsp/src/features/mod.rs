pub mod diagnostics;
pub mod semantic_tokens;
