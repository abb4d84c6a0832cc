pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use models::{diagnostics::*, element::*, group::*, question::*, span::*};
pub use parsing::{ScanMode, parse_content, parse_document};
