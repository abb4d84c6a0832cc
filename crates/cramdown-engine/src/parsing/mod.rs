//! The parsing pipeline.
//!
//! A parse runs in fixed stages: per-construct scanners find candidate
//! matches ([`patterns`]), competing candidates are reconciled by span
//! ordering ([`overlap`]), survivors become ordered content elements with
//! text gaps filled in ([`elements`]), and cloze bodies additionally get
//! their markers extracted into blanks ([`cloze`]). Document structure
//! (groups, sections, question blocks) sits on top in [`sections`]. Every
//! stage is a pure function of its input text; nothing here does I/O.

pub mod cloze;
pub mod elements;
mod lines;
pub mod overlap;
pub mod patterns;
mod questions;
mod sections;

#[cfg(test)]
mod tests;

pub use patterns::ScanMode;

use crate::models::{ElementNode, ParsedDocument};

/// Parses a complete study document into groups, questions and diagnostics.
///
/// Never fails: malformed groups or blocks are skipped and reported through
/// [`ParsedDocument::diagnostics`].
pub fn parse_document(text: &str) -> ParsedDocument {
    sections::parse_document(text)
}

/// Parses a body of running text into ordered content elements.
///
/// In [`ScanMode::Cloze`] markers are resolved ahead of every other
/// construct and surface as sequential blank tokens; in [`ScanMode::Plain`]
/// marker syntax stays literal text. Element spans tile the input, so
/// concatenating the source slice of every span reproduces `text` exactly.
pub fn parse_content(text: &str, mode: ScanMode) -> Vec<ElementNode> {
    let matches = match mode {
        ScanMode::Plain => overlap::resolve(patterns::scan_constructs(text)),
        ScanMode::Cloze => {
            overlap::resolve_cloze(patterns::cloze::scan(text), patterns::scan_constructs(text))
        }
    };
    elements::build_elements(text, &matches)
}
