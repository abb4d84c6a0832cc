//! Per-construct scanners.
//!
//! Each scanner is a pure function over a text span that reports every
//! occurrence of its construct as a [`RawMatch`], independently of the other
//! constructs. Competing matches are reconciled afterwards by
//! [`crate::parsing::overlap`]. All regexes are compiled once into
//! `LazyLock` statics and matching is stateless, so no cursor state ever
//! leaks between scans.

pub mod cloze;
pub mod code_fence;
pub mod image;
pub mod math;
pub mod table;

use crate::models::{MathMode, Span};

/// Which constructs a scan recognizes.
///
/// `Plain` is used for transcripts, explanations and non-cloze question
/// bodies: cloze markers there stay literal text. `Cloze` adds the marker
/// pass for cloze question bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Plain,
    Cloze,
}

/// One candidate occurrence of a construct, before overlap resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Full span of the match, delimiters included.
    pub span: Span,
    pub kind: MatchKind,
}

/// Construct-specific capture spans. All spans index into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// `![[name]]`; `name` covers the embed name between the brackets.
    Image { name: Span },
    /// A three-backtick fence; `language` is absent when the info text after
    /// the opening fence is blank.
    CodeBlock { language: Option<Span>, code: Span },
    /// A pipe-table run of lines. The markup is the full span.
    Table,
    /// `$...$` or `$$...$$`; `body` covers the expression between the
    /// delimiters.
    Math { body: Span, mode: MathMode },
    /// `{{cN::content}}`; `content` covers the inner content.
    ClozeMarker { id: u32, content: Span },
}

/// Scans for every construct except cloze markers.
///
/// Markers are scanned separately ([`cloze::scan`]) because in cloze mode
/// they are resolved in their own first pass.
pub fn scan_constructs(text: &str) -> Vec<RawMatch> {
    let mut out = image::scan(text);
    out.append(&mut code_fence::scan(text));
    out.append(&mut table::scan(text));
    out.append(&mut math::scan(text));
    out
}
