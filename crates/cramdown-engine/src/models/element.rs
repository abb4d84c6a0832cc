use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};

use super::span::Span;

/// Whether a math expression was written inline (`$...$`) or as display
/// math (`$$...$$`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MathMode {
    Inline,
    Display,
}

/// One typed piece of parsed content.
///
/// Element sequences are order-significant: walking a `Vec<ElementNode>` in
/// order visits the source text left to right with nothing skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentElement {
    /// A literal text run between (or absent any) special constructs.
    ///
    /// In a blanked cloze view the content carries the blank token instead of
    /// the marker source, while the node's span still covers the marker.
    Text { content: String },
    /// An image embed `![[name]]`. The path is relative to wherever the
    /// consuming layer resolves media from.
    Image { path: RelativePathBuf },
    /// A fenced code block with an optional language tag.
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    /// A pipe table, kept as raw markup. Cells may themselves contain cloze
    /// markers or math and are re-parsed by the consumer per cell (see
    /// [`crate::parsing::patterns::table::cells`]).
    Table { markup: String },
    /// A LaTeX expression, delimiters stripped.
    Latex { expression: String, mode: MathMode },
}

/// A content element together with the source span it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub span: Span,
    pub element: ContentElement,
}

impl ElementNode {
    pub fn new(span: Span, element: ContentElement) -> Self {
        Self { span, element }
    }

    /// Convenience for the common case of a literal text node whose content
    /// is exactly the source slice.
    pub fn text(span: Span, content: impl Into<String>) -> Self {
        Self::new(
            span,
            ContentElement::Text {
                content: content.into(),
            },
        )
    }
}
