//! Turns resolved matches into the ordered element sequence.
//!
//! Gaps between matches are emitted verbatim as `Text` nodes, including
//! whitespace-only gaps, so that the spans of the produced nodes tile the
//! input exactly and concatenating their slices reproduces it byte for byte.

use relative_path::RelativePathBuf;

use super::patterns::{MatchKind, RawMatch};
use crate::models::{BlankStyle, ContentElement, ElementNode, Span};

/// Walks `matches` (resolved, sorted by start) over `text` and emits the
/// element sequence. Cloze markers become `Text` nodes carrying the
/// sequential blank token for their occurrence; an input with no matches
/// becomes a single `Text` node; empty input yields an empty sequence.
pub fn build_elements(text: &str, matches: &[RawMatch]) -> Vec<ElementNode> {
    let mut out = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;
    let mut occurrence = 0u32;

    for m in matches {
        if m.span.start > cursor {
            let gap = Span::new(cursor, m.span.start);
            out.push(ElementNode::text(gap, gap.slice(text)));
        }
        out.push(match &m.kind {
            MatchKind::Image { name } => ElementNode::new(
                m.span,
                ContentElement::Image {
                    path: RelativePathBuf::from(name.slice(text).trim()),
                },
            ),
            MatchKind::CodeBlock { language, code } => {
                let code = code.slice(text);
                ElementNode::new(
                    m.span,
                    ContentElement::CodeBlock {
                        language: language.map(|l| l.slice(text).trim().to_string()),
                        // The final newline belongs to the closing fence line
                        code: code.strip_suffix('\n').unwrap_or(code).to_string(),
                    },
                )
            }
            MatchKind::Table => ElementNode::new(
                m.span,
                ContentElement::Table {
                    markup: m.span.slice(text).to_string(),
                },
            ),
            MatchKind::Math { body, mode } => ElementNode::new(
                m.span,
                ContentElement::Latex {
                    expression: body.slice(text).trim().to_string(),
                    mode: *mode,
                },
            ),
            MatchKind::ClozeMarker { id, .. } => {
                occurrence += 1;
                ElementNode::text(m.span, BlankStyle::Sequential.token(*id, occurrence))
            }
        });
        cursor = m.span.end;
    }

    if cursor < text.len() {
        let tail = Span::new(cursor, text.len());
        out.push(ElementNode::text(tail, tail.slice(text)));
    }
    out
}
