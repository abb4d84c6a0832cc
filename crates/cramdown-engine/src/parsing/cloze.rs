//! Cloze content processing: blank extraction, inner-content parsing and
//! marker stripping.
//!
//! Math inside a marker is parsed into first-class `Latex` nodes on the
//! blank before any blanked string is built, and blanked display text is
//! spliced from the original bytes around the marker spans. No intermediate
//! placeholder substitution takes place, so no restoration pass exists
//! either; math outside a marker is never rewritten at all.

use super::patterns::{self, MatchKind};
use super::{ScanMode, parse_content};
use crate::models::{ClozeBlank, ClozeContent, Diagnostic, DiagnosticKind, ElementNode};

/// Extracts every marker of `source` into a [`ClozeContent`]: the
/// per-occurrence blank list, the grouped-by-id list, and per-blank parsed
/// inner elements. Spans on the result are all relative to `source`.
pub fn extract(source: &str) -> ClozeContent {
    let markers = patterns::cloze::scan(source);
    let mut all = Vec::with_capacity(markers.len());
    for (index, marker) in markers.iter().enumerate() {
        let MatchKind::ClozeMarker { id, content } = &marker.kind else {
            continue;
        };
        let inner = content.slice(source);
        let elements = parse_content(inner, ScanMode::Plain)
            .into_iter()
            .map(|node| ElementNode {
                span: node.span.shifted(content.start),
                ..node
            })
            .collect();
        all.push(ClozeBlank {
            id: *id,
            occurrence: index as u32 + 1,
            span: marker.span,
            answer: inner.trim().to_string(),
            elements,
        });
    }
    let grouped = group_by_id(&all);
    ClozeContent {
        source: source.to_string(),
        all,
        grouped,
    }
}

/// First blank per distinct id, sorted by id ascending.
fn group_by_id(all: &[ClozeBlank]) -> Vec<ClozeBlank> {
    let mut grouped: Vec<ClozeBlank> = Vec::new();
    for blank in all {
        if !grouped.iter().any(|g| g.id == blank.id) {
            grouped.push(blank.clone());
        }
    }
    grouped.sort_by_key(|b| b.id);
    grouped
}

/// Validation findings for an extracted body: empty marker content and
/// non-sequential ids. Both indicate likely authoring mistakes; neither is
/// fatal.
pub fn diagnostics(content: &ClozeContent) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for blank in &content.all {
        if blank.answer.is_empty() {
            out.push(Diagnostic::warning(DiagnosticKind::EmptyClozeContent {
                occurrence: blank.occurrence,
            }));
        }
    }
    let mut ids: Vec<u32> = content.all.iter().map(|b| b.id).collect();
    ids.sort_unstable();
    ids.dedup();
    let sequential = ids
        .iter()
        .enumerate()
        .all(|(i, &id)| id as usize == i + 1);
    if !ids.is_empty() && !sequential {
        out.push(Diagnostic::warning(DiagnosticKind::NonSequentialClozeIds {
            ids,
        }));
    }
    out
}

/// Replaces every marker with its inner content, keeping everything else
/// byte for byte. Runs to a fixed point so that even malformed nested
/// markers resolve; applying it twice equals applying it once.
pub fn strip_markers(text: &str) -> String {
    let mut current = strip_once(text);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for marker in patterns::cloze::scan(text) {
        let MatchKind::ClozeMarker { content, .. } = &marker.kind else {
            continue;
        };
        out.push_str(&text[cursor..marker.span.start]);
        out.push_str(content.slice(text));
        cursor = marker.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlankStyle, ContentElement, MathMode, Severity, Span};

    #[test]
    fn all_keeps_every_occurrence_grouped_keeps_first_per_id() {
        let content = extract("{{c1::x}} {{c2::y}} {{c1::z}}");
        let answers: Vec<_> = content.all.iter().map(|b| b.answer.as_str()).collect();
        assert_eq!(answers, vec!["x", "y", "z"]);
        let occurrences: Vec<_> = content.all.iter().map(|b| b.occurrence).collect();
        assert_eq!(occurrences, vec![1, 2, 3]);

        let grouped: Vec<_> = content
            .grouped
            .iter()
            .map(|b| (b.id, b.answer.as_str()))
            .collect();
        assert_eq!(grouped, vec![(1, "x"), (2, "y")]);
    }

    #[test]
    fn answers_are_trimmed_but_elements_keep_the_raw_span() {
        let source = "{{c1::  spaced  }}";
        let content = extract(source);
        assert_eq!(content.all[0].answer, "spaced");
        assert_eq!(content.all[0].span, Span::new(0, source.len()));
    }

    #[test]
    fn math_inside_a_marker_becomes_a_latex_element() {
        let source = "{{c1::the law $E=mc^2$ here}}";
        let content = extract(source);
        let blank = &content.all[0];
        assert_eq!(blank.answer, "the law $E=mc^2$ here");
        let latex = blank
            .elements
            .iter()
            .find_map(|n| match &n.element {
                ContentElement::Latex { expression, mode } => Some((expression.as_str(), *mode)),
                _ => None,
            })
            .expect("latex element");
        assert_eq!(latex, ("E=mc^2", MathMode::Inline));
        // Element spans point back into the question source
        let math_node = blank
            .elements
            .iter()
            .find(|n| matches!(n.element, ContentElement::Latex { .. }))
            .expect("latex node");
        assert_eq!(math_node.span.slice(source), "$E=mc^2$");
    }

    #[test]
    fn display_builds_all_three_styles() {
        let content = extract("{{c1::x}} {{c2::y}} {{c1::z}}");
        assert_eq!(content.display(BlankStyle::Glyph), "_____ _____ _____");
        assert_eq!(
            content.display(BlankStyle::ById),
            "__CLOZE_1__ __CLOZE_2__ __CLOZE_1__"
        );
        assert_eq!(
            content.display(BlankStyle::Sequential),
            "__CLOZE_1__ __CLOZE_2__ __CLOZE_3__"
        );
    }

    #[test]
    fn text_outside_markers_survives_blanking_untouched() {
        let content = extract("keep $a_1$ and {{c1::hide}} rest");
        assert_eq!(
            content.display(BlankStyle::Glyph),
            "keep $a_1$ and _____ rest"
        );
    }

    #[test]
    fn empty_marker_counts_and_warns() {
        let content = extract("{{c1::}} {{c2::ok}}");
        assert_eq!(content.all.len(), 2);
        assert_eq!(content.all[0].answer, "");

        let diags = diagnostics(&content);
        assert!(diags.iter().any(|d| matches!(
            d.kind,
            DiagnosticKind::EmptyClozeContent { occurrence: 1 }
        )));
        assert!(diags.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn non_sequential_ids_warn() {
        let content = extract("{{c1::a}} {{c3::b}}");
        let diags = diagnostics(&content);
        assert!(
            diags
                .iter()
                .any(|d| matches!(&d.kind, DiagnosticKind::NonSequentialClozeIds { ids } if ids == &vec![1, 3]))
        );
    }

    #[test]
    fn sequential_ids_do_not_warn() {
        let content = extract("{{c2::b}} {{c1::a}} {{c2::c}}");
        assert!(diagnostics(&content).is_empty());
    }

    #[test]
    fn strip_markers_keeps_inner_content() {
        assert_eq!(strip_markers("a {{c1::b}} c"), "a b c");
        assert_eq!(strip_markers("no markers"), "no markers");
        assert_eq!(strip_markers("{{c1::$x_2$}}"), "$x_2$");
    }

    #[test]
    fn strip_markers_is_idempotent() {
        for input in [
            "plain",
            "a {{c1::b}} c",
            "{{c1:: {{c2::inner}} }}",
            "{{c1::$a_1$}} and {{c2::}}",
        ] {
            let once = strip_markers(input);
            assert_eq!(strip_markers(&once), once);
        }
    }
}
