use regex::Regex;
use std::sync::LazyLock;

use super::{MatchKind, RawMatch};
use crate::models::Span;

// Content is non-greedy to the first `}}`, so a marker never swallows a
// following marker. Newlines are allowed because display math inside a
// marker may span lines.
static CLOZE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{c(\d+)::(.*?)\}\}").expect("valid cloze marker regex"));

/// Finds every `{{cN::content}}` marker in `text`, in source order.
pub fn scan(text: &str) -> Vec<RawMatch> {
    CLOZE_MARKER
        .captures_iter(text)
        .filter_map(|cap| {
            let full = cap.get(0).expect("group 0 always exists");
            let id = cap.get(1).expect("id group").as_str().parse::<u32>().ok()?;
            let content = cap.get(2).expect("content group");
            Some(RawMatch {
                span: Span::new(full.start(), full.end()),
                kind: MatchKind::ClozeMarker {
                    id,
                    content: Span::new(content.start(), content.end()),
                },
            })
        })
        .collect()
}
