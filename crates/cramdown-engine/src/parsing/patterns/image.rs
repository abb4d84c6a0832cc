use regex::Regex;
use std::sync::LazyLock;

use super::{MatchKind, RawMatch};
use crate::models::Span;

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\[\]\n]+)\]\]").expect("valid image regex"));

/// Finds every `![[name]]` embed in `text`.
pub fn scan(text: &str) -> Vec<RawMatch> {
    IMAGE
        .captures_iter(text)
        .map(|cap| {
            let full = cap.get(0).expect("group 0 always exists");
            let name = cap.get(1).expect("embed name group");
            RawMatch {
                span: Span::new(full.start(), full.end()),
                kind: MatchKind::Image {
                    name: Span::new(name.start(), name.end()),
                },
            }
        })
        .collect()
}

/// Returns the embed name when the whole of `text` is a single `![[name]]`
/// embed. Used for unwrapping `AUDIO:` field values.
pub fn embed_name(text: &str) -> Option<&str> {
    let cap = IMAGE.captures(text)?;
    let full = cap.get(0).expect("group 0 always exists");
    (full.start() == 0 && full.end() == text.len())
        .then(|| cap.get(1).expect("embed name group").as_str())
}
