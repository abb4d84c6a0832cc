use regex::Regex;
use std::sync::LazyLock;

use super::{MatchKind, RawMatch};
use crate::models::{MathMode, Span};

static DISPLAY_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").expect("valid display math regex"));

// The expression may not contain `$`, which also keeps a `$$` opener from
// ever matching as inline math.
static INLINE_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$\n]+?)\$").expect("valid inline math regex"));

/// Finds every `$$...$$` and `$...$` expression in `text`. Display math may
/// span lines; inline math may not. A `$$...$$` region usually also yields
/// an inner inline candidate, which loses overlap resolution to the longer
/// display match.
pub fn scan(text: &str) -> Vec<RawMatch> {
    let mut out: Vec<RawMatch> = DISPLAY_MATH
        .captures_iter(text)
        .map(|cap| math_match(&cap, MathMode::Display))
        .collect();
    out.extend(
        INLINE_MATH
            .captures_iter(text)
            .map(|cap| math_match(&cap, MathMode::Inline)),
    );
    out
}

fn math_match(cap: &regex::Captures<'_>, mode: MathMode) -> RawMatch {
    let full = cap.get(0).expect("group 0 always exists");
    let body = cap.get(1).expect("expression group");
    RawMatch {
        span: Span::new(full.start(), full.end()),
        kind: MatchKind::Math {
            body: Span::new(body.start(), body.end()),
            mode,
        },
    }
}
