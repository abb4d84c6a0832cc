use regex::Regex;
use std::sync::LazyLock;

use super::{MatchKind, RawMatch};
use crate::models::Span;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([^`\n]*)\n(.*?)```").expect("valid code fence regex"));

/// Finds every three-backtick code fence in `text`. The info text after the
/// opening fence becomes the language; blank info means no language.
pub fn scan(text: &str) -> Vec<RawMatch> {
    CODE_FENCE
        .captures_iter(text)
        .map(|cap| {
            let full = cap.get(0).expect("group 0 always exists");
            let info = cap.get(1).expect("language group");
            let code = cap.get(2).expect("code group");
            let language = (!info.as_str().trim().is_empty())
                .then(|| Span::new(info.start(), info.end()));
            RawMatch {
                span: Span::new(full.start(), full.end()),
                kind: MatchKind::CodeBlock {
                    language,
                    code: Span::new(code.start(), code.end()),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_fence_with_language() {
        let text = "```rust\nlet x = 1;\n```";
        let matches = scan(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].span, Span::new(0, text.len()));
        let MatchKind::CodeBlock { language, code } = matches[0].kind else {
            panic!("expected code block match");
        };
        assert_eq!(language.map(|l| l.slice(text)), Some("rust"));
        assert_eq!(code.slice(text), "let x = 1;\n");
    }

    #[test]
    fn fence_without_language() {
        let text = "```\nplain\n```";
        let matches = scan(text);
        let MatchKind::CodeBlock { language, .. } = matches[0].kind else {
            panic!("expected code block match");
        };
        assert!(language.is_none());
    }

    #[test]
    fn unclosed_fence_is_not_a_match() {
        assert!(scan("```rust\nlet x = 1;").is_empty());
    }

    #[test]
    fn stops_at_first_closing_fence() {
        let text = "```\na\n```\nmiddle\n```\nb\n```";
        let matches = scan(text);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].span.slice(text), "```\na\n```");
    }
}
