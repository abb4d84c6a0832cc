use crate::models::Span;

/// One line of the source with its byte span. The span excludes the
/// terminating newline so that slicing a run of lines keeps interior
/// newlines but never picks up a trailing one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub span: Span,
    pub text: &'a str,
}

/// Splits `text` into lines with absolute byte spans.
pub(crate) fn line_spans(text: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for part in text.split_inclusive('\n') {
        let end = start + part.len() - usize::from(part.ends_with('\n'));
        out.push(Line {
            span: Span::new(start, end),
            text: &text[start..end],
        });
        start += part.len();
    }
    out
}

/// Slices the source covering `lines`, with leading and trailing blank
/// lines dropped. Returns the empty string for an all-blank run.
pub(crate) fn body_slice<'a>(text: &'a str, lines: &[Line<'_>]) -> &'a str {
    let mut start = 0;
    let mut end = lines.len();
    while start < end && lines[start].text.trim().is_empty() {
        start += 1;
    }
    while end > start && lines[end - 1].text.trim().is_empty() {
        end -= 1;
    }
    if start == end {
        return "";
    }
    &text[lines[start].span.start..lines[end - 1].span.end]
}
