use super::{MatchKind, RawMatch};
use crate::models::Span;
use crate::parsing::lines::line_spans;

/// Finds every pipe table in `text`: a contiguous run of lines that start
/// and end with `|`, where the second line is a separator row. Detection is
/// a line walker rather than a regex so the run can be validated as a whole.
pub fn scan(text: &str) -> Vec<RawMatch> {
    let lines = line_spans(text);
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !is_table_line(lines[i].text) {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < lines.len() && is_table_line(lines[i].text) {
            i += 1;
        }
        let run = &lines[run_start..i];
        if run.len() >= 2 && is_separator_row(run[1].text) {
            out.push(RawMatch {
                span: Span::new(run[0].span.start, run[run.len() - 1].span.end),
                kind: MatchKind::Table,
            });
        }
    }
    out
}

/// Splits table markup into trimmed cell texts, row-major: the header row
/// first, the separator row dropped, then the body rows. Cells keep their
/// inner markup (cloze markers, math) so callers can re-parse them
/// individually and attribute blanks by marker id and occurrence.
pub fn cells(markup: &str) -> Vec<Vec<String>> {
    markup
        .lines()
        .enumerate()
        .filter(|(i, line)| is_table_line(line) && !(*i == 1 && is_separator_row(line)))
        .map(|(_, line)| row_cells(line))
        .collect()
}

fn row_cells(line: &str) -> Vec<String> {
    let t = line.trim();
    let inner = t.strip_prefix('|').unwrap_or(t);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_table_line(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 2 && t.starts_with('|') && t.ends_with('|')
}

/// A separator row has only cells of dashes, each optionally colon-capped
/// for alignment, e.g. `| --- |:---:| ---: |`.
fn is_separator_row(line: &str) -> bool {
    if !is_table_line(line) {
        return false;
    }
    let t = line.trim();
    let inner = &t[1..t.len() - 1];
    inner.split('|').all(is_separator_cell)
}

fn is_separator_cell(cell: &str) -> bool {
    let c = cell.trim();
    let c = c.strip_prefix(':').unwrap_or(c);
    let c = c.strip_suffix(':').unwrap_or(c);
    !c.is_empty() && c.bytes().all(|b| b == b'-')
}
