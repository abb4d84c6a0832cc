//! Document assembly: splits a source document into groups on `##` headings,
//! carves each group into its transcript and questions sections, and collects
//! delimited question blocks.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use relative_path::RelativePathBuf;
use tracing::{debug, warn};

use super::lines::{Line, body_slice, line_spans};
use super::questions::{BlockFields, build_question, media_reference, synthesize_audio};
use super::{ScanMode, parse_content};
use crate::models::{
    Diagnostic, DiagnosticKind, Group, ParsedDocument, QuestionKind, Transcript,
};

static GROUP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(.+)$").expect("valid group heading regex"));

const TRANSCRIPT_HEADING: &str = "### Transcript";
const QUESTIONS_HEADING: &str = "### Questions";

/// The two author-facing syntaxes for delimiting question blocks. A document
/// resolves to one syntax up front, so a stray line that happens to look like
/// the other syntax never opens a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockSyntax {
    DashMarkers,
    AdFence,
}

impl BlockSyntax {
    const DASH_OPEN: &'static str = "--- start-question";
    const DASH_CLOSE: &'static str = "--- end-question";
    const FENCE_OPEN: &'static str = "````ad-question";
    const FENCE_CLOSE: &'static str = "````";

    fn opens(self, line: &str) -> bool {
        let line = line.trim();
        match self {
            BlockSyntax::DashMarkers => line == Self::DASH_OPEN,
            BlockSyntax::AdFence => line == Self::FENCE_OPEN,
        }
    }

    fn closes(self, line: &str) -> bool {
        let line = line.trim();
        match self {
            BlockSyntax::DashMarkers => line == Self::DASH_CLOSE,
            BlockSyntax::AdFence => line == Self::FENCE_CLOSE,
        }
    }
}

/// Parses a whole document into groups plus the diagnostics gathered along
/// the way. Never fails: malformed regions are skipped and reported.
pub(crate) fn parse_document(text: &str) -> ParsedDocument {
    let lines = line_spans(text);
    let (syntax, syntax_diag) = detect_syntax(&lines);
    let mut diagnostics = Vec::new();
    diagnostics.extend(syntax_diag);

    let headings: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| heading_title(line.text).map(|title| (i, title)))
        .collect();

    if headings.is_empty() {
        if !text.trim().is_empty() {
            diagnostics.push(Diagnostic::info(DiagnosticKind::NoGroupHeadings));
        }
        return ParsedDocument {
            groups: Vec::new(),
            diagnostics,
        };
    }
    if lines[..headings[0].0]
        .iter()
        .any(|line| !line.text.trim().is_empty())
    {
        diagnostics.push(Diagnostic::info(DiagnosticKind::PreambleIgnored));
    }

    let mut used = HashSet::new();
    let mut groups = Vec::new();
    for (n, (start, title)) in headings.iter().enumerate() {
        let end = headings.get(n + 1).map_or(lines.len(), |(next, _)| *next);
        let (group, mut diags) =
            parse_group(text, title, &lines[start + 1..end], syntax, &mut used);
        diagnostics.append(&mut diags);
        groups.push(group);
    }
    ParsedDocument {
        groups,
        diagnostics,
    }
}

fn heading_title(line: &str) -> Option<&str> {
    GROUP_HEADING
        .captures(line)
        .and_then(|cap| cap.get(1))
        .map(|title| title.as_str().trim())
}

/// Decides which block syntax the document uses. When both appear, whichever
/// opener comes first wins and the mix is reported.
fn detect_syntax(lines: &[Line<'_>]) -> (BlockSyntax, Option<Diagnostic>) {
    let dash = lines
        .iter()
        .position(|l| BlockSyntax::DashMarkers.opens(l.text));
    let fence = lines.iter().position(|l| BlockSyntax::AdFence.opens(l.text));
    match (dash, fence) {
        (Some(d), Some(f)) => {
            let syntax = if d < f {
                BlockSyntax::DashMarkers
            } else {
                BlockSyntax::AdFence
            };
            (
                syntax,
                Some(Diagnostic::info(DiagnosticKind::MixedBlockSyntax)),
            )
        }
        (None, Some(_)) => (BlockSyntax::AdFence, None),
        _ => (BlockSyntax::DashMarkers, None),
    }
}

/// Collects the line texts of each delimited block. An opener with no
/// matching terminator is skipped and scanning resumes on the next line, so
/// one broken block cannot swallow the rest of the section.
fn collect_blocks<'a>(
    lines: &[Line<'a>],
    syntax: BlockSyntax,
) -> (Vec<Vec<&'a str>>, Vec<Diagnostic>) {
    let mut blocks = Vec::new();
    let mut diags = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !syntax.opens(lines[i].text) {
            i += 1;
            continue;
        }
        let Some(end) = (i + 1..lines.len()).find(|&j| syntax.closes(lines[j].text)) else {
            warn!(
                offset = lines[i].span.start,
                "question block opener has no terminator"
            );
            diags.push(Diagnostic::warning(DiagnosticKind::UnterminatedBlock));
            i += 1;
            continue;
        };
        blocks.push(lines[i + 1..end].iter().map(|l| l.text).collect());
        i = end + 1;
    }
    (blocks, diags)
}

fn parse_group(
    text: &str,
    title: &str,
    lines: &[Line<'_>],
    syntax: BlockSyntax,
    used: &mut HashSet<String>,
) -> (Group, Vec<Diagnostic>) {
    let id = unique_slug(title, used);
    let mut diags = Vec::new();

    let transcript = transcript_section(text, lines);
    let question_lines = match lines.iter().position(|l| l.text.trim() == QUESTIONS_HEADING) {
        Some(q) => &lines[q + 1..],
        None => &lines[..0],
    };

    let (blocks, block_diags) = collect_blocks(question_lines, syntax);
    diags.extend(block_diags.into_iter().map(|d| d.in_group(&id)));

    let mut audio: Option<RelativePathBuf> = None;
    let mut questions = Vec::new();
    let mut position = 0;
    for block in &blocks {
        let fields = BlockFields::parse(block);
        if fields.is_audio_only() {
            let reference = media_reference(fields.audio.as_deref().unwrap_or_default());
            if audio.is_none() {
                audio = Some(reference);
            } else {
                warn!(group = id.as_str(), "group has more than one audio block");
                diags.push(Diagnostic::warning(DiagnosticKind::DuplicateAudioBlock).in_group(&id));
            }
            continue;
        }
        // Skipped blocks still consume a position so their siblings keep
        // stable derived ids.
        position += 1;
        match build_question(&id, position, &fields) {
            Ok((question, mut question_diags)) => {
                diags.append(&mut question_diags);
                questions.push(question);
            }
            Err(error) => {
                warn!(group = id.as_str(), %error, "skipping question block");
                diags.push(Diagnostic::warning(error.diagnostic()).in_group(&id));
            }
        }
    }

    if let Some(reference) = &audio
        && !questions.iter().any(|q| q.kind() == QuestionKind::Audio)
    {
        questions.insert(0, synthesize_audio(&id, reference));
    }

    debug!(
        group = id.as_str(),
        questions = questions.len(),
        "parsed group"
    );
    let group = Group {
        id,
        title: title.to_string(),
        transcript,
        audio,
        questions,
    };
    (group, diags)
}

fn transcript_section(text: &str, lines: &[Line<'_>]) -> Option<Transcript> {
    let start = lines
        .iter()
        .position(|l| l.text.trim() == TRANSCRIPT_HEADING)?;
    let end = (start + 1..lines.len())
        .find(|&j| lines[j].text.trim_start().starts_with("###"))
        .unwrap_or(lines.len());
    let raw = body_slice(text, &lines[start + 1..end]);
    (!raw.is_empty()).then(|| Transcript {
        raw_text: raw.to_string(),
        elements: parse_content(raw, ScanMode::Plain),
    })
}

/// Lowercased alphanumeric runs of the title joined with dashes. Repeated
/// titles get a numeric suffix so group ids stay unique per document.
fn unique_slug(title: &str, used: &mut HashSet<String>) -> String {
    let base = slugify(title);
    let mut candidate = base.clone();
    let mut n = 1;
    while !used.insert(candidate.clone()) {
        n += 1;
        candidate = format!("{base}-{n}");
    }
    candidate
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for part in title.split(|c: char| !c.is_alphanumeric()) {
        if part.is_empty() {
            continue;
        }
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&part.to_lowercase());
    }
    if slug.is_empty() {
        "group".to_string()
    } else {
        slug
    }
}
