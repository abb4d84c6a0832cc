//! Question assembly: field extraction from a block's lines and routing to
//! the type-specific builders.

use relative_path::RelativePathBuf;
use tracing::warn;

use super::patterns::image;
use super::{ScanMode, cloze, parse_content};
use crate::models::{
    Diagnostic, DiagnosticKind, Explanation, Question, QuestionContent, QuestionKind,
};

/// Why a question block could not be assembled. These never escape the
/// document parse; the group assembler converts them into diagnostics and
/// moves on to the next block.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BlockError {
    #[error("block has no TYPE: field")]
    MissingType,
    #[error("unknown question type {0:?}")]
    UnknownType(String),
    #[error("block has an empty Q: body")]
    EmptyBody,
}

impl BlockError {
    pub(crate) fn diagnostic(&self) -> DiagnosticKind {
        match self {
            BlockError::MissingType => DiagnosticKind::MissingType,
            BlockError::UnknownType(value) => DiagnosticKind::UnknownType {
                value: value.clone(),
            },
            BlockError::EmptyBody => DiagnosticKind::EmptyQuestionBody,
        }
    }
}

const KEYWORDS: [&str; 7] = ["TYPE:", "ID:", "AUDIO:", "Q:", "A:", "ANSWER:", "E:"];

/// The raw field values of one question block, keyed by line-start keyword.
/// Values keep their internal newlines; only the single leading newline (or
/// space) after the keyword is removed. First occurrence of a keyword wins.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct BlockFields {
    pub kind: Option<String>,
    pub id: Option<String>,
    pub audio: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub answer_alt: Option<String>,
    pub explanation: Option<String>,
}

impl BlockFields {
    /// Extracts fields from the lines between a block's delimiters. A field
    /// value runs from its keyword to the next keyword line or the end of
    /// the block; lines before any keyword are ignored.
    pub(crate) fn parse(lines: &[&str]) -> BlockFields {
        let mut fields = BlockFields::default();
        let mut current: Option<(&str, Vec<&str>)> = None;
        for line in lines {
            if let Some((keyword, rest)) = keyword_of(line) {
                fields.store(current.take());
                current = Some((keyword, vec![rest]));
            } else if let Some((_, pieces)) = current.as_mut() {
                pieces.push(line);
            }
        }
        fields.store(current.take());
        fields
    }

    fn store(&mut self, entry: Option<(&str, Vec<&str>)>) {
        let Some((keyword, pieces)) = entry else {
            return;
        };
        let value = trim_field_lead(&pieces.join("\n"));
        let slot = match keyword {
            "TYPE:" => &mut self.kind,
            "ID:" => &mut self.id,
            "AUDIO:" => &mut self.audio,
            "Q:" => &mut self.question,
            "A:" => &mut self.answer,
            "ANSWER:" => &mut self.answer_alt,
            "E:" => &mut self.explanation,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    /// `A:` wins over `ANSWER:` when both are present.
    pub(crate) fn effective_answer(&self) -> Option<&str> {
        self.answer.as_deref().or(self.answer_alt.as_deref())
    }

    /// A block that only references audio supplies the group's audio track
    /// instead of becoming a question of its own.
    pub(crate) fn is_audio_only(&self) -> bool {
        self.audio.is_some() && self.kind.is_none() && self.question.is_none()
    }
}

fn keyword_of(line: &str) -> Option<(&'static str, &str)> {
    KEYWORDS
        .iter()
        .find_map(|kw| line.strip_prefix(kw).map(|rest| (*kw, rest)))
}

/// Removes exactly one leading newline after the keyword, or failing that
/// one leading space. Everything else is preserved.
fn trim_field_lead(value: &str) -> String {
    if let Some(rest) = value.strip_prefix('\n') {
        rest.to_string()
    } else if let Some(rest) = value.strip_prefix(' ') {
        rest.to_string()
    } else {
        value.to_string()
    }
}

/// Resolves a media reference field: a bare name, or one wrapped in an
/// `![[...]]` embed.
pub(crate) fn media_reference(value: &str) -> RelativePathBuf {
    let trimmed = value.trim();
    let name = image::embed_name(trimmed).unwrap_or(trimmed);
    RelativePathBuf::from(name.trim())
}

/// Assembles one question from its block fields. `position` is the block's
/// ordinal within the group and feeds the derived id.
pub(crate) fn build_question(
    group_id: &str,
    position: usize,
    fields: &BlockFields,
) -> Result<(Question, Vec<Diagnostic>), BlockError> {
    let kind = parse_kind(fields.kind.as_deref())?;
    let body = fields.question.as_deref().unwrap_or_default();
    if kind != QuestionKind::Audio && body.trim().is_empty() {
        return Err(BlockError::EmptyBody);
    }

    let mut diags = Vec::new();
    let (content, elements) = match kind {
        QuestionKind::Audio => (QuestionContent::Audio, parse_content(body, ScanMode::Plain)),
        QuestionKind::TrueFalse => (
            QuestionContent::TrueFalse {
                answer: plain_answer(fields, &mut diags),
            },
            parse_content(body, ScanMode::Plain),
        ),
        QuestionKind::ShortAnswer => (
            QuestionContent::ShortAnswer {
                answer: plain_answer(fields, &mut diags),
            },
            parse_content(body, ScanMode::Plain),
        ),
        QuestionKind::Cloze => {
            let cloze = cloze::extract(body);
            diags.append(&mut cloze::diagnostics(&cloze));
            let blanks = cloze_blanks(&cloze, fields, &mut diags);
            (
                QuestionContent::Cloze { cloze, blanks },
                parse_content(body, ScanMode::Cloze),
            )
        }
    };

    let id = question_id(fields.id.as_deref(), group_id, position, kind, body);
    let diags = diags
        .into_iter()
        .map(|d| d.in_group(group_id).in_question(&id))
        .collect();

    let question = Question {
        id,
        content,
        elements,
        raw_text: body.to_string(),
        explanation: fields.explanation.as_deref().map(|raw| Explanation {
            raw_text: raw.to_string(),
            elements: parse_content(raw, ScanMode::Plain),
        }),
        audio: fields.audio.as_deref().map(media_reference),
    };
    Ok((question, diags))
}

/// The implicit question synthesized for a group whose audio block has no
/// explicit audio question.
pub(crate) fn synthesize_audio(group_id: &str, audio: &RelativePathBuf) -> Question {
    Question {
        id: question_id(None, group_id, 0, QuestionKind::Audio, audio.as_str()),
        content: QuestionContent::Audio,
        elements: Vec::new(),
        raw_text: String::new(),
        explanation: None,
        audio: Some(audio.clone()),
    }
}

fn parse_kind(raw: Option<&str>) -> Result<QuestionKind, BlockError> {
    let value = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(BlockError::MissingType)?;
    match value.to_ascii_uppercase().as_str() {
        "CLOZE" => Ok(QuestionKind::Cloze),
        "T-F" => Ok(QuestionKind::TrueFalse),
        "SHORT" => Ok(QuestionKind::ShortAnswer),
        "AUDIO" => Ok(QuestionKind::Audio),
        _ => Err(BlockError::UnknownType(value.to_string())),
    }
}

fn plain_answer(fields: &BlockFields, diags: &mut Vec<Diagnostic>) -> String {
    match fields.effective_answer().map(str::trim) {
        Some(answer) if !answer.is_empty() => answer.to_string(),
        _ => {
            diags.push(Diagnostic::warning(DiagnosticKind::MissingAnswer));
            String::new()
        }
    }
}

/// Picks the blank list for a cloze question: one answer per marker
/// occurrence, falling back to the grouped list if the per-occurrence list
/// came back empty despite markers, and to the comma-separated `A:` field
/// when the body has no markers at all.
fn cloze_blanks(
    cloze: &crate::models::ClozeContent,
    fields: &BlockFields,
    diags: &mut Vec<Diagnostic>,
) -> Vec<String> {
    let markers = cloze.marker_count();
    let blanks: Vec<String> = if !cloze.all.is_empty() {
        cloze.all.iter().map(|b| b.answer.clone()).collect()
    } else if !cloze.grouped.is_empty() {
        warn!("per-occurrence blank extraction was empty, using grouped blanks");
        diags.push(Diagnostic::warning(
            DiagnosticKind::GroupedExtractionFallback,
        ));
        cloze.grouped.iter().map(|b| b.answer.clone()).collect()
    } else if let Some(answer) = fields.effective_answer().map(str::trim)
        && !answer.is_empty()
    {
        diags.push(Diagnostic::info(
            DiagnosticKind::ClozeAnswersFromAnswerField,
        ));
        answer
            .split(',')
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    } else {
        diags.push(Diagnostic::warning(DiagnosticKind::MissingAnswer));
        Vec::new()
    };

    if markers > 0 && blanks.len() != markers {
        diags.push(Diagnostic::warning(DiagnosticKind::BlankCountMismatch {
            markers,
            blanks: blanks.len(),
        }));
    }
    blanks
}

/// An explicit, well-formed `ID:` is used as-is; otherwise the id is derived
/// from the group, the block's position, the kind tag and a digest of the
/// body, so an unedited question keeps its id across reloads.
fn question_id(
    explicit: Option<&str>,
    group_id: &str,
    position: usize,
    kind: QuestionKind,
    body: &str,
) -> String {
    if let Some(id) = explicit {
        let id = id.trim();
        if !id.is_empty() && !id.chars().any(char::is_whitespace) {
            return id.to_string();
        }
    }
    let digest = blake3::hash(body.as_bytes());
    let hex = digest.to_hex();
    format!("{group_id}-{position}-{}-{}", kind.tag(), &hex[..8])
}
