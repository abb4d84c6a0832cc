use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};

use super::element::ElementNode;
use super::span::Span;

/// How a cloze marker is rendered in blanked display text.
///
/// The consumer picks one per use case: `Glyph` for a read-only preview,
/// `ById` when repeated occurrences of one id must be visually linked,
/// `Sequential` when each occurrence gets its own input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlankStyle {
    Glyph,
    ById,
    Sequential,
}

impl BlankStyle {
    /// The fixed glyph used by [`BlankStyle::Glyph`].
    pub const GLYPH: &'static str = "_____";

    /// Renders the blank token for a marker with the given grouping id and
    /// 1-based occurrence index.
    #[must_use]
    pub fn token(self, id: u32, occurrence: u32) -> String {
        match self {
            BlankStyle::Glyph => Self::GLYPH.to_string(),
            BlankStyle::ById => format!("__CLOZE_{id}__"),
            BlankStyle::Sequential => format!("__CLOZE_{occurrence}__"),
        }
    }
}

/// One expected answer derived from a cloze marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozeBlank {
    /// The marker's grouping id (the `N` in `{{cN::...}}`).
    pub id: u32,
    /// 1-based index of the marker in source order. Together with `id` this
    /// is the stable key for attributing an input field to a blank; answer
    /// text is not unique and must not be used for attribution.
    pub occurrence: u32,
    /// Full span of the marker (braces included) in [`ClozeContent::source`].
    pub span: Span,
    /// The marker's inner content, trimmed. Math syntax is left untouched.
    pub answer: String,
    /// The inner content parsed as plain content, so embedded math surfaces
    /// as `Latex` nodes. Spans index into [`ClozeContent::source`].
    pub elements: Vec<ElementNode>,
}

/// Everything extracted from one cloze question body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozeContent {
    /// The body text the markers were found in, verbatim.
    pub source: String,
    /// One blank per marker occurrence, in source order. Duplicate ids are
    /// kept as separate entries.
    pub all: Vec<ClozeBlank>,
    /// First blank per distinct id, sorted by id ascending.
    pub grouped: Vec<ClozeBlank>,
}

impl ClozeContent {
    /// Number of marker occurrences in the source.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.all.len()
    }

    /// Renders the source with every marker replaced by a blank token in the
    /// given style. Text outside markers is spliced from the original bytes,
    /// so math and markup there survive unchanged.
    #[must_use]
    pub fn display(&self, style: BlankStyle) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for blank in &self.all {
            out.push_str(&self.source[cursor..blank.span.start]);
            out.push_str(&style.token(blank.id, blank.occurrence));
            cursor = blank.span.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

/// Discriminates the question types of the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    TrueFalse,
    ShortAnswer,
    Cloze,
    Audio,
}

impl QuestionKind {
    /// Short tag used inside derived question ids.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "tf",
            QuestionKind::ShortAnswer => "short",
            QuestionKind::Cloze => "cloze",
            QuestionKind::Audio => "audio",
        }
    }
}

/// Type-specific question payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum QuestionContent {
    TrueFalse {
        answer: String,
    },
    ShortAnswer {
        answer: String,
    },
    Cloze {
        cloze: ClozeContent,
        /// The answer strings the consumer checks input against, one per
        /// blank. Normally taken from `cloze.all`; a markerless body falls
        /// back to the comma-separated `A:` field.
        blanks: Vec<String>,
    },
    Audio,
}

/// A question's explanation body, parsed and verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub raw_text: String,
    pub elements: Vec<ElementNode>,
}

/// One fully assembled question.
///
/// Immutable once built; the presentation layer keeps its own answer and
/// feedback state keyed by `id` (and blank occurrence for cloze questions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier. Either the author's `ID:` field or derived from
    /// the group, position, kind and a content hash, so an unedited question
    /// keeps its id across reloads.
    pub id: String,
    pub content: QuestionContent,
    /// Ordered elements of the question body. For cloze questions this is
    /// the blanked view: marker regions appear as `Text` nodes carrying the
    /// sequential blank token. Spans index into `raw_text`.
    pub elements: Vec<ElementNode>,
    /// The `Q:` body verbatim (cloze markers intact) for lossless export.
    pub raw_text: String,
    pub explanation: Option<Explanation>,
    pub audio: Option<RelativePathBuf>,
}

impl Question {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self.content {
            QuestionContent::TrueFalse { .. } => QuestionKind::TrueFalse,
            QuestionContent::ShortAnswer { .. } => QuestionKind::ShortAnswer,
            QuestionContent::Cloze { .. } => QuestionKind::Cloze,
            QuestionContent::Audio => QuestionKind::Audio,
        }
    }
}
