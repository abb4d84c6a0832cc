use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};

use super::diagnostics::Diagnostic;
use super::element::ElementNode;
use super::question::Question;

/// A group's transcript section, parsed and verbatim. Transcripts are plain
/// content: cloze markers in them stay literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub raw_text: String,
    pub elements: Vec<ElementNode>,
}

/// A titled section of the document: optional transcript, optional audio
/// reference, and the questions found in its `### Questions` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Slug derived from the title, unique within the document.
    pub id: String,
    /// The heading text after `## `, trimmed.
    pub title: String,
    pub transcript: Option<Transcript>,
    pub audio: Option<RelativePathBuf>,
    pub questions: Vec<Question>,
}

/// The result of parsing one document. Always complete: malformed groups or
/// blocks are skipped and reported in `diagnostics`, never aborting the parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub groups: Vec<Group>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedDocument {
    /// Looks up a question anywhere in the document by id.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.groups
            .iter()
            .flat_map(|g| g.questions.iter())
            .find(|q| q.id == id)
    }

    /// Total question count across all groups.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.groups.iter().map(|g| g.questions.len()).sum()
    }
}
