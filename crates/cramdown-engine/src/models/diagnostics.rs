use serde::{Deserialize, Serialize};

/// How serious a diagnostic is. Nothing in this engine is fatal; `Warning`
/// marks content that was skipped or likely authored wrong, `Info` marks
/// notable but harmless findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// What was found. The display text doubles as the user-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum DiagnosticKind {
    #[error("cloze marker {occurrence} has empty content")]
    EmptyClozeContent { occurrence: u32 },
    #[error("cloze ids are not sequential: {ids:?}")]
    NonSequentialClozeIds { ids: Vec<u32> },
    #[error("{markers} cloze markers produced {blanks} blanks")]
    BlankCountMismatch { markers: usize, blanks: usize },
    #[error("per-occurrence extraction was empty, fell back to grouped blanks")]
    GroupedExtractionFallback,
    #[error("no cloze markers in body, blanks taken from the answer field")]
    ClozeAnswersFromAnswerField,
    #[error("question has no answer field")]
    MissingAnswer,
    #[error("question block has no terminator")]
    UnterminatedBlock,
    #[error("question block has no TYPE: field")]
    MissingType,
    #[error("unknown question type {value:?}")]
    UnknownType { value: String },
    #[error("question block has an empty Q: body")]
    EmptyQuestionBody,
    #[error("document mixes both question block syntaxes, first one found wins")]
    MixedBlockSyntax,
    #[error("content before the first group heading was ignored")]
    PreambleIgnored,
    #[error("group has more than one audio block, extras ignored")]
    DuplicateAudioBlock,
    #[error("document contains no group headings")]
    NoGroupHeadings,
}

/// A non-fatal finding recorded during parsing.
///
/// Diagnostics ride on the parse result as structured data; the engine never
/// throws them and never aborts because of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Id of the group the finding belongs to, when known.
    pub group: Option<String>,
    /// Id of the question the finding belongs to, when known.
    pub question: Option<String>,
}

impl Diagnostic {
    pub fn info(kind: DiagnosticKind) -> Self {
        Self {
            severity: Severity::Info,
            kind,
            group: None,
            question: None,
        }
    }

    pub fn warning(kind: DiagnosticKind) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            group: None,
            question: None,
        }
    }

    #[must_use]
    pub fn in_group(mut self, id: impl Into<String>) -> Self {
        self.group = Some(id.into());
        self
    }

    #[must_use]
    pub fn in_question(mut self, id: impl Into<String>) -> Self {
        self.question = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_renders_a_message() {
        let kind = DiagnosticKind::UnknownType {
            value: "QUIZ".to_string(),
        };
        assert_eq!(kind.to_string(), "unknown question type \"QUIZ\"");
    }

    #[test]
    fn builders_attach_context() {
        let d = Diagnostic::warning(DiagnosticKind::MissingType)
            .in_group("anatomy")
            .in_question("anatomy-3");
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.group.as_deref(), Some("anatomy"));
        assert_eq!(d.question.as_deref(), Some("anatomy-3"));
    }
}
