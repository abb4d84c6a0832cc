pub mod diagnostics;
pub mod element;
pub mod group;
pub mod question;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use element::{ContentElement, ElementNode, MathMode};
pub use group::{Group, ParsedDocument, Transcript};
pub use question::{
    BlankStyle, ClozeBlank, ClozeContent, Explanation, Question, QuestionContent, QuestionKind,
};
pub use span::Span;
