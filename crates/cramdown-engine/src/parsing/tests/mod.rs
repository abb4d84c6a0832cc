//! Integration tests for the parsing module.
//!
//! Snapshot tests compare a plain-text outline of the whole parse result;
//! everything else asserts the pipeline's laws directly.

mod invariants;

use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;

use crate::models::{BlankStyle, ContentElement, MathMode};
use crate::parsing::patterns::table;
use crate::parsing::{ScanMode, cloze, parse_content, parse_document};

#[rstest]
#[case("The capital is {{c1::Paris}}.")]
#[case("{{c1::a {{c2::b}} c}}")]
#[case("no markers here")]
#[case("{{c1::unterminated")]
#[case("{{c1::x}} and {{c1::y}}")]
fn stripping_markers_twice_matches_stripping_once(#[case] text: &str) {
    let once = cloze::strip_markers(text);
    assert_eq!(cloze::strip_markers(&once), once);
}

#[rstest]
#[case("{{c1::x}} {{c2::y}} {{c1::z}}", 3, 2)]
#[case("no markers", 0, 0)]
#[case("{{c2::a}} {{c2::b}} {{c2::c}}", 3, 1)]
#[case("{{c5::solo}}", 1, 1)]
fn occurrence_extraction_counts_markers_and_grouped_counts_ids(
    #[case] text: &str,
    #[case] markers: usize,
    #[case] distinct: usize,
) {
    let content = cloze::extract(text);
    assert_eq!(content.all.len(), markers);
    assert_eq!(content.grouped.len(), distinct);
}

#[test]
fn sequential_blanking_numbers_blanks_left_to_right() {
    let content = cloze::extract("{{c1::x}} {{c2::y}} {{c1::z}}");
    assert_eq!(
        content.display(BlankStyle::Sequential),
        "__CLOZE_1__ __CLOZE_2__ __CLOZE_3__"
    );

    // Numbering follows appearance order even when every id repeats.
    let repeated = cloze::extract("{{c9::a}} {{c9::b}}");
    assert_eq!(
        repeated.display(BlankStyle::Sequential),
        "__CLOZE_1__ __CLOZE_2__"
    );
}

#[rstest]
#[case("", ScanMode::Plain)]
#[case("plain prose only", ScanMode::Plain)]
#[case(
    "intro ![[a.png]] then\n```rs\nlet x = 1;\n```\n| a | b |\n| - | - |\n| c | d |\nmath $$x$$ tail",
    ScanMode::Plain
)]
#[case("unclosed ```rust\nnope", ScanMode::Plain)]
#[case("start {{c1::mid $a_i$}} end", ScanMode::Cloze)]
#[case("{{c1::a}}{{c2::b}} $x$", ScanMode::Cloze)]
fn element_spans_reproduce_the_source(#[case] text: &str, #[case] mode: ScanMode) {
    invariants::check(text, &parse_content(text, mode));
}

#[test]
fn math_literals_survive_blank_conversion() {
    let body = r"state {{c1::$E=mc^2$}} then $$\sum_{i=1}^n i$$";
    let content = cloze::extract(body);

    assert_eq!(content.all.len(), 1);
    let blank = &content.all[0];
    assert_eq!(blank.answer, "$E=mc^2$");
    assert_eq!(blank.elements.len(), 1);
    assert_eq!(blank.elements[0].span.slice(body), "$E=mc^2$");

    for style in [BlankStyle::Glyph, BlankStyle::ById, BlankStyle::Sequential] {
        let display = content.display(style);
        assert!(display.contains(r"$$\sum_{i=1}^n i$$"));
        assert!(!display.contains("c1::"));
    }

    let elements = parse_content(body, ScanMode::Cloze);
    invariants::check(body, &elements);
    assert!(elements.iter().any(|node| matches!(
        &node.element,
        ContentElement::Latex { expression, mode: MathMode::Display }
            if expression.as_str() == r"\sum_{i=1}^n i"
    )));
}

#[test]
fn single_marker_blanks_to_the_fixed_glyph() {
    let content = cloze::extract("The capital is {{c1::Paris}}.");
    let answers: Vec<&str> = content.all.iter().map(|b| b.answer.as_str()).collect();
    assert_eq!(answers, ["Paris"]);
    let grouped: Vec<&str> = content.grouped.iter().map(|b| b.answer.as_str()).collect();
    assert_eq!(grouped, ["Paris"]);
    assert_eq!(content.display(BlankStyle::Glyph), "The capital is _____.");
}

#[test]
fn grouped_extraction_keeps_first_content_per_id() {
    let content = cloze::extract("{{c1::x}} {{c2::y}} {{c1::z}}");
    let grouped: Vec<(u32, &str)> = content
        .grouped
        .iter()
        .map(|b| (b.id, b.answer.as_str()))
        .collect();
    assert_eq!(grouped, [(1, "x"), (2, "y")]);
    let all: Vec<&str> = content.all.iter().map(|b| b.answer.as_str()).collect();
    assert_eq!(all, ["x", "y", "z"]);
}

#[test]
fn identical_answer_text_is_attributed_by_id_and_occurrence() {
    let content = cloze::extract("{{c1::same}} and {{c2::same}}");
    let keys: Vec<(u32, u32)> = content.all.iter().map(|b| (b.id, b.occurrence)).collect();
    assert_eq!(keys, [(1, 1), (2, 2)]);
    assert_eq!(content.all[0].answer, content.all[1].answer);
    assert_ne!(content.all[0].span, content.all[1].span);
}

#[test]
fn table_cell_reparses_into_an_attributed_blank() {
    let markup = "| Item | Value |\n| --- | --- |\n| Answer | {{c1::42}} |";
    let elements = parse_content(markup, ScanMode::Plain);
    assert_eq!(elements.len(), 1);
    let ContentElement::Table { markup: kept } = &elements[0].element else {
        panic!("expected a table element");
    };

    let rows = table::cells(kept);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], "{{c1::42}}");

    let cell = cloze::extract(&rows[1][1]);
    assert_eq!(cell.all.len(), 1);
    assert_eq!(cell.all[0].answer, "42");
    assert_eq!((cell.all[0].id, cell.all[0].occurrence), (1, 1));
}

#[test]
fn plain_math_body_splits_into_text_latex_text() {
    let elements = parse_content("Answer: $x^2+y^2=z^2$ is Pythagoras", ScanMode::Plain);
    assert_eq!(elements.len(), 3);
    assert_eq!(
        elements[0].element,
        ContentElement::Text {
            content: "Answer: ".to_string()
        }
    );
    assert_eq!(
        elements[1].element,
        ContentElement::Latex {
            expression: "x^2+y^2=z^2".to_string(),
            mode: MathMode::Inline
        }
    );
    assert_eq!(
        elements[2].element,
        ContentElement::Text {
            content: " is Pythagoras".to_string()
        }
    );
}

#[test]
fn question_body_on_its_own_lines_drops_one_leading_newline() {
    let doc = r#"## G

### Questions

--- start-question
TYPE: Short
Q:
Line one
Line two
A: both
--- end-question
"#;
    let parsed = parse_document(doc);
    assert_eq!(parsed.groups[0].questions[0].raw_text, "Line one\nLine two");
}

#[test]
fn document_outline_snapshot() {
    let doc = r#"## Biology

### Transcript

Cells contain ![[mito.png]] structures.

### Questions

--- start-question
TYPE: CLOZE
ID: bio-cloze-1
Q: The powerhouse is {{c1::the mitochondria}}.
--- end-question

--- start-question
TYPE: Short
ID: bio-short-1
Q: Name the energy currency.
A: ATP
E: It hydrolyses to release energy.
--- end-question

## History

### Questions

--- start-question
TYPE: T-F
ID: hist-tf-1
Q: Rome fell in 476.
A: true
--- end-question

--- start-question
Q: orphan block
--- end-question
"#;
    let parsed = parse_document(doc);
    insta::assert_snapshot!(outline::outline(&parsed).trim_end(), @r#"
    group biology "Biology"
      transcript [Text, Image(mito.png), Text]
      question bio-cloze-1 cloze [Text, Text, Text]
        blanks ["the mitochondria"]
      question bio-short-1 short [Text]
    group history "History"
      question hist-tf-1 tf [Text]
    warning question block has no TYPE: field [history]
    "#);
}
