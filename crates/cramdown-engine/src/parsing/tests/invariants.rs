use crate::models::ElementNode;

/// Validates element list invariants for a parsed text.
///
/// Asserts that:
/// - Every span lies within the text bounds
/// - Spans are in source order and never overlap
/// - Concatenating every span's slice reproduces the text exactly
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(text: &str, elements: &[ElementNode]) {
    let mut rebuilt = String::new();
    let mut cursor = 0;
    for node in elements {
        assert!(
            node.span.start <= node.span.end && node.span.end <= text.len(),
            "span out of bounds: {:?} (text len: {})",
            node.span,
            text.len()
        );
        assert!(
            node.span.start >= cursor,
            "spans overlap or run backwards at {:?} (cursor: {cursor})",
            node.span
        );
        cursor = node.span.end;
        rebuilt.push_str(node.span.slice(text));
    }
    assert_eq!(rebuilt, text, "element spans do not reproduce the source");
}
