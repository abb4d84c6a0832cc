//! Overlap resolution: picking a maximal non-overlapping subset of the raw
//! candidate matches.
//!
//! Candidates are ordered by `(start ascending, end descending)` and accepted
//! greedily. The ordering is the whole priority rule: when two candidates
//! begin at the same offset the longer one wins, so a rich construct (a
//! table) is never fragmented by a shorter sub-match (inline math in a cell)
//! starting at the same byte. Sub-matches inside an accepted match are
//! dropped here and rediscovered when that match's inner content is parsed.

use super::patterns::RawMatch;
use crate::models::Span;

/// Resolves plain-mode candidates. Returns the accepted matches sorted by
/// start offset.
pub fn resolve(mut candidates: Vec<RawMatch>) -> Vec<RawMatch> {
    candidates.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });
    let mut accepted: Vec<RawMatch> = Vec::new();
    for candidate in candidates {
        if !overlaps_any(&accepted, candidate.span) {
            accepted.push(candidate);
        }
    }
    accepted
}

/// Resolves cloze-mode candidates. Markers are accepted in their own first
/// pass and always survive; every other candidate must then lie fully
/// outside the marker spans to compete. A candidate fully inside a marker
/// belongs to that marker's inner content and is dropped at this level; one
/// straddling a marker boundary is rejected outright.
pub fn resolve_cloze(markers: Vec<RawMatch>, mut others: Vec<RawMatch>) -> Vec<RawMatch> {
    let mut accepted = resolve(markers);
    let marker_spans: Vec<Span> = accepted.iter().map(|m| m.span).collect();

    others.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(b.span.end.cmp(&a.span.end))
    });
    for candidate in others {
        if marker_spans.iter().any(|m| m.contains(candidate.span)) {
            continue;
        }
        if !overlaps_any(&accepted, candidate.span) {
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|m| m.span.start);
    accepted
}

fn overlaps_any(accepted: &[RawMatch], span: Span) -> bool {
    accepted.iter().any(|a| a.span.overlaps(span))
}
