//! Stitching of a line that arrives as several disconnected fragments.
//!
//! The policy is tuned to the artifacts of the published dataset and is kept as is:
//! only the two fragments with the longest chord survive, a second fragment shorter
//! than [`STUB_THRESHOLD_PERCENT`] of the first is dropped as a stub, and otherwise
//! the two are joined at their closest pair of ends.

use crate::distance::distance_between;
use crate::Coordinate;

/// Chord ratio (in percent) under which the shorter fragment is ignored.
pub const STUB_THRESHOLD_PERCENT: f64 = 5.0;

/// Straight-line distance between the first and last coordinate of a fragment.
pub fn chord_length(fragment: &[Coordinate]) -> f64 {
    match (fragment.first(), fragment.last()) {
        (Some(first), Some(last)) => distance_between(first, last),
        _ => 0.0,
    }
}

/// Which pair of ends ends up adjacent after concatenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seam {
    /// A.first meets B.last: `B ++ A`
    FirstToLast,
    /// A.first meets B.first: `rev(A) ++ B`
    FirstToFirst,
    /// A.last meets B.last: `A ++ rev(B)`
    LastToLast,
    /// A.last meets B.first, also used on ties: `A ++ B`
    LastToFirst,
}

fn closest_seam(a: &[Coordinate], b: &[Coordinate]) -> Seam {
    let (a_first, a_last) = (&a[0], &a[a.len() - 1]);
    let (b_first, b_last) = (&b[0], &b[b.len() - 1]);
    let candidates = [
        (Seam::FirstToLast, distance_between(a_first, b_last)),
        (Seam::FirstToFirst, distance_between(a_first, b_first)),
        (Seam::LastToLast, distance_between(a_last, b_last)),
        (Seam::LastToFirst, distance_between(a_last, b_first)),
    ];
    let min = candidates
        .iter()
        .map(|(_, d)| *d)
        .fold(f64::INFINITY, f64::min);
    let mut closest = candidates.iter().filter(|(_, d)| *d == min);
    match (closest.next(), closest.next()) {
        (Some((seam, _)), None) => *seam,
        _ => Seam::LastToFirst,
    }
}

fn join(a: Vec<Coordinate>, b: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut joined = Vec::with_capacity(a.len() + b.len());
    match closest_seam(&a, &b) {
        Seam::FirstToLast => {
            joined.extend(b);
            joined.extend(a);
        }
        Seam::FirstToFirst => {
            joined.extend(a.into_iter().rev());
            joined.extend(b);
        }
        Seam::LastToLast => {
            joined.extend(a);
            joined.extend(b.into_iter().rev());
        }
        Seam::LastToFirst => {
            joined.extend(a);
            joined.extend(b);
        }
    }
    joined
}

/// Merge the fragments of one line into a single polyline.
///
/// Fragments beyond the two longest chords are dropped. Takes ownership so the
/// caller's sequences are never reoriented in place.
pub fn aggregate_fragments(mut fragments: Vec<Vec<Coordinate>>) -> Vec<Coordinate> {
    fragments.retain(|fragment| !fragment.is_empty());
    fragments.sort_by(|x, y| chord_length(y).total_cmp(&chord_length(x)));
    fragments.truncate(2);

    let mut kept = fragments.into_iter();
    let (a, b) = match (kept.next(), kept.next()) {
        (Some(a), Some(b)) => (a, b),
        (Some(a), None) => return a,
        _ => return Vec::new(),
    };

    let (la, lb) = (chord_length(&a), chord_length(&b));
    if 100.0 * lb / la < STUB_THRESHOLD_PERCENT {
        return a;
    }
    join(a, b)
}
