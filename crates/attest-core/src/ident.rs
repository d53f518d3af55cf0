//! # Hierarchical Control Identifiers
//!
//! Control and group identifiers encode hierarchy by convention:
//! underscore-separated segments, where `4_1` is the parent of `4_1_2`.
//! This module derives parent/child relationships from that convention
//! and provides the numeric-aware ordering used everywhere identifiers
//! are sorted for display.
//!
//! Identifiers without a delimiter are root-level; there is no malformed
//! identifier, only one with no parent.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// The segment delimiter for hierarchical identifiers.
pub const SEGMENT_DELIMITER: char = '_';

/// The parent identifier, if any.
///
/// `4_1_2` → `4_1`; a single-segment identifier has no parent.
pub fn parent_id(id: &str) -> Option<&str> {
    id.rfind(SEGMENT_DELIMITER).map(|idx| &id[..idx])
}

/// Whether `id` equals `ancestor` or sits anywhere below it.
///
/// Prefix membership is segment-aware: `4_10` is not a descendant of `4_1`.
pub fn is_descendant(id: &str, ancestor: &str) -> bool {
    if id == ancestor {
        return true;
    }
    id.len() > ancestor.len()
        && id.starts_with(ancestor)
        && id[ancestor.len()..].starts_with(SEGMENT_DELIMITER)
}

/// Numeric-segment-aware identifier ordering.
///
/// Digit runs compare as unsigned integers, so `4_1_9` sorts before
/// `4_1_10` instead of after it lexically. Non-digit runs compare
/// case-insensitively. Leading zeros are tolerated (`4_01` ties `4_1`).
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_digit_run(&mut ca);
                let nb = take_digit_run(&mut cb);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            (Some(x), Some(y)) => {
                match x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()) {
                    Ordering::Equal => {
                        ca.next();
                        cb.next();
                    }
                    ord => return ord,
                }
            }
        }
    }
}

/// Consume a run of ASCII digits and return its numeric value.
///
/// Saturates rather than overflowing on absurdly long runs.
fn take_digit_run(chars: &mut Peekable<Chars<'_>>) -> u64 {
    let mut value: u64 = 0;
    while let Some(c) = chars.peek().copied() {
        let Some(digit) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(u64::from(digit));
        chars.next();
    }
    value
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
