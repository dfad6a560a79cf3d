//! Brace matching
//!
//! Comment- and literal-aware `{`/`}` matching.

use super::lexical::classify_and_skip;

/// Find the `}` matching the `{` at `open_index`.
///
/// Returns `None` when `open_index` is not a `{` or when the input ends before
/// depth returns to zero. Callers treat `None` as truncated input.
pub fn find_matching_brace(src: &str, open_index: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    if bytes.get(open_index) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open_index;
    while i < bytes.len() {
        if let Some(next) = classify_and_skip(src, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Count `{` and `}` that sit in code, ignoring comments and literals.
pub fn code_brace_counts(src: &str) -> (usize, usize) {
    let bytes = src.as_bytes();
    let (mut open, mut close) = (0, 0);
    let mut i = 0;
    while i < bytes.len() {
        if let Some(next) = classify_and_skip(src, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'{' => open += 1,
            b'}' => close += 1,
            _ => {}
        }
        i += 1;
    }
    (open, close)
}
