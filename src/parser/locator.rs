//! Body-brace location
//!
//! Finds where a declaration's clause region ends and its body begins.
//!
//! Clause expressions may contain their own brace-delimited terms (set and map
//! displays, comprehensions, nested attributes), so counting braces from the
//! header does not identify the body. The scan below instead looks at the
//! source line each top-level `{` sits on:
//!
//! - `{:` opens an attribute block and is skipped whole.
//! - A `{` that is line-initial, or whose line does not start with a clause
//!   keyword, opens the body.
//! - A `{` on a line that starts with a clause keyword belongs to that clause
//!   and is skipped whole.
//!
//! The line is read from its start or from the end of the lemma name,
//! whichever comes later, so text belonging to an earlier declaration on the
//! same line never decides this lemma's body.
//!
//! A `{` that shares a line with a line-leading clause keyword is therefore
//! never taken as the body (`ensures x > 0 {`). Such declarations resolve to
//! [`BodyLocation::NoBody`] or [`BodyLocation::Unterminated`].

use super::braces::find_matching_brace;
use super::lexical::{classify_and_skip, is_ident_byte, is_word_start, line_start, word_end};

/// Keywords that open a specification clause
pub const CLAUSE_KEYWORDS: &[&str] = &[
    "requires",
    "ensures",
    "decreases",
    "modifies",
    "invariant",
    "reads",
];

/// Keywords that start a new top-level declaration
pub const DECLARATION_KEYWORDS: &[&str] = &[
    "lemma",
    "function",
    "method",
    "predicate",
    "datatype",
    "module",
    "import",
    "class",
    "trait",
    "const",
    "type",
    "newtype",
    "iterator",
    "export",
];

/// Outcome of a body-brace search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLocation {
    /// Index of the `{` opening the body
    Found(usize),
    /// Signature only: terminated by `;`, the next declaration, or the
    /// enclosing scope's `}`
    NoBody,
    /// Input ended before the header resolved
    Unterminated,
}

/// Locate the body brace of the declaration whose keyword and name end at
/// `keyword_end`.
pub fn find_body_brace(src: &str, keyword_end: usize) -> BodyLocation {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    let mut i = keyword_end;

    while i < bytes.len() {
        if let Some(next) = classify_and_skip(src, i) {
            i = next;
            continue;
        }

        let b = bytes[i];

        // Parameter lists, type arguments, indexing: nothing in here is a
        // clause keyword or a body.
        if depth > 0 {
            match b {
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth -= 1,
                _ => {}
            }
            i += 1;
            continue;
        }

        match b {
            b'(' | b'[' => {
                depth += 1;
                i += 1;
            }
            b'{' if bytes.get(i + 1) == Some(&b':') => match find_matching_brace(src, i) {
                Some(close) => i = close + 1,
                None => return BodyLocation::Unterminated,
            },
            b'{' => {
                let prefix = src[line_start(src, i).max(keyword_end)..i].trim();
                if prefix.is_empty() || !starts_with_clause_keyword(prefix) {
                    return BodyLocation::Found(i);
                }
                match find_matching_brace(src, i) {
                    Some(close) => i = close + 1,
                    None => return BodyLocation::Unterminated,
                }
            }
            b';' | b'}' => return BodyLocation::NoBody,
            b if is_word_start(b) && (i == 0 || !is_ident_byte(bytes[i - 1])) => {
                let end = word_end(src, i);
                if is_declaration_keyword(&src[i..end]) && !is_member_selection(bytes, i) {
                    return BodyLocation::NoBody;
                }
                i = end;
            }
            _ => i += 1,
        }
    }

    BodyLocation::Unterminated
}

/// True if `text` begins with a clause keyword as a whole word
pub fn starts_with_clause_keyword(text: &str) -> bool {
    CLAUSE_KEYWORDS.iter().any(|keyword| {
        text.strip_prefix(keyword)
            .is_some_and(|rest| !rest.bytes().next().is_some_and(is_ident_byte))
    })
}

fn is_declaration_keyword(word: &str) -> bool {
    DECLARATION_KEYWORDS.contains(&word)
}

fn is_member_selection(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1] == b'.'
}
