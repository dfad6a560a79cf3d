//! Parser module for Lemma Scan
//!
//! This module contains:
//! - `lexical`: comment/literal classification and the comment-blanked code view
//! - `braces`: comment-aware brace matching
//! - `locator`: body-brace disambiguation for a declaration header
//! - `declarations`: lemma header discovery and body resolution

pub mod braces;
pub mod declarations;
pub mod lexical;
pub mod locator;

pub use braces::{code_brace_counts, find_matching_brace};
pub use declarations::{
    scan_declarations,
    Body,
    Declaration,
    DeclarationScanner,
    LemmaStatus,
    Modifier,
    AXIOM_ATTRIBUTE,
};
pub use lexical::{classify, classify_and_skip, code_view, state_at, LexicalState, LineIndex};
pub use locator::{find_body_brace, BodyLocation, CLAUSE_KEYWORDS, DECLARATION_KEYWORDS};
