//! # lemma-scan
//!
//! Lemma Scan: locates, extracts and erases lemma declarations in Dafny-style
//! formal specifications.
//!
//! This crate provides:
//! - [`extract_lemma`] for the verbatim text of a named lemma (header, clauses, proof body)
//! - [`erase_lemma_bodies`] for a whole-file transform that empties every lemma
//!   body and marks the lemma `{:axiom}`, leaving every other byte untouched
//! - [`list_lemmas`] for an inventory of the lemmas in a file
//! - CLI tool (`lemma-scan`) wrapping the above for files and directories
//!
//! ## Usage
//!
//! ```rust
//! use lemma_scan::{erase_lemma_bodies, extract_lemma};
//!
//! let src = "lemma Foo(x: int) requires x > 0 ensures x > 0 { assert true; }";
//!
//! assert_eq!(extract_lemma(src, "Foo").as_deref(), Some(src));
//! assert_eq!(
//!     erase_lemma_bodies(src),
//!     "lemma {:axiom} Foo(x: int) requires x > 0 ensures x > 0 {\n}"
//! );
//! ```
//!
//! The scanner is a heuristic lexer, not a parser. Braces inside comments and
//! string literals are never counted, attribute blocks `{:name ...}` are never
//! taken for bodies, and a brace on a line that starts with a clause keyword
//! (`requires`, `ensures`, ...) is treated as part of that clause.
//!
//! Every scanning function is pure: no I/O, no shared state, safe to call from
//! any number of threads.

pub mod cache;
pub mod error;
pub mod parser;
pub mod translator;

pub use cache::ErasureCache;
pub use error::{LemmaScanError, Result};
pub use parser::{Body, BodyLocation, Declaration, LemmaStatus, LexicalState, Modifier};
pub use translator::{
    erase_lemma_bodies,
    erase_with_report,
    extract_lemma,
    extract_lemmas,
    list_lemmas,
    Erasure,
};
