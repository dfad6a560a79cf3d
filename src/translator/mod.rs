//! Translator module for Lemma Scan
//!
//! This module contains:
//! - `extract`: verbatim extraction of named lemmas
//! - `erase`: whole-file erasure of lemma proof bodies into `{:axiom}` declarations

pub mod erase;
pub mod extract;

pub use erase::{erase_lemma_bodies, erase_with_report, Erasure};
pub use extract::{extract_lemma, extract_lemmas, list_lemmas};
