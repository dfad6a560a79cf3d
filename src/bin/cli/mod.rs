//! CLI module for Lemma Scan
//!
//! Handles file discovery, name filtering, and output formatting

pub mod discover;
pub mod filters;
pub mod output;
