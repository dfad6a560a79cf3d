//! Lemma body erasure
//!
//! Rewrites a source file so every lemma with a proof becomes an unproven
//! `{:axiom}` with an empty body. All edits are computed against the original
//! offsets and applied in one forward pass over a sorted edit list, so no edit
//! shifts another. A declaration is either fully rewritten or left untouched.

use serde::{Deserialize, Serialize};

use crate::parser::lexical::line_indent;
use crate::parser::{Body, DeclarationScanner, AXIOM_ATTRIBUTE};

/// Result of erasing one source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erasure {
    /// Transformed source
    pub output: String,
    /// Lemmas whose bodies were emptied
    pub erased: Vec<String>,
    /// Lemmas skipped because they already carry `{:axiom}`
    pub already_axiom: Vec<String>,
    /// Lemmas left as-is because no body could be resolved
    pub untouched: Vec<String>,
}

impl Erasure {
    /// True when the output differs from the input
    pub fn changed(&self) -> bool {
        !self.erased.is_empty()
    }
}

#[derive(Debug)]
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

/// Erase every lemma body in `source`, marking each lemma `{:axiom}`.
pub fn erase_lemma_bodies(source: &str) -> String {
    erase_with_report(source).output
}

/// Erase every lemma body and report what happened to each lemma.
pub fn erase_with_report(source: &str) -> Erasure {
    let mut edits = Vec::new();
    let mut erased = Vec::new();
    let mut already_axiom = Vec::new();
    let mut untouched = Vec::new();

    for decl in DeclarationScanner::new(source) {
        if decl.is_axiom() {
            already_axiom.push(decl.name);
            continue;
        }

        let Body::Block { open, close } = decl.body else {
            log::debug!("leaving lemma {} untouched ({:?})", decl.name, decl.body);
            untouched.push(decl.name);
            continue;
        };

        edits.push(Edit {
            start: decl.lemma_keyword_end,
            end: decl.lemma_keyword_end,
            replacement: format!(" {{:{}}}", AXIOM_ATTRIBUTE),
        });
        edits.push(Edit {
            start: open,
            end: close + 1,
            replacement: format!("{{\n{}}}", line_indent(source, open)),
        });
        erased.push(decl.name);
    }

    log::info!(
        "erased {} lemma(s), {} already axioms, {} untouched",
        erased.len(),
        already_axiom.len(),
        untouched.len()
    );

    Erasure {
        output: apply_edits(source, edits),
        erased,
        already_axiom,
        untouched,
    }
}

/// Rebuild `source` by concatenating untouched spans and replacements.
fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| (edit.start, edit.end));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        debug_assert!(edit.start >= cursor, "overlapping edit {:?}", edit);
        out.push_str(&source[cursor..edit.start]);
        out.push_str(&edit.replacement);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..]);
    out
}
