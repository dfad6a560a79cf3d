//! Lemma declaration scanning
//!
//! Finds lemma headers in the code view of a source file (so headers inside
//! comments and strings never match), then resolves each header's body against
//! the original text with the body locator and brace matcher.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::braces::find_matching_brace;
use super::lexical::{code_view, is_word_start, line_number, word_end, LineIndex};
use super::locator::{find_body_brace, BodyLocation};

/// Modifiers and the `lemma` keyword, leftmost-first so modifiers are included
static LEMMA_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:ghost|twostate|static|least|greatest)\s+)*lemma\b")
        .expect("lemma header pattern is valid")
});

/// Attribute marking a lemma as accepted without proof
pub const AXIOM_ATTRIBUTE: &str = "axiom";

/// Declaration modifier preceding `lemma`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Ghost,
    Twostate,
    Static,
    Least,
    Greatest,
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ghost" => Ok(Modifier::Ghost),
            "twostate" => Ok(Modifier::Twostate),
            "static" => Ok(Modifier::Static),
            "least" => Ok(Modifier::Least),
            "greatest" => Ok(Modifier::Greatest),
            _ => Err(format!("Unknown modifier: {}", s)),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::Ghost => "ghost",
            Modifier::Twostate => "twostate",
            Modifier::Static => "static",
            Modifier::Least => "least",
            Modifier::Greatest => "greatest",
        };
        f.write_str(s)
    }
}

/// Resolved body of a declaration
///
/// Both offsets exist together or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    /// `open` is the body `{`, `close` its matching `}`
    Block { open: usize, close: usize },
    /// Signature only
    NoBody,
    /// Header or body runs past the end of input
    Unterminated,
}

/// Summary status of a lemma, as reported by `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LemmaStatus {
    Proof,
    Axiom,
    NoBody,
    Unterminated,
}

impl fmt::Display for LemmaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LemmaStatus::Proof => "proof",
            LemmaStatus::Axiom => "axiom",
            LemmaStatus::NoBody => "no-body",
            LemmaStatus::Unterminated => "unterminated",
        };
        f.write_str(s)
    }
}

/// A located lemma declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Lemma name
    pub name: String,
    /// Modifiers in source order
    pub modifiers: Vec<Modifier>,
    /// Names of attribute blocks between `lemma` and the name (`axiom`, `extern`, ...)
    pub attributes: Vec<String>,
    /// Offset of the first modifier, or of `lemma` when there is none
    pub declaration_start: usize,
    /// Offset just past the `lemma` keyword
    pub lemma_keyword_end: usize,
    /// Offset just past the name
    pub keyword_end: usize,
    /// Resolved body
    pub body: Body,
}

impl Declaration {
    /// Marked `{:axiom}` already
    pub fn is_axiom(&self) -> bool {
        self.attributes.iter().any(|a| a == AXIOM_ATTRIBUTE)
    }

    pub fn status(&self) -> LemmaStatus {
        match self.body {
            Body::NoBody => LemmaStatus::NoBody,
            Body::Unterminated => LemmaStatus::Unterminated,
            Body::Block { .. } if self.is_axiom() => LemmaStatus::Axiom,
            Body::Block { .. } => LemmaStatus::Proof,
        }
    }

    /// Verbatim text from the first keyword through the body's closing brace
    pub fn text<'a>(&self, src: &'a str) -> Option<&'a str> {
        match self.body {
            Body::Block { close, .. } => Some(src[self.declaration_start..=close].trim()),
            _ => None,
        }
    }

    /// Offset past everything this declaration owns
    pub fn end(&self) -> usize {
        match self.body {
            Body::Block { close, .. } => close + 1,
            _ => self.keyword_end,
        }
    }

    /// 1-based line of the declaration start
    pub fn line(&self, src: &str) -> usize {
        line_number(src, self.declaration_start)
    }
}

/// Iterator over the lemma declarations of one source text.
///
/// Each instance owns its own code view and cursor; nothing is shared between
/// scans. Headers that fall inside an earlier declaration's body are skipped.
pub struct DeclarationScanner<'a> {
    src: &'a str,
    view: String,
    lines: LineIndex,
    pos: usize,
}

impl<'a> DeclarationScanner<'a> {
    pub fn new(src: &'a str) -> Self {
        DeclarationScanner {
            src,
            view: code_view(src),
            lines: LineIndex::new(src),
            pos: 0,
        }
    }
}

impl Iterator for DeclarationScanner<'_> {
    type Item = Declaration;

    fn next(&mut self) -> Option<Declaration> {
        while self.pos < self.view.len() {
            let (start, keyword_end, header_text) = {
                let m = LEMMA_HEADER.find_at(&self.view, self.pos)?;
                (m.start(), m.end(), m.as_str().to_string())
            };

            let Some(header) = parse_header(&self.view, keyword_end) else {
                log::trace!("skipping unnamed lemma keyword at offset {}", start);
                self.pos = keyword_end;
                continue;
            };

            let modifiers: Vec<Modifier> = header_text
                .split_whitespace()
                .filter_map(|word| word.parse::<Modifier>().ok())
                .collect();

            let body = resolve_body(self.src, &self.view, header.name_end);
            let declaration = Declaration {
                name: header.name,
                modifiers,
                attributes: header.attributes,
                declaration_start: start,
                lemma_keyword_end: keyword_end,
                keyword_end: header.name_end,
                body,
            };
            self.pos = declaration.end();

            log::debug!(
                "lemma {} at line {}: {}",
                declaration.name,
                self.lines.line_of(declaration.declaration_start),
                declaration.status()
            );
            return Some(declaration);
        }
        None
    }
}

/// Scan every lemma declaration in `src`.
pub fn scan_declarations(src: &str) -> Vec<Declaration> {
    DeclarationScanner::new(src).collect()
}

struct Header {
    name: String,
    name_end: usize,
    attributes: Vec<String>,
}

/// Parse attribute blocks and the name following the `lemma` keyword.
fn parse_header(view: &str, lemma_keyword_end: usize) -> Option<Header> {
    let bytes = view.as_bytes();
    let mut attributes = Vec::new();
    let mut i = skip_whitespace(bytes, lemma_keyword_end);

    while bytes[i..].starts_with(b"{:") {
        let close = find_matching_brace(view, i)?;
        attributes.push(attribute_name(&view[i + 2..close]));
        i = skip_whitespace(bytes, close + 1);
    }

    if !bytes.get(i).copied().is_some_and(is_word_start) {
        return None;
    }
    let name_end = word_end(view, i);
    Some(Header {
        name: view[i..name_end].to_string(),
        name_end,
        attributes,
    })
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// `axiom` from `axiom`, `extern` from `extern "Foo"`
fn attribute_name(inner: &str) -> String {
    inner
        .trim_start()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Resolve the body of the declaration whose name ends at `keyword_end`.
///
/// A clause region that runs over another lemma header belongs to a malformed
/// declaration (an unclosed parameter list, say) and resolves to `NoBody`.
fn resolve_body(src: &str, view: &str, keyword_end: usize) -> Body {
    match find_body_brace(src, keyword_end) {
        BodyLocation::Found(open) if LEMMA_HEADER.is_match(&view[keyword_end..open]) => {
            log::trace!("clause region at offset {} runs into another lemma", keyword_end);
            Body::NoBody
        }
        BodyLocation::Found(open) => match find_matching_brace(src, open) {
            Some(close) => Body::Block { open, close },
            None => Body::Unterminated,
        },
        BodyLocation::NoBody => Body::NoBody,
        BodyLocation::Unterminated => Body::Unterminated,
    }
}
