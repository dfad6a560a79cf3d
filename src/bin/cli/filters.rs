//! Filtering logic for lemma listings
//!
//! Filters declarations by name pattern.

use regex::Regex;

use lemma_scan::{Declaration, LemmaScanError, Result};

/// Lemma name pattern; `*` matches any run of characters, everything else is literal
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^{}$", body)).map_err(|source| {
            LemmaScanError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(NamePattern { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Keep declarations whose name matches `pattern` (all of them when `None`)
pub fn filter_declarations(
    declarations: Vec<Declaration>,
    pattern: Option<&NamePattern>,
) -> Vec<Declaration> {
    match pattern {
        Some(pattern) => declarations
            .into_iter()
            .filter(|d| pattern.matches(&d.name))
            .collect(),
        None => declarations,
    }
}
