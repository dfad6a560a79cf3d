//! Output formatting for CLI results
//!
//! Formats lemma listings as human-readable text, JSON, or Markdown, and
//! extraction results as text or JSON.

use serde::Serialize;
use serde_json::json;
use std::path::Path;

use lemma_scan::parser::LineIndex;
use lemma_scan::{Declaration, Erasure, LemmaStatus};

use crate::OutputFormat;

/// One lemma in a listing
#[derive(Debug, Clone, Serialize)]
pub struct LemmaRow {
    pub file: String,
    pub name: String,
    pub line: usize,
    pub modifiers: Vec<String>,
    pub attributes: Vec<String>,
    pub status: LemmaStatus,
}

impl LemmaRow {
    pub fn new(path: &Path, lines: &LineIndex, decl: &Declaration) -> Self {
        LemmaRow {
            file: path.display().to_string(),
            name: decl.name.clone(),
            line: lines.line_of(decl.declaration_start),
            modifiers: decl.modifiers.iter().map(ToString::to_string).collect(),
            attributes: decl.attributes.clone(),
            status: decl.status(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct ListSummary {
    total: usize,
    proof: usize,
    axiom: usize,
    no_body: usize,
    unterminated: usize,
}

fn summarize(rows: &[LemmaRow]) -> ListSummary {
    let mut summary = ListSummary {
        total: rows.len(),
        ..ListSummary::default()
    };
    for row in rows {
        match row.status {
            LemmaStatus::Proof => summary.proof += 1,
            LemmaStatus::Axiom => summary.axiom += 1,
            LemmaStatus::NoBody => summary.no_body += 1,
            LemmaStatus::Unterminated => summary.unterminated += 1,
        }
    }
    summary
}

/// Format a lemma listing
pub fn format_lemma_list(rows: &[LemmaRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_list_human(rows),
        OutputFormat::Json => format_list_json(rows),
        OutputFormat::Markdown => format_list_markdown(rows),
    }
}

fn format_list_human(rows: &[LemmaRow]) -> String {
    let mut output = String::new();

    for row in rows {
        let mut header = row.modifiers.join(" ");
        if !header.is_empty() {
            header.push(' ');
        }
        header.push_str(&row.name);
        output.push_str(&format!("{}:{}  {}  [{}]\n", row.file, row.line, header, row.status));
    }

    let summary = summarize(rows);
    output.push_str(&format!(
        "\n{} lemma(s): {} proof; {} axiom; {} no-body; {} unterminated\n",
        summary.total, summary.proof, summary.axiom, summary.no_body, summary.unterminated
    ));
    output
}

fn format_list_json(rows: &[LemmaRow]) -> String {
    let output = json!({
        "summary": summarize(rows),
        "lemmas": rows,
    });
    let mut text = serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string());
    text.push('\n');
    text
}

fn format_list_markdown(rows: &[LemmaRow]) -> String {
    let mut md = String::new();

    md.push_str("# Lemma Inventory\n\n");

    let summary = summarize(rows);
    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total Lemmas:** {}\n", summary.total));
    md.push_str(&format!("- **With Proof:** {}\n", summary.proof));
    md.push_str(&format!("- **Axioms:** {}\n", summary.axiom));
    md.push_str(&format!("- **No Body:** {}\n", summary.no_body));
    md.push_str(&format!("- **Unterminated:** {}\n\n", summary.unterminated));

    md.push_str("## Lemmas\n\n");
    md.push_str("| File | Line | Lemma | Modifiers | Status |\n");
    md.push_str("|------|------|-------|-----------|--------|\n");

    for row in rows {
        let file_name = Path::new(&row.file)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        let modifiers = if row.modifiers.is_empty() {
            "-".to_string()
        } else {
            row.modifiers.join(" ")
        };
        md.push_str(&format!(
            "| `{}` | {} | `{}` | {} | {} |\n",
            file_name, row.line, row.name, modifiers, row.status
        ));
    }

    md
}

/// Format extraction results; missing lemmas are omitted from text output
pub fn format_extractions(results: &[(String, Option<String>)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = results
                .iter()
                .map(|(name, text)| {
                    json!({
                        "name": name,
                        "found": text.is_some(),
                        "text": text,
                    })
                })
                .collect();
            let mut text = serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string());
            text.push('\n');
            text
        }
        _ => results
            .iter()
            .filter_map(|(_, text)| text.as_deref())
            .map(|text| format!("{}\n", text))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// One-line summary of an erasure, for stderr
pub fn format_erasure_summary(path: &Path, erasure: &Erasure) -> String {
    let mut line = format!(
        "{}: {} erased, {} already axiom, {} untouched",
        path.display(),
        erasure.erased.len(),
        erasure.already_axiom.len(),
        erasure.untouched.len()
    );
    if !erasure.untouched.is_empty() {
        line.push_str(&format!(" ({})", erasure.untouched.join(", ")));
    }
    line
}
