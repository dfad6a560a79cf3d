//! Lemma extraction
//!
//! Returns the verbatim text of named lemmas for downstream consumers.

use crate::parser::{scan_declarations, Declaration, DeclarationScanner};

/// Extract the full text of lemma `name`: modifiers, header, clauses and body.
///
/// Returns `None` when no lemma of that name has a resolvable body. When the
/// same name is declared more than once (an abstract signature refined later),
/// the first declaration with a body wins.
pub fn extract_lemma(source: &str, name: &str) -> Option<String> {
    DeclarationScanner::new(source)
        .filter(|decl| decl.name == name)
        .find_map(|decl| {
            let text = decl.text(source);
            if text.is_none() {
                log::trace!("lemma {} has no body ({:?}), continuing", name, decl.body);
            }
            text.map(str::to_string)
        })
}

/// Extract several lemmas from one scan of `source`, in the order requested.
pub fn extract_lemmas<S: AsRef<str>>(source: &str, names: &[S]) -> Vec<(String, Option<String>)> {
    let declarations = scan_declarations(source);
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let text = declarations
                .iter()
                .filter(|decl| decl.name == name)
                .find_map(|decl| decl.text(source))
                .map(str::to_string);
            (name.to_string(), text)
        })
        .collect()
}

/// Inventory of every lemma declaration in `source`, bodied or not.
pub fn list_lemmas(source: &str) -> Vec<Declaration> {
    scan_declarations(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LemmaStatus;

    #[test]
    fn test_extract_single_line() {
        let src = "lemma Foo(x: int) requires x > 0 ensures x > 0 { assert true; }";
        assert_eq!(extract_lemma(src, "Foo").as_deref(), Some(src));
    }

    #[test]
    fn test_extract_with_modifiers_and_surroundings() {
        let src = "include \"a.dfy\"\n\n  ghost lemma {:induction false} Bar(n: nat)\n    ensures n >= 0\n  {\n  }\n\nfunction F(): int { 1 }\n";
        assert_eq!(
            extract_lemma(src, "Bar").as_deref(),
            Some("ghost lemma {:induction false} Bar(n: nat)\n    ensures n >= 0\n  {\n  }")
        );
    }

    #[test]
    fn test_exact_name_match() {
        let src = "lemma FooBar() { }\nlemma Foo() { assert 1 == 1; }";
        assert_eq!(extract_lemma(src, "Foo").as_deref(), Some("lemma Foo() { assert 1 == 1; }"));
        assert_eq!(extract_lemma(src, "Fo"), None);
    }

    #[test]
    fn test_name_only_in_comment() {
        let src = "// lemma Ghost() { }\nlemma Real() { }";
        assert_eq!(extract_lemma(src, "Ghost"), None);
    }

    #[test]
    fn test_no_body_returns_none() {
        let src = "lemma {:extern} Baz(x: int) returns (y: int);";
        assert_eq!(extract_lemma(src, "Baz"), None);
    }

    #[test]
    fn test_refined_declaration_with_body() {
        let src = "abstract module A {\n  lemma L()\n    ensures true\n}\nmodule B refines A {\n  lemma L()\n  {\n  }\n}";
        assert_eq!(extract_lemma(src, "L").as_deref(), Some("lemma L()\n  {\n  }"));
    }

    #[test]
    fn test_unterminated_returns_none() {
        assert_eq!(extract_lemma("lemma Cut()\n{\n  assert", "Cut"), None);
    }

    #[test]
    fn test_extract_lemmas_batch() {
        let src = "lemma A() { }\nlemma B();\n";
        let out = extract_lemmas(src, &["B", "A", "C"]);
        assert_eq!(
            out,
            vec![
                ("B".to_string(), None),
                ("A".to_string(), Some("lemma A() { }".to_string())),
                ("C".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_list_lemmas_statuses() {
        let src = "lemma {:axiom} A() {\n}\nlemma B();\nlemma C() { }";
        let statuses: Vec<_> = list_lemmas(src).iter().map(|d| d.status()).collect();
        assert_eq!(statuses, vec![LemmaStatus::Axiom, LemmaStatus::NoBody, LemmaStatus::Proof]);
    }
}
