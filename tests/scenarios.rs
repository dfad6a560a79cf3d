//! End-to-end extraction and erasure on representative specifications

use lemma_scan::parser::{code_brace_counts, find_matching_brace};
use lemma_scan::{erase_lemma_bodies, erase_with_report, extract_lemma, list_lemmas, LemmaStatus};

const SEQUENCES: &str = r#"include "util.dfy"

module Sequences {
  import opened Util

  function Sum(s: seq<int>): int
    decreases |s|
  {
    if |s| == 0 then 0 else s[0] + Sum(s[1..])
  }

  /* lemma Commented(x: int) { } */

  lemma {:induction false} SumAppend(a: seq<int>, b: seq<int>)
    ensures Sum(a + b) == Sum(a) + Sum(b)
    decreases |a|
  {
    if |a| == 0 {
      assert a + b == b;
    } else {
      // split { off the head
      assert (a + b)[1..] == a[1..] + b;
      SumAppend(a[1..], b);
    }
  }

  ghost lemma SmallSet(x: int)
    requires x in {1, 2, 3}
    ensures x in set y | 0 < y < 4 :: y
  {
  }

  lemma Label(s: string)
    ensures s == "{" ==> |s| == 1
  {
    if s == "{" { assert |s| == 1; }
  }

  lemma {:axiom} Trusted(m: map<int, int>)
    ensures forall k :: k in m ==> m[k] == m[k]
  {
  }

  lemma Abstract(n: nat)
    ensures n >= 0

  lemma {:extern} Foreign(x: int) returns (y: int);
}
"#;

#[test]
fn extracts_lemma_with_attribute_and_comment_brace() {
    let text = extract_lemma(SEQUENCES, "SumAppend").unwrap();
    assert!(text.starts_with("lemma {:induction false} SumAppend(a: seq<int>, b: seq<int>)"));
    assert!(text.ends_with("      SumAppend(a[1..], b);\n    }\n  }"));
    assert!(text.contains("// split { off the head"));
}

#[test]
fn extracts_lemma_with_set_comprehension_clauses() {
    assert_eq!(
        extract_lemma(SEQUENCES, "SmallSet").as_deref(),
        Some(
            "ghost lemma SmallSet(x: int)\n    requires x in {1, 2, 3}\n    ensures x in set y | 0 < y < 4 :: y\n  {\n  }"
        )
    );
}

#[test]
fn extracts_lemma_with_brace_in_string_clause() {
    let text = extract_lemma(SEQUENCES, "Label").unwrap();
    assert!(text.ends_with("if s == \"{\" { assert |s| == 1; }\n  }"));
}

#[test]
fn missing_commented_and_bodiless_names_are_none() {
    assert_eq!(extract_lemma(SEQUENCES, "Commented"), None);
    assert_eq!(extract_lemma(SEQUENCES, "Abstract"), None);
    assert_eq!(extract_lemma(SEQUENCES, "Foreign"), None);
    assert_eq!(extract_lemma(SEQUENCES, "Sum"), None);
    assert_eq!(extract_lemma(SEQUENCES, "Nope"), None);
}

#[test]
fn every_extraction_is_a_balanced_substring() {
    for decl in list_lemmas(SEQUENCES) {
        if let Some(text) = extract_lemma(SEQUENCES, &decl.name) {
            assert!(SEQUENCES.contains(&text), "{} not contained", decl.name);
            let (open, close) = code_brace_counts(&text);
            assert_eq!(open, close, "{} unbalanced", decl.name);
        }
    }
}

#[test]
fn inventory_reports_statuses() {
    let statuses: Vec<_> = list_lemmas(SEQUENCES)
        .into_iter()
        .map(|d| (d.name.clone(), d.status()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("SumAppend".to_string(), LemmaStatus::Proof),
            ("SmallSet".to_string(), LemmaStatus::Proof),
            ("Label".to_string(), LemmaStatus::Proof),
            ("Trusted".to_string(), LemmaStatus::Axiom),
            ("Abstract".to_string(), LemmaStatus::NoBody),
            ("Foreign".to_string(), LemmaStatus::NoBody),
        ]
    );
}

#[test]
fn erasure_rewrites_only_lemma_bodies() {
    let erasure = erase_with_report(SEQUENCES);
    assert_eq!(erasure.erased, vec!["SumAppend", "SmallSet", "Label"]);
    assert_eq!(erasure.already_axiom, vec!["Trusted"]);
    assert_eq!(erasure.untouched, vec!["Abstract", "Foreign"]);

    let out = &erasure.output;
    assert!(out.contains(
        "  lemma {:axiom} {:induction false} SumAppend(a: seq<int>, b: seq<int>)\n    ensures Sum(a + b) == Sum(a) + Sum(b)\n    decreases |a|\n  {\n  }\n"
    ));
    assert!(out.contains("  ghost lemma {:axiom} SmallSet(x: int)\n    requires x in {1, 2, 3}\n"));
    assert!(out.contains("    ensures s == \"{\" ==> |s| == 1\n  {\n  }\n"));
    assert!(!out.contains("split { off"));

    // Untouched regions survive byte-for-byte
    for kept in [
        "include \"util.dfy\"\n\nmodule Sequences {\n  import opened Util\n",
        "  function Sum(s: seq<int>): int\n    decreases |s|\n  {\n    if |s| == 0 then 0 else s[0] + Sum(s[1..])\n  }\n",
        "  /* lemma Commented(x: int) { } */\n",
        "  lemma {:axiom} Trusted(m: map<int, int>)\n    ensures forall k :: k in m ==> m[k] == m[k]\n  {\n  }\n",
        "  lemma Abstract(n: nat)\n    ensures n >= 0\n\n  lemma {:extern} Foreign(x: int) returns (y: int);\n}\n",
    ] {
        assert!(out.contains(kept), "lost: {:?}", kept);
    }
}

#[test]
fn erasure_is_idempotent() {
    let once = erase_lemma_bodies(SEQUENCES);
    assert_eq!(erase_lemma_bodies(&once), once);
}

#[test]
fn scenario_single_line_lemma() {
    let src = "lemma Foo(x: int) requires x > 0 ensures x > 0 { assert true; }";
    assert_eq!(extract_lemma(src, "Foo").as_deref(), Some(src));
    assert_eq!(
        erase_lemma_bodies(src),
        "lemma {:axiom} Foo(x: int) requires x > 0 ensures x > 0 {\n}"
    );
}

#[test]
fn scenario_comprehension_then_line_initial_body() {
    let src = "lemma Foo(x: int)\n  ensures forall x :: x in {1,2,3} ==> P(x)\n{\n  proof\n}";
    assert_eq!(extract_lemma(src, "Foo").as_deref(), Some(src));
    assert_eq!(
        erase_lemma_bodies(src),
        "lemma {:axiom} Foo(x: int)\n  ensures forall x :: x in {1,2,3} ==> P(x)\n{\n}"
    );
}

#[test]
fn scenario_existing_axiom_is_byte_identical() {
    let src = "lemma {:axiom} Bar(x: int)\n  requires x > 0\n  ensures x >= 0\n{\n}\n";
    assert_eq!(erase_lemma_bodies(src), src);
}

#[test]
fn scenario_extern_without_body() {
    let src = "lemma {:extern} Baz(x: int) returns (y: int);";
    assert_eq!(extract_lemma(src, "Baz"), None);
    assert_eq!(erase_lemma_bodies(src), src);
}

#[test]
fn scenario_comment_brace_inside_body() {
    let src = "lemma Qux()\n{\n  // this { is not real\n  assert true;\n}\nlemma After() { }";
    let open = src.find("\n{").unwrap() + 1;
    assert_eq!(find_matching_brace(src, open), Some(src.find("}\nlemma After").unwrap()));
    assert_eq!(
        extract_lemma(src, "Qux").as_deref(),
        Some("lemma Qux()\n{\n  // this { is not real\n  assert true;\n}")
    );
}

#[test]
fn unbalanced_string_brace_in_ensures() {
    let src = "lemma S(s: string)\n  ensures s == \"{\"\n{\n  assume s == \"{\";\n}\n";
    assert_eq!(
        erase_lemma_bodies(src),
        "lemma {:axiom} S(s: string)\n  ensures s == \"{\"\n{\n}\n"
    );
}

#[test]
fn scans_are_independent_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| erase_lemma_bodies(SEQUENCES)))
        .collect();
    let expected = erase_lemma_bodies(SEQUENCES);
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
