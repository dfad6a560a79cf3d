//! Lexical primitives
//!
//! Classifies scan positions as code, comment or literal and skips past the
//! non-code constructs. Every scanner in the crate routes each position through
//! [`classify_and_skip`] before interpreting the byte there, so braces inside
//! comments and strings never reach a depth counter.
//!
//! Offsets are byte offsets into the source. All syntax the scanner reacts to is
//! ASCII, so every offset returned here lands on a UTF-8 char boundary.

/// Classification of a scan position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalState {
    /// Ordinary program text
    Code,
    /// `// ...` up to (not including) the newline
    LineComment,
    /// `/* ... */`, nesting like Dafny's
    BlockComment,
    /// `"..."` with `\` escapes
    StringLiteral,
    /// `'c'` or `'\c'`
    CharLiteral,
}

/// Bytes that may continue an identifier (Dafny allows primes and `?`)
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'\'' || b == b'?'
}

/// Bytes that may start an identifier or keyword
pub fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// End of the identifier starting at `start`
pub fn word_end(src: &str, start: usize) -> usize {
    let bytes = src.as_bytes();
    let mut end = start;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    end
}

/// Report which construct begins at `i`.
pub fn classify(src: &str, i: usize) -> LexicalState {
    let bytes = src.as_bytes();
    match bytes.get(i) {
        Some(b'/') => match bytes.get(i + 1) {
            Some(b'/') => LexicalState::LineComment,
            Some(b'*') => LexicalState::BlockComment,
            _ => LexicalState::Code,
        },
        Some(b'"') => LexicalState::StringLiteral,
        Some(b'\'') if char_literal_end(bytes, i).is_some() => LexicalState::CharLiteral,
        _ => LexicalState::Code,
    }
}

/// Skip the comment or literal beginning at `i`.
///
/// Returns the index immediately past the construct, or `None` when `i` starts
/// ordinary code and the caller should advance by one byte. Unterminated block
/// comments and strings run to the end of input.
pub fn classify_and_skip(src: &str, i: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    match classify(src, i) {
        LexicalState::Code => None,
        LexicalState::LineComment => Some(
            bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |offset| i + offset),
        ),
        LexicalState::BlockComment => Some(block_comment_end(bytes, i)),
        LexicalState::StringLiteral => Some(string_end(bytes, i)),
        LexicalState::CharLiteral => char_literal_end(bytes, i),
    }
}

fn block_comment_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut j = start;
    while j + 1 < bytes.len() {
        match (bytes[j], bytes[j + 1]) {
            (b'/', b'*') => {
                depth += 1;
                j += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                j += 2;
                if depth == 0 {
                    return j;
                }
            }
            _ => j += 1,
        }
    }
    bytes.len()
}

fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// `'c'` or `'\c'`, only when the quote is not the prime of an identifier
fn char_literal_end(bytes: &[u8], start: usize) -> Option<usize> {
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return None;
    }
    match bytes.get(start + 1..) {
        Some([b'\\', _, b'\'', ..]) => Some(start + 4),
        Some([c, b'\'', ..]) if *c != b'\'' && *c != b'\n' && c.is_ascii() => Some(start + 3),
        _ => None,
    }
}

/// Report the lexical state enclosing `pos` by scanning forward from the start.
///
/// The opening delimiter of a comment or literal counts as inside it.
pub fn state_at(src: &str, pos: usize) -> LexicalState {
    let mut i = 0;
    while i <= pos && i < src.len() {
        match classify_and_skip(src, i) {
            Some(next) if next > pos => return classify(src, i),
            Some(next) => i = next,
            None => i += 1,
        }
    }
    LexicalState::Code
}

/// Copy of `src` with every comment and literal blanked to spaces.
///
/// Newlines are kept and the byte length is unchanged, so offsets in the view
/// address the same text in the original.
pub fn code_view(src: &str) -> String {
    let mut out = src.as_bytes().to_vec();
    let mut i = 0;
    while i < out.len() {
        match classify_and_skip(src, i) {
            Some(next) => {
                for b in &mut out[i..next] {
                    if *b != b'\n' {
                        *b = b' ';
                    }
                }
                i = next;
            }
            None => i += 1,
        }
    }
    // Blanked spans start and end on ASCII delimiters, so no multi-byte
    // sequence is ever split.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Offset of the first byte on the line containing `i`
pub fn line_start(src: &str, i: usize) -> usize {
    src.as_bytes()[..i]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1)
}

/// Leading spaces and tabs of the line containing `i`
pub fn line_indent(src: &str, i: usize) -> &str {
    let start = line_start(src, i);
    let len = src.as_bytes()[start..]
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    &src[start..start + len]
}

/// 1-based line number of offset `i`
pub fn line_number(src: &str, i: usize) -> usize {
    src.as_bytes()[..i].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Precomputed line starts for repeated offset-to-line lookups
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            src.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(pos, _)| pos + 1),
        );
        LineIndex { line_starts }
    }

    /// 1-based line number of offset `i`
    pub fn line_of(&self, i: usize) -> usize {
        match self.line_starts.binary_search(&i) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_constructs() {
        let src = r#"x // c /* b */ "s" '{'"#;
        assert_eq!(classify(src, 0), LexicalState::Code);
        assert_eq!(classify(src, 2), LexicalState::LineComment);
        assert_eq!(classify(src, 7), LexicalState::BlockComment);
        assert_eq!(classify(src, 15), LexicalState::StringLiteral);
        assert_eq!(classify(src, 19), LexicalState::CharLiteral);
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        let src = "// one {\nnext";
        assert_eq!(classify_and_skip(src, 0), Some(8));
        assert_eq!(&src[8..9], "\n");
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let src = "x // trailing";
        assert_eq!(classify_and_skip(src, 2), Some(src.len()));
    }

    #[test]
    fn test_block_comments_nest() {
        let src = "/* a /* b */ c */ d";
        assert_eq!(classify_and_skip(src, 0), Some(17));
    }

    #[test]
    fn test_unterminated_block_comment_consumes_rest() {
        let src = "/* never closed {";
        assert_eq!(classify_and_skip(src, 0), Some(src.len()));
    }

    #[test]
    fn test_string_escapes() {
        let src = r#""a \" { b" rest"#;
        assert_eq!(classify_and_skip(src, 0), Some(10));
        assert_eq!(&src[10..], " rest");
    }

    #[test]
    fn test_unterminated_string_consumes_rest() {
        let src = r#""open { \"#;
        assert_eq!(classify_and_skip(src, 0), Some(src.len()));
    }

    #[test]
    fn test_prime_is_not_char_literal() {
        let src = "x' == y'";
        assert_eq!(classify(src, 1), LexicalState::Code);
        assert_eq!(classify_and_skip(src, 1), None);
    }

    #[test]
    fn test_escaped_char_literal() {
        let src = r"c == '\'' {";
        assert_eq!(classify_and_skip(src, 5), Some(9));
    }

    #[test]
    fn test_code_returns_none() {
        assert_eq!(classify_and_skip("a / b", 2), None);
        assert_eq!(classify_and_skip("{", 0), None);
    }

    #[test]
    fn test_state_at() {
        let src = "a /* { */ b \"}\" c";
        assert_eq!(state_at(src, 0), LexicalState::Code);
        assert_eq!(state_at(src, 5), LexicalState::BlockComment);
        assert_eq!(state_at(src, 10), LexicalState::Code);
        assert_eq!(state_at(src, 13), LexicalState::StringLiteral);
        assert_eq!(state_at(src, 16), LexicalState::Code);
    }

    #[test]
    fn test_code_view_keeps_offsets() {
        let src = "lemma A() // lemma B\n/* lemma C\n*/ { \"lemma D\" }";
        let view = code_view(src);
        assert_eq!(view.len(), src.len());
        assert!(view.starts_with("lemma A()"));
        assert!(!view.contains("lemma B"));
        assert!(!view.contains("lemma C"));
        assert!(!view.contains("lemma D"));
        assert_eq!(view.matches('\n').count(), src.matches('\n').count());
        assert_eq!(view.find('{'), src.rfind('{'));
    }

    #[test]
    fn test_code_view_multibyte_comment() {
        let src = "a // ∀ x ∈ S\nb";
        let view = code_view(src);
        assert_eq!(view.len(), src.len());
        assert!(view.ends_with("\nb"));
    }

    #[test]
    fn test_line_helpers() {
        let src = "module M {\n    lemma L()\n    {\n    }\n}";
        let brace = src.find("    {").map(|p| p + 4).unwrap();
        assert_eq!(line_indent(src, brace), "    ");
        assert_eq!(line_number(src, brace), 3);
        assert_eq!(line_start(src, 0), 0);
    }

    #[test]
    fn test_line_index_matches_line_number() {
        let src = "a\n\nlemma L()\n{\n}\n";
        let index = LineIndex::new(src);
        assert_eq!(index.line_count(), 6);
        for i in 0..=src.len() {
            assert_eq!(index.line_of(i), line_number(src, i), "offset {}", i);
        }
    }

    #[test]
    fn test_word_end() {
        let src = "Foo'_2? bar";
        assert_eq!(word_end(src, 0), 7);
        assert!(is_word_start(b'_'));
        assert!(!is_word_start(b'1'));
    }
}
