//! Cross-language scanner invariant tests.
//!
//! Every shipped language must satisfy the same laws for any input:
//! round-trip reconstruction, non-empty tokens, exact 1-based position
//! accounting, totality and determinism. The checks here run each law over
//! every registered language, with both hand-picked adversarial fixtures
//! and property-tested arbitrary inputs.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rosettes_core::Token;

    use crate::registry::{get_lexer, list_languages};

    /// Asserts every universal scanner invariant over one tokenization.
    fn check_invariants(source: &str, language: &str) {
        let lexer = get_lexer(language).unwrap();
        let tokens: Vec<Token> = lexer.tokenize(source).collect();

        // Round-trip: token texts concatenate back to the input.
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, source, "round-trip failed for {language}");

        // Positions: walk the texts and require exact line/column accounting.
        let mut line = 1u32;
        let mut column = 1u32;
        for token in &tokens {
            assert!(!token.text.is_empty(), "empty token in {language}");
            assert!(token.line >= 1 && token.column >= 1);
            assert_eq!(
                (token.line, token.column),
                (line, column),
                "position drift at {:?} in {language}",
                token.text
            );
            for c in token.text.chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
        }

        // Determinism: a second pass over the same input emits the same stream.
        let again: Vec<Token> = lexer.tokenize(source).collect();
        assert_eq!(tokens, again, "nondeterministic stream for {language}");
    }

    const FIXTURES: &[&str] = &[
        "",
        "x",
        "hello world\n",
        "def hello(): pass",
        "a\nb\n\nc",
        "/* incomplete",
        "\"unterminated",
        "'''open\neverything else",
        "`tpl ${a + `inner ${b}`}`",
        "0x 0b 0o 0xFF 0b1 1..2 1.e 1e+ 1e+9",
        "\u{FEFF}bom\r\nmac\rmixed\nend",
        "f\"{x:{width}}\" r'\\' b\"bytes\"",
        "##### $ @ ??? \\",
        "emoji 🦀 αβγ ident_ΣΤΥ",
        "\"esc \\u{1F980} \\x41 \\q\"",
        "r###\"never closed",
        "{\"k\": [1, {\"n\": null}]}",
        "[t]\nx = { a = 1, b = [2, 3] }",
        "case $1 in *) echo \"${x:-d}\";; esac",
    ];

    #[test]
    fn test_fixtures_hold_for_every_language() {
        for language in list_languages() {
            for fixture in FIXTURES {
                check_invariants(fixture, language);
            }
        }
    }

    /// The classic regex-catastrophe shapes. Linear scanners chew through
    /// these without noticing; the point is that they terminate and stay
    /// exact, the benchmark suite measures the growth rate.
    #[test]
    fn test_redos_shapes_terminate() {
        let pathological = [
            format!("{}!", "a?".repeat(2_000)),
            "(".repeat(5_000),
            format!("\"{}", "\\\"".repeat(3_000)),
            format!("/*{}", "/*".repeat(3_000)),
            "`${`${`${`${x".to_string(),
        ];
        for language in list_languages() {
            for input in &pathological {
                check_invariants(input, language);
            }
        }
    }

    #[test]
    fn test_token_stream_is_lazy_per_pull() {
        // Consuming only a prefix must not scan eagerly past what was asked.
        let lexer = get_lexer("python").unwrap();
        let mut tokens = lexer.tokenize("a b c d e f");
        assert_eq!(tokens.next().unwrap().text, "a");
        assert_eq!(tokens.next().unwrap().text, " ");
        drop(tokens);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_arbitrary_input(source in "\\PC*") {
            for language in list_languages() {
                check_invariants(&source, language);
            }
        }

        #[test]
        fn prop_invariants_hold_for_code_like_input(
            source in "[ \\t\\n\"'`#{}()\\[\\]$\\\\a-z0-9_.:=+<>-]{0,200}"
        ) {
            for language in list_languages() {
                check_invariants(&source, language);
            }
        }

        #[test]
        fn prop_fast_stream_matches_slow_stream(source in "\\PC*") {
            for language in list_languages() {
                let lexer = get_lexer(language).unwrap();
                let slow: Vec<_> = lexer
                    .tokenize(&source)
                    .map(|t| (t.category, t.text))
                    .collect();
                let fast: Vec<_> = lexer.tokenize_fast(&source).collect();
                prop_assert_eq!(&slow, &fast);
            }
        }
    }
}
