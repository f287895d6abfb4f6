//! The plaintext fallback scanner.

use rosettes_core::TokenCategory;

use crate::lexer::{Lexer, Machine};
use crate::scanner::Scanner;

/// Lexer for unhighlighted text.
///
/// Emits one `Text` token per line and one `Whitespace` token per line
/// break. Interior spacing stays inside the `Text` token; there is nothing
/// to classify.
pub struct Plaintext;

impl Lexer for Plaintext {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["text", "txt", "plain"]
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(PlaintextMachine)
    }
}

struct PlaintextMachine;

impl Machine for PlaintextMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        match sc.peek() {
            '\n' => sc.single(TokenCategory::Whitespace),
            '\r' => {
                sc.mark();
                sc.bump();
                sc.eat('\n');
                sc.emit(TokenCategory::Whitespace);
            }
            _ => {
                sc.mark();
                sc.bump_while(|c| c != '\n' && c != '\r');
                sc.emit(TokenCategory::Text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosettes_core::TokenCategory as C;

    fn lex(src: &str) -> Vec<(C, String)> {
        Plaintext
            .tokenize(src)
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    #[test]
    fn test_one_text_token_per_line() {
        assert_eq!(
            lex("one two\nthree"),
            vec![
                (C::Text, "one two".into()),
                (C::Whitespace, "\n".into()),
                (C::Text, "three".into()),
            ]
        );
    }

    #[test]
    fn test_blank_lines_emit_only_newlines() {
        assert_eq!(
            lex("a\n\nb"),
            vec![
                (C::Text, "a".into()),
                (C::Whitespace, "\n".into()),
                (C::Whitespace, "\n".into()),
                (C::Text, "b".into()),
            ]
        );
    }

    #[test]
    fn test_line_positions() {
        let tokens: Vec<_> = Plaintext.tokenize("a\nb\n\nc").collect();
        let positions: Vec<_> = tokens
            .iter()
            .filter(|t| t.category == C::Text)
            .map(|t| (t.line, t.column))
            .collect();
        assert_eq!(positions, vec![(1, 1), (2, 1), (4, 1)]);
    }

    #[test]
    fn test_round_trip_crlf() {
        let src = "a\r\nb\r\n";
        let joined: String = Plaintext.tokenize(src).map(|t| t.text.to_string()).collect();
        assert_eq!(joined, src);
    }
}
