//! JSON scanner.
//!
//! The only context JSON needs is whether the next string is an object key:
//! a small container stack plus an expect-key flag distinguishes keys
//! (`NameAttribute`) from string values. Everything else is literal
//! punctuation-and-values scanning. Invalid input still tokenizes — bare
//! words fall back to `Name` and stray characters to `Error`.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{is_ident_continue, is_ident_start, NumberRules, Scanner, WordTable};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (C::Boolean, &["true", "false"]),
        (C::KeywordConstant, &["null"]),
    ])
});

/// Lexer for JSON documents.
pub struct Json;

impl Lexer for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(JsonMachine {
            stack: Vec::new(),
            expect_key: false,
        })
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Container {
    Object,
    Array,
}

struct JsonMachine {
    stack: Vec<Container>,
    expect_key: bool,
}

impl Machine for JsonMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        if sc.whitespace() {
            return;
        }
        let c = sc.peek();
        match c {
            '{' => {
                self.stack.push(Container::Object);
                self.expect_key = true;
                sc.single(C::Punctuation);
            }
            '}' => {
                self.stack.pop();
                self.expect_key = false;
                sc.single(C::Punctuation);
            }
            '[' => {
                self.stack.push(Container::Array);
                self.expect_key = false;
                sc.single(C::Punctuation);
            }
            ']' => {
                self.stack.pop();
                self.expect_key = false;
                sc.single(C::Punctuation);
            }
            ':' => {
                self.expect_key = false;
                sc.single(C::Punctuation);
            }
            ',' => {
                self.expect_key = self.stack.last() == Some(&Container::Object);
                sc.single(C::Punctuation);
            }
            '"' => {
                let category = if self.expect_key {
                    C::NameAttribute
                } else {
                    C::StringDouble
                };
                sc.single_line_string('"', category, true);
            }
            '-' => sc.single(C::Operator),
            c if c.is_ascii_digit() => sc.number(&NumberRules::DECIMAL),
            c if is_ident_start(c) => {
                let text = sc.ident(is_ident_continue);
                let category = WORDS.classify(text).unwrap_or(C::Name);
                sc.emit(category);
            }
            _ => sc.error_char(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<(C, String)> {
        Json.tokenize(src)
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    fn join(src: &str) -> String {
        Json.tokenize(src).map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn test_keys_vs_values() {
        let tokens = lex(r#"{"name": "ada"}"#);
        assert!(tokens.contains(&(C::NameAttribute, "name".into())));
        assert!(tokens.contains(&(C::StringDouble, "ada".into())));
    }

    #[test]
    fn test_second_key_after_comma() {
        let tokens = lex(r#"{"a": 1, "b": 2}"#);
        assert!(tokens.contains(&(C::NameAttribute, "b".into())));
    }

    #[test]
    fn test_strings_in_arrays_are_values() {
        let tokens = lex(r#"{"xs": ["k"]}"#);
        assert!(tokens.contains(&(C::StringDouble, "k".into())));
    }

    #[test]
    fn test_literals() {
        let tokens = lex(r#"[true, false, null, -3.5e2]"#);
        assert!(tokens.contains(&(C::Boolean, "true".into())));
        assert!(tokens.contains(&(C::KeywordConstant, "null".into())));
        assert!(tokens.contains(&(C::Operator, "-".into())));
        assert!(tokens.contains(&(C::NumberFloat, "3.5e2".into())));
    }

    #[test]
    fn test_nested_object_restores_key_context() {
        let src = r#"{"a": {"b": 1}, "c": 2}"#;
        let tokens = lex(src);
        let keys: Vec<_> = tokens
            .iter()
            .filter(|(c, _)| *c == C::NameAttribute)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(keys, vec!["\"", "a", "\"", "\"", "b", "\"", "\"", "c", "\""]);
        assert_eq!(join(src), src);
    }

    #[test]
    fn test_round_trip_with_escapes() {
        let src = r#"{"path": "C:\\tmp\u00e9"}"#;
        assert_eq!(join(src), src);
    }
}
