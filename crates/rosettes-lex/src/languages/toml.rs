//! TOML scanner.
//!
//! Position within a line decides classification: bare words left of `=`
//! are keys, words inside `[...]` headers are table names, and everything
//! right of `=` is a value. Both flags reset at each line break.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{is_ident_start, NumberRules, Scanner, WordTable};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (C::Boolean, &["true", "false"]),
        (C::NumberFloat, &["inf", "nan"]),
    ])
});

fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Lexer for TOML documents.
pub struct Toml;

impl Lexer for Toml {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(TomlMachine {
            in_value: false,
            in_header: false,
        })
    }
}

struct TomlMachine {
    /// Right of `=` on the current line.
    in_value: bool,
    /// Inside a `[table]` / `[[array-of-tables]]` header.
    in_header: bool,
}

impl Machine for TomlMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        let c = sc.peek();
        if c == '\n' || c == '\r' {
            self.in_value = false;
            self.in_header = false;
        }
        if sc.whitespace() {
            return;
        }

        match c {
            '#' => sc.line_comment(C::CommentSingle),
            '=' if !self.in_value => {
                self.in_value = true;
                sc.single(C::Operator);
            }
            '[' => {
                if !self.in_value {
                    self.in_header = true;
                }
                sc.single(C::Punctuation);
            }
            ']' => {
                self.in_header = false;
                sc.single(C::Punctuation);
            }
            '"' => {
                if sc.starts_with("\"\"\"") {
                    sc.multiline_string("\"\"\"", "\"\"\"", C::StringTriple, true);
                } else {
                    let category = if self.in_value || self.in_header {
                        C::StringDouble
                    } else {
                        C::NameAttribute
                    };
                    sc.single_line_string('"', category, true);
                }
            }
            '\'' => {
                if sc.starts_with("'''") {
                    sc.multiline_string("'''", "'''", C::StringTriple, false);
                } else {
                    let category = if self.in_value || self.in_header {
                        C::StringSingle
                    } else {
                        C::NameAttribute
                    };
                    sc.single_line_string('\'', category, false);
                }
            }
            c if c.is_ascii_digit() => sc.number(&NumberRules::default()),
            c if is_ident_start(c) => {
                let text = sc.ident(is_bare_key_char);
                let category = if self.in_header {
                    C::NameNamespace
                } else if !self.in_value {
                    C::NameAttribute
                } else {
                    WORDS.classify(text).unwrap_or(C::Name)
                };
                sc.emit(category);
            }
            '{' | '}' | ',' | '.' | '(' | ')' => sc.single(C::Punctuation),
            '+' | '-' => sc.single(C::Operator),
            '=' => sc.single(C::Operator),
            ':' => sc.single(C::Punctuation),
            _ => sc.error_char(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<(C, String)> {
        Toml.tokenize(src)
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    fn join(src: &str) -> String {
        Toml.tokenize(src).map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn test_key_value() {
        let tokens = lex("name = \"rosettes\"");
        assert_eq!(tokens[0], (C::NameAttribute, "name".into()));
        assert!(tokens.contains(&(C::Operator, "=".into())));
        assert!(tokens.contains(&(C::StringDouble, "rosettes".into())));
    }

    #[test]
    fn test_table_header() {
        let tokens = lex("[workspace.package]");
        assert!(tokens.contains(&(C::NameNamespace, "workspace".into())));
        assert!(tokens.contains(&(C::NameNamespace, "package".into())));
    }

    #[test]
    fn test_value_context_resets_per_line() {
        let tokens = lex("a = 1\nb = 2");
        let keys: Vec<_> = tokens
            .iter()
            .filter(|(c, _)| *c == C::NameAttribute)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_booleans_and_numbers() {
        let tokens = lex("on = true\nport = 0x1F\nratio = 2.5");
        assert!(tokens.contains(&(C::Boolean, "true".into())));
        assert!(tokens.contains(&(C::NumberHex, "0x1F".into())));
        assert!(tokens.contains(&(C::NumberFloat, "2.5".into())));
    }

    #[test]
    fn test_array_values_are_not_keys() {
        let tokens = lex("xs = [\"a\", \"b\"]");
        assert!(tokens.contains(&(C::StringDouble, "a".into())));
        assert!(!tokens.contains(&(C::NameAttribute, "a".into())));
    }

    #[test]
    fn test_multiline_basic_string() {
        let tokens = lex("s = \"\"\"two\nlines\"\"\"");
        assert!(tokens.contains(&(C::StringTriple, "two\nlines".into())));
    }

    #[test]
    fn test_round_trip() {
        let src = "# config\n[server]\nhost = \"0.0.0.0\" # all\nports = [80, 443]\n";
        assert_eq!(join(src), src);
    }
}
