//! Python scanner.
//!
//! Covers the Python 3 surface that matters for highlighting: the full
//! keyword set, string prefixes (`r`, `b`, `f`, `u` and combinations),
//! single- and triple-quoted strings, f-string interpolation with nested
//! expressions, decorators, and the contextual classification of names
//! after `def` / `class`.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{
    is_unicode_ident_continue, is_unicode_ident_start, NumberRules, Scanner, WordTable,
};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (C::KeywordDeclaration, &["def", "class", "lambda"]),
        (C::KeywordNamespace, &["import", "from"]),
        (
            C::Keyword,
            &[
                "if", "elif", "else", "for", "while", "break", "continue", "return", "try",
                "except", "finally", "raise", "with", "as", "pass", "yield", "assert", "del",
                "global", "nonlocal", "async", "await", "match", "case",
            ],
        ),
        (C::OperatorWord, &["and", "or", "not", "in", "is"]),
        (C::KeywordConstant, &["None", "NotImplemented", "Ellipsis"]),
        (C::Boolean, &["True", "False"]),
        (
            C::NameBuiltin,
            &[
                "print", "len", "range", "str", "int", "float", "bool", "list", "dict", "set",
                "tuple", "open", "input", "type", "isinstance", "issubclass", "super", "self",
                "cls", "object", "bytes", "enumerate", "zip", "map", "filter", "sorted", "sum",
                "min", "max", "abs", "repr", "hash", "id", "iter", "next", "getattr", "setattr",
                "hasattr", "vars", "dir",
            ],
        ),
    ])
});

/// Longest-first operator table.
const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", ":=", "->", "**", "//", "<<", ">>", "<=", ">=", "==", "!=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=", "+", "-", "*", "/", "%", "@", "&", "|", "^",
    "~", "<", ">", "=", "!",
];

/// Valid string-prefix letters, at most two of them.
///
/// Returns `(raw, fstring)` when `text` is a prefix combination Python
/// accepts (`r`, `b`, `f`, `u`, `rb`, `fr`, ... in any case).
fn string_prefix(text: &str) -> Option<(bool, bool)> {
    if text.is_empty() || text.len() > 2 {
        return None;
    }
    let (mut raw, mut fstring, mut bytes, mut unicode) = (false, false, false, false);
    for c in text.chars() {
        match c.to_ascii_lowercase() {
            'r' if !raw => raw = true,
            'f' if !fstring => fstring = true,
            'b' if !bytes => bytes = true,
            'u' if !unicode && text.len() == 1 => unicode = true,
            _ => return None,
        }
    }
    if bytes && fstring {
        return None;
    }
    Some((raw, fstring))
}

/// Lexer for Python source.
pub struct Python;

impl Lexer for Python {
    fn name(&self) -> &'static str {
        "python"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["py", "python3"]
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(PythonMachine {
            stack: Vec::new(),
            expect: None,
        })
    }
}

#[derive(Clone, Copy)]
enum PyState {
    /// Inside an f-string body; `closer` is the quote run that ends it.
    FString { closer: &'static str, raw: bool },
    /// Inside a `{...}` interpolation; `depth` counts inner braces.
    FStringExpr { depth: u32 },
}

struct PythonMachine {
    stack: Vec<PyState>,
    /// Category for the next plain identifier (`def` / `class` context).
    expect: Option<C>,
}

impl Machine for PythonMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        match self.stack.last().copied() {
            Some(PyState::FString { closer, raw }) => self.fstring_body(sc, closer, raw),
            Some(PyState::FStringExpr { .. }) => self.fstring_expr(sc),
            None => self.plain_token(sc),
        }
    }
}

impl PythonMachine {
    /// Scans one token with the Initial-state rules. Also used inside
    /// f-string interpolations, which share the top-level grammar.
    fn plain_token(&mut self, sc: &mut Scanner<'_>) {
        if sc.whitespace() {
            return;
        }
        let c = sc.peek();

        if c == '#' {
            sc.line_comment(C::CommentSingle);
            self.expect = None;
            return;
        }

        if is_unicode_ident_start(c) {
            let text = sc.ident(is_unicode_ident_continue);
            let next = sc.peek();
            if (next == '"' || next == '\'') && string_prefix(text).is_some() {
                let (raw, fstring) = string_prefix(text).unwrap_or((false, false));
                self.string_start(sc, raw, fstring);
                self.expect = None;
                return;
            }
            let category = if let Some(expected) = self.expect.take() {
                expected
            } else if let Some(keyword) = WORDS.classify(text) {
                match text {
                    "def" => self.expect = Some(C::NameFunction),
                    "class" => self.expect = Some(C::NameClass),
                    _ => {}
                }
                keyword
            } else {
                C::Name
            };
            sc.emit(category);
            return;
        }

        if c.is_ascii_digit() {
            sc.number(&NumberRules::default());
            self.expect = None;
            return;
        }

        if c == '"' || c == '\'' {
            sc.mark();
            self.string_start(sc, false, false);
            self.expect = None;
            return;
        }

        if c == '@' && is_unicode_ident_start(sc.peek_second()) {
            sc.mark();
            sc.bump();
            sc.bump_while(|c| is_unicode_ident_continue(c) || c == '.');
            sc.emit(C::NameDecorator);
            self.expect = None;
            return;
        }

        if sc.operator(OPERATORS) {
            self.expect = None;
            return;
        }

        match c {
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | ';' | '.' => {
                sc.single(C::Punctuation)
            }
            '\\' => sc.single(C::Text), // line continuation
            _ => sc.error_char(),
        }
        self.expect = None;
    }

    /// Starts a string at the cursor's quote; any consumed prefix letters
    /// are still pending and get emitted with the string's category.
    fn string_start(&mut self, sc: &mut Scanner<'_>, raw: bool, fstring: bool) {
        let quote = sc.peek();
        let triple = (quote == '"' && sc.starts_with("\"\"\""))
            || (quote == '\'' && sc.starts_with("'''"));
        let category = if fstring {
            C::StringInterpolated
        } else if raw {
            C::StringRaw
        } else if triple {
            C::StringTriple
        } else if quote == '"' {
            C::StringDouble
        } else {
            C::StringSingle
        };
        sc.emit(category); // prefix letters, dropped when empty

        let delimiter: &'static str = match (quote, triple) {
            ('"', true) => "\"\"\"",
            ('\'', true) => "'''",
            ('"', false) => "\"",
            _ => "'",
        };

        if fstring {
            sc.mark();
            sc.bump_n(delimiter.len());
            sc.emit(category);
            self.stack.push(PyState::FString {
                closer: delimiter,
                raw,
            });
        } else if triple {
            sc.multiline_string(delimiter, delimiter, category, !raw);
        } else {
            sc.single_line_string(quote, category, !raw);
        }
    }

    fn fstring_body(&mut self, sc: &mut Scanner<'_>, closer: &'static str, raw: bool) {
        let single_line = closer.len() == 1;
        sc.mark();
        loop {
            if sc.at_end() {
                sc.emit(if single_line { C::Error } else { C::StringInterpolated });
                self.stack.pop();
                return;
            }
            let c = sc.peek();
            if single_line && (c == '\n' || (c == '\r' && sc.peek_second() == '\n')) {
                sc.emit(C::Error);
                self.stack.pop();
                return;
            }
            if sc.starts_with(closer) {
                sc.emit(C::StringInterpolated);
                sc.mark();
                sc.bump_n(closer.len());
                sc.emit(C::StringInterpolated);
                self.stack.pop();
                return;
            }
            if sc.starts_with("{{") || sc.starts_with("}}") {
                sc.emit(C::StringInterpolated);
                sc.mark();
                sc.bump_n(2);
                sc.emit(C::StringEscape);
                continue;
            }
            if c == '{' {
                sc.emit(C::StringInterpolated);
                sc.mark();
                sc.bump();
                sc.emit(C::StringInterpol);
                self.stack.push(PyState::FStringExpr { depth: 0 });
                return;
            }
            if !raw && c == '\\' {
                sc.emit(C::StringInterpolated);
                sc.escape_seq();
                continue;
            }
            sc.bump();
        }
    }

    fn fstring_expr(&mut self, sc: &mut Scanner<'_>) {
        if sc.whitespace() {
            return;
        }
        match sc.peek() {
            '{' => {
                if let Some(PyState::FStringExpr { depth }) = self.stack.last_mut() {
                    *depth += 1;
                }
                sc.single(C::Punctuation);
            }
            '}' => {
                let depth = match self.stack.last() {
                    Some(PyState::FStringExpr { depth }) => *depth,
                    _ => 0,
                };
                if depth == 0 {
                    sc.mark();
                    sc.bump();
                    sc.emit(C::StringInterpol);
                    self.stack.pop();
                } else {
                    if let Some(PyState::FStringExpr { depth }) = self.stack.last_mut() {
                        *depth -= 1;
                    }
                    sc.single(C::Punctuation);
                }
            }
            _ => self.plain_token(sc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<(C, String)> {
        Python
            .tokenize(src)
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    fn join(src: &str) -> String {
        Python.tokenize(src).map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn test_def_classifies_function_name() {
        let tokens = lex("def hello(): pass");
        assert_eq!(
            tokens,
            vec![
                (C::KeywordDeclaration, "def".into()),
                (C::Whitespace, " ".into()),
                (C::NameFunction, "hello".into()),
                (C::Punctuation, "(".into()),
                (C::Punctuation, ")".into()),
                (C::Punctuation, ":".into()),
                (C::Whitespace, " ".into()),
                (C::Keyword, "pass".into()),
            ]
        );
    }

    #[test]
    fn test_class_name() {
        let tokens = lex("class Foo:");
        assert_eq!(tokens[2], (C::NameClass, "Foo".into()));
    }

    #[test]
    fn test_booleans_and_none() {
        let tokens = lex("x = True or None");
        assert!(tokens.contains(&(C::Boolean, "True".into())));
        assert!(tokens.contains(&(C::OperatorWord, "or".into())));
        assert!(tokens.contains(&(C::KeywordConstant, "None".into())));
    }

    #[test]
    fn test_decorator() {
        let tokens = lex("@functools.wraps\ndef f(): ...");
        assert_eq!(tokens[0], (C::NameDecorator, "@functools.wraps".into()));
    }

    #[test]
    fn test_triple_quoted_string() {
        let tokens = lex("'''doc\nstring'''");
        assert_eq!(
            tokens,
            vec![
                (C::StringTriple, "'''".into()),
                (C::StringTriple, "doc\nstring".into()),
                (C::StringTriple, "'''".into()),
            ]
        );
    }

    #[test]
    fn test_fstring_interpolation() {
        let tokens = lex("f\"hi {name}!\"");
        assert_eq!(
            tokens,
            vec![
                (C::StringInterpolated, "f".into()),
                (C::StringInterpolated, "\"".into()),
                (C::StringInterpolated, "hi ".into()),
                (C::StringInterpol, "{".into()),
                (C::Name, "name".into()),
                (C::StringInterpol, "}".into()),
                (C::StringInterpolated, "!".into()),
                (C::StringInterpolated, "\"".into()),
            ]
        );
    }

    #[test]
    fn test_fstring_brace_escape() {
        let tokens = lex("f\"{{literal}}\"");
        assert!(tokens.contains(&(C::StringEscape, "{{".into())));
        assert!(tokens.contains(&(C::StringEscape, "}}".into())));
    }

    #[test]
    fn test_raw_string_keeps_backslashes() {
        let tokens = lex(r#"r"\d+""#);
        assert_eq!(
            tokens,
            vec![
                (C::StringRaw, "r".into()),
                (C::StringRaw, "\"".into()),
                (C::StringRaw, "\\d+".into()),
                (C::StringRaw, "\"".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_tail_is_error() {
        let tokens = lex("\"oops\nx");
        assert_eq!(tokens[0], (C::StringDouble, "\"".into()));
        assert_eq!(tokens[1], (C::Error, "oops".into()));
        assert_eq!(join("\"oops\nx"), "\"oops\nx");
    }

    #[test]
    fn test_walrus_and_arrow_operators() {
        let tokens = lex("def f() -> int: (n := 1)");
        assert!(tokens.contains(&(C::Operator, "->".into())));
        assert!(tokens.contains(&(C::Operator, ":=".into())));
    }

    #[test]
    fn test_round_trip_mixed_source() {
        let src = "import os\n\n@cache\ndef go(n=0x1F):\n    return f\"{n:>4}\" # done\n";
        assert_eq!(join(src), src);
    }

    #[test]
    fn test_unicode_identifier() {
        let tokens = lex("π = 3.14159");
        assert_eq!(tokens[0], (C::Name, "π".into()));
        assert!(tokens.contains(&(C::NumberFloat, "3.14159".into())));
    }
}
