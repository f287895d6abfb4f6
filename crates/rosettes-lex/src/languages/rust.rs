//! Rust scanner.
//!
//! Handles doc and nested block comments, raw strings with arbitrary hash
//! fences, byte strings, char literals vs. lifetimes, attributes, macro
//! invocation names, and the contextual classification after `fn`,
//! `struct`, `enum`, `trait`, `union`, `type` and `mod`.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{is_ident_continue, is_ident_start, NumberRules, Scanner, WordTable};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (
            C::KeywordDeclaration,
            &["fn", "let", "const", "static", "struct", "enum", "trait", "impl", "type", "union"],
        ),
        (C::KeywordNamespace, &["mod", "use", "crate", "extern"]),
        (
            C::Keyword,
            &[
                "as", "async", "await", "break", "continue", "dyn", "else", "for", "if", "in",
                "loop", "match", "move", "mut", "pub", "ref", "return", "super", "unsafe",
                "where", "while", "yield",
            ],
        ),
        (
            C::KeywordReserved,
            &[
                "abstract", "become", "box", "do", "final", "override", "priv", "typeof",
                "unsized", "virtual", "try",
            ],
        ),
        (
            C::KeywordType,
            &[
                "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
                "usize", "f32", "f64", "bool", "char", "str", "Self",
            ],
        ),
        (C::Boolean, &["true", "false"]),
        (
            C::NameBuiltin,
            &[
                "self", "Some", "None", "Ok", "Err", "Vec", "String", "Box", "Option", "Result",
                "drop",
            ],
        ),
    ])
});

const OPERATORS: &[&str] = &[
    "<<=", ">>=", "...", "..=", "::", "->", "=>", "==", "!=", "<=", ">=", "&&", "||", "<<", ">>",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "..", "+", "-", "*", "/", "%", "^", "!", "&",
    "|", "<", ">", "=", "?", "@",
];

/// Lexer for Rust source.
pub struct Rust;

impl Lexer for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(RustMachine { expect: None })
    }
}

struct RustMachine {
    expect: Option<C>,
}

impl Machine for RustMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        if sc.whitespace() {
            return;
        }
        let c = sc.peek();

        if c == '/' {
            match sc.peek_second() {
                '/' => {
                    let category = if sc.starts_with("///") || sc.starts_with("//!") {
                        C::CommentDoc
                    } else {
                        C::CommentSingle
                    };
                    sc.line_comment(category);
                }
                '*' => {
                    let category = if sc.starts_with("/**") || sc.starts_with("/*!") {
                        C::CommentDoc
                    } else {
                        C::CommentMultiline
                    };
                    sc.block_comment("/*", "*/", true, category);
                }
                _ => {
                    if !sc.operator(OPERATORS) {
                        sc.error_char();
                    }
                }
            }
            self.expect = None;
            return;
        }

        if is_ident_start(c) {
            let text = sc.ident(is_ident_continue);
            let next = sc.peek();
            if (text == "r" || text == "br") && (next == '"' || next == '#') {
                self.raw_string(sc);
                self.expect = None;
                return;
            }
            if text == "b" && next == '"' {
                sc.emit(C::StringDouble);
                sc.multiline_string("\"", "\"", C::StringDouble, true);
                self.expect = None;
                return;
            }
            let category = if let Some(expected) = self.expect.take() {
                expected
            } else if let Some(keyword) = WORDS.classify(text) {
                match text {
                    "fn" => self.expect = Some(C::NameFunction),
                    "struct" | "enum" | "trait" | "union" | "type" => {
                        self.expect = Some(C::NameClass)
                    }
                    "mod" => self.expect = Some(C::NameNamespace),
                    _ => {}
                }
                keyword
            } else if sc.peek() == '!' {
                C::NameFunction // macro invocation
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

        if c == '"' {
            sc.multiline_string("\"", "\"", C::StringDouble, true);
            self.expect = None;
            return;
        }

        if c == '\'' {
            // Lifetime unless a closing quote follows the first character.
            if is_ident_start(sc.peek_second()) && sc.peek_at(2) != '\'' {
                sc.mark();
                sc.bump();
                sc.bump_while(is_ident_continue);
                sc.emit(C::NameVariable);
            } else {
                sc.single_line_string('\'', C::StringSingle, true);
            }
            self.expect = None;
            return;
        }

        if c == '#' {
            sc.mark();
            sc.bump();
            sc.eat('!');
            sc.emit(C::NameDecorator);
            self.expect = None;
            return;
        }

        if sc.operator(OPERATORS) {
            self.expect = None;
            return;
        }

        match c {
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';' | ':' | '.' | '$' => {
                sc.single(C::Punctuation)
            }
            _ => sc.error_char(),
        }
        self.expect = None;
    }
}

impl RustMachine {
    /// Scans a raw (or raw byte) string. The `r` / `br` prefix has been
    /// consumed and is still pending.
    fn raw_string(&mut self, sc: &mut Scanner<'_>) {
        sc.emit(C::StringRaw); // prefix
        sc.mark();
        let mut fence = 0usize;
        while sc.peek() == '#' {
            sc.bump();
            fence += 1;
        }
        if sc.peek() != '"' {
            // `r#ident` raw identifier, or stray hashes
            if fence == 1 && is_ident_start(sc.peek()) {
                sc.bump();
                sc.bump_while(is_ident_continue);
                sc.emit(C::Name);
            } else {
                sc.emit(C::Error);
            }
            return;
        }
        sc.bump();
        sc.emit(C::StringRaw); // hashes + opening quote

        loop {
            if sc.at_end() {
                sc.emit(C::StringRaw);
                return;
            }
            if sc.peek() == '"' {
                sc.emit(C::StringRaw); // content run so far
                sc.bump();
                let mut got = 0usize;
                while got < fence && sc.peek() == '#' {
                    sc.bump();
                    got += 1;
                }
                if got == fence {
                    sc.emit(C::StringRaw); // closing quote + hashes
                    return;
                }
                // Not enough hashes: the quote run stays pending as content.
            } else {
                sc.bump();
            }
        }
    }
}
