//! Go scanner.
//!
//! Interpreted strings are single-line with escapes; backtick raw strings
//! span lines with no escape processing. `func`, `type` and `package`
//! drive contextual name classification.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{
    is_unicode_ident_continue, is_unicode_ident_start, NumberRules, Scanner, WordTable,
};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (
            C::KeywordDeclaration,
            &["func", "var", "const", "type", "struct", "interface", "map", "chan"],
        ),
        (C::KeywordNamespace, &["package", "import"]),
        (
            C::Keyword,
            &[
                "if", "else", "for", "range", "switch", "case", "default", "return", "break",
                "continue", "goto", "defer", "go", "select", "fallthrough",
            ],
        ),
        (
            C::KeywordType,
            &[
                "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
                "uint64", "uintptr", "float32", "float64", "complex64", "complex128", "byte",
                "rune", "string", "bool", "error", "any",
            ],
        ),
        (C::KeywordConstant, &["nil", "iota"]),
        (C::Boolean, &["true", "false"]),
        (
            C::NameBuiltin,
            &[
                "make", "len", "cap", "new", "append", "copy", "delete", "panic", "recover",
                "print", "println", "close", "complex", "real", "imag", "min", "max", "clear",
            ],
        ),
    ])
});

const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", ":=", "<-", "++", "--", "==", "!=", "<=", ">=", "&&", "||", "<<",
    ">>", "&^", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "+", "-", "*", "/", "%", "&",
    "|", "^", "<", ">", "=", "!",
];

/// Lexer for Go source.
pub struct Go;

impl Lexer for Go {
    fn name(&self) -> &'static str {
        "go"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["golang"]
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(GoMachine { expect: None })
    }
}

struct GoMachine {
    expect: Option<C>,
}

impl Machine for GoMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        if sc.whitespace() {
            return;
        }
        let c = sc.peek();

        if c == '/' {
            match sc.peek_second() {
                '/' => {
                    sc.line_comment(C::CommentSingle);
                    self.expect = None;
                    return;
                }
                '*' => {
                    sc.block_comment("/*", "*/", false, C::CommentMultiline);
                    self.expect = None;
                    return;
                }
                _ => {}
            }
        }

        if is_unicode_ident_start(c) {
            let text = sc.ident(is_unicode_ident_continue);
            let category = if let Some(expected) = self.expect.take() {
                expected
            } else if let Some(keyword) = WORDS.classify(text) {
                match text {
                    "func" => self.expect = Some(C::NameFunction),
                    "type" => self.expect = Some(C::NameClass),
                    "package" => self.expect = Some(C::NameNamespace),
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

        match c {
            '"' => sc.single_line_string('"', C::StringDouble, true),
            '\'' => sc.single_line_string('\'', C::StringSingle, true),
            '`' => sc.multiline_string("`", "`", C::StringRaw, false),
            _ => {
                if sc.operator(OPERATORS) {
                    self.expect = None;
                    return;
                }
                match c {
                    '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';' | ':' | '.' => {
                        sc.single(C::Punctuation)
                    }
                    _ => sc.error_char(),
                }
            }
        }
        self.expect = None;
    }
}
