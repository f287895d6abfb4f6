//! C scanner.
//!
//! Classic C89/C99 surface: `//` and `/* */` comments (not nested),
//! single-line strings and char literals, hex literals, and preprocessor
//! directives scanned as a namespace keyword followed by ordinary tokens.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{is_ident_continue, is_ident_start, NumberRules, Scanner, WordTable};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (
            C::KeywordType,
            &[
                "int", "char", "float", "double", "void", "long", "short", "signed", "unsigned",
                "size_t", "ssize_t", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t",
                "uint16_t", "uint32_t", "uint64_t", "intptr_t", "uintptr_t", "ptrdiff_t",
                "wchar_t", "_Bool",
            ],
        ),
        (C::KeywordDeclaration, &["struct", "union", "enum", "typedef"]),
        (
            C::Keyword,
            &[
                "if", "else", "for", "while", "do", "switch", "case", "default", "return",
                "break", "continue", "goto", "sizeof", "static", "extern", "const", "volatile",
                "inline", "register", "restrict", "auto",
            ],
        ),
        (C::KeywordConstant, &["NULL"]),
        (C::Boolean, &["true", "false"]),
    ])
});

const OPERATORS: &[&str] = &[
    "<<=", ">>=", "->", "++", "--", "==", "!=", "<=", ">=", "&&", "||", "<<", ">>", "+=", "-=",
    "*=", "/=", "%=", "&=", "|=", "^=", "+", "-", "*", "/", "%", "&", "|", "^", "~", "<", ">",
    "=", "!", "?",
];

/// Lexer for C source.
pub struct CLang;

impl Lexer for CLang {
    fn name(&self) -> &'static str {
        "c"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["h"]
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(CMachine { expect: None })
    }
}

struct CMachine {
    expect: Option<C>,
}

impl Machine for CMachine {
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

        if c == '#' && is_ident_start(sc.peek_second()) {
            // #include, #define, #ifdef, ...
            sc.mark();
            sc.bump();
            sc.bump_while(is_ident_continue);
            sc.emit(C::KeywordNamespace);
            self.expect = None;
            return;
        }

        if is_ident_start(c) {
            let text = sc.ident(is_ident_continue);
            let category = if let Some(expected) = self.expect.take() {
                expected
            } else if let Some(keyword) = WORDS.classify(text) {
                if matches!(text, "struct" | "union" | "enum") {
                    self.expect = Some(C::NameClass);
                }
                keyword
            } else {
                C::Name
            };
            sc.emit(category);
            return;
        }

        if c.is_ascii_digit() {
            sc.number(&NumberRules {
                octal: false,
                underscores: false,
                ..NumberRules::default()
            });
            self.expect = None;
            return;
        }

        if c == '"' {
            sc.single_line_string('"', C::StringDouble, true);
            self.expect = None;
            return;
        }

        if c == '\'' {
            sc.single_line_string('\'', C::StringSingle, true);
            self.expect = None;
            return;
        }

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
        self.expect = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<(C, String)> {
        CLang
            .tokenize(src)
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    fn join(src: &str) -> String {
        CLang.tokenize(src).map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = lex("/* incomplete");
        assert_eq!(tokens, vec![(C::CommentMultiline, "/* incomplete".into())]);
    }

    #[test]
    fn test_preprocessor_directive() {
        let tokens = lex("#include <stdio.h>");
        assert_eq!(tokens[0], (C::KeywordNamespace, "#include".into()));
        assert_eq!(join("#include <stdio.h>"), "#include <stdio.h>");
    }

    #[test]
    fn test_struct_tag() {
        let tokens = lex("struct point p;");
        assert_eq!(tokens[0], (C::KeywordDeclaration, "struct".into()));
        assert_eq!(tokens[2], (C::NameClass, "point".into()));
        assert_eq!(tokens[4], (C::Name, "p".into()));
    }

    #[test]
    fn test_types_and_hex() {
        let tokens = lex("uint32_t mask = 0xFF00;");
        assert_eq!(tokens[0], (C::KeywordType, "uint32_t".into()));
        assert!(tokens.contains(&(C::NumberHex, "0xFF00".into())));
    }

    #[test]
    fn test_char_literal() {
        let tokens = lex("c = '\\n';");
        assert!(tokens.contains(&(C::StringEscape, "\\n".into())));
    }

    #[test]
    fn test_arrow_operator() {
        let tokens = lex("p->next");
        assert!(tokens.contains(&(C::Operator, "->".into())));
    }

    #[test]
    fn test_round_trip() {
        let src = "int main(void) {\n    printf(\"%d\\n\", 42);\n    return 0;\n}\n";
        assert_eq!(join(src), src);
    }
}
