//! JavaScript scanner.
//!
//! Template literals are the interesting part: `` `...${expr}...` `` nests
//! arbitrarily, so the machine keeps an explicit state stack — a template
//! body pushes an expression state at `${`, the expression state pushes a
//! fresh template body at a nested backtick. Regular-expression literals
//! are not recognized; a `/` outside a comment is an operator.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{is_ident_continue, is_ident_start, NumberRules, Scanner, WordTable};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (
            C::KeywordDeclaration,
            &["var", "let", "const", "function", "class"],
        ),
        (C::KeywordNamespace, &["import", "export", "from"]),
        (
            C::Keyword,
            &[
                "if", "else", "for", "while", "do", "switch", "case", "default", "return",
                "break", "continue", "new", "delete", "typeof", "instanceof", "in", "of", "try",
                "catch", "finally", "throw", "yield", "async", "await", "static", "get", "set",
                "extends", "super", "void", "debugger", "with",
            ],
        ),
        (C::KeywordConstant, &["null", "undefined", "NaN", "Infinity"]),
        (C::Boolean, &["true", "false"]),
        (
            C::NameBuiltin,
            &[
                "this", "console", "Math", "JSON", "Object", "Array", "String", "Number",
                "Boolean", "Promise", "Symbol", "Map", "Set", "Date", "RegExp", "Error",
                "document", "window", "globalThis", "parseInt", "parseFloat", "isNaN",
            ],
        ),
    ])
});

const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "...", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "**", "++", "--", "<<", ">>", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "+", "-", "*", "/", "%", "&", "|", "^", "~", "<", ">", "=",
    "!", "?",
];

/// Lexer for JavaScript source.
pub struct Javascript;

impl Lexer for Javascript {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["js", "node"]
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(JsMachine {
            stack: Vec::new(),
            expect: None,
        })
    }
}

#[derive(Clone, Copy)]
enum JsState {
    /// Inside a template literal body.
    Template,
    /// Inside a `${...}` substitution; `depth` counts inner braces.
    TemplateExpr { depth: u32 },
}

struct JsMachine {
    stack: Vec<JsState>,
    expect: Option<C>,
}

impl Machine for JsMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        match self.stack.last().copied() {
            Some(JsState::Template) => self.template_body(sc),
            Some(JsState::TemplateExpr { .. }) => self.template_expr(sc),
            None => self.plain_token(sc),
        }
    }
}

impl JsMachine {
    fn plain_token(&mut self, sc: &mut Scanner<'_>) {
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

        if is_ident_start(c) || c == '$' {
            let text = sc.ident(js_ident_continue);
            let category = if let Some(expected) = self.expect.take() {
                expected
            } else if let Some(keyword) = WORDS.classify(text) {
                match text {
                    "function" => self.expect = Some(C::NameFunction),
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
            let category = if c == '"' { C::StringDouble } else { C::StringSingle };
            sc.single_line_string(c, category, true);
            self.expect = None;
            return;
        }

        if c == '`' {
            sc.mark();
            sc.bump();
            sc.emit(C::StringInterpolated);
            self.stack.push(JsState::Template);
            self.expect = None;
            return;
        }

        if c == '@' && is_ident_start(sc.peek_second()) {
            sc.mark();
            sc.bump();
            sc.bump_while(js_ident_continue);
            sc.emit(C::NameDecorator);
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

    fn template_body(&mut self, sc: &mut Scanner<'_>) {
        sc.mark();
        loop {
            if sc.at_end() {
                sc.emit(C::StringInterpolated);
                self.stack.pop();
                return;
            }
            let c = sc.peek();
            if c == '`' {
                sc.emit(C::StringInterpolated);
                sc.bump();
                sc.emit(C::StringInterpolated);
                self.stack.pop();
                return;
            }
            if sc.starts_with("${") {
                sc.emit(C::StringInterpolated);
                sc.bump_n(2);
                sc.emit(C::StringInterpol);
                self.stack.push(JsState::TemplateExpr { depth: 0 });
                return;
            }
            if c == '\\' {
                sc.emit(C::StringInterpolated);
                sc.escape_seq();
                continue;
            }
            sc.bump();
        }
    }

    fn template_expr(&mut self, sc: &mut Scanner<'_>) {
        if sc.whitespace() {
            return;
        }
        match sc.peek() {
            '{' => {
                if let Some(JsState::TemplateExpr { depth }) = self.stack.last_mut() {
                    *depth += 1;
                }
                sc.single(C::Punctuation);
            }
            '}' => {
                let depth = match self.stack.last() {
                    Some(JsState::TemplateExpr { depth }) => *depth,
                    _ => 0,
                };
                if depth == 0 {
                    sc.mark();
                    sc.bump();
                    sc.emit(C::StringInterpol);
                    self.stack.pop();
                } else {
                    if let Some(JsState::TemplateExpr { depth }) = self.stack.last_mut() {
                        *depth -= 1;
                    }
                    sc.single(C::Punctuation);
                }
            }
            _ => self.plain_token(sc),
        }
    }
}

fn js_ident_continue(c: char) -> bool {
    is_ident_continue(c) || c == '$'
}
