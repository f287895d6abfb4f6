//! POSIX shell scanner.
//!
//! Single-quoted strings span lines with no escapes; double-quoted strings
//! span lines and interpolate `$name` / `${name}` expansions, which the
//! machine tracks with one pushed state. Parameter expansion outside
//! quotes uses the same `dollar` sub-scanner.

use std::sync::LazyLock;

use rosettes_core::TokenCategory as C;

use crate::lexer::{Lexer, Machine};
use crate::scanner::{is_ident_continue, is_ident_start, NumberRules, Scanner, WordTable};

static WORDS: LazyLock<WordTable> = LazyLock::new(|| {
    WordTable::new(&[
        (
            C::Keyword,
            &[
                "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done",
                "case", "esac", "in", "function", "select", "time",
            ],
        ),
        (
            C::NameBuiltin,
            &[
                "echo", "cd", "pwd", "export", "source", "alias", "unset", "readonly", "local",
                "return", "exit", "set", "shift", "trap", "eval", "exec", "test", "printf",
                "read", "wait", "true", "false",
            ],
        ),
    ])
});

const OPERATORS: &[&str] = &[
    "&&", "||", ">>", "<<", ";;", "|", ">", "<", ";", "&", "=", "!", "*", "~",
];

/// Lexer for POSIX-flavored shell scripts.
pub struct Shell;

impl Lexer for Shell {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["bash", "sh", "zsh"]
    }

    fn machine(&self) -> Box<dyn Machine> {
        Box::new(ShellMachine { in_double_quote: false })
    }
}

struct ShellMachine {
    in_double_quote: bool,
}

impl Machine for ShellMachine {
    fn step(&mut self, sc: &mut Scanner<'_>) {
        if self.in_double_quote {
            self.double_quote_body(sc);
        } else {
            self.plain_token(sc);
        }
    }
}

impl ShellMachine {
    fn plain_token(&mut self, sc: &mut Scanner<'_>) {
        if sc.whitespace() {
            return;
        }
        let c = sc.peek();
        match c {
            '#' => sc.line_comment(C::CommentSingle),
            '\'' => sc.multiline_string("'", "'", C::StringSingle, false),
            '"' => {
                sc.mark();
                sc.bump();
                sc.emit(C::StringDouble);
                self.in_double_quote = true;
            }
            '$' => dollar(sc),
            '\\' => sc.escape_seq(),
            c if is_ident_start(c) => {
                let text = sc.ident(is_ident_continue);
                let category = WORDS.classify(text).unwrap_or(C::Name);
                sc.emit(category);
            }
            c if c.is_ascii_digit() => sc.number(&NumberRules::DECIMAL),
            _ => {
                if sc.operator(OPERATORS) {
                    return;
                }
                match c {
                    '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | '.' | '-' | '+' | '/'
                    | '%' | '?' | '@' => sc.single(C::Punctuation),
                    '`' => sc.single(C::StringInterpol),
                    _ => sc.error_char(),
                }
            }
        }
    }

    fn double_quote_body(&mut self, sc: &mut Scanner<'_>) {
        sc.mark();
        loop {
            if sc.at_end() {
                sc.emit(C::StringDouble);
                self.in_double_quote = false;
                return;
            }
            let c = sc.peek();
            if c == '"' {
                sc.emit(C::StringDouble);
                sc.bump();
                sc.emit(C::StringDouble);
                self.in_double_quote = false;
                return;
            }
            if c == '\\' {
                sc.emit(C::StringDouble);
                sc.escape_seq();
                continue;
            }
            if c == '$' {
                sc.emit(C::StringDouble);
                dollar(sc);
                return;
            }
            sc.bump();
        }
    }
}

/// Scans one `$`-expansion: `$name`, positional/special parameters,
/// `${name}` and the `$(` opener of a command substitution.
fn dollar(sc: &mut Scanner<'_>) {
    if sc.starts_with("${") {
        sc.mark();
        sc.bump_n(2);
        sc.emit(C::StringInterpol);
        if is_ident_start(sc.peek()) {
            sc.ident(is_ident_continue);
            sc.emit(C::NameVariable);
        }
        if sc.peek() == '}' {
            sc.mark();
            sc.bump();
            sc.emit(C::StringInterpol);
        }
        return;
    }
    let next = sc.peek_second();
    if is_ident_start(next) {
        sc.mark();
        sc.bump();
        sc.bump_while(is_ident_continue);
        sc.emit(C::NameVariable);
        return;
    }
    if next.is_ascii_digit() || matches!(next, '?' | '@' | '#' | '*' | '$' | '!' | '-') {
        sc.mark();
        sc.bump();
        sc.bump();
        sc.emit(C::NameVariable);
        return;
    }
    if next == '(' {
        sc.mark();
        sc.bump_n(2);
        sc.emit(C::StringInterpol);
        return;
    }
    sc.single(C::Text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<(C, String)> {
        Shell
            .tokenize(src)
            .map(|t| (t.category, t.text.to_string()))
            .collect()
    }

    fn join(src: &str) -> String {
        Shell.tokenize(src).map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn test_variable_expansion() {
        let tokens = lex("echo $HOME");
        assert_eq!(tokens[0], (C::NameBuiltin, "echo".into()));
        assert_eq!(tokens[2], (C::NameVariable, "$HOME".into()));
    }

    #[test]
    fn test_braced_expansion() {
        let tokens = lex("${PATH}");
        assert_eq!(
            tokens,
            vec![
                (C::StringInterpol, "${".into()),
                (C::NameVariable, "PATH".into()),
                (C::StringInterpol, "}".into()),
            ]
        );
    }

    #[test]
    fn test_expansion_inside_double_quotes() {
        let tokens = lex("\"pre $x post\"");
        assert_eq!(
            tokens,
            vec![
                (C::StringDouble, "\"".into()),
                (C::StringDouble, "pre ".into()),
                (C::NameVariable, "$x".into()),
                (C::StringDouble, " post".into()),
                (C::StringDouble, "\"".into()),
            ]
        );
    }

    #[test]
    fn test_special_parameters() {
        let tokens = lex("status=$?");
        assert!(tokens.contains(&(C::NameVariable, "$?".into())));
    }

    #[test]
    fn test_single_quotes_are_literal() {
        let tokens = lex("'no $x here'");
        assert_eq!(
            tokens,
            vec![
                (C::StringSingle, "'".into()),
                (C::StringSingle, "no $x here".into()),
                (C::StringSingle, "'".into()),
            ]
        );
    }

    #[test]
    fn test_comment() {
        let tokens = lex("ls # list\n");
        assert!(tokens.contains(&(C::CommentSingle, "# list".into())));
    }

    #[test]
    fn test_round_trip() {
        let src = "#!/bin/sh\nfor f in *.rs; do\n  echo \"f=${f}\" >> log\ndone\n";
        assert_eq!(join(src), src);
    }
}
