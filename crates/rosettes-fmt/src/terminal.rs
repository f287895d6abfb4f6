//! The ANSI terminal formatter.
//!
//! One SGR escape per token category, derived from the role table and
//! precomputed at construction so the per-token work is three pushes:
//! escape, text, reset. Whitespace passes through verbatim. Line numbers
//! are honored with a dim right-aligned prefix; highlighted lines render
//! their number inverted.

use std::fmt::Write as _;

use rosettes_core::{FormatConfig, HighlightConfig, Role, Token, TokenCategory};

use crate::formatter::Formatter;

const RESET: &str = "\x1b[0m";
const CATEGORY_COUNT: usize = TokenCategory::ALL.len();

/// SGR escape for one styling role. Empty means unstyled.
fn role_style(role: Role) -> &'static str {
    match role {
        Role::Keyword => "\x1b[35m",
        Role::KeywordType => "\x1b[36m",
        Role::Name => "",
        Role::Function => "\x1b[34m",
        Role::Class => "\x1b[1;34m",
        Role::Decorator => "\x1b[33m",
        Role::Builtin => "\x1b[36m",
        Role::Variable => "\x1b[31m",
        Role::Attribute => "\x1b[33m",
        Role::Tag => "\x1b[35m",
        Role::Namespace => "\x1b[1;35m",
        Role::String => "\x1b[32m",
        Role::Escape => "\x1b[1;32m",
        Role::Interpolation => "\x1b[1;33m",
        Role::Number => "\x1b[33m",
        Role::Boolean => "\x1b[33m",
        Role::Comment => "\x1b[90m",
        Role::Operator => "",
        Role::Punctuation => "",
        Role::Whitespace => "",
        Role::Text => "",
        Role::Error => "\x1b[1;31m",
    }
}

/// ANSI terminal formatter.
///
/// Construct via [`Terminal::new`]; the registry holds the shared
/// singleton.
pub struct Terminal {
    styles: [&'static str; CATEGORY_COUNT],
}

impl Terminal {
    /// Builds the per-category escape table from the role table.
    pub fn new() -> Self {
        let mut styles = [""; CATEGORY_COUNT];
        for category in TokenCategory::ALL {
            styles[category.index()] = role_style(category.role());
        }
        Self { styles }
    }

    fn write_styled(&self, category: TokenCategory, text: &str, out: &mut String) {
        if text.is_empty() {
            return;
        }
        let style = self.styles[category.index()];
        if category == TokenCategory::Whitespace || style.is_empty() {
            out.push_str(text);
            return;
        }
        out.push_str(style);
        out.push_str(text);
        out.push_str(RESET);
    }

    fn write_line_number(line: u32, highlighted: bool, out: &mut String) {
        let style = if highlighted { "\x1b[7m" } else { "\x1b[90m" };
        let _ = write!(out, "{style}{line:>4}{RESET} ");
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for Terminal {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ansi", "console"]
    }

    fn format<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = Token<'src>>,
        _format: &FormatConfig,
        highlight: &HighlightConfig,
        out: &mut String,
    ) {
        if highlight.is_plain() {
            for token in tokens {
                self.write_styled(token.category, token.text, out);
            }
            return;
        }

        let mut line = 1u32;
        let mut at_line_start = true;
        for token in tokens {
            let mut remaining = token.text;
            loop {
                if at_line_start && highlight.show_line_numbers {
                    Self::write_line_number(
                        line,
                        highlight.highlighted_lines.contains(&line),
                        out,
                    );
                }
                at_line_start = false;
                match remaining.find('\n') {
                    Some(idx) => {
                        self.write_styled(token.category, &remaining[..idx], out);
                        out.push('\n');
                        line += 1;
                        at_line_start = true;
                        remaining = &remaining[idx + 1..];
                        if remaining.is_empty() {
                            break;
                        }
                    }
                    None => {
                        self.write_styled(token.category, remaining, out);
                        break;
                    }
                }
            }
        }
    }

    fn format_fast<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = (TokenCategory, &'src str)>,
        _format: &FormatConfig,
        out: &mut String,
    ) {
        for (category, text) in tokens {
            self.write_styled(category, text, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosettes_lex::get_lexer;

    fn render(source: &str) -> String {
        let lexer = get_lexer("python").unwrap();
        Terminal::new().format_string_fast(
            &mut lexer.tokenize_fast(source),
            &FormatConfig::default(),
        )
    }

    #[test]
    fn test_keyword_is_styled_and_reset() {
        let out = render("def f(): pass");
        assert!(out.contains("\x1b[35mpass\x1b[0m"));
    }

    #[test]
    fn test_whitespace_unstyled() {
        let out = render("a b");
        assert!(out.contains("a b"));
    }

    #[test]
    fn test_stripped_output_equals_input() {
        let source = "def f(x):\n    return \"s\" + 1\n";
        let out = render(source);
        let mut stripped = String::new();
        let mut rest = out.as_str();
        while let Some(idx) = rest.find('\x1b') {
            stripped.push_str(&rest[..idx]);
            let after = &rest[idx..];
            let end = after.find('m').map(|m| m + 1).unwrap_or(after.len());
            rest = &after[end..];
        }
        stripped.push_str(rest);
        assert_eq!(stripped, source);
    }

    #[test]
    fn test_line_numbers_prefix_each_line() {
        let lexer = get_lexer("python").unwrap();
        let highlight = HighlightConfig {
            show_line_numbers: true,
            ..HighlightConfig::default()
        };
        let out = Terminal::new().format_string(
            &mut lexer.tokenize("a = 1\nb = 2"),
            &FormatConfig::default(),
            &highlight,
        );
        assert!(out.contains("\x1b[90m   1\x1b[0m "));
        assert!(out.contains("\x1b[90m   2\x1b[0m "));
    }

    #[test]
    fn test_highlighted_line_number_is_inverted() {
        let lexer = get_lexer("python").unwrap();
        let mut highlight = HighlightConfig {
            show_line_numbers: true,
            ..HighlightConfig::default()
        };
        highlight.highlighted_lines.insert(2);
        let out = Terminal::new().format_string(
            &mut lexer.tokenize("a\nb"),
            &FormatConfig::default(),
            &highlight,
        );
        assert!(out.contains("\x1b[7m   2\x1b[0m "));
    }
}
