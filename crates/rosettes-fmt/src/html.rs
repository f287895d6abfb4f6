//! The HTML formatter.
//!
//! Output shape:
//!
//! ```text
//! <div class="rosettes" data-language="python"><pre><code>
//!   <span class="syntax-keyword">def</span> ...
//! </code></pre></div>
//! ```
//!
//! The class on each token span comes from the long-tag table under the
//! semantic class style and from the short-tag table under the
//! compatibility style; whitespace (and any category with an empty tag)
//! is emitted without a wrapping span. Every token text passes through
//! [`escape_html`], so the output embeds into a document as-is.
//!
//! The line-aware path wraps each rendered line in a span, optionally
//! prefixed with a line number, splitting multi-line token texts at `\n`
//! for rendering only — the tokens themselves are not touched.

use std::fmt::Write as _;

use rosettes_core::{ClassStyle, FormatConfig, HighlightConfig, Token, TokenCategory};

use crate::escape::escape_html;
use crate::formatter::Formatter;

/// HTML formatter singleton.
pub struct Html;

fn class_tag(category: TokenCategory, style: ClassStyle) -> &'static str {
    match style {
        ClassStyle::Semantic => category.long_tag(),
        ClassStyle::Compat => category.short_tag(),
    }
}

fn open_container(format: &FormatConfig, out: &mut String) {
    out.push_str("<div class=\"");
    escape_html(format.container_class(), out);
    out.push_str("\" data-language=\"");
    escape_html(&format.data_language, out);
    out.push_str("\"><pre><code>");
}

fn close_container(out: &mut String) {
    out.push_str("</code></pre></div>");
}

fn write_piece(category: TokenCategory, text: &str, style: ClassStyle, out: &mut String) {
    if text.is_empty() {
        return;
    }
    let tag = class_tag(category, style);
    if category == TokenCategory::Whitespace || tag.is_empty() {
        escape_html(text, out);
        return;
    }
    out.push_str("<span class=\"");
    out.push_str(tag);
    out.push_str("\">");
    escape_html(text, out);
    out.push_str("</span>");
}

fn open_line(line: u32, highlight: &HighlightConfig, out: &mut String) {
    out.push_str("<span class=\"");
    out.push_str(&highlight.line_class);
    if highlight.highlighted_lines.contains(&line) {
        out.push(' ');
        out.push_str(&highlight.highlighted_line_class);
    }
    out.push_str("\">");
    if highlight.show_line_numbers {
        out.push_str("<span class=\"");
        out.push_str(&highlight.line_number_class);
        out.push_str("\">");
        let _ = write!(out, "{line}");
        out.push_str("</span>");
    }
}

impl Formatter for Html {
    fn name(&self) -> &'static str {
        "html"
    }

    fn format<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = Token<'src>>,
        format: &FormatConfig,
        highlight: &HighlightConfig,
        out: &mut String,
    ) {
        if highlight.is_plain() {
            // No line features requested: render exactly like the fast
            // path so the two are byte-identical.
            open_container(format, out);
            for token in tokens {
                write_piece(token.category, token.text, format.class_style, out);
            }
            close_container(out);
            return;
        }

        open_container(format, out);
        let mut line = 1u32;
        let mut line_open = false;
        for token in tokens {
            let mut remaining = token.text;
            loop {
                match remaining.find('\n') {
                    Some(idx) => {
                        if !line_open {
                            open_line(line, highlight, out);
                        }
                        write_piece(token.category, &remaining[..idx], format.class_style, out);
                        out.push_str("</span>");
                        out.push('\n');
                        line += 1;
                        line_open = false;
                        remaining = &remaining[idx + 1..];
                    }
                    None => {
                        if !remaining.is_empty() {
                            if !line_open {
                                open_line(line, highlight, out);
                                line_open = true;
                            }
                            write_piece(token.category, remaining, format.class_style, out);
                        }
                        break;
                    }
                }
            }
        }
        if line_open {
            out.push_str("</span>");
        }
        close_container(out);
    }

    fn format_fast<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = (TokenCategory, &'src str)>,
        format: &FormatConfig,
        out: &mut String,
    ) {
        open_container(format, out);
        for (category, text) in tokens {
            write_piece(category, text, format.class_style, out);
        }
        close_container(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosettes_lex::get_lexer;

    fn config(style: ClassStyle) -> FormatConfig {
        FormatConfig {
            container_class: None,
            data_language: "python".into(),
            class_style: style,
        }
    }

    fn render(source: &str, style: ClassStyle) -> String {
        let lexer = get_lexer("python").unwrap();
        Html.format_string_fast(&mut lexer.tokenize_fast(source), &config(style))
    }

    #[test]
    fn test_semantic_container_and_classes() {
        let out = render("def f(): pass", ClassStyle::Semantic);
        assert!(out.starts_with("<div class=\"rosettes\" data-language=\"python\"><pre><code>"));
        assert!(out.ends_with("</code></pre></div>"));
        assert!(out.contains("<span class=\"syntax-keyword-declaration\">def</span>"));
        assert!(out.contains("<span class=\"syntax-function\">f</span>"));
    }

    #[test]
    fn test_compat_container_and_classes() {
        let out = render("def f(): pass", ClassStyle::Compat);
        assert!(out.starts_with("<div class=\"highlight\" data-language=\"python\">"));
        assert!(out.contains("<span class=\"kd\">def</span>"));
        assert!(out.contains("<span class=\"nf\">f</span>"));
    }

    #[test]
    fn test_whitespace_has_no_span() {
        let out = render("a b", ClassStyle::Semantic);
        assert!(out.contains("</span> <span"));
    }

    #[test]
    fn test_token_text_is_escaped() {
        let out = render("x = \"<&>\"", ClassStyle::Semantic);
        assert!(out.contains("&lt;&amp;&gt;"));
        assert!(!out.contains("\"<&>\""));
    }

    #[test]
    fn test_container_class_override() {
        let format = FormatConfig {
            container_class: Some("chroma".into()),
            data_language: "python".into(),
            class_style: ClassStyle::Semantic,
        };
        let lexer = get_lexer("python").unwrap();
        let out = Html.format_string_fast(&mut lexer.tokenize_fast("x"), &format);
        assert!(out.starts_with("<div class=\"chroma\""));
    }

    #[test]
    fn test_line_aware_wraps_lines() {
        let lexer = get_lexer("python").unwrap();
        let highlight = HighlightConfig {
            show_line_numbers: true,
            ..HighlightConfig::default()
        };
        let out = Html.format_string(
            &mut lexer.tokenize("a = 1\nb = 2"),
            &config(ClassStyle::Semantic),
            &highlight,
        );
        assert!(out.contains("<span class=\"line\"><span class=\"line-number\">1</span>"));
        assert!(out.contains("<span class=\"line-number\">2</span>"));
    }

    #[test]
    fn test_highlighted_line_gets_extra_class() {
        let lexer = get_lexer("python").unwrap();
        let mut highlight = HighlightConfig::default();
        highlight.highlighted_lines.insert(2);
        let out = Html.format_string(
            &mut lexer.tokenize("a = 1\nb = 2\nc = 3"),
            &config(ClassStyle::Semantic),
            &highlight,
        );
        assert!(out.contains("<span class=\"line highlighted\">"));
        assert_eq!(out.matches("class=\"line highlighted\"").count(), 1);
    }

    #[test]
    fn test_multiline_token_splits_across_line_spans() {
        let lexer = get_lexer("python").unwrap();
        let mut highlight = HighlightConfig::default();
        highlight.highlighted_lines.insert(1);
        let out = Html.format_string(
            &mut lexer.tokenize("s = '''a\nb'''"),
            &config(ClassStyle::Semantic),
            &highlight,
        );
        // Both halves of the triple-quoted string are wrapped, one per line.
        assert_eq!(out.matches("<span class=\"syntax-string-triple\">").count(), 4);
    }

    #[test]
    fn test_plain_slow_path_matches_fast_path() {
        let lexer = get_lexer("python").unwrap();
        let source = "def f(x):\n    return x + 1\n";
        let fast =
            Html.format_string_fast(&mut lexer.tokenize_fast(source), &config(ClassStyle::Semantic));
        let slow = Html.format_string(
            &mut lexer.tokenize(source),
            &config(ClassStyle::Semantic),
            &HighlightConfig::default(),
        );
        assert_eq!(fast, slow);
    }
}
