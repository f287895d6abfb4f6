//! Single-input engine: resolve, tokenize, format.

use std::ops::Range;

use rosettes_core::{ClassStyle, FormatConfig, HighlightConfig, Result, Token};
use rosettes_fmt::get_formatter;
use rosettes_lex::get_lexer;
use rustc_hash::FxHashSet;

/// Options for [`highlight_with`].
///
/// Construct with struct-update syntax over [`Options::default`]; every
/// field has the documented default.
#[derive(Clone, Debug)]
pub struct Options<'a> {
    /// Formatter name or alias. Default `"html"`.
    pub formatter: &'a str,

    /// HTML class naming scheme. Default [`ClassStyle::Semantic`].
    pub class_style: ClassStyle,

    /// Container class override; `None` uses the class-style default.
    pub container_class: Option<&'a str>,

    /// 1-based lines to mark highlighted. Non-empty forces the line-aware
    /// path.
    pub highlighted_lines: FxHashSet<u32>,

    /// Prefix each line with its number. Forces the line-aware path.
    pub show_line_numbers: bool,

    /// Byte range of the input to highlight; `None` means all of it. Both
    /// ends must lie on character boundaries.
    pub range: Option<Range<usize>>,
}

impl Default for Options<'_> {
    fn default() -> Self {
        Self {
            formatter: "html",
            class_style: ClassStyle::Semantic,
            container_class: None,
            highlighted_lines: FxHashSet::default(),
            show_line_numbers: false,
            range: None,
        }
    }
}

fn slice_of<'src>(source: &'src str, range: &Option<Range<usize>>) -> &'src str {
    match range {
        Some(range) => &source[range.clone()],
        None => source,
    }
}

/// Highlights `source` as `language` into HTML with semantic class names.
///
/// Shorthand for [`highlight_with`] under default [`Options`].
///
/// # Errors
///
/// Unknown language name. See [`highlight_with`] for the full contract.
pub fn highlight(source: &str, language: &str) -> Result<String> {
    highlight_with(source, language, &Options::default())
}

/// Highlights `source` as `language` and renders it with the configured
/// formatter.
///
/// The fast formatting path is taken exactly when no line-level feature is
/// requested and the formatter advertises one; the choice never changes
/// the output, only the cost.
///
/// # Errors
///
/// [`Error::UnknownLanguage`](rosettes_core::Error::UnknownLanguage) or
/// [`Error::UnknownFormatter`](rosettes_core::Error::UnknownFormatter).
/// Tokenization itself cannot fail on any input.
pub fn highlight_with(source: &str, language: &str, options: &Options<'_>) -> Result<String> {
    let lexer = get_lexer(language)?;
    let formatter = get_formatter(options.formatter)?;
    let slice = slice_of(source, &options.range);

    let format = FormatConfig {
        container_class: options.container_class.map(str::to_owned),
        data_language: lexer.name().to_owned(),
        class_style: options.class_style,
    };
    let highlight = HighlightConfig {
        highlighted_lines: options.highlighted_lines.clone(),
        show_line_numbers: options.show_line_numbers,
        ..HighlightConfig::default()
    };

    if highlight.is_plain() && formatter.has_fast_path() {
        log::trace!("fast path: {} bytes of {}", slice.len(), lexer.name());
        Ok(formatter.format_string_fast(&mut lexer.tokenize_fast(slice), &format))
    } else {
        log::trace!("slow path: {} bytes of {}", slice.len(), lexer.name());
        Ok(formatter.format_string(&mut lexer.tokenize(slice), &format, &highlight))
    }
}

/// Tokenizes all of `source` as `language` into a materialized list.
///
/// # Errors
///
/// Unknown language name only.
pub fn tokenize<'src>(source: &'src str, language: &str) -> Result<Vec<Token<'src>>> {
    tokenize_with(source, language, None)
}

/// Tokenizes a byte range of `source` as `language`.
///
/// Positions are relative to the start of the range (line 1, column 1).
/// Both range ends must lie on character boundaries.
pub fn tokenize_with<'src>(
    source: &'src str,
    language: &str,
    range: Option<Range<usize>>,
) -> Result<Vec<Token<'src>>> {
    let lexer = get_lexer(language)?;
    Ok(lexer.tokenize(slice_of(source, &range)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosettes_core::Error;

    #[test]
    fn test_unknown_language_propagates() {
        assert_eq!(
            highlight("x", "klingon").unwrap_err(),
            Error::UnknownLanguage("klingon".into())
        );
    }

    #[test]
    fn test_unknown_formatter_propagates() {
        let options = Options {
            formatter: "latex",
            ..Options::default()
        };
        assert_eq!(
            highlight_with("x", "python", &options).unwrap_err(),
            Error::UnknownFormatter("latex".into())
        );
    }

    #[test]
    fn test_range_limits_highlighting() {
        let source = "aaa bbb ccc";
        let tokens = tokenize_with(source, "plaintext", Some(4..7)).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "bbb");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    }

    #[test]
    fn test_null_formatter_is_identity() {
        let options = Options {
            formatter: "null",
            ..Options::default()
        };
        let source = "fn main() { println!(\"hi\"); }";
        assert_eq!(highlight_with(source, "rust", &options).unwrap(), source);
    }

    #[test]
    fn test_fast_and_slow_paths_agree() {
        let lexer = rosettes_lex::get_lexer("python").unwrap();
        let formatter = rosettes_fmt::get_formatter("html").unwrap();
        let source = "def f():\n    return 1\n";
        let format = FormatConfig {
            container_class: None,
            data_language: "python".into(),
            class_style: ClassStyle::Semantic,
        };
        let fast = formatter.format_string_fast(&mut lexer.tokenize_fast(source), &format);
        let slow = formatter.format_string(
            &mut lexer.tokenize(source),
            &format,
            &HighlightConfig::default(),
        );
        assert_eq!(fast, slow);
    }
}
