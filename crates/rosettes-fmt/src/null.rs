//! The null formatter.

use rosettes_core::{FormatConfig, HighlightConfig, Token, TokenCategory};

use crate::formatter::Formatter;

/// Identity formatter: emits token text verbatim.
///
/// Exists to expose lexer cost with zero formatting overhead and to verify
/// the reconstruction invariant end to end — `format(tokenize(x))` must
/// equal `x` for every input and language.
pub struct Null;

impl Formatter for Null {
    fn name(&self) -> &'static str {
        "null"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["text"]
    }

    fn format<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = Token<'src>>,
        _format: &FormatConfig,
        _highlight: &HighlightConfig,
        out: &mut String,
    ) {
        for token in tokens {
            out.push_str(token.text);
        }
    }

    fn format_fast<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = (TokenCategory, &'src str)>,
        _format: &FormatConfig,
        out: &mut String,
    ) {
        for (_, text) in tokens {
            out.push_str(text);
        }
    }
}
