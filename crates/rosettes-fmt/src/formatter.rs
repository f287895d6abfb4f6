//! The formatter contract.

use rosettes_core::{FormatConfig, HighlightConfig, Token, TokenCategory};

/// A registered output formatter.
///
/// Implementations are stateless (or construction-time-frozen) singletons
/// shared by every caller. Output is appended to a caller-supplied buffer;
/// the `format_string*` helpers allocate one for convenience.
pub trait Formatter: Send + Sync {
    /// Canonical formatter name (lowercase).
    fn name(&self) -> &'static str;

    /// Alternate names this formatter resolves under.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the position-free fast path is implemented.
    ///
    /// The engine only routes to [`Formatter::format_fast`] when this is
    /// true and no line-level feature is requested.
    fn has_fast_path(&self) -> bool {
        true
    }

    /// Renders a full token stream, honoring the line-level features in
    /// `highlight` (line numbers, highlighted lines).
    fn format<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = Token<'src>>,
        format: &FormatConfig,
        highlight: &HighlightConfig,
        out: &mut String,
    );

    /// Renders position-free `(category, text)` pairs. Must produce output
    /// byte-identical to [`Formatter::format`] under a default
    /// [`HighlightConfig`].
    fn format_fast<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = (TokenCategory, &'src str)>,
        format: &FormatConfig,
        out: &mut String,
    );

    /// [`Formatter::format`], returning the concatenated output.
    fn format_string<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = Token<'src>>,
        format: &FormatConfig,
        highlight: &HighlightConfig,
    ) -> String {
        let mut out = String::new();
        self.format(tokens, format, highlight, &mut out);
        out
    }

    /// [`Formatter::format_fast`], returning the concatenated output.
    fn format_string_fast<'src>(
        &self,
        tokens: &mut dyn Iterator<Item = (TokenCategory, &'src str)>,
        format: &FormatConfig,
    ) -> String {
        let mut out = String::new();
        self.format_fast(tokens, format, &mut out);
        out
    }
}
