//! Frozen configuration value types.
//!
//! All configuration is passed by value through the engine; nothing here is
//! mutated after construction and everything implements `Default` with the
//! documented defaults. Direct construction with named fields is the
//! intended style; there are no builders.

use rustc_hash::FxHashSet;

/// Which tag table the HTML formatter draws class names from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClassStyle {
    /// Readable class names from the long-tag table (`syntax-keyword`).
    /// Default container class: `rosettes`.
    #[default]
    Semantic,
    /// Terse class names from the short-tag table (`k`, `nf`), matching the
    /// convention existing color themes target. Default container class:
    /// `highlight`.
    Compat,
}

impl ClassStyle {
    /// The default container class for this style.
    pub fn default_container_class(self) -> &'static str {
        match self {
            ClassStyle::Semantic => "rosettes",
            ClassStyle::Compat => "highlight",
        }
    }
}

/// Reserved for future lexer tuning. Currently carries no options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexerConfig {}

/// Formatter-level configuration.
#[derive(Clone, Debug, Default)]
pub struct FormatConfig {
    /// Class of the container element. `None` means the class-style default.
    pub container_class: Option<String>,

    /// Canonical language name, emitted as `data-language` on the container.
    pub data_language: String,

    /// Tag table selection for the HTML formatter.
    pub class_style: ClassStyle,
}

impl FormatConfig {
    /// The effective container class: the override if set, otherwise the
    /// class-style default.
    pub fn container_class(&self) -> &str {
        self.container_class
            .as_deref()
            .unwrap_or_else(|| self.class_style.default_container_class())
    }
}

/// Line-level highlighting configuration.
///
/// When `highlighted_lines` is empty and `show_line_numbers` is false the
/// engine takes the fast path and none of the class names below are used.
#[derive(Clone, Debug)]
pub struct HighlightConfig {
    /// 1-based lines to mark with [`HighlightConfig::highlighted_line_class`].
    pub highlighted_lines: FxHashSet<u32>,

    /// Whether to prefix each line with its number.
    pub show_line_numbers: bool,

    /// Extra class added to highlighted lines.
    pub highlighted_line_class: String,

    /// Class of the line-number span.
    pub line_number_class: String,

    /// Class wrapping each rendered line.
    pub line_class: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            highlighted_lines: FxHashSet::default(),
            show_line_numbers: false,
            highlighted_line_class: "highlighted".into(),
            line_number_class: "line-number".into(),
            line_class: "line".into(),
        }
    }
}

impl HighlightConfig {
    /// True when no line-level feature is requested, i.e. the formatter's
    /// fast path produces identical output.
    pub fn is_plain(&self) -> bool {
        self.highlighted_lines.is_empty() && !self.show_line_numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_class_defaults() {
        let mut config = FormatConfig {
            data_language: "python".into(),
            ..FormatConfig::default()
        };
        assert_eq!(config.container_class(), "rosettes");
        config.class_style = ClassStyle::Compat;
        assert_eq!(config.container_class(), "highlight");
        config.container_class = Some("chroma".into());
        assert_eq!(config.container_class(), "chroma");
    }

    #[test]
    fn test_default_highlight_config_is_plain() {
        assert!(HighlightConfig::default().is_plain());
    }

    #[test]
    fn test_line_features_disable_plain() {
        let mut config = HighlightConfig::default();
        config.show_line_numbers = true;
        assert!(!config.is_plain());

        let mut config = HighlightConfig::default();
        config.highlighted_lines.insert(3);
        assert!(!config.is_plain());
    }
}
