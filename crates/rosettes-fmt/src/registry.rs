//! Lazy, thread-safe resolution of formatter names to singletons.
//!
//! Mirrors the language registry in `rosettes-lex`: a static spec table,
//! an alias map built once, and a concurrent instance cache with
//! leak-on-first-construction. Formatters are immutable after
//! construction, so a racing double construction is benign.

use std::sync::LazyLock;

use dashmap::DashMap;
use rosettes_core::{Error, Result};
use rustc_hash::FxHashMap;

use crate::formatter::Formatter;
use crate::html::Html;
use crate::null::Null;
use crate::terminal::Terminal;

/// Construction metadata for one formatter.
pub struct FormatterSpec {
    /// Canonical name (lowercase).
    pub name: &'static str,
    /// Alternate names resolving to this formatter.
    pub aliases: &'static [&'static str],
    /// Constructor invoked once, on first resolve.
    pub construct: fn() -> Box<dyn Formatter>,
}

static SPECS: &[FormatterSpec] = &[
    FormatterSpec {
        name: "html",
        aliases: &[],
        construct: || Box::new(Html),
    },
    FormatterSpec {
        name: "null",
        aliases: &["text"],
        construct: || Box::new(Null),
    },
    FormatterSpec {
        name: "terminal",
        aliases: &["ansi", "console"],
        construct: || Box::new(Terminal::new()),
    },
];

static NAMES: LazyLock<FxHashMap<&'static str, &'static FormatterSpec>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    for spec in SPECS {
        map.insert(spec.name, spec);
        for alias in spec.aliases {
            map.insert(*alias, spec);
        }
    }
    map
});

static INSTANCES: LazyLock<DashMap<&'static str, &'static dyn Formatter>> =
    LazyLock::new(DashMap::new);

/// Resolves `name` (canonical or alias, case-insensitive, surrounding
/// whitespace ignored) to the shared formatter singleton.
///
/// # Errors
///
/// [`Error::UnknownFormatter`] carrying the offered name when nothing is
/// registered under it.
pub fn get_formatter(name: &str) -> Result<&'static dyn Formatter> {
    let normalized = name.trim().to_ascii_lowercase();
    let spec = NAMES
        .get(normalized.as_str())
        .copied()
        .ok_or_else(|| Error::UnknownFormatter(name.to_string()))?;
    let instance = *INSTANCES.entry(spec.name).or_insert_with(|| {
        log::debug!("constructing formatter {:?}", spec.name);
        Box::leak((spec.construct)())
    });
    Ok(instance)
}

/// Canonical names of every registered formatter, sorted lexicographically.
pub fn list_formatters() -> Vec<&'static str> {
    let mut names: Vec<_> = SPECS.iter().map(|spec| spec.name).collect();
    names.sort_unstable();
    names
}

/// True when `name` resolves, without constructing anything.
pub fn supports_formatter(name: &str) -> bool {
    NAMES.contains_key(name.trim().to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_alias() {
        let terminal = get_formatter("ansi").unwrap();
        assert_eq!(terminal.name(), "terminal");
        assert!(std::ptr::eq(terminal, get_formatter("terminal").unwrap()));
    }

    #[test]
    fn test_unknown_formatter_carries_name() {
        match get_formatter("latex") {
            Err(err) => assert_eq!(err, Error::UnknownFormatter("latex".into())),
            Ok(_) => panic!("expected unknown formatter error"),
        }
    }

    #[test]
    fn test_listing_is_sorted() {
        assert_eq!(list_formatters(), vec!["html", "null", "terminal"]);
    }

    #[test]
    fn test_supports() {
        assert!(supports_formatter("HTML"));
        assert!(supports_formatter(" console "));
        assert!(!supports_formatter("rtf"));
    }
}
