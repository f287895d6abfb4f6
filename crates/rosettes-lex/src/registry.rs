//! Lazy, thread-safe resolution of language names to lexer singletons.
//!
//! A static spec table lists every language with its aliases and a
//! constructor. The alias map is built once; instances are constructed on
//! first resolve and cached in a concurrent map, leaked to `'static` so
//! every caller shares the same immutable lexer. Racing constructions of
//! the same entry are harmless: lexers carry no state, so either winner is
//! functionally identical.

use std::sync::LazyLock;

use dashmap::DashMap;
use rosettes_core::{Error, Result};
use rustc_hash::FxHashMap;

use crate::languages;
use crate::lexer::Lexer;

/// Construction metadata for one language.
///
/// Frozen; the registry owns the only instances.
pub struct LexerSpec {
    /// Canonical name (lowercase).
    pub name: &'static str,
    /// Alternate names resolving to this language.
    pub aliases: &'static [&'static str],
    /// Constructor invoked once, on first resolve.
    pub construct: fn() -> Box<dyn Lexer>,
}

/// Every shipped language, canonical name order.
static SPECS: &[LexerSpec] = &[
    LexerSpec {
        name: "c",
        aliases: &["h"],
        construct: || Box::new(languages::c::CLang),
    },
    LexerSpec {
        name: "go",
        aliases: &["golang"],
        construct: || Box::new(languages::go::Go),
    },
    LexerSpec {
        name: "javascript",
        aliases: &["js", "node"],
        construct: || Box::new(languages::javascript::Javascript),
    },
    LexerSpec {
        name: "json",
        aliases: &[],
        construct: || Box::new(languages::json::Json),
    },
    LexerSpec {
        name: "plaintext",
        aliases: &["text", "txt", "plain"],
        construct: || Box::new(languages::plaintext::Plaintext),
    },
    LexerSpec {
        name: "python",
        aliases: &["py", "python3"],
        construct: || Box::new(languages::python::Python),
    },
    LexerSpec {
        name: "rust",
        aliases: &["rs"],
        construct: || Box::new(languages::rust::Rust),
    },
    LexerSpec {
        name: "shell",
        aliases: &["bash", "sh", "zsh"],
        construct: || Box::new(languages::shell::Shell),
    },
    LexerSpec {
        name: "toml",
        aliases: &[],
        construct: || Box::new(languages::toml::Toml),
    },
];

/// Alias and canonical-name lookup, built once.
static NAMES: LazyLock<FxHashMap<&'static str, &'static LexerSpec>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    for spec in SPECS {
        map.insert(spec.name, spec);
        for alias in spec.aliases {
            map.insert(*alias, spec);
        }
    }
    map
});

/// Constructed singletons, keyed by canonical name.
static INSTANCES: LazyLock<DashMap<&'static str, &'static dyn Lexer>> =
    LazyLock::new(DashMap::new);

/// Resolves `name` (canonical or alias, case-insensitive, surrounding
/// whitespace ignored) to the shared lexer singleton.
///
/// # Errors
///
/// [`Error::UnknownLanguage`] carrying the offered name when nothing is
/// registered under it.
pub fn get_lexer(name: &str) -> Result<&'static dyn Lexer> {
    let normalized = name.trim().to_ascii_lowercase();
    let spec = NAMES
        .get(normalized.as_str())
        .copied()
        .ok_or_else(|| Error::UnknownLanguage(name.to_string()))?;
    let instance = *INSTANCES.entry(spec.name).or_insert_with(|| {
        log::debug!("constructing lexer {:?}", spec.name);
        Box::leak((spec.construct)())
    });
    Ok(instance)
}

/// Canonical names of every registered language, sorted lexicographically.
pub fn list_languages() -> Vec<&'static str> {
    let mut names: Vec<_> = SPECS.iter().map(|spec| spec.name).collect();
    names.sort_unstable();
    names
}

/// True when `name` resolves, without constructing anything.
pub fn supports_language(name: &str) -> bool {
    NAMES.contains_key(name.trim().to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_and_alias() {
        let by_name = get_lexer("python").unwrap();
        let by_alias = get_lexer("py").unwrap();
        assert_eq!(by_name.name(), "python");
        assert!(std::ptr::eq(by_name, by_alias));
    }

    #[test]
    fn test_resolution_is_case_insensitive_and_trimmed() {
        assert_eq!(get_lexer("  RUST ").unwrap().name(), "rust");
        assert_eq!(get_lexer("Python3").unwrap().name(), "python");
    }

    #[test]
    fn test_unknown_language_carries_name() {
        match get_lexer("klingon") {
            Err(err) => assert_eq!(err, Error::UnknownLanguage("klingon".into())),
            Ok(_) => panic!("expected unknown language error"),
        }
    }

    #[test]
    fn test_listing_is_sorted() {
        let names = list_languages();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"plaintext"));
    }

    #[test]
    fn test_supports_does_not_require_canonical() {
        assert!(supports_language("js"));
        assert!(supports_language("SH"));
        assert!(!supports_language("cobol"));
    }

    #[test]
    fn test_every_spec_alias_is_unambiguous() {
        let mut seen = rustc_hash::FxHashSet::default();
        for spec in SPECS {
            assert!(seen.insert(spec.name), "duplicate name {:?}", spec.name);
            for alias in spec.aliases {
                assert!(seen.insert(*alias), "duplicate alias {alias:?}");
            }
        }
    }

    #[test]
    fn test_all_registered_languages_construct() {
        for name in list_languages() {
            let lexer = get_lexer(name).unwrap();
            assert_eq!(lexer.name(), name);
        }
    }
}
