//! rosettes - Linear-Time Multi-Language Syntax Highlighting
//!
//! Give it a source fragment and a language name; get back classified
//! tokens or rendered output (HTML, ANSI terminal, or the raw text). The
//! properties the library is built around:
//!
//! - **Linear-time tokenization.** Every lexer is a hand-written
//!   character-stream scanner with constant lookahead and no backtracking.
//!   There are no regular expressions in the hot path, so there is no
//!   pathological input that makes highlighting super-linear.
//! - **Perfect round-tripping.** Concatenating the emitted token texts
//!   reproduces the input exactly, for any input.
//! - **Shared-nothing evaluation.** Lexers and formatters are immutable
//!   singletons; all per-call state is local. Calls are freely concurrent,
//!   and [`highlight_many`] / [`tokenize_many`] fan a batch out over a
//!   thread pool with results in submission order.
//!
//! # Example
//!
//! ```
//! let html = rosettes::highlight("def hello(): pass", "python").unwrap();
//! assert!(html.contains("<span class=\"syntax-keyword-declaration\">def</span>"));
//!
//! let tokens = rosettes::tokenize("x = 1", "python").unwrap();
//! let joined: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(joined, "x = 1");
//! ```
//!
//! Unknown names are the only errors ([`Error::UnknownLanguage`],
//! [`Error::UnknownFormatter`]); tokenization itself never fails. When the
//! language of a fragment is unknown, pass `"plaintext"`.

mod batch;
mod engine;

pub use batch::{highlight_many, tokenize_many, BatchOptions};
pub use engine::{highlight, highlight_with, tokenize, tokenize_with, Options};

pub use rosettes_core::{
    ClassStyle, Error, Family, FormatConfig, HighlightConfig, LexerConfig, Result, Role, Token,
    TokenCategory,
};
pub use rosettes_fmt::{get_formatter, list_formatters, supports_formatter, Formatter};
pub use rosettes_lex::{
    get_lexer, list_languages, supports_language, FastTokens, Lexer, Tokens,
};
