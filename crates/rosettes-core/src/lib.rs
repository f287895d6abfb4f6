//! rosettes-core - Token Model and Category Taxonomy
//!
//! This crate holds the foundation types shared by every stage of the
//! rosettes highlighting pipeline:
//!
//! - [`Token`]: an immutable record of one classified lexeme, borrowing its
//!   text from the original input so that concatenating the texts of a token
//!   stream reproduces the input byte for byte.
//! - [`TokenCategory`]: the closed set of lexical categories a scanner may
//!   emit, together with its three lookup tables (compatibility tag,
//!   semantic tag, styling role).
//! - [`FormatConfig`] / [`HighlightConfig`]: frozen configuration value
//!   types consumed by the formatters.
//! - [`Error`]: the single library error enum. Lookup failures are the only
//!   recoverable errors this library produces; tokenization itself is total.
//!
//! Nothing in this crate allocates on the hot path and nothing here is
//! mutable after construction, which is what makes the scanners and
//! formatters above it freely shareable across threads.

pub mod category;
pub mod config;
pub mod error;
pub mod token;

pub use category::{Family, Role, TokenCategory};
pub use config::{ClassStyle, FormatConfig, HighlightConfig, LexerConfig};
pub use error::{Error, Result};
pub use token::Token;
