//! rosettes-fmt - Token Stream Formatters
//!
//! Formatters turn a classified token stream into an output string. Each
//! one implements both entry points of the [`Formatter`] contract:
//!
//! - the **fast path** consumes position-free `(category, text)` pairs and
//!   writes straight through;
//! - the **slow path** consumes full [`Token`](rosettes_core::Token)
//!   records and groups them into lines, which is what line numbers and
//!   highlighted-line marking need.
//!
//! For a configuration without line-level features the two paths produce
//! byte-identical output; the engine picks between them purely on cost.
//!
//! Three formatters ship: [`html::Html`] (semantic or compatibility class
//! naming), [`terminal::Terminal`] (ANSI SGR styling precomputed per
//! category), and [`null::Null`] (identity output, the reconstruction
//! check and the lexer-cost baseline).

pub mod escape;
pub mod formatter;
pub mod html;
pub mod null;
pub mod registry;
pub mod terminal;

pub use formatter::Formatter;
pub use registry::{get_formatter, list_formatters, supports_formatter};
