//! rosettes-lex - Linear-Time Character-Stream Scanners
//!
//! Every language supported by rosettes is scanned by a hand-written finite
//! automaton over the input code points. There are no regular expressions in
//! the hot path, no backtracking, and at most a constant-bounded lookahead,
//! so tokenization is O(n) for any input. That rules out the catastrophic
//! backtracking failure mode of regex-based highlighters by construction.
//!
//! The crate is layered:
//!
//! - [`cursor::Cursor`]: a forward-only code-point cursor with byte
//!   position and 1-based line/column tracking.
//! - [`scanner::Scanner`]: token-boundary bookkeeping on top of the cursor,
//!   plus the shared sub-scanners (whitespace runs, identifiers, numbers,
//!   strings, comments, operators) every language reuses.
//! - [`lexer`]: the [`Lexer`](lexer::Lexer) contract, the
//!   [`Machine`](lexer::Machine) step discipline, and the lazy
//!   [`Tokens`](lexer::Tokens) / [`FastTokens`](lexer::FastTokens)
//!   iterators.
//! - [`languages`]: one module per language, each an explicit state machine
//!   over the shared sub-scanners plus a keyword table.
//! - [`registry`]: lazy, thread-safe resolution of language names and
//!   aliases to shared singletons.
//!
//! Scanners obey a set of invariants that are law, not advice:
//! reconstruction (token texts concatenate to the input), linear time,
//! non-empty tokens, monotonic 1-based positions, totality over arbitrary
//! UTF-8, and determinism with no shared mutable state. The test suites in
//! this crate enforce them for every shipped language.

pub mod cursor;
pub mod languages;
pub mod lexer;
pub mod registry;
pub mod scanner;

mod invariants;

pub use lexer::{FastTokens, Lexer, Machine, Tokens};
pub use registry::{get_lexer, list_languages, supports_language};
pub use scanner::{NumberRules, Scanner, WordTable};
