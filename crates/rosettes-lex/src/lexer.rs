//! The lexer contract and the lazy token iterators.
//!
//! A language implements [`Lexer`] by naming itself and handing out a fresh
//! [`Machine`] per tokenization. The machine is the language's explicit
//! state automaton: each `step` examines the current code point (plus a
//! constant-bounded lookahead) and emits at least one token into the
//! scanner's queue. [`Tokens`] drives the machine lazily, one step at a
//! time, as the consumer pulls.
//!
//! Machines hold only their own state enum; all position bookkeeping lives
//! in the [`Scanner`]. Nothing global is read or written during
//! tokenization, which is what makes concurrent highlighting over shared
//! lexer singletons safe.

use rosettes_core::{Token, TokenCategory};

use crate::scanner::Scanner;

/// One language's scanning automaton.
///
/// `step` must either consume at least one code point or emit at least one
/// pending token; the driver recovers from a machine that does neither by
/// emitting an `Error` code point, so a scanner bug cannot hang a caller.
pub trait Machine: Send {
    /// Advances the automaton by one step from the current input position.
    fn step(&mut self, scanner: &mut Scanner<'_>);
}

/// A registered language scanner.
///
/// Implementations are stateless singletons shared by every caller; the
/// per-tokenization state lives in the [`Machine`] value returned by
/// [`Lexer::machine`].
pub trait Lexer: Send + Sync {
    /// Canonical language name (lowercase).
    fn name(&self) -> &'static str;

    /// Alternate names this language resolves under.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// A fresh scanning automaton for one input.
    fn machine(&self) -> Box<dyn Machine>;

    /// Tokenizes `source` into a lazy stream of classified tokens with
    /// line/column positions.
    ///
    /// The stream is finite, emits tokens in source order, and its token
    /// texts concatenate back to `source` exactly.
    fn tokenize<'src>(&self, source: &'src str) -> Tokens<'src> {
        Tokens {
            scanner: Scanner::new(source),
            machine: self.machine(),
        }
    }

    /// Tokenizes `source` into `(category, text)` pairs.
    ///
    /// The classification is identical to [`Lexer::tokenize`]; only the
    /// position bookkeeping is dropped. Formatters without line-level
    /// features consume this form.
    fn tokenize_fast<'src>(&self, source: &'src str) -> FastTokens<'src> {
        FastTokens {
            inner: self.tokenize(source),
        }
    }
}

/// Lazy iterator over the classified tokens of one input.
///
/// Not restartable: once exhausted it stays exhausted.
pub struct Tokens<'src> {
    scanner: Scanner<'src>,
    machine: Box<dyn Machine>,
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        loop {
            if let Some(token) = self.scanner.pop() {
                return Some(token);
            }
            if self.scanner.source_exhausted() {
                return None;
            }
            let before = self.scanner.pos();
            self.machine.step(&mut self.scanner);
            if self.scanner.pos() == before && !self.scanner.has_pending() {
                // A stuck machine would otherwise spin here forever.
                self.scanner.error_char();
            }
        }
    }
}

/// Lazy iterator over `(category, text)` pairs, the position-free form.
pub struct FastTokens<'src> {
    inner: Tokens<'src>,
}

impl<'src> Iterator for FastTokens<'src> {
    type Item = (TokenCategory, &'src str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|t| (t.category, t.text))
    }
}
