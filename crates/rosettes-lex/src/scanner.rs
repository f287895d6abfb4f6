//! Token-boundary bookkeeping and the shared sub-scanners.
//!
//! A [`Scanner`] owns the cursor, remembers where the current token began,
//! and queues emitted tokens for the lazy iterator to drain. The sub-scanner
//! methods on it are the building blocks every language reuses: whitespace
//! runs, identifiers, numeric literals, single-line and multi-line strings,
//! comments and operator tables. Language modules combine them with a
//! keyword table and an explicit state machine.
//!
//! Emission discipline: every sub-scanner consumes input strictly forward
//! and emits tokens covering exactly what it consumed, so the concatenation
//! of emitted token texts always reproduces the input. Empty emissions are
//! dropped, which keeps the non-empty-token invariant without special cases
//! at call sites.

use std::collections::VecDeque;

use rosettes_core::{Token, TokenCategory};
use rustc_hash::FxHashMap;

use crate::cursor::Cursor;

/// True for the code points that may start an ASCII identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// True for the code points that may continue an ASCII identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True for the code points that may start a Unicode identifier.
///
/// Languages with Unicode identifier support opt in per scanner.
#[inline]
pub fn is_unicode_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// True for the code points that may continue a Unicode identifier.
#[inline]
pub fn is_unicode_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Numeric literal rules for one language.
///
/// The shared number scanner consults these flags; the classification that
/// falls out is `NumberHex` / `NumberOctal` / `NumberBinary` for prefixed
/// forms, `NumberFloat` when a fractional part or exponent was consumed,
/// and `NumberInteger` otherwise.
#[derive(Clone, Copy, Debug)]
pub struct NumberRules {
    /// Recognize `0x` / `0X` prefixes.
    pub hex: bool,
    /// Recognize `0o` / `0O` prefixes.
    pub octal: bool,
    /// Recognize `0b` / `0B` prefixes.
    pub binary: bool,
    /// Recognize fractional parts and exponents.
    pub float: bool,
    /// Allow `_` separators between digits.
    pub underscores: bool,
}

impl Default for NumberRules {
    fn default() -> Self {
        Self {
            hex: true,
            octal: true,
            binary: true,
            float: true,
            underscores: true,
        }
    }
}

impl NumberRules {
    /// Decimal-and-float only (JSON and friends).
    pub const DECIMAL: NumberRules = NumberRules {
        hex: false,
        octal: false,
        binary: false,
        float: true,
        underscores: false,
    };
}

/// Keyword/builtin classification table for one language.
///
/// Maps reserved words to the category they are reclassified into after the
/// identifier sub-scanner has consumed a full word. Lookup misses stay
/// `Name` (the identifier default).
pub struct WordTable {
    map: FxHashMap<&'static str, TokenCategory>,
}

impl WordTable {
    /// Builds a table from `(category, words)` groups.
    pub fn new(groups: &[(TokenCategory, &[&'static str])]) -> Self {
        let mut map = FxHashMap::default();
        for (category, words) in groups {
            for word in *words {
                map.insert(*word, *category);
            }
        }
        Self { map }
    }

    /// The category `word` is reclassified into, if any.
    pub fn classify(&self, word: &str) -> Option<TokenCategory> {
        self.map.get(word).copied()
    }
}

/// Scanner state shared by all language machines.
///
/// Wraps the [`Cursor`] with the start position of the token being built
/// and the queue of tokens already emitted by the current machine step.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    start: usize,
    start_line: u32,
    start_column: u32,
    pending: VecDeque<Token<'src>>,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            start: 0,
            start_line: 1,
            start_column: 1,
            pending: VecDeque::new(),
        }
    }

    /// Takes the oldest queued token, if any.
    pub fn pop(&mut self) -> Option<Token<'src>> {
        self.pending.pop_front()
    }

    /// True when queued tokens are waiting to be drained.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True once the cursor has consumed the whole input.
    pub fn source_exhausted(&self) -> bool {
        self.cursor.at_end()
    }

    /// Starts a new token at the current cursor position.
    #[inline]
    pub fn mark(&mut self) {
        self.start = self.cursor.pos();
        self.start_line = self.cursor.line();
        self.start_column = self.cursor.column();
    }

    /// Emits the text consumed since the last mark as one token, then
    /// re-marks at the current position. Empty slices are dropped.
    pub fn emit(&mut self, category: TokenCategory) {
        let text = self.cursor.slice_from(self.start);
        if !text.is_empty() {
            self.pending
                .push_back(Token::new(category, text, self.start_line, self.start_column));
        }
        self.mark();
    }

    /// The text consumed since the last mark.
    pub fn text(&self) -> &'src str {
        self.cursor.slice_from(self.start)
    }

    // Cursor passthroughs.

    /// The code point under the cursor, `'\0'` at end of input.
    #[inline]
    pub fn peek(&self) -> char {
        self.cursor.peek()
    }

    /// The code point one position ahead.
    #[inline]
    pub fn peek_second(&self) -> char {
        self.cursor.peek_second()
    }

    /// The code point `n` positions ahead (`n` must be constant-bounded).
    #[inline]
    pub fn peek_at(&self, n: usize) -> char {
        self.cursor.peek_at(n)
    }

    /// Advances one code point.
    #[inline]
    pub fn bump(&mut self) {
        self.cursor.bump();
    }

    /// Advances `n` code points.
    #[inline]
    pub fn bump_n(&mut self, n: usize) {
        self.cursor.bump_n(n);
    }

    /// Advances while `pred` holds.
    #[inline]
    pub fn bump_while(&mut self, pred: impl FnMut(char) -> bool) {
        self.cursor.bump_while(pred);
    }

    /// Consumes `expected` if present.
    #[inline]
    pub fn eat(&mut self, expected: char) -> bool {
        self.cursor.eat(expected)
    }

    /// True if the remaining input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.cursor.starts_with(prefix)
    }

    /// True at end of input.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Current byte position.
    #[inline]
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    // Shared sub-scanners.

    /// Scans whitespace if the cursor is on any.
    ///
    /// Consecutive spaces, tabs and stray carriage returns collapse into one
    /// `Whitespace` token; each `\n` (or `\r\n` pair) is its own
    /// `Whitespace` token, so line accounting in the token stream stays
    /// exact. Returns false if the cursor was not on whitespace.
    pub fn whitespace(&mut self) -> bool {
        match self.peek() {
            '\n' => {
                self.mark();
                self.bump();
                self.emit(TokenCategory::Whitespace);
                true
            }
            '\r' if self.peek_second() == '\n' => {
                self.mark();
                self.bump();
                self.bump();
                self.emit(TokenCategory::Whitespace);
                true
            }
            ' ' | '\t' | '\r' => {
                self.mark();
                loop {
                    match self.peek() {
                        ' ' | '\t' => self.bump(),
                        '\r' if self.peek_second() != '\n' => self.bump(),
                        _ => break,
                    }
                }
                self.emit(TokenCategory::Whitespace);
                true
            }
            _ => false,
        }
    }

    /// Consumes an identifier starting at the cursor and returns its text
    /// without emitting.
    ///
    /// The caller classifies the word (keyword table, contextual rules) and
    /// emits. `cont` is the language's identifier-continue predicate.
    pub fn ident(&mut self, cont: fn(char) -> bool) -> &'src str {
        self.mark();
        self.bump();
        self.cursor.bump_while(cont);
        self.text()
    }

    /// Consumes an identifier and emits it classified against `table`,
    /// defaulting to `Name`.
    pub fn word(&mut self, table: &WordTable, cont: fn(char) -> bool) {
        let text = self.ident(cont);
        let category = table.classify(text).unwrap_or(TokenCategory::Name);
        self.emit(category);
    }

    /// Scans a numeric literal starting at an ASCII digit.
    ///
    /// Handles base prefixes, digit separators, fractional parts and
    /// exponents according to `rules`. A bare base prefix (`0x` with no
    /// digit after it) emits just the `0` as `NumberInteger` and leaves the
    /// `x` for the identifier scanner, per the longest-valid-match policy.
    pub fn number(&mut self, rules: &NumberRules) {
        self.mark();

        if self.peek() == '0' {
            let tag = self.peek_second();
            let (base_ok, category): (fn(char) -> bool, _) = match tag {
                'x' | 'X' if rules.hex => (|c: char| c.is_ascii_hexdigit(), TokenCategory::NumberHex),
                'o' | 'O' if rules.octal => (|c: char| ('0'..='7').contains(&c), TokenCategory::NumberOctal),
                'b' | 'B' if rules.binary => (|c: char| c == '0' || c == '1', TokenCategory::NumberBinary),
                _ => (|_| false, TokenCategory::NumberInteger),
            };
            if base_ok(self.peek_at(2)) {
                let underscores = rules.underscores;
                self.bump(); // '0'
                self.bump(); // base tag
                self.bump_while(|c| base_ok(c) || (underscores && c == '_'));
                self.emit(category);
                return;
            }
        }

        let underscores = rules.underscores;
        self.bump_while(|c| c.is_ascii_digit() || (underscores && c == '_'));

        let mut category = TokenCategory::NumberInteger;
        if rules.float {
            if self.peek() == '.' && self.peek_second().is_ascii_digit() {
                self.bump();
                self.bump_while(|c| c.is_ascii_digit() || (underscores && c == '_'));
                category = TokenCategory::NumberFloat;
            }
            let e = self.peek();
            if e == 'e' || e == 'E' {
                let sign = self.peek_second();
                if sign.is_ascii_digit() {
                    self.bump();
                    self.bump_while(|c| c.is_ascii_digit());
                    category = TokenCategory::NumberFloat;
                } else if (sign == '+' || sign == '-') && self.peek_at(2).is_ascii_digit() {
                    self.bump();
                    self.bump();
                    self.bump_while(|c| c.is_ascii_digit());
                    category = TokenCategory::NumberFloat;
                }
            }
        }
        self.emit(category);
    }

    /// Scans a comment running to the end of the line (delimiter included).
    pub fn line_comment(&mut self, category: TokenCategory) {
        self.mark();
        self.bump_while(|c| c != '\n' && c != '\r');
        self.emit(category);
    }

    /// Scans a bracketed comment, including its delimiters.
    ///
    /// `nested` enables depth counting on the open delimiter. An
    /// unterminated comment consumes to end of input and is still emitted
    /// with `category` — round-tripping matters more than flagging it.
    pub fn block_comment(
        &mut self,
        open: &str,
        close: &str,
        nested: bool,
        category: TokenCategory,
    ) {
        let open_len = open.chars().count();
        let close_len = close.chars().count();
        self.mark();
        self.bump_n(open_len);
        let mut depth: u32 = 1;
        while depth > 0 && !self.at_end() {
            if nested && self.starts_with(open) {
                self.bump_n(open_len);
                depth += 1;
            } else if self.starts_with(close) {
                self.bump_n(close_len);
                depth -= 1;
            } else {
                self.bump();
            }
        }
        self.emit(category);
    }

    /// Scans a string delimited by `quote` that must close before the end
    /// of the line.
    ///
    /// Emits the opening quote, content runs and (when `escapes` is on)
    /// escape sequences as separate tokens of `category` /
    /// `StringEscape`. If the line or input ends before the closing quote,
    /// the unclosed remainder since the last emitted piece becomes one
    /// `Error` token.
    pub fn single_line_string(&mut self, quote: char, category: TokenCategory, escapes: bool) {
        self.mark();
        self.bump();
        self.emit(category); // opening quote

        loop {
            let c = self.peek();
            if self.at_end() || c == '\n' || (c == '\r' && self.peek_second() == '\n') {
                self.emit(TokenCategory::Error);
                return;
            }
            if c == quote {
                self.emit(category);
                self.bump();
                self.emit(category); // closing quote
                return;
            }
            if escapes && c == '\\' {
                self.emit(category);
                self.escape_seq();
                continue;
            }
            self.bump();
        }
    }

    /// Scans a string form that may span lines, delimited by `opener` /
    /// `closer`.
    ///
    /// An unterminated literal consumes to end of input and keeps
    /// `category` for the tail, mirroring the block-comment policy.
    pub fn multiline_string(
        &mut self,
        opener: &str,
        closer: &str,
        category: TokenCategory,
        escapes: bool,
    ) {
        self.mark();
        self.bump_n(opener.chars().count());
        self.emit(category); // opener

        let closer_len = closer.chars().count();
        loop {
            if self.at_end() {
                self.emit(category);
                return;
            }
            if self.starts_with(closer) {
                self.emit(category);
                self.bump_n(closer_len);
                self.emit(category); // closer
                return;
            }
            if escapes && self.peek() == '\\' {
                self.emit(category);
                self.escape_seq();
                continue;
            }
            self.bump();
        }
    }

    /// Scans one escape sequence starting at a backslash and emits it as
    /// `StringEscape`.
    ///
    /// Covers the common single-character escapes plus `\xNN`, `\uNNNN` and
    /// `\u{...}`. A backslash at end of line or input is emitted as `Error`.
    pub fn escape_seq(&mut self) {
        self.mark();
        self.bump(); // backslash
        let c = self.peek();
        if self.at_end() || c == '\n' || c == '\r' {
            self.emit(TokenCategory::Error);
            return;
        }
        self.bump();
        match c {
            'x' => {
                for _ in 0..2 {
                    if self.peek().is_ascii_hexdigit() {
                        self.bump();
                    } else {
                        break;
                    }
                }
            }
            'u' => {
                if self.eat('{') {
                    self.bump_while(|c| c.is_ascii_hexdigit());
                    self.eat('}');
                } else {
                    for _ in 0..4 {
                        if self.peek().is_ascii_hexdigit() {
                            self.bump();
                        } else {
                            break;
                        }
                    }
                }
            }
            _ => {}
        }
        self.emit(TokenCategory::StringEscape);
    }

    /// Tries the operator table (sorted longest-first) at the cursor.
    ///
    /// Emits an `Operator` token for the longest match and returns true;
    /// leaves the cursor untouched on a miss.
    pub fn operator(&mut self, table: &[&'static str]) -> bool {
        for op in table {
            if self.starts_with(op) {
                self.mark();
                self.bump_n(op.chars().count());
                self.emit(TokenCategory::Operator);
                return true;
            }
        }
        false
    }

    /// Emits the single code point under the cursor with `category`.
    pub fn single(&mut self, category: TokenCategory) {
        self.mark();
        self.bump();
        self.emit(category);
    }

    /// Emits the single unclassifiable code point under the cursor as
    /// `Error`. The totality fallback: scanners never abort.
    pub fn error_char(&mut self) {
        self.single(TokenCategory::Error);
    }
}
