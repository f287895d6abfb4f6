//! The token category taxonomy and its lookup tables.
//!
//! Categories form a shallow two-level hierarchy: every leaf belongs to one
//! [`Family`] (keyword, name, string, ...), and several leaves may share one
//! [`Role`] (the ~20 semantic groups color palettes actually style). Three
//! tables are fixed at build time and are part of the external contract:
//!
//! - [`TokenCategory::short_tag`]: terse class names (`k`, `nf`, `mi`, ...)
//!   used by the HTML compatibility class style, matching the de facto
//!   convention external themes target.
//! - [`TokenCategory::long_tag`]: readable class names (`syntax-keyword`,
//!   `syntax-function`, ...) used by the HTML semantic class style.
//! - [`TokenCategory::role`]: the styling role, used by the terminal
//!   formatter and by palettes. Every category has exactly one role.

/// Lexical category of a token.
///
/// The set is closed: scanners may only emit these values, and the tag and
/// role tables below cover all of them. Anything a scanner cannot classify
/// is emitted as a single-code-point [`TokenCategory::Error`] token rather
/// than failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenCategory {
    /// Plain keyword (`if`, `return`).
    Keyword,
    /// Keyword-like constant (`None`, `null`, `nil`).
    KeywordConstant,
    /// Declaration keyword (`def`, `fn`, `let`).
    KeywordDeclaration,
    /// Namespace / import keyword (`import`, `use`, `package`).
    KeywordNamespace,
    /// Built-in type keyword (`int`, `u32`, `bool`).
    KeywordType,
    /// Reserved but unused word.
    KeywordReserved,

    /// Plain identifier.
    Name,
    /// Identifier in function-definition position.
    NameFunction,
    /// Identifier in type-definition position.
    NameClass,
    /// Decorator / annotation (`@property`).
    NameDecorator,
    /// Identifier found in the language's builtin table (`print`, `len`).
    NameBuiltin,
    /// Variable with marked syntax (`$PATH`, lifetimes).
    NameVariable,
    /// Attribute or key position (JSON object keys).
    NameAttribute,
    /// Markup tag name.
    NameTag,
    /// Namespace segment in a qualified path.
    NameNamespace,

    /// String literal with no more specific form.
    String,
    /// Single-quoted string or character literal.
    StringSingle,
    /// Double-quoted string.
    StringDouble,
    /// Triple-quoted string.
    StringTriple,
    /// Raw string (no escape processing).
    StringRaw,
    /// String form that supports interpolation (template literal, f-string).
    StringInterpolated,
    /// Escape sequence inside a string.
    StringEscape,
    /// Interpolation delimiter (`${`, `}`, `{`...`}`).
    StringInterpol,

    /// Decimal integer literal.
    NumberInteger,
    /// Floating-point literal (fractional part or exponent).
    NumberFloat,
    /// Hexadecimal literal (`0x...`).
    NumberHex,
    /// Octal literal (`0o...`).
    NumberOctal,
    /// Binary literal (`0b...`).
    NumberBinary,
    /// Explicit scientific-notation literal, for languages that
    /// distinguish it from a plain float.
    NumberScientific,

    /// Boolean literal (`true`, `False`).
    Boolean,

    /// Comment running to end of line.
    CommentSingle,
    /// Bracketed comment, possibly spanning lines.
    CommentMultiline,
    /// Documentation comment (`///`, docstring).
    CommentDoc,

    /// Symbolic operator (`+`, `=>`, `::`).
    Operator,
    /// Word operator (`and`, `not`, `in`).
    OperatorWord,

    /// Structural punctuation (`(`, `,`, `;`).
    Punctuation,
    /// Whitespace run or a single line break.
    Whitespace,
    /// Unclassified text.
    Text,
    /// A single code point the scanner could not classify.
    Error,
}

/// Top level of the category hierarchy.
///
/// Every [`TokenCategory`] leaf belongs to exactly one family. The hierarchy
/// is shallow by design; no runtime tree is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Keyword,
    Name,
    String,
    Number,
    Boolean,
    Comment,
    Operator,
    Punctuation,
    Whitespace,
    Text,
    Error,
}

/// Semantic styling role shared by several categories.
///
/// Roles decouple the category taxonomy from concrete colors: a palette
/// assigns one color per role, and new categories can be added without
/// touching any theme as long as they map onto an existing role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Keyword,
    KeywordType,
    Name,
    Function,
    Class,
    Decorator,
    Builtin,
    Variable,
    Attribute,
    Tag,
    Namespace,
    String,
    Escape,
    Interpolation,
    Number,
    Boolean,
    Comment,
    Operator,
    Punctuation,
    Whitespace,
    Text,
    Error,
}

use TokenCategory::*;

impl TokenCategory {
    /// Every category leaf, in declaration order.
    ///
    /// Used by tests to prove the tag and role tables are total, and by the
    /// terminal formatter to precompute one style per category.
    pub const ALL: [TokenCategory; 39] = [
        Keyword,
        KeywordConstant,
        KeywordDeclaration,
        KeywordNamespace,
        KeywordType,
        KeywordReserved,
        Name,
        NameFunction,
        NameClass,
        NameDecorator,
        NameBuiltin,
        NameVariable,
        NameAttribute,
        NameTag,
        NameNamespace,
        String,
        StringSingle,
        StringDouble,
        StringTriple,
        StringRaw,
        StringInterpolated,
        StringEscape,
        StringInterpol,
        NumberInteger,
        NumberFloat,
        NumberHex,
        NumberOctal,
        NumberBinary,
        NumberScientific,
        Boolean,
        CommentSingle,
        CommentMultiline,
        CommentDoc,
        Operator,
        OperatorWord,
        Punctuation,
        Whitespace,
        Text,
        Error,
    ];

    /// Index of this category within [`TokenCategory::ALL`].
    ///
    /// `ALL` lists the variants in declaration order, so the discriminant
    /// is the index; the table tests pin that correspondence.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short class name for the HTML compatibility class style.
    ///
    /// An empty tag means "emit no span" (plain text and whitespace carry no
    /// styling of their own).
    pub fn short_tag(self) -> &'static str {
        match self {
            Keyword => "k",
            KeywordConstant => "kc",
            KeywordDeclaration => "kd",
            KeywordNamespace => "kn",
            KeywordType => "kt",
            KeywordReserved => "kr",
            Name => "n",
            NameFunction => "nf",
            NameClass => "nc",
            NameDecorator => "nd",
            NameBuiltin => "nb",
            NameVariable => "nv",
            NameAttribute => "na",
            NameTag => "nt",
            NameNamespace => "nn",
            String => "s",
            StringSingle => "s1",
            StringDouble => "s2",
            StringTriple => "s3",
            StringRaw => "sr",
            StringInterpolated => "sx",
            StringEscape => "se",
            StringInterpol => "si",
            NumberInteger => "mi",
            NumberFloat => "mf",
            NumberHex => "mh",
            NumberOctal => "mo",
            NumberBinary => "mb",
            NumberScientific => "ms",
            Boolean => "bl",
            CommentSingle => "c1",
            CommentMultiline => "cm",
            CommentDoc => "cd",
            Operator => "o",
            OperatorWord => "ow",
            Punctuation => "p",
            Whitespace => "",
            Text => "",
            Error => "err",
        }
    }

    /// Readable class name for the HTML semantic class style.
    pub fn long_tag(self) -> &'static str {
        match self {
            Keyword => "syntax-keyword",
            KeywordConstant => "syntax-keyword-constant",
            KeywordDeclaration => "syntax-keyword-declaration",
            KeywordNamespace => "syntax-keyword-namespace",
            KeywordType => "syntax-keyword-type",
            KeywordReserved => "syntax-keyword-reserved",
            Name => "syntax-name",
            NameFunction => "syntax-function",
            NameClass => "syntax-class",
            NameDecorator => "syntax-decorator",
            NameBuiltin => "syntax-builtin",
            NameVariable => "syntax-variable",
            NameAttribute => "syntax-attribute",
            NameTag => "syntax-tag",
            NameNamespace => "syntax-namespace",
            String => "syntax-string",
            StringSingle => "syntax-string-single",
            StringDouble => "syntax-string-double",
            StringTriple => "syntax-string-triple",
            StringRaw => "syntax-string-raw",
            StringInterpolated => "syntax-string-interpolated",
            StringEscape => "syntax-string-escape",
            StringInterpol => "syntax-interpolation",
            NumberInteger => "syntax-number",
            NumberFloat => "syntax-number-float",
            NumberHex => "syntax-number-hex",
            NumberOctal => "syntax-number-octal",
            NumberBinary => "syntax-number-binary",
            NumberScientific => "syntax-number-scientific",
            Boolean => "syntax-boolean",
            CommentSingle => "syntax-comment",
            CommentMultiline => "syntax-comment-multiline",
            CommentDoc => "syntax-comment-doc",
            Operator => "syntax-operator",
            OperatorWord => "syntax-operator-word",
            Punctuation => "syntax-punctuation",
            Whitespace => "syntax-whitespace",
            Text => "syntax-text",
            Error => "syntax-error",
        }
    }

    /// Styling role for this category.
    pub fn role(self) -> Role {
        match self {
            Keyword | KeywordConstant | KeywordDeclaration | KeywordNamespace
            | KeywordReserved => Role::Keyword,
            KeywordType => Role::KeywordType,
            Name => Role::Name,
            NameFunction => Role::Function,
            NameClass => Role::Class,
            NameDecorator => Role::Decorator,
            NameBuiltin => Role::Builtin,
            NameVariable => Role::Variable,
            NameAttribute => Role::Attribute,
            NameTag => Role::Tag,
            NameNamespace => Role::Namespace,
            String | StringSingle | StringDouble | StringTriple | StringRaw
            | StringInterpolated => Role::String,
            StringEscape => Role::Escape,
            StringInterpol => Role::Interpolation,
            NumberInteger | NumberFloat | NumberHex | NumberOctal | NumberBinary
            | NumberScientific => Role::Number,
            Boolean => Role::Boolean,
            CommentSingle | CommentMultiline | CommentDoc => Role::Comment,
            Operator | OperatorWord => Role::Operator,
            Punctuation => Role::Punctuation,
            Whitespace => Role::Whitespace,
            Text => Role::Text,
            Error => Role::Error,
        }
    }

    /// Family (top hierarchy level) of this category.
    pub fn family(self) -> Family {
        match self {
            Keyword | KeywordConstant | KeywordDeclaration | KeywordNamespace | KeywordType
            | KeywordReserved => Family::Keyword,
            Name | NameFunction | NameClass | NameDecorator | NameBuiltin | NameVariable
            | NameAttribute | NameTag | NameNamespace => Family::Name,
            String | StringSingle | StringDouble | StringTriple | StringRaw
            | StringInterpolated | StringEscape | StringInterpol => Family::String,
            NumberInteger | NumberFloat | NumberHex | NumberOctal | NumberBinary
            | NumberScientific => Family::Number,
            Boolean => Family::Boolean,
            CommentSingle | CommentMultiline | CommentDoc => Family::Comment,
            Operator | OperatorWord => Family::Operator,
            Punctuation => Family::Punctuation,
            Whitespace => Family::Whitespace,
            Text => Family::Text,
            Error => Family::Error,
        }
    }
}
