//! The parse error taxonomy.

use thiserror::Error;

/// Everything that can go wrong while parsing.
///
/// The first error encountered stops the parse and becomes the document's
/// terminal state; message texts are stable and part of the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorCode {
    #[error("no error")]
    NoError,
    #[error("out of memory")]
    OutOfMemory,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("missing root element")]
    MissingRootElement,
    #[error("document root must be object or array")]
    BadRoot,
    #[error("expected ,")]
    ExpectedComma,
    #[error("missing object key")]
    MissingObjectKey,
    #[error("expected :")]
    ExpectedColon,
    #[error("expected end of input")]
    ExpectedEndOfInput,
    #[error("unexpected comma")]
    UnexpectedComma,
    #[error("expected value")]
    ExpectedValue,
    #[error("expected 'null'")]
    ExpectedNull,
    #[error("expected 'false'")]
    ExpectedFalse,
    #[error("expected 'true'")]
    ExpectedTrue,
    #[error("invalid number")]
    InvalidNumber,
    #[error("missing exponent")]
    MissingExponent,
    /// Carries the offending byte value.
    #[error("illegal unprintable codepoint in string: {0}")]
    IllegalCodepoint(u8),
    #[error("invalid character in unicode escape")]
    InvalidUnicodeEscape,
    #[error("unexpected end of input during UTF-16 surrogate pair")]
    UnexpectedEndOfUtf16,
    #[error("expected \\u")]
    ExpectedU,
    #[error("invalid UTF-16 trail surrogate")]
    InvalidUtf16TrailSurrogate,
    #[error("unknown escape")]
    UnknownEscape,
    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// A parse failure with its source position.
///
/// Lines are 1-based and increment on `\n`; columns are 1-based byte
/// offsets from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{code} at {line}:{column}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub line: usize,
    pub column: usize,
}
