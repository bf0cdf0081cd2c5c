//! Decoder error definitions.

use thiserror::Error;

/// A syntax error in the configuration text, tagged with its 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct DecodeError {
    /// Line on which the error was detected.
    pub line: usize,
    /// What went wrong.
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(line: usize, kind: DecodeErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Grammar violations the decoder can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// A `"` opened a quoted segment that was never closed on the same line.
    #[error("unterminated quoted string")]
    UnterminatedQuote,

    /// Backslash followed by a character outside `\\ \" n t b`.
    #[error("invalid escape sequence \\{0}")]
    InvalidEscape(char),

    /// Line continuation on the last line of input.
    #[error("line continuation at end of input")]
    TrailingBackslash,

    #[error("invalid section header")]
    InvalidSectionHeader,

    #[error("invalid variable name")]
    InvalidVariableName,

    /// Input bytes are not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,

    #[error("variable defined outside of any section")]
    VariableOutsideSection,
}
