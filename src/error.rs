//! Error types for the tokenizer, value parsers and rule-level recovery.
//!
//! Two tiers, per the parsing contract: a [`BasicParseError`] drives
//! backtracking inside a single parse attempt and never escapes it, while a
//! [`ParseError`] is recorded on the stylesheet result when rule-level
//! recovery has to skip malformed input.

use crate::location::SourceLocation;
use crate::tokenizer::Token;
use std::fmt;
use thiserror::Error;

/// The reason a leaf parser (tokenizer primitive, value parser, selector
/// component) refused to continue. Cheap to construct and always local to a
/// single `tryParse` attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BasicParseErrorKind {
    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("invalid value for {0}")]
    InvalidValue(String),
    #[error("{0}")]
    Custom(String),
}

/// A basic parse error together with the location it occurred at.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicParseError {
    pub kind: BasicParseErrorKind,
    pub location: SourceLocation,
}

impl BasicParseError {
    #[must_use]
    pub fn new(kind: BasicParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for BasicParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.location)
    }
}

impl std::error::Error for BasicParseError {}

/// The reason a rule, at-rule or declaration could not be produced and had
/// to be recorded on the stylesheet's error list instead of aborting parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("invalid at-rule @{0}")]
    AtRuleInvalid(String),
    #[error("invalid at-rule body")]
    AtRuleBodyInvalid,
    #[error("invalid qualified rule")]
    QualifiedRuleInvalid,
    #[error("{0}")]
    Custom(String),
}

impl From<BasicParseErrorKind> for ParseErrorKind {
    fn from(kind: BasicParseErrorKind) -> Self {
        match kind {
            BasicParseErrorKind::UnexpectedToken(t) => ParseErrorKind::UnexpectedToken(t),
            BasicParseErrorKind::EndOfInput => ParseErrorKind::EndOfInput,
            BasicParseErrorKind::InvalidValue(v) => ParseErrorKind::Custom(v),
            BasicParseErrorKind::Custom(v) => ParseErrorKind::Custom(v),
        }
    }
}

/// A recoverable error, recorded on the [`crate::stylesheet::Stylesheet`] while
/// parsing continues past it. Carries the verbatim text that was skipped so
/// callers can report `file:line:column: message`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
    pub invalid_text: String,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, location: SourceLocation, invalid_text: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            invalid_text: invalid_text.into(),
        }
    }

    #[must_use]
    pub fn from_basic(err: BasicParseError, invalid_text: impl Into<String>) -> Self {
        Self {
            kind: err.kind.into(),
            location: err.location,
            invalid_text: invalid_text.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

impl std::error::Error for ParseError {}

pub type BasicParseResult<T> = Result<T, BasicParseError>;
