//! A CSS Syntax Level 3 tokenizer, a CSS Selectors Level 4 parser, and a
//! cascade resolver, built on a single backtrackable cursor shared by every
//! grammar level.
//!
//! The entry points a caller reaches for are [`stylesheet::CssParser`] for a
//! full stylesheet, [`stylesheet::parse_declarations`] for an inline
//! `style="..."` attribute, and [`stylesheet::parse_value`] for a single
//! standalone value such as a `var()` fallback or a CSSOM property setter.
//! Lower-level modules ([`tokenizer`], [`cursor`], [`selector`],
//! [`property`], [`values`]) are public for callers that need to drive the
//! grammar themselves, e.g. a custom at-rule handler.

pub mod cascade;
pub mod cursor;
pub mod declaration;
pub mod error;
pub mod location;
pub mod property;
pub mod rule;
pub mod selector;
pub mod serialize;
pub mod stylesheet;
pub mod tokenizer;
pub mod values;

pub use cascade::{CascadeWeight, Origin};
pub use cursor::Cursor;
pub use declaration::Declaration;
pub use error::{BasicParseError, BasicParseErrorKind, BasicParseResult, ParseError, ParseErrorKind};
pub use location::{SourceLocation, SourcePosition};
pub use property::{CSSProperty, VendorPrefix};
pub use rule::{CustomAtRuleParser, NoCustomAtRules, NoCustomRule, Rule};
pub use selector::{Selector, SelectorList, Specificity};
pub use serialize::{Printer, PrinterOptions, ToCss};
pub use stylesheet::{parse_declarations, parse_value, CssParser, ParserResult, Stylesheet};
pub use tokenizer::{Token, Tokenizer};
