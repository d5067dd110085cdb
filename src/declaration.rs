//! Declaration-list parsing (§4.6), shared between a style rule's `{ … }`
//! body and a standalone inline `style="…"` attribute string.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, ParseError, ParseErrorKind};
use crate::location::SourceLocation;
use crate::property::CSSProperty;
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use std::fmt::{self, Write};

/// A single `name: value` pair, optionally flagged `!important`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: CSSProperty,
    pub important: bool,
    pub location: SourceLocation,
}

impl ToCss for Declaration {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        self.property.to_css(dest)?;
        if self.important {
            dest.write_str(" !important")?;
        }
        Ok(())
    }
}

/// Parses the body of a `{ … }` block or a style-attribute string as a
/// declaration list, recovering from malformed declarations by skipping to
/// the next top-level `;` and recording a [`ParseError`]. Nested qualified
/// rules (CSS Nesting) are left for the caller: this only consumes
/// declarations and stray semicolons, stopping as soon as it sees a token
/// that cannot start one (reporting nothing — the caller decides whether
/// that is a nested rule or the end of the block).
pub fn parse_declaration_list(cursor: &mut Cursor, errors: &mut Vec<ParseError>) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    loop {
        cursor.skip_whitespace();
        let start = cursor.position();
        let state = cursor.state();
        match cursor.next() {
            Token::Eof => break,
            Token::Semicolon => continue,
            Token::Ident(name) => {
                // An ident can start either a declaration (`name: value`) or,
                // under CSS Nesting, a bare type-selector rule (`name { … }`
                // or `name.child { … }`). Peek for the colon that only a
                // declaration has before committing to either parse.
                if !next_is_colon(cursor) {
                    cursor.reset(state);
                    break;
                }
                let location = cursor.location_at(start);
                match parse_one_declaration(cursor, &name, location) {
                    Ok(decl) => declarations.push(decl),
                    Err(err) => {
                        cursor.consume_until_semicolon_or_block_end();
                        let invalid_text = cursor.slice_from(start);
                        errors.push(ParseError::from_basic(err, invalid_text));
                    }
                }
            }
            other => {
                if matches!(other, Token::AtKeyword(_) | Token::CurlyBracketBlock) || looks_like_rule_start(&other) {
                    cursor.reset(state);
                    break;
                }
                cursor.consume_until_semicolon_or_block_end();
                let invalid_text = cursor.slice_from(start);
                errors.push(ParseError::new(
                    ParseErrorKind::UnexpectedToken(other),
                    cursor.location_at(start),
                    invalid_text,
                ));
            }
        }
    }
    declarations
}

fn next_is_colon(cursor: &mut Cursor) -> bool {
    let state = cursor.state();
    let is_colon = matches!(cursor.next(), Token::Colon);
    cursor.reset(state);
    is_colon
}

fn looks_like_rule_start(token: &Token) -> bool {
    matches!(
        token,
        Token::Delim('.')
            | Token::Delim('#')
            | Token::Delim('*')
            | Token::Delim('&')
            | Token::Hash(_)
            | Token::IdHash(_)
            | Token::Colon
            | Token::SquareBracketBlock
    )
}

fn parse_one_declaration(cursor: &mut Cursor, name: &str, location: SourceLocation) -> Result<Declaration, BasicParseError> {
    cursor.skip_whitespace();
    cursor.expect_colon()?;
    let raw_value = cursor.consume_declaration_value();
    let (value_text, important) = split_trailing_important(raw_value);
    let mut value_cursor = Cursor::new(value_text);
    value_cursor.skip_whitespace();
    if value_cursor.is_exhausted() {
        return Err(BasicParseError::new(BasicParseErrorKind::EndOfInput, location));
    }
    let property = CSSProperty::parse(name, &mut value_cursor);
    Ok(Declaration {
        property,
        important,
        location,
    })
}

/// Scans for a trailing, top-level `!important` and splits it off, the way
/// the stylesheet parser's declaration grammar asks for: speculatively try
/// `!important` wherever a `!` delim appears, keep scanning until one of
/// them accounts for the rest of the value.
fn split_trailing_important(text: &str) -> (&str, bool) {
    let mut cursor = Cursor::new(text);
    loop {
        let before_bang = cursor.position();
        match cursor.next() {
            Token::Delim('!') => {
                if cursor.try_parse(|c| c.expect_ident_matching("important")).is_ok() && cursor.is_exhausted() {
                    return (&text[..before_bang.offset()], true);
                }
            }
            Token::Eof => break,
            _ => continue,
        }
    }
    (text, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::TypedValue;

    #[test]
    fn parses_simple_declaration() {
        let mut c = Cursor::new("color: red;");
        let mut errors = Vec::new();
        let decls = parse_declaration_list(&mut c, &mut errors);
        assert_eq!(decls.len(), 1);
        assert!(errors.is_empty());
        assert!(!decls[0].important);
    }

    #[test]
    fn parses_important() {
        let mut c = Cursor::new("color: red !important;");
        let mut errors = Vec::new();
        let decls = parse_declaration_list(&mut c, &mut errors);
        assert_eq!(decls.len(), 1);
        assert!(decls[0].important);
        assert!(matches!(
            decls[0].property,
            CSSProperty::Typed { value: TypedValue::Color(_), .. }
        ));
    }

    #[test]
    fn recovers_from_malformed_declaration() {
        let mut c = Cursor::new("color: ; width: 10px;");
        let mut errors = Vec::new();
        let decls = parse_declaration_list(&mut c, &mut errors);
        assert_eq!(decls.len(), 1);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn custom_property_round_trips() {
        let mut c = Cursor::new("--gap: 4px;");
        let mut errors = Vec::new();
        let decls = parse_declaration_list(&mut c, &mut errors);
        assert_eq!(decls.len(), 1);
        assert!(matches!(decls[0].property, CSSProperty::Custom { .. }));
    }
}
