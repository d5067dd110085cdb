//! Serializing a bare [`Token`] back to CSS text. Used wherever a value is
//! preserved as a raw token list instead of being parsed into a typed form:
//! unparsed properties, custom properties, and at-rule preludes/bodies this
//! crate does not give a typed shape to.

use super::escape::{serialize_identifier, serialize_string, serialize_unquoted_url};
use super::printer::Printer;
use super::token_pairs::TokenCategory;
use crate::tokenizer::Token;
use std::fmt::{self, Write};

fn numeric_repr(n: &crate::tokenizer::Numeric) -> String {
    n.repr.to_string()
}

/// Writes a single token's source-text form, inserting a token-pair
/// separator against whatever was last written if needed.
pub fn write_token<W: Write>(dest: &mut Printer<W>, token: &Token) -> fmt::Result {
    match token {
        Token::Ident(s) => dest.write_token(TokenCategory::Ident, &serialize_identifier(s)),
        Token::Function(s) => {
            dest.write_token(TokenCategory::Ident, &serialize_identifier(s))?;
            dest.write_str("(")
        }
        Token::AtKeyword(s) => dest.write_token(TokenCategory::AtKeywordOrHash, &format!("@{}", serialize_identifier(s))),
        Token::Hash(s) | Token::IdHash(s) => {
            dest.write_token(TokenCategory::AtKeywordOrHash, &format!("#{}", serialize_identifier(s)))
        }
        Token::QuotedString(s) => dest.write_str(&serialize_string(s)),
        Token::BadString(s) | Token::EofInString(s) => dest.write_str(&serialize_string(s)),
        Token::Url(s) => {
            dest.write_str("url(")?;
            dest.write_str(&serialize_unquoted_url(s))?;
            dest.write_str(")")
        }
        Token::BadUrl(s) => {
            dest.write_str("url(")?;
            dest.write_str(s)?;
            dest.write_str(")")
        }
        Token::EofInUrl(s) => {
            dest.write_str("url(")?;
            dest.write_str(s)
        }
        Token::Delim(c) => {
            let category = match c {
                '-' => TokenCategory::DelimMinus,
                '+' => TokenCategory::DelimPlus,
                '.' => TokenCategory::DelimDot,
                '/' => TokenCategory::DelimSlash,
                '@' => TokenCategory::DelimAt,
                '#' => TokenCategory::DelimHash,
                _ => TokenCategory::DelimOther,
            };
            dest.write_token(category, &c.to_string())
        }
        Token::Number(n) => dest.write_token(TokenCategory::Number, &numeric_repr(n)),
        Token::Percentage(n) => dest.write_token(TokenCategory::Percentage, &format!("{}%", numeric_repr(n))),
        Token::Dimension(n, unit) => dest.write_token(TokenCategory::Dimension, &format!("{}{unit}", numeric_repr(n))),
        Token::UnicodeRange(start, end) => {
            if start == end {
                dest.write_str(&format!("U+{start:X}"))
            } else {
                dest.write_str(&format!("U+{start:X}-{end:X}"))
            }
        }
        Token::Whitespace(_) => dest.whitespace(),
        Token::Comment(text) => dest.write_str(&format!("/*{text}*/")),
        Token::Colon => dest.write_str(":"),
        Token::Semicolon => dest.write_str(";"),
        Token::Comma => dest.write_str(","),
        Token::IncludeMatch => dest.write_str("~="),
        Token::DashMatch => dest.write_str("|="),
        Token::PrefixMatch => dest.write_str("^="),
        Token::SuffixMatch => dest.write_str("$="),
        Token::SubstringMatch => dest.write_str("*="),
        Token::Column => dest.write_str("||"),
        Token::Cdo => dest.write_str("<!--"),
        Token::Cdc => dest.write_str("-->"),
        Token::ParenthesisBlock => dest.write_str("("),
        Token::CloseParenthesis => dest.write_str(")"),
        Token::SquareBracketBlock => dest.write_str("["),
        Token::CloseSquareBracket => dest.write_str("]"),
        Token::CurlyBracketBlock => dest.write_str("{"),
        Token::CloseCurlyBracket => dest.write_str("}"),
        Token::Eof => Ok(()),
    }
}

/// Writes a flat token list, e.g. an unparsed property value or an unknown
/// at-rule's prelude.
pub fn write_token_list<W: Write>(dest: &mut Printer<W>, tokens: &[Token]) -> fmt::Result {
    for tok in tokens {
        write_token(dest, tok)?;
    }
    Ok(())
}
