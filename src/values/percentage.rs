//! `<percentage>`, stored as the entered numeric value divided by 100 so
//! that `50%` is held as `0.5`.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::length::format_number;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(pub f64);

impl Percentage {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        match cursor.next() {
            Token::Percentage(n) => Ok(Percentage(n.value / 100.0)),
            other => {
                cursor.reset(state);
                Err(BasicParseError::new(
                    BasicParseErrorKind::UnexpectedToken(other),
                    cursor.current_source_location(),
                ))
            }
        }
    }
}

impl ToCss for Percentage {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(&format_number(self.0 * 100.0))?;
        dest.write_char('%')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_stores_divided() {
        let mut c = Cursor::new("50%");
        assert_eq!(Percentage::parse(&mut c).expect("pct"), Percentage(0.5));
    }

    #[test]
    fn round_trips() {
        let p = Percentage(0.5);
        assert_eq!(p.to_css_string(), "50%");
    }
}
