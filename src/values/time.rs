//! `<time>` values.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::length::format_number;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    S,
    Ms,
}

impl TimeUnit {
    fn from_ident(ident: &str) -> Option<Self> {
        Some(match ident.to_ascii_lowercase().as_str() {
            "s" => TimeUnit::S,
            "ms" => TimeUnit::Ms,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::S => "s",
            TimeUnit::Ms => "ms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Time {
    pub value: f64,
    pub unit: TimeUnit,
}

impl Time {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        match cursor.next() {
            Token::Dimension(n, unit) => match TimeUnit::from_ident(&unit) {
                Some(unit) => Ok(Time { value: n.value, unit }),
                None => Err(BasicParseError::new(
                    BasicParseErrorKind::InvalidValue(unit.to_string()),
                    cursor.current_source_location(),
                )),
            },
            other => {
                cursor.reset(state);
                Err(BasicParseError::new(
                    BasicParseErrorKind::UnexpectedToken(other),
                    cursor.current_source_location(),
                ))
            }
        }
    }

    #[must_use]
    pub fn to_milliseconds(&self) -> f64 {
        match self.unit {
            TimeUnit::S => self.value * 1000.0,
            TimeUnit::Ms => self.value,
        }
    }
}

impl ToCss for Time {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(&format_number(self.value))?;
        dest.write_str(self.unit.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_and_ms() {
        let mut c = Cursor::new("2s");
        assert_eq!(Time::parse(&mut c).expect("time").to_milliseconds(), 2000.0);
        let mut c = Cursor::new("250ms");
        assert_eq!(Time::parse(&mut c).expect("time").to_milliseconds(), 250.0);
    }
}
