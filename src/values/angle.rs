//! `<angle>` values.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::length::format_number;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Deg,
    Grad,
    Rad,
    Turn,
}

impl AngleUnit {
    fn from_ident(ident: &str) -> Option<Self> {
        Some(match ident.to_ascii_lowercase().as_str() {
            "deg" => AngleUnit::Deg,
            "grad" => AngleUnit::Grad,
            "rad" => AngleUnit::Rad,
            "turn" => AngleUnit::Turn,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleUnit::Deg => "deg",
            AngleUnit::Grad => "grad",
            AngleUnit::Rad => "rad",
            AngleUnit::Turn => "turn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        match cursor.next() {
            Token::Dimension(n, unit) => match AngleUnit::from_ident(&unit) {
                Some(unit) => Ok(Angle { value: n.value, unit }),
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
    pub fn to_degrees(&self) -> f64 {
        match self.unit {
            AngleUnit::Deg => self.value,
            AngleUnit::Grad => self.value * 0.9,
            AngleUnit::Rad => self.value.to_degrees(),
            AngleUnit::Turn => self.value * 360.0,
        }
    }
}

impl ToCss for Angle {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(&format_number(self.value))?;
        dest.write_str(self.unit.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_degrees() {
        let mut c = Cursor::new("45deg");
        let a = Angle::parse(&mut c).expect("angle");
        assert_eq!(a.to_degrees(), 45.0);
    }

    #[test]
    fn turn_converts() {
        let mut c = Cursor::new("0.5turn");
        let a = Angle::parse(&mut c).expect("angle");
        assert_eq!(a.to_degrees(), 180.0);
    }
}
