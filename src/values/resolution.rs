//! `<resolution>` values.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::length::format_number;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionUnit {
    Dpi,
    Dpcm,
    Dppx,
    X,
}

impl ResolutionUnit {
    fn from_ident(ident: &str) -> Option<Self> {
        Some(match ident.to_ascii_lowercase().as_str() {
            "dpi" => ResolutionUnit::Dpi,
            "dpcm" => ResolutionUnit::Dpcm,
            "dppx" => ResolutionUnit::Dppx,
            "x" => ResolutionUnit::X,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionUnit::Dpi => "dpi",
            ResolutionUnit::Dpcm => "dpcm",
            ResolutionUnit::Dppx => "dppx",
            ResolutionUnit::X => "x",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub value: f64,
    pub unit: ResolutionUnit,
}

impl Resolution {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        match cursor.next() {
            Token::Dimension(n, unit) => match ResolutionUnit::from_ident(&unit) {
                Some(unit) => Ok(Resolution { value: n.value, unit }),
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
}

impl ToCss for Resolution {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(&format_number(self.value))?;
        dest.write_str(self.unit.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dppx() {
        let mut c = Cursor::new("2dppx");
        assert_eq!(
            Resolution::parse(&mut c).expect("resolution"),
            Resolution { value: 2.0, unit: ResolutionUnit::Dppx }
        );
    }
}
