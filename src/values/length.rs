//! `<length>` values: a magnitude plus one of the CSS Values 4 length units.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use std::fmt::{self, Write};

/// Every unit `<length>` recognizes, absolute and relative alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    Em,
    Rem,
    Ex,
    Rex,
    Ch,
    Rch,
    Cap,
    Rcap,
    Ic,
    Ric,
    Lh,
    Rlh,
    Vw,
    Vh,
    Vi,
    Vb,
    Vmin,
    Vmax,
    Svw,
    Svh,
    Lvw,
    Lvh,
    Dvw,
    Dvh,
    Cqw,
    Cqh,
    Cqi,
    Cqb,
    Cqmin,
    Cqmax,
    Cm,
    Mm,
    Q,
    In,
    Pt,
    Pc,
}

impl LengthUnit {
    fn from_ident(ident: &str) -> Option<Self> {
        use LengthUnit::*;
        Some(match ident.to_ascii_lowercase().as_str() {
            "px" => Px,
            "em" => Em,
            "rem" => Rem,
            "ex" => Ex,
            "rex" => Rex,
            "ch" => Ch,
            "rch" => Rch,
            "cap" => Cap,
            "rcap" => Rcap,
            "ic" => Ic,
            "ric" => Ric,
            "lh" => Lh,
            "rlh" => Rlh,
            "vw" => Vw,
            "vh" => Vh,
            "vi" => Vi,
            "vb" => Vb,
            "vmin" => Vmin,
            "vmax" => Vmax,
            "svw" => Svw,
            "svh" => Svh,
            "lvw" => Lvw,
            "lvh" => Lvh,
            "dvw" => Dvw,
            "dvh" => Dvh,
            "cqw" => Cqw,
            "cqh" => Cqh,
            "cqi" => Cqi,
            "cqb" => Cqb,
            "cqmin" => Cqmin,
            "cqmax" => Cqmax,
            "cm" => Cm,
            "mm" => Mm,
            "q" => Q,
            "in" => In,
            "pt" => Pt,
            "pc" => Pc,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        use LengthUnit::*;
        match self {
            Px => "px",
            Em => "em",
            Rem => "rem",
            Ex => "ex",
            Rex => "rex",
            Ch => "ch",
            Rch => "rch",
            Cap => "cap",
            Rcap => "rcap",
            Ic => "ic",
            Ric => "ric",
            Lh => "lh",
            Rlh => "rlh",
            Vw => "vw",
            Vh => "vh",
            Vi => "vi",
            Vb => "vb",
            Vmin => "vmin",
            Vmax => "vmax",
            Svw => "svw",
            Svh => "svh",
            Lvw => "lvw",
            Lvh => "lvh",
            Dvw => "dvw",
            Dvh => "dvh",
            Cqw => "cqw",
            Cqh => "cqh",
            Cqi => "cqi",
            Cqb => "cqb",
            Cqmin => "cqmin",
            Cqmax => "cqmax",
            Cm => "cm",
            Mm => "mm",
            Q => "q",
            In => "in",
            Pt => "pt",
            Pc => "pc",
        }
    }
}

/// A `<length>`: magnitude plus unit. `0` with no unit is accepted only by
/// callers that opt in via [`Length::parse_allow_unitless_zero`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        Self::parse_allow_unitless_zero(cursor, false)
    }

    pub fn parse_allow_unitless_zero(cursor: &mut Cursor, allow_unitless_zero: bool) -> BasicParseResult<Self> {
        let state = cursor.state();
        match cursor.next() {
            Token::Dimension(n, unit) => match LengthUnit::from_ident(&unit) {
                Some(unit) => Ok(Length { value: n.value, unit }),
                None => Err(BasicParseError::new(
                    BasicParseErrorKind::InvalidValue(unit.to_string()),
                    cursor.current_source_location(),
                )),
            },
            Token::Number(n) if allow_unitless_zero && n.value == 0.0 => Ok(Length {
                value: 0.0,
                unit: LengthUnit::Px,
            }),
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

impl ToCss for Length {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(&format_number(self.value))?;
        dest.write_str(self.unit.as_str())
    }
}

/// Formats a number the way the serializer wants numerics to come out when
/// there is no preserved textual repr to round-trip: minimal form, `-0`
/// preserved, a trailing `.0` only when callers ask for integral-looking
/// floats to stay visibly fractional (most CSS numerics don't).
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 && value.is_sign_negative() {
        return "-0".to_string();
    }
    let mut s = format!("{value}");
    if let Some(stripped) = s.strip_suffix(".0") {
        s = stripped.to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_px() {
        let mut c = Cursor::new("10px");
        let len = Length::parse(&mut c).expect("length");
        assert_eq!(len, Length { value: 10.0, unit: LengthUnit::Px });
    }

    #[test]
    fn rejects_unknown_unit() {
        let mut c = Cursor::new("10zz");
        assert!(Length::parse(&mut c).is_err());
    }

    #[test]
    fn unitless_zero_opt_in() {
        let mut c = Cursor::new("0");
        assert!(Length::parse(&mut c).is_err());
        let mut c = Cursor::new("0");
        assert!(Length::parse_allow_unitless_zero(&mut c, true).is_ok());
    }
}
