//! The `dimension | percentage | calc(expr)` sum type that most numeric
//! properties actually accept (`width`, `margin-*`, `font-size`, ...).

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::angle::Angle;
use crate::values::calc::CalcNode;
use crate::values::length::Length;
use crate::values::percentage::Percentage;
use crate::values::time::Time;
use std::fmt::{self, Write};

/// A dimensioned type that can appear as a bare `calc()`/`dimension-
/// percentage` leaf: a plain dimension parse with no percentage handling of
/// its own (percentage is handled once, generically, by
/// [`DimensionPercentage`]).
pub trait ParseDimension: Sized + Clone {
    fn parse_dimension(cursor: &mut Cursor) -> BasicParseResult<Self>;
}

impl ParseDimension for Length {
    fn parse_dimension(cursor: &mut Cursor) -> BasicParseResult<Self> {
        Length::parse(cursor)
    }
}

impl ParseDimension for Angle {
    fn parse_dimension(cursor: &mut Cursor) -> BasicParseResult<Self> {
        Angle::parse(cursor)
    }
}

impl ParseDimension for Time {
    fn parse_dimension(cursor: &mut Cursor) -> BasicParseResult<Self> {
        Time::parse(cursor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DimensionPercentage<D> {
    Dimension(D),
    Percentage(Percentage),
    Calc(Box<CalcNode<DimensionPercentage<D>>>),
}

impl<D: ParseDimension> DimensionPercentage<D> {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        if let Ok(v) = cursor.try_parse(Self::parse_leaf_only) {
            return Ok(v);
        }
        match cursor.next() {
            Token::Function(name) if name.eq_ignore_ascii_case("calc") => {
                let node = cursor.parse_nested_block(|c| {
                    CalcNode::parse_calc_body(c, &|c: &mut Cursor| Self::parse_leaf_only(c))
                })?;
                Ok(DimensionPercentage::Calc(Box::new(node)))
            }
            other => {
                cursor.reset(state);
                Err(BasicParseError::new(
                    BasicParseErrorKind::UnexpectedToken(other),
                    cursor.current_source_location(),
                ))
            }
        }
    }

    /// Parses just the `dimension | percentage` half, used as the leaf
    /// parser inside a surrounding `calc()` tree.
    pub fn parse_leaf_only(cursor: &mut Cursor) -> BasicParseResult<Self> {
        if let Ok(p) = cursor.try_parse(Percentage::parse) {
            return Ok(DimensionPercentage::Percentage(p));
        }
        D::parse_dimension(cursor).map(DimensionPercentage::Dimension)
    }
}

impl<D: ToCss> ToCss for DimensionPercentage<D> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            DimensionPercentage::Dimension(d) => d.to_css(dest),
            DimensionPercentage::Percentage(p) => p.to_css(dest),
            DimensionPercentage::Calc(node) => {
                dest.write_str("calc(")?;
                node.to_css(dest)?;
                dest.write_char(')')
            }
        }
    }
}

pub type LengthPercentage = DimensionPercentage<Length>;
pub type AnglePercentage = DimensionPercentage<Angle>;
pub type TimePercentage = DimensionPercentage<Time>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_length() {
        let mut c = Cursor::new("10px");
        assert!(matches!(
            LengthPercentage::parse(&mut c).expect("length-percentage"),
            DimensionPercentage::Dimension(_)
        ));
    }

    #[test]
    fn parses_calc_of_percentage_and_length() {
        let mut c = Cursor::new("calc(100% - 10px)");
        let v = LengthPercentage::parse(&mut c).expect("calc");
        assert!(matches!(v, DimensionPercentage::Calc(_)));
        assert_eq!(v.to_css_string(), "calc(100% - 10px)");
    }
}
