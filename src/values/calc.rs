//! `calc()` and its sibling math functions (`min`, `max`, `clamp`, `round`,
//! `mod`, `rem`, `abs`, `sign`, and the trigonometric functions), parsed by
//! a recursive-descent arithmetic parser that respects CSS operator
//! precedence and the required-whitespace rule around binary `+`/`-`.
//!
//! Evaluating a tree down to a concrete number is out of scope here; the
//! tree only needs to round-trip and to let a pure-number expression
//! collapse to the plain [`CalcNode::Number`] case.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::length::format_number;
use std::fmt::{self, Write};

/// A leaf-typed arithmetic expression tree. `T` is the dimensioned type a
/// leaf resolves to (e.g. a length-percentage); plain numbers used as
/// multipliers/divisors live in their own [`CalcNode::Number`] case instead
/// of being forced into `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcNode<T> {
    Leaf(T),
    Number(f64),
    Ident(Box<str>),
    Sum(Box<CalcNode<T>>, Box<CalcNode<T>>),
    Difference(Box<CalcNode<T>>, Box<CalcNode<T>>),
    Product(Box<CalcNode<T>>, Box<CalcNode<T>>),
    Quotient(Box<CalcNode<T>>, Box<CalcNode<T>>),
    /// Any other math function: `min`, `max`, `clamp`, `round`, `mod`,
    /// `rem`, `abs`, `sign`, `sin`, `cos`, `tan`, `asin`, `acos`, `atan`,
    /// `atan2`, `sqrt`, `pow`, `hypot`, `log`, `exp`.
    Function(Box<str>, Vec<CalcNode<T>>),
}

type LeafParser<'a, T> = dyn Fn(&mut Cursor) -> BasicParseResult<T> + 'a;

impl<T: Clone> CalcNode<T> {
    /// Parses the body of a `calc()` function whose `calc(` has already
    /// been consumed as a [`Token::Function`] and whose matching `)` the
    /// caller will close via [`Cursor::parse_nested_block`].
    pub fn parse_calc_body(cursor: &mut Cursor, leaf: &LeafParser<T>) -> BasicParseResult<Self> {
        parse_sum(cursor, leaf)
    }

    /// Parses any math function's argument list given its already-consumed,
    /// lowercased name (`min`, `clamp`, `round`, ...), body constrained to
    /// the function's parenthesis block.
    pub fn parse_function_body(name: &str, cursor: &mut Cursor, leaf: &LeafParser<T>) -> BasicParseResult<Self> {
        if name == "calc" {
            return parse_sum(cursor, leaf);
        }
        let mut args = Vec::new();
        loop {
            cursor.skip_whitespace();
            if cursor.is_exhausted() {
                break;
            }
            if let Ok(ident) = cursor.try_parse(|c| c.expect_ident()) {
                args.push(CalcNode::Ident(ident));
            } else {
                args.push(parse_sum(cursor, leaf)?);
            }
            cursor.skip_whitespace();
            let state = cursor.state();
            match cursor.next() {
                Token::Comma => continue,
                Token::Eof => break,
                _ => {
                    cursor.reset(state);
                    break;
                }
            }
        }
        Ok(CalcNode::Function(name.into(), args))
    }
}

fn err(cursor: &mut Cursor, token: Token) -> BasicParseError {
    BasicParseError::new(BasicParseErrorKind::UnexpectedToken(token), cursor.current_source_location())
}

fn parse_sum<T: Clone>(cursor: &mut Cursor, leaf: &LeafParser<T>) -> BasicParseResult<CalcNode<T>> {
    let mut node = parse_product(cursor, leaf)?;
    loop {
        let state = cursor.state();
        let op = cursor.try_parse(|c| {
            match c.next_including_whitespace() {
                Token::Whitespace(_) => {}
                other => return Err(err(c, other)),
            }
            let op = match c.next_including_whitespace() {
                Token::Delim('+') => '+',
                Token::Delim('-') => '-',
                other => return Err(err(c, other)),
            };
            match c.next_including_whitespace() {
                Token::Whitespace(_) => {}
                other => return Err(err(c, other)),
            }
            Ok(op)
        });
        match op {
            Ok('+') => {
                let rhs = parse_product(cursor, leaf)?;
                node = CalcNode::Sum(Box::new(node), Box::new(rhs));
            }
            Ok(_) => {
                let rhs = parse_product(cursor, leaf)?;
                node = CalcNode::Difference(Box::new(node), Box::new(rhs));
            }
            Err(_) => {
                cursor.reset(state);
                break;
            }
        }
    }
    Ok(node)
}

fn parse_product<T: Clone>(cursor: &mut Cursor, leaf: &LeafParser<T>) -> BasicParseResult<CalcNode<T>> {
    let mut node = parse_value(cursor, leaf)?;
    loop {
        cursor.skip_whitespace();
        let state = cursor.state();
        match cursor.next() {
            Token::Delim('*') => {
                cursor.skip_whitespace();
                let rhs = parse_value(cursor, leaf)?;
                node = CalcNode::Product(Box::new(node), Box::new(rhs));
            }
            Token::Delim('/') => {
                cursor.skip_whitespace();
                let rhs = parse_value(cursor, leaf)?;
                node = CalcNode::Quotient(Box::new(node), Box::new(rhs));
            }
            _ => {
                cursor.reset(state);
                break;
            }
        }
    }
    Ok(node)
}

fn parse_value<T: Clone>(cursor: &mut Cursor, leaf: &LeafParser<T>) -> BasicParseResult<CalcNode<T>> {
    cursor.skip_whitespace();
    if let Ok(v) = cursor.try_parse(|c| leaf(c)) {
        return Ok(CalcNode::Leaf(v));
    }
    let state = cursor.state();
    match cursor.next() {
        Token::Number(n) => Ok(CalcNode::Number(n.value)),
        Token::ParenthesisBlock => cursor.parse_nested_block(|c| parse_sum(c, leaf)),
        Token::Function(name) => {
            let lowered = name.to_ascii_lowercase();
            cursor.parse_nested_block(|c| CalcNode::parse_function_body(&lowered, c, leaf))
        }
        other => {
            cursor.reset(state);
            Err(err(cursor, other))
        }
    }
}

impl<T: ToCss> ToCss for CalcNode<T> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            CalcNode::Leaf(v) => v.to_css(dest),
            CalcNode::Number(n) => dest.write_str(&format_number(*n)),
            CalcNode::Ident(s) => dest.write_str(s),
            CalcNode::Sum(a, b) => {
                a.to_css(dest)?;
                dest.write_str(" + ")?;
                b.to_css(dest)
            }
            CalcNode::Difference(a, b) => {
                a.to_css(dest)?;
                dest.write_str(" - ")?;
                b.to_css(dest)
            }
            CalcNode::Product(a, b) => {
                a.to_css(dest)?;
                dest.write_str(" * ")?;
                b.to_css(dest)
            }
            CalcNode::Quotient(a, b) => {
                a.to_css(dest)?;
                dest.write_str(" / ")?;
                b.to_css(dest)
            }
            CalcNode::Function(name, args) => {
                dest.write_str(name)?;
                dest.write_char('(')?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        dest.write_str(", ")?;
                    }
                    arg.to_css(dest)?;
                }
                dest.write_char(')')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::dimension_percentage::DimensionPercentage;
    use crate::values::length::Length;

    fn length_percentage_leaf(cursor: &mut Cursor) -> BasicParseResult<DimensionPercentage<Length>> {
        DimensionPercentage::parse_leaf_only(cursor)
    }

    #[test]
    fn parses_subtraction_with_required_whitespace() {
        let mut c = Cursor::new("100% - 10px");
        let node = CalcNode::parse_calc_body(&mut c, &length_percentage_leaf).expect("calc body");
        match node {
            CalcNode::Difference(a, b) => {
                assert!(matches!(*a, CalcNode::Leaf(DimensionPercentage::Percentage(_))));
                assert!(matches!(*b, CalcNode::Leaf(DimensionPercentage::Dimension(_))));
            }
            other => panic!("expected difference, got {other:?}"),
        }
    }

    #[test]
    fn precedence_binds_product_tighter_than_sum() {
        let mut c = Cursor::new("1 + 2 * 3");
        let leaf = |c: &mut Cursor| -> BasicParseResult<f64> {
            let state = c.state();
            match c.next() {
                Token::Number(n) => Ok(n.value),
                other => {
                    c.reset(state);
                    Err(err(c, other))
                }
            }
        };
        // use the plain-number leaf so the whole thing lives in CalcNode<f64>
        let node = CalcNode::parse_calc_body(&mut c, &leaf).expect("calc body");
        assert!(matches!(node, CalcNode::Sum(_, _)));
    }

    #[test]
    fn min_max_clamp_parse_as_functions() {
        let mut c = Cursor::new("10px, 50%, 20px");
        let node = CalcNode::parse_function_body("clamp", &mut c, &length_percentage_leaf).expect("clamp");
        match node {
            CalcNode::Function(name, args) => {
                assert_eq!(&*name, "clamp");
                assert_eq!(args.len(), 3);
            }
            other => panic!("expected function node, got {other:?}"),
        }
    }
}
