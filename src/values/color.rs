//! `<color>` values: named keywords, hex notation, the legacy and modern
//! `rgb()`/`hsl()`/`hwb()` functional notations, the newer `lab()`/`lch()`/
//! `oklab()`/`oklch()` and `color()` predicate-space forms, `color-mix()`,
//! and relative-color syntax (`rgb(from <color> ...)`).
//!
//! Percentages and `none` components are preserved as entered rather than
//! resolved to a concrete number, since resolution needs a current color and
//! a target colorspace that only a caller downstream of this crate has.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::angle::Angle;
use crate::values::calc::CalcNode;
use lazy_static::lazy_static;
use std::fmt::{self, Write};

/// A single channel inside a color function: a plain number, a percentage
/// (stored as entered, *not* divided by 100 the way [`crate::values::percentage::Percentage`]
/// is, since color percentages mean different things per channel), the
/// `none` keyword, or a `calc()` expression over a plain number.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    Number(f64),
    Percentage(f64),
    None,
    Calc(Box<CalcNode<f64>>),
    /// A bare identifier, meaningful only inside relative-color syntax
    /// (`rgb(from <color> r g b)`), where it names a channel of the origin
    /// color (`r`, `g`, `b`, `h`, `s`, `l`, `w`, `a`/`alpha`, `x`, `y`, `z`, ...).
    Ident(Box<str>),
}

impl ComponentValue {
    fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        match cursor.next() {
            Token::Number(n) => Ok(ComponentValue::Number(n.value)),
            Token::Percentage(n) => Ok(ComponentValue::Percentage(n.value)),
            Token::Ident(s) if s.eq_ignore_ascii_case("none") => Ok(ComponentValue::None),
            Token::Ident(s) => Ok(ComponentValue::Ident(s)),
            Token::Function(name) if name.eq_ignore_ascii_case("calc") => {
                let node = cursor.parse_nested_block(|c| CalcNode::parse_calc_body(c, &number_leaf))?;
                Ok(ComponentValue::Calc(Box::new(node)))
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

    /// Parses a hue channel: a plain number (degrees) or an `<angle>`.
    fn parse_hue(cursor: &mut Cursor) -> BasicParseResult<Self> {
        if let Ok(angle) = cursor.try_parse(Angle::parse) {
            return Ok(ComponentValue::Number(angle.to_degrees()));
        }
        Self::parse(cursor)
    }
}

impl ToCss for ComponentValue {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            ComponentValue::Number(n) => dest.write_str(&crate::values::length::format_number(*n)),
            ComponentValue::Percentage(p) => {
                dest.write_str(&crate::values::length::format_number(*p))?;
                dest.write_char('%')
            }
            ComponentValue::None => dest.write_str("none"),
            ComponentValue::Ident(s) => dest.write_str(s),
            ComponentValue::Calc(node) => {
                dest.write_str("calc(")?;
                node.to_css(dest)?;
                dest.write_char(')')
            }
        }
    }
}

impl ToCss for f64 {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(&crate::values::length::format_number(*self))
    }
}

fn number_leaf(cursor: &mut Cursor) -> BasicParseResult<f64> {
    let state = cursor.state();
    match cursor.next() {
        Token::Number(n) => Ok(n.value),
        other => {
            cursor.reset(state);
            Err(BasicParseError::new(
                BasicParseErrorKind::UnexpectedToken(other),
                cursor.current_source_location(),
            ))
        }
    }
}

/// Three color channels plus an optional alpha, shared shape for every
/// `rgb()`/`hsl()`/`hwb()`/`lab()`/`lch()`/`oklab()`/`oklch()` function.
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    pub c1: ComponentValue,
    pub c2: ComponentValue,
    pub c3: ComponentValue,
    pub alpha: Option<ComponentValue>,
}

impl ToCss for Components {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        self.c1.to_css(dest)?;
        dest.write_char(' ')?;
        self.c2.to_css(dest)?;
        dest.write_char(' ')?;
        self.c3.to_css(dest)?;
        if let Some(alpha) = &self.alpha {
            dest.write_str(" / ")?;
            alpha.to_css(dest)?;
        }
        Ok(())
    }
}

/// The `<colorspace>` tag accepted inside `color(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedColorSpace {
    Srgb,
    SrgbLinear,
    DisplayP3,
    A98Rgb,
    ProphotoRgb,
    Rec2020,
    XyzD50,
    Xyz,
    XyzD65,
}

impl PredefinedColorSpace {
    fn from_ident(ident: &str) -> Option<Self> {
        Some(match ident.to_ascii_lowercase().as_str() {
            "srgb" => Self::Srgb,
            "srgb-linear" => Self::SrgbLinear,
            "display-p3" => Self::DisplayP3,
            "a98-rgb" => Self::A98Rgb,
            "prophoto-rgb" => Self::ProphotoRgb,
            "rec2020" => Self::Rec2020,
            "xyz-d50" => Self::XyzD50,
            "xyz" => Self::Xyz,
            "xyz-d65" => Self::XyzD65,
            _ => return None,
        })
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::SrgbLinear => "srgb-linear",
            Self::DisplayP3 => "display-p3",
            Self::A98Rgb => "a98-rgb",
            Self::ProphotoRgb => "prophoto-rgb",
            Self::Rec2020 => "rec2020",
            Self::XyzD50 => "xyz-d50",
            Self::Xyz => "xyz",
            Self::XyzD65 => "xyz-d65",
        }
    }
}

/// A `<color>`, preserving how it was written rather than resolving it to a
/// concrete sRGB value: downstream layout/paint code needs the original
/// components (percentages, `none`, relative-color origins) to do that
/// resolution against a current color and target colorspace.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    CurrentColor,
    Transparent,
    /// A named CSS color keyword, resolved eagerly to its sRGB bytes since
    /// the keyword table is static and never depends on context.
    Named(&'static str, [u8; 3]),
    /// `#rgb` / `#rrggbb` / `#rgba` / `#rrggbbaa`.
    Hex([u8; 4]),
    Rgb(Components),
    Hsl(Components),
    Hwb(Components),
    Lab(Components),
    Lch(Components),
    Oklab(Components),
    Oklch(Components),
    Predefined {
        space: PredefinedColorSpace,
        components: Components,
    },
    ColorMix {
        space: Box<str>,
        left: (Box<Color>, Option<f64>),
        right: (Box<Color>, Option<f64>),
    },
    /// `rgb(from <color> <c1> <c2> <c3> [/ <alpha>])` and its `hsl`/`hwb`/
    /// `lab`/`lch`/`oklab`/`oklch`/`color` siblings. `function` is the
    /// lowercased function name driving which colorspace the channels mean.
    RelativeColor {
        function: Box<str>,
        origin: Box<Color>,
        components: Components,
    },
}

impl Color {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        match cursor.next() {
            Token::Hash(s) | Token::IdHash(s) => parse_hex(&s).ok_or_else(|| {
                BasicParseError::new(
                    BasicParseErrorKind::InvalidValue(s.to_string()),
                    cursor.current_source_location(),
                )
            }),
            Token::Ident(s) => {
                if s.eq_ignore_ascii_case("currentcolor") {
                    return Ok(Color::CurrentColor);
                }
                if s.eq_ignore_ascii_case("transparent") {
                    return Ok(Color::Transparent);
                }
                named_color(&s).ok_or_else(|| {
                    BasicParseError::new(
                        BasicParseErrorKind::InvalidValue(s.to_string()),
                        cursor.current_source_location(),
                    )
                })
            }
            Token::Function(name) => {
                let lowered = name.to_ascii_lowercase();
                cursor.parse_nested_block(|c| parse_color_function(&lowered, c))
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
}

fn parse_color_function(name: &str, cursor: &mut Cursor) -> BasicParseResult<Color> {
    match name {
        "rgb" | "rgba" => parse_rgb_like(cursor, name, Color::Rgb),
        "hsl" | "hsla" => parse_hue_like(cursor, name, Color::Hsl),
        "hwb" => parse_hue_like(cursor, name, Color::Hwb),
        "lab" => parse_space_separated(cursor, name, Color::Lab),
        "lch" => parse_lch_like(cursor, name, Color::Lch),
        "oklab" => parse_space_separated(cursor, name, Color::Oklab),
        "oklch" => parse_lch_like(cursor, name, Color::Oklch),
        "color" => parse_predefined(cursor),
        "color-mix" => parse_color_mix(cursor),
        _ => Err(BasicParseError::new(
            BasicParseErrorKind::InvalidValue(name.to_string()),
            cursor.current_source_location(),
        )),
    }
}

/// `rgb()`/`rgba()`: legacy comma-separated numbers/percentages, or modern
/// space-separated with an optional `/ alpha`, or `rgb(from <color> ...)`.
fn parse_rgb_like(
    cursor: &mut Cursor,
    name: &str,
    ctor: impl Fn(Components) -> Color,
) -> BasicParseResult<Color> {
    if let Some(relative) = try_parse_relative(cursor, name, ComponentValue::parse)? {
        return Ok(relative);
    }
    let legacy = cursor.try_parse(|c| {
        c.skip_whitespace();
        let c1 = ComponentValue::parse(c)?;
        c.skip_whitespace();
        c.expect_comma()?;
        c.skip_whitespace();
        let c2 = ComponentValue::parse(c)?;
        c.skip_whitespace();
        c.expect_comma()?;
        c.skip_whitespace();
        let c3 = ComponentValue::parse(c)?;
        c.skip_whitespace();
        let alpha = if c.try_parse(|c| c.expect_comma()).is_ok() {
            c.skip_whitespace();
            Some(ComponentValue::parse(c)?)
        } else {
            None
        };
        Ok(Components { c1, c2, c3, alpha })
    });
    if let Ok(components) = legacy {
        return Ok(ctor(components));
    }
    parse_space_separated(cursor, name, ctor)
}

fn parse_hue_like(cursor: &mut Cursor, name: &str, ctor: impl Fn(Components) -> Color) -> BasicParseResult<Color> {
    if let Some(relative) = try_parse_relative(cursor, name, ComponentValue::parse)? {
        return Ok(relative);
    }
    cursor.skip_whitespace();
    let c1 = ComponentValue::parse_hue(cursor)?;
    cursor.skip_whitespace();
    let legacy_comma = cursor.try_parse(|c| c.expect_comma()).is_ok();
    cursor.skip_whitespace();
    let c2 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    if legacy_comma {
        cursor.expect_comma()?;
        cursor.skip_whitespace();
    }
    let c3 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let alpha = parse_trailing_alpha(cursor, legacy_comma)?;
    Ok(ctor(Components { c1, c2, c3, alpha }))
}

fn parse_lch_like(cursor: &mut Cursor, name: &str, ctor: impl Fn(Components) -> Color) -> BasicParseResult<Color> {
    if let Some(relative) = try_parse_relative(cursor, name, ComponentValue::parse)? {
        return Ok(relative);
    }
    cursor.skip_whitespace();
    let c1 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let c2 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let c3 = ComponentValue::parse_hue(cursor)?;
    cursor.skip_whitespace();
    let alpha = parse_trailing_alpha(cursor, false)?;
    Ok(ctor(Components { c1, c2, c3, alpha }))
}

fn parse_space_separated(cursor: &mut Cursor, name: &str, ctor: impl Fn(Components) -> Color) -> BasicParseResult<Color> {
    if let Some(relative) = try_parse_relative(cursor, name, ComponentValue::parse)? {
        return Ok(relative);
    }
    cursor.skip_whitespace();
    let c1 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let c2 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let c3 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let alpha = parse_trailing_alpha(cursor, false)?;
    Ok(ctor(Components { c1, c2, c3, alpha }))
}

fn parse_trailing_alpha(cursor: &mut Cursor, legacy_comma: bool) -> BasicParseResult<Option<ComponentValue>> {
    if legacy_comma {
        if cursor.try_parse(|c| c.expect_comma()).is_ok() {
            cursor.skip_whitespace();
            return Ok(Some(ComponentValue::parse(cursor)?));
        }
        return Ok(None);
    }
    let state = cursor.state();
    if matches!(cursor.next(), Token::Delim('/')) {
        cursor.skip_whitespace();
        return Ok(Some(ComponentValue::parse(cursor)?));
    }
    cursor.reset(state);
    Ok(None)
}

fn parse_predefined(cursor: &mut Cursor) -> BasicParseResult<Color> {
    if let Some(relative) = try_parse_relative(cursor, "color", ComponentValue::parse)? {
        return Ok(relative);
    }
    cursor.skip_whitespace();
    let ident = cursor.expect_ident()?;
    let space = PredefinedColorSpace::from_ident(&ident).ok_or_else(|| {
        BasicParseError::new(
            BasicParseErrorKind::InvalidValue(ident.to_string()),
            cursor.current_source_location(),
        )
    })?;
    cursor.skip_whitespace();
    let c1 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let c2 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let c3 = ComponentValue::parse(cursor)?;
    cursor.skip_whitespace();
    let alpha = parse_trailing_alpha(cursor, false)?;
    Ok(Color::Predefined {
        space,
        components: Components { c1, c2, c3, alpha },
    })
}

/// `color-mix(in <space>[ <hue-interpolation-method>], <color> [<pct>]?, <color> [<pct>]?)`.
fn parse_color_mix(cursor: &mut Cursor) -> BasicParseResult<Color> {
    cursor.skip_whitespace();
    cursor.expect_ident_matching("in")?;
    cursor.skip_whitespace();
    let mut space = cursor.expect_ident()?.to_string();
    // an optional hue interpolation method (`shorter hue`, `longer hue`, ...)
    // following the space name; preserved verbatim as part of the tag.
    loop {
        let state = cursor.state();
        cursor.skip_whitespace();
        match cursor.try_parse(|c| c.expect_ident()) {
            Ok(word) if word.eq_ignore_ascii_case("hue") => {
                space.push(' ');
                space.push_str(&word);
            }
            Ok(word) => {
                space.push(' ');
                space.push_str(&word);
            }
            Err(_) => {
                cursor.reset(state);
                break;
            }
        }
        let state = cursor.state();
        if matches!(cursor.next(), Token::Comma) {
            break;
        }
        cursor.reset(state);
    }
    cursor.skip_whitespace();
    cursor.expect_comma()?;
    let left = parse_mix_component(cursor)?;
    cursor.skip_whitespace();
    cursor.expect_comma()?;
    let right = parse_mix_component(cursor)?;
    Ok(Color::ColorMix {
        space: space.into(),
        left,
        right,
    })
}

fn parse_mix_component(cursor: &mut Cursor) -> BasicParseResult<(Box<Color>, Option<f64>)> {
    cursor.skip_whitespace();
    let color = Color::parse(cursor)?;
    cursor.skip_whitespace();
    let pct = cursor.try_parse(|c| c.expect_percentage()).ok();
    Ok((Box::new(color), pct))
}

/// `<fn>(from <color> <c1> <c2> <c3> [/ <alpha>])`. Tried first inside every
/// functional-notation parser since it shares the `from` keyword across all
/// of `rgb`/`hsl`/`hwb`/`lab`/`lch`/`oklab`/`oklch`/`color`.
fn try_parse_relative(
    cursor: &mut Cursor,
    name: &str,
    channel: impl Fn(&mut Cursor) -> BasicParseResult<ComponentValue> + Copy,
) -> BasicParseResult<Option<Color>> {
    let attempt = cursor.try_parse(|c| {
        c.skip_whitespace();
        c.expect_ident_matching("from")?;
        c.skip_whitespace();
        let origin = Color::parse(c)?;
        c.skip_whitespace();
        // `color(from <color> <space> c1 c2 c3 ...)` has an extra colorspace
        // ident before the channels; every other function goes straight to channels.
        if name == "color" {
            let _space = c.expect_ident()?;
            c.skip_whitespace();
        }
        let c1 = channel(c)?;
        c.skip_whitespace();
        let c2 = channel(c)?;
        c.skip_whitespace();
        let c3 = channel(c)?;
        c.skip_whitespace();
        let alpha = parse_trailing_alpha(c, false)?;
        Ok((origin, Components { c1, c2, c3, alpha }))
    });
    match attempt {
        Ok((origin, components)) => Ok(Some(Color::RelativeColor {
            function: name.into(),
            origin: Box::new(origin),
            components,
        })),
        Err(_) => Ok(None),
    }
}

fn parse_hex(s: &str) -> Option<Color> {
    let digit = |c: u8| -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    };
    let bytes = s.as_bytes();
    let byte2 = |i: usize| -> Option<u8> { Some(digit(bytes[i])? * 16 + digit(bytes[i + 1])?) };
    let byte1 = |i: usize| -> Option<u8> {
        let d = digit(bytes[i])?;
        Some(d * 16 + d)
    };
    match bytes.len() {
        3 => Some(Color::Hex([byte1(0)?, byte1(1)?, byte1(2)?, 255])),
        4 => Some(Color::Hex([byte1(0)?, byte1(1)?, byte1(2)?, byte1(3)?])),
        6 => Some(Color::Hex([byte2(0)?, byte2(2)?, byte2(4)?, 255])),
        8 => Some(Color::Hex([byte2(0)?, byte2(2)?, byte2(4)?, byte2(6)?])),
        _ => None,
    }
}

fn named_color(ident: &str) -> Option<Color> {
    let lower = ident.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, ..)| *name == lower)
        .map(|&(name, r, g, b)| Color::Named(name, [r, g, b]))
}

impl ToCss for Color {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            Color::CurrentColor => dest.write_str("currentcolor"),
            Color::Transparent => dest.write_str("transparent"),
            Color::Named(name, _) => dest.write_str(name),
            Color::Hex([r, g, b, a]) => {
                if *a == 255 {
                    dest.write_str(&format!("#{r:02x}{g:02x}{b:02x}"))
                } else {
                    dest.write_str(&format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
                }
            }
            Color::Rgb(c) => write_function(dest, "rgb", c),
            Color::Hsl(c) => write_function(dest, "hsl", c),
            Color::Hwb(c) => write_function(dest, "hwb", c),
            Color::Lab(c) => write_function(dest, "lab", c),
            Color::Lch(c) => write_function(dest, "lch", c),
            Color::Oklab(c) => write_function(dest, "oklab", c),
            Color::Oklch(c) => write_function(dest, "oklch", c),
            Color::Predefined { space, components } => {
                dest.write_str("color(")?;
                dest.write_str(space.as_str())?;
                dest.write_char(' ')?;
                components.to_css(dest)?;
                dest.write_char(')')
            }
            Color::ColorMix { space, left, right } => {
                dest.write_str("color-mix(in ")?;
                dest.write_str(space)?;
                dest.write_str(", ")?;
                write_mix_component(dest, left)?;
                dest.write_str(", ")?;
                write_mix_component(dest, right)?;
                dest.write_char(')')
            }
            Color::RelativeColor {
                function,
                origin,
                components,
            } => {
                dest.write_str(function)?;
                dest.write_str("(from ")?;
                origin.to_css(dest)?;
                dest.write_char(' ')?;
                components.to_css(dest)?;
                dest.write_char(')')
            }
        }
    }
}

fn write_function<W: Write>(dest: &mut Printer<W>, name: &str, components: &Components) -> fmt::Result {
    dest.write_str(name)?;
    dest.write_char('(')?;
    components.to_css(dest)?;
    dest.write_char(')')
}

fn write_mix_component<W: Write>(dest: &mut Printer<W>, component: &(Box<Color>, Option<f64>)) -> fmt::Result {
    component.0.to_css(dest)?;
    if let Some(pct) = component.1 {
        dest.write_char(' ')?;
        dest.write_str(&crate::values::length::format_number(pct * 100.0))?;
        dest.write_char('%')?;
    }
    Ok(())
}

lazy_static! {
    static ref NAMED_COLORS: &'static [(&'static str, u8, u8, u8)] = &[
        ("aliceblue", 240, 248, 255),
        ("antiquewhite", 250, 235, 215),
        ("aqua", 0, 255, 255),
        ("aquamarine", 127, 255, 212),
        ("azure", 240, 255, 255),
        ("beige", 245, 245, 220),
        ("bisque", 255, 228, 196),
        ("black", 0, 0, 0),
        ("blanchedalmond", 255, 235, 205),
        ("blue", 0, 0, 255),
        ("blueviolet", 138, 43, 226),
        ("brown", 165, 42, 42),
        ("burlywood", 222, 184, 135),
        ("cadetblue", 95, 158, 160),
        ("chartreuse", 127, 255, 0),
        ("chocolate", 210, 105, 30),
        ("coral", 255, 127, 80),
        ("cornflowerblue", 100, 149, 237),
        ("cornsilk", 255, 248, 220),
        ("crimson", 220, 20, 60),
        ("cyan", 0, 255, 255),
        ("darkblue", 0, 0, 139),
        ("darkcyan", 0, 139, 139),
        ("darkgoldenrod", 184, 134, 11),
        ("darkgray", 169, 169, 169),
        ("darkgreen", 0, 100, 0),
        ("darkgrey", 169, 169, 169),
        ("darkkhaki", 189, 183, 107),
        ("darkmagenta", 139, 0, 139),
        ("darkolivegreen", 85, 107, 47),
        ("darkorange", 255, 140, 0),
        ("darkorchid", 153, 50, 204),
        ("darkred", 139, 0, 0),
        ("darksalmon", 233, 150, 122),
        ("darkseagreen", 143, 188, 143),
        ("darkslateblue", 72, 61, 139),
        ("darkslategray", 47, 79, 79),
        ("darkslategrey", 47, 79, 79),
        ("darkturquoise", 0, 206, 209),
        ("darkviolet", 148, 0, 211),
        ("deeppink", 255, 20, 147),
        ("deepskyblue", 0, 191, 255),
        ("dimgray", 105, 105, 105),
        ("dimgrey", 105, 105, 105),
        ("dodgerblue", 30, 144, 255),
        ("firebrick", 178, 34, 34),
        ("floralwhite", 255, 250, 240),
        ("forestgreen", 34, 139, 34),
        ("fuchsia", 255, 0, 255),
        ("gainsboro", 220, 220, 220),
        ("ghostwhite", 248, 248, 255),
        ("gold", 255, 215, 0),
        ("goldenrod", 218, 165, 32),
        ("gray", 128, 128, 128),
        ("green", 0, 128, 0),
        ("greenyellow", 173, 255, 47),
        ("grey", 128, 128, 128),
        ("honeydew", 240, 255, 240),
        ("hotpink", 255, 105, 180),
        ("indianred", 205, 92, 92),
        ("indigo", 75, 0, 130),
        ("ivory", 255, 255, 240),
        ("khaki", 240, 230, 140),
        ("lavender", 230, 230, 250),
        ("lavenderblush", 255, 240, 245),
        ("lawngreen", 124, 252, 0),
        ("lemonchiffon", 255, 250, 205),
        ("lightblue", 173, 216, 230),
        ("lightcoral", 240, 128, 128),
        ("lightcyan", 224, 255, 255),
        ("lightgoldenrodyellow", 250, 250, 210),
        ("lightgray", 211, 211, 211),
        ("lightgreen", 144, 238, 144),
        ("lightgrey", 211, 211, 211),
        ("lightpink", 255, 182, 193),
        ("lightsalmon", 255, 160, 122),
        ("lightseagreen", 32, 178, 170),
        ("lightskyblue", 135, 206, 250),
        ("lightslategray", 119, 136, 153),
        ("lightslategrey", 119, 136, 153),
        ("lightsteelblue", 176, 196, 222),
        ("lightyellow", 255, 255, 224),
        ("lime", 0, 255, 0),
        ("limegreen", 50, 205, 50),
        ("linen", 250, 240, 230),
        ("magenta", 255, 0, 255),
        ("maroon", 128, 0, 0),
        ("mediumaquamarine", 102, 205, 170),
        ("mediumblue", 0, 0, 205),
        ("mediumorchid", 186, 85, 211),
        ("mediumpurple", 147, 112, 219),
        ("mediumseagreen", 60, 179, 113),
        ("mediumslateblue", 123, 104, 238),
        ("mediumspringgreen", 0, 250, 154),
        ("mediumturquoise", 72, 209, 204),
        ("mediumvioletred", 199, 21, 133),
        ("midnightblue", 25, 25, 112),
        ("mintcream", 245, 255, 250),
        ("mistyrose", 255, 228, 225),
        ("moccasin", 255, 228, 181),
        ("navajowhite", 255, 222, 173),
        ("navy", 0, 0, 128),
        ("oldlace", 253, 245, 230),
        ("olive", 128, 128, 0),
        ("olivedrab", 107, 142, 35),
        ("orange", 255, 165, 0),
        ("orangered", 255, 69, 0),
        ("orchid", 218, 112, 214),
        ("palegoldenrod", 238, 232, 170),
        ("palegreen", 152, 251, 152),
        ("paleturquoise", 175, 238, 238),
        ("palevioletred", 219, 112, 147),
        ("papayawhip", 255, 239, 213),
        ("peachpuff", 255, 218, 185),
        ("peru", 205, 133, 63),
        ("pink", 255, 192, 203),
        ("plum", 221, 160, 221),
        ("powderblue", 176, 224, 230),
        ("purple", 128, 0, 128),
        ("red", 255, 0, 0),
        ("rosybrown", 188, 143, 143),
        ("royalblue", 65, 105, 225),
        ("saddlebrown", 139, 69, 19),
        ("salmon", 250, 128, 114),
        ("sandybrown", 244, 164, 96),
        ("seagreen", 46, 139, 87),
        ("seashell", 255, 245, 238),
        ("sienna", 160, 82, 45),
        ("silver", 192, 192, 192),
        ("skyblue", 135, 206, 235),
        ("slateblue", 106, 90, 205),
        ("slategray", 112, 128, 144),
        ("slategrey", 112, 128, 144),
        ("snow", 255, 250, 250),
        ("springgreen", 0, 255, 127),
        ("steelblue", 70, 130, 180),
        ("tan", 210, 180, 140),
        ("teal", 0, 128, 128),
        ("thistle", 216, 191, 216),
        ("tomato", 255, 99, 71),
        ("turquoise", 64, 224, 208),
        ("violet", 238, 130, 238),
        ("wheat", 245, 222, 179),
        ("white", 255, 255, 255),
        ("whitesmoke", 245, 245, 245),
        ("yellow", 255, 255, 0),
        ("yellowgreen", 154, 205, 50),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_color() {
        let mut c = Cursor::new("red");
        assert_eq!(Color::parse(&mut c).expect("color"), Color::Named("red", [255, 0, 0]));
    }

    #[test]
    fn parses_short_and_long_hex() {
        let mut c = Cursor::new("#fff");
        assert_eq!(Color::parse(&mut c).expect("hex"), Color::Hex([255, 255, 255, 255]));
        let mut c = Cursor::new("#11223344");
        assert_eq!(Color::parse(&mut c).expect("hex"), Color::Hex([0x11, 0x22, 0x33, 0x44]));
    }

    #[test]
    fn parses_legacy_comma_rgb() {
        let mut c = Cursor::new("rgb(1, 2, 3)");
        let color = Color::parse(&mut c).expect("rgb");
        match color {
            Color::Rgb(comp) => {
                assert_eq!(comp.c1, ComponentValue::Number(1.0));
                assert_eq!(comp.alpha, None);
            }
            other => panic!("expected rgb, got {other:?}"),
        }
    }

    #[test]
    fn parses_modern_space_separated_rgb_with_alpha() {
        let mut c = Cursor::new("rgb(1 2 3 / 50%)");
        let color = Color::parse(&mut c).expect("rgb");
        match color {
            Color::Rgb(comp) => assert_eq!(comp.alpha, Some(ComponentValue::Percentage(50.0))),
            other => panic!("expected rgb, got {other:?}"),
        }
    }

    #[test]
    fn parses_hsl_with_none_component() {
        let mut c = Cursor::new("hsl(none 50% 50%)");
        let color = Color::parse(&mut c).expect("hsl");
        match color {
            Color::Hsl(comp) => assert_eq!(comp.c1, ComponentValue::None),
            other => panic!("expected hsl, got {other:?}"),
        }
    }

    #[test]
    fn parses_color_function_with_colorspace() {
        let mut c = Cursor::new("color(display-p3 1 0.5 0 / 0.8)");
        let color = Color::parse(&mut c).expect("color()");
        match color {
            Color::Predefined { space, components } => {
                assert_eq!(space, PredefinedColorSpace::DisplayP3);
                assert_eq!(components.alpha, Some(ComponentValue::Number(0.8)));
            }
            other => panic!("expected predefined color, got {other:?}"),
        }
    }

    #[test]
    fn parses_color_mix() {
        let mut c = Cursor::new("color-mix(in srgb, red 40%, blue)");
        let color = Color::parse(&mut c).expect("color-mix");
        match color {
            Color::ColorMix { space, left, right } => {
                assert_eq!(&*space, "srgb");
                assert_eq!(left.1, Some(0.4));
                assert_eq!(right.1, None);
            }
            other => panic!("expected color-mix, got {other:?}"),
        }
    }

    #[test]
    fn parses_relative_color() {
        let mut c = Cursor::new("rgb(from red r g b)");
        let color = Color::parse(&mut c).expect("relative color");
        match color {
            Color::RelativeColor { function, origin, .. } => {
                assert_eq!(&*function, "rgb");
                assert_eq!(*origin, Color::Named("red", [255, 0, 0]));
            }
            other => panic!("expected relative color, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_rgb_function() {
        let mut c = Cursor::new("rgb(1 2 3 / 0.5)");
        let color = Color::parse(&mut c).expect("rgb");
        assert_eq!(color.to_css_string(), "rgb(1 2 3 / 0.5)");
    }
}
