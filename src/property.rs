//! Property dispatch: `(property-name, cursor) -> CSSProperty`.
//!
//! The table is a plain static slice of `(name, parser fn, flags)` —
//! `PROPERTY_TABLE` below — the way CSS Syntax §principal grammar describes
//! it, not a macro-generated sum type. Vendor prefixes (`-webkit-`, `-moz-`,
//! `-ms-`, `-o-`) are stripped before lookup and recorded on the result.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{write_token_list, Printer, ToCss};
use crate::tokenizer::Token;
use crate::values::angle::Angle;
use crate::values::color::Color;
use crate::values::dimension_percentage::DimensionPercentage;
use crate::values::length::{format_number, Length};
use crate::values::percentage::Percentage;
use crate::values::time::Time;
use std::fmt::{self, Write};

pub type LengthPercentage = DimensionPercentage<Length>;

/// `<length-percentage> | auto`, the shape most box-model properties take.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthPercentageOrAuto {
    Auto,
    LengthPercentage(LengthPercentage),
}

impl LengthPercentageOrAuto {
    fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        if cursor.try_parse(|c| c.expect_ident_matching("auto")).is_ok() {
            return Ok(LengthPercentageOrAuto::Auto);
        }
        LengthPercentage::parse(cursor).map(LengthPercentageOrAuto::LengthPercentage)
    }
}

impl ToCss for LengthPercentageOrAuto {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            LengthPercentageOrAuto::Auto => dest.write_str("auto"),
            LengthPercentageOrAuto::LengthPercentage(v) => v.to_css(dest),
        }
    }
}

/// `<length> | none`, used by `max-width`/`max-height`.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthPercentageOrNone {
    None,
    LengthPercentage(LengthPercentage),
}

impl LengthPercentageOrNone {
    fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        if cursor.try_parse(|c| c.expect_ident_matching("none")).is_ok() {
            return Ok(LengthPercentageOrNone::None);
        }
        LengthPercentage::parse(cursor).map(LengthPercentageOrNone::LengthPercentage)
    }
}

impl ToCss for LengthPercentageOrNone {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            LengthPercentageOrNone::None => dest.write_str("none"),
            LengthPercentageOrNone::LengthPercentage(v) => v.to_css(dest),
        }
    }
}

/// `<number> | <percentage>`, e.g. `font-weight`, `line-height`, `opacity`.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberOrPercentage {
    Number(f64),
    Percentage(Percentage),
}

impl ToCss for NumberOrPercentage {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            NumberOrPercentage::Number(n) => dest.write_str(&format_number(*n)),
            NumberOrPercentage::Percentage(p) => p.to_css(dest),
        }
    }
}

/// A keyword-valued property's value: the matched keyword, lowercased and
/// validated against the property's allowed set at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword(pub Box<str>);

impl ToCss for Keyword {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

fn parse_keyword(cursor: &mut Cursor, allowed: &[&str]) -> BasicParseResult<Keyword> {
    let state = cursor.state();
    match cursor.next() {
        Token::Ident(s) if allowed.iter().any(|k| s.eq_ignore_ascii_case(k)) => Ok(Keyword(s.to_ascii_lowercase().into())),
        other => {
            cursor.reset(state);
            Err(BasicParseError::new(
                BasicParseErrorKind::UnexpectedToken(other),
                cursor.current_source_location(),
            ))
        }
    }
}

/// The CSS-wide keywords, valid as the entire value of any property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CSSWideKeyword {
    Inherit,
    Initial,
    Unset,
    Revert,
    RevertLayer,
}

impl CSSWideKeyword {
    fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let state = cursor.state();
        let kw = match cursor.next() {
            Token::Ident(s) if s.eq_ignore_ascii_case("inherit") => CSSWideKeyword::Inherit,
            Token::Ident(s) if s.eq_ignore_ascii_case("initial") => CSSWideKeyword::Initial,
            Token::Ident(s) if s.eq_ignore_ascii_case("unset") => CSSWideKeyword::Unset,
            Token::Ident(s) if s.eq_ignore_ascii_case("revert") => CSSWideKeyword::Revert,
            Token::Ident(s) if s.eq_ignore_ascii_case("revert-layer") => CSSWideKeyword::RevertLayer,
            other => {
                cursor.reset(state);
                return Err(BasicParseError::new(
                    BasicParseErrorKind::UnexpectedToken(other),
                    cursor.current_source_location(),
                ));
            }
        };
        if !cursor.is_exhausted() {
            cursor.reset(state);
            return Err(BasicParseError::new(
                BasicParseErrorKind::Custom("trailing tokens after wide keyword".into()),
                cursor.current_source_location(),
            ));
        }
        Ok(kw)
    }
}

impl ToCss for CSSWideKeyword {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str(match self {
            CSSWideKeyword::Inherit => "inherit",
            CSSWideKeyword::Initial => "initial",
            CSSWideKeyword::Unset => "unset",
            CSSWideKeyword::Revert => "revert",
            CSSWideKeyword::RevertLayer => "revert-layer",
        })
    }
}

/// A recognized vendor prefix, stripped from the property name before
/// lookup and recorded on the side so callers can tell `-webkit-box-shadow`
/// from `box-shadow` apart without losing the typed parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorPrefix {
    Webkit,
    Moz,
    Ms,
    O,
}

impl VendorPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            VendorPrefix::Webkit => "-webkit-",
            VendorPrefix::Moz => "-moz-",
            VendorPrefix::Ms => "-ms-",
            VendorPrefix::O => "-o-",
        }
    }

    fn strip(name: &str) -> (Option<Self>, &str) {
        for (prefix, rest) in [
            (VendorPrefix::Webkit, name.strip_prefix("-webkit-")),
            (VendorPrefix::Moz, name.strip_prefix("-moz-")),
            (VendorPrefix::Ms, name.strip_prefix("-ms-")),
            (VendorPrefix::O, name.strip_prefix("-o-")),
        ] {
            if let Some(rest) = rest {
                return (Some(prefix), rest);
            }
        }
        (None, name)
    }
}

/// Per-property dispatch metadata. `inherits` backs the caller-driven
/// inheritance walk the cascade resolver itself does not perform (§4.7);
/// `vendor_prefixes` lists the prefixes this property accepts.
#[derive(Debug, Clone, Copy)]
pub struct PropertyFlags {
    pub inherits: bool,
    pub shorthand: bool,
    pub vendor_prefixes: &'static [VendorPrefix],
}

const NONE_PREFIXES: &[VendorPrefix] = &[];
const WEBKIT_MOZ: &[VendorPrefix] = &[VendorPrefix::Webkit, VendorPrefix::Moz];

/// One variant per property this table knows how to parse typed. Anything
/// else falls back to [`CSSProperty::Unparsed`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Color(Color),
    BackgroundColor(Color),
    BorderColor(Color),
    Width(LengthPercentageOrAuto),
    Height(LengthPercentageOrAuto),
    MinWidth(LengthPercentageOrAuto),
    MinHeight(LengthPercentageOrAuto),
    MaxWidth(LengthPercentageOrNone),
    MaxHeight(LengthPercentageOrNone),
    MarginTop(LengthPercentageOrAuto),
    MarginRight(LengthPercentageOrAuto),
    MarginBottom(LengthPercentageOrAuto),
    MarginLeft(LengthPercentageOrAuto),
    PaddingTop(LengthPercentage),
    PaddingRight(LengthPercentage),
    PaddingBottom(LengthPercentage),
    PaddingLeft(LengthPercentage),
    Top(LengthPercentageOrAuto),
    Right(LengthPercentageOrAuto),
    Bottom(LengthPercentageOrAuto),
    Left(LengthPercentageOrAuto),
    FontSize(LengthPercentage),
    FontWeight(NumberOrPercentage),
    LineHeight(NumberOrPercentage),
    LetterSpacing(Length),
    Opacity(NumberOrPercentage),
    ZIndex(f64),
    BorderWidth(Length),
    BorderRadius(LengthPercentage),
    Display(Keyword),
    Position(Keyword),
    BoxSizing(Keyword),
    Overflow(Keyword),
    Visibility(Keyword),
    TextAlign(Keyword),
    FlexGrow(f64),
    FlexShrink(f64),
    FlexBasis(LengthPercentageOrAuto),
    TransitionDuration(Time),
    TransitionDelay(Time),
    Rotate(Angle),
}

impl ToCss for TypedValue {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            TypedValue::Color(v) | TypedValue::BackgroundColor(v) | TypedValue::BorderColor(v) => v.to_css(dest),
            TypedValue::Width(v)
            | TypedValue::Height(v)
            | TypedValue::MinWidth(v)
            | TypedValue::MinHeight(v)
            | TypedValue::MarginTop(v)
            | TypedValue::MarginRight(v)
            | TypedValue::MarginBottom(v)
            | TypedValue::MarginLeft(v)
            | TypedValue::Top(v)
            | TypedValue::Right(v)
            | TypedValue::Bottom(v)
            | TypedValue::Left(v)
            | TypedValue::FlexBasis(v) => v.to_css(dest),
            TypedValue::MaxWidth(v) | TypedValue::MaxHeight(v) => v.to_css(dest),
            TypedValue::PaddingTop(v)
            | TypedValue::PaddingRight(v)
            | TypedValue::PaddingBottom(v)
            | TypedValue::PaddingLeft(v)
            | TypedValue::FontSize(v)
            | TypedValue::BorderRadius(v) => v.to_css(dest),
            TypedValue::FontWeight(v) | TypedValue::LineHeight(v) | TypedValue::Opacity(v) => v.to_css(dest),
            TypedValue::LetterSpacing(v) | TypedValue::BorderWidth(v) => v.to_css(dest),
            TypedValue::ZIndex(v) | TypedValue::FlexGrow(v) | TypedValue::FlexShrink(v) => {
                dest.write_str(&format_number(*v))
            }
            TypedValue::Display(v)
            | TypedValue::Position(v)
            | TypedValue::BoxSizing(v)
            | TypedValue::Overflow(v)
            | TypedValue::Visibility(v)
            | TypedValue::TextAlign(v) => v.to_css(dest),
            TypedValue::TransitionDuration(v) | TypedValue::TransitionDelay(v) => v.to_css(dest),
            TypedValue::Rotate(v) => v.to_css(dest),
        }
    }
}

fn parse_number_or_percentage(cursor: &mut Cursor) -> BasicParseResult<NumberOrPercentage> {
    if let Ok(p) = cursor.try_parse(Percentage::parse) {
        return Ok(NumberOrPercentage::Percentage(p));
    }
    cursor.expect_number().map(NumberOrPercentage::Number)
}

type TypedParser = fn(&mut Cursor) -> BasicParseResult<TypedValue>;

macro_rules! leaf_parser {
    ($variant:ident, $parse:expr) => {
        (|cursor: &mut Cursor| -> BasicParseResult<TypedValue> { ($parse)(cursor).map(TypedValue::$variant) }) as TypedParser
    };
}

struct PropertyEntry {
    name: &'static str,
    parse: TypedParser,
    flags: PropertyFlags,
}

static PROPERTY_TABLE: &[PropertyEntry] = &[
    PropertyEntry {
        name: "color",
        parse: leaf_parser!(Color, Color::parse),
        flags: PropertyFlags { inherits: true, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "background-color",
        parse: leaf_parser!(BackgroundColor, Color::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "border-color",
        parse: leaf_parser!(BorderColor, Color::parse),
        flags: PropertyFlags { inherits: false, shorthand: true, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "width",
        parse: leaf_parser!(Width, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "height",
        parse: leaf_parser!(Height, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "min-width",
        parse: leaf_parser!(MinWidth, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "min-height",
        parse: leaf_parser!(MinHeight, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "max-width",
        parse: leaf_parser!(MaxWidth, LengthPercentageOrNone::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "max-height",
        parse: leaf_parser!(MaxHeight, LengthPercentageOrNone::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "margin-top",
        parse: leaf_parser!(MarginTop, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "margin-right",
        parse: leaf_parser!(MarginRight, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "margin-bottom",
        parse: leaf_parser!(MarginBottom, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "margin-left",
        parse: leaf_parser!(MarginLeft, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "padding-top",
        parse: leaf_parser!(PaddingTop, LengthPercentage::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "padding-right",
        parse: leaf_parser!(PaddingRight, LengthPercentage::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "padding-bottom",
        parse: leaf_parser!(PaddingBottom, LengthPercentage::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "padding-left",
        parse: leaf_parser!(PaddingLeft, LengthPercentage::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "top",
        parse: leaf_parser!(Top, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "right",
        parse: leaf_parser!(Right, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "bottom",
        parse: leaf_parser!(Bottom, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "left",
        parse: leaf_parser!(Left, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "font-size",
        parse: leaf_parser!(FontSize, LengthPercentage::parse),
        flags: PropertyFlags { inherits: true, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "font-weight",
        parse: leaf_parser!(FontWeight, parse_number_or_percentage),
        flags: PropertyFlags { inherits: true, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "line-height",
        parse: leaf_parser!(LineHeight, parse_number_or_percentage),
        flags: PropertyFlags { inherits: true, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "letter-spacing",
        parse: leaf_parser!(LetterSpacing, |c: &mut Cursor| Length::parse_allow_unitless_zero(c, true)),
        flags: PropertyFlags { inherits: true, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "opacity",
        parse: leaf_parser!(Opacity, parse_number_or_percentage),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "z-index",
        parse: leaf_parser!(ZIndex, |c: &mut Cursor| c.expect_number()),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "border-width",
        parse: leaf_parser!(BorderWidth, |c: &mut Cursor| Length::parse_allow_unitless_zero(c, true)),
        flags: PropertyFlags { inherits: false, shorthand: true, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "border-radius",
        parse: leaf_parser!(BorderRadius, LengthPercentage::parse),
        flags: PropertyFlags { inherits: false, shorthand: true, vendor_prefixes: WEBKIT_MOZ },
    },
    PropertyEntry {
        name: "display",
        parse: leaf_parser!(Display, |c: &mut Cursor| parse_keyword(
            c,
            &[
                "none", "block", "inline", "inline-block", "flex", "inline-flex", "grid", "inline-grid", "table",
                "table-row", "list-item", "contents", "flow-root"
            ]
        )),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "position",
        parse: leaf_parser!(Position, |c: &mut Cursor| parse_keyword(
            c,
            &["static", "relative", "absolute", "fixed", "sticky"]
        )),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "box-sizing",
        parse: leaf_parser!(BoxSizing, |c: &mut Cursor| parse_keyword(c, &["content-box", "border-box"])),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: WEBKIT_MOZ },
    },
    PropertyEntry {
        name: "overflow",
        parse: leaf_parser!(Overflow, |c: &mut Cursor| parse_keyword(
            c,
            &["visible", "hidden", "scroll", "auto", "clip"]
        )),
        flags: PropertyFlags { inherits: false, shorthand: true, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "visibility",
        parse: leaf_parser!(Visibility, |c: &mut Cursor| parse_keyword(
            c,
            &["visible", "hidden", "collapse"]
        )),
        flags: PropertyFlags { inherits: true, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "text-align",
        parse: leaf_parser!(TextAlign, |c: &mut Cursor| parse_keyword(
            c,
            &["left", "right", "center", "justify", "start", "end"]
        )),
        flags: PropertyFlags { inherits: true, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "flex-grow",
        parse: leaf_parser!(FlexGrow, |c: &mut Cursor| c.expect_number()),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "flex-shrink",
        parse: leaf_parser!(FlexShrink, |c: &mut Cursor| c.expect_number()),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "flex-basis",
        parse: leaf_parser!(FlexBasis, LengthPercentageOrAuto::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
    PropertyEntry {
        name: "transition-duration",
        parse: leaf_parser!(TransitionDuration, Time::parse),
        flags: PropertyFlags { inherits: false, shorthand: true, vendor_prefixes: WEBKIT_MOZ },
    },
    PropertyEntry {
        name: "transition-delay",
        parse: leaf_parser!(TransitionDelay, Time::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: WEBKIT_MOZ },
    },
    PropertyEntry {
        name: "rotate",
        parse: leaf_parser!(Rotate, Angle::parse),
        flags: PropertyFlags { inherits: false, shorthand: false, vendor_prefixes: NONE_PREFIXES },
    },
];

fn lookup(name: &str) -> Option<&'static PropertyEntry> {
    PROPERTY_TABLE.iter().find(|e| e.name == name)
}

/// A stable identifier for a recognized property, independent of its typed
/// value — used by [`CSSProperty::WideKeyword`] and [`CSSProperty::Unparsed`]
/// to say *which* property they stand in for.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyId {
    pub name: Box<str>,
    pub prefix: Option<VendorPrefix>,
}

impl PropertyId {
    #[must_use]
    pub fn inherits(&self) -> bool {
        lookup(&self.name).is_some_and(|e| e.flags.inherits)
    }
}

impl ToCss for PropertyId {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            dest.write_str(prefix.as_str())?;
        }
        dest.write_str(&self.name)
    }
}

/// The outcome of property dispatch: a known property's typed value, a
/// CSS-wide keyword, an unparsed fallback (unknown property, `var()`
/// reference, or failed typed parse), or a custom (`--name`) property.
#[derive(Debug, Clone, PartialEq)]
pub enum CSSProperty {
    Typed { id: PropertyId, value: TypedValue },
    WideKeyword(CSSWideKeyword, PropertyId),
    Unparsed { tokens: Vec<Token>, id: PropertyId },
    Custom { name: Box<str>, tokens: Vec<Token> },
}

impl CSSProperty {
    /// Dispatches on the declaration name per §4.4: lowercase, strip a
    /// recognized vendor prefix, look up the typed parser, fall back to a
    /// CSS-wide keyword and finally to an unparsed token list. `--`-prefixed
    /// names are always [`CSSProperty::Custom`] and never reach the table.
    pub fn parse(name: &str, cursor: &mut Cursor) -> CSSProperty {
        if name.starts_with("--") {
            return CSSProperty::Custom {
                name: name.into(),
                tokens: collect_remaining(cursor),
            };
        }
        let lower = name.to_ascii_lowercase();
        let (prefix, unprefixed) = VendorPrefix::strip(&lower);
        let id = PropertyId { name: unprefixed.into(), prefix };

        if let Some(entry) = lookup(unprefixed) {
            let prefix_allowed = match prefix {
                None => true,
                Some(p) => entry.flags.vendor_prefixes.contains(&p),
            };
            if prefix_allowed {
                let state = cursor.state();
                if let Ok(value) = (entry.parse)(cursor) {
                    if cursor.is_exhausted() {
                        return CSSProperty::Typed { id, value };
                    }
                }
                cursor.reset(state);
            }
        }

        let state = cursor.state();
        if let Ok(kw) = cursor.try_parse(CSSWideKeyword::parse) {
            return CSSProperty::WideKeyword(kw, id);
        }
        cursor.reset(state);
        CSSProperty::Unparsed {
            tokens: collect_remaining(cursor),
            id,
        }
    }
}

/// Collects every remaining token verbatim (including whitespace), for a
/// custom property or unparsed value. Recurses through
/// [`Cursor::parse_nested_block`] for any nested block so a `var()`/`calc()`
/// inside the value is collected in full, close token included, rather
/// than having its close mistaken for the cursor's virtual end-of-block `Eof`.
fn collect_remaining(cursor: &mut Cursor) -> Vec<Token> {
    let mut out = Vec::new();
    loop {
        match cursor.next_including_whitespace() {
            Token::Eof => break,
            tok if tok.opens_block() => push_block(cursor, tok, &mut out),
            tok => out.push(tok),
        }
    }
    out
}

/// Pushes an already-consumed block-opening token `open` onto `out`, then
/// the tokens of its contents and its own close token, by parsing the
/// block through [`Cursor::parse_nested_block`] rather than letting `next`
/// walk past it (which would hand back the virtual end-of-block `Eof`).
fn push_block(cursor: &mut Cursor, open: Token, out: &mut Vec<Token>) {
    let close = match &open {
        Token::ParenthesisBlock | Token::Function(_) => Token::CloseParenthesis,
        Token::SquareBracketBlock => Token::CloseSquareBracket,
        Token::CurlyBracketBlock => Token::CloseCurlyBracket,
        _ => return,
    };
    out.push(open);
    out.extend(cursor.parse_nested_block(|c| Ok(collect_remaining(c))).unwrap_or_default());
    out.push(close);
}

impl ToCss for CSSProperty {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            CSSProperty::Typed { id, value } => {
                dest.write_str(&id.to_css_string())?;
                dest.write_str(": ")?;
                value.to_css(dest)
            }
            CSSProperty::WideKeyword(kw, id) => {
                dest.write_str(&id.to_css_string())?;
                dest.write_str(": ")?;
                kw.to_css(dest)
            }
            CSSProperty::Unparsed { tokens, id } => {
                dest.write_str(&id.to_css_string())?;
                dest.write_str(": ")?;
                write_token_list(dest, tokens)
            }
            CSSProperty::Custom { name, tokens } => {
                dest.write_str(name)?;
                dest.write_str(": ")?;
                write_token_list(dest, tokens)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_color() {
        let mut c = Cursor::new("red");
        let prop = CSSProperty::parse("color", &mut c);
        assert!(matches!(
            prop,
            CSSProperty::Typed {
                value: TypedValue::Color(Color::Named("red", _)),
                ..
            }
        ));
    }

    #[test]
    fn unknown_property_is_unparsed() {
        let mut c = Cursor::new("foo bar");
        let prop = CSSProperty::parse("not-a-real-property", &mut c);
        assert!(matches!(prop, CSSProperty::Unparsed { .. }));
    }

    #[test]
    fn custom_property_preserves_tokens_verbatim() {
        let mut c = Cursor::new("var(--other, 10px)");
        let prop = CSSProperty::parse("--foo", &mut c);
        assert!(matches!(prop, CSSProperty::Custom { .. }));
    }

    #[test]
    fn wide_keyword_recognized() {
        let mut c = Cursor::new("inherit");
        let prop = CSSProperty::parse("width", &mut c);
        assert!(matches!(prop, CSSProperty::WideKeyword(CSSWideKeyword::Inherit, _)));
    }

    #[test]
    fn vendor_prefix_stripped_when_allowed() {
        let mut c = Cursor::new("border-box");
        let prop = CSSProperty::parse("-webkit-box-sizing", &mut c);
        match prop {
            CSSProperty::Typed { id, .. } => {
                assert_eq!(&*id.name, "box-sizing");
                assert_eq!(id.prefix, Some(VendorPrefix::Webkit));
            }
            _ => panic!("expected typed box-sizing"),
        }
    }
}
