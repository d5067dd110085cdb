//! Selector parsing per CSS Selectors 4: component decomposition,
//! combinator handling, and specificity computation.

use crate::cursor::Cursor;
use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::Token;
use std::fmt::{self, Write};

/// The `(ids, classes, elements)` specificity tuple, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub elements: u32,
}

impl Specificity {
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }
}

impl std::ops::AddAssign for Specificity {
    fn add_assign(&mut self, rhs: Self) {
        self.ids += rhs.ids;
        self.classes += rhs.classes;
        self.elements += rhs.elements;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
    Column,
}

impl ToCss for Combinator {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            Combinator::Descendant => dest.write_char(' '),
            Combinator::Child => dest.write_str(" > "),
            Combinator::NextSibling => dest.write_str(" + "),
            Combinator::SubsequentSibling => dest.write_str(" ~ "),
            Combinator::Column => dest.write_str(" || "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOperator {
    Equal,
    Includes,
    DashMatch,
    Prefix,
    Suffix,
    Substring,
}

impl AttrOperator {
    fn as_str(&self) -> &'static str {
        match self {
            AttrOperator::Equal => "=",
            AttrOperator::Includes => "~=",
            AttrOperator::DashMatch => "|=",
            AttrOperator::Prefix => "^=",
            AttrOperator::Suffix => "$=",
            AttrOperator::Substring => "*=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttrMatch {
    pub operator: AttrOperator,
    pub value: Box<str>,
    pub case_sensitivity: Option<CaseSensitivity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttrSelector {
    pub namespace: Option<Box<str>>,
    pub name: Box<str>,
    pub matcher: Option<AttrMatch>,
}

/// `An+B`, as used by `nth-child()` and its siblings. `a == 0` means a plain
/// integer `B` (also how `odd`/`even`/keyword pseudo-classes reduce).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnPlusB {
    pub a: i32,
    pub b: i32,
}

impl AnPlusB {
    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        cursor.skip_whitespace();
        let state = cursor.state();
        if let Ok(ident) = cursor.try_parse(|c| c.expect_ident()) {
            if ident.eq_ignore_ascii_case("odd") {
                return Ok(AnPlusB { a: 2, b: 1 });
            }
            if ident.eq_ignore_ascii_case("even") {
                return Ok(AnPlusB { a: 2, b: 0 });
            }
            if let Some(an_b) = parse_n_ident(&ident, cursor)? {
                return Ok(an_b);
            }
            cursor.reset(state);
        }
        match cursor.next() {
            Token::Number(n) => {
                let b = n.int_value.ok_or_else(|| unexpected(cursor))? as i32;
                Ok(AnPlusB { a: 0, b })
            }
            Token::Dimension(n, unit) => {
                let a = n.int_value.ok_or_else(|| unexpected(cursor))? as i32;
                let lower = unit.to_ascii_lowercase();
                if lower == "n" {
                    Ok(AnPlusB { a, b: parse_optional_b(cursor)? })
                } else if let Some(rest) = lower.strip_prefix("n-") {
                    let b: i32 = rest.parse().map_err(|_| unexpected(cursor))?;
                    Ok(AnPlusB { a, b: -b })
                } else {
                    Err(unexpected(cursor))
                }
            }
            _ => {
                cursor.reset(state);
                Err(unexpected(cursor))
            }
        }
    }
}

fn parse_n_ident(ident: &str, cursor: &mut Cursor) -> BasicParseResult<Option<AnPlusB>> {
    let lower = ident.to_ascii_lowercase();
    if lower == "n" {
        return Ok(Some(AnPlusB { a: 1, b: parse_optional_b(cursor)? }));
    }
    if lower == "-n" {
        return Ok(Some(AnPlusB { a: -1, b: parse_optional_b(cursor)? }));
    }
    if let Some(rest) = lower.strip_prefix("n-") {
        let b: i32 = rest.parse().map_err(|_| unexpected(cursor))?;
        return Ok(Some(AnPlusB { a: 1, b: -b }));
    }
    if let Some(rest) = lower.strip_prefix("-n-") {
        let b: i32 = rest.parse().map_err(|_| unexpected(cursor))?;
        return Ok(Some(AnPlusB { a: -1, b: -b }));
    }
    Ok(None)
}

fn parse_optional_b(cursor: &mut Cursor) -> BasicParseResult<i32> {
    let state = cursor.state();
    cursor.skip_whitespace();
    match cursor.next() {
        Token::Number(n) if n.has_sign => n.int_value.map(|v| v as i32).ok_or_else(|| unexpected(cursor)),
        Token::Delim('+') => {
            cursor.skip_whitespace();
            match cursor.next() {
                Token::Number(n) if !n.has_sign => n.int_value.map(|v| v as i32).ok_or_else(|| unexpected(cursor)),
                _ => {
                    cursor.reset(state);
                    Ok(0)
                }
            }
        }
        Token::Delim('-') => {
            cursor.skip_whitespace();
            match cursor.next() {
                Token::Number(n) if !n.has_sign => n.int_value.map(|v| -(v as i32)).ok_or_else(|| unexpected(cursor)),
                _ => {
                    cursor.reset(state);
                    Ok(0)
                }
            }
        }
        _ => {
            cursor.reset(state);
            Ok(0)
        }
    }
}

fn unexpected(cursor: &Cursor) -> BasicParseError {
    BasicParseError::new(BasicParseErrorKind::Custom("invalid An+B".into()), cursor.current_source_location())
}

impl ToCss for AnPlusB {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        if self.a == 0 {
            return dest.write_str(&self.b.to_string());
        }
        if self.a != 0 {
            dest.write_str(&format!("{}n", self.a))?;
        }
        if self.b > 0 {
            dest.write_str(&format!("+{}", self.b))?;
        } else if self.b < 0 {
            dest.write_str(&self.b.to_string())?;
        }
        Ok(())
    }
}

/// A recognized pseudo-class, or a name we don't special-case along with its
/// raw argument tokens (unknown pseudos round-trip verbatim).
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Hover,
    Active,
    Focus,
    FocusVisible,
    FocusWithin,
    Visited,
    Link,
    AnyLink,
    Target,
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild(AnPlusB, Option<SelectorList>),
    NthLastChild(AnPlusB, Option<SelectorList>),
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthOfType(AnPlusB),
    NthLastOfType(AnPlusB),
    NthCol(AnPlusB),
    NthLastCol(AnPlusB),
    Lang(Box<str>),
    Dir(Box<str>),
    Disabled,
    Enabled,
    Checked,
    Indeterminate,
    Required,
    Optional,
    ReadOnly,
    ReadWrite,
    PlaceholderShown,
    Default,
    Valid,
    Invalid,
    InRange,
    OutOfRange,
    Host,
    HostFunction(SelectorList),
    HostContext(SelectorList),
    Is(SelectorList),
    Where(SelectorList),
    Not(SelectorList),
    Has(SelectorList),
    Scope,
    Defined,
    Unknown(Box<str>, Vec<Token>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PseudoElement {
    Before,
    After,
    FirstLine,
    FirstLetter,
    Selection,
    Placeholder,
    Marker,
    Backdrop,
    Part(Vec<Box<str>>),
    Slotted(SelectorList),
    Unknown(Box<str>, Vec<Token>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Type { namespace: Option<Box<str>>, name: Box<str> },
    Universal { namespace: Option<Box<str>> },
    Class(Box<str>),
    Id(Box<str>),
    Attribute(AttrSelector),
    PseudoClass(PseudoClass),
    PseudoElement(PseudoElement),
    Combinator(Combinator),
    Nesting,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub components: Vec<Component>,
    pub specificity: Specificity,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    #[must_use]
    pub fn max_specificity(&self) -> Specificity {
        self.selectors.iter().map(|s| s.specificity).fold(Specificity::zero(), Specificity::max)
    }

    pub fn parse(cursor: &mut Cursor) -> BasicParseResult<Self> {
        let selectors = cursor.parse_comma_separated(parse_selector)?;
        Ok(SelectorList { selectors })
    }
}

pub fn parse_selector(cursor: &mut Cursor) -> BasicParseResult<Selector> {
    let mut components = Vec::new();
    let mut specificity = Specificity::zero();
    parse_compound(cursor, &mut components, &mut specificity)?;
    while let Some(combinator) = parse_combinator(cursor)? {
        components.push(Component::Combinator(combinator));
        parse_compound(cursor, &mut components, &mut specificity)?;
    }
    Ok(Selector { components, specificity })
}

fn parse_combinator(cursor: &mut Cursor) -> BasicParseResult<Option<Combinator>> {
    let mut saw_whitespace = false;
    loop {
        let state = cursor.state();
        match cursor.next_including_whitespace() {
            Token::Whitespace(_) => {
                saw_whitespace = true;
                continue;
            }
            Token::Delim('>') => return Ok(Some(Combinator::Child)),
            Token::Delim('+') => return Ok(Some(Combinator::NextSibling)),
            Token::Delim('~') => return Ok(Some(Combinator::SubsequentSibling)),
            Token::Column => return Ok(Some(Combinator::Column)),
            Token::Eof | Token::Comma | Token::CloseParenthesis | Token::CurlyBracketBlock => {
                cursor.reset(state);
                return Ok(None);
            }
            _ => {
                cursor.reset(state);
                return Ok(if saw_whitespace { Some(Combinator::Descendant) } else { None });
            }
        }
    }
}

fn parse_compound(
    cursor: &mut Cursor,
    components: &mut Vec<Component>,
    specificity: &mut Specificity,
) -> BasicParseResult<()> {
    let mut any = false;
    if let Some(component) = try_parse_type_or_universal(cursor)? {
        if matches!(component, Component::Type { .. }) {
            specificity.elements += 1;
        }
        components.push(component);
        any = true;
    }
    while let Some(component) = try_parse_simple(cursor)? {
        add_specificity(&component, specificity);
        components.push(component);
        any = true;
    }
    if any {
        Ok(())
    } else {
        Err(unexpected(cursor))
    }
}

fn add_specificity(component: &Component, specificity: &mut Specificity) {
    match component {
        Component::Id(_) => specificity.ids += 1,
        Component::Class(_) | Component::Attribute(_) => specificity.classes += 1,
        Component::PseudoElement(_) => specificity.elements += 1,
        Component::PseudoClass(pc) => match pc {
            PseudoClass::Is(list) | PseudoClass::Not(list) | PseudoClass::Has(list) => {
                *specificity += list.max_specificity();
            }
            PseudoClass::Where(_) => {}
            PseudoClass::NthChild(_, Some(of)) | PseudoClass::NthLastChild(_, Some(of)) => {
                specificity.classes += 1;
                *specificity += of.max_specificity();
            }
            _ => specificity.classes += 1,
        },
        _ => {}
    }
}

fn try_parse_type_or_universal(cursor: &mut Cursor) -> BasicParseResult<Option<Component>> {
    let state = cursor.state();
    let first = cursor.try_parse(|c| match c.next() {
        Token::Ident(s) => Ok(Some(s)),
        Token::Delim('*') => Ok(None),
        other => Err(BasicParseError::new(BasicParseErrorKind::UnexpectedToken(other), c.current_source_location())),
    });
    let Ok(first) = first else {
        cursor.reset(state);
        return Ok(None);
    };
    // namespace `ns|name` / `ns|*` / `|name` / `*|name`
    let pipe_state = cursor.state();
    if matches!(cursor.next(), Token::Delim('|')) {
        let namespace = first;
        let name_state = cursor.state();
        return match cursor.next() {
            Token::Ident(name) => Ok(Some(Component::Type { namespace, name })),
            Token::Delim('*') => Ok(Some(Component::Universal { namespace })),
            _ => {
                cursor.reset(name_state);
                Ok(None)
            }
        };
    }
    cursor.reset(pipe_state);
    match first {
        Some(name) => Ok(Some(Component::Type { namespace: None, name })),
        None => Ok(Some(Component::Universal { namespace: None })),
    }
}

fn try_parse_simple(cursor: &mut Cursor) -> BasicParseResult<Option<Component>> {
    let state = cursor.state();
    match cursor.next_including_whitespace() {
        Token::Delim('.') => {
            let name = cursor.expect_ident()?;
            Ok(Some(Component::Class(name)))
        }
        Token::IdHash(name) => Ok(Some(Component::Id(name))),
        Token::SquareBracketBlock => {
            let attr = cursor.parse_nested_block(parse_attribute_contents)?;
            Ok(Some(Component::Attribute(attr)))
        }
        Token::Colon => {
            let double = cursor.try_parse(|c| match c.next() {
                Token::Colon => Ok(()),
                other => Err(BasicParseError::new(BasicParseErrorKind::UnexpectedToken(other), c.current_source_location())),
            });
            if double.is_ok() {
                Ok(Some(Component::PseudoElement(parse_pseudo_element(cursor)?)))
            } else {
                parse_colon(cursor)
            }
        }
        Token::Delim('&') => Ok(Some(Component::Nesting)),
        _ => {
            cursor.reset(state);
            Ok(None)
        }
    }
}

fn parse_colon(cursor: &mut Cursor) -> BasicParseResult<Option<Component>> {
    let legacy_pseudo_element = |name: &str| -> Option<PseudoElement> {
        match name.to_ascii_lowercase().as_str() {
            "before" => Some(PseudoElement::Before),
            "after" => Some(PseudoElement::After),
            "first-line" => Some(PseudoElement::FirstLine),
            "first-letter" => Some(PseudoElement::FirstLetter),
            _ => None,
        }
    };
    let state = cursor.state();
    match cursor.next() {
        Token::Ident(name) => {
            if let Some(pe) = legacy_pseudo_element(&name) {
                return Ok(Some(Component::PseudoElement(pe)));
            }
            Ok(Some(Component::PseudoClass(parse_pseudo_class_ident(&name))))
        }
        Token::Function(name) => {
            let lowered = name.to_ascii_lowercase();
            let pc = cursor.parse_nested_block(|c| parse_pseudo_class_function(&lowered, c))?;
            Ok(Some(Component::PseudoClass(pc)))
        }
        other => {
            cursor.reset(state);
            Err(BasicParseError::new(BasicParseErrorKind::UnexpectedToken(other), cursor.current_source_location()))
        }
    }
}

fn parse_pseudo_class_ident(name: &str) -> PseudoClass {
    match name.to_ascii_lowercase().as_str() {
        "hover" => PseudoClass::Hover,
        "active" => PseudoClass::Active,
        "focus" => PseudoClass::Focus,
        "focus-visible" => PseudoClass::FocusVisible,
        "focus-within" => PseudoClass::FocusWithin,
        "visited" => PseudoClass::Visited,
        "link" => PseudoClass::Link,
        "any-link" => PseudoClass::AnyLink,
        "target" => PseudoClass::Target,
        "root" => PseudoClass::Root,
        "empty" => PseudoClass::Empty,
        "first-child" => PseudoClass::FirstChild,
        "last-child" => PseudoClass::LastChild,
        "only-child" => PseudoClass::OnlyChild,
        "first-of-type" => PseudoClass::FirstOfType,
        "last-of-type" => PseudoClass::LastOfType,
        "only-of-type" => PseudoClass::OnlyOfType,
        "disabled" => PseudoClass::Disabled,
        "enabled" => PseudoClass::Enabled,
        "checked" => PseudoClass::Checked,
        "indeterminate" => PseudoClass::Indeterminate,
        "required" => PseudoClass::Required,
        "optional" => PseudoClass::Optional,
        "read-only" => PseudoClass::ReadOnly,
        "read-write" => PseudoClass::ReadWrite,
        "placeholder-shown" => PseudoClass::PlaceholderShown,
        "default" => PseudoClass::Default,
        "valid" => PseudoClass::Valid,
        "invalid" => PseudoClass::Invalid,
        "in-range" => PseudoClass::InRange,
        "out-of-range" => PseudoClass::OutOfRange,
        "host" => PseudoClass::Host,
        "scope" => PseudoClass::Scope,
        "defined" => PseudoClass::Defined,
        other => PseudoClass::Unknown(other.into(), Vec::new()),
    }
}

fn parse_pseudo_class_function(name: &str, cursor: &mut Cursor) -> BasicParseResult<PseudoClass> {
    match name {
        "lang" => Ok(PseudoClass::Lang(cursor.expect_ident().or_else(|_| cursor.expect_string())?)),
        "dir" => Ok(PseudoClass::Dir(cursor.expect_ident()?)),
        "is" => Ok(PseudoClass::Is(SelectorList::parse(cursor)?)),
        "where" => Ok(PseudoClass::Where(SelectorList::parse(cursor)?)),
        "not" => Ok(PseudoClass::Not(SelectorList::parse(cursor)?)),
        "has" => Ok(PseudoClass::Has(SelectorList::parse(cursor)?)),
        "host" => Ok(PseudoClass::HostFunction(SelectorList::parse(cursor)?)),
        "host-context" => Ok(PseudoClass::HostContext(SelectorList::parse(cursor)?)),
        "nth-child" => parse_nth_of(cursor, PseudoClass::NthChild),
        "nth-last-child" => parse_nth_of(cursor, PseudoClass::NthLastChild),
        "nth-of-type" => Ok(PseudoClass::NthOfType(AnPlusB::parse(cursor)?)),
        "nth-last-of-type" => Ok(PseudoClass::NthLastOfType(AnPlusB::parse(cursor)?)),
        "nth-col" => Ok(PseudoClass::NthCol(AnPlusB::parse(cursor)?)),
        "nth-last-col" => Ok(PseudoClass::NthLastCol(AnPlusB::parse(cursor)?)),
        _ => {
            let tokens = collect_remaining_tokens(cursor);
            Ok(PseudoClass::Unknown(name.into(), tokens))
        }
    }
}

fn parse_nth_of(
    cursor: &mut Cursor,
    ctor: impl Fn(AnPlusB, Option<SelectorList>) -> PseudoClass,
) -> BasicParseResult<PseudoClass> {
    let an_b = AnPlusB::parse(cursor)?;
    cursor.skip_whitespace();
    let of = cursor.try_parse(|c| {
        c.expect_ident_matching("of")?;
        SelectorList::parse(c)
    });
    Ok(ctor(an_b, of.ok()))
}

fn parse_pseudo_element(cursor: &mut Cursor) -> BasicParseResult<PseudoElement> {
    let state = cursor.state();
    match cursor.next() {
        Token::Ident(name) => Ok(match name.to_ascii_lowercase().as_str() {
            "before" => PseudoElement::Before,
            "after" => PseudoElement::After,
            "first-line" => PseudoElement::FirstLine,
            "first-letter" => PseudoElement::FirstLetter,
            "selection" => PseudoElement::Selection,
            "placeholder" => PseudoElement::Placeholder,
            "marker" => PseudoElement::Marker,
            "backdrop" => PseudoElement::Backdrop,
            other => PseudoElement::Unknown(other.into(), Vec::new()),
        }),
        Token::Function(name) => {
            let lowered = name.to_ascii_lowercase();
            cursor.parse_nested_block(|c| match lowered.as_str() {
                "part" => {
                    let mut names = Vec::new();
                    loop {
                        c.skip_whitespace();
                        if c.is_exhausted() {
                            break;
                        }
                        names.push(c.expect_ident()?);
                    }
                    Ok(PseudoElement::Part(names))
                }
                "slotted" => Ok(PseudoElement::Slotted(SelectorList::parse(c)?)),
                _ => {
                    let tokens = collect_remaining_tokens(c);
                    Ok(PseudoElement::Unknown(lowered.clone().into(), tokens))
                }
            })
        }
        other => {
            cursor.reset(state);
            Err(BasicParseError::new(BasicParseErrorKind::UnexpectedToken(other), cursor.current_source_location()))
        }
    }
}

/// Collects an unknown pseudo-class/pseudo-element's raw argument tokens.
/// Recurses through [`Cursor::parse_nested_block`] for any nested block
/// (e.g. a function argument like `:unknown-pseudo(foo(1, 2))`) so its
/// contents and close token are collected rather than mistaken for the
/// cursor's virtual end-of-block `Eof`.
fn collect_remaining_tokens(cursor: &mut Cursor) -> Vec<Token> {
    let mut out = Vec::new();
    loop {
        match cursor.next() {
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
    out.extend(cursor.parse_nested_block(|c| Ok(collect_remaining_tokens(c))).unwrap_or_default());
    out.push(close);
}

fn parse_attribute_contents(cursor: &mut Cursor) -> BasicParseResult<AttrSelector> {
    cursor.skip_whitespace();
    let (namespace, name) = parse_attr_name(cursor)?;
    cursor.skip_whitespace();
    let state = cursor.state();
    let operator = match cursor.next() {
        Token::Delim('=') => Some(AttrOperator::Equal),
        Token::IncludeMatch => Some(AttrOperator::Includes),
        Token::DashMatch => Some(AttrOperator::DashMatch),
        Token::PrefixMatch => Some(AttrOperator::Prefix),
        Token::SuffixMatch => Some(AttrOperator::Suffix),
        Token::SubstringMatch => Some(AttrOperator::Substring),
        _ => {
            cursor.reset(state);
            None
        }
    };
    let matcher = match operator {
        None => None,
        Some(operator) => {
            cursor.skip_whitespace();
            let value = match cursor.next() {
                Token::QuotedString(s) => s,
                Token::Ident(s) => s,
                other => {
                    return Err(BasicParseError::new(
                        BasicParseErrorKind::UnexpectedToken(other),
                        cursor.current_source_location(),
                    ))
                }
            };
            cursor.skip_whitespace();
            let case_sensitivity = cursor.try_parse(|c| {
                let ident = c.expect_ident()?;
                if ident.eq_ignore_ascii_case("i") {
                    Ok(CaseSensitivity::Insensitive)
                } else if ident.eq_ignore_ascii_case("s") {
                    Ok(CaseSensitivity::Sensitive)
                } else {
                    Err(unexpected(c))
                }
            });
            Some(AttrMatch {
                operator,
                value,
                case_sensitivity: case_sensitivity.ok(),
            })
        }
    };
    Ok(AttrSelector { namespace, name, matcher })
}

fn parse_attr_name(cursor: &mut Cursor) -> BasicParseResult<(Option<Box<str>>, Box<str>)> {
    let state = cursor.state();
    let first = cursor.try_parse(|c| match c.next() {
        Token::Ident(s) => Ok(s),
        other => Err(BasicParseError::new(BasicParseErrorKind::UnexpectedToken(other), c.current_source_location())),
    });
    if let Ok(first) = first {
        let pipe_state = cursor.state();
        if matches!(cursor.next(), Token::Delim('|')) {
            let name = cursor.expect_ident()?;
            return Ok((Some(first), name));
        }
        cursor.reset(pipe_state);
        return Ok((None, first));
    }
    cursor.reset(state);
    match cursor.next() {
        Token::Delim('|') => {
            let name = cursor.expect_ident()?;
            Ok((None, name))
        }
        other => Err(BasicParseError::new(BasicParseErrorKind::UnexpectedToken(other), cursor.current_source_location())),
    }
}

impl ToCss for Component {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            Component::Type { namespace, name } => {
                if let Some(ns) = namespace {
                    dest.write_str(ns)?;
                    dest.write_char('|')?;
                }
                dest.write_str(name)
            }
            Component::Universal { namespace } => {
                if let Some(ns) = namespace {
                    dest.write_str(ns)?;
                    dest.write_char('|')?;
                }
                dest.write_char('*')
            }
            Component::Class(name) => {
                dest.write_char('.')?;
                dest.write_str(&crate::serialize::serialize_identifier(name))
            }
            Component::Id(name) => {
                dest.write_char('#')?;
                dest.write_str(&crate::serialize::serialize_identifier(name))
            }
            Component::Attribute(attr) => {
                dest.write_char('[')?;
                if let Some(ns) = &attr.namespace {
                    dest.write_str(ns)?;
                    dest.write_char('|')?;
                }
                dest.write_str(&attr.name)?;
                if let Some(m) = &attr.matcher {
                    dest.write_str(m.operator.as_str())?;
                    dest.write_str(&crate::serialize::serialize_string(&m.value))?;
                    match m.case_sensitivity {
                        Some(CaseSensitivity::Insensitive) => dest.write_str(" i")?,
                        Some(CaseSensitivity::Sensitive) => dest.write_str(" s")?,
                        None => {}
                    }
                }
                dest.write_char(']')
            }
            Component::PseudoClass(pc) => pc.to_css(dest),
            Component::PseudoElement(pe) => pe.to_css(dest),
            Component::Combinator(c) => c.to_css(dest),
            Component::Nesting => dest.write_char('&'),
        }
    }
}

impl ToCss for PseudoClass {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_char(':')?;
        match self {
            PseudoClass::Hover => dest.write_str("hover"),
            PseudoClass::Active => dest.write_str("active"),
            PseudoClass::Focus => dest.write_str("focus"),
            PseudoClass::FocusVisible => dest.write_str("focus-visible"),
            PseudoClass::FocusWithin => dest.write_str("focus-within"),
            PseudoClass::Visited => dest.write_str("visited"),
            PseudoClass::Link => dest.write_str("link"),
            PseudoClass::AnyLink => dest.write_str("any-link"),
            PseudoClass::Target => dest.write_str("target"),
            PseudoClass::Root => dest.write_str("root"),
            PseudoClass::Empty => dest.write_str("empty"),
            PseudoClass::FirstChild => dest.write_str("first-child"),
            PseudoClass::LastChild => dest.write_str("last-child"),
            PseudoClass::OnlyChild => dest.write_str("only-child"),
            PseudoClass::FirstOfType => dest.write_str("first-of-type"),
            PseudoClass::LastOfType => dest.write_str("last-of-type"),
            PseudoClass::OnlyOfType => dest.write_str("only-of-type"),
            PseudoClass::Disabled => dest.write_str("disabled"),
            PseudoClass::Enabled => dest.write_str("enabled"),
            PseudoClass::Checked => dest.write_str("checked"),
            PseudoClass::Indeterminate => dest.write_str("indeterminate"),
            PseudoClass::Required => dest.write_str("required"),
            PseudoClass::Optional => dest.write_str("optional"),
            PseudoClass::ReadOnly => dest.write_str("read-only"),
            PseudoClass::ReadWrite => dest.write_str("read-write"),
            PseudoClass::PlaceholderShown => dest.write_str("placeholder-shown"),
            PseudoClass::Default => dest.write_str("default"),
            PseudoClass::Valid => dest.write_str("valid"),
            PseudoClass::Invalid => dest.write_str("invalid"),
            PseudoClass::InRange => dest.write_str("in-range"),
            PseudoClass::OutOfRange => dest.write_str("out-of-range"),
            PseudoClass::Host => dest.write_str("host"),
            PseudoClass::Scope => dest.write_str("scope"),
            PseudoClass::Defined => dest.write_str("defined"),
            PseudoClass::Lang(s) => write!(dest, "lang({s})"),
            PseudoClass::Dir(s) => write!(dest, "dir({s})"),
            PseudoClass::NthChild(an_b, of) => write_nth(dest, "nth-child", an_b, of),
            PseudoClass::NthLastChild(an_b, of) => write_nth(dest, "nth-last-child", an_b, of),
            PseudoClass::NthOfType(an_b) => write_nth(dest, "nth-of-type", an_b, &None),
            PseudoClass::NthLastOfType(an_b) => write_nth(dest, "nth-last-of-type", an_b, &None),
            PseudoClass::NthCol(an_b) => write_nth(dest, "nth-col", an_b, &None),
            PseudoClass::NthLastCol(an_b) => write_nth(dest, "nth-last-col", an_b, &None),
            PseudoClass::HostFunction(list) => write_functional_list(dest, "host", list),
            PseudoClass::HostContext(list) => write_functional_list(dest, "host-context", list),
            PseudoClass::Is(list) => write_functional_list(dest, "is", list),
            PseudoClass::Where(list) => write_functional_list(dest, "where", list),
            PseudoClass::Not(list) => write_functional_list(dest, "not", list),
            PseudoClass::Has(list) => write_functional_list(dest, "has", list),
            PseudoClass::Unknown(name, _) => write!(dest, "{name}"),
        }
    }
}

fn write_nth<W: Write>(dest: &mut Printer<W>, name: &str, an_b: &AnPlusB, of: &Option<SelectorList>) -> fmt::Result {
    dest.write_str(name)?;
    dest.write_char('(')?;
    an_b.to_css(dest)?;
    if let Some(list) = of {
        dest.write_str(" of ")?;
        list.to_css(dest)?;
    }
    dest.write_char(')')
}

fn write_functional_list<W: Write>(dest: &mut Printer<W>, name: &str, list: &SelectorList) -> fmt::Result {
    dest.write_str(name)?;
    dest.write_char('(')?;
    list.to_css(dest)?;
    dest.write_char(')')
}

impl ToCss for PseudoElement {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("::")?;
        match self {
            PseudoElement::Before => dest.write_str("before"),
            PseudoElement::After => dest.write_str("after"),
            PseudoElement::FirstLine => dest.write_str("first-line"),
            PseudoElement::FirstLetter => dest.write_str("first-letter"),
            PseudoElement::Selection => dest.write_str("selection"),
            PseudoElement::Placeholder => dest.write_str("placeholder"),
            PseudoElement::Marker => dest.write_str("marker"),
            PseudoElement::Backdrop => dest.write_str("backdrop"),
            PseudoElement::Part(names) => {
                dest.write_str("part(")?;
                for (i, n) in names.iter().enumerate() {
                    if i > 0 {
                        dest.write_char(' ')?;
                    }
                    dest.write_str(n)?;
                }
                dest.write_char(')')
            }
            PseudoElement::Slotted(list) => write_functional_list(dest, "slotted", list),
            PseudoElement::Unknown(name, _) => dest.write_str(name),
        }
    }
}

impl ToCss for Selector {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        for component in &self.components {
            component.to_css(dest)?;
        }
        Ok(())
    }
}

impl ToCss for SelectorList {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                dest.write_str(", ")?;
            }
            selector.to_css(dest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> SelectorList {
        let mut c = Cursor::new(input);
        SelectorList::parse(&mut c).expect("selector list")
    }

    #[test]
    fn class_selector_specificity() {
        let list = parse(".a");
        assert_eq!(list.max_specificity(), Specificity { ids: 0, classes: 1, elements: 0 });
    }

    #[test]
    fn is_contributes_max_specificity() {
        let list = parse("a:is(.x, #y)");
        assert_eq!(list.max_specificity(), Specificity { ids: 1, classes: 0, elements: 1 });
    }

    #[test]
    fn where_contributes_zero() {
        let list = parse("a:where(#y)");
        assert_eq!(list.max_specificity(), Specificity { ids: 0, classes: 0, elements: 1 });
    }

    #[test]
    fn descendant_and_child_combinators() {
        let list = parse("div p");
        assert!(matches!(list.selectors[0].components[1], Component::Combinator(Combinator::Descendant)));
        let list = parse("div > p");
        assert!(matches!(list.selectors[0].components[1], Component::Combinator(Combinator::Child)));
    }

    #[test]
    fn nth_child_odd_even() {
        let list = parse(":nth-child(odd)");
        match &list.selectors[0].components[0] {
            Component::PseudoClass(PseudoClass::NthChild(an_b, _)) => {
                assert_eq!(*an_b, AnPlusB { a: 2, b: 1 });
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nth_child_an_plus_b() {
        let list = parse(":nth-child(2n+1)");
        match &list.selectors[0].components[0] {
            Component::PseudoClass(PseudoClass::NthChild(an_b, _)) => {
                assert_eq!(*an_b, AnPlusB { a: 2, b: 1 });
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn attribute_selector_with_case_flag() {
        let list = parse("[a=\"b\" i]");
        match &list.selectors[0].components[0] {
            Component::Attribute(attr) => {
                assert_eq!(&*attr.name, "a");
                let m = attr.matcher.as_ref().expect("matcher");
                assert_eq!(m.operator, AttrOperator::Equal);
                assert_eq!(m.case_sensitivity, Some(CaseSensitivity::Insensitive));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn specificity_monotonic_under_extension() {
        let base = parse(".a").max_specificity();
        let extended = parse(".a.b").max_specificity();
        assert!(extended.ids >= base.ids && extended.classes >= base.classes && extended.elements >= base.elements);
    }
}
