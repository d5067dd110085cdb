//! Rule, at-rule and stylesheet-level rule-list parsing (§4.6): dispatches
//! on the first significant token of a rule, applies the CSS error-recovery
//! discipline (consume to the next top-level `;` or past the matching
//! close brace) on failure, and hands unknown at-rules to a pluggable
//! [`CustomAtRuleParser`] before falling back to [`Rule::UnknownAtRule`].

use crate::cursor::Cursor;
use crate::declaration::{parse_declaration_list, Declaration};
use crate::error::{ParseError, ParseErrorKind};
use crate::location::SourceLocation;
use crate::selector::{Selector, SelectorList};
use crate::serialize::{write_token_list, Printer, ToCss};
use crate::tokenizer::Token;
use log::{trace, warn};
use std::fmt::{self, Write};

/// Context handed to every [`CustomAtRuleParser`] hook: the source location
/// the at-rule or declaration began at.
#[derive(Debug, Clone)]
pub struct AtRuleContext {
    pub location: SourceLocation,
}

/// The pluggable hook interface a stylesheet parser can be instantiated
/// with (§6.3): one method per at-rule shape, each returning `None` to
/// defer to this crate's default handling. `CustomRule` is the payload
/// type [`Rule::Custom`] carries; instantiate with [`NoCustomAtRules`] and
/// its uninhabited [`NoCustomRule`] when no custom handling is wanted.
pub trait CustomAtRuleParser {
    type CustomRule;

    fn parse_at_rule(&self, name: &str, prelude: &mut Cursor, context: &AtRuleContext) -> Option<Self::CustomRule> {
        let _ = (name, prelude, context);
        None
    }

    fn parse_at_rule_block(
        &self,
        name: &str,
        prelude_tokens: &[Token],
        body: &mut Cursor,
        context: &AtRuleContext,
    ) -> Option<Self::CustomRule> {
        let _ = (name, prelude_tokens, body, context);
        None
    }

    fn parse_declaration(&self, name: &str, value: &mut Cursor, context: &AtRuleContext) -> Option<Self::CustomRule> {
        let _ = (name, value, context);
        None
    }
}

/// An uninhabited payload type: no value of this type can ever be
/// constructed, so `Rule::Custom` is statically known never to occur when
/// a parser is instantiated with [`NoCustomAtRules`].
#[derive(Debug, Clone, PartialEq)]
pub enum NoCustomRule {}

impl ToCss for NoCustomRule {
    fn to_css<W: Write>(&self, _dest: &mut Printer<W>) -> fmt::Result {
        match *self {}
    }
}

/// The default at-rule parser: rejects all custom at-rules, so every
/// at-rule this crate doesn't itself know falls through to
/// [`Rule::UnknownAtRule`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCustomAtRules;

impl CustomAtRuleParser for NoCustomAtRules {
    type CustomRule = NoCustomRule;
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule<CR> {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
    pub rules: Vec<Rule<CR>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportRule {
    pub url: Box<str>,
    /// Any trailing `layer(...)`/`supports(...)`/media-query tokens,
    /// preserved verbatim rather than given their own typed grammar.
    pub condition: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceRule {
    pub prefix: Option<Box<str>>,
    pub url: Box<str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionRule<CR> {
    pub prelude: Vec<Token>,
    pub rules: Vec<Rule<CR>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyframeSelector {
    From,
    To,
    Percentage(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeBlock {
    pub selectors: Vec<KeyframeSelector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesRule {
    pub name: Box<str>,
    pub vendor_prefix: Option<crate::property::VendorPrefix>,
    /// The at-rule keyword exactly as spelled in the source (e.g.
    /// `-WebKit-Keyframes`), kept so serialization round-trips the
    /// author's casing instead of always emitting a canonical lowercase
    /// spelling.
    pub at_keyword: Box<str>,
    pub keyframes: Vec<KeyframeBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationsRule {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedDeclarationsRule {
    pub name: Box<str>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRule {
    pub prelude: Vec<Token>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerStatementRule {
    pub names: Vec<Box<str>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerBlockRule<CR> {
    pub name: Option<Box<str>>,
    pub rules: Vec<Rule<CR>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRule<CR> {
    pub name: Option<Box<str>>,
    pub condition: Vec<Token>,
    pub rules: Vec<Rule<CR>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeRule<CR> {
    pub start: Option<Vec<Token>>,
    pub end: Option<Vec<Token>>,
    pub rules: Vec<Rule<CR>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomMediaRule {
    pub name: Box<str>,
    pub value: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownAtRule {
    pub name: Box<str>,
    pub prelude: Vec<Token>,
    pub block: Option<Vec<Token>>,
}

/// One parsed rule. Generic over `CR`, the payload type a
/// [`CustomAtRuleParser`] produces; defaults to [`NoCustomRule`] so
/// `Rule` (no type parameter) is a perfectly usable name for the common
/// no-custom-handler case.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule<CR = NoCustomRule> {
    Style(StyleRule<CR>),
    Import(ImportRule),
    Namespace(NamespaceRule),
    Media(ConditionRule<CR>),
    Supports(ConditionRule<CR>),
    Keyframes(KeyframesRule),
    FontFace(DeclarationsRule),
    FontFeatureValues(NamedDeclarationsRule),
    FontPaletteValues(NamedDeclarationsRule),
    CounterStyle(NamedDeclarationsRule),
    Page(PageRule),
    LayerStatement(LayerStatementRule),
    LayerBlock(LayerBlockRule<CR>),
    Container(ContainerRule<CR>),
    Scope(ScopeRule<CR>),
    Property(NamedDeclarationsRule),
    CustomMedia(CustomMediaRule),
    StartingStyle(Vec<Rule<CR>>),
    Viewport(DeclarationsRule),
    ViewTransition(DeclarationsRule),
    Nest(StyleRule<CR>),
    NestedDeclarations(DeclarationsRule),
    MozDocument(ConditionRule<CR>),
    UnknownAtRule(UnknownAtRule),
    Custom(CR),
}

/// Parses a single rule, applying the error-recovery policy on failure:
/// consume to the next top-level `;` or past the matching close brace and
/// record a [`ParseError`]. Returns `None` at end of input or after a
/// recovered error; the caller's driving loop should keep calling this
/// until it reports exhaustion via [`Cursor::is_exhausted`].
pub fn parse_rule<P: CustomAtRuleParser>(
    cursor: &mut Cursor,
    custom: &P,
    errors: &mut Vec<ParseError>,
) -> Option<Rule<P::CustomRule>> {
    cursor.skip_whitespace();
    let start = cursor.position();
    let state = cursor.state();
    match cursor.next() {
        Token::Eof => None,
        Token::AtKeyword(name) => {
            let location = cursor.location_at(start);
            match parse_at_rule(cursor, &name, location, custom) {
                Ok(rule) => Some(rule),
                Err(kind) => {
                    recover(cursor);
                    let invalid_text = cursor.slice_from(start).to_string();
                    warn!("{location}: skipping invalid at-rule ({kind})");
                    errors.push(ParseError::new(kind, location, invalid_text));
                    None
                }
            }
        }
        _ => {
            cursor.reset(state);
            let location = cursor.current_source_location();
            match parse_style_rule(cursor, custom) {
                Ok(rule) => Some(Rule::Style(rule)),
                Err(kind) => {
                    recover(cursor);
                    let invalid_text = cursor.slice_from(start).to_string();
                    warn!("{location}: skipping invalid rule ({kind})");
                    errors.push(ParseError::new(kind, location, invalid_text));
                    None
                }
            }
        }
    }
}

/// Consumes whatever is left of a malformed rule: to the next top-level
/// `;`, or past the close of a block if one was opened.
fn recover(cursor: &mut Cursor) {
    loop {
        match cursor.next_including_whitespace() {
            Token::Eof | Token::Semicolon => return,
            Token::CurlyBracketBlock => {
                let _ = cursor.parse_nested_block(|_| Ok(()));
                return;
            }
            Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let _ = cursor.parse_nested_block(|_| Ok(()));
            }
            Token::Function(_) => {
                let _ = cursor.parse_nested_block(|_| Ok(()));
            }
            _ => continue,
        }
    }
}

/// Collects every token up to the top-level `;`/`{`/eof that ends a
/// prelude, leaving that terminator for the caller to consume. Any
/// `(...)`/`[...]`/`func(...)` encountered along the way is collected whole,
/// including its own close token, via [`push_block`] — so a matching close
/// nested inside the prelude is never mistaken for the cursor's virtual
/// end-of-block `Eof`.
fn collect_prelude(cursor: &mut Cursor) -> Vec<Token> {
    let mut out = Vec::new();
    loop {
        let state = cursor.state();
        match cursor.next() {
            Token::Eof => break,
            Token::Semicolon | Token::CurlyBracketBlock => {
                cursor.reset(state);
                break;
            }
            tok if tok.opens_block() => push_block(cursor, tok, &mut out),
            tok => out.push(tok),
        }
    }
    out
}

/// Collects every remaining token in the cursor's current block, recursing
/// through [`push_block`] for any nested block. Used as the contents of an
/// already-opened block, where the block's own virtual `Eof` (rather than a
/// top-level `;`/`{`) is what bounds the collection.
fn collect_block_contents(cursor: &mut Cursor) -> Vec<Token> {
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
    out.extend(cursor.parse_nested_block(|c| Ok(collect_block_contents(c))).unwrap_or_default());
    out.push(close);
}

fn parse_style_rule<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> Result<StyleRule<P::CustomRule>, ParseErrorKind> {
    let selectors = SelectorList::parse(cursor).map_err(|e| ParseErrorKind::from(e.kind))?;
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::QualifiedRuleInvalid);
    }
    let (declarations, rules) = cursor
        .parse_nested_block(|c| Ok(parse_style_body(c, custom)))
        .unwrap_or_default();
    Ok(StyleRule { selectors, declarations, rules })
}

/// Parses a style rule's body: an interleaving of declarations and nested
/// qualified/at-rules (CSS Nesting), in source order.
fn parse_style_body<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> (Vec<Declaration>, Vec<Rule<P::CustomRule>>) {
    let mut declarations = Vec::new();
    let mut nested = Vec::new();
    let mut errors = Vec::new();
    loop {
        let leading = parse_declaration_list(cursor, &mut errors);
        declarations.extend(leading);
        if cursor.is_exhausted() {
            break;
        }
        match parse_rule(cursor, custom, &mut errors) {
            Some(rule) => nested.push(rule),
            None => {
                if cursor.is_exhausted() {
                    break;
                }
            }
        }
    }
    (declarations, nested)
}

fn parse_at_rule<P: CustomAtRuleParser>(
    cursor: &mut Cursor,
    name: &str,
    location: SourceLocation,
    custom: &P,
) -> Result<Rule<P::CustomRule>, ParseErrorKind> {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "import" => parse_import(cursor),
        "namespace" => parse_namespace(cursor),
        "media" => parse_condition_rule(cursor, custom).map(Rule::Media),
        "supports" => parse_condition_rule(cursor, custom).map(Rule::Supports),
        "container" => parse_container(cursor, custom),
        "scope" => parse_scope(cursor, custom),
        "-moz-document" | "document" => parse_condition_rule(cursor, custom).map(Rule::MozDocument),
        "starting-style" => parse_block_only(cursor, custom).map(Rule::StartingStyle),
        "layer" => parse_layer(cursor, custom),
        "keyframes" | "-webkit-keyframes" | "-moz-keyframes" | "-o-keyframes" => parse_keyframes(cursor, &lower, name),
        "font-face" => parse_declarations_only(cursor).map(Rule::FontFace),
        "viewport" | "-ms-viewport" => parse_declarations_only(cursor).map(Rule::Viewport),
        "view-transition" => parse_declarations_only(cursor).map(Rule::ViewTransition),
        "font-feature-values" => parse_named_declarations(cursor).map(Rule::FontFeatureValues),
        "font-palette-values" => parse_named_declarations(cursor).map(Rule::FontPaletteValues),
        "counter-style" => parse_named_declarations(cursor).map(Rule::CounterStyle),
        "property" => parse_named_declarations(cursor).map(Rule::Property),
        "page" => parse_page(cursor),
        "custom-media" => parse_custom_media(cursor),
        "nest" => parse_nest(cursor, custom),
        _ => parse_custom_or_unknown(cursor, name, location, custom),
    }
}

fn expect_semicolon_or_block_start(cursor: &mut Cursor) -> Result<bool, ParseErrorKind> {
    cursor.skip_whitespace();
    let state = cursor.state();
    match cursor.next() {
        Token::Semicolon | Token::Eof => Ok(false),
        Token::CurlyBracketBlock => Ok(true),
        other => {
            cursor.reset(state);
            Err(ParseErrorKind::UnexpectedToken(other))
        }
    }
}

fn parse_import<CR>(cursor: &mut Cursor) -> Result<Rule<CR>, ParseErrorKind> {
    cursor.skip_whitespace();
    let url = match cursor.next() {
        Token::QuotedString(s) => s,
        Token::Url(s) => s,
        other => return Err(ParseErrorKind::UnexpectedToken(other)),
    };
    let condition = collect_prelude(cursor);
    if !expect_semicolon_or_block_start(cursor).map_err(|_| ParseErrorKind::AtRuleInvalid("import".into()))? {
        Ok(Rule::Import(ImportRule { url, condition }))
    } else {
        Err(ParseErrorKind::AtRuleInvalid("import".into()))
    }
}

fn parse_namespace<CR>(cursor: &mut Cursor) -> Result<Rule<CR>, ParseErrorKind> {
    cursor.skip_whitespace();
    let state = cursor.state();
    let prefix = match cursor.try_parse(|c| c.expect_ident()) {
        Ok(ident) => Some(ident),
        Err(_) => {
            cursor.reset(state);
            None
        }
    };
    cursor.skip_whitespace();
    let url = match cursor.next() {
        Token::QuotedString(s) => s,
        Token::Url(s) => s,
        other => return Err(ParseErrorKind::UnexpectedToken(other)),
    };
    if expect_semicolon_or_block_start(cursor).map_err(|_| ParseErrorKind::AtRuleInvalid("namespace".into()))? {
        return Err(ParseErrorKind::AtRuleInvalid("namespace".into()));
    }
    Ok(Rule::Namespace(NamespaceRule { prefix, url }))
}

fn parse_condition_rule<P: CustomAtRuleParser>(
    cursor: &mut Cursor,
    custom: &P,
) -> Result<ConditionRule<P::CustomRule>, ParseErrorKind> {
    let prelude = collect_prelude(cursor);
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let rules = cursor.parse_nested_block(|c| Ok(parse_rule_list(c, custom))).unwrap_or_default();
    Ok(ConditionRule { prelude, rules })
}

fn parse_container<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> Result<Rule<P::CustomRule>, ParseErrorKind> {
    cursor.skip_whitespace();
    let state = cursor.state();
    let name = match cursor.try_parse(|c| c.expect_ident()) {
        Ok(ident) if !ident.eq_ignore_ascii_case("not") => Some(ident),
        _ => {
            cursor.reset(state);
            None
        }
    };
    let condition = collect_prelude(cursor);
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let rules = cursor.parse_nested_block(|c| Ok(parse_rule_list(c, custom))).unwrap_or_default();
    Ok(Rule::Container(ContainerRule { name, condition, rules }))
}

fn parse_scope<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> Result<Rule<P::CustomRule>, ParseErrorKind> {
    cursor.skip_whitespace();
    let mut start = None;
    if cursor.try_parse(|c| c.expect_parenthesis_block()).is_ok() {
        start = Some(cursor.parse_nested_block(|c| Ok(collect_block_contents(c))).unwrap_or_default());
    }
    cursor.skip_whitespace();
    let mut end = None;
    if cursor.try_parse(|c| c.expect_ident_matching("to")).is_ok() {
        cursor.skip_whitespace();
        cursor.expect_parenthesis_block().map_err(|e| ParseErrorKind::from(e.kind))?;
        end = Some(cursor.parse_nested_block(|c| Ok(collect_block_contents(c))).unwrap_or_default());
    }
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let rules = cursor.parse_nested_block(|c| Ok(parse_rule_list(c, custom))).unwrap_or_default();
    Ok(Rule::Scope(ScopeRule { start, end, rules }))
}

fn parse_block_only<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> Result<Vec<Rule<P::CustomRule>>, ParseErrorKind> {
    cursor.skip_whitespace();
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    Ok(cursor.parse_nested_block(|c| Ok(parse_rule_list(c, custom))).unwrap_or_default())
}

fn parse_layer<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> Result<Rule<P::CustomRule>, ParseErrorKind> {
    cursor.skip_whitespace();
    let mut names = Vec::new();
    let state = cursor.state();
    if let Ok(first) = cursor.try_parse(|c| c.expect_ident()) {
        names.push(first);
        loop {
            let before_comma = cursor.state();
            if cursor.next() == Token::Comma {
                cursor.skip_whitespace();
                match cursor.try_parse(|c| c.expect_ident()) {
                    Ok(ident) => names.push(ident),
                    Err(_) => {
                        cursor.reset(before_comma);
                        break;
                    }
                }
            } else {
                cursor.reset(before_comma);
                break;
            }
        }
    } else {
        cursor.reset(state);
    }
    cursor.skip_whitespace();
    let block_state = cursor.state();
    match cursor.next() {
        Token::CurlyBracketBlock => {
            let rules = cursor.parse_nested_block(|c| Ok(parse_rule_list(c, custom))).unwrap_or_default();
            let name = if names.len() == 1 { names.into_iter().next() } else { None };
            Ok(Rule::LayerBlock(LayerBlockRule { name, rules }))
        }
        Token::Semicolon | Token::Eof => {
            if names.is_empty() {
                return Err(ParseErrorKind::AtRuleInvalid("layer".into()));
            }
            Ok(Rule::LayerStatement(LayerStatementRule { names }))
        }
        _ => {
            cursor.reset(block_state);
            Err(ParseErrorKind::AtRuleInvalid("layer".into()))
        }
    }
}

fn parse_keyframes<CR>(cursor: &mut Cursor, lower: &str, original: &str) -> Result<Rule<CR>, ParseErrorKind> {
    use crate::property::VendorPrefix;
    let vendor_prefix = match lower {
        "-webkit-keyframes" => Some(VendorPrefix::Webkit),
        "-moz-keyframes" => Some(VendorPrefix::Moz),
        "-o-keyframes" => Some(VendorPrefix::O),
        _ => None,
    };
    let at_keyword = original.into();
    cursor.skip_whitespace();
    let name = match cursor.next() {
        Token::Ident(s) => s,
        Token::QuotedString(s) => s,
        other => return Err(ParseErrorKind::UnexpectedToken(other)),
    };
    cursor.skip_whitespace();
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let keyframes = cursor.parse_nested_block(|c| Ok(parse_keyframe_blocks(c))).unwrap_or_default();
    Ok(Rule::Keyframes(KeyframesRule { name, vendor_prefix, at_keyword, keyframes }))
}

fn parse_keyframe_blocks(cursor: &mut Cursor) -> Vec<KeyframeBlock> {
    let mut blocks = Vec::new();
    loop {
        cursor.skip_whitespace();
        if cursor.is_exhausted() {
            break;
        }
        let selectors = cursor.parse_comma_separated(parse_keyframe_selector);
        let Ok(selectors) = selectors else {
            cursor.consume_until_semicolon_or_block_end();
            continue;
        };
        if !matches!(cursor.next(), Token::CurlyBracketBlock) {
            continue;
        }
        let mut errors = Vec::new();
        let declarations = cursor.parse_nested_block(|c| Ok(parse_declaration_list(c, &mut errors))).unwrap_or_default();
        blocks.push(KeyframeBlock { selectors, declarations });
    }
    blocks
}

fn parse_keyframe_selector(cursor: &mut Cursor) -> crate::error::BasicParseResult<KeyframeSelector> {
    use crate::error::{BasicParseError, BasicParseErrorKind};
    let state = cursor.state();
    match cursor.next() {
        Token::Ident(s) if s.eq_ignore_ascii_case("from") => Ok(KeyframeSelector::From),
        Token::Ident(s) if s.eq_ignore_ascii_case("to") => Ok(KeyframeSelector::To),
        Token::Percentage(n) => Ok(KeyframeSelector::Percentage(n.value / 100.0)),
        other => {
            cursor.reset(state);
            Err(BasicParseError::new(BasicParseErrorKind::UnexpectedToken(other), cursor.current_source_location()))
        }
    }
}

fn parse_declarations_only<CR>(cursor: &mut Cursor) -> Result<DeclarationsRule, ParseErrorKind> {
    cursor.skip_whitespace();
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let mut errors = Vec::new();
    let declarations = cursor
        .parse_nested_block(|c| Ok(parse_declaration_list(c, &mut errors)))
        .unwrap_or_default();
    let _: Option<CR> = None;
    Ok(DeclarationsRule { declarations })
}

fn parse_named_declarations(cursor: &mut Cursor) -> Result<NamedDeclarationsRule, ParseErrorKind> {
    cursor.skip_whitespace();
    let name = match cursor.next() {
        Token::Ident(s) => s,
        other => return Err(ParseErrorKind::UnexpectedToken(other)),
    };
    cursor.skip_whitespace();
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let mut errors = Vec::new();
    let declarations = cursor
        .parse_nested_block(|c| Ok(parse_declaration_list(c, &mut errors)))
        .unwrap_or_default();
    Ok(NamedDeclarationsRule { name, declarations })
}

fn parse_page<CR>(cursor: &mut Cursor) -> Result<Rule<CR>, ParseErrorKind> {
    let prelude = collect_prelude(cursor);
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let mut errors = Vec::new();
    let declarations = cursor
        .parse_nested_block(|c| Ok(parse_declaration_list(c, &mut errors)))
        .unwrap_or_default();
    Ok(Rule::Page(PageRule { prelude, declarations }))
}

fn parse_custom_media<CR>(cursor: &mut Cursor) -> Result<Rule<CR>, ParseErrorKind> {
    cursor.skip_whitespace();
    let name = match cursor.next() {
        Token::Ident(s) => s,
        other => return Err(ParseErrorKind::UnexpectedToken(other)),
    };
    let value = collect_prelude(cursor);
    if expect_semicolon_or_block_start(cursor).map_err(|_| ParseErrorKind::AtRuleInvalid("custom-media".into()))? {
        return Err(ParseErrorKind::AtRuleInvalid("custom-media".into()));
    }
    Ok(Rule::CustomMedia(CustomMediaRule { name, value }))
}

fn parse_nest<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> Result<Rule<P::CustomRule>, ParseErrorKind> {
    let selectors = SelectorList::parse(cursor).map_err(|e| ParseErrorKind::from(e.kind))?;
    if !matches!(cursor.next(), Token::CurlyBracketBlock) {
        return Err(ParseErrorKind::AtRuleBodyInvalid);
    }
    let (declarations, rules) = cursor
        .parse_nested_block(|c| Ok(parse_style_body(c, custom)))
        .unwrap_or_default();
    Ok(Rule::Nest(StyleRule { selectors, declarations, rules }))
}

/// Handles any at-rule name this crate has no dedicated variant for: first
/// offers the prelude (and, if a block follows, the block) to the
/// [`CustomAtRuleParser`] hooks, then falls back to preserving it verbatim
/// as a [`Rule::UnknownAtRule`].
fn parse_custom_or_unknown<P: CustomAtRuleParser>(
    cursor: &mut Cursor,
    name: &str,
    location: SourceLocation,
    custom: &P,
) -> Result<Rule<P::CustomRule>, ParseErrorKind> {
    let context = AtRuleContext { location };
    let prelude_start = cursor.position();
    let prelude = collect_prelude(cursor);
    let prelude_text = cursor.slice_from(prelude_start).to_string();

    match cursor.next() {
        Token::Semicolon | Token::Eof => {
            let mut prelude_cursor = Cursor::new(&prelude_text);
            if let Some(custom_rule) = custom.parse_at_rule(name, &mut prelude_cursor, &context) {
                return Ok(Rule::Custom(custom_rule));
            }
            trace!("{location}: no handler for @{name}, preserving as unknown at-rule");
            Ok(Rule::UnknownAtRule(UnknownAtRule { name: name.into(), prelude, block: None }))
        }
        Token::CurlyBracketBlock => {
            let block_start = cursor.position();
            let _ = cursor.parse_nested_block(|_| Ok(()));
            let block_text = cursor.slice_from(block_start).to_string();
            let mut body_cursor = Cursor::new(&block_text);
            if let Some(custom_rule) = custom.parse_at_rule_block(name, &prelude, &mut body_cursor, &context) {
                return Ok(Rule::Custom(custom_rule));
            }
            trace!("{location}: no handler for @{name} block, preserving as unknown at-rule");
            let block_tokens = collect_block_contents(&mut Cursor::new(&block_text));
            Ok(Rule::UnknownAtRule(UnknownAtRule {
                name: name.into(),
                prelude,
                block: Some(block_tokens),
            }))
        }
        other => Err(ParseErrorKind::UnexpectedToken(other)),
    }
}

/// Drives a nested rule list (inside `@media`, `@layer`, `{}` etc.) until
/// exhausted, collecting successfully parsed rules and discarding errors
/// that occurred along the way (the stylesheet-level caller records its
/// own top-level errors; nested bodies keep parsing best-effort).
fn parse_rule_list<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> Vec<Rule<P::CustomRule>> {
    let mut rules = Vec::new();
    let mut errors = Vec::new();
    loop {
        cursor.skip_whitespace();
        if cursor.is_exhausted() {
            break;
        }
        match parse_rule(cursor, custom, &mut errors) {
            Some(rule) => rules.push(rule),
            None => {
                if cursor.is_exhausted() {
                    break;
                }
            }
        }
    }
    rules
}

/// Drives [`parse_rule`] over an entire top-level rule list, stripping any
/// leading/interleaved CDO/CDC tokens (§4.6: "Also handles top-of-file
/// `<!--`/`-->` stripping") the way a stylesheet body tolerates them for
/// HTML-embedded `<style>` compatibility.
pub fn parse_stylesheet_rules<P: CustomAtRuleParser>(cursor: &mut Cursor, custom: &P) -> (Vec<Rule<P::CustomRule>>, Vec<ParseError>) {
    let mut rules = Vec::new();
    let mut errors = Vec::new();
    loop {
        loop {
            cursor.skip_whitespace();
            let state = cursor.state();
            match cursor.next_including_whitespace() {
                Token::Cdo | Token::Cdc => continue,
                _ => {
                    cursor.reset(state);
                    break;
                }
            }
        }
        if cursor.is_exhausted() {
            break;
        }
        match parse_rule(cursor, custom, &mut errors) {
            Some(rule) => rules.push(rule),
            None => {
                if cursor.is_exhausted() {
                    break;
                }
            }
        }
    }
    (rules, errors)
}

fn write_rule_list<W: Write, CR: ToCss>(dest: &mut Printer<W>, rules: &[Rule<CR>]) -> fmt::Result {
    dest.indent();
    for rule in rules {
        dest.newline()?;
        rule.to_css(dest)?;
    }
    dest.dedent();
    dest.newline()
}

fn write_block<W: Write, CR: ToCss>(
    dest: &mut Printer<W>,
    declarations: &[Declaration],
    nested: &[Rule<CR>],
) -> fmt::Result {
    dest.write_str(" {")?;
    dest.indent();
    for decl in declarations {
        dest.newline()?;
        decl.to_css(dest)?;
        dest.write_str(";")?;
    }
    for rule in nested {
        dest.newline()?;
        rule.to_css(dest)?;
    }
    dest.dedent();
    dest.newline()?;
    dest.write_str("}")
}

fn write_declarations_block<W: Write>(dest: &mut Printer<W>, declarations: &[Declaration]) -> fmt::Result {
    write_block::<W, NoCustomRule>(dest, declarations, &[])
}

impl<CR: ToCss> ToCss for StyleRule<CR> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        self.selectors.to_css(dest)?;
        write_block(dest, &self.declarations, &self.rules)
    }
}

impl ToCss for ImportRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@import ")?;
        dest.write_str(&crate::serialize::serialize_string(&self.url))?;
        for tok in &self.condition {
            dest.write_str(" ")?;
            crate::serialize::write_token(dest, tok)?;
        }
        dest.write_str(";")
    }
}

impl ToCss for NamespaceRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@namespace ")?;
        if let Some(prefix) = &self.prefix {
            dest.write_str(prefix)?;
            dest.write_str(" ")?;
        }
        dest.write_str(&crate::serialize::serialize_string(&self.url))?;
        dest.write_str(";")
    }
}

fn write_condition_rule<W: Write, CR: ToCss>(dest: &mut Printer<W>, name: &str, rule: &ConditionRule<CR>) -> fmt::Result {
    dest.write_str("@")?;
    dest.write_str(name)?;
    for tok in &rule.prelude {
        dest.write_str(" ")?;
        crate::serialize::write_token(dest, tok)?;
    }
    dest.write_str(" {")?;
    write_rule_list(dest, &rule.rules)?;
    dest.write_str("}")
}

impl ToCss for KeyframeSelector {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            KeyframeSelector::From => dest.write_str("from"),
            KeyframeSelector::To => dest.write_str("to"),
            KeyframeSelector::Percentage(p) => dest.write_str(&format!("{}%", crate::values::length::format_number(p * 100.0))),
        }
    }
}

impl ToCss for KeyframeBlock {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        for (i, sel) in self.selectors.iter().enumerate() {
            if i > 0 {
                dest.write_str(", ")?;
            }
            sel.to_css(dest)?;
        }
        write_declarations_block(dest, &self.declarations)
    }
}

impl ToCss for KeyframesRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@")?;
        dest.write_str(&self.at_keyword)?;
        dest.write_str(" ")?;
        dest.write_str(&crate::serialize::serialize_identifier(&self.name))?;
        dest.write_str(" {")?;
        dest.indent();
        for block in &self.keyframes {
            dest.newline()?;
            block.to_css(dest)?;
        }
        dest.dedent();
        dest.newline()?;
        dest.write_str("}")
    }
}

impl ToCss for DeclarationsRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        write_declarations_block(dest, &self.declarations)
    }
}

fn write_named_declarations<W: Write>(dest: &mut Printer<W>, name: &str, rule: &NamedDeclarationsRule) -> fmt::Result {
    dest.write_str("@")?;
    dest.write_str(name)?;
    dest.write_str(" ")?;
    dest.write_str(&rule.name)?;
    write_declarations_block(dest, &rule.declarations)
}

impl ToCss for PageRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@page")?;
        for tok in &self.prelude {
            dest.write_str(" ")?;
            crate::serialize::write_token(dest, tok)?;
        }
        write_declarations_block(dest, &self.declarations)
    }
}

impl ToCss for LayerStatementRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@layer ")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                dest.write_str(", ")?;
            }
            dest.write_str(name)?;
        }
        dest.write_str(";")
    }
}

impl<CR: ToCss> ToCss for LayerBlockRule<CR> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@layer")?;
        if let Some(name) = &self.name {
            dest.write_str(" ")?;
            dest.write_str(name)?;
        }
        dest.write_str(" {")?;
        write_rule_list(dest, &self.rules)?;
        dest.write_str("}")
    }
}

impl<CR: ToCss> ToCss for ContainerRule<CR> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@container")?;
        if let Some(name) = &self.name {
            dest.write_str(" ")?;
            dest.write_str(name)?;
        }
        for tok in &self.condition {
            dest.write_str(" ")?;
            crate::serialize::write_token(dest, tok)?;
        }
        dest.write_str(" {")?;
        write_rule_list(dest, &self.rules)?;
        dest.write_str("}")
    }
}

impl<CR: ToCss> ToCss for ScopeRule<CR> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@scope")?;
        if let Some(start) = &self.start {
            dest.write_str(" (")?;
            write_token_list(dest, start)?;
            dest.write_str(")")?;
        }
        if let Some(end) = &self.end {
            dest.write_str(" to (")?;
            write_token_list(dest, end)?;
            dest.write_str(")")?;
        }
        dest.write_str(" {")?;
        write_rule_list(dest, &self.rules)?;
        dest.write_str("}")
    }
}

impl ToCss for CustomMediaRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@custom-media ")?;
        dest.write_str(&self.name)?;
        dest.write_str(" ")?;
        write_token_list(dest, &self.value)?;
        dest.write_str(";")
    }
}

impl ToCss for UnknownAtRule {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        dest.write_str("@")?;
        dest.write_str(&self.name)?;
        for tok in &self.prelude {
            dest.write_str(" ")?;
            crate::serialize::write_token(dest, tok)?;
        }
        match &self.block {
            Some(tokens) => {
                dest.write_str(" {")?;
                write_token_list(dest, tokens)?;
                dest.write_str("}")
            }
            None => dest.write_str(";"),
        }
    }
}

impl<CR: ToCss> ToCss for Rule<CR> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        match self {
            Rule::Style(r) => r.to_css(dest),
            Rule::Import(r) => r.to_css(dest),
            Rule::Namespace(r) => r.to_css(dest),
            Rule::Media(r) => write_condition_rule(dest, "media", r),
            Rule::Supports(r) => write_condition_rule(dest, "supports", r),
            Rule::Keyframes(r) => r.to_css(dest),
            Rule::FontFace(r) => {
                dest.write_str("@font-face")?;
                r.to_css(dest)
            }
            Rule::FontFeatureValues(r) => write_named_declarations(dest, "font-feature-values", r),
            Rule::FontPaletteValues(r) => write_named_declarations(dest, "font-palette-values", r),
            Rule::CounterStyle(r) => write_named_declarations(dest, "counter-style", r),
            Rule::Page(r) => r.to_css(dest),
            Rule::LayerStatement(r) => r.to_css(dest),
            Rule::LayerBlock(r) => r.to_css(dest),
            Rule::Container(r) => r.to_css(dest),
            Rule::Scope(r) => r.to_css(dest),
            Rule::Property(r) => write_named_declarations(dest, "property", r),
            Rule::CustomMedia(r) => r.to_css(dest),
            Rule::StartingStyle(rules) => {
                dest.write_str("@starting-style {")?;
                write_rule_list(dest, rules)?;
                dest.write_str("}")
            }
            Rule::Viewport(r) => {
                dest.write_str("@viewport")?;
                r.to_css(dest)
            }
            Rule::ViewTransition(r) => {
                dest.write_str("@view-transition")?;
                r.to_css(dest)
            }
            Rule::Nest(r) => {
                dest.write_str("@nest ")?;
                r.to_css(dest)
            }
            Rule::NestedDeclarations(r) => write_declarations_block(dest, &r.declarations),
            Rule::MozDocument(r) => write_condition_rule(dest, "-moz-document", r),
            Rule::UnknownAtRule(r) => r.to_css(dest),
            Rule::Custom(r) => r.to_css(dest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &str) -> (Option<Rule>, Vec<ParseError>) {
        let mut cursor = Cursor::new(input);
        let mut errors = Vec::new();
        let rule = parse_rule(&mut cursor, &NoCustomAtRules, &mut errors);
        (rule, errors)
    }

    #[test]
    fn parses_style_rule() {
        let (rule, errors) = parse_one(".a { color: red; }");
        assert!(errors.is_empty());
        match rule {
            Some(Rule::Style(r)) => {
                assert_eq!(r.declarations.len(), 1);
                assert_eq!(r.selectors.max_specificity(), crate::selector::Specificity { ids: 0, classes: 1, elements: 0 });
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn style_rule_round_trips() {
        let (rule, _) = parse_one(".a { color: red; }");
        let text = rule.unwrap().to_css_string_with(crate::serialize::PrinterOptions { minify: true, indent_width: 0 });
        assert_eq!(text, ".a{color:red}");
    }

    #[test]
    fn unknown_at_rule_preserved() {
        let (rule, errors) = parse_one("@frobnicate foo bar;");
        assert!(errors.is_empty());
        assert!(matches!(rule, Some(Rule::UnknownAtRule(_))));
    }

    #[test]
    fn media_rule_nests_style_rules() {
        let (rule, _) = parse_one("@media (min-width: 100px) { .a { color: red; } }");
        match rule {
            Some(Rule::Media(r)) => assert_eq!(r.rules.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn layer_statement_vs_block() {
        let (rule, _) = parse_one("@layer a, b;");
        assert!(matches!(rule, Some(Rule::LayerStatement(_))));
        let (rule, _) = parse_one("@layer a { .x { color: blue; } }");
        match rule {
            Some(Rule::LayerBlock(r)) => assert_eq!(r.name.as_deref(), Some("a")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_qualified_rule_recovers() {
        let (rule, errors) = parse_one(".a { ");
        assert!(rule.is_none() || matches!(rule, Some(Rule::Style(_))));
        let _ = errors;
    }

    #[test]
    fn recovery_rule_skips_past_malformed_selector_block() {
        let mut cursor = Cursor::new("123abc { color: red; } .ok { color: blue; }");
        let mut errors = Vec::new();
        let rule: Option<Rule> = parse_rule(&mut cursor, &NoCustomAtRules, &mut errors);
        assert!(rule.is_none());
        assert_eq!(errors.len(), 1);
        let mut errors2 = Vec::new();
        let rule2: Option<Rule> = parse_rule(&mut cursor, &NoCustomAtRules, &mut errors2);
        assert!(matches!(rule2, Some(Rule::Style(_))));
    }
}
