//! The stylesheet driver (§4.6, §6.2): repeatedly invokes the rule parser
//! until the input is exhausted, collecting rules and errors, and exposes
//! the public parsing entry points (`stylesheet`, `rules`, `errors`,
//! `value`, `declarations`, `tokenize`, `result`).

use crate::cursor::Cursor;
use crate::declaration::{parse_declaration_list, Declaration};
use crate::error::{BasicParseResult, ParseError, ParseErrorKind};
use crate::rule::{parse_stylesheet_rules, CustomAtRuleParser, NoCustomAtRules, NoCustomRule, Rule};
use crate::serialize::{Printer, ToCss};
use crate::tokenizer::{Token, Tokenizer};
use log::debug;
use std::fmt::{self, Write};
use std::sync::OnceLock;

/// A fully parsed stylesheet: its rules plus whatever source-map metadata
/// the tokenizer sighted in a trailing `/*# sourceMappingURL=... */` or
/// `/*# sourceURL=... */` comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet<CR = NoCustomRule> {
    pub rules: Vec<Rule<CR>>,
    pub source_map_url: Option<Box<str>>,
    pub source_url: Option<Box<str>>,
}

impl<CR> Stylesheet<CR> {
    /// Concatenates several stylesheets' rules into one, in order, clearing
    /// the source-map metadata since the result no longer corresponds to a
    /// single source file.
    #[must_use]
    pub fn merged(sheets: impl IntoIterator<Item = Self>) -> Self {
        let mut rules = Vec::new();
        for sheet in sheets {
            rules.extend(sheet.rules);
        }
        Stylesheet {
            rules,
            source_map_url: None,
            source_url: None,
        }
    }
}

impl<CR: ToCss> ToCss for Stylesheet<CR> {
    fn to_css<W: Write>(&self, dest: &mut Printer<W>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                dest.newline()?;
            }
            rule.to_css(dest)?;
        }
        Ok(())
    }
}

/// The bundle `result` (§6.2) hands back: rules, recoverable errors, and
/// source-map metadata, computed together in a single driver pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserResult<CR = NoCustomRule> {
    pub rules: Vec<Rule<CR>>,
    pub errors: Vec<ParseError>,
    pub source_map_url: Option<Box<str>>,
    pub source_url: Option<Box<str>>,
}

impl<CR: Clone> ParserResult<CR> {
    #[must_use]
    pub fn stylesheet(&self) -> Stylesheet<CR> {
        Stylesheet {
            rules: self.rules.clone(),
            source_map_url: self.source_map_url.clone(),
            source_url: self.source_url.clone(),
        }
    }
}

/// Scans every comment in the source — including ones inside rule bodies,
/// since tools commonly append the sourceMappingURL comment at the very end
/// of a minified file — for the last `/*# sourceMappingURL=... */` or
/// `/*# sourceURL=... */` annotation (§4.1).
fn scan_source_map_comments(source: &str) -> (Option<Box<str>>, Option<Box<str>>) {
    let mut map_url = None;
    let mut source_url = None;
    let mut tokenizer = Tokenizer::new(source);
    loop {
        match tokenizer.next_token() {
            Token::Eof => break,
            Token::Comment(text) => {
                let trimmed = text.trim();
                if let Some(rest) = trimmed.strip_prefix('#').map(str::trim) {
                    if let Some(url) = rest.strip_prefix("sourceMappingURL=") {
                        map_url = Some(url.trim().into());
                    } else if let Some(url) = rest.strip_prefix("sourceURL=") {
                        source_url = Some(url.trim().into());
                    }
                }
            }
            _ => continue,
        }
    }
    (map_url, source_url)
}

/// Constructed over `(source, optional source file, optional custom at-rule
/// handler)` (§6.2). `P` defaults to [`NoCustomAtRules`] — a parser with no
/// custom at-rule handling is just `CssParser::new(source)`.
pub struct CssParser<'a, P: CustomAtRuleParser = NoCustomAtRules> {
    source: &'a str,
    file: Option<String>,
    custom: P,
    cache: OnceLock<ParserResult<P::CustomRule>>,
}

impl<'a> CssParser<'a, NoCustomAtRules> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_custom_at_rules(source, None, NoCustomAtRules)
    }

    #[must_use]
    pub fn with_file(source: &'a str, file: impl Into<String>) -> Self {
        Self::with_custom_at_rules(source, Some(file.into()), NoCustomAtRules)
    }
}

impl<'a, P: CustomAtRuleParser> CssParser<'a, P> {
    #[must_use]
    pub fn with_custom_at_rules(source: &'a str, file: Option<String>, custom: P) -> Self {
        Self {
            source,
            file,
            custom,
            cache: OnceLock::new(),
        }
    }

    /// The bundle of rules, errors and source-map metadata (§6.2). Computed
    /// once via a one-shot initialization primitive (§4.9, §5): concurrent
    /// readers observe a single, consistent parse without locking on every
    /// access.
    pub fn result(&self) -> &ParserResult<P::CustomRule> {
        self.cache.get_or_init(|| self.parse())
    }

    fn parse(&self) -> ParserResult<P::CustomRule> {
        let mut cursor = Cursor::with_file(self.source, self.file.clone());
        let (rules, errors) = parse_stylesheet_rules(&mut cursor, &self.custom);
        let (source_map_url, source_url) = scan_source_map_comments(self.source);
        debug!(
            "parsed {} rule(s), {} recoverable error(s)",
            rules.len(),
            errors.len()
        );
        ParserResult {
            rules,
            errors,
            source_map_url,
            source_url,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule<P::CustomRule>] {
        &self.result().rules
    }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.result().errors
    }

    #[must_use]
    pub fn stylesheet(&self) -> Stylesheet<P::CustomRule>
    where
        P::CustomRule: Clone,
    {
        self.result().stylesheet()
    }

    /// Declaration-list parse mode (§6.2): parses the source the way an
    /// inline `style="..."` attribute string would be, rather than as a
    /// full stylesheet of rules.
    #[must_use]
    pub fn declarations(&self) -> (Vec<Declaration>, Vec<ParseError>) {
        parse_declarations(self.source)
    }

    /// A lazy token iterator over the source (§6.2), independent of
    /// whitespace/comment skipping or block nesting.
    pub fn tokenize(&self) -> Tokenizer<'a> {
        Tokenizer::with_file(self.source, self.file.clone())
    }
}

/// Declaration-list parse mode as a free function, usable without
/// constructing a [`CssParser`] — the shape a style-attribute parser reaches
/// for directly.
#[must_use]
pub fn parse_declarations(source: &str) -> (Vec<Declaration>, Vec<ParseError>) {
    let mut cursor = Cursor::new(source);
    let mut errors = Vec::new();
    let declarations = parse_declaration_list(&mut cursor, &mut errors);
    (declarations, errors)
}

/// Single-value parse mode (§6.2, §7): runs `parse` over the entire input
/// and requires it to consume every non-whitespace token. Leftover tokens
/// after a successfully parsed value are an error, unlike every other entry
/// point in this crate, which recovers and continues.
pub fn parse_value<T>(source: &str, parse: impl FnOnce(&mut Cursor) -> BasicParseResult<T>) -> Result<T, ParseError> {
    let mut cursor = Cursor::new(source);
    cursor.skip_whitespace();
    match parse(&mut cursor) {
        Ok(value) => {
            cursor.skip_whitespace();
            if cursor.is_exhausted() {
                Ok(value)
            } else {
                let location = cursor.current_source_location();
                let start = cursor.position();
                let remaining = cursor.next();
                let text = cursor.slice_from(start);
                Err(ParseError::new(ParseErrorKind::UnexpectedToken(remaining), location, text))
            }
        }
        Err(err) => Err(ParseError::from_basic(err, source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::color::Color;

    #[test]
    fn empty_input_produces_empty_stylesheet() {
        let parser = CssParser::new("");
        assert!(parser.rules().is_empty());
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn drives_multiple_rules_and_collects_one_error_per_scenario() {
        let parser = CssParser::new(".broken { color: ; } .ok { color: blue; }");
        assert_eq!(parser.rules().len(), 1);
        assert_eq!(parser.errors().len(), 1);
    }

    #[test]
    fn strips_cdo_cdc_at_top_level() {
        let parser = CssParser::new("<!-- .a { color: red; } -->");
        assert_eq!(parser.rules().len(), 1);
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn detects_source_mapping_url_comment() {
        let parser = CssParser::new(".a { color: red; }\n/*# sourceMappingURL=app.css.map */");
        assert_eq!(parser.result().source_map_url.as_deref(), Some("app.css.map"));
    }

    #[test]
    fn single_value_mode_rejects_trailing_tokens() {
        assert!(parse_value("red", Color::parse).is_ok());
        assert!(parse_value("red blue", Color::parse).is_err());
    }

    #[test]
    fn declarations_mode_parses_style_attribute_text() {
        let (decls, errors) = parse_declarations("color: red; width: 10px");
        assert_eq!(decls.len(), 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn tokenize_yields_lazy_sequence() {
        let parser = CssParser::new("a b c");
        let count = parser.tokenize().filter(|t| !t.is_whitespace()).count();
        assert_eq!(count, 3);
    }
}
