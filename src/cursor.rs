//! The parser cursor: a backtrackable, block-nesting-aware view over a
//! [`Tokenizer`]. All higher-level parsers (values, selectors, rules) drive
//! the grammar through this type rather than touching the tokenizer
//! directly, so that `tryParse`-style speculation and matching-brace
//! recovery stay centralized in one place.

use crate::error::{BasicParseError, BasicParseErrorKind, BasicParseResult};
use crate::location::{SourceLocation, SourcePosition};
use crate::tokenizer::{Token, Tokenizer};

/// An opaque snapshot of cursor progress, restorable with [`Cursor::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    position: SourcePosition,
    at_start_of: Option<BlockKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Paren,
    Bracket,
    Curly,
}

impl BlockKind {
    fn closes(self, token: &Token) -> bool {
        matches!(
            (self, token),
            (BlockKind::Paren, Token::CloseParenthesis)
                | (BlockKind::Bracket, Token::CloseSquareBracket)
                | (BlockKind::Curly, Token::CloseCurlyBracket)
        )
    }

    fn opens(token: &Token) -> Option<BlockKind> {
        match token {
            Token::ParenthesisBlock | Token::Function(_) => Some(BlockKind::Paren),
            Token::SquareBracketBlock => Some(BlockKind::Bracket),
            Token::CurlyBracketBlock => Some(BlockKind::Curly),
            _ => None,
        }
    }
}

/// Token-by-token cursor with lookahead-free, restartable parsing.
pub struct Cursor<'a> {
    tokenizer: Tokenizer<'a>,
    /// The block kind we are nested inside, innermost last. `parse_nested_block`
    /// pushes on entry and pops on exit; `next()` stops handing out tokens once
    /// it would have to cross the matching close token of the innermost block.
    block_stack: Vec<BlockKind>,
    at_start_of: Option<BlockKind>,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            block_stack: Vec::new(),
            at_start_of: None,
        }
    }

    #[must_use]
    pub fn with_file(input: &'a str, file: Option<String>) -> Self {
        Self {
            tokenizer: Tokenizer::with_file(input, file),
            block_stack: Vec::new(),
            at_start_of: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> CursorState {
        CursorState {
            position: self.tokenizer.position(),
            at_start_of: self.at_start_of,
        }
    }

    pub fn reset(&mut self, state: CursorState) {
        self.tokenizer.reset_to(state.position);
        self.at_start_of = state.at_start_of;
    }

    #[must_use]
    pub fn current_source_location(&self) -> SourceLocation {
        self.tokenizer.source_location(self.tokenizer.position())
    }

    pub fn location_at(&self, position: SourcePosition) -> SourceLocation {
        self.tokenizer.source_location(position)
    }

    #[must_use]
    pub fn position(&self) -> SourcePosition {
        self.tokenizer.position()
    }

    #[must_use]
    pub fn slice_from(&self, start: SourcePosition) -> &'a str {
        self.tokenizer.slice(start, self.tokenizer.position())
    }

    /// Returns the next token, skipping whitespace and comments, and
    /// refusing to read past the close of the block we are nested in.
    pub fn next(&mut self) -> Token {
        loop {
            let tok = self.next_including_whitespace_and_comments();
            if !tok.is_whitespace() && !tok.is_comment() {
                return tok;
            }
        }
    }

    /// Like [`Cursor::next`] but returns whitespace tokens instead of eating them.
    pub fn next_including_whitespace(&mut self) -> Token {
        loop {
            let tok = self.next_including_whitespace_and_comments();
            if !tok.is_comment() {
                return tok;
            }
        }
    }

    fn next_including_whitespace_and_comments(&mut self) -> Token {
        if let Some(kind) = self.at_start_of.take() {
            self.block_stack.push(kind);
        }
        let checkpoint = self.tokenizer.position();
        let tok = self.tokenizer.next_token();
        if let Some(&innermost) = self.block_stack.last() {
            if innermost.closes(&tok) {
                self.tokenizer.reset_to(checkpoint);
                return Token::Eof;
            }
        }
        if let Some(kind) = BlockKind::opens(&tok) {
            self.at_start_of = Some(kind);
        }
        tok
    }

    #[must_use]
    pub fn is_exhausted(&mut self) -> bool {
        let state = self.state();
        let is_eof = self.next().is_eof();
        self.reset(state);
        is_eof
    }

    pub fn skip_whitespace(&mut self) {
        loop {
            let state = self.state();
            match self.next_including_whitespace_and_comments() {
                Token::Whitespace(_) | Token::Comment(_) => continue,
                _ => {
                    self.reset(state);
                    return;
                }
            }
        }
    }

    /// Run `f` and, if it fails, rewind as though it had never been called.
    pub fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> BasicParseResult<T>) -> BasicParseResult<T> {
        let state = self.state();
        let result = f(self);
        if result.is_err() {
            self.reset(state);
        }
        result
    }

    fn error(&self, kind: BasicParseErrorKind) -> BasicParseError {
        BasicParseError::new(kind, self.current_source_location())
    }

    pub fn expect_ident(&mut self) -> BasicParseResult<Box<str>> {
        match self.next() {
            Token::Ident(s) => Ok(s),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_ident_matching(&mut self, expected: &str) -> BasicParseResult<()> {
        match self.next() {
            Token::Ident(s) if s.eq_ignore_ascii_case(expected) => Ok(()),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_function_matching(&mut self, expected: &str) -> BasicParseResult<()> {
        match self.next() {
            Token::Function(s) if s.eq_ignore_ascii_case(expected) => Ok(()),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_colon(&mut self) -> BasicParseResult<()> {
        match self.next() {
            Token::Colon => Ok(()),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_semicolon(&mut self) -> BasicParseResult<()> {
        match self.next() {
            Token::Semicolon => Ok(()),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_comma(&mut self) -> BasicParseResult<()> {
        match self.next() {
            Token::Comma => Ok(()),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_percentage(&mut self) -> BasicParseResult<f64> {
        match self.next() {
            Token::Percentage(n) => Ok(n.value / 100.0),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_number(&mut self) -> BasicParseResult<f64> {
        match self.next() {
            Token::Number(n) => Ok(n.value),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_string(&mut self) -> BasicParseResult<Box<str>> {
        match self.next() {
            Token::QuotedString(s) => Ok(s),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_parenthesis_block(&mut self) -> BasicParseResult<()> {
        match self.next() {
            Token::ParenthesisBlock => Ok(()),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    pub fn expect_curly_bracket_block(&mut self) -> BasicParseResult<()> {
        match self.next() {
            Token::CurlyBracketBlock => Ok(()),
            other => Err(self.error(BasicParseErrorKind::UnexpectedToken(other))),
        }
    }

    /// Parse the contents of a block whose opening token was just consumed.
    /// `f` sees only the tokens inside the block; on return (success or
    /// failure) the cursor is advanced past the matching close token.
    pub fn parse_nested_block<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> BasicParseResult<T>,
    ) -> BasicParseResult<T> {
        let kind = self.at_start_of.take().unwrap_or_else(|| {
            // The caller already consumed the opening token themselves; infer
            // the kind from the block stack top as a fallback, defaulting to
            // curly since that's the common case (rule/declaration bodies).
            BlockKind::Curly
        });
        self.block_stack.push(kind);
        let result = f(self);
        // `f` only ever sees the virtual end-of-block `Eof`, never the real
        // close token (that's the whole point of the boundary). Pop first so
        // the token we're about to look for reads as itself, not another Eof.
        self.block_stack.pop();
        self.consume_to_block_end(kind);
        result
    }

    /// Consumes real tokens up to and including `kind`'s own close token,
    /// recursing into any block opened along the way so its contents (which
    /// may themselves contain a token that looks like `kind`'s close) are
    /// skipped rather than mistaken for the end of this block.
    fn consume_to_block_end(&mut self, kind: BlockKind) {
        loop {
            match self.next_including_whitespace_and_comments() {
                Token::Eof => return,
                tok if kind.closes(&tok) => return,
                tok => {
                    if BlockKind::opens(&tok).is_some() {
                        let _ = self.parse_nested_block(|_| Ok(()));
                    }
                }
            }
        }
    }

    /// Parse a comma-separated list (CSS Syntax §5.4.8), invoking `f` once
    /// per item and stopping cleanly once no further comma follows.
    pub fn parse_comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> BasicParseResult<T>,
    ) -> BasicParseResult<Vec<T>> {
        let mut out = Vec::new();
        loop {
            self.skip_whitespace();
            out.push(f(self)?);
            self.skip_whitespace();
            let state = self.state();
            match self.next() {
                Token::Comma => continue,
                Token::Eof => return Ok(out),
                _ => {
                    self.reset(state);
                    return Ok(out);
                }
            }
        }
    }

    /// Scans forward to the next top-level `;` or the end of the current
    /// block *without* consuming it, returning the source text of
    /// everything skipped over. Used to hand a declaration's value tokens
    /// to property dispatch as its own freshly delimited [`Cursor`].
    pub fn consume_declaration_value(&mut self) -> &'a str {
        let start = self.position();
        loop {
            let state = self.state();
            match self.next_including_whitespace_and_comments() {
                Token::Semicolon | Token::Eof => {
                    self.reset(state);
                    break;
                }
                Token::CurlyBracketBlock | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                    let _ = self.parse_nested_block(|_| Ok(()));
                }
                Token::Function(_) => {
                    let _ = self.parse_nested_block(|_| Ok(()));
                }
                _ => continue,
            }
        }
        self.slice_from(start)
    }

    /// Skip tokens up to (and including) the next top-level `;` or the end
    /// of the current block. Used by rule/declaration-level error recovery.
    pub fn consume_until_semicolon_or_block_end(&mut self) {
        loop {
            match self.next_including_whitespace_and_comments() {
                Token::Semicolon | Token::Eof => return,
                Token::CurlyBracketBlock | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                    let _ = self.parse_nested_block(|_| Ok(()));
                }
                Token::Function(_) => {
                    let _ = self.parse_nested_block(|_| Ok(()));
                }
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_between_tokens() {
        let mut c = Cursor::new("  a   b");
        assert_eq!(c.next(), Token::Ident("a".into()));
        assert_eq!(c.next(), Token::Ident("b".into()));
        assert!(c.next().is_eof());
    }

    #[test]
    fn nested_block_does_not_leak_past_close_curly() {
        let mut c = Cursor::new("{ a b } c");
        assert_eq!(c.next(), Token::CurlyBracketBlock);
        let inner = c
            .parse_nested_block(|c| {
                let mut names = Vec::new();
                loop {
                    match c.next() {
                        Token::Ident(s) => names.push(s),
                        Token::Eof => break,
                        _ => {}
                    }
                }
                Ok(names)
            })
            .expect("nested block parse");
        assert_eq!(inner.len(), 2);
        assert_eq!(c.next(), Token::Ident("c".into()));
    }

    #[test]
    fn try_parse_rewinds_on_failure() {
        let mut c = Cursor::new("foo bar");
        let state = c.state();
        let res: BasicParseResult<()> = c.try_parse(|c| c.expect_ident_matching("nope"));
        assert!(res.is_err());
        assert_eq!(c.state(), state);
        assert_eq!(c.next(), Token::Ident("foo".into()));
    }

    #[test]
    fn comma_separated_list() {
        let mut c = Cursor::new("a, b, c");
        let items = c.parse_comma_separated(|c| c.expect_ident()).expect("list");
        assert_eq!(items.len(), 3);
    }
}
