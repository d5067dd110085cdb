//! The writer abstraction `ToCss` implementations target: tracks minify vs.
//! pretty mode, current indentation depth, and the last token kind written
//! so the token-pair separator table can be consulted before the next
//! token goes out.

use crate::serialize::token_pairs::{needs_separator, TokenCategory};
use std::fmt::{self, Write};

/// Output formatting knobs. Mirrors the public `PrinterOptions` contract:
/// minified output omits optional whitespace entirely, pretty output
/// indents nested blocks and puts declarations/rules on their own lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrinterOptions {
    pub minify: bool,
    pub indent_width: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            minify: false,
            indent_width: 2,
        }
    }
}

pub struct Printer<'a, W: Write> {
    dest: &'a mut W,
    pub options: PrinterOptions,
    depth: usize,
    last_category: Option<TokenCategory>,
}

impl<'a, W: Write> Printer<'a, W> {
    pub fn new(dest: &'a mut W, options: PrinterOptions) -> Self {
        Self {
            dest,
            options,
            depth: 0,
            last_category: None,
        }
    }

    #[must_use]
    pub fn is_minified(&self) -> bool {
        self.options.minify
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write raw text, inserting a `/**/` separator first if the previous
    /// token and `category` would otherwise merge into a single token on
    /// re-parse.
    pub fn write_token(&mut self, category: TokenCategory, text: &str) -> fmt::Result {
        if let Some(prev) = self.last_category {
            if needs_separator(prev, category) {
                self.dest.write_str("/**/")?;
            }
        }
        self.dest.write_str(text)?;
        self.last_category = Some(category);
        Ok(())
    }

    pub fn write_str(&mut self, text: &str) -> fmt::Result {
        self.dest.write_str(text)?;
        self.last_category = None;
        Ok(())
    }

    pub fn write_char(&mut self, c: char) -> fmt::Result {
        self.dest.write_char(c)?;
        self.last_category = None;
        Ok(())
    }

    /// A single space in pretty mode, nothing when minified.
    pub fn whitespace(&mut self) -> fmt::Result {
        if !self.options.minify {
            self.dest.write_char(' ')?;
        }
        self.last_category = None;
        Ok(())
    }

    /// Newline plus current indentation in pretty mode, nothing when minified.
    pub fn newline(&mut self) -> fmt::Result {
        if !self.options.minify {
            self.dest.write_char('\n')?;
            for _ in 0..self.depth * self.options.indent_width {
                self.dest.write_char(' ')?;
            }
        }
        self.last_category = None;
        Ok(())
    }
}
