//! CSS text emission: identifier/string/URL escaping, the token-pair
//! separator table, and the `ToCss` trait every value/rule/stylesheet type
//! implements to round-trip back to source text.

pub mod escape;
pub mod printer;
pub mod token;
pub mod token_pairs;

pub use escape::{serialize_identifier, serialize_string, serialize_unquoted_url};
pub use printer::{Printer, PrinterOptions};
pub use token::{write_token, write_token_list};

use std::fmt;

/// Anything that can write itself out as CSS source text.
pub trait ToCss {
    fn to_css<W: fmt::Write>(&self, dest: &mut Printer<W>) -> fmt::Result;

    /// Convenience: serialize to an owned `String` using default printer
    /// options (pretty, 2-space indent).
    fn to_css_string(&self) -> String {
        let mut out = String::new();
        {
            let mut printer = Printer::new(&mut out, PrinterOptions::default());
            let _ = self.to_css(&mut printer);
        }
        out
    }

    fn to_css_string_with(&self, options: PrinterOptions) -> String {
        let mut out = String::new();
        {
            let mut printer = Printer::new(&mut out, options);
            let _ = self.to_css(&mut printer);
        }
        out
    }
}
