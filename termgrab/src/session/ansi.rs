//! Escape-sequence stripping for the ignore-escapes session flag.
//!
//! Network devices decorate their output with CSI color codes and cursor
//! movement that would otherwise break literal prompt matching. The filter
//! keeps printable text plus the control characters that carry line
//! structure (`\r`, `\n`, `\t`) and drops everything else.
//!
//! The parser is stateful on purpose: an escape sequence may be split
//! across two stream chunks, so one filter instance must see every chunk
//! of a session in order.

use vte::{Params, Parser, Perform};

/// Stateful ANSI/VT escape filter.
pub struct AnsiFilter {
    parser: Parser,
}

impl AnsiFilter {
    /// Create a new filter.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Feed `input` through the filter, appending cleaned bytes to `out`.
    pub fn filter(&mut self, input: &[u8], out: &mut Vec<u8>) {
        let mut collector = Collector { out };
        self.parser.advance(&mut collector, input);
    }
}

impl Default for AnsiFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// `Perform` implementation that keeps text and line structure only.
struct Collector<'a> {
    out: &'a mut Vec<u8>,
}

impl Perform for Collector<'_> {
    fn print(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\r' | b'\n' | b'\t') {
            self.out.push(byte);
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {}

    fn put(&mut self, _byte: u8) {}

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn csi_dispatch(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _action: char) {
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}
}
