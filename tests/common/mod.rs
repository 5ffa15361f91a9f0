//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::io::Write;

use hla_align::{FetchError, Transport};

/// Two-block alignment page with a preamble, a `<span>` wrapper, an
/// `&nbsp;` separator, and one unexpected `<font>` tag
pub const TEST_DOCUMENT: &str = concat!(
    "<html><head><title>IPD-IMGT/HLA Alignment</title></head><body>\n",
    "<h2>TEST Alignment</h2>\n",
    "<pre>Sequences aligned to TEST*01:01<br>",
    "Please see notes<br>",
    "&nbsp;<br>",
    " Prot    codon1 7  8<br>",
    "A*01:01  <span class=\"hl\">AC</span> GT TTA<br>",
    "A*02:01  -- -T ..C<font color=\"red\">zz</font><br>",
    " <br>",
    " Prot    10<br>",
    "A*01:01  GG<br>",
    "A*02:01  -A</pre>\n",
    "</body></html>\n",
);

pub const TEST_SPLIT_CSV: &str = "Prot,codon1,7,8,10\nA*01:01,AC,GT,TTA,GG\nA*02:01,--,-T,..C,-A\n";

pub const TEST_COMBINED_CSV: &str = "A*01:01,ACGTTTAGG\nA*02:01,---T..C-A\n";

/// Answers every request with a fixed body and counts requests
pub struct StaticTransport {
    body: &'static str,
    pub calls: Cell<usize>,
}

impl StaticTransport {
    pub fn new(body: &'static str) -> Self {
        Self {
            body,
            calls: Cell::new(0),
        }
    }
}

impl Transport for StaticTransport {
    fn post_form(
        &self,
        _url: &str,
        _fields: &[(&'static str, String)],
        sink: &mut dyn Write,
    ) -> Result<u64, FetchError> {
        self.calls.set(self.calls.get() + 1);
        sink.write_all(self.body.as_bytes())?;
        Ok(self.body.len() as u64)
    }
}

/// Fails every request as an unavailable service would
pub struct UnavailableTransport {
    pub calls: Cell<usize>,
}

impl UnavailableTransport {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl Transport for UnavailableTransport {
    fn post_form(
        &self,
        _url: &str,
        _fields: &[(&'static str, String)],
        _sink: &mut dyn Write,
    ) -> Result<u64, FetchError> {
        self.calls.set(self.calls.get() + 1);
        Err(FetchError::Status { status: 503 })
    }
}
