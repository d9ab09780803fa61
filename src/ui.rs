// Console layer: every line the tool prints goes through `Console`, so the
// dispatch loop can be run against in-memory buffers in tests.

use crate::api::Reply;
use crate::error::TransportError;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Stderr, Stdout, Write};
use std::time::Duration;

/// Progress and result printer. Regular output goes to `out`, request
/// failures to `err`.
pub struct Console<O, E> {
    out: O,
    err: E,
    spinner: bool,
}

impl Console<Stdout, Stderr> {
    /// Console bound to the process streams, with an in-flight spinner.
    /// indicatif hides the spinner by itself when stderr is not a terminal.
    pub fn stdio() -> Self {
        Console {
            out: io::stdout(),
            err: io::stderr(),
            spinner: true,
        }
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Console {
            out,
            err,
            spinner: false,
        }
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    pub fn announce(&mut self, count: usize, url: &str) -> io::Result<()> {
        writeln!(self.out, "Sending {count} request(s) to {url}\n")
    }

    pub fn no_rows(&mut self) -> io::Result<()> {
        writeln!(self.out, "No data rows found in CSV.")
    }

    /// Header for one row; `index` is 1-based.
    pub fn row(&mut self, index: usize, url: &str, body: &str) -> io::Result<()> {
        writeln!(self.out, "--- Row {index} ---")?;
        writeln!(self.out, "POST {url}")?;
        writeln!(self.out, "Body: {body}")?;
        self.out.flush()
    }

    /// Spinner shown while a request is in flight; `None` when disabled.
    pub fn waiting(&self) -> Option<ProgressBar> {
        if !self.spinner {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Waiting for response...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    pub fn reply(&mut self, reply: &Reply) -> io::Result<()> {
        writeln!(self.out, "Status: {}", reply.status)?;
        writeln!(self.out, "Response: {}\n", reply.body)
    }

    pub fn request_failed(&mut self, err: &TransportError) -> io::Result<()> {
        writeln!(self.err, "Request failed: {err}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_match_expected_layout() {
        let mut console = Console::new(Vec::new(), Vec::new());
        console.announce(2, "http://h/x").unwrap();
        console.row(1, "http://h/x", r#"{"a":1}"#).unwrap();
        console
            .reply(&Reply {
                status: 201,
                body: "created".into(),
            })
            .unwrap();
        console
            .request_failed(&TransportError("connection refused".into()))
            .unwrap();
        assert!(console.waiting().is_none());

        let (out, err) = console.into_parts();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Sending 2 request(s) to http://h/x\n\n\
             --- Row 1 ---\nPOST http://h/x\nBody: {\"a\":1}\n\
             Status: 201\nResponse: created\n\n"
        );
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Request failed: connection refused\n\n"
        );
    }
}
