// Dispatch loop: render, send and report one row at a time.

use crate::api::Transport;
use crate::records::Record;
use crate::template::Template;
use crate::ui::Console;
use std::io::{self, Write};

/// Totals for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub sent: usize,
    pub failed: usize,
}

impl RunOutcome {
    /// True when at least one row got a non-2xx status or no response.
    pub fn has_failure(&self) -> bool {
        self.failed > 0
    }
}

/// POST one rendered body per record to `url`, strictly in order.
///
/// A failed row (non-2xx or transport error) is reported and counted, and the
/// loop moves on to the next record. Only console write errors abort the run.
pub fn dispatch<I, T, O, E>(
    records: I,
    template: &Template,
    url: &str,
    transport: &T,
    console: &mut Console<O, E>,
) -> io::Result<RunOutcome>
where
    I: IntoIterator<Item = Record>,
    T: Transport + ?Sized,
    O: Write,
    E: Write,
{
    let mut outcome = RunOutcome::default();

    for (i, record) in records.into_iter().enumerate() {
        let index = i + 1;
        let body = template.render(&record).to_string();
        console.row(index, url, &body)?;

        let spinner = console.waiting();
        let result = transport.post_json(url, &body);
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        outcome.sent += 1;

        match result {
            Ok(reply) => {
                console.reply(&reply)?;
                if !reply.is_success() {
                    log::debug!("row {index}: status {}", reply.status);
                    outcome.failed += 1;
                }
            }
            Err(err) => {
                console.request_failed(&err)?;
                outcome.failed += 1;
            }
        }
    }

    log::debug!("sent {} request(s), {} failed", outcome.sent, outcome.failed);
    Ok(outcome)
}
