// Library root
// ------------
// The binary (`main.rs`) only sets up logging and parses arguments; the
// whole batch runs through these modules.
//
// Module responsibilities:
// - `records`: reads the CSV input into records keyed by column name.
// - `template`: renders the JSON body template for one record.
// - `api`: the HTTP side, a `Transport` trait and its reqwest client.
// - `dispatch`: the sequential render/send/report loop.
// - `ui`: console output for progress, statuses and failures.
// - `cli`: argument definition and the top-level run.
// - `error`: error types shared by the modules above.
pub mod api;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod records;
pub mod template;
pub mod ui;
