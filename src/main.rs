// Entrypoint for csv-curl.
// - Logging goes to stderr through env_logger (`RUST_LOG`, default `warn`).
// - Usage, file and row failures all end with exit status 1.

use clap::Parser;
use csv_curl::cli::{run, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version also arrive here, on stdout. A failed
            // write leaves nothing else to report.
            err.print().ok();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
