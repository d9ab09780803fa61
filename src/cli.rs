// Command-line shell: argument definition and the top-level run. File
// problems are reported here, before anything is sent.

use crate::api::ApiClient;
use crate::dispatch::dispatch;
use crate::records::{Record, Records};
use crate::template::Template;
use crate::ui::Console;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Send one JSON POST per CSV row, filling a template with the row's values.
#[derive(Debug, Parser)]
#[command(name = "csv-curl", version, about)]
pub struct Args {
    /// CSV file; the first row names the columns.
    #[arg(value_name = "file.csv")]
    pub csv: PathBuf,

    /// JSON body template with `{{column}}` placeholders.
    #[arg(value_name = "template.json")]
    pub template: PathBuf,

    /// URL every request is POSTed to.
    #[arg(value_name = "url")]
    pub url: String,
}

/// Run a whole batch and decide the exit status.
pub fn run(args: &Args) -> Result<ExitCode> {
    let source = Records::from_path(&args.csv).context("Error reading CSV file")?;
    let columns: Vec<String> = source.headers().map(str::to_string).collect();
    let records = source
        .collect::<Result<Vec<Record>, _>>()
        .context("Error reading CSV file")?;
    let template = Template::from_path(&args.template).context("Error reading template file")?;

    let mut console = Console::stdio();
    if records.is_empty() {
        console.no_rows()?;
        return Ok(ExitCode::SUCCESS);
    }

    for name in template.placeholders() {
        if !columns.contains(&name) {
            log::warn!("placeholder {{{{{name}}}}} has no matching CSV column");
        }
    }

    let client = ApiClient::from_env()?;
    console
        .announce(records.len(), &args.url)
        .context("Failed to write output")?;
    let outcome = dispatch(records, &template, &args.url, &client, &mut console)
        .context("Failed to write output")?;

    Ok(if outcome.has_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
