//! install-claude - development guidelines installer
//!
//! Downloads CLAUDE.md, skills, slash commands and agents from a source
//! repository into `~/.claude`, backing up anything it replaces.

use std::process::ExitCode;

mod cli;
mod config;
mod error;
mod fetch;
mod installer;
mod logging;
mod manifest;
mod ui;

use cli::Invocation;
use config::InstallOptions;
use error::Result;
use fetch::SchemeTransport;
use installer::{InstallReport, Installer};
use ui::ConsoleReporter;

/// Exit status for setup failures (home not found, HTTP client unavailable)
const SETUP_FAILURE: u8 = 1;

fn run(invocation: Invocation) -> Result<InstallReport> {
    let Invocation { cli, categories } = invocation;

    let options = InstallOptions {
        categories,
        home: config::resolve_home(cli.home)?,
        version: cli.version,
        base_url: cli.base_url,
        dry_run: cli.dry_run,
    };
    tracing::debug!(?options, "resolved options");

    let transport = SchemeTransport::for_base(&options.base_url)?;
    let timestamp = fetch::backup::timestamp(&chrono::Local::now());

    let mut reporter = ConsoleReporter::new();
    let report = Installer::new(&options, &transport, timestamp).run(&mut reporter);
    Ok(report)
}

fn main() -> ExitCode {
    // Usage errors exit here, before anything touches the disk or network.
    let invocation = match Invocation::try_parse_from(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => e.exit(),
    };

    logging::init(invocation.cli.verbose);

    match run(invocation) {
        Ok(report) => report.exit_code(),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(help) = miette::Diagnostic::help(&e) {
                eprintln!("  {help}");
            }
            ExitCode::from(SETUP_FAILURE)
        }
    }
}
