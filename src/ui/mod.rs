//! Progress and summary output
//!
//! All user-facing output of a run goes through the [`Reporter`] trait:
//! - [`ConsoleReporter`] prints a line per file and a final summary
//! - `SilentReporter` prints nothing (tests only)
//!
//! The summary repeats failures but never replaces the per-file lines.

mod summary;

use std::fmt::Write;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::InstallOptions;
use crate::error::InstallerError;
use crate::installer::{EntryOutcome, InstallReport};
use crate::manifest::Category;

pub use summary::render_summary;

/// Receives progress events from an install run
pub trait Reporter {
    /// Called once before anything is fetched
    fn start(&mut self, options: &InstallOptions, total: usize);

    /// A category's directory could not be created
    fn directory_failed(&mut self, error: &InstallerError);

    /// The run moved on to a new category
    fn category(&mut self, category: Category);

    /// One manifest entry was processed
    fn entry(&mut self, outcome: &EntryOutcome);

    /// Called once after the last entry
    fn finish(&mut self, report: &InstallReport);
}

/// Reporter that discards everything
#[cfg(test)]
#[derive(Debug, Default)]
pub struct SilentReporter;

#[cfg(test)]
impl Reporter for SilentReporter {
    fn start(&mut self, _options: &InstallOptions, _total: usize) {}

    fn directory_failed(&mut self, _error: &InstallerError) {}

    fn category(&mut self, _category: Category) {}

    fn entry(&mut self, _outcome: &EntryOutcome) {}

    fn finish(&mut self, _report: &InstallReport) {}
}

/// Terminal reporter
///
/// Lines go to stdout (failures to stderr). A progress bar is drawn on stderr
/// when it is a terminal and hidden otherwise.
pub struct ConsoleReporter {
    pb: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { pb: None }
    }

    fn println(&self, line: &str) {
        match &self.pb {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }

    fn eprintln(&self, line: &str) {
        match &self.pb {
            Some(pb) => pb.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn start(&mut self, options: &InstallOptions, total: usize) {
        let bold = Style::new().bold();
        println!(
            "{} {} from {}",
            bold.apply_to("Installing development guidelines"),
            Style::new().cyan().apply_to(&options.version),
            options.base_url
        );
        println!("  into {}", options.home.display());
        if options.dry_run {
            println!(
                "{}",
                Style::new().yellow().apply_to("Dry run: nothing will be written")
            );
        }

        if !options.dry_run && total > 0 {
            let style = ProgressStyle::default_bar()
                .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  ");
            let pb = ProgressBar::new(total as u64);
            pb.set_style(style);
            self.pb = Some(pb);
        }
    }

    fn directory_failed(&mut self, error: &InstallerError) {
        self.eprintln(&format!("{} {}", Style::new().red().apply_to("✗"), error));
    }

    fn category(&mut self, category: Category) {
        self.println("");
        self.println(&format!(
            "{}",
            Style::new().bold().yellow().apply_to(category.label())
        ));
        if let Some(pb) = &self.pb {
            pb.set_message(category.label());
        }
    }

    fn entry(&mut self, outcome: &EntryOutcome) {
        let dest = outcome.destination.display();
        match &outcome.result {
            None => self.println(&format!(
                "  {} {} -> {} {}",
                Style::new().cyan().apply_to("→"),
                outcome.url,
                dest,
                Style::new().dim().apply_to(outcome.entry.description)
            )),
            Some(Ok(summary)) => {
                let mut line = format!("  {} {}", Style::new().green().apply_to("✓"), dest);
                if let Some(backup) = &summary.backup {
                    let _ = write!(
                        line,
                        " {}",
                        Style::new()
                            .dim()
                            .apply_to(format!("(backed up to {})", backup.display()))
                    );
                }
                self.println(&line);
            }
            Some(Err(err)) => self.eprintln(&format!(
                "  {} {}: {}",
                Style::new().red().apply_to("✗"),
                dest,
                err
            )),
        }

        if let Some(pb) = &self.pb {
            pb.inc(1);
        }
    }

    fn finish(&mut self, report: &InstallReport) {
        if let Some(pb) = self.pb.take() {
            if report.has_failures() {
                pb.abandon();
            } else {
                pb.finish_and_clear();
            }
        }
        println!();
        print!("{}", render_summary(report));
    }
}
