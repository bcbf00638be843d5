//! Final summary of an install run

use std::fmt::Write;

use console::Style;

use crate::installer::InstallReport;
use crate::manifest::Category;

/// Render the end-of-run summary
pub fn render_summary(report: &InstallReport) -> String {
    let mut out = String::new();
    let bold = Style::new().bold();

    let title = if report.dry_run {
        "Dry run summary"
    } else {
        "Installation summary"
    };
    let _ = writeln!(out, "{}", bold.apply_to(title));

    for category in Category::ALL {
        let label = category.label();
        if !report.categories.contains(category) {
            let _ = writeln!(
                out,
                "  {label:<18} {}",
                Style::new().dim().apply_to("skipped")
            );
            continue;
        }

        let counts = report.counts(category);
        if report.dry_run {
            let _ = writeln!(out, "  {label:<18} {} to install", counts.planned);
        } else if counts.failed == 0 {
            let _ = writeln!(
                out,
                "  {label:<18} {} installed",
                Style::new().green().apply_to(counts.installed)
            );
        } else {
            let _ = writeln!(
                out,
                "  {label:<18} {} installed, {} failed",
                Style::new().green().apply_to(counts.installed),
                Style::new().red().apply_to(counts.failed)
            );
        }
    }

    if report.dry_run {
        return out;
    }

    let backups = report.backups().count();
    if backups > 0 {
        let _ = writeln!(
            out,
            "\n{backups} existing file(s) were backed up with a .backup.<timestamp> suffix"
        );
    }

    if report.has_failures() {
        let _ = writeln!(out, "\n{}", Style::new().red().bold().apply_to("Failed:"));
        for err in &report.directory_failures {
            let _ = writeln!(out, "  {err}");
        }
        for outcome in report.failures() {
            if let Some(Err(err)) = &outcome.result {
                let _ = writeln!(out, "  {}: {err}", outcome.destination.display());
            }
        }
        let _ = writeln!(
            out,
            "\nSome files were not installed; files that were written are left in place."
        );
    } else {
        let _ = writeln!(
            out,
            "\n{}",
            Style::new().green().bold().apply_to("Installation complete")
        );
    }

    out
}
