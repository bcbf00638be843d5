//! The install run
//!
//! Creates each enabled category's directory, then fetches every entry of
//! every enabled category in manifest order. Per-entry failures are recorded
//! and the loop moves on; the exit code is computed from the collected
//! outcomes once the loop is done.

use std::path::PathBuf;
use std::process::ExitCode;

use reqwest::Url;

use crate::config::{CategorySet, InstallOptions};
use crate::error::{InstallerError, Result};
use crate::fetch::{self, FetchSummary, Fetcher, Transport};
use crate::manifest::{AssetManifestEntry, Category};
use crate::ui::Reporter;

/// Result of one manifest entry
#[derive(Debug)]
pub struct EntryOutcome {
    pub entry: &'static AssetManifestEntry,
    pub url: Url,
    pub destination: PathBuf,
    /// `None` for a dry run, where nothing was attempted
    pub result: Option<Result<FetchSummary>>,
}

impl EntryOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.result, Some(Err(_)))
    }

    pub fn is_installed(&self) -> bool {
        matches!(self.result, Some(Ok(_)))
    }

    pub fn backup(&self) -> Option<&PathBuf> {
        match &self.result {
            Some(Ok(summary)) => summary.backup.as_ref(),
            _ => None,
        }
    }
}

/// Installed and failed files for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub installed: usize,
    pub failed: usize,
    pub planned: usize,
}

/// Everything a run did, in order
#[derive(Debug)]
pub struct InstallReport {
    pub categories: CategorySet,
    pub dry_run: bool,
    /// Directories that could not be created up front
    pub directory_failures: Vec<InstallerError>,
    pub outcomes: Vec<EntryOutcome>,
}

impl InstallReport {
    pub fn counts(&self, category: Category) -> CategoryCounts {
        self.outcomes
            .iter()
            .filter(|o| o.entry.category == category)
            .fold(CategoryCounts::default(), |mut counts, o| {
                match &o.result {
                    Some(Ok(_)) => counts.installed += 1,
                    Some(Err(_)) => counts.failed += 1,
                    None => counts.planned += 1,
                }
                counts
            })
    }

    pub fn installed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_installed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn backups(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().filter_map(EntryOutcome::backup)
    }

    pub fn has_failures(&self) -> bool {
        !self.directory_failures.is_empty() || self.failures().next().is_some()
    }

    /// Process exit status; partial success is still failure
    pub fn exit_status(&self) -> u8 {
        u8::from(self.has_failures())
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Drives one install run
pub struct Installer<'a> {
    options: &'a InstallOptions,
    transport: &'a dyn Transport,
    timestamp: String,
}

impl<'a> Installer<'a> {
    pub fn new(
        options: &'a InstallOptions,
        transport: &'a dyn Transport,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            options,
            transport,
            timestamp: timestamp.into(),
        }
    }

    /// Entries that will be processed, in order
    pub fn plan(&self) -> Vec<&'static AssetManifestEntry> {
        self.options
            .categories
            .enabled()
            .into_iter()
            .flat_map(Category::entries)
            .collect()
    }

    pub fn run(&self, reporter: &mut dyn Reporter) -> InstallReport {
        let plan = self.plan();
        reporter.start(self.options, plan.len());

        let mut report = InstallReport {
            categories: self.options.categories,
            dry_run: self.options.dry_run,
            directory_failures: Vec::new(),
            outcomes: Vec::with_capacity(plan.len()),
        };

        if !self.options.dry_run {
            report.directory_failures = self.create_directories();
            for err in &report.directory_failures {
                reporter.directory_failed(err);
            }
        }

        let fetcher = Fetcher::new(self.transport, self.timestamp.clone());
        let mut current = None;
        for entry in plan {
            if current != Some(entry.category) {
                current = Some(entry.category);
                reporter.category(entry.category);
            }

            let url = fetch::source_url(&self.options.base_url, &self.options.version, entry);
            let destination = entry.destination(&self.options.home);
            let result = if self.options.dry_run {
                None
            } else {
                Some(fetcher.fetch(&url, &destination))
            };

            match &result {
                Some(Ok(summary)) => tracing::debug!(%url, bytes = summary.bytes, "installed"),
                Some(Err(err)) => tracing::warn!(%url, error = %err, "fetch failed"),
                None => {}
            }

            let outcome = EntryOutcome {
                entry,
                url,
                destination,
                result,
            };
            reporter.entry(&outcome);
            report.outcomes.push(outcome);
        }

        tracing::debug!(
            installed = report.installed(),
            failed = report.failures().count(),
            "run finished"
        );
        reporter.finish(&report);
        report
    }

    fn create_directories(&self) -> Vec<InstallerError> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for category in self.options.categories.enabled() {
            let dir = category.install_dir(&self.options.home);
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }

        dirs.iter()
            .filter_map(|dir| {
                tracing::debug!(dir = %dir.display(), "creating directory");
                fetch::ensure_dir(dir).err()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::testing::RecordingTransport;
    use crate::manifest::MANIFEST;
    use crate::ui::SilentReporter;
    use std::fs;
    use tempfile::TempDir;

    fn options(home: &std::path::Path, categories: CategorySet) -> InstallOptions {
        InstallOptions {
            categories,
            version: "main".to_string(),
            base_url: Url::parse("https://example.com/dotfiles").unwrap(),
            home: home.to_path_buf(),
            dry_run: false,
        }
    }

    fn run(opts: &InstallOptions, transport: &RecordingTransport, stamp: &str) -> InstallReport {
        Installer::new(opts, transport, stamp).run(&mut SilentReporter)
    }

    fn backups_under(dir: &std::path::Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(d) = stack.pop() {
            for entry in fs::read_dir(&d).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.to_string_lossy().contains(".backup.") {
                    found.push(path);
                }
            }
        }
        found
    }

    #[test]
    fn test_full_install_writes_every_default_entry() {
        let temp = TempDir::new().unwrap();
        let opts = options(temp.path(), CategorySet::default());
        let transport = RecordingTransport::serving("content");

        let report = run(&opts, &transport, "20260101_000000");

        assert_eq!(report.exit_status(), 0);
        let expected = MANIFEST
            .iter()
            .filter(|e| e.category != Category::Opencode)
            .count();
        assert_eq!(report.installed(), expected);
        assert!(temp.path().join(".claude/CLAUDE.md").is_file());
        assert!(temp.path().join(".claude/agents/tdd-guardian.md").is_file());
        assert!(!temp.path().join(".config/opencode").exists());
    }

    #[test]
    fn test_claude_only_fetches_only_core() {
        let temp = TempDir::new().unwrap();
        let opts = options(temp.path(), CategorySet::only(Category::Core));
        let transport = RecordingTransport::serving("# CLAUDE");

        let report = run(&opts, &transport, "20260101_000000");

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(
            transport.requested(),
            vec!["https://example.com/dotfiles/main/claude/.claude/CLAUDE.md"]
        );
        assert!(!temp.path().join(".claude/skills").exists());
    }

    #[test]
    fn test_partial_failure_isolated() {
        let temp = TempDir::new().unwrap();
        let opts = options(temp.path(), CategorySet::default());
        let transport = RecordingTransport::serving("ok").failing("agents/learn.md");

        let report = run(&opts, &transport, "20260101_000000");

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].entry.relative_path, "learn.md");
        assert!(matches!(
            failures[0].result,
            Some(Err(InstallerError::Fetch(FetchError::Status { status: 404, .. })))
        ));
        assert_eq!(report.exit_status(), 1);

        for outcome in report.outcomes.iter().filter(|o| !o.is_failure()) {
            assert_eq!(fs::read_to_string(&outcome.destination).unwrap(), "ok");
        }
        assert!(!temp.path().join(".claude/agents/learn.md").exists());
        // entries after the failure were still attempted
        assert!(temp.path().join(".claude/agents/adr.md").is_file());
    }

    #[test]
    fn test_second_run_backs_up_every_file_once() {
        let temp = TempDir::new().unwrap();
        let opts = options(temp.path(), CategorySet::default());
        let transport = RecordingTransport::serving("same");

        let first = run(&opts, &transport, "20260101_000000");
        assert_eq!(first.backups().count(), 0);
        assert!(backups_under(temp.path()).is_empty());

        let second = run(&opts, &transport, "20260101_000001");
        assert_eq!(second.exit_status(), 0);
        assert_eq!(second.backups().count(), first.installed());
        assert_eq!(backups_under(temp.path()).len(), first.installed());

        for outcome in &second.outcomes {
            assert_eq!(fs::read_to_string(&outcome.destination).unwrap(), "same");
        }
    }

    #[test]
    fn test_backup_failure_keeps_original_and_continues() {
        let temp = TempDir::new().unwrap();
        let opts = options(temp.path(), CategorySet::default());
        let original = temp.path().join(".claude/CLAUDE.md");
        fs::create_dir_all(original.parent().unwrap()).unwrap();
        fs::write(&original, "my own rules").unwrap();
        let transport = RecordingTransport::serving("fresh");

        // pushes the backup file name past NAME_MAX so the rename fails
        let stamp = "9".repeat(255);
        let report = run(&opts, &transport, &stamp);

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].destination, original);
        assert!(matches!(
            failures[0].result,
            Some(Err(InstallerError::BackupFailed { .. }))
        ));
        assert_eq!(fs::read_to_string(&original).unwrap(), "my own rules");
        assert!(backups_under(temp.path()).is_empty());

        assert_eq!(report.installed(), report.outcomes.len() - 1);
        assert!(temp.path().join(".claude/agents/tdd-guardian.md").is_file());
        assert_eq!(report.exit_status(), 1);
    }

    #[test]
    fn test_version_substituted_in_every_url() {
        let temp = TempDir::new().unwrap();
        let mut opts = options(temp.path(), CategorySet::default());
        opts.categories.set(Category::Opencode, true);
        opts.version = "v9.9.9".to_string();
        let transport = RecordingTransport::serving("x");

        run(&opts, &transport, "20260101_000000");

        let requested = transport.requested();
        assert_eq!(requested.len(), MANIFEST.len());
        for url in requested {
            assert!(url.contains("/v9.9.9/"), "{url}");
            assert!(!url.contains("/main/"), "{url}");
        }
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let mut opts = options(temp.path(), CategorySet::default());
        opts.dry_run = true;
        let transport = RecordingTransport::serving("x");

        let report = run(&opts, &transport, "20260101_000000");

        assert!(transport.requested().is_empty());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
        assert_eq!(report.exit_status(), 0);
        assert_eq!(report.counts(Category::Core).planned, 1);
        assert_eq!(report.installed(), 0);
    }

    #[test]
    fn test_directory_failure_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        // a file where ~/.config should be
        fs::write(temp.path().join(".config"), "").unwrap();
        let mut categories = CategorySet::only(Category::Core);
        categories.set(Category::Opencode, true);
        let opts = options(temp.path(), categories);
        let transport = RecordingTransport::serving("x");

        let report = run(&opts, &transport, "20260101_000000");

        assert_eq!(report.directory_failures.len(), 1);
        assert_eq!(report.counts(Category::Core).installed, 1);
        assert_eq!(report.counts(Category::Opencode).failed, 2);
        assert_eq!(report.exit_status(), 1);
    }

    #[test]
    fn test_plan_follows_manifest_order() {
        let temp = TempDir::new().unwrap();
        let opts = options(temp.path(), CategorySet::default());
        let transport = RecordingTransport::default();
        let installer = Installer::new(&opts, &transport, "20260101_000000");

        let plan = installer.plan();
        let categories: Vec<_> = plan.iter().map(|e| e.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
        assert_eq!(plan[0].relative_path, "CLAUDE.md");
    }
}
