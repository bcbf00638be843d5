//! Common test utilities for install-claude integration tests
//!
//! Every test gets a throwaway home directory and a local source repository
//! served through a `file://` base URL, so no test touches the network or the
//! real `~/.claude`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Remote paths (below the version ref) of every file the installer fetches
pub const CORE: &[&str] = &["claude/.claude/CLAUDE.md"];

pub const SKILLS: &[&str] = &[
    "claude/.claude/skills/tdd/SKILL.md",
    "claude/.claude/skills/testing/SKILL.md",
    "claude/.claude/skills/mutation-testing/SKILL.md",
    "claude/.claude/skills/typescript-strict/SKILL.md",
    "claude/.claude/skills/functional/SKILL.md",
    "claude/.claude/skills/refactoring/SKILL.md",
    "claude/.claude/skills/expectations/SKILL.md",
    "claude/.claude/skills/planning/SKILL.md",
    "claude/.claude/skills/front-end-testing/SKILL.md",
    "claude/.claude/skills/react-testing/SKILL.md",
];

pub const COMMANDS: &[&str] = &[
    "claude/.claude/commands/pr.md",
    "claude/.claude/commands/plan.md",
    "claude/.claude/commands/setup.md",
];

pub const AGENTS: &[&str] = &[
    "claude/.claude/agents/tdd-guardian.md",
    "claude/.claude/agents/ts-enforcer.md",
    "claude/.claude/agents/refactor-scan.md",
    "claude/.claude/agents/docs-guardian.md",
    "claude/.claude/agents/learn.md",
    "claude/.claude/agents/adr.md",
    "claude/.claude/agents/progress-guardian.md",
    "claude/.claude/agents/pr-reviewer.md",
    "claude/.claude/agents/use-case-data-patterns.md",
];

pub const EXTERNAL: &[&str] = &[
    "external/web-quality-skills/skills/accessibility/SKILL.md",
    "external/web-quality-skills/skills/performance/SKILL.md",
    "external/web-quality-skills/skills/seo/SKILL.md",
    "external/web-quality-skills/skills/best-practices/SKILL.md",
];

pub const OPENCODE: &[&str] = &[
    "opencode/.config/opencode/opencode.json",
    "opencode/.config/opencode/AGENTS.md",
];

/// Every remote path, in manifest order
pub fn all_remote_paths() -> Vec<&'static str> {
    [CORE, SKILLS, COMMANDS, AGENTS, EXTERNAL, OPENCODE].concat()
}

/// A fake home directory plus a local source repository
pub struct TestEnv {
    /// Temporary directory holding both trees
    pub temp: TempDir,
    pub home: PathBuf,
    pub source: PathBuf,
}

impl TestEnv {
    /// Create an empty home and a source repository populated for `main`
    pub fn new() -> Self {
        let env = Self::empty();
        env.publish("main");
        env
    }

    /// Create an empty home and an empty source repository
    pub fn empty() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let source = temp.path().join("source");
        std::fs::create_dir_all(&home).expect("Failed to create home directory");
        std::fs::create_dir_all(&source).expect("Failed to create source directory");
        Self { temp, home, source }
    }

    /// Write every manifest file into the source repository under `version`
    pub fn publish(&self, version: &str) {
        for path in all_remote_paths() {
            self.write_source(version, path, &source_body(version, path));
        }
    }

    pub fn write_source(&self, version: &str, path: &str, content: &str) {
        let file = self.source.join(version).join(path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create source directory");
        }
        std::fs::write(&file, content).expect("Failed to write source file");
    }

    pub fn remove_source(&self, version: &str, path: &str) {
        std::fs::remove_file(self.source.join(version).join(path))
            .expect("Failed to remove source file");
    }

    /// `file://` URL of the source repository
    pub fn base_url(&self) -> String {
        reqwest::Url::from_directory_path(&self.source)
            .expect("Source path is not absolute")
            .to_string()
    }

    /// The installer binary pointed at this environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("install-claude").unwrap();
        // Ignore any developer overrides
        for var in [
            "VERSION",
            "INSTALL_CLAUDE_BASE_URL",
            "INSTALL_CLAUDE_HOME",
            "INSTALL_CLAUDE_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.home);
        cmd.env("NO_COLOR", "1");
        cmd.args(["--base-url", &self.base_url()]);
        cmd.arg("--home").arg(&self.home);
        cmd
    }

    pub fn home_file(&self, path: &str) -> PathBuf {
        self.home.join(path)
    }

    pub fn read_home_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.home_file(path)).expect("Failed to read installed file")
    }

    /// Every file under home, relative and sorted
    pub fn home_tree(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect_files(&self.home, &self.home, &mut files);
        files.sort();
        files
    }

    /// Installed files, excluding backups, with their contents
    pub fn installed_snapshot(&self) -> Vec<(String, String)> {
        self.home_tree()
            .into_iter()
            .filter(|f| !f.contains(".backup."))
            .map(|f| {
                let body = self.read_home_file(&f);
                (f, body)
            })
            .collect()
    }

    pub fn backups(&self) -> Vec<String> {
        self.home_tree()
            .into_iter()
            .filter(|f| f.contains(".backup."))
            .collect()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Body the source repository serves for `path` at `version`
pub fn source_body(version: &str, path: &str) -> String {
    format!("# {path} @ {version}\n")
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else if let Ok(rel) = path.strip_prefix(root) {
            out.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creation() {
        let env = TestEnv::new();
        assert!(env.home.exists());
        assert!(env.home_tree().is_empty());
        assert!(env.source.join("main/claude/.claude/CLAUDE.md").is_file());
    }

    #[test]
    fn test_base_url_is_file_url() {
        let env = TestEnv::empty();
        assert!(env.base_url().starts_with("file://"));
        assert!(env.base_url().ends_with('/'));
    }
}
