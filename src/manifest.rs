//! Static asset manifest
//!
//! The manifest is the fixed list of files the installer knows about, grouped
//! by [`Category`]. Adding or renaming a file is a code change, never user input.
//! Entry order only affects the order of progress output.

use std::fmt;
use std::path::{Path, PathBuf};

/// A group of related asset files installed together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Core,
    Skills,
    Commands,
    Agents,
    External,
    Opencode,
}

/// Install root a category writes under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallRoot {
    /// `~/.claude`
    Claude,
    /// `~/.config/opencode`
    Opencode,
}

impl InstallRoot {
    /// Resolve this root against a home directory
    pub fn resolve(self, home: &Path) -> PathBuf {
        match self {
            InstallRoot::Claude => home.join(".claude"),
            InstallRoot::Opencode => home.join(".config").join("opencode"),
        }
    }
}

impl Category {
    /// All categories in installation order
    pub const ALL: [Category; 6] = [
        Category::Core,
        Category::Skills,
        Category::Commands,
        Category::Agents,
        Category::External,
        Category::Opencode,
    ];

    /// Human-readable label used in progress output
    pub fn label(self) -> &'static str {
        match self {
            Category::Core => "CLAUDE.md",
            Category::Skills => "skills",
            Category::Commands => "commands",
            Category::Agents => "agents",
            Category::External => "community skills",
            Category::Opencode => "OpenCode config",
        }
    }

    /// Path prefix of this category in the source repository
    pub fn remote_prefix(self) -> &'static str {
        match self {
            Category::Core => "claude/.claude",
            Category::Skills => "claude/.claude/skills",
            Category::Commands => "claude/.claude/commands",
            Category::Agents => "claude/.claude/agents",
            Category::External => "external/web-quality-skills/skills",
            Category::Opencode => "opencode/.config/opencode",
        }
    }

    pub fn install_root(self) -> InstallRoot {
        match self {
            Category::Opencode => InstallRoot::Opencode,
            _ => InstallRoot::Claude,
        }
    }

    /// Subdirectory under the install root, if any
    pub fn subdir(self) -> Option<&'static str> {
        match self {
            Category::Core | Category::Opencode => None,
            Category::Skills | Category::External => Some("skills"),
            Category::Commands => Some("commands"),
            Category::Agents => Some("agents"),
        }
    }

    /// Directory this category's files land in
    pub fn install_dir(self, home: &Path) -> PathBuf {
        let root = self.install_root().resolve(home);
        match self.subdir() {
            Some(sub) => root.join(sub),
            None => root,
        }
    }

    /// Manifest entries of this category, in manifest order
    pub fn entries(self) -> impl Iterator<Item = &'static AssetManifestEntry> {
        MANIFEST.iter().filter(move |e| e.category == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One file the installer fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetManifestEntry {
    pub category: Category,
    /// `/`-separated path relative to the category's prefix and install dir
    pub relative_path: &'static str,
    pub description: &'static str,
}

impl AssetManifestEntry {
    const fn new(
        category: Category,
        relative_path: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            category,
            relative_path,
            description,
        }
    }

    /// Path segments of the remote location, below the version ref
    pub fn remote_segments(&self) -> impl Iterator<Item = &'static str> {
        self.category
            .remote_prefix()
            .split('/')
            .chain(self.relative_path.split('/'))
    }

    /// Local destination under `home`
    pub fn destination(&self, home: &Path) -> PathBuf {
        self.relative_path
            .split('/')
            .fold(self.category.install_dir(home), |dir, seg| dir.join(seg))
    }
}

use Category::{Agents, Commands, Core, External, Opencode, Skills};

/// Every file the installer knows about
pub static MANIFEST: &[AssetManifestEntry] = &[
    AssetManifestEntry::new(Core, "CLAUDE.md", "Core development guidelines"),
    // Skills
    AssetManifestEntry::new(Skills, "tdd/SKILL.md", "Test-driven development workflow"),
    AssetManifestEntry::new(Skills, "testing/SKILL.md", "Behavior-driven testing patterns"),
    AssetManifestEntry::new(
        Skills,
        "mutation-testing/SKILL.md",
        "Mutation testing to verify test effectiveness",
    ),
    AssetManifestEntry::new(
        Skills,
        "typescript-strict/SKILL.md",
        "Strict TypeScript conventions",
    ),
    AssetManifestEntry::new(Skills, "functional/SKILL.md", "Functional programming patterns"),
    AssetManifestEntry::new(Skills, "refactoring/SKILL.md", "When and how to refactor"),
    AssetManifestEntry::new(
        Skills,
        "expectations/SKILL.md",
        "Working expectations and documentation",
    ),
    AssetManifestEntry::new(Skills, "planning/SKILL.md", "Planning work in small increments"),
    AssetManifestEntry::new(
        Skills,
        "front-end-testing/SKILL.md",
        "Front-end testing with Testing Library",
    ),
    AssetManifestEntry::new(Skills, "react-testing/SKILL.md", "React component testing"),
    // Commands
    AssetManifestEntry::new(Commands, "pr.md", "Create a pull request"),
    AssetManifestEntry::new(Commands, "plan.md", "Create a plan document"),
    AssetManifestEntry::new(Commands, "setup.md", "Set up a project for this workflow"),
    // Agents
    AssetManifestEntry::new(Agents, "tdd-guardian.md", "Enforces TDD compliance"),
    AssetManifestEntry::new(Agents, "ts-enforcer.md", "Enforces TypeScript strict mode"),
    AssetManifestEntry::new(Agents, "refactor-scan.md", "Assesses refactoring opportunities"),
    AssetManifestEntry::new(Agents, "docs-guardian.md", "Maintains world-class documentation"),
    AssetManifestEntry::new(Agents, "learn.md", "Captures learnings into CLAUDE.md"),
    AssetManifestEntry::new(Agents, "adr.md", "Writes architecture decision records"),
    AssetManifestEntry::new(Agents, "progress-guardian.md", "Tracks plan progress"),
    AssetManifestEntry::new(Agents, "pr-reviewer.md", "Reviews pull requests"),
    AssetManifestEntry::new(
        Agents,
        "use-case-data-patterns.md",
        "Maps use cases to data access patterns",
    ),
    // Community skills
    AssetManifestEntry::new(External, "accessibility/SKILL.md", "Web accessibility audit"),
    AssetManifestEntry::new(External, "performance/SKILL.md", "Web performance audit"),
    AssetManifestEntry::new(External, "seo/SKILL.md", "Search engine optimization audit"),
    AssetManifestEntry::new(External, "best-practices/SKILL.md", "Web best practices audit"),
    // OpenCode
    AssetManifestEntry::new(Opencode, "opencode.json", "OpenCode configuration"),
    AssetManifestEntry::new(Opencode, "AGENTS.md", "OpenCode agent instructions"),
];
