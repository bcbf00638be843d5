//! Install options
//!
//! [`InstallOptions`] is built once from the parsed command line and passed by
//! reference into the installer. Nothing mutates it after construction.

use std::path::PathBuf;

use reqwest::Url;

use crate::error::{InstallerError, Result};
use crate::manifest::Category;

/// Default source repository for raw file downloads
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/citypaul/.dotfiles";

/// Branch or tag fetched when no version is given
pub const DEFAULT_VERSION: &str = "main";

/// Which categories a run installs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CategorySet {
    pub core: bool,
    pub skills: bool,
    pub commands: bool,
    pub agents: bool,
    pub external: bool,
    pub opencode: bool,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            core: true,
            skills: true,
            commands: true,
            agents: true,
            external: true,
            opencode: false,
        }
    }
}

impl CategorySet {
    /// A set with every category disabled
    pub const fn none() -> Self {
        Self {
            core: false,
            skills: false,
            commands: false,
            agents: false,
            external: false,
            opencode: false,
        }
    }

    /// A set with exactly one category enabled
    pub fn only(category: Category) -> Self {
        let mut set = Self::none();
        set.set(category, true);
        set
    }

    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Core => self.core,
            Category::Skills => self.skills,
            Category::Commands => self.commands,
            Category::Agents => self.agents,
            Category::External => self.external,
            Category::Opencode => self.opencode,
        }
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        let slot = match category {
            Category::Core => &mut self.core,
            Category::Skills => &mut self.skills,
            Category::Commands => &mut self.commands,
            Category::Agents => &mut self.agents,
            Category::External => &mut self.external,
            Category::Opencode => &mut self.opencode,
        };
        *slot = enabled;
    }

    /// Enabled categories in installation order
    pub fn enabled(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }
}

/// Everything a single run needs to know
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub categories: CategorySet,
    /// Branch or tag in the source repository
    pub version: String,
    pub base_url: Url,
    /// Directory `.claude/` and `.config/opencode/` are created under
    pub home: PathBuf,
    /// Report planned downloads without touching the network or disk
    pub dry_run: bool,
}

/// Check that a version ref is safe to splice into a URL path
///
/// Refs may contain `/` (e.g. `feature/docs`) but no empty, `.` or `..` segments.
pub fn validate_version(version: &str) -> Result<()> {
    let invalid = |reason: &str| InstallerError::InvalidVersion {
        version: version.to_string(),
        reason: reason.to_string(),
    };

    if version.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if version.chars().any(|c| c.is_whitespace() || c == '\\' || c == '?' || c == '#') {
        return Err(invalid("contains a character not allowed in a git ref"));
    }
    if version
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return Err(invalid("contains an empty, '.' or '..' path segment"));
    }
    Ok(())
}

/// Parse the base URL of the source repository
pub fn parse_base_url(input: &str) -> Result<Url> {
    let url = Url::parse(input).map_err(|e| InstallerError::InvalidBaseUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(InstallerError::InvalidBaseUrl {
            url: input.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(InstallerError::InvalidBaseUrl {
            url: input.to_string(),
            reason: "query strings and fragments are not supported".to_string(),
        });
    }
    Ok(url)
}

/// Resolve the home directory, preferring an explicit override
pub fn resolve_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(dirs::home_dir)
        .ok_or(InstallerError::HomeNotFound)
}
