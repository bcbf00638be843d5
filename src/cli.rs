//! CLI definitions using clap derive API
//!
//! Category selection flags are applied in command-line order, so a later
//! conflicting flag wins: `--no-agents --claude-only` installs only CLAUDE.md,
//! `--claude-only --with-opencode` installs CLAUDE.md and the OpenCode config.

use std::ffi::OsStr;
use std::path::PathBuf;

use clap::builder::{Styles, styling::AnsiColor};
use clap::parser::ValueSource;
use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use reqwest::Url;

use crate::config::{self, CategorySet, DEFAULT_BASE_URL, DEFAULT_VERSION};
use crate::error::InstallerError;
use crate::manifest::Category;

/// install-claude - development guidelines installer
///
/// Downloads CLAUDE.md, skills, slash commands and agents into ~/.claude.
#[derive(Parser, Debug)]
#[command(
    name = "install-claude",
    disable_version_flag = true,
    args_override_self = true,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install CLAUDE.md development guidelines, skills, commands and agents",
    long_about = "Downloads CLAUDE.md, skills, slash commands and agents into ~/.claude, \
                  and optionally an OpenCode configuration into ~/.config/opencode. \
                  Existing files are renamed to <file>.backup.<timestamp> before being replaced. \
                  Downloaded files are not checksummed: only install from a source you trust.",
    after_help = "EXAMPLES:\n  \
                  Install everything:\n    install-claude\n\n\
                  Install only CLAUDE.md:\n    install-claude --claude-only\n\n\
                  Install everything except agents:\n    install-claude --no-agents\n\n\
                  Also install the OpenCode config:\n    install-claude --with-opencode\n\n\
                  Install a tagged release:\n    install-claude --version v2.0.0\n\n\
                  Install from a mirror:\n    install-claude --base-url https://mirror.example.com/dotfiles\n\n\
                  Show what would be downloaded:\n    install-claude --dry-run"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Install only CLAUDE.md
    #[arg(long)]
    pub claude_only: bool,

    /// Install everything except agents
    #[arg(long)]
    pub no_agents: bool,

    /// Install only skills
    #[arg(long)]
    pub skills_only: bool,

    /// Install only agents
    #[arg(long)]
    pub agents_only: bool,

    /// Also install the OpenCode configuration
    #[arg(long)]
    pub with_opencode: bool,

    /// Install only the OpenCode configuration
    #[arg(long)]
    pub opencode_only: bool,

    /// Skip the community skill pack
    #[arg(long)]
    pub no_external: bool,

    /// Branch or tag to install from
    #[arg(
        long,
        value_name = "REF",
        env = VERSION_ENV,
        default_value = DEFAULT_VERSION,
        value_parser = parse_version
    )]
    pub version: String,

    /// Source repository to download from
    #[arg(
        long,
        value_name = "URL",
        env = "INSTALL_CLAUDE_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        value_parser = parse_base_url
    )]
    pub base_url: Url,

    /// Directory to install under (defaults to your home directory)
    #[arg(long, value_name = "DIR", env = "INSTALL_CLAUDE_HOME")]
    pub home: Option<PathBuf>,

    /// Show what would be downloaded without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Environment variable supplying the default `--version`
pub const VERSION_ENV: &str = "VERSION";

fn parse_version(s: &str) -> Result<String, InstallerError> {
    config::validate_version(s)?;
    Ok(s.to_string())
}

fn parse_base_url(s: &str) -> Result<Url, InstallerError> {
    config::parse_base_url(s)
}

/// A category selection flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    ClaudeOnly,
    NoAgents,
    SkillsOnly,
    AgentsOnly,
    WithOpencode,
    OpencodeOnly,
    NoExternal,
}

impl Selection {
    pub const ALL: [Selection; 7] = [
        Selection::ClaudeOnly,
        Selection::NoAgents,
        Selection::SkillsOnly,
        Selection::AgentsOnly,
        Selection::WithOpencode,
        Selection::OpencodeOnly,
        Selection::NoExternal,
    ];

    /// clap argument id of the flag
    fn id(self) -> &'static str {
        match self {
            Selection::ClaudeOnly => "claude_only",
            Selection::NoAgents => "no_agents",
            Selection::SkillsOnly => "skills_only",
            Selection::AgentsOnly => "agents_only",
            Selection::WithOpencode => "with_opencode",
            Selection::OpencodeOnly => "opencode_only",
            Selection::NoExternal => "no_external",
        }
    }

    /// Apply this flag on top of the selection so far
    pub fn apply(self, set: &mut CategorySet) {
        match self {
            Selection::ClaudeOnly => *set = CategorySet::only(Category::Core),
            Selection::SkillsOnly => *set = CategorySet::only(Category::Skills),
            Selection::AgentsOnly => *set = CategorySet::only(Category::Agents),
            Selection::OpencodeOnly => *set = CategorySet::only(Category::Opencode),
            Selection::NoAgents => set.set(Category::Agents, false),
            Selection::NoExternal => set.set(Category::External, false),
            Selection::WithOpencode => set.set(Category::Opencode, true),
        }
    }
}

/// Fold selection flags, in order, over the default set
pub fn resolve_categories(selections: impl IntoIterator<Item = Selection>) -> CategorySet {
    selections
        .into_iter()
        .fold(CategorySet::default(), |mut set, selection| {
            selection.apply(&mut set);
            set
        })
}

/// Selection flags given on the command line, in the order they appeared
fn ordered_selections(matches: &ArgMatches) -> Vec<Selection> {
    let mut given: Vec<(usize, Selection)> = Selection::ALL
        .into_iter()
        .filter(|s| matches.value_source(s.id()) == Some(ValueSource::CommandLine))
        .filter_map(|s| {
            matches
                .indices_of(s.id())
                .and_then(Iterator::last)
                .map(|idx| (idx, s))
        })
        .collect();
    given.sort_by_key(|(idx, _)| *idx);
    given.into_iter().map(|(_, s)| s).collect()
}

/// The clap command, given the current value of [`VERSION_ENV`]
///
/// An exported but empty `VERSION` counts as unset, so `--version` falls back
/// to its default instead of failing validation.
fn command(version_env: Option<&OsStr>) -> Command {
    let command = Cli::command();
    if version_env.is_some_and(OsStr::is_empty) {
        command.mut_arg("version", |arg| arg.env(None::<&'static str>))
    } else {
        command
    }
}

/// Parsed command line
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    pub categories: CategorySet,
}

impl Invocation {
    /// Parse an argument vector
    ///
    /// `--help` and usage errors come back as `clap::Error`; the caller decides
    /// whether to print and exit.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let version_env = std::env::var_os(VERSION_ENV);
        let matches = command(version_env.as_deref()).try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;
        let categories = resolve_categories(ordered_selections(&matches));
        Ok(Self { cli, categories })
    }
}
