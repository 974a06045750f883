pub mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use crate::application::use_cases::runner::RunContext;
use crate::domain::entities::helper_config::ConfigOverrides;
use crate::domain::value_objects::VersionBump;
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::vcs::GitCli;
use commands::{
    ChangelogCommand, CommitCommand, ConsolePrompt, PullCommand, StatusCommand, TagCommand,
};

/// Output format options for status command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// git-helpers - maintain every git repository under one directory
#[derive(Parser, Debug)]
#[command(name = "git-helpers")]
#[command(about = "Inspect, pull, commit, tag and changelog every repository under a directory")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("GIT_HASH"), ", built ", env!("BUILD_DATE"), " for ", env!("BUILD_TARGET"), ")"
))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding the repositories (defaults to current directory)
    #[arg(short = 'C', long, global = true, env = "GIT_HELPERS_ROOT")]
    pub directory: Option<PathBuf>,

    /// Timeout in seconds for each git invocation
    #[arg(long, global = true, env = "GIT_HELPERS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Number of repositories processed in parallel
    #[arg(short, long, global = true, env = "GIT_HELPERS_JOBS")]
    pub jobs: Option<usize>,

    /// Also accept git checkouts without a project manifest
    #[arg(long, global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show branch, version and uncommitted changes of each repository
    Status {
        /// Only repositories whose directory name matches (regex)
        #[arg(value_name = "MATCH")]
        pattern: Option<String>,

        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Pull every repository without uncommitted changes
    Pull {
        /// Only repositories whose directory name matches (regex)
        #[arg(value_name = "MATCH")]
        pattern: Option<String>,

        /// Pull even with uncommitted changes
        #[arg(short, long)]
        force: bool,

        /// Stash uncommitted changes before pulling and restore them after
        #[arg(short, long)]
        stash: bool,
    },

    /// Commit all changes in every dirty repository
    Commit {
        /// Only repositories whose directory name matches (regex)
        #[arg(value_name = "MATCH")]
        pattern: Option<String>,

        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Tag and push a new version in each repository with new commits
    Tag {
        /// Only repositories whose directory name matches (regex)
        #[arg(value_name = "MATCH")]
        pattern: Option<String>,

        /// Version component to increment for the suggestion (major, minor, patch)
        #[arg(short, long, default_value = "patch")]
        up: VersionBump,

        /// Generate and commit a changelog before tagging
        #[arg(long)]
        changelog: bool,

        /// Tag even when there are no commits since the latest tag
        #[arg(short, long)]
        force: bool,

        /// Use the suggested version without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Write a changelog file per pair of consecutive version tags
    Changelog {
        /// Only repositories whose directory name matches (regex)
        #[arg(value_name = "MATCH")]
        pattern: Option<String>,

        /// Run even with uncommitted changes
        #[arg(short, long)]
        force: bool,

        /// Replace changelog files that already exist
        #[arg(long)]
        overwrite: bool,

        /// Commit every written changelog
        #[arg(short, long)]
        commit: bool,

        /// Also write <latest tag>..HEAD under this label
        #[arg(long, value_name = "LABEL")]
        head: Option<String>,

        /// Output directory, relative paths resolve inside each repository
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        let context = Arc::new(self.build_context().await?);

        match &self.cli.command {
            Commands::Status { pattern, output } => {
                StatusCommand::new(context, pattern.clone(), *output)
                    .execute()
                    .await
            }
            Commands::Pull {
                pattern,
                force,
                stash,
            } => {
                PullCommand::new(context, pattern.clone(), *force, *stash)
                    .execute()
                    .await
            }
            Commands::Commit { pattern, message } => {
                CommitCommand::new(context, pattern.clone(), message.clone())
                    .execute()
                    .await
            }
            Commands::Tag {
                pattern,
                up,
                changelog,
                force,
                yes,
            } => {
                TagCommand::new(context, pattern.clone(), *up, *changelog, *force, *yes)
                    .execute(Arc::new(ConsolePrompt::new()))
                    .await
            }
            Commands::Changelog {
                pattern,
                force,
                overwrite,
                commit,
                head,
                path,
            } => {
                ChangelogCommand::new(
                    context,
                    pattern.clone(),
                    *force,
                    *overwrite,
                    *commit,
                    head.clone(),
                    path.clone(),
                )
                .execute()
                .await
            }
        }
    }

    /// Resolves root, file config and flag overrides into one validated record.
    async fn build_context(&self) -> anyhow::Result<RunContext> {
        let root = match &self.cli.directory {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("Cannot determine current directory")?,
        };

        let overrides = ConfigOverrides {
            timeout_seconds: self.cli.timeout,
            jobs: self.cli.jobs,
            strict_manifest: self.cli.lenient.then_some(false),
        };
        let config = ConfigStore::new(&root)
            .load()?
            .with_overrides(&overrides)
            .validated()?;

        let vcs = GitCli::new()
            .with_executable(config.git_executable.clone())
            .with_timeout(config.timeout());
        vcs.check_availability()
            .await
            .with_context(|| format!("Cannot run '{}'", config.git_executable))?;

        Ok(RunContext::new(root, config, Arc::new(vcs)))
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
