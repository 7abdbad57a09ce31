//! CLI for harlens.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use harlens_core::config::{self, HarlensConfig};
use std::path::{Path, PathBuf};

use commands::{run_analyze, run_diff, run_rules};

/// Top-level CLI for harlens.
#[derive(Debug, Parser)]
#[command(name = "harlens")]
#[command(about = "harlens: validate the HTML inside HAR captures, rule by rule", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/harlens/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Analyze one or more HAR files, in order, into one group.
    Analyze {
        /// HAR files to analyze.
        #[arg(required = true)]
        paths: Vec<String>,

        /// Target URL the captures belong to.
        #[arg(long)]
        url: String,

        /// Group the analyses are accumulated under.
        #[arg(long, default_value = "default")]
        group: String,

        /// Print the accumulated summary instead of each outcome.
        #[arg(long)]
        summary: bool,
    },

    /// Show the effective rule configuration.
    Rules,

    /// Compare two HAR captures of the same URL rule by rule.
    Diff {
        /// Earlier capture.
        before: String,

        /// Later capture.
        after: String,

        /// Target URL the captures belong to.
        #[arg(long)]
        url: String,
    },
}

fn load_config(path: Option<&Path>) -> Result<HarlensConfig> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Analyze {
                paths,
                url,
                group,
                summary,
            } => run_analyze(&cfg, &paths, &url, &group, summary).await?,
            CliCommand::Rules => run_rules(&cfg)?,
            CliCommand::Diff { before, after, url } => {
                run_diff(&cfg, Path::new(&before), Path::new(&after), &url).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
