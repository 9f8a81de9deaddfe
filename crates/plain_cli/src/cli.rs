/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use clap::{Parser, Subcommand, ValueEnum};
use plain_factory::TabKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plain-factory")]
#[command(author, version, about = "Build Plain License pages from license metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (defaults to plain-factory.toml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Assemble licenses and write their artifacts or print one rendering")]
    Process {
        /// License files (YAML, JSON, or markdown with YAML frontmatter)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Artifact root (overrides the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = RenderFormat::All)]
        format: RenderFormat,

        /// SPDX ids that must be assembled (defaults to the inputs' ids)
        #[arg(long)]
        expect: Vec<String>,
    },

    #[command(about = "Print the plaintext export of a license")]
    Plaintext { input: PathBuf },

    #[command(about = "Print the derived attributes of a license as JSON")]
    Meta { input: PathBuf },

    #[command(about = "Check that license files load and assemble")]
    Validate {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Write every artifact
    All,
    Reader,
    Markdown,
    Plaintext,
    Changelog,
    Official,
    Embed,
    /// The assembled page body
    Page,
}

impl RenderFormat {
    /// The tab printed for this format, if it is a single tab.
    pub fn tab(self) -> Option<TabKind> {
        match self {
            Self::Reader => Some(TabKind::Reader),
            Self::Markdown => Some(TabKind::Markdown),
            Self::Plaintext => Some(TabKind::Plaintext),
            Self::Changelog => Some(TabKind::Changelog),
            Self::Official => Some(TabKind::Official),
            Self::Embed => Some(TabKind::Embed),
            Self::All | Self::Page => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_process_arguments() {
        let cli = Cli::try_parse_from([
            "plain-factory",
            "-vv",
            "process",
            "mit.md",
            "unlicense.yaml",
            "--format",
            "markdown",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Process { inputs, format, output, .. } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(format, RenderFormat::Markdown);
                assert_eq!(format.tab(), Some(TabKind::Markdown));
                assert!(output.is_none());
            }
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn test_process_requires_inputs() {
        assert!(Cli::try_parse_from(["plain-factory", "process"]).is_err());
    }
}
