//! Command-line surface.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::catalog;
use crate::app::generator::{
    count_nodes, depth_histogram, framework_to_json, generate_framework_structure_with_root,
};
use crate::app::outline::{OutlineOptions, render_outline};
use crate::app::parser::{extract_domain_from_text, parse_framework_text};
use crate::app::site::{SiteOptions, SiteRenderer};
use crate::domain::model::{FrameworkDomain, FrameworkNode};
use crate::infra::config::Config;
use crate::infra::sources::SourceLoader;

#[derive(Debug, Parser)]
#[command(
    name = "frameworkgen",
    author,
    version,
    about = "Build the OPTIM framework tree from CA/CI text and render its index page"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse one CA/CI text file and print the flat items as JSON
    Parse {
        file: PathBuf,
        /// Domain code; detected from the text when omitted
        #[arg(long)]
        domain: Option<FrameworkDomain>,
    },
    /// Generate the framework tree JSON from a source directory
    Generate {
        #[command(flatten)]
        tree: TreeArgs,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indent width, 0 for compact output
        #[arg(long)]
        indent: Option<usize>,
    },
    /// Render the static index page
    Site {
        #[command(flatten)]
        tree: TreeArgs,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Page title
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the framework tree as an outline
    Tree {
        #[command(flatten)]
        tree: TreeArgs,
        /// Deepest level printed
        #[arg(long)]
        depth: Option<usize>,
        /// Only show branches whose id or name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print node counts for the framework tree
    Stats {
        #[command(flatten)]
        tree: TreeArgs,
    },
    /// Search the index page catalog
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

/// Arguments shared by commands that build the tree.
#[derive(Debug, clap::Args)]
pub struct TreeArgs {
    /// Directory holding the section text files
    pub source: PathBuf,
    /// Prune nodes deeper than this level (root is 0)
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Use bare names instead of generated descriptions
    #[arg(long)]
    pub no_descriptions: bool,
}

impl TreeArgs {
    fn build(&self, config: &Config) -> Result<FrameworkNode> {
        let sources = SourceLoader::from_config(&self.source, config)?
            .load()
            .with_context(|| format!("failed to load sources from {}", self.source.display()))?;

        let mut options = config.generator.options();
        if self.max_depth.is_some() {
            options.max_depth = self.max_depth;
        }
        if self.no_descriptions {
            options.include_descriptions = false;
        }

        Ok(generate_framework_structure_with_root(
            &sources,
            &options,
            &config.generator.root(),
        ))
    }
}

impl Cli {
    /// Execute the parsed command, writing results to stdout.
    pub fn run(self) -> Result<()> {
        let config = Config::load()?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        execute(self.command, &config, &mut out)
    }
}

/// Execute `command` against `config`, writing user-facing output to `out`.
pub fn execute(command: Command, config: &Config, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Parse { file, domain } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let domain = match domain.or_else(|| extract_domain_from_text(&text)) {
                Some(domain) => domain,
                None => anyhow::bail!(
                    "could not detect a domain for {}; pass --domain",
                    file.display()
                ),
            };
            let items = parse_framework_text(&text, domain);
            let json =
                serde_json::to_string_pretty(&items).context("failed to serialize parsed items")?;
            writeln!(out, "{json}")?;
        }
        Command::Generate {
            tree,
            output,
            indent,
        } => {
            let framework = tree.build(config)?;
            let json = framework_to_json(
                &framework,
                indent.unwrap_or_else(|| config.generator.json_indent()),
            )?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent()
                        && !parent.as_os_str().is_empty()
                    {
                        fs::create_dir_all(parent).with_context(|| {
                            format!("failed to create output directory: {}", parent.display())
                        })?;
                    }
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    writeln!(out, "wrote {} nodes to {}", count_nodes(&framework), path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
        }
        Command::Site {
            tree,
            output,
            title,
        } => {
            let framework = tree.build(config)?;
            let mut options = SiteOptions::from_config(config);
            if let Some(output) = output {
                options.output_dir = output;
            }
            if let Some(title) = title {
                options.title = title;
            }
            let result = SiteRenderer::new()?.write(&framework, &options)?;
            for file in &result.files {
                writeln!(out, "{}", file.display())?;
            }
        }
        Command::Tree {
            tree,
            depth,
            filter,
        } => {
            let framework = tree.build(config)?;
            let rendered = render_outline(
                &framework,
                &OutlineOptions {
                    max_depth: depth,
                    filter,
                },
            );
            writeln!(out, "{rendered}")?;
        }
        Command::Stats { tree } => {
            let framework = tree.build(config)?;
            writeln!(out, "total nodes: {}", count_nodes(&framework))?;
            for (depth, count) in depth_histogram(&framework).into_iter().enumerate() {
                writeln!(out, "depth {depth}: {count}")?;
            }
        }
        Command::Search { query, limit } => {
            let items = catalog::search_items(config.site.domain_base());
            let results =
                catalog::search(&items, &query, limit.unwrap_or(config.site.search_limit()));
            if results.is_empty() {
                writeln!(out, "No results found")?;
            }
            for item in results {
                writeln!(out, "{}\t{}\t{}", item.title, item.path, item.url)?;
            }
        }
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "frameworkgen", out);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str], config: &Config) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut buffer = Vec::new();
        execute(cli.command, config, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_prints_tab_separated_rows() -> Result<()> {
        let output = run(&["frameworkgen", "search", "cryo"], &Config::default())?;
        assert!(output.starts_with("C2-CRYOGENICS\tTechnological Domains > C2-CRYOGENICS\t"));
        Ok(())
    }

    #[test]
    fn short_search_reports_no_results() -> Result<()> {
        let output = run(&["frameworkgen", "search", "x"], &Config::default())?;
        assert_eq!(output.trim(), "No results found");
        Ok(())
    }

    #[test]
    fn parse_detects_domain_from_text() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("org.txt");
        fs::write(&file, "CA-O-001-GOVERNANCE\nCI-CA-O-001-001-CHARTER\n")?;

        let output = run(
            &["frameworkgen", "parse", file.to_str().unwrap()],
            &Config::default(),
        )?;
        let items: Vec<serde_json::Value> = serde_json::from_str(&output)?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["parent_id"], "CA-O-001-");
        Ok(())
    }

    #[test]
    fn parse_without_detectable_domain_fails() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("unknown.txt");
        fs::write(&file, "nothing here\n")?;
        let result = run(
            &["frameworkgen", "parse", file.to_str().unwrap()],
            &Config::default(),
        );
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn domain_flag_accepts_codes() {
        let cli = Cli::try_parse_from([
            "frameworkgen",
            "parse",
            "x.txt",
            "--domain",
            "E2-ENERGY_AND_RENEWABLE",
        ])
        .unwrap();
        match cli.command {
            Command::Parse { domain, .. } => {
                assert_eq!(domain, Some(FrameworkDomain::EnergyAndRenewable))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
