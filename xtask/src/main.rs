use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

const FIXTURE_SOURCES: &str = "crates/frameworkgen/tests/fixtures/framework";

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Render the demo site from the test fixtures
    DemoSite {
        /// Output directory
        #[arg(long, default_value = "target/demo-site")]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::DemoSite { out } => render_demo_site(&out)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run").arg("--workspace");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    run(cmd, "cargo nextest run")
}

fn render_demo_site(out: &str) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-p", "frameworkgen", "--", "site", FIXTURE_SOURCES, "--output", out]);
    run(cmd, "demo site rendering")
}

fn run(mut cmd: Command, label: &str) -> Result<()> {
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{label} failed");
    }
    Ok(())
}
