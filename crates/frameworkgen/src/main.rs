use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = frameworkgen::cli::Cli::parse();
    frameworkgen::init(cli.verbose, cli.quiet);

    cli.run()
}
