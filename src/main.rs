use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod fetch;
mod output;
mod parsing;
mod pipeline;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("hla_align=debug,info")
    } else {
        EnvFilter::new("hla_align=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli::run(&cli)
}
