use clap::Parser;
use tracing_subscriber::EnvFilter;

mod batch;
mod cli;
mod config;
mod download;
mod error;
mod library;
mod pipeline;
mod runtime;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    runtime::run(args)
}
