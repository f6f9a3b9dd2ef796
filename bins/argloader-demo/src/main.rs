mod cmd;
mod config;
mod error;
mod hello;

use argloader::ArgLoader;
use clap::Parser;
use config::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // One registry for the whole process, built before any request is handled.
    let loader = ArgLoader::new();
    tracing::debug!(?loader, "argument loader ready");

    let result = match cli.command {
        Commands::Schema => cmd::schema::run(&loader),
        Commands::Resolve(args) => cmd::resolve::run(&loader, args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
