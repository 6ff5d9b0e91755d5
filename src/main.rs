use clap::Parser;
use tracing_subscriber::EnvFilter;

use weather_adm4::cli;
use weather_adm4::web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins; otherwise verbosity picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("weather_adm4=debug,info")
        } else {
            EnvFilter::new("weather_adm4=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut config = cli.config.to_config();

    match cli.command {
        cli::Commands::Serve(args) => {
            config.preload_dataset = args.preload_dataset;
            web::server::run(args, config)?;
        }
        cli::Commands::Resolve(args) => {
            cli::resolve::run(args, config, cli.format, cli.verbose)?;
        }
        cli::Commands::Weather(args) => {
            cli::weather::run(args, config, cli.format)?;
        }
        cli::Commands::Match(args) => {
            cli::lookup::run(args, config, cli.format, cli.verbose)?;
        }
        cli::Commands::Dataset(args) => {
            cli::dataset::run(args, config, cli.format)?;
        }
    }

    Ok(())
}
