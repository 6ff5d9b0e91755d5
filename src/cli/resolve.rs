use clap::Args;

use crate::cli::{CoordinateArgs, OutputFormat};
use crate::config::AppConfig;
use crate::matching::resolver::{Adm4Resolver, Resolution};

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub coords: CoordinateArgs,
}

/// Reverse geocode a coordinate and print its ADM4 code
///
/// # Errors
///
/// Returns an error if the coordinate is invalid, an upstream is
/// unavailable, or no village code matches.
pub fn run(
    args: ResolveArgs,
    config: AppConfig,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let coords = args.coords.coordinates()?;
    let client = config.http_client()?;
    let resolver = Adm4Resolver::new(&config, client);

    let rt = tokio::runtime::Runtime::new()?;
    let resolution = rt.block_on(resolver.resolve(coords))?;

    match format {
        OutputFormat::Text => print_text(&resolution, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
    }

    Ok(())
}

fn print_text(resolution: &Resolution, verbose: bool) {
    println!("{}", resolution.matched.code);

    if verbose {
        println!("  Strategy: {:?}", resolution.matched.strategy);
        for row in &resolution.matched.path {
            println!("  {:<9} {} {}", row.tier().to_string(), row.code, row.name);
        }
    }
}
