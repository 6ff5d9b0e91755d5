use clap::Args;

use crate::catalog::store::RegionTable;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::core::address::AddressFragments;
use crate::matching::engine::{AdmMatch, AdmMatcher};

/// Region names as a geocoder would report them
#[derive(Args)]
pub struct MatchArgs {
    /// Province name (e.g., "DKI Jakarta")
    #[arg(long)]
    pub province: Option<String>,

    /// Regency or city name
    #[arg(long)]
    pub regency: Option<String>,

    /// District (kecamatan) name
    #[arg(long)]
    pub district: Option<String>,

    /// Village (kelurahan/desa) name
    #[arg(long)]
    pub village: Option<String>,
}

/// Match names against the configured dataset, without geocoding
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or no code matches.
pub fn run(
    args: MatchArgs,
    config: AppConfig,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let fragments = AddressFragments::new(
        args.province.as_deref(),
        args.regency.as_deref(),
        args.district.as_deref(),
        args.village.as_deref(),
    );

    let client = config.http_client()?;
    let rt = tokio::runtime::Runtime::new()?;
    let table = rt.block_on(RegionTable::load(&client, &config.dataset))?;

    if verbose {
        eprintln!("Loaded {} rows from {}", table.len(), config.dataset);
    }

    let matched = AdmMatcher::new(&table)
        .resolve(&fragments)
        .map_err(|e| anyhow::anyhow!("{e} (stopped at {} tier)", e.tier()))?;

    match format {
        OutputFormat::Text => print_text(&matched, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matched)?),
    }

    Ok(())
}

fn print_text(matched: &AdmMatch, verbose: bool) {
    println!("{}", matched.code);

    if verbose {
        println!("  Strategy: {:?}", matched.strategy);
        for row in &matched.path {
            println!("  {:<9} {} {}", row.tier().to_string(), row.code, row.name);
        }
    }
}
