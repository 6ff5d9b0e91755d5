use clap::Args;

use crate::aggregator::{AggregateWeather, ProviderOutcome, WeatherAggregator};
use crate::cli::{CoordinateArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Args)]
pub struct WeatherArgs {
    #[command(flatten)]
    pub coords: CoordinateArgs,
}

/// Query every provider for a coordinate and print the merged result
///
/// # Errors
///
/// Returns an error if the coordinate is invalid or every provider failed.
pub fn run(args: WeatherArgs, config: AppConfig, format: OutputFormat) -> anyhow::Result<()> {
    let coords = args.coords.coordinates()?;
    config.warn_missing_keys();
    let client = config.http_client()?;
    let aggregator = WeatherAggregator::new(&config, client);

    let rt = tokio::runtime::Runtime::new()?;
    let weather = rt.block_on(aggregator.aggregate(coords));

    match format {
        OutputFormat::Text => print_text(&weather),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&weather)?),
    }

    if weather.all_failed() {
        anyhow::bail!("No weather provider returned data for {coords}");
    }
    Ok(())
}

fn print_text(weather: &AggregateWeather) {
    let slots = [
        ("OpenWeather", &weather.open_weather),
        ("Tomorrow.io", &weather.tomorrow_weather),
        ("AccuWeather", &weather.accu_weather),
        ("BMKG", &weather.bmkg_weather),
    ];

    for (name, outcome) in slots {
        match outcome {
            ProviderOutcome::Ok(body) => println!("{name:<12} ok\n{body}"),
            ProviderOutcome::Failed(failure) => {
                println!("{name:<12} {} ({})", failure.error, failure.error_type);
            }
        }
    }
}
