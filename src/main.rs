use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nws_weather_mcp::constants::DEFAULT_TIMEOUT_SECS;
use nws_weather_mcp::{Config, Coordinates, Location, Weather, WeatherClient};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nws-weather-mcp")]
#[command(about = "National Weather Service lookups from the command line or as MCP tools")]
#[command(version)]
struct Cli {
    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show active alerts for a US state
    Alerts {
        /// Two-letter state code, e.g. CA
        state: String,

        /// Only show alerts whose event name contains this text (case-insensitive)
        #[arg(short = 't', long, default_value = "")]
        event_type: String,
    },

    /// Show precipitation chances for the next five forecast periods
    Forecast {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Show current conditions for a city name or "lat,lon"
    Weather {
        location: String,
    },

    /// Show current air quality
    AirQuality {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Run the MCP server over stdio
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nws_weather_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::default().with_timeout(Duration::from_secs(cli.timeout));

    match cli.command {
        Commands::Alerts { state, event_type } => cmd_alerts(config, &state, &event_type).await,
        Commands::Forecast {
            latitude,
            longitude,
        } => cmd_forecast(config, latitude, longitude).await,
        Commands::Weather { location } => cmd_weather(config, &location).await,
        Commands::AirQuality {
            latitude,
            longitude,
        } => cmd_air_quality(config, latitude, longitude).await,
        Commands::Serve => cmd_serve(config).await,
    }
}

async fn cmd_alerts(config: Config, state: &str, event_type: &str) -> Result<()> {
    let client = WeatherClient::new(config)?;
    println!("{}", client.alerts_by_type(state, event_type).await?);
    Ok(())
}

async fn cmd_forecast(config: Config, latitude: f64, longitude: f64) -> Result<()> {
    // Reject bad coordinates before any request is made
    let coordinates = Coordinates::new(latitude, longitude)?;
    let client = WeatherClient::new(config)?;
    println!("{}", client.precipitation_chance(&coordinates).await?);
    Ok(())
}

async fn cmd_weather(config: Config, location: &str) -> Result<()> {
    let location = Location::parse(location)?;
    let client = WeatherClient::new(config)?;
    println!("{}", client.current_weather(&location).await?);
    Ok(())
}

async fn cmd_air_quality(config: Config, latitude: f64, longitude: f64) -> Result<()> {
    let coordinates = Coordinates::new(latitude, longitude)?;
    let client = WeatherClient::new(config)?;
    println!("{}", client.air_quality(&coordinates).await?);
    Ok(())
}

async fn cmd_serve(config: Config) -> Result<()> {
    tracing::info!("Starting MCP weather server");

    let weather = Weather::new(config)?;
    let server = weather.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
