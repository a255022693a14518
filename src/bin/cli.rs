//! ambimon CLI Client
//!
//! Sends one request to an ambient monitor behind a serial-over-TCP bridge.

use std::time::Duration;

use ambimon::transport::TcpTransport;
use ambimon::{AmbientClient, Config};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// ambimon CLI
#[derive(Parser, Debug)]
#[command(name = "ambimon-cli")]
#[command(about = "Query an ambient monitor over a serial-over-TCP bridge")]
#[command(version)]
struct Args {
    /// Bridge address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:4001")]
    addr: String,

    /// Poll interval while waiting for a reply (milliseconds)
    #[arg(short, long, default_value = "10")]
    poll_ms: u64,

    /// Reply timeout in milliseconds, 0 waits indefinitely
    #[arg(short, long, default_value = "500")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Current temperature
    Temperature,

    /// Temperature extremes since the last reset
    TemperatureExtremes,

    /// Current humidity
    Humidity,

    /// Humidity extremes since the last reset
    HumidityExtremes,

    /// Reset the temperature extremes
    ResetTemperature,

    /// Reset the humidity extremes
    ResetHumidity,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ambimon=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let timeout = (args.timeout_ms > 0).then(|| Duration::from_millis(args.timeout_ms));
    let config = Config::builder()
        .bridge_addr(&args.addr)
        .poll_interval(Duration::from_millis(args.poll_ms))
        .timeout(timeout)
        .build();

    if let Err(e) = run(&config, &args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, command: &Commands) -> ambimon::Result<()> {
    config.validate()?;

    tracing::info!("ambimon v{} connecting to {}", ambimon::VERSION, config.bridge_addr);
    let transport = TcpTransport::connect(&config.bridge_addr, config.timeout)?;
    let mut client = AmbientClient::with_config(transport, config)?;

    match command {
        Commands::Temperature => println!("{}", client.get_temperature()?),
        Commands::TemperatureExtremes => {
            let (low, high) = client.get_temperature_extremes()?;
            println!("{} {}", low, high);
        }
        Commands::Humidity => println!("{}", client.get_humidity()?),
        Commands::HumidityExtremes => {
            let (low, high) = client.get_humidity_extremes()?;
            println!("{} {}", low, high);
        }
        Commands::ResetTemperature => {
            client.reset_temperature()?;
            println!("OK");
        }
        Commands::ResetHumidity => {
            client.reset_humidity()?;
            println!("OK");
        }
    }

    Ok(())
}
