use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use sustainearth::emissions::AVERAGE_FOOTPRINT_KG;
use sustainearth::models::{
    AqiResult, Diet, EmissionsInput, EmissionsResult, EnergySource, HomeSize, ShoppingHabit,
    VehicleType,
};
use sustainearth::{AqiClient, AqiSource, SustainEarthConfig, SustainEarthError, logging, web};

/// SustainEarth: carbon footprint calculator and air quality tracker
#[derive(Parser, Debug)]
#[command(name = "sustainearth", version)]
#[command(about = "SustainEarth carbon footprint calculator and air quality tracker")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate an annual carbon footprint
    Footprint(FootprintArgs),
    /// Look up the air quality for a location
    Aqi {
        /// City or location name
        #[arg(short, long)]
        location: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the JSON API server
    Serve {
        /// Port to listen on (overrides the configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Flags override the values read from `--input`, which in turn default to
/// the calculator form's initial values.
#[derive(Args, Debug)]
struct FootprintArgs {
    /// JSON file holding a complete calculator input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// gasoline, hybrid or electric
    #[arg(long)]
    vehicle: Option<VehicleType>,
    /// Miles driven per year
    #[arg(long, allow_negative_numbers = true)]
    miles: Option<f64>,
    /// Public transit miles per year
    #[arg(long, allow_negative_numbers = true)]
    transit_miles: Option<f64>,
    /// Flights under 3 hours per year
    #[arg(long)]
    short_flights: Option<u32>,
    /// Flights of 3 to 6 hours per year
    #[arg(long)]
    medium_flights: Option<u32>,
    /// Flights over 6 hours per year
    #[arg(long)]
    long_flights: Option<u32>,

    /// grid, mixed or renewable
    #[arg(long)]
    energy_source: Option<EnergySource>,
    /// small, medium or large
    #[arg(long)]
    home_size: Option<HomeSize>,
    /// People in the household
    #[arg(long)]
    occupants: Option<u32>,
    /// Monthly electricity use in kWh
    #[arg(long, allow_negative_numbers = true)]
    electricity_kwh: Option<f64>,
    /// Monthly gas use in therms
    #[arg(long, allow_negative_numbers = true)]
    gas_therms: Option<f64>,

    /// vegan, vegetarian, pescatarian or omnivore
    #[arg(long)]
    diet: Option<Diet>,
    /// minimal, average or frequent
    #[arg(long)]
    shopping: Option<ShoppingHabit>,
    /// Share of waste recycled, 0-100
    #[arg(long, allow_negative_numbers = true)]
    recycling: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl FootprintArgs {
    fn to_input(&self) -> Result<EmissionsInput> {
        let mut input = match &self.input {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(SustainEarthError::from)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&text).map_err(|e| {
                    SustainEarthError::validation(format!(
                        "Invalid calculator input in {}: {e}",
                        path.display()
                    ))
                })?
            }
            None => EmissionsInput::default(),
        };

        let transportation = &mut input.transportation;
        override_with(&mut transportation.vehicle_type, self.vehicle);
        override_with(&mut transportation.miles_driven, self.miles);
        override_with(&mut transportation.public_transit_miles, self.transit_miles);
        override_with(&mut transportation.flights.short, self.short_flights);
        override_with(&mut transportation.flights.medium, self.medium_flights);
        override_with(&mut transportation.flights.long, self.long_flights);

        let home = &mut input.home;
        override_with(&mut home.energy_source, self.energy_source);
        override_with(&mut home.home_size, self.home_size);
        override_with(&mut home.occupants, self.occupants);
        override_with(&mut home.monthly_electricity_kwh, self.electricity_kwh);
        override_with(&mut home.monthly_gas_therms, self.gas_therms);

        let lifestyle = &mut input.lifestyle;
        override_with(&mut lifestyle.diet, self.diet);
        override_with(&mut lifestyle.shopping, self.shopping);
        override_with(&mut lifestyle.recycling_percent, self.recycling);

        Ok(input)
    }
}

fn override_with<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = e
                .downcast_ref::<SustainEarthError>()
                .map_or_else(|| format!("{e:#}"), SustainEarthError::user_message);
            debug!("Command failed: {:?}", e);
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        verbose,
        command,
    } = cli;
    let config = SustainEarthConfig::load_from_path(config_path.clone())?;
    logging::init(&config.logging, verbose);

    match command {
        None => {
            print_overview(config_path, verbose, &config);
            Ok(())
        }
        Some(Command::Footprint(args)) => {
            let input = args.to_input()?;
            let result = sustainearth::estimate(&input);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_footprint(&result);
            }
            Ok(())
        }
        Some(Command::Aqi { location, json }) => {
            let client = AqiClient::new(&config.aqi)?;
            let result = client.fetch(&location).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_aqi(&result);
            }
            Ok(())
        }
        Some(Command::Serve { port }) => {
            let mut server = config.server.clone();
            override_with(&mut server.port, port);
            let client = Arc::new(AqiClient::new(&config.aqi)?);
            let request_timeout = Duration::from_secs(u64::from(config.aqi.timeout_seconds) + 5);
            web::run(&server, client, request_timeout).await
        }
    }
}

fn print_overview(config_path: Option<PathBuf>, verbose: bool, config: &SustainEarthConfig) {
    println!("SustainEarth v{}", sustainearth::VERSION);
    println!("Carbon footprint calculator and air quality tracker.");
    println!();
    println!("  sustainearth footprint [--vehicle electric --miles 8000 ...]");
    println!("  sustainearth aqi --location <city>");
    println!("  sustainearth serve [--port 8080]");
    println!();
    println!("Run with --help for every option.");

    if verbose {
        let source = config_path
            .or_else(SustainEarthConfig::get_config_path)
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
        println!();
        println!("Using config from: {source}");
        println!("AQI endpoint: {}", config.aqi.base_url);
        println!("Log level: {}", config.logging.level);
    }
}

fn print_footprint(result: &EmissionsResult) {
    let b = &result.breakdown;
    println!("Your estimated carbon footprint: {} kg CO2e/year", result.total_kg_co2e);
    println!();
    println!("  Vehicle:        {:>10.0} kg", b.vehicle);
    println!("  Public transit: {:>10.0} kg", b.transit);
    println!("  Flights:        {:>10.0} kg", b.flights);
    println!("  Home energy:    {:>10.0} kg", b.home);
    println!("  Lifestyle:      {:>10.0} kg", b.lifestyle);
    println!();
    println!(
        "The average person produces about {AVERAGE_FOOTPRINT_KG} kg CO2e per year."
    );
    println!("{}", result.assessment.message());
}

fn print_aqi(result: &AqiResult) {
    let reading = &result.reading;
    println!("Air Quality in {}", reading.location);
    println!("AQI: {:.0} ({})", reading.aqi, result.category);
    println!("{}", result.advisory);
    println!();
    for (label, value) in reading.pollutants.display_rows() {
        println!("  {:<6} {value}", format!("{label}:"));
    }
}
