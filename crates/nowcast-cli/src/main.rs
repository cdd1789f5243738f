mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use nowcast_core::config::ForecastSettings;

use commands::forecast::ForecastArgs;
use commands::future_value::FutureValueArgs;
use commands::scenarios::ScenariosArgs;

/// Multi-scenario portfolio future value forecasts
#[derive(Parser)]
#[command(
    name = "nowcast",
    version,
    about = "Multi-scenario portfolio future value forecasts",
    long_about = "Projects a portfolio's beginning market value and its dated cashflows \
                  to a forecast horizon under downside, base and upside growth rates, \
                  with decimal precision and actual/365 day-count compounding."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON settings file overriding validation limits and scenario names
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a stored portfolio group from a holdings/cashflows data file
    Forecast(ForecastArgs),
    /// Forecast caller-supplied beginning value and cashflows
    Scenarios(ScenariosArgs),
    /// Compound a single amount over a number of days
    FutureValue(FutureValueArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn load_settings(path: Option<&str>) -> Result<ForecastSettings, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ForecastSettings::from_json_file(path)?),
        None => Ok(ForecastSettings::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> =
        load_settings(cli.config.as_deref()).and_then(|settings| match cli.command {
            Commands::Forecast(args) => commands::forecast::run_forecast(args, &settings),
            Commands::Scenarios(args) => commands::scenarios::run_scenarios(args, &settings),
            Commands::FutureValue(args) => commands::future_value::run_future_value(args),
            Commands::Version => {
                println!("nowcast {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
        });

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
