use std::{
    error::Error,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::Utility;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "contatore")]
#[command(about = "Metering and billing queries over a CSV of meter readings")]
struct Cli {
    /// CSV file with `date,value` reading rows (ISO dates).
    #[arg(long, env = "CONTATORE_READINGS")]
    readings: PathBuf,

    /// Unit of measure reported by the meter.
    #[arg(long, default_value = "m3")]
    unit: String,

    /// Print results as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Log filter (tracing env-filter syntax).
    #[arg(long, env = "CONTATORE_LOG", default_value = "contatore=info,engine=info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the recorded readings in date order.
    Readings,
    /// Show the most recent recorded reading.
    Latest,
    /// Estimate the reading at a date between two recorded ones.
    Estimate(EstimateArgs),
    /// Consumption between two dates.
    Consumption(ConsumptionArgs),
    /// Month-by-month consumption breakdown.
    Breakdown(BreakdownArgs),
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// Target date (YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,
}

#[derive(Args, Debug)]
struct ConsumptionArgs {
    /// Start date (YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,
    /// End date (YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Args, Debug)]
struct BreakdownArgs {
    /// First month of the range (1-12).
    #[arg(long)]
    start_month: u32,
    /// Last month of the range, inclusive (1-12).
    #[arg(long)]
    end_month: u32,
    /// Reference year.
    #[arg(long)]
    year: i32,
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    date: NaiveDate,
    value: f64,
}

/// Bootstraps a one-contract registry and feeds it the CSV readings.
fn load_utility(
    path: &Path,
    unit: &str,
) -> Result<(Utility, String), Box<dyn Error + Send + Sync>> {
    let mut utility = Utility::new();

    let sp_id =
        utility.define_service_point("Torino", "Corso Duca degli Abruzzi 24", 45.0623, 7.6627);
    let meter_id = utility.add_meter("SN-0001", "Iskra", "MT174", unit);
    utility.install_meter(&sp_id, &meter_id)?;
    let user_id = utility.add_residential_user(
        "RSSMRA80A01L219X",
        "Mario",
        "Rossi",
        "Via Roma 1, Torino",
        "mario.rossi@example.com",
    );
    let contract_id = utility.sign_contract(&user_id, &sp_id)?;

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = 0usize;
    for row in reader.deserialize() {
        let row: ReadingRow = row?;
        utility.record_reading(&contract_id, &meter_id, row.date, row.value)?;
        rows += 1;
    }
    tracing::info!(rows, contract_id = %contract_id, "readings loaded");

    Ok((utility, contract_id))
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log.clone())
        .init();

    let (utility, contract_id) = load_utility(&cli.readings, &cli.unit)?;

    match cli.command {
        Command::Readings => {
            if cli.json {
                match utility.reading_series(&contract_id) {
                    Some(series) => println!("{}", serde_json::to_string_pretty(series)?),
                    None => println!("{{}}"),
                }
            } else {
                for (date, value) in utility.readings(&contract_id) {
                    println!("{date} {value} {}", cli.unit);
                }
            }
        }
        Command::Latest => match utility.latest_reading(&contract_id) {
            Some(value) if cli.json => {
                println!("{}", serde_json::json!({ "value": value, "unit": cli.unit }))
            }
            Some(value) => println!("{value} {}", cli.unit),
            None => {
                eprintln!("no readings recorded");
                std::process::exit(1);
            }
        },
        Command::Estimate(args) => match utility.estimated_reading(&contract_id, args.date) {
            Ok(value) if cli.json => println!(
                "{}",
                serde_json::json!({ "date": args.date, "value": value, "unit": cli.unit })
            ),
            Ok(value) => println!("{value:.2} {}", cli.unit),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        Command::Consumption(args) => {
            match utility.consumption(&contract_id, args.from, args.to) {
                Ok(value) if cli.json => println!(
                    "{}",
                    serde_json::json!({
                        "from": args.from,
                        "to": args.to,
                        "consumption": value,
                        "unit": cli.unit,
                    })
                ),
                Ok(value) => println!("{value:.2} {}", cli.unit),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
        Command::Breakdown(args) => {
            match utility.bill_breakdown(&contract_id, args.start_month, args.end_month, args.year)
            {
                Ok(breakdown) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&breakdown)?)
                }
                Ok(breakdown) => {
                    for bill in &breakdown {
                        println!("{bill}");
                    }
                }
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
