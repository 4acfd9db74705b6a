//! Command-line interface.
//!
//! ```text
//! diaria [--config DIR] [-v] calculate --rank CAP --municipality Uberaba \
//!     --start "2026-12-01 06:00" --end "2026-12-05 18:00" --quinquennia 3
//! diaria serve --addr 0.0.0.0:3000
//! diaria parse-report --file relatorio.txt --calculate
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::api::{AppState, create_router};
use crate::calculation::calculate_diaria;
use crate::config::{ConfigLoader, DiariaConfig};
use crate::models::{
    CalculationEnvelope, DiariaResult, Seniority, TenureBonus, TravelRequest, parse_timestamp,
};
use crate::report::{ParsedReport, parse_report};

/// Per-diem (diária) calculator.
#[derive(Debug, Parser)]
#[command(name = "diaria", version, about = "Per-diem (diária) calculator for CBMMG travel")]
pub struct Cli {
    /// Configuration directory; built-in defaults when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate the per-diem for one trip
    Calculate(CalculateArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Extract the roster and trip legs from a travel report text file
    ParseReport(ParseReportArgs),
}

/// Arguments of `calculate`.
#[derive(Debug, Args)]
pub struct CalculateArgs {
    /// Rank code or name (e.g., CAP, "1° Tenente")
    #[arg(long)]
    pub rank: String,

    /// Destination municipality
    #[arg(long)]
    pub municipality: String,

    /// Departure, YYYY-MM-DD HH:MM
    #[arg(long, value_parser = parse_timestamp)]
    pub start: NaiveDateTime,

    /// Return, YYYY-MM-DD HH:MM
    #[arg(long, value_parser = parse_timestamp)]
    pub end: NaiveDateTime,

    /// Number of quinquennia
    #[arg(long, default_value_t = 0)]
    pub quinquennia: u32,

    /// ADE percentage, replacing the quinquennium count
    #[arg(long)]
    pub ade: Option<Decimal>,

    /// Tenure bonus: none, pre-2007 or post-2007
    #[arg(long, default_value = "none")]
    pub tenure_bonus: TenureBonus,

    /// Destination is outside the home state
    #[arg(long)]
    pub outside_state: bool,

    /// Lodging provided
    #[arg(long)]
    pub lodging: bool,

    /// Incidental allowance; the configured value when omitted
    #[arg(long)]
    pub allowance: Option<Decimal>,

    /// Print the full calculation envelope as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments of `serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub addr: String,
}

/// Arguments of `parse-report`.
#[derive(Debug, Args)]
pub struct ParseReportArgs {
    /// Report text file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Also calculate the per-diem of the member the trip legs belong to
    #[arg(long)]
    pub calculate: bool,
}

/// Loads the configuration directory, or the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ConfigLoader> {
    match path {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("loading configuration from {}", dir.display())),
        None => {
            warn!("No configuration directory given; using built-in defaults with an empty rate table");
            Ok(ConfigLoader::from_config(DiariaConfig::default()))
        }
    }
}

/// Runs a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let loader = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Calculate(args) => {
            let config = loader.config();
            let request = args.to_travel_request(config);
            let result = calculate_diaria(&request, config)?;
            if args.json {
                let envelope = CalculationEnvelope::new(result, config.metadata().version.clone());
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                print!("{}", render_result(&result));
            }
        }
        Command::Serve(args) => {
            let listener = tokio::net::TcpListener::bind(&args.addr)
                .await
                .with_context(|| format!("binding {}", args.addr))?;
            info!(addr = %args.addr, "Listening");
            axum::serve(listener, create_router(AppState::new(loader))).await?;
        }
        Command::ParseReport(args) => {
            let text = fs::read_to_string(&args.file)
                .with_context(|| format!("reading {}", args.file.display()))?;
            let report = parse_report(&text);
            info!(
                roster = report.roster.len(),
                legs = report.trip.legs.len(),
                "Report parsed"
            );
            println!("{}", serde_json::to_string_pretty(&report)?);

            if args.calculate {
                let request = member_request(&report, loader.config())?;
                let result = calculate_diaria(&request, loader.config())?;
                print!("{}", render_result(&result));
            }
        }
    }

    Ok(())
}

impl CalculateArgs {
    /// Builds the domain request, falling back to the configured allowance.
    pub fn to_travel_request(&self, config: &DiariaConfig) -> TravelRequest {
        TravelRequest {
            rank: self.rank.clone(),
            municipality: self.municipality.clone(),
            start: self.start,
            end: self.end,
            seniority: Seniority::from_parts(self.quinquennia, self.ade),
            tenure_bonus: self.tenure_bonus,
            outside_state: self.outside_state,
            lodging: self.lodging,
            incidental_allowance: self
                .allowance
                .unwrap_or_else(|| config.incidental_allowance()),
        }
    }
}

/// Request for the member the trip legs belong to, travelling to the first
/// destination listed on their roster row.
pub fn member_request(report: &ParsedReport, config: &DiariaConfig) -> Result<TravelRequest> {
    let member = report
        .trip_member()
        .ok_or_else(|| anyhow!("no roster row matches the trip's military number"))?;
    let municipality = member
        .destinations
        .first()
        .ok_or_else(|| anyhow!("roster row {} lists no destination", member.sequence))?;
    let (start, end) = report.trip.travel_interval()?;

    Ok(TravelRequest {
        rank: member.rank.clone(),
        municipality: municipality.clone(),
        start,
        end,
        seniority: member.seniority(),
        tenure_bonus: TenureBonus::None,
        outside_state: false,
        lodging: false,
        incidental_allowance: config.incidental_allowance(),
    })
}

/// Plain-text summary of a result.
pub fn render_result(result: &DiariaResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Localidade:        {}\n", result.destination));
    out.push_str(&format!(
        "DI / PA:           {} / {}\n",
        result.full_days, result.half_days
    ));
    out.push_str(&format!(
        "L / M / N:         {} / {} / {}\n",
        result.full_day_units, result.half_day_units, result.lodging_units
    ));
    out.push_str(&format!(
        "G / H:             {} / {}\n",
        result.seniority_factor.normalize(),
        result.tenure_multiplier.normalize()
    ));
    out.push_str(&format!("Valor base:        R$ {}\n", result.base_daily_rate));
    out.push_str(&format!("K:                 R$ {}\n", result.unit_rate));
    out.push_str(&format!("Total:             R$ {}\n", result.total));
    for warning in &result.audit_trace.warnings {
        out.push_str(&format!("[{}] {}\n", warning.code, warning.message));
    }
    out
}
