//! `availability` CLI — query bookable times from a schedule snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable 30-minute slots on a date (schedule from a file)
//! availability slots --date 2025-12-24 -i schedule.json
//!
//! # Hour-long slots, pinning "now" for reproducible same-day truncation
//! availability slots --date 2025-12-24 --slot-minutes 60 --now 2025-12-24T10:15 -i schedule.json
//!
//! # Derive "now" from an IANA timezone instead of the system clock
//! cat schedule.json | availability --tz America/Chicago slots --date 2025-12-24
//!
//! # Which holiday rule applies to a date
//! availability holiday --date 2025-12-31 -i schedule.json
//!
//! # Check a booking request without storing it
//! availability book --request request.json -i schedule.json
//! ```
//!
//! Results are written to stdout as pretty-printed JSON; logs go to stderr.

use anyhow::{Context, Result};
use availability_engine::{
    check_booking, holiday_info, resolve_availability, BookingRequest, Schedule, SlotMinutes,
};
use chrono::{Local, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Appointment availability over special days, holidays and business hours"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule snapshot JSON (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Local wall-clock "now" as YYYY-MM-DDTHH:MM[:SS]
    #[arg(long, global = true)]
    now: Option<String>,

    /// IANA timezone used to derive "now" when --now is absent
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Log level for stderr output (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable start times for a date
    Slots {
        /// Date to query, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Slot size in minutes (clamped to the configured minimum)
        #[arg(long)]
        slot_minutes: Option<String>,
    },
    /// Show the holiday rule that applies to a date
    Holiday {
        /// Date to query, YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    /// Validate a booking request against the schedule
    Book {
        /// Booking request JSON file
        #[arg(long)]
        request: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let schedule_json = read_input(cli.input.as_deref())?;
    let schedule = Schedule::from_json(&schedule_json).context("Failed to parse schedule snapshot")?;
    tracing::debug!(
        special_days = schedule.special_days.len(),
        holidays = schedule.holidays.len(),
        business_hours = schedule.business_hours.len(),
        appointments = schedule.appointments.len(),
        "loaded schedule"
    );

    let body = match cli.command {
        Commands::Slots { date, slot_minutes } => {
            let now = resolve_now(cli.now.as_deref(), cli.tz.as_deref())?;
            let slot = SlotMinutes::parse(slot_minutes.as_deref(), &schedule.config)?;
            let result = resolve_availability(&date, slot, now, &schedule)
                .with_context(|| format!("Failed to resolve availability for {}", date))?;
            serde_json::to_value(&result)?
        }
        Commands::Holiday { date } => match holiday_info(&date, &schedule)? {
            Some(info) => {
                let mut value = serde_json::to_value(&info)?;
                value["exists"] = json!(true);
                value
            }
            None => json!({ "exists": false }),
        },
        Commands::Book { request } => {
            let now = resolve_now(cli.now.as_deref(), cli.tz.as_deref())?;
            let raw = std::fs::read_to_string(&request)
                .with_context(|| format!("Failed to read file: {}", request))?;
            let request: BookingRequest =
                serde_json::from_str(&raw).context("Failed to parse booking request")?;
            let admitted = check_booking(&request, now, &schedule, &schedule.config)?;
            serde_json::to_value(&admitted)?
        }
    };

    let pretty = serde_json::to_string_pretty(&body)?;
    write_output(cli.output.as_deref(), &pretty)?;
    Ok(())
}

/// Install a stderr subscriber so stdout stays machine-readable.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("availability_engine={},availability={}", level, level))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Pick the local wall-clock "now".
///
/// - `--now` wins and is taken verbatim as local time
/// - otherwise `--tz` converts the current UTC instant into that zone
/// - otherwise the system's local time is used
fn resolve_now(now: Option<&str>, tz: Option<&str>) -> Result<NaiveDateTime> {
    if let Some(raw) = now {
        return NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .with_context(|| format!("Invalid --now value: '{}'", raw));
    }

    match tz {
        Some(name) => {
            let zone: chrono_tz::Tz = name
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", name))?;
            Ok(Utc::now().with_timezone(&zone).naive_local())
        }
        None => Ok(Local::now().naive_local()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
