//! Ticketing desk entry point.
//!
//! # Responsibility
//! - Open the store once at startup; a connection failure aborts the launch.
//! - Seed fixtures on first run (or reset with `reset`), then print the
//!   table counts and back-office reports.
//! - Release the store on shutdown.
//! - Reject unknown arguments with a usage line and a failure exit code.

use std::process::ExitCode;
use transit_core::report::{fare_totals, line_usage, zone_usage};
use transit_core::{core_version, init_logging, AppConfig, RepoResult, TicketingSession};

const USAGE: &str = "usage: transit_cli [reset]";

/// Startup action chosen by the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Reset,
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    match args {
        [] => Ok(Command::Run),
        [arg] if arg == "reset" => Ok(Command::Reset),
        [arg] => Err(format!("unknown argument `{arg}`")),
        [_, extra, ..] => Err(format!("unexpected argument `{extra}`")),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut session = match TicketingSession::open(&config.store) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Failed to connect to ticketing database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let reset_requested = config.reset_on_start || command == Command::Reset;
    if let Err(err) = run(&mut session, reset_requested) {
        eprintln!("transit_cli failed: {err}");
        if let Err(close_err) = session.close() {
            eprintln!("failed to close ticketing database: {close_err}");
        }
        return ExitCode::FAILURE;
    }

    match session.close() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("failed to close ticketing database: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(session: &mut TicketingSession, reset_requested: bool) -> RepoResult<()> {
    println!("transit_core version={}", core_version());

    if reset_requested {
        session.reset_fixtures()?;
        println!("fixtures reset");
    } else if session.seed_if_empty()? {
        println!("fixtures seeded");
    }

    let counts = session.table_counts()?;
    println!(
        "companies={} bus_lines={} stations={} buses={} crew={} zones={} passengers={} tickets={}",
        counts.companies,
        counts.bus_lines,
        counts.stations,
        counts.buses,
        counts.crew,
        counts.zones,
        counts.passengers,
        counts.tickets
    );

    let conn = session.connection();

    println!("\nZone usage");
    println!("| Zone ID | Zone Name       | Tickets Sold |");
    for row in zone_usage(conn)? {
        println!(
            "| {:<7} | {:<15} | {:<12} |",
            row.zone_id, row.zone_label, row.tickets_sold
        );
    }

    println!("\nBus line usage");
    println!("| Bus Line ID | Ticket Count |");
    for row in line_usage(conn)? {
        println!("| {:<11} | {:<12} |", row.bus_line_id, row.ticket_count);
    }

    println!("\nFare totals");
    println!("| Ticket Type   | Zone Name       | Total Fare |");
    for row in fare_totals(conn)? {
        println!(
            "| {:<13} | {:<15} | {:<10} |",
            row.ticket_type.as_str(),
            row.zone_label,
            row.total_fare.to_string()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_argument_runs_and_reset_resets() {
        assert_eq!(parse_command(&args(&[])), Ok(Command::Run));
        assert_eq!(parse_command(&args(&["reset"])), Ok(Command::Reset));
    }

    #[test]
    fn unknown_or_extra_arguments_are_rejected() {
        assert_eq!(
            parse_command(&args(&["rest"])),
            Err("unknown argument `rest`".to_string())
        );
        assert_eq!(
            parse_command(&args(&["reset", "now"])),
            Err("unexpected argument `now`".to_string())
        );
    }
}
