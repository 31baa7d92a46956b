//! One-shot homework status check.
//!
//! Queries the review API once and prints the latest status without
//! sending anything to Telegram. Handy for verifying the API token.

use std::process::ExitCode;

use clap::Parser;

use homework_status_bot::config::{PRACTICUM_TOKEN_VAR, PollerSettings};
use homework_status_bot::practicum::{
    HomeworkApi, PracticumClient, check_response, current_date, parse_status,
};
use homework_status_bot::scheduler::format_timestamp;

/// Homework review status checker.
#[derive(Parser, Debug)]
#[command(name = "check_homework")]
#[command(about = "Prints the latest homework review status without notifying Telegram")]
#[command(version)]
struct Args {
    /// Unix timestamp to request changes from.
    #[arg(long, default_value_t = 0)]
    from_date: i64,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Show the reviewer comment and server date as well.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Missing .env is fine, variables may come from the shell
    let _ = dotenvy::from_filename(&args.env_file);

    let Some(token) = std::env::var(PRACTICUM_TOKEN_VAR)
        .ok()
        .filter(|t| !t.trim().is_empty())
    else {
        eprintln!("✗ {PRACTICUM_TOKEN_VAR} is not set");
        return ExitCode::FAILURE;
    };

    let settings = PollerSettings::from_env_with_defaults();
    let client = match PracticumClient::new(&settings.endpoint, &token, settings.http_timeout()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    check(&client, args.from_date, args.verbose).await
}

async fn check(client: &PracticumClient, from_date: i64, verbose: bool) -> ExitCode {
    println!(
        "Checking {} since {}",
        client.endpoint(),
        format_timestamp(from_date)
    );

    let response = match client.fetch_statuses(from_date).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    if verbose && let Some(date) = current_date(&response) {
        println!("Server date: {}", format_timestamp(date));
    }

    let homework = match check_response(&response) {
        Ok(Some(homework)) => homework,
        Ok(None) => {
            println!("✓ No status changes since {}", format_timestamp(from_date));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    match parse_status(&homework) {
        Ok(message) => {
            println!("✓ {message}");
            if verbose {
                for (label, text) in homework.details() {
                    println!("  {label}: {text}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {e}");
            ExitCode::FAILURE
        }
    }
}
