//! Cohort CLI - Command-line interface for Synheart Cohort
//!
//! Commands:
//! - generate: Produce a synthetic dataset and write it as JSON
//! - verify: Check an existing dataset against the generator invariants
//! - personas: List the builtin persona profiles

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use synheart_cohort::assembler::{DatasetAssembler, DEFAULT_SEED, GENERATION_METHOD};
use synheart_cohort::profile::builtin_profiles;
use synheart_cohort::risk::RiskCurve;
use synheart_cohort::simulator::DEFAULT_N_DAYS;
use synheart_cohort::types::Dataset;
use synheart_cohort::verify::verify_dataset;
use synheart_cohort::{GenError, COHORT_VERSION};

/// Cohort - deterministic synthetic recovery-cohort data generator
#[derive(Parser)]
#[command(name = "cohort")]
#[command(author = "Synheart AI Inc")]
#[command(version = COHORT_VERSION)]
#[command(about = "Generate and verify synthetic patient-monitoring datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce a synthetic dataset and write it as JSON
    Generate {
        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Global random seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// First simulated calendar date (YYYY-MM-DD)
        #[arg(long, default_value = "2024-01-01")]
        start_date: String,

        /// Number of simulated days per persona
        #[arg(long, default_value_t = DEFAULT_N_DAYS)]
        days: u32,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Check an existing dataset against the generator invariants
    Verify {
        /// Input dataset path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the builtin persona profiles
    Personas,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            output,
            seed,
            start_date,
            days,
            pretty,
        } => cmd_generate(&output, seed, &start_date, days, pretty),
        Commands::Verify { input, json } => cmd_verify(&input, json),
        Commands::Personas => cmd_personas(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_generate(
    output: &PathBuf,
    seed: u64,
    start_date: &str,
    days: u32,
    pretty: bool,
) -> Result<ExitCode, GenError> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
        .map_err(|e| GenError::DateParseError(format!("{start_date}: {e}")))?;

    eprintln!("Generating {days} days for 4 personas (seed {seed})...");
    let dataset = DatasetAssembler::new()
        .with_seed(seed)
        .with_start_date(start)
        .with_days(days)
        .assemble()?;

    let json = if pretty {
        dataset.to_json_pretty()?
    } else {
        dataset.to_json()?
    };
    write_output(output, &json)?;

    for (id, set) in &dataset.personas {
        eprintln!(
            "  {id}: {} days, {} diary entries, {} chats, {} relapses",
            set.sobriety.len(),
            set.mood_diary.len(),
            set.chat.len(),
            set.sobriety.iter().filter(|s| s.relapse_occurred).count()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(input: &PathBuf, json_report: bool) -> Result<ExitCode, GenError> {
    let raw = read_input(input)?;
    let dataset = Dataset::from_json(&raw)?;

    // Older datasets used the steeper legacy curve; pick by method tag
    let curve = if dataset.generation_info.generation_method == GENERATION_METHOD {
        RiskCurve::REALISTIC
    } else {
        RiskCurve::LEGACY
    };

    let report = verify_dataset(&dataset, &curve);

    if json_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for check in &report.checks {
            println!(
                "{}: {} days, {} relapses, max overlay residual {:.3}",
                check.persona_id, check.days, check.relapse_count, check.max_overlay_residual
            );
            for issue in &check.issues {
                println!("  ISSUE: {issue}");
            }
        }
    }

    if report.is_ok() {
        eprintln!("OK: all invariants hold");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("FAILED: {} issue(s) found", report.issue_count());
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_personas() -> Result<ExitCode, GenError> {
    for profile in builtin_profiles() {
        println!(
            "{} ({}) - {}: starts at {} sober days, episodes: {}",
            profile.id,
            profile.name,
            profile.persona_type,
            profile.initial_sober_days,
            profile.episode.as_str(),
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn read_input(path: &PathBuf) -> Result<String, GenError> {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::Read::read_to_string(&mut io::stdin(), &mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn write_output(path: &PathBuf, content: &str) -> Result<(), GenError> {
    if path.to_str() == Some("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    } else {
        Ok(fs::write(path, content)?)
    }
}
