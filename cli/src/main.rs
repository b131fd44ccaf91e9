//! Triage CLI
//!
//! Runs a consultation for a profile file, a bulk risk simulation, or the
//! reference scenarios.
//!
//! Usage:
//!   triage assess --profile patient.json [--continue-anyway] [--json]
//!   triage simulate [--count 50] [--seed 7] [--json]
//!   triage scenarios [--json]
//!
//! Exit status: 0 on success, 2 when the emergency gate fired and the run
//! was not continued, 1 on any error or a failing reference scenario.

mod config;
mod render;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triage_contracts::{
    error::{TriageError, TriageResult},
    report::{Acknowledgement, ConsultationOutcome},
};
use triage_intake::ProfileValidator;
use triage_rules::WeightedRiskScorer;
use triage_simulator::{run_diagnostic_simulation, run_reference_scenarios, RandomProfileGenerator};

use crate::config::TriageConfig;

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_ESCALATION: i32 = 2;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Rule-based clinical triage.
#[derive(Parser)]
#[command(
    name = "triage",
    about = "Rule-based clinical triage engine",
    long_about = "Screens a patient profile for emergencies, scores risk, and produces\n\
                  candidate conditions, tests, treatment, referrals and follow-up."
)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a consultation for a JSON profile.
    Assess(AssessArgs),
    /// Score random profiles and report the band distribution.
    Simulate(SimulateArgs),
    /// Run the four reference scenarios.
    Scenarios {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct AssessArgs {
    /// Path to the profile JSON.
    #[arg(long)]
    profile: PathBuf,
    /// Continue past an emergency warning.
    #[arg(long)]
    continue_anyway: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // RUST_LOG=debug shows every rule hit.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("triage error: {}", e);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> TriageResult<i32> {
    let config = TriageConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Assess(args) => assess(&config, &args),
        Command::Simulate(args) => simulate(&config, &args),
        Command::Scenarios { json } => scenarios(&config, json),
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn assess(config: &TriageConfig, args: &AssessArgs) -> TriageResult<i32> {
    let payload = read_payload(&args.profile, config)?;
    let profile = ProfileValidator::new()?.parse(&payload)?;

    let consultation = triage_rules::engine(config.knowledge_base()?);
    let acknowledgement = if args.continue_anyway {
        Acknowledgement::ContinueAnyway
    } else {
        Acknowledgement::None
    };

    match consultation.run(&profile, acknowledgement)? {
        ConsultationOutcome::EscalationRequired { consultation_id, reasons } => {
            if args.json {
                let body = serde_json::json!({
                    "status": "escalation_required",
                    "consultation_id": consultation_id.0.to_string(),
                    "reasons": reasons,
                });
                println!("{}", to_json(&body)?);
            } else {
                println!("{}", render::render_escalation(&reasons));
            }
            Ok(EXIT_ESCALATION)
        }
        ConsultationOutcome::Complete(report) => {
            if args.json {
                println!("{}", to_json(&report)?);
            } else {
                println!("{}", render::render_report(&report));
            }
            Ok(EXIT_OK)
        }
    }
}

fn simulate(config: &TriageConfig, args: &SimulateArgs) -> TriageResult<i32> {
    let count = args.count.unwrap_or(config.simulation.count);
    let seed = args.seed.or(config.simulation.seed);
    info!(count, seed = ?seed, "starting simulation");

    let kb = config.knowledge_base()?;
    let mut source = RandomProfileGenerator::new(&kb, seed);
    let scorer = WeightedRiskScorer::new(kb);
    let summary = run_diagnostic_simulation(count, &mut source, &scorer);

    if args.json {
        println!("{}", to_json(&summary)?);
    } else {
        println!("{}", render::render_simulation(&summary));
    }
    Ok(EXIT_OK)
}

fn scenarios(config: &TriageConfig, json: bool) -> TriageResult<i32> {
    let consultation = triage_rules::engine(config.knowledge_base()?);
    let results = run_reference_scenarios(&consultation)?;

    if json {
        println!("{}", to_json(&results)?);
    } else {
        println!("{}", render::render_scenarios(&results));
    }

    if results.iter().all(|r| r.passed()) {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_FAILURE)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Read the profile JSON and apply the configured locale when it has none.
fn read_payload(path: &Path, config: &TriageConfig) -> TriageResult<Value> {
    let raw = std::fs::read_to_string(path).map_err(|e| TriageError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let mut payload: Value = serde_json::from_str(&raw).map_err(|e| TriageError::Serialization {
        reason: format!("profile is not valid JSON: {e}"),
    })?;

    if let Value::Object(fields) = &mut payload {
        if !fields.contains_key("locale") {
            let locale = serde_json::to_value(config.locale).map_err(|e| {
                TriageError::Serialization {
                    reason: e.to_string(),
                }
            })?;
            fields.insert("locale".to_string(), locale);
        }
    }
    Ok(payload)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> TriageResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| TriageError::Serialization {
        reason: format!("failed to encode output: {e}"),
    })
}
