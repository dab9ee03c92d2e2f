//! CLI entrypoint for the discoeb conformance harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use discoeb_core::{Complex64, bisect, bisect_checked, lngamma};
use discoeb_harness::exec::Objective;
use discoeb_harness::fixtures::{FixtureSet, discover};
use discoeb_harness::structured_log::{
    ArtifactIndex, LogEntry, LogLevel, validate_log_file,
};
use discoeb_harness::{HarnessError, TestRunner, ToleranceProfile, VerificationSummary};

/// Conformance tooling for discoeb-core.
#[derive(Debug, Parser)]
#[command(name = "discoeb-harness")]
#[command(about = "Fixture-driven conformance harness for discoeb-core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the kernels against fixture files.
    Verify {
        /// Fixture JSON file, or a directory of them.
        #[arg(long)]
        fixture: PathBuf,
        /// Tolerance profile (`strict` or `loose`). Defaults to DISCOEB_TOLERANCE.
        #[arg(long)]
        profile: Option<String>,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// JSON report output path (if omitted, only the summary is printed).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Artifact index output path.
        #[arg(long)]
        artifact_index: Option<PathBuf>,
        /// Campaign name, the first segment of trace ids.
        #[arg(long, default_value = "verify")]
        campaign: String,
        /// Run identifier used in trace ids.
        #[arg(long, default_value = "local")]
        run_id: String,
    },
    /// Evaluate ln Gamma(re + i im).
    Lngamma {
        #[arg(long, allow_hyphen_values = true)]
        re: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        im: f64,
    },
    /// Run the bisection root finder on a named objective.
    Bisect {
        /// `polynomial`, `lngamma_level`, or `cosine`.
        #[arg(long)]
        objective: String,
        #[arg(long, allow_hyphen_values = true)]
        xleft: f64,
        #[arg(long, allow_hyphen_values = true)]
        xright: f64,
        #[arg(long, default_value_t = 52)]
        numit: usize,
        /// Objective parameter as JSON (coefficient array or number).
        #[arg(long, allow_hyphen_values = true)]
        param: String,
        /// Reject intervals that do not bracket a sign change.
        #[arg(long)]
        checked: bool,
    },
    /// Validate a structured JSONL log.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<ExitCode, HarnessError> {
    match command {
        Command::Verify {
            fixture,
            profile,
            log,
            report,
            artifact_index,
            campaign,
            run_id,
        } => verify(
            &fixture,
            TestRunner::new(campaign, ToleranceProfile::resolve(profile.as_deref())),
            log.as_deref(),
            report.as_deref(),
            artifact_index.as_deref(),
            &run_id,
        ),
        Command::Lngamma { re, im } => {
            let w = lngamma(Complex64::new(re, im));
            println!("{}", json!({"re": w.re, "im": w.im}));
            Ok(ExitCode::SUCCESS)
        }
        Command::Bisect {
            objective,
            xleft,
            xright,
            numit,
            param,
            checked,
        } => {
            let param: serde_json::Value = serde_json::from_str(&param)?;
            let objective = match Objective::from_json(&objective, &param) {
                Ok(o) => o,
                Err(err) => {
                    eprintln!("error: {err}");
                    return Ok(ExitCode::from(2));
                }
            };
            if checked {
                match bisect_checked(Objective::evaluate, xleft, xright, numit, &objective) {
                    Ok(x) => println!("{}", json!({"x": x})),
                    Err(err) => {
                        println!("{}", json!({"error": err.code(), "message": err.to_string()}));
                        return Ok(ExitCode::FAILURE);
                    }
                }
            } else {
                let x = bisect(Objective::evaluate, xleft, xright, numit, &objective);
                println!("{}", json!({"x": x}));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            println!(
                "{}",
                json!({"lines": lines, "errors": errors.len(), "valid": errors.is_empty()})
            );
            Ok(if errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn verify(
    fixture: &Path,
    runner: TestRunner,
    log_path: Option<&Path>,
    report_path: Option<&Path>,
    index_path: Option<&Path>,
    run_id: &str,
) -> Result<ExitCode, HarnessError> {
    let files = discover(fixture)?;
    let profile = runner.profile;
    let mut log = match log_path {
        Some(path) => Some(runner.log_to_file(path, run_id)?),
        None => None,
    };

    if let Some(log) = log.as_mut() {
        log.emit_entry(
            LogEntry::new("", LogLevel::Info, "run_start")
                .with_profile(profile.as_str())
                .with_details(json!({"fixture_files": files.len()})),
        )?;
    }

    let mut results = Vec::new();
    for file in &files {
        let set = FixtureSet::from_file(file)?;
        if let Some(log) = log.as_mut() {
            log.emit_entry(
                LogEntry::new("", LogLevel::Debug, "fixture_loaded")
                    .with_family(&set.family)
                    .with_profile(profile.as_str())
                    .with_artifacts(vec![file.display().to_string()])
                    .with_details(json!({"version": set.version, "cases": set.cases.len()})),
            )?;
        }
        let batch = match log.as_mut() {
            Some(log) => runner.run_logged(&set, log)?,
            None => runner.run(&set),
        };
        for r in batch.iter().filter(|r| !r.passed) {
            eprintln!("FAIL {} [{}]", r.case_name, set.family);
            if let Some(diff) = &r.diff {
                eprintln!("{diff}");
            }
        }
        results.extend(batch);
    }
    let summary = VerificationSummary::from_results(results);

    if let Some(log) = log.as_mut() {
        let level = if summary.all_passed() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        log.emit_entry(
            LogEntry::new("", level, "run_end")
                .with_profile(profile.as_str())
                .with_details(json!({
                    "total": summary.total,
                    "passed": summary.passed,
                    "failed": summary.failed,
                })),
        )?;
        log.flush()?;
    }

    if let Some(path) = report_path {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
    }

    if let Some(path) = index_path {
        let mut index = ArtifactIndex::new(run_id);
        for file in &files {
            index.add_file(file, "fixture")?;
        }
        if let Some(path) = log_path {
            index.add_file(path, "log")?;
        }
        if let Some(path) = report_path {
            index.add_file(path, "report")?;
        }
        std::fs::write(path, index.to_json()?)?;
    }

    println!(
        "{}",
        json!({
            "profile": profile.as_str(),
            "total": summary.total,
            "passed": summary.passed,
            "failed": summary.failed,
        })
    );
    Ok(if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
