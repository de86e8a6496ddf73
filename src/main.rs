//! Capital Budgeting CLI
//!
//! Evaluate a single project, compare two projects, or run a CSV batch.
//! Engine constants can be tuned through `CB_*` environment variables.

use anyhow::{Context, Result};
use capital_budgeting::cashflow::load_projects;
use capital_budgeting::{
    parse_cashflows, ComparisonRequest, EngineConfig, EvaluationReport, EvaluationRequest,
    Evaluator, ProjectInput,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "capital_budgeting")]
#[command(about = "NPV, IRR and ARR investment appraisal")]
struct Args {
    /// Emit JSON instead of a human-readable summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one project
    Evaluate {
        /// Up-front investment (positive amount)
        #[arg(long, allow_hyphen_values = true)]
        initial_cost: f64,

        /// Comma-separated yearly cash flows, e.g. "300,300,300"
        #[arg(long, allow_hyphen_values = true)]
        cashflows: String,

        /// Target rate as a fraction, e.g. 0.08
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,

        /// Holding period in years (informational)
        #[arg(long)]
        years: Option<u32>,
    },
    /// Compare two projects at the same target rate
    Compare {
        #[arg(long, allow_hyphen_values = true)]
        initial_cost_a: f64,

        #[arg(long, allow_hyphen_values = true)]
        cashflows_a: String,

        #[arg(long, allow_hyphen_values = true)]
        initial_cost_b: f64,

        #[arg(long, allow_hyphen_values = true)]
        cashflows_b: String,

        #[arg(long, allow_hyphen_values = true)]
        rate: f64,
    },
    /// Evaluate every project in a CSV file
    Batch {
        /// CSV with columns ProjectID,InitialCost,Cashflows,TargetRate,Years
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct BatchEntry {
    project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<EvaluationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let evaluator = Evaluator::with_config(EngineConfig::from_env());

    match args.command {
        Command::Evaluate { initial_cost, cashflows, rate, years } => {
            let request = EvaluationRequest {
                initial_cost,
                cashflows: parse_cashflows(&cashflows).context("invalid --cashflows")?,
                target_rate: rate,
                holding_period_years: years,
            };
            let report = evaluator.evaluate(&request)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report("Project", &report);
            }
        }
        Command::Compare { initial_cost_a, cashflows_a, initial_cost_b, cashflows_b, rate } => {
            let request = ComparisonRequest {
                project_a: ProjectInput {
                    label: None,
                    initial_cost: initial_cost_a,
                    cashflows: parse_cashflows(&cashflows_a).context("invalid --cashflows-a")?,
                    holding_period_years: None,
                },
                project_b: ProjectInput {
                    label: None,
                    initial_cost: initial_cost_b,
                    cashflows: parse_cashflows(&cashflows_b).context("invalid --cashflows-b")?,
                    holding_period_years: None,
                },
                target_rate: rate,
            };
            let report = evaluator.compare(&request)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report("Project A", &report.project_a);
                print_report("Project B", &report.project_b);
                println!("\n{}", report.comparison);
            }
        }
        Command::Batch { file } => {
            let start = Instant::now();
            let projects = load_projects(&file)
                .with_context(|| format!("failed to load projects from {}", file.display()))?;

            let requests: Vec<EvaluationRequest> =
                projects.iter().map(|p| p.request.clone()).collect();
            let results = evaluator.evaluate_batch(&requests);

            let entries: Vec<BatchEntry> = projects
                .into_iter()
                .zip(results)
                .map(|(project, result)| match result {
                    Ok(report) => BatchEntry {
                        project_id: project.project_id,
                        report: Some(report),
                        error: None,
                    },
                    Err(e) => BatchEntry {
                        project_id: project.project_id,
                        report: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect();

            if args.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{:<16} {:>12} {:>9} {:>9}  {}", "Project", "NPV", "IRR %", "ARR %", "Decision");
                println!("{}", "-".repeat(70));
                for entry in &entries {
                    match (&entry.report, &entry.error) {
                        (Some(r), _) => println!(
                            "{:<16} {:>12.2} {:>9} {:>9.2}  {}",
                            entry.project_id,
                            r.npv,
                            r.irr_pct.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "n/a".into()),
                            r.arr_pct,
                            r.decision_label,
                        ),
                        (None, Some(e)) => println!("{:<16} error: {}", entry.project_id, e),
                        (None, None) => {}
                    }
                }
                println!("\n{} projects in {:?}", entries.len(), start.elapsed());
            }
        }
    }

    Ok(())
}

fn print_report(title: &str, report: &EvaluationReport) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!("  NPV:      {:.2}", report.npv);
    match report.irr_pct {
        Some(irr) => println!("  IRR:      {:.2}%", irr),
        None => println!("  IRR:      undefined"),
    }
    println!("  ARR:      {:.2}%", report.arr_pct);
    println!("  Target:   {:.2}%", report.target_rate * 100.0);
    println!("  Decision: {}", report.decision_label);
    println!("\nRecommendations:");
    for rec in &report.recommendations {
        println!("  - {}", rec);
    }
    println!();
}
