use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use patient_triage::config::AppConfig;
use patient_triage::error::AppError;
use patient_triage::telemetry;
use patient_triage::workflows::intake::{AssessmentClient, PatientRosterImporter, RetryPolicy};
use patient_triage::workflows::triage::{build_report, RiskConfig, RiskEngine, TriageReport};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "Patient Risk Triage",
    about = "Fetch, score, and report patient risk assessments from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the patient roster, score it, and submit the report (default command)
    Run(RunArgs),
    /// Score a local roster export without touching the network
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Print the report instead of submitting it
    #[arg(long)]
    skip_submit: bool,
    /// Override the configured roster page size
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Patient roster CSV export to score
    #[arg(long)]
    csv: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Command::Run(RunArgs::default()));

    match command {
        Command::Run(args) => run_pipeline(args).await,
        Command::Report(args) => run_roster_report(args),
    }
}

async fn run_pipeline(args: RunArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(page_size) = args.page_size {
        config.api.page_size = page_size;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "patient triage pipeline starting");

    let client = AssessmentClient::new(config.api, RetryPolicy::default())?;
    let patients = client.fetch_all_patients().await?;
    if patients.is_empty() {
        warn!("no patients fetched; nothing to score or submit");
        return Ok(());
    }

    let engine = RiskEngine::new(RiskConfig::default());
    let report = build_report(&engine, &patients);
    let summary = report.summary();
    info!(
        patients = patients.len(),
        high_risk = summary.high_risk,
        fever = summary.fever,
        data_quality = summary.data_quality,
        "scored patient roster"
    );

    if args.skip_submit {
        print_report(&report)?;
        return Ok(());
    }

    let acknowledgement = client.submit_report(&report).await?;
    info!(%acknowledgement, "assessment service acknowledged submission");
    Ok(())
}

fn run_roster_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let patients = PatientRosterImporter::from_path(&args.csv)?;
    let engine = RiskEngine::new(RiskConfig::default());
    let report = build_report(&engine, &patients);
    info!(patients = patients.len(), "scored roster export");

    print_report(&report)
}

fn print_report(report: &TriageReport) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
