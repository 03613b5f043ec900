use anyhow::{bail, Context, Result};
use chrono::Utc;
use metersync::{
    AppConfig, AppContext, ElectricianId, ReconcileOutcome, UploadOutcome, UploadReport,
};
use std::env;
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
struct CliOptions {
    owner: String,
    pretty: bool,
    database_url: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct PassReport {
    generated_at_ms: i64,
    owner: String,
    status_outcome: &'static str,
    corrections: Option<u32>,
    upload_outcome: &'static str,
    upload: Option<UploadReport>,
}

fn usage() -> &'static str {
    "Usage: sync_pass --owner <electrician-id> [--database-url <url>] [--base-url <url>] [--pretty]"
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(args.into_iter())?;

    metersync::init_logging();

    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let report = rt.block_on(run_pass(&options))?;

    let payload = to_json(&report, options.pretty)?;
    println!("{payload}");
    Ok(())
}

/// One reconcile pass followed by one upload pass, reported as JSON.
async fn run_pass(options: &CliOptions) -> Result<PassReport> {
    let owner =
        ElectricianId::new(options.owner.clone()).map_err(|message| anyhow::anyhow!(message))?;

    let mut config = AppConfig::from_env();
    if let Some(url) = &options.database_url {
        config.database.url = url.clone();
    }
    if let Some(url) = &options.base_url {
        config.remote.base_url = url.trim_end_matches('/').to_string();
    }

    let context = AppContext::new(config).await?;

    let status = context.sync.start_status_sync(&owner).await;
    let upload = context.sync.start_sync().await;

    context.shutdown().await;

    let corrections = match &status {
        ReconcileOutcome::Completed { corrections } => Some(*corrections),
        _ => None,
    };
    let upload_report = match &upload {
        UploadOutcome::Completed(report) => Some(report.clone()),
        _ => None,
    };

    Ok(PassReport {
        generated_at_ms: Utc::now().timestamp_millis(),
        owner: owner.into(),
        status_outcome: status_outcome_name(&status),
        corrections,
        upload_outcome: upload_outcome_name(&upload),
        upload: upload_report,
    })
}

fn status_outcome_name(outcome: &ReconcileOutcome) -> &'static str {
    match outcome {
        ReconcileOutcome::AlreadyRunning => "already_running",
        ReconcileOutcome::Completed { .. } => "completed",
        ReconcileOutcome::Failed => "failed",
    }
}

fn upload_outcome_name(outcome: &UploadOutcome) -> &'static str {
    match outcome {
        UploadOutcome::AlreadyRunning => "already_running",
        UploadOutcome::NothingPending => "nothing_pending",
        UploadOutcome::Completed(_) => "completed",
        UploadOutcome::Failed => "failed",
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn parse_args<I>(args: I) -> Result<CliOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut owner: Option<String> = None;
    let mut pretty = false;
    let mut database_url: Option<String> = None;
    let mut base_url: Option<String> = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--owner" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--owner requires a value\n{}", usage()))?;
                owner = Some(value);
            }
            "--database-url" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("--database-url requires a value\n{}", usage())
                })?;
                database_url = Some(value);
            }
            "--base-url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--base-url requires a value\n{}", usage()))?;
                base_url = Some(value);
            }
            "--pretty" => {
                pretty = true;
            }
            "-h" | "--help" => {
                println!("{}", usage());
                std::process::exit(0);
            }
            other => {
                bail!("Unknown argument: {other}\n{}", usage());
            }
        }
    }

    let owner = owner.ok_or_else(|| anyhow::anyhow!("--owner is required\n{}", usage()))?;

    Ok(CliOptions {
        owner,
        pretty,
        database_url,
        base_url,
    })
}
