// Batch entrypoint for the vetting pipeline

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assistant_client::AssistantClient;
use vetting::jsonl::{ensure_sample_input, read_jsonl, write_jsonl};
use vetting::pipeline::{process_records, PipelineConfig, TracingObserver};
use vetting::{RewriterConfig, RunConfig, SanitizeConfig};

/// Process requirement records through the research vetting pipeline.
#[derive(Debug, Parser)]
#[command(name = "vet", version, about)]
struct Args {
    /// Path to the input JSONL file.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Path to write processed JSONL results.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Limit the number of records processed in this run.
    #[arg(long)]
    max_records: Option<usize>,

    /// Minimum limitation items required for a record to pass.
    #[arg(long)]
    min_items: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vetting=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut run_config = RunConfig::from_env();
    if let Some(input) = args.input {
        run_config.input_path = input;
    }
    if let Some(output) = args.output {
        run_config.output_path = output;
    }
    if let Some(max_records) = args.max_records {
        run_config.max_records = max_records;
    }
    if let Some(min_items) = args.min_items {
        run_config.min_items = min_items;
    }

    // Missing credentials abort the run before any record is touched.
    let client = AssistantClient::from_env()
        .context("Assistant gateway access is required (set ASSISTANT_SESSION_TOKEN)")?;

    tracing::info!(
        input = %run_config.input_path.display(),
        output = %run_config.output_path.display(),
        max_records = run_config.max_records,
        "Starting vetting run"
    );

    if !run_config.input_path.exists() {
        tracing::warn!("Input not found. Creating example JSONL.");
        ensure_sample_input(&run_config.input_path)
            .context("Failed to create the sample input file")?;
    }

    let records = read_jsonl(&run_config.input_path, Some(run_config.max_records))
        .context("Failed to read input file")?;

    let pipeline_config = PipelineConfig {
        sanitize: SanitizeConfig {
            min_items: run_config.min_items,
            ..SanitizeConfig::default()
        },
        rewriter: RewriterConfig::from_env(),
    };

    let processed = process_records(
        &records,
        &client,
        &pipeline_config,
        Some(run_config.max_records),
        &TracingObserver,
    )
    .await;

    write_jsonl(&run_config.output_path, &processed).context("Failed to write output file")?;

    tracing::info!(
        records = processed.len(),
        output = %run_config.output_path.display(),
        "Run complete"
    );
    tracing::warn!("Verify the output format before running a full batch.");

    Ok(())
}
