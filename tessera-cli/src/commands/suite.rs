//! Test suite command handlers
//!
//! Schedules a test suite by running the deployment flow, and re-deploys
//! pipelines whose deployment failed.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use std::sync::Arc;
use tessera_client::{
    CatalogClient, DeploymentFlow, FlowError, FlowInput, FlowSnapshot, FormDefaults,
};
use tessera_core::domain::deployment::DeploymentStatus;
use tessera_core::domain::pipeline::PipelineDraft;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::id_resolver::{resolve_pipeline, resolve_pipeline_id};
use crate::types::PipelineRef;

/// Test suite subcommands
#[derive(Subcommand)]
pub enum SuiteCommands {
    /// Create or update the suite's ingestion pipeline, then deploy it
    Schedule {
        /// Test suite FQN
        test_suite: String,

        /// Test cases to run (comma-separated)
        #[arg(short = 't', long = "test-cases", value_delimiter = ',')]
        test_cases: Vec<String>,

        /// Cron schedule; pass an empty string to run once
        #[arg(short, long)]
        schedule: Option<String>,

        /// Pipeline display name
        #[arg(short, long)]
        name: Option<String>,

        /// Existing pipeline to edit (UUID or FQN)
        #[arg(short, long)]
        pipeline: Option<String>,

        /// Run the workflow with debug logging
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        debug_log: Option<bool>,

        /// Retry a failed deploy up to this many times
        #[arg(long, default_value = "0")]
        deploy_retries: u32,
    },
    /// Show the schedule form defaults
    Defaults {
        /// Test suite FQN
        test_suite: String,

        /// Existing pipeline to edit (UUID or FQN)
        #[arg(short, long)]
        pipeline: Option<String>,
    },
    /// Deploy an existing pipeline
    Deploy {
        /// Pipeline UUID or FQN
        pipeline: String,
    },
}

/// Handle test suite commands
///
/// # Arguments
/// * `command` - The suite command to execute
/// * `config` - The CLI configuration
pub async fn handle_suite_command(command: SuiteCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        SuiteCommands::Schedule {
            test_suite,
            test_cases,
            schedule,
            name,
            pipeline,
            debug_log,
            deploy_retries,
        } => {
            let flow = build_flow(&client, config, &test_suite, test_cases, name, pipeline).await?;
            let defaults = flow.initial_form();
            let draft = PipelineDraft::new(
                schedule.unwrap_or(defaults.schedule),
                debug_log.unwrap_or(defaults.enable_debug_log),
            );
            schedule_suite(flow, draft, deploy_retries).await
        }
        SuiteCommands::Defaults {
            test_suite,
            pipeline,
        } => {
            let flow = build_flow(&client, config, &test_suite, Vec::new(), None, pipeline).await?;
            print_defaults(&flow.initial_form());
            Ok(())
        }
        SuiteCommands::Deploy { pipeline } => deploy_pipeline(&client, &pipeline).await,
    }
}

/// Fetch the suite (and pipeline being edited) and set up a flow
async fn build_flow(
    client: &CatalogClient,
    config: &Config,
    test_suite: &str,
    test_cases: Vec<String>,
    name: Option<String>,
    pipeline: Option<String>,
) -> Result<DeploymentFlow> {
    let suite = client
        .get_test_suite_by_name(test_suite)
        .await
        .with_context(|| format!("Failed to fetch test suite '{}'", test_suite))?;

    let mut input = FlowInput::new(suite, test_cases);
    if let Some(name) = name {
        input = input.with_pipeline_name(name);
    }
    if let Some(pipeline) = pipeline {
        let existing = resolve_pipeline(client, &PipelineRef::parse(&pipeline)).await?;
        input = input.with_existing(existing);
    }

    Ok(DeploymentFlow::new(
        Arc::new(client.clone()),
        input,
        config.flow_settings()?,
    ))
}

/// Run the flow to completion, printing progress as it goes
async fn schedule_suite(flow: DeploymentFlow, draft: PipelineDraft, retries: u32) -> Result<()> {
    let progress = watch_progress(&flow);

    let mut outcome = flow.submit(draft).await.map(|_| ());
    let mut attempt = 0;
    while matches!(outcome, Err(FlowError::DeployFailed(_))) && attempt < retries {
        attempt += 1;
        tracing::warn!("Deploy failed, retrying ({}/{})", attempt, retries);
        outcome = flow.retry_deploy().await;
    }

    let snapshot = flow.snapshot();
    let message = flow.success_message();
    let exit = flow.view();
    tracing::debug!("Leaving deployment flow: {:?}", exit);
    let _ = progress.await;

    match outcome {
        Ok(()) if snapshot.is_deployed() => {
            println!(
                "{}",
                format!("✓ {}", message.unwrap_or_default()).green().bold()
            );
            print_pipeline(&snapshot);
            Ok(())
        }
        Err(FlowError::DeployFailed(err)) => {
            println!(
                "{}",
                format!("⚠ {}", message.unwrap_or_default()).yellow().bold()
            );
            print_pipeline(&snapshot);
            if let Some(pipeline) = &snapshot.pipeline {
                println!(
                    "  Retry with: {}",
                    format!("tessera suite deploy {}", pipeline.id).cyan()
                );
            }
            Err(anyhow::Error::new(err).context("Failed to deploy the ingestion workflow"))
        }
        Ok(()) => anyhow::bail!("Deployment flow ended in status '{}'", snapshot.status),
        Err(err) => Err(anyhow::Error::new(err).context("Failed to schedule test suite")),
    }
}

/// Print each status the flow enters until it is dropped
fn watch_progress(flow: &DeploymentFlow) -> JoinHandle<()> {
    let mut rx = flow.subscribe();

    tokio::spawn(async move {
        let mut last = DeploymentStatus::Idle;
        while rx.changed().await.is_ok() {
            let (status, progress, submitting) = {
                let snap = rx.borrow_and_update();
                (snap.status, snap.progress, snap.is_submitting())
            };
            if status != last {
                let label = if submitting {
                    format!("{}...", status)
                } else {
                    status.to_string()
                };
                println!(
                    "  {} {:<16} {}",
                    "▸".cyan(),
                    label,
                    progress.to_string().dimmed()
                );
                last = status;
            }
            if status.is_terminal() {
                break;
            }
        }
    })
}

/// Deploy a pipeline directly, outside of a flow
async fn deploy_pipeline(client: &CatalogClient, pipeline: &str) -> Result<()> {
    let pipeline = PipelineRef::parse(pipeline);
    let id = resolve_pipeline_id(client, &pipeline).await?;

    client
        .deploy_pipeline(id)
        .await
        .with_context(|| format!("Failed to deploy pipeline {}", pipeline))?;

    println!(
        "{}",
        format!("✓ Pipeline {} deployed successfully!", pipeline)
            .green()
            .bold()
    );

    Ok(())
}

/// Print the stored pipeline
fn print_pipeline(snapshot: &FlowSnapshot) {
    let Some(pipeline) = &snapshot.pipeline else {
        return;
    };

    println!("  ID:         {}", pipeline.id.to_string().cyan());
    println!("  Name:       {}", pipeline.label().bold());
    println!(
        "  Schedule:   {}",
        pipeline.schedule().unwrap_or("run once").dimmed()
    );
    println!(
        "  Log level:  {}",
        format!("{:?}", pipeline.logger_level).dimmed()
    );
    if !pipeline.test_cases().is_empty() {
        println!("  Test cases: {}", pipeline.test_cases().join(", ").dimmed());
    }
}

/// Print the schedule form defaults
fn print_defaults(defaults: &FormDefaults) {
    println!("{}", "Schedule Defaults:".bold());
    println!("  Schedule:  {}", defaults.schedule.cyan());
    println!(
        "  Debug log: {}",
        if defaults.enable_debug_log {
            "on".green()
        } else {
            "off".dimmed()
        }
    );
}
