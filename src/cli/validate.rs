use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::commands::ValidateArgs;
use crate::config::load_config;
use crate::errors::ProvexError;
use crate::oracle::create_oracle;
use crate::pipeline::PipelineCoordinator;
use crate::router::{JsonlAuditSink, JsonlTicketSink};
use crate::scanner::{parse_range, ReachabilityScanner};

pub async fn handle_validate(args: ValidateArgs) -> Result<(), ProvexError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;

    let content = tokio::fs::read_to_string(&args.report).await?;
    let raw: Value = serde_json::from_str(&content)
        .map_err(|e| ProvexError::MalformedInput(format!("{}: {}", args.report, e)))?;

    // An unusable range must be rejected before the batch runs, otherwise
    // a typo would discard a finished batch's report
    if let Some(cidr) = &args.cidr {
        parse_range(cidr)?;
    }

    let output_dir = PathBuf::from(
        args.output
            .as_deref()
            .unwrap_or(&config.output.directory),
    );
    tokio::fs::create_dir_all(&output_dir).await?;

    let oracle = create_oracle(&config.oracle)?;
    let ticket_sink = Arc::new(JsonlTicketSink::new(&output_dir.join("tickets.jsonl")));
    let audit_sink = Arc::new(JsonlAuditSink::new(&output_dir.join("audit.jsonl")));

    let coordinator = PipelineCoordinator::new(&config, oracle, ticket_sink, audit_sink);

    // Ctrl-C interrupts pending oracle calls and in-flight probes
    let cancel = coordinator.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling batch");
            cancel.cancel();
        }
    });

    let mut report = coordinator.run_batch(&raw).await?;

    if let Some(cidr) = &args.cidr {
        let scanner = ReachabilityScanner::new(config.scan.clone());
        report.graph = Some(scanner.scan(cidr).await?);
    }

    let report_path = output_dir.join("batch_report.json");
    tokio::fs::write(&report_path, serde_json::to_string_pretty(&report)?).await?;
    info!(path = %report_path.display(), "Batch report written");

    println!(
        "Batch {}: {} routed ({} exploitable), {} skipped, {} failed",
        report.batch_id,
        report.routed_count(),
        report.exploitable_count(),
        report.skipped_count(),
        report.failed_count(),
    );
    Ok(())
}
