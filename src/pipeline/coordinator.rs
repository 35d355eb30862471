use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use super::state::{BatchReport, FindingOutcome, FindingReport};
use crate::analyzer::OutcomeAnalyzer;
use crate::config::ProvexConfig;
use crate::errors::ProvexError;
use crate::generator::ProbeGenerator;
use crate::models::{Decision, Finding};
use crate::normalizer::normalize_report;
use crate::oracle::Oracle;
use crate::router::{AuditSink, DecisionRouter, RouteTarget, TicketSink};
use crate::runner::SandboxedRunner;

/// Sequences normalize, generate, execute, analyze and route for every
/// finding in a batch. Findings are independent after normalization, so
/// they run through a bounded worker pool; the sinks serialize their own
/// appends. Per-finding faults are recorded and the batch continues; only
/// malformed top-level input aborts, since then no finding can be trusted.
pub struct PipelineCoordinator {
    generator: ProbeGenerator,
    runner: SandboxedRunner,
    analyzer: OutcomeAnalyzer,
    router: DecisionRouter,
    workers: usize,
    cancel: CancellationToken,
}

impl PipelineCoordinator {
    pub fn new(
        config: &ProvexConfig,
        oracle: Arc<dyn Oracle>,
        ticket_sink: Arc<dyn TicketSink>,
        audit_sink: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            generator: ProbeGenerator::new(oracle.clone()),
            runner: SandboxedRunner::new(&config.execution),
            analyzer: OutcomeAnalyzer::new(oracle),
            router: DecisionRouter::new(ticket_sink, audit_sink),
            workers: config.pipeline.workers.max(1),
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the coordinator's cancel token with an external one so a
    /// caller can interrupt pending oracle calls and in-flight probes.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Validate every finding in a raw scanner report.
    pub async fn run_batch(&self, raw_report: &Value) -> Result<BatchReport, ProvexError> {
        let started_at = Utc::now();
        let batch_id = Uuid::new_v4().to_string();

        let findings = normalize_report(raw_report)?;
        info!(batch_id = %batch_id, findings = findings.len(), "Validation batch started");

        let reports: Vec<FindingReport> = stream::iter(findings)
            .map(|finding| self.process_finding(finding))
            .buffered(self.workers)
            .collect()
            .await;

        let report = BatchReport {
            batch_id,
            started_at,
            finished_at: Utc::now(),
            findings: reports,
            graph: None,
        };
        info!(
            batch_id = %report.batch_id,
            routed = report.routed_count(),
            skipped = report.skipped_count(),
            failed = report.failed_count(),
            exploitable = report.exploitable_count(),
            "Validation batch finished"
        );
        Ok(report)
    }

    async fn process_finding(&self, finding: Finding) -> FindingReport {
        info!(
            scanner = %finding.scanner,
            finding = %finding.finding,
            target = %finding.target(),
            severity = %finding.severity,
            "Validating finding"
        );

        // Normalized to Generated
        let program = tokio::select! {
            // Biased so cancellation wins over an already-ready reply
            biased;
            _ = self.cancel.cancelled() => {
                return self.failed(finding, "batch cancelled".to_string());
            }
            result = self.generator.generate(&finding) => match result {
                Ok(program) => program,
                Err(e) => {
                    warn!(finding = %finding.finding, error = %e, "Probe generation failed");
                    return self.failed(finding, e.to_string());
                }
            }
        };

        // Generated to Executed, unless there is nothing to execute
        if program.is_empty() {
            info!(finding = %finding.finding, "Empty probe generated, skipping");
            return FindingReport {
                finding,
                outcome: FindingOutcome::Skipped,
            };
        }
        let execution = self.runner.run(&program).await;

        // Executed to Analyzed. An unparsable reply falls back to the
        // not-exploitable default, preserving the raw reply; the finding
        // still reaches the router.
        let (decision, unparsed) = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return self.failed(finding, "batch cancelled".to_string());
            }
            result = self.analyzer.analyze(&execution) => match result {
                Ok(decision) => (decision, false),
                Err(ProvexError::ClassificationParse(raw)) => {
                    warn!(finding = %finding.finding, "Unparsable classification, defaulting to not exploitable");
                    (Decision::unparsed(&raw), true)
                }
                Err(e) => {
                    warn!(finding = %finding.finding, error = %e, "Outcome analysis failed");
                    return self.failed(finding, e.to_string());
                }
            }
        };

        // Analyzed to Routed
        let target = self.router.route(&finding, &decision).await;
        FindingReport {
            finding,
            outcome: FindingOutcome::Routed {
                exploitable: target == RouteTarget::Ticket,
                unparsed,
            },
        }
    }

    fn failed(&self, finding: Finding, error: String) -> FindingReport {
        FindingReport {
            finding,
            outcome: FindingOutcome::Failed { error },
        }
    }
}
