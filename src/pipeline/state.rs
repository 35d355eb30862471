use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ExposureGraph, Finding};

/// Terminal state of one finding's trip through the pipeline.
///
/// `Routed` and `Skipped` are the ordinary outcomes; `Failed` records a
/// per-finding fault (oracle unavailable, cancellation) that never
/// aborts the rest of the batch. Malformed top-level input aborts before
/// any finding is processed and therefore never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FindingOutcome {
    Routed {
        exploitable: bool,
        /// True when the analyzer reply failed to parse and the
        /// not-exploitable default was applied.
        unparsed: bool,
    },
    Skipped,
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingReport {
    pub finding: Finding,
    pub outcome: FindingOutcome,
}

/// Aggregated result of one validation batch, so operators can tell
/// "nothing exploitable" apart from "pipeline broke".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub findings: Vec<FindingReport>,
    /// Present when a network range was supplied alongside the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<ExposureGraph>,
}

impl BatchReport {
    pub fn routed_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|r| matches!(r.outcome, FindingOutcome::Routed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|r| r.outcome == FindingOutcome::Skipped)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|r| matches!(r.outcome, FindingOutcome::Failed { .. }))
            .count()
    }

    pub fn exploitable_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|r| {
                matches!(
                    r.outcome,
                    FindingOutcome::Routed {
                        exploitable: true,
                        ..
                    }
                )
            })
            .count()
    }
}
