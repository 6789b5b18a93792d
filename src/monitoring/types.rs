use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Metric, Reading, Severity};
use crate::storage::VaultError;

// ---------------------------------------------------------------------------
// MetricAssessment
// ---------------------------------------------------------------------------

/// Per-metric evaluation result: what was observed and how it classifies.
///
/// Derived deterministically from a reading; persisted only as part of an
/// [`AnalysisResult`], never standalone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricAssessment {
    pub metric: Metric,
    pub value: f64,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// The overall judgment for one reading.
///
/// Immutable once produced: overall severity, the per-metric assessment map,
/// and the generated explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall: Severity,
    pub assessments: BTreeMap<Metric, MetricAssessment>,
    pub explanation: String,
}

impl AnalysisResult {
    /// Worst severity across the individual metric assessments.
    pub fn worst_individual(&self) -> Severity {
        self.assessments
            .values()
            .map(|a| a.severity)
            .max()
            .unwrap_or(Severity::Normal)
    }

    pub fn assessment(&self, metric: Metric) -> Option<&MetricAssessment> {
        self.assessments.get(&metric)
    }
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

/// A durable notice raised when a qualifying severity transition occurs.
///
/// Snapshots the metric values live at raise time. The `seen` flag is the
/// only mutable field; alerts are never edited or deleted, only trimmed to
/// the retention window when persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub raised_at: NaiveDateTime,
    pub seen: bool,
    pub triggers: Vec<AlertTrigger>,
}

/// One metric's value and status captured when the alert was raised.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlertTrigger {
    pub metric: Metric,
    pub value: f64,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// HistoryEntry
// ---------------------------------------------------------------------------

/// One ledger row: the reading, its derived overall severity, and when it
/// was recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub reading: Reading,
    pub severity: Severity,
    pub recorded_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// MonitoringError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum MonitoringError {
    /// Write access without a valid authenticated identity fails closed.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Alert not found: {0}")]
    AlertNotFound(Uuid),

    #[error("Internal lock failed")]
    LockFailed,

    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_individual_takes_the_maximum() {
        let mut assessments = BTreeMap::new();
        assessments.insert(
            Metric::HeartRate,
            MetricAssessment {
                metric: Metric::HeartRate,
                value: 72.0,
                severity: Severity::Normal,
            },
        );
        assessments.insert(
            Metric::SystolicBp,
            MetricAssessment {
                metric: Metric::SystolicBp,
                value: 150.0,
                severity: Severity::Warning,
            },
        );

        let result = AnalysisResult {
            overall: Severity::Warning,
            assessments,
            explanation: String::new(),
        };
        assert_eq!(result.worst_individual(), Severity::Warning);
    }

    #[test]
    fn empty_assessments_default_to_normal() {
        let result = AnalysisResult {
            overall: Severity::Normal,
            assessments: BTreeMap::new(),
            explanation: String::new(),
        };
        assert_eq!(result.worst_individual(), Severity::Normal);
    }
}
