use std::collections::BTreeMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::{Metric, MonitoringConfig, Severity};

use super::types::{Alert, AlertTrigger, AnalysisResult, MonitoringError};

/// Most recent alerts kept when the log is persisted. A storage-hygiene
/// bound only: the live log is never reordered or mutated by it.
pub const ALERT_RETENTION: usize = 100;

/// In-memory alert log behind RwLock, owned by one monitoring session.
///
/// Raising rules:
/// - nothing is raised while monitoring is inactive or the metric's
///   tracking switch is off;
/// - a severity below the configured threshold never alerts;
/// - on the per-metric live path, an alert is raised only when the metric's
///   severity *changed* — an exact repeat of the previous severity is
///   suppressed, and any increase (or qualifying decrease) re-alerts;
/// - on the full-analysis path, every qualifying analysis raises exactly
///   one alert aggregating the flagged metrics.
pub struct AlertLog {
    alerts: RwLock<Vec<Alert>>,
    last_severity: RwLock<BTreeMap<Metric, Severity>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self {
            alerts: RwLock::new(Vec::new()),
            last_severity: RwLock::new(BTreeMap::new()),
        }
    }

    /// Per-metric live update. Returns the raised alert, if any.
    pub fn observe_metric(
        &self,
        config: &MonitoringConfig,
        metric: Metric,
        value: f64,
        severity: Severity,
    ) -> Result<Option<Alert>, MonitoringError> {
        let previous = {
            let mut last = self
                .last_severity
                .write()
                .map_err(|_| MonitoringError::LockFailed)?;
            // A metric never seen before counts as previously normal.
            last.insert(metric, severity).unwrap_or(Severity::Normal)
        };

        if !config.active || !config.metric_enabled(metric) {
            return Ok(None);
        }
        if severity < config.alert_threshold {
            return Ok(None);
        }
        if severity == previous {
            // Exact repetition — already alerted for this status.
            return Ok(None);
        }

        let alert = Alert {
            id: Uuid::new_v4(),
            severity,
            message: format!(
                "Your {} is {} ({} {}).",
                metric.label(),
                severity.as_str(),
                value,
                metric.unit(),
            ),
            raised_at: chrono::Local::now().naive_local(),
            seen: false,
            triggers: vec![AlertTrigger {
                metric,
                value,
                severity,
            }],
        };

        self.push(alert.clone())?;
        tracing::info!(
            metric = metric.as_str(),
            severity = severity.as_str(),
            "Metric alert raised"
        );
        Ok(Some(alert))
    }

    /// Full-reading analysis path: one aggregated alert per qualifying
    /// analysis, snapshotting every metric value live at raise time.
    pub fn observe_analysis(
        &self,
        config: &MonitoringConfig,
        result: &AnalysisResult,
    ) -> Result<Option<Alert>, MonitoringError> {
        if !config.active || result.overall < config.alert_threshold {
            return Ok(None);
        }

        let triggers: Vec<AlertTrigger> = result
            .assessments
            .values()
            .map(|a| AlertTrigger {
                metric: a.metric,
                value: a.value,
                severity: a.severity,
            })
            .collect();

        let flagged: Vec<&'static str> = result
            .assessments
            .values()
            .filter(|a| a.severity >= config.alert_threshold)
            .map(|a| a.metric.label())
            .collect();

        let message = if flagged.is_empty() {
            format!(
                "Your latest reading needs attention ({} overall).",
                result.overall.as_str(),
            )
        } else {
            format!(
                "Your latest reading needs attention ({} overall): {}.",
                result.overall.as_str(),
                flagged.join(", "),
            )
        };

        let alert = Alert {
            id: Uuid::new_v4(),
            severity: result.overall,
            message,
            raised_at: chrono::Local::now().naive_local(),
            seen: false,
            triggers,
        };

        self.push(alert.clone())?;
        tracing::info!(
            severity = result.overall.as_str(),
            flagged = flagged.len(),
            "Reading alert raised"
        );
        Ok(Some(alert))
    }

    fn push(&self, alert: Alert) -> Result<(), MonitoringError> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|_| MonitoringError::LockFailed)?;
        alerts.push(alert);
        Ok(())
    }

    /// All alerts in raise order.
    pub fn all(&self) -> Result<Vec<Alert>, MonitoringError> {
        let alerts = self.alerts.read().map_err(|_| MonitoringError::LockFailed)?;
        Ok(alerts.clone())
    }

    /// Count of alerts not yet acknowledged. Recomputed on demand.
    pub fn unread_count(&self) -> Result<usize, MonitoringError> {
        let alerts = self.alerts.read().map_err(|_| MonitoringError::LockFailed)?;
        Ok(alerts.iter().filter(|a| !a.seen).count())
    }

    /// Flip the `seen` flag — the only mutation an alert ever receives.
    pub fn mark_seen(&self, alert_id: &Uuid) -> Result<(), MonitoringError> {
        let mut alerts = self
            .alerts
            .write()
            .map_err(|_| MonitoringError::LockFailed)?;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *alert_id)
            .ok_or(MonitoringError::AlertNotFound(*alert_id))?;
        alert.seen = true;
        Ok(())
    }

    /// Snapshot for persistence: the most recent [`ALERT_RETENTION`]
    /// entries, oldest dropped first, relative order preserved.
    pub fn persistence_snapshot(&self) -> Result<Vec<Alert>, MonitoringError> {
        let alerts = self.alerts.read().map_err(|_| MonitoringError::LockFailed)?;
        let skip = alerts.len().saturating_sub(ALERT_RETENTION);
        Ok(alerts[skip..].to_vec())
    }

    /// Replace the log with previously persisted alerts (session start).
    pub(crate) fn restore(&self, alerts: Vec<Alert>) -> Result<(), MonitoringError> {
        let mut current = self
            .alerts
            .write()
            .map_err(|_| MonitoringError::LockFailed)?;
        *current = alerts;
        Ok(())
    }

    /// Drop everything — called on logout.
    pub(crate) fn clear(&self) -> Result<(), MonitoringError> {
        self.alerts
            .write()
            .map_err(|_| MonitoringError::LockFailed)?
            .clear();
        self.last_severity
            .write()
            .map_err(|_| MonitoringError::LockFailed)?
            .clear();
        Ok(())
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new()
    }
}
