use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::auth::IdentityProvider;
use crate::models::{Metric, MonitoringConfig, Reading};
use crate::storage::Vault;

use super::alerts::AlertLog;
use super::classifier::Classifier;
use super::evaluate::evaluate;
use super::history::HistoryLedger;
use super::types::{Alert, AnalysisResult, HistoryEntry, MonitoringError};

const CONFIG_RECORD: &str = "monitoring_config";
const ALERTS_RECORD: &str = "alerts";
const HISTORY_RECORD: &str = "history";

/// Per-user monitoring session.
///
/// Owns the ledger, the alert log, the active configuration, and the
/// classifier for one authenticated user. Constructed at login, cleared at
/// logout; there is no process-wide monitoring state. Every operation that
/// touches per-user data consults the identity collaborator first: writes
/// without a valid identity fail, reads come back empty.
///
/// Persistence goes through the vault (serialize → encrypt → store). A
/// failed save is reported to the caller, but the in-memory state stays
/// authoritative for the rest of the session — there is no rollback.
pub struct MonitoringSession {
    identity: Arc<dyn IdentityProvider>,
    vault: Vault,
    classifier: Classifier,
    config: RwLock<MonitoringConfig>,
    alerts: AlertLog,
    history: HistoryLedger,
}

impl MonitoringSession {
    /// Build a session with default configuration and empty state.
    pub fn new(identity: Arc<dyn IdentityProvider>, vault: Vault, classifier: Classifier) -> Self {
        Self {
            identity,
            vault,
            classifier,
            config: RwLock::new(MonitoringConfig::default()),
            alerts: AlertLog::new(),
            history: HistoryLedger::new(),
        }
    }

    /// Build a session and reload the current user's persisted state.
    pub async fn start(
        identity: Arc<dyn IdentityProvider>,
        vault: Vault,
        classifier: Classifier,
    ) -> Result<Self, MonitoringError> {
        let session = Self::new(identity, vault, classifier);
        session.reload().await?;
        Ok(session)
    }

    async fn reload(&self) -> Result<(), MonitoringError> {
        // No identity: nothing is loaded and the session starts empty.
        let Some(user) = self.identity.current_user_id() else {
            return Ok(());
        };

        if let Some(config) = self.vault.load::<MonitoringConfig>(&user, CONFIG_RECORD)? {
            *self
                .config
                .write()
                .map_err(|_| MonitoringError::LockFailed)? = config;
        }
        if let Some(alerts) = self.vault.load::<Vec<Alert>>(&user, ALERTS_RECORD)? {
            self.alerts.restore(alerts)?;
        }
        if let Some(history) = self
            .vault
            .load::<Vec<HistoryEntry>>(&user, HISTORY_RECORD)?
        {
            self.history.restore(history)?;
        }

        tracing::info!(user_id = %user, "Monitoring session restored");
        Ok(())
    }

    fn require_user(&self) -> Result<Uuid, MonitoringError> {
        if !self.identity.is_authenticated() {
            return Err(MonitoringError::NotAuthenticated);
        }
        self.identity
            .current_user_id()
            .ok_or(MonitoringError::NotAuthenticated)
    }

    fn config_snapshot(&self) -> Result<MonitoringConfig, MonitoringError> {
        Ok(self
            .config
            .read()
            .map_err(|_| MonitoringError::LockFailed)?
            .clone())
    }

    /// Record one reading: classify, run the alert policy, append to the
    /// ledger, and persist.
    pub async fn record_reading(
        &self,
        reading: Reading,
    ) -> Result<AnalysisResult, MonitoringError> {
        let user = self.require_user()?;

        let result = self.classifier.analyze(&reading);
        let config = self.config_snapshot()?;
        self.alerts.observe_analysis(&config, &result)?;
        self.history.append(reading, result.overall)?;

        tracing::info!(
            user_id = %user,
            overall = result.overall.as_str(),
            "Reading recorded"
        );

        self.persist(&user).await?;
        Ok(result)
    }

    /// Per-metric live update — the chat-style single-field entry path.
    pub fn observe_metric(
        &self,
        metric: Metric,
        value: f64,
    ) -> Result<Option<Alert>, MonitoringError> {
        self.require_user()?;
        let severity = evaluate(value, self.classifier.reference().bands_for(metric));
        let config = self.config_snapshot()?;
        self.alerts.observe_metric(&config, metric, value, severity)
    }

    /// Ledger entries in insertion order; empty without a valid identity.
    pub fn health_history(&self) -> Result<Vec<HistoryEntry>, MonitoringError> {
        if self.require_user().is_err() {
            return Ok(Vec::new());
        }
        self.history.entries()
    }

    /// All alerts in raise order; empty without a valid identity.
    pub fn alerts(&self) -> Result<Vec<Alert>, MonitoringError> {
        if self.require_user().is_err() {
            return Ok(Vec::new());
        }
        self.alerts.all()
    }

    /// Unacknowledged alert count; zero without a valid identity.
    pub fn unread_alert_count(&self) -> Result<usize, MonitoringError> {
        if self.require_user().is_err() {
            return Ok(0);
        }
        self.alerts.unread_count()
    }

    /// Acknowledge one alert and persist the flag.
    pub async fn mark_alert_seen(&self, alert_id: &Uuid) -> Result<(), MonitoringError> {
        let user = self.require_user()?;
        self.alerts.mark_seen(alert_id)?;
        self.vault
            .save(&user, ALERTS_RECORD, &self.alerts.persistence_snapshot()?)?;
        Ok(())
    }

    /// Active configuration snapshot.
    pub fn config(&self) -> Result<MonitoringConfig, MonitoringError> {
        self.config_snapshot()
    }

    /// Replace the configuration and persist it for the current user.
    pub async fn update_config(&self, config: MonitoringConfig) -> Result<(), MonitoringError> {
        let user = self.require_user()?;
        *self
            .config
            .write()
            .map_err(|_| MonitoringError::LockFailed)? = config.clone();
        self.vault.save(&user, CONFIG_RECORD, &config)?;
        Ok(())
    }

    /// Re-initialize the session on logout: history and alerts are cleared
    /// and the configuration returns to defaults.
    pub fn logout(&self) -> Result<(), MonitoringError> {
        self.history.clear()?;
        self.alerts.clear()?;
        *self
            .config
            .write()
            .map_err(|_| MonitoringError::LockFailed)? = MonitoringConfig::default();
        tracing::info!("Monitoring session cleared");
        Ok(())
    }

    async fn persist(&self, user: &Uuid) -> Result<(), MonitoringError> {
        self.vault
            .save(user, HISTORY_RECORD, &self.history.entries()?)?;
        self.vault
            .save(user, ALERTS_RECORD, &self.alerts.persistence_snapshot()?)?;
        Ok(())
    }
}
