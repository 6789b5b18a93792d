use serde::{Deserialize, Serialize};

use super::enums::{Metric, Severity};

/// Per-user monitoring settings.
///
/// Initialized with defaults at session start, mutated from the settings
/// screen, persisted to the vault keyed by user identity, and reloaded the
/// next time that user opens a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitoringConfig {
    /// Master switch: no alerts are raised while monitoring is off.
    pub active: bool,
    /// Minimum severity that may raise an alert.
    pub alert_threshold: Severity,
    pub track_heart_rate: bool,
    pub track_blood_pressure: bool,
    pub track_oxygen_saturation: bool,
    pub track_temperature: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            active: true,
            alert_threshold: Severity::Warning,
            track_heart_rate: true,
            track_blood_pressure: true,
            track_oxygen_saturation: true,
            track_temperature: true,
        }
    }
}

impl MonitoringConfig {
    /// Whether alerts for this metric are enabled.
    ///
    /// Systolic and diastolic pressure share the blood-pressure switch; the
    /// settings screen exposes them as one toggle.
    pub fn metric_enabled(&self, metric: Metric) -> bool {
        match metric {
            Metric::HeartRate => self.track_heart_rate,
            Metric::SystolicBp | Metric::DiastolicBp => self.track_blood_pressure,
            Metric::OxygenSaturation => self.track_oxygen_saturation,
            Metric::Temperature => self.track_temperature,
        }
    }
}
