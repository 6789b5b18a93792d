use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Health status classification for a metric or a whole reading.
///
/// The ordering is total and fixed: `Normal < Warning < Critical`.
/// Every tie-break and threshold comparison in the crate uses this order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Severity::Normal),
            "warning" => Some(Severity::Warning),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// One named vital sign tracked by the monitor.
///
/// Blood pressure is two independent scalar metrics (systolic, diastolic);
/// their combined severity is derived as the worse of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    HeartRate,
    SystolicBp,
    DiastolicBp,
    OxygenSaturation,
    Temperature,
}

impl Metric {
    /// All tracked metrics, in the order they appear in a feature vector.
    pub const ALL: [Metric; 5] = [
        Metric::HeartRate,
        Metric::SystolicBp,
        Metric::DiastolicBp,
        Metric::OxygenSaturation,
        Metric::Temperature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::HeartRate => "heart_rate",
            Metric::SystolicBp => "systolic_bp",
            Metric::DiastolicBp => "diastolic_bp",
            Metric::OxygenSaturation => "oxygen_saturation",
            Metric::Temperature => "temperature",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "heart_rate" => Some(Metric::HeartRate),
            "systolic_bp" => Some(Metric::SystolicBp),
            "diastolic_bp" => Some(Metric::DiastolicBp),
            "oxygen_saturation" => Some(Metric::OxygenSaturation),
            "temperature" => Some(Metric::Temperature),
            _ => None,
        }
    }

    /// Measurement unit for this metric.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::HeartRate => "bpm",
            Metric::SystolicBp | Metric::DiastolicBp => "mmHg",
            Metric::OxygenSaturation => "%",
            Metric::Temperature => "°C",
        }
    }

    /// Human-readable label for alert messages.
    pub fn label(self) -> &'static str {
        match self {
            Metric::HeartRate => "heart rate",
            Metric::SystolicBp => "systolic blood pressure",
            Metric::DiastolicBp => "diastolic blood pressure",
            Metric::OxygenSaturation => "oxygen saturation",
            Metric::Temperature => "body temperature",
        }
    }
}
