use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::Metric;

/// A single observation snapshot of the five tracked vital signs.
///
/// Immutable once created: the input pipeline builds a `Reading` and hands it
/// to the classifier; nothing downstream modifies it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Heart rate in beats per minute.
    pub heart_rate: f64,
    /// Systolic blood pressure in mmHg.
    pub systolic: f64,
    /// Diastolic blood pressure in mmHg.
    pub diastolic: f64,
    /// Oxygen saturation in percent.
    pub oxygen_saturation: f64,
    /// Body temperature in °C.
    pub temperature: f64,
    pub recorded_at: NaiveDateTime,
}

impl Reading {
    /// Build a reading stamped with the current local time.
    pub fn new(
        heart_rate: f64,
        systolic: f64,
        diastolic: f64,
        oxygen_saturation: f64,
        temperature: f64,
    ) -> Self {
        Self {
            heart_rate,
            systolic,
            diastolic,
            oxygen_saturation,
            temperature,
            recorded_at: chrono::Local::now().naive_local(),
        }
    }

    /// Observed value for one metric.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::HeartRate => self.heart_rate,
            Metric::SystolicBp => self.systolic,
            Metric::DiastolicBp => self.diastolic,
            Metric::OxygenSaturation => self.oxygen_saturation,
            Metric::Temperature => self.temperature,
        }
    }

    /// Feature vector in `Metric::ALL` order, as consumed by a severity model.
    pub fn features(&self) -> [f64; 5] {
        [
            self.heart_rate,
            self.systolic,
            self.diastolic,
            self.oxygen_saturation,
            self.temperature,
        ]
    }
}
