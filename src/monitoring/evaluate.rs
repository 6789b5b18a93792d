use std::collections::BTreeMap;

use crate::models::{Metric, Reading, Severity};

use super::reference::{MetricBands, VitalReference};
use super::types::MetricAssessment;

/// Classify one scalar value against a metric's band pair.
///
/// Normal if the value lies in the normal band (inclusive); critical if it
/// lies outside the critical band (below its min or above its max); warning
/// in the gap between the two. Pure and total — every input maps to a
/// severity, non-finite values land in the warning gap.
pub fn evaluate(value: f64, bands: &MetricBands) -> Severity {
    if bands.normal.contains(value) {
        Severity::Normal
    } else if value < bands.critical.min || value > bands.critical.max {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

/// Evaluate every metric of a reading against the reference table.
pub fn assess_reading(
    reading: &Reading,
    reference: &VitalReference,
) -> BTreeMap<Metric, MetricAssessment> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let value = reading.value(metric);
            let severity = evaluate(value, reference.bands_for(metric));
            (
                metric,
                MetricAssessment {
                    metric,
                    value,
                    severity,
                },
            )
        })
        .collect()
}

/// Combined blood-pressure severity: the worse of systolic and diastolic.
pub fn blood_pressure_severity(assessments: &BTreeMap<Metric, MetricAssessment>) -> Severity {
    let systolic = assessments
        .get(&Metric::SystolicBp)
        .map(|a| a.severity)
        .unwrap_or(Severity::Normal);
    let diastolic = assessments
        .get(&Metric::DiastolicBp)
        .map(|a| a.severity)
        .unwrap_or(Severity::Normal);
    systolic.max(diastolic)
}

/// Worst severity across a set of assessments.
pub fn worst_severity(assessments: &BTreeMap<Metric, MetricAssessment>) -> Severity {
    assessments
        .values()
        .map(|a| a.severity)
        .max()
        .unwrap_or(Severity::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> VitalReference {
        VitalReference::default_bands()
    }

    #[test]
    fn heart_rate_bands_are_inclusive() {
        let r = reference();
        let hr = r.bands_for(Metric::HeartRate);
        assert_eq!(evaluate(60.0, hr), Severity::Normal);
        assert_eq!(evaluate(100.0, hr), Severity::Normal);
        assert_eq!(evaluate(105.0, hr), Severity::Warning);
        assert_eq!(evaluate(59.0, hr), Severity::Warning);
        assert_eq!(evaluate(145.0, hr), Severity::Critical);
        assert_eq!(evaluate(35.0, hr), Severity::Critical);
    }

    #[test]
    fn critical_cutoffs_are_exclusive_at_the_edge() {
        let r = reference();
        let hr = r.bands_for(Metric::HeartRate);
        // 40 and 140 sit inside the critical band, so they are warnings;
        // only values strictly beyond the band are critical.
        assert_eq!(evaluate(40.0, hr), Severity::Warning);
        assert_eq!(evaluate(140.0, hr), Severity::Warning);
        assert_eq!(evaluate(39.9, hr), Severity::Critical);
        assert_eq!(evaluate(140.1, hr), Severity::Critical);
    }

    #[test]
    fn oxygen_has_no_upper_critical_cutoff() {
        let r = reference();
        let o2 = r.bands_for(Metric::OxygenSaturation);
        assert_eq!(evaluate(98.0, o2), Severity::Normal);
        assert_eq!(evaluate(93.0, o2), Severity::Warning);
        assert_eq!(evaluate(89.9, o2), Severity::Critical);
        // A saturation above 100 is an odd sensor value but never critical.
        assert_eq!(evaluate(101.0, o2), Severity::Warning);
    }

    #[test]
    fn temperature_bands() {
        let r = reference();
        let temp = r.bands_for(Metric::Temperature);
        assert_eq!(evaluate(36.6, temp), Severity::Normal);
        assert_eq!(evaluate(37.8, temp), Severity::Warning);
        assert_eq!(evaluate(38.6, temp), Severity::Critical);
        assert_eq!(evaluate(34.9, temp), Severity::Critical);
    }

    #[test]
    fn non_finite_values_fall_in_the_warning_gap() {
        let r = reference();
        let hr = r.bands_for(Metric::HeartRate);
        assert_eq!(evaluate(f64::NAN, hr), Severity::Warning);
    }

    #[test]
    fn assess_reading_covers_all_metrics() {
        let reading = Reading::new(72.0, 118.0, 76.0, 98.0, 36.6);
        let assessments = assess_reading(&reading, &reference());
        assert_eq!(assessments.len(), 5);
        for metric in Metric::ALL {
            assert_eq!(assessments[&metric].severity, Severity::Normal);
        }
    }

    #[test]
    fn blood_pressure_takes_the_worse_side() {
        // Systolic normal, diastolic critical.
        let reading = Reading::new(72.0, 118.0, 125.0, 98.0, 36.6);
        let assessments = assess_reading(&reading, &reference());
        assert_eq!(assessments[&Metric::SystolicBp].severity, Severity::Normal);
        assert_eq!(
            assessments[&Metric::DiastolicBp].severity,
            Severity::Critical
        );
        assert_eq!(blood_pressure_severity(&assessments), Severity::Critical);
    }

    #[test]
    fn worst_severity_across_reading() {
        let reading = Reading::new(120.0, 118.0, 76.0, 98.0, 36.6);
        let assessments = assess_reading(&reading, &reference());
        assert_eq!(worst_severity(&assessments), Severity::Warning);
    }
}
