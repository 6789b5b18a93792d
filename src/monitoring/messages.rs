use crate::models::Severity;

/// Message template builder for reading explanations.
///
/// Calm, preparatory framing: the commentary names what was observed and the
/// range it falls in; the closing recommendation is keyed by the overall
/// severity. Wording may evolve, but the branching thresholds are contract.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Blood-pressure commentary, six tiers.
    pub fn blood_pressure(systolic: f64, diastolic: f64) -> String {
        if systolic >= 180.0 || diastolic >= 120.0 {
            format!(
                "Blood pressure {}/{} mmHg is in the hypertensive crisis range \
                 (180/120 or higher). Please contact your doctor promptly.",
                systolic, diastolic,
            )
        } else if systolic >= 160.0 || diastolic >= 100.0 {
            format!(
                "Blood pressure {}/{} mmHg is consistent with stage 2 hypertension \
                 (160/100 or higher). This is worth discussing with your doctor soon.",
                systolic, diastolic,
            )
        } else if systolic >= 140.0 || diastolic >= 90.0 {
            format!(
                "Blood pressure {}/{} mmHg is consistent with stage 1 hypertension \
                 (140/90 or higher). You may want to recheck over the coming days.",
                systolic, diastolic,
            )
        } else if systolic >= 130.0 || diastolic >= 85.0 {
            format!(
                "Blood pressure {}/{} mmHg is elevated above the typical range. \
                 Keeping an eye on it is a good idea.",
                systolic, diastolic,
            )
        } else if systolic < 90.0 || diastolic < 60.0 {
            format!(
                "Blood pressure {}/{} mmHg is on the low side (below 90/60). \
                 If you feel dizzy or faint, mention it to your doctor.",
                systolic, diastolic,
            )
        } else {
            format!(
                "Blood pressure {}/{} mmHg is within the normal range.",
                systolic, diastolic,
            )
        }
    }

    /// Heart-rate commentary, three tiers.
    pub fn heart_rate(bpm: f64) -> String {
        if bpm > 100.0 {
            format!(
                "Heart rate {} bpm is above 100 (tachycardia range). \
                 Rest and recheck; mention it to your doctor if it persists.",
                bpm,
            )
        } else if bpm < 60.0 {
            format!(
                "Heart rate {} bpm is below 60 (bradycardia range). \
                 This can be normal at rest, but is worth noting.",
                bpm,
            )
        } else {
            format!("Heart rate {} bpm is within the normal range.", bpm)
        }
    }

    /// Temperature commentary, four tiers.
    pub fn temperature(celsius: f64) -> String {
        if celsius >= 38.3 {
            format!(
                "Temperature {:.1} °C indicates a significant fever. \
                 Please contact your doctor promptly.",
                celsius,
            )
        } else if celsius >= 37.3 {
            format!(
                "Temperature {:.1} °C indicates a mild fever. \
                 Rest, hydrate, and recheck later.",
                celsius,
            )
        } else if celsius <= 35.5 {
            format!(
                "Temperature {:.1} °C is in the hypothermia range. \
                 Warm up and recheck soon.",
                celsius,
            )
        } else {
            format!("Temperature {:.1} °C is within the normal range.", celsius)
        }
    }

    /// Oxygen-saturation commentary, three tiers.
    pub fn oxygen(spo2: f64) -> String {
        if spo2 < 90.0 {
            format!(
                "Oxygen saturation {}% is critically low (below 90%). \
                 Please contact your doctor or emergency services promptly.",
                spo2,
            )
        } else if spo2 < 95.0 {
            format!(
                "Oxygen saturation {}% is below the typical range (95-100%). \
                 Recheck after a few calm breaths.",
                spo2,
            )
        } else {
            format!("Oxygen saturation {}% is within the normal range.", spo2)
        }
    }

    /// Closing recommendation, keyed by the overall severity.
    pub fn recommendation(overall: Severity) -> &'static str {
        match overall {
            Severity::Normal => "All tracked vitals look within their expected ranges.",
            Severity::Warning => {
                "Some readings are outside their expected ranges. \
                 Consider rechecking and mention them at your next appointment."
            }
            Severity::Critical => {
                "One or more readings are in a critical range. \
                 Please contact your doctor or emergency services promptly."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_pressure_tier_boundaries() {
        assert!(MessageTemplates::blood_pressure(180.0, 80.0).contains("crisis"));
        assert!(MessageTemplates::blood_pressure(120.0, 120.0).contains("crisis"));
        assert!(MessageTemplates::blood_pressure(160.0, 80.0).contains("stage 2"));
        assert!(MessageTemplates::blood_pressure(120.0, 100.0).contains("stage 2"));
        assert!(MessageTemplates::blood_pressure(140.0, 80.0).contains("stage 1"));
        assert!(MessageTemplates::blood_pressure(120.0, 90.0).contains("stage 1"));
        assert!(MessageTemplates::blood_pressure(130.0, 80.0).contains("elevated"));
        assert!(MessageTemplates::blood_pressure(120.0, 85.0).contains("elevated"));
        assert!(MessageTemplates::blood_pressure(85.0, 70.0).contains("low side"));
        assert!(MessageTemplates::blood_pressure(118.0, 50.0).contains("low side"));
        assert!(MessageTemplates::blood_pressure(118.0, 76.0).contains("normal range"));
    }

    #[test]
    fn higher_tiers_shadow_lower_ones() {
        // 185/125 matches every hypertensive tier; only crisis wording appears.
        let msg = MessageTemplates::blood_pressure(185.0, 125.0);
        assert!(msg.contains("crisis"));
        assert!(!msg.contains("stage 2"));
        assert!(!msg.contains("stage 1"));
    }

    #[test]
    fn heart_rate_tiers() {
        assert!(MessageTemplates::heart_rate(101.0).contains("tachycardia"));
        assert!(MessageTemplates::heart_rate(59.0).contains("bradycardia"));
        assert!(MessageTemplates::heart_rate(100.0).contains("normal range"));
        assert!(MessageTemplates::heart_rate(60.0).contains("normal range"));
    }

    #[test]
    fn temperature_tiers() {
        assert!(MessageTemplates::temperature(38.3).contains("significant fever"));
        assert!(MessageTemplates::temperature(37.3).contains("mild fever"));
        assert!(MessageTemplates::temperature(35.5).contains("hypothermia"));
        assert!(MessageTemplates::temperature(36.8).contains("normal range"));
    }

    #[test]
    fn oxygen_tiers() {
        assert!(MessageTemplates::oxygen(89.0).contains("critically low"));
        assert!(MessageTemplates::oxygen(94.0).contains("below the typical range"));
        assert!(MessageTemplates::oxygen(95.0).contains("normal range"));
    }

    #[test]
    fn recommendation_is_keyed_by_severity() {
        assert!(MessageTemplates::recommendation(Severity::Normal).contains("expected ranges"));
        assert!(MessageTemplates::recommendation(Severity::Warning).contains("rechecking"));
        assert!(MessageTemplates::recommendation(Severity::Critical).contains("promptly"));
    }
}
