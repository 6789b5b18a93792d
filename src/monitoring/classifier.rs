use crate::models::{Reading, Severity};

use super::evaluate::{assess_reading, worst_severity};
use super::messages::MessageTemplates;
use super::model::SeverityModel;
use super::reference::VitalReference;
use super::types::AnalysisResult;

/// Produces one [`AnalysisResult`] per reading.
///
/// Per-metric band evaluation is authoritative: an individually critical
/// vital sign yields a critical overall result no matter what the learned
/// model says. The model is consulted only below that, and its vote can
/// only escalate the outcome (`overall = max(worst_metric, vote)`).
pub struct Classifier {
    reference: VitalReference,
    model: Option<Box<dyn SeverityModel>>,
}

impl Classifier {
    /// Rule-based classification only.
    pub fn new(reference: VitalReference) -> Self {
        Self {
            reference,
            model: None,
        }
    }

    /// Rule-based classification with a learned secondary voter.
    pub fn with_model(reference: VitalReference, model: Box<dyn SeverityModel>) -> Self {
        Self {
            reference,
            model: Some(model),
        }
    }

    pub fn reference(&self) -> &VitalReference {
        &self.reference
    }

    /// Analyze one reading: assess each metric, fold in the model vote,
    /// and build the explanation.
    pub fn analyze(&self, reading: &Reading) -> AnalysisResult {
        let assessments = assess_reading(reading, &self.reference);
        let worst = worst_severity(&assessments);

        let overall = if worst == Severity::Critical {
            // Critical individual readings always dominate; the model must
            // never downgrade them.
            Severity::Critical
        } else {
            worst.max(self.model_vote(reading))
        };

        let explanation = Self::build_explanation(reading, overall);

        tracing::debug!(
            overall = overall.as_str(),
            worst_metric = worst.as_str(),
            "Reading analyzed"
        );

        AnalysisResult {
            overall,
            assessments,
            explanation,
        }
    }

    /// Best-effort model vote; any failure counts as a normal vote.
    fn model_vote(&self, reading: &Reading) -> Severity {
        let Some(model) = &self.model else {
            return Severity::Normal;
        };
        match model.predict(&reading.features()) {
            Ok(vote) => vote,
            Err(e) => {
                tracing::debug!(error = %e, "Severity model failed, voting normal");
                Severity::Normal
            }
        }
    }

    fn build_explanation(reading: &Reading, overall: Severity) -> String {
        [
            MessageTemplates::blood_pressure(reading.systolic, reading.diastolic),
            MessageTemplates::heart_rate(reading.heart_rate),
            MessageTemplates::temperature(reading.temperature),
            MessageTemplates::oxygen(reading.oxygen_saturation),
            MessageTemplates::recommendation(overall).to_string(),
        ]
        .join(" ")
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(VitalReference::default_bands())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metric;
    use crate::monitoring::model::ModelError;

    struct FixedModel(Severity);

    impl SeverityModel for FixedModel {
        fn predict(&self, _features: &[f64; 5]) -> Result<Severity, ModelError> {
            Ok(self.0)
        }
    }

    struct FailingModel;

    impl SeverityModel for FailingModel {
        fn predict(&self, _features: &[f64; 5]) -> Result<Severity, ModelError> {
            Err(ModelError::NonFiniteFeature)
        }
    }

    #[test]
    fn normal_reading_is_normal_overall() {
        let classifier = Classifier::default();
        let result = classifier.analyze(&Reading::new(72.0, 118.0, 76.0, 98.0, 36.6));
        assert_eq!(result.overall, Severity::Normal);
        assert!(result.explanation.contains("expected ranges"));
    }

    #[test]
    fn overall_never_weaker_than_worst_metric() {
        // BP 190/125 critical; everything else normal; model votes normal.
        let classifier = Classifier::with_model(
            VitalReference::default_bands(),
            Box::new(FixedModel(Severity::Normal)),
        );
        let result = classifier.analyze(&Reading::new(70.0, 190.0, 125.0, 98.0, 36.5));
        assert_eq!(result.overall, Severity::Critical);
        assert_eq!(
            result.assessment(Metric::SystolicBp).unwrap().severity,
            Severity::Critical
        );
        assert_eq!(
            result.assessment(Metric::HeartRate).unwrap().severity,
            Severity::Normal
        );
    }

    #[test]
    fn model_can_escalate_from_normal() {
        let classifier = Classifier::with_model(
            VitalReference::default_bands(),
            Box::new(FixedModel(Severity::Warning)),
        );
        let result = classifier.analyze(&Reading::new(72.0, 118.0, 76.0, 98.0, 36.6));
        assert_eq!(result.worst_individual(), Severity::Normal);
        assert_eq!(result.overall, Severity::Warning);
    }

    #[test]
    fn model_cannot_downgrade_a_warning() {
        // HR 120 is a warning; model votes normal; overall stays warning.
        let classifier = Classifier::with_model(
            VitalReference::default_bands(),
            Box::new(FixedModel(Severity::Normal)),
        );
        let result = classifier.analyze(&Reading::new(120.0, 118.0, 76.0, 98.0, 36.6));
        assert_eq!(result.overall, Severity::Warning);
    }

    #[test]
    fn model_failure_defaults_to_normal_vote() {
        let classifier = Classifier::with_model(
            VitalReference::default_bands(),
            Box::new(FailingModel),
        );

        // Failure never blocks classification or downgrades the rules.
        let warning = classifier.analyze(&Reading::new(120.0, 118.0, 76.0, 98.0, 36.6));
        assert_eq!(warning.overall, Severity::Warning);

        let normal = classifier.analyze(&Reading::new(72.0, 118.0, 76.0, 98.0, 36.6));
        assert_eq!(normal.overall, Severity::Normal);
    }

    #[test]
    fn multi_system_reading_escalates_through_model() {
        // HR 120, BP 160/100, O2 91, Temp 38.2: every metric sits in its
        // warning gap, and the learned vote lifts the overall to critical.
        let classifier = Classifier::with_model(
            VitalReference::default_bands(),
            Box::new(crate::monitoring::model::NearestCentroidModel::bundled()),
        );
        let result = classifier.analyze(&Reading::new(120.0, 160.0, 100.0, 91.0, 38.2));
        assert_eq!(result.worst_individual(), Severity::Warning);
        assert_eq!(result.overall, Severity::Critical);
        assert!(result.explanation.contains("stage 2"));
    }

    #[test]
    fn explanation_covers_every_vital() {
        let classifier = Classifier::default();
        let result = classifier.analyze(&Reading::new(120.0, 160.0, 100.0, 91.0, 38.2));
        assert!(result.explanation.contains("Blood pressure"));
        assert!(result.explanation.contains("Heart rate"));
        assert!(result.explanation.contains("Temperature"));
        assert!(result.explanation.contains("Oxygen saturation"));
    }
}
