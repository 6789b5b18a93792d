use thiserror::Error;

use crate::models::Severity;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Empty training set")]
    EmptyTrainingSet,

    #[error("Non-finite feature value")]
    NonFiniteFeature,
}

/// Pluggable severity predictor.
///
/// The rule-based classifier is authoritative; a model vote can only
/// escalate a reading that the rules left at normal or warning, and any
/// prediction failure is treated as a normal vote by the caller.
pub trait SeverityModel: Send + Sync {
    /// Predict a severity from a feature vector in `Metric::ALL` order:
    /// heart rate, systolic, diastolic, oxygen saturation, temperature.
    fn predict(&self, features: &[f64; 5]) -> Result<Severity, ModelError>;
}

/// One labeled observation in the training corpus.
#[derive(Debug, Clone, Copy)]
pub struct LabeledSample {
    pub features: [f64; 5],
    pub label: Severity,
}

/// Fixed training corpus: five-feature vectors labeled offline.
///
/// The model is a secondary voter, trained once at startup; any stand-in
/// that implements [`SeverityModel`] satisfies the same contract.
const TRAINING_SET: [LabeledSample; 20] = [
    // Normal
    LabeledSample { features: [72.0, 118.0, 76.0, 98.0, 36.6], label: Severity::Normal },
    LabeledSample { features: [65.0, 110.0, 70.0, 97.0, 36.8], label: Severity::Normal },
    LabeledSample { features: [80.0, 124.0, 80.0, 99.0, 36.5], label: Severity::Normal },
    LabeledSample { features: [90.0, 120.0, 78.0, 96.0, 37.0], label: Severity::Normal },
    LabeledSample { features: [75.0, 115.0, 72.0, 98.0, 36.4], label: Severity::Normal },
    LabeledSample { features: [68.0, 105.0, 68.0, 99.0, 36.9], label: Severity::Normal },
    LabeledSample { features: [62.0, 112.0, 74.0, 97.0, 36.7], label: Severity::Normal },
    // Warning
    LabeledSample { features: [105.0, 135.0, 88.0, 94.0, 37.6], label: Severity::Warning },
    LabeledSample { features: [55.0, 92.0, 62.0, 95.0, 37.4], label: Severity::Warning },
    LabeledSample { features: [110.0, 145.0, 92.0, 93.0, 37.8], label: Severity::Warning },
    LabeledSample { features: [102.0, 138.0, 86.0, 94.0, 36.8], label: Severity::Warning },
    LabeledSample { features: [58.0, 128.0, 86.0, 94.0, 37.5], label: Severity::Warning },
    LabeledSample { features: [115.0, 150.0, 95.0, 92.0, 38.0], label: Severity::Warning },
    // Critical
    LabeledSample { features: [150.0, 190.0, 125.0, 85.0, 39.2], label: Severity::Critical },
    LabeledSample { features: [38.0, 85.0, 50.0, 88.0, 34.5], label: Severity::Critical },
    LabeledSample { features: [135.0, 185.0, 122.0, 89.0, 40.0], label: Severity::Critical },
    LabeledSample { features: [145.0, 175.0, 115.0, 86.0, 38.8], label: Severity::Critical },
    LabeledSample { features: [30.0, 70.0, 45.0, 82.0, 33.9], label: Severity::Critical },
    // Multi-system deterioration: no single vital is past its critical
    // cut-off, but the combination was labeled critical offline.
    LabeledSample { features: [122.0, 162.0, 102.0, 91.0, 38.2], label: Severity::Critical },
    LabeledSample { features: [118.0, 155.0, 98.0, 90.0, 38.4], label: Severity::Critical },
];

/// Nearest-centroid classifier over z-scored features.
///
/// Training computes per-feature mean and standard deviation across the
/// corpus, then one centroid per label in the normalized space. Prediction
/// picks the centroid closest in squared Euclidean distance.
pub struct NearestCentroidModel {
    mean: [f64; 5],
    std: [f64; 5],
    centroids: Vec<(Severity, [f64; 5])>,
}

impl NearestCentroidModel {
    /// Train on the bundled corpus.
    pub fn bundled() -> Self {
        // The bundled corpus is non-empty and finite, so training cannot fail.
        Self::train(&TRAINING_SET).expect("bundled training corpus is valid")
    }

    /// Train on an arbitrary labeled corpus.
    pub fn train(samples: &[LabeledSample]) -> Result<Self, ModelError> {
        if samples.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if samples
            .iter()
            .any(|s| s.features.iter().any(|v| !v.is_finite()))
        {
            return Err(ModelError::NonFiniteFeature);
        }

        let n = samples.len() as f64;
        let mut mean = [0.0; 5];
        for s in samples {
            for (m, v) in mean.iter_mut().zip(s.features.iter()) {
                *m += v / n;
            }
        }

        let mut std = [0.0; 5];
        for s in samples {
            for ((sd, v), m) in std.iter_mut().zip(s.features.iter()).zip(mean.iter()) {
                *sd += (v - m) * (v - m) / n;
            }
        }
        for sd in std.iter_mut() {
            *sd = sd.sqrt();
            // Constant features carry no signal; avoid dividing by zero.
            if *sd == 0.0 {
                *sd = 1.0;
            }
        }

        let mut centroids = Vec::new();
        for label in [Severity::Normal, Severity::Warning, Severity::Critical] {
            let class: Vec<&LabeledSample> =
                samples.iter().filter(|s| s.label == label).collect();
            if class.is_empty() {
                continue;
            }
            let mut centroid = [0.0; 5];
            for s in &class {
                for (i, c) in centroid.iter_mut().enumerate() {
                    *c += normalize(s.features[i], mean[i], std[i]) / class.len() as f64;
                }
            }
            centroids.push((label, centroid));
        }

        Ok(Self {
            mean,
            std,
            centroids,
        })
    }
}

fn normalize(value: f64, mean: f64, std: f64) -> f64 {
    (value - mean) / std
}

impl SeverityModel for NearestCentroidModel {
    fn predict(&self, features: &[f64; 5]) -> Result<Severity, ModelError> {
        if features.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature);
        }

        let normalized: Vec<f64> = features
            .iter()
            .enumerate()
            .map(|(i, &v)| normalize(v, self.mean[i], self.std[i]))
            .collect();

        let mut best: Option<(Severity, f64)> = None;
        for (label, centroid) in &self.centroids {
            let dist: f64 = normalized
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((*label, dist)),
            }
        }

        // Training guarantees at least one centroid.
        Ok(best.map(|(label, _)| label).unwrap_or(Severity::Normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_model_trains() {
        let model = NearestCentroidModel::bundled();
        assert_eq!(model.centroids.len(), 3);
    }

    #[test]
    fn predicts_obviously_normal_vitals() {
        let model = NearestCentroidModel::bundled();
        let vote = model.predict(&[70.0, 115.0, 75.0, 98.0, 36.6]).unwrap();
        assert_eq!(vote, Severity::Normal);
    }

    #[test]
    fn predicts_obviously_critical_vitals() {
        let model = NearestCentroidModel::bundled();
        let vote = model.predict(&[150.0, 195.0, 128.0, 84.0, 39.5]).unwrap();
        assert_eq!(vote, Severity::Critical);
    }

    #[test]
    fn rejects_non_finite_features() {
        let model = NearestCentroidModel::bundled();
        let result = model.predict(&[f64::NAN, 115.0, 75.0, 98.0, 36.6]);
        assert!(matches!(result, Err(ModelError::NonFiniteFeature)));
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let result = NearestCentroidModel::train(&[]);
        assert!(matches!(result, Err(ModelError::EmptyTrainingSet)));
    }

    #[test]
    fn training_recovers_most_corpus_labels() {
        let model = NearestCentroidModel::bundled();
        let mut correct = 0;
        for sample in &TRAINING_SET {
            if model.predict(&sample.features).unwrap() == sample.label {
                correct += 1;
            }
        }
        // Nearest-centroid blurs the warning/critical boundary a little;
        // it must still fit the bulk of its own corpus.
        assert!(
            correct * 4 >= TRAINING_SET.len() * 3,
            "only {correct}/{} corpus samples recovered",
            TRAINING_SET.len()
        );
    }

    #[test]
    fn multi_system_deterioration_votes_critical() {
        // Every vital individually in its warning gap; the combination is
        // what the corpus labels critical.
        let model = NearestCentroidModel::bundled();
        let vote = model.predict(&[120.0, 160.0, 100.0, 91.0, 38.2]).unwrap();
        assert_eq!(vote, Severity::Critical);
    }
}
