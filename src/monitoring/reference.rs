use crate::models::Metric;

/// Inclusive value band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Normal and critical bands for one metric.
///
/// Invariant: the critical band is a superset of the normal band. Bands are
/// constant tables built here — they are not user-supplied, so the invariant
/// is established at construction and checked in debug builds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBands {
    pub metric: Metric,
    pub normal: Band,
    pub critical: Band,
}

/// Reference band table for all tracked metrics.
pub struct VitalReference {
    bands: [MetricBands; 5],
}

impl VitalReference {
    /// Clinical default bands.
    ///
    /// Oxygen saturation has no upper critical cut-off: only desaturation
    /// below 90% is critical, so the critical band is open above.
    pub fn default_bands() -> Self {
        Self::from_bands([
            MetricBands {
                metric: Metric::HeartRate,
                normal: Band::new(60.0, 100.0),
                critical: Band::new(40.0, 140.0),
            },
            MetricBands {
                metric: Metric::SystolicBp,
                normal: Band::new(90.0, 129.0),
                critical: Band::new(70.0, 180.0),
            },
            MetricBands {
                metric: Metric::DiastolicBp,
                normal: Band::new(60.0, 84.0),
                critical: Band::new(40.0, 120.0),
            },
            MetricBands {
                metric: Metric::OxygenSaturation,
                normal: Band::new(95.0, 100.0),
                critical: Band::new(90.0, f64::INFINITY),
            },
            MetricBands {
                metric: Metric::Temperature,
                normal: Band::new(36.1, 37.2),
                critical: Band::new(35.0, 38.5),
            },
        ])
    }

    fn from_bands(bands: [MetricBands; 5]) -> Self {
        for b in &bands {
            debug_assert!(
                b.critical.min <= b.normal.min && b.critical.max >= b.normal.max,
                "critical band must contain the normal band for {:?}",
                b.metric
            );
        }
        Self { bands }
    }

    /// Band pair for one metric.
    pub fn bands_for(&self, metric: Metric) -> &MetricBands {
        self.bands
            .iter()
            .find(|b| b.metric == metric)
            .expect("reference table covers every metric")
    }
}

impl Default for VitalReference {
    fn default() -> Self {
        Self::default_bands()
    }
}
