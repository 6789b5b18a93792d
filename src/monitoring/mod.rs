//! Health status classification engine.
//!
//! One pipeline: a reading flows through per-metric band evaluation, the
//! classifier folds in an optional learned vote, the alert policy decides
//! whether anything new needs surfacing, and the ledger keeps the record.
//! All of it is owned by a per-user [`session::MonitoringSession`].

pub mod alerts;
pub mod classifier;
pub mod evaluate;
pub mod history;
pub mod messages;
pub mod model;
pub mod reference;
pub mod session;
pub mod types;

pub use alerts::{AlertLog, ALERT_RETENTION};
pub use classifier::Classifier;
pub use evaluate::{assess_reading, blood_pressure_severity, evaluate, worst_severity};
pub use history::HistoryLedger;
pub use messages::MessageTemplates;
pub use model::{LabeledSample, ModelError, NearestCentroidModel, SeverityModel};
pub use reference::{Band, MetricBands, VitalReference};
pub use session::MonitoringSession;
pub use types::{
    Alert, AlertTrigger, AnalysisResult, HistoryEntry, MetricAssessment, MonitoringError,
};
