//! Client for the Results Service, the remote service that owns training runs and generated reports.
//!
//! The service answers with heterogeneous shapes: a payload may arrive as-is or wrapped as `{error, data}`, and a report may arrive as raw bytes or wrapped as `{data}`. The [`normalize`] module turns every one of those shapes into the typed values in [`types`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use self::client::{is_dot_segment, HttpResultsService, ResultsService};
pub use self::error::ServiceError;
pub use self::types::{Record, ReportFormat, ReportPayload, TrainingRun, TrainingStatus};
