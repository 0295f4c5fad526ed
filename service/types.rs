use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of a comparison or ranking table, keyed by metric name in the order the service sent them.
pub type Record = serde_json::Map<String, Value>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrainingStatus {
	Pending,
	Running,
	Done,
	Failed,
	NoResults,
	Other(String),
}

impl TrainingStatus {
	pub fn is_done(&self) -> bool {
		matches!(self, TrainingStatus::Done)
	}

	pub fn as_str(&self) -> &str {
		match self {
			TrainingStatus::Pending => "pending",
			TrainingStatus::Running => "running",
			TrainingStatus::Done => "done",
			TrainingStatus::Failed => "failed",
			TrainingStatus::NoResults => "no_results",
			TrainingStatus::Other(status) => status,
		}
	}
}

impl From<String> for TrainingStatus {
	fn from(status: String) -> TrainingStatus {
		match status.as_str() {
			"pending" => TrainingStatus::Pending,
			"running" => TrainingStatus::Running,
			"done" => TrainingStatus::Done,
			"failed" => TrainingStatus::Failed,
			"no_results" => TrainingStatus::NoResults,
			_ => TrainingStatus::Other(status),
		}
	}
}

impl From<TrainingStatus> for String {
	fn from(status: TrainingStatus) -> String {
		status.as_str().to_owned()
	}
}

impl std::fmt::Display for TrainingStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// The result of training models against a dataset. Only a run whose status is done carries meaningful tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingRun {
	pub status: TrainingStatus,
	#[serde(default, deserialize_with = "deserialize_versions")]
	pub versions: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub comparison: Vec<Record>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub ranked: Vec<Record>,
}

impl TrainingRun {
	pub fn has_version(&self, version: &str) -> bool {
		self.versions.iter().any(|v| v == version)
	}
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Version tokens are timestamps, and some producers send them as numbers rather than strings.
fn deserialize_versions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let versions: Option<Vec<Value>> = Option::deserialize(deserializer)?;
	let versions = versions
		.unwrap_or_default()
		.into_iter()
		.map(|version| match version {
			Value::String(version) => version,
			version => version.to_string(),
		})
		.collect();
	Ok(versions)
}

/// The requested report format. It is passed to the service and used verbatim as the downloaded file's extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportFormat(String);

impl ReportFormat {
	pub fn new(format: impl Into<String>) -> ReportFormat {
		ReportFormat(format.into())
	}

	pub fn markdown() -> ReportFormat {
		ReportFormat::new("markdown")
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for ReportFormat {
	fn default() -> ReportFormat {
		ReportFormat::markdown()
	}
}

impl std::fmt::Display for ReportFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A report response exactly as the service returned it, before envelope unwrapping.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportPayload {
	pub content_type: Option<String>,
	pub bytes: Vec<u8>,
}
