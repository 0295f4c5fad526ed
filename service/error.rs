use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
	/// The request never produced a response.
	#[error("{0}")]
	Transport(String),
	#[error("request failed with status {status}: {body}")]
	Status { status: u16, body: String },
	#[error("dataset id {0:?} cannot be addressed in a url")]
	InvalidDatasetId(String),
	#[error("failed to decode response: {0}")]
	Decode(String),
	/// The service answered, but with an error envelope or a payload that is not a training run.
	#[error("No results available")]
	NoResults,
}

impl From<reqwest::Error> for ServiceError {
	fn from(error: reqwest::Error) -> ServiceError {
		if error.is_decode() {
			ServiceError::Decode(error.to_string())
		} else {
			ServiceError::Transport(error.to_string())
		}
	}
}
