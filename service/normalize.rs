use crate::{
	error::ServiceError,
	types::{ReportPayload, TrainingRun},
};
use serde_json::Value;

/// Strip the optional `{error, data}` envelope from a service response.
///
/// Precedence: an envelope whose `error` flag is `true` yields `None` regardless of its `data`; otherwise a present, non-null `data` field is the payload; otherwise the response itself is the payload. A `null` response yields `None`.
pub fn unwrap_envelope(value: Value) -> Option<Value> {
	match value {
		Value::Null => None,
		Value::Object(mut object) => {
			if object.get("error") == Some(&Value::Bool(true)) {
				return None;
			}
			let has_data = !matches!(object.get("data"), None | Some(Value::Null));
			if has_data {
				object.remove("data")
			} else {
				Some(Value::Object(object))
			}
		}
		value => Some(value),
	}
}

/// Normalize a `get_results` response into a training run.
pub fn training_run_from_value(value: Value) -> Result<TrainingRun, ServiceError> {
	let payload = unwrap_envelope(value).ok_or(ServiceError::NoResults)?;
	serde_json::from_value(payload).map_err(|error| {
		tracing::debug!(%error, "results payload is not a training run");
		ServiceError::NoResults
	})
}

/// Normalize a `download_report` response into the report's bytes.
///
/// A JSON response goes through [`unwrap_envelope`]: a string payload becomes its UTF-8 bytes and any other JSON payload is re-serialized. Every other response is already the report.
pub fn report_bytes(payload: ReportPayload) -> Result<Vec<u8>, ServiceError> {
	let is_json = payload
		.content_type
		.as_deref()
		.map(|content_type| content_type.starts_with("application/json"))
		.unwrap_or(false);
	if !is_json {
		return Ok(payload.bytes);
	}
	let value: Value = serde_json::from_slice(&payload.bytes)
		.map_err(|error| ServiceError::Decode(error.to_string()))?;
	match unwrap_envelope(value) {
		Some(Value::String(text)) => Ok(text.into_bytes()),
		Some(value) => Ok(value.to_string().into_bytes()),
		None => Err(ServiceError::NoResults),
	}
}
