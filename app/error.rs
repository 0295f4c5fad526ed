use automl_app_common::error::ViewError;
use automl_service::ServiceError;

/// Convert a failed service call into the error a view stores.
pub fn view_error(error: ServiceError) -> ViewError {
	match error {
		ServiceError::NoResults => ViewError::shape(error.to_string()),
		ServiceError::Transport(message) => ViewError::transport(message),
		error => ViewError::transport(error.to_string()),
	}
}
