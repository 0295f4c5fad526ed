use derive_more::{Display, Error};

/// Errors a route handler turns into an HTTP status.
#[derive(Display, Debug, Error)]
pub enum Error {
	BadRequest,
	NotFound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewErrorKind {
	/// The service could not be reached or its response could not be read.
	Transport,
	/// The service answered without a usable payload.
	Shape,
	/// Preparing or triggering a file export failed.
	Download,
}

/// A failure a view stores in its state and renders to the user.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[display(fmt = "{}", message)]
pub struct ViewError {
	pub kind: ViewErrorKind,
	pub message: String,
}

impl ViewError {
	pub fn transport(message: impl Into<String>) -> ViewError {
		ViewError {
			kind: ViewErrorKind::Transport,
			message: message.into(),
		}
	}

	pub fn shape(message: impl Into<String>) -> ViewError {
		ViewError {
			kind: ViewErrorKind::Shape,
			message: message.into(),
		}
	}

	pub fn download(cause: impl std::fmt::Display) -> ViewError {
		ViewError {
			kind: ViewErrorKind::Download,
			message: format!("Failed to download report: {}", cause),
		}
	}

	pub fn is_download(&self) -> bool {
		self.kind == ViewErrorKind::Download
	}
}

#[test]
fn test_download_error_message() {
	let error = ViewError::download("network down");
	assert_eq!(error.to_string(), "Failed to download report: network down");
	assert!(error.is_download());
	assert!(!ViewError::transport("network down").is_download());
}
