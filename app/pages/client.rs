use crate::{common::error::Error, Context};
use hyper::{header, Body, Request, Response, StatusCode};

/// Serve a file of the built browser client.
pub async fn get(
	context: &Context,
	_request: Request<Body>,
	file_name: &str,
) -> anyhow::Result<Response<Body>> {
	let client_dir = context.options.client_dir.as_ref().ok_or(Error::NotFound)?;
	let content_type = content_type(file_name).ok_or(Error::NotFound)?;
	if file_name.starts_with('.') || file_name.contains('/') || file_name.contains('\\') {
		return Err(Error::NotFound.into());
	}
	let data = match tokio::fs::read(client_dir.join(file_name)).await {
		Ok(data) => data,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
			return Err(Error::NotFound.into())
		}
		Err(error) => return Err(error.into()),
	};
	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, content_type)
		.body(Body::from(data))?;
	Ok(response)
}

fn content_type(file_name: &str) -> Option<&'static str> {
	match file_name.rsplit('.').next()? {
		"js" => Some("application/javascript"),
		"wasm" => Some("application/wasm"),
		_ => None,
	}
}

#[test]
fn test_content_type() {
	assert_eq!(content_type("automl_app_client.js"), Some("application/javascript"));
	assert_eq!(content_type("automl_app_client_bg.wasm"), Some("application/wasm"));
	assert_eq!(content_type("secrets.toml"), None);
}
