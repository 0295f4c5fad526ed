use automl_app_common::download::ExportFile;
use hyper::{header, Body, Response, StatusCode};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub fn page(status: StatusCode, document: html::Node) -> anyhow::Result<Response<Body>> {
	let response = Response::builder()
		.status(status)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(document.render_to_string()))?;
	Ok(response)
}

/// Respond with `file` as a download.
pub fn attachment(file: ExportFile) -> anyhow::Result<Response<Body>> {
	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, file.mime.as_str())
		.header(header::CONTENT_DISPOSITION, content_disposition(&file.filename))
		.body(Body::from(file.bytes))?;
	Ok(response)
}

/// The `filename` parameter carries an ASCII fallback and `filename*` carries the exact name.
fn content_disposition(filename: &str) -> String {
	let fallback: String = filename
		.chars()
		.map(|c| {
			if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
				c
			} else {
				'_'
			}
		})
		.collect();
	format!(
		"attachment; filename=\"{}\"; filename*=UTF-8''{}",
		fallback,
		utf8_percent_encode(filename, NON_ALPHANUMERIC),
	)
}

#[test]
fn test_content_disposition() {
	assert_eq!(
		content_disposition("automl_report_ds1.md"),
		"attachment; filename=\"automl_report_ds1.md\"; filename*=UTF-8''automl%5Freport%5Fds1%2Emd",
	);
	assert_eq!(
		content_disposition("automl_report_\"é\".md"),
		"attachment; filename=\"automl_report____.md\"; filename*=UTF-8''automl%5Freport%5F%22%C3%A9%22%2Emd",
	);
}
