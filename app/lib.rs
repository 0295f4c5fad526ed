//! The AutoML results web app.
//!
//! Every page builds fresh view state for its request: [`pages::results::view::ResultsView`] for a dataset's training results and [`pages::report::view::ReportView`] for its generated report. Both talk to the Results Service through [`automl_service::ResultsService`].

use self::common::error::Error;
use automl_service::{HttpResultsService, ResultsService};
use hyper::{Body, Method, Request, Response, StatusCode};
use std::{
	borrow::Cow, collections::BTreeMap, net::IpAddr, path::PathBuf, sync::Arc, time::Duration,
};
use url::Url;

pub use automl_app_common as common;

mod error;
mod layouts;
mod pages;
mod response;
#[cfg(test)]
mod test;

pub struct Options {
	pub host: IpAddr,
	pub port: u16,
	pub service_url: Url,
	/// Abandon service requests after this long. Requests never time out when unset.
	pub service_timeout: Option<Duration>,
	/// A directory holding the built browser client, served under `/client/`.
	pub client_dir: Option<PathBuf>,
}

pub struct Context {
	pub options: Options,
	pub service: Arc<dyn ResultsService>,
}

impl Context {
	/// The module script that boots the browser client, when one is being served.
	pub fn client_js_src(&self) -> Option<String> {
		self.options
			.client_dir
			.as_ref()
			.map(|_| "/client/automl_app_client.js".to_owned())
	}
}

pub async fn handle(context: Arc<Context>, request: Request<Body>) -> Response<Body> {
	let method = request.method().clone();
	let uri = request.uri().clone();
	let path = uri.path();
	let query = uri.query();
	let search_params: Option<BTreeMap<String, String>> = query.map(|search_params| {
		url::form_urlencoded::parse(search_params.as_bytes())
			.into_owned()
			.collect()
	});
	let result = match decode_path_components(path) {
		Some(path_components) => {
			let path_components: Vec<&str> = path_components.iter().map(|c| c.as_ref()).collect();
			match (&method, path_components.as_slice()) {
				(&Method::GET, &["health"]) => self::pages::health::get(&context, request).await,
				(&Method::GET, &["results", dataset_id]) if addressable(dataset_id) => {
					self::pages::results::get::get(&context, request, dataset_id, search_params).await
				}
				(&Method::GET, &["results", dataset_id, "download"]) if addressable(dataset_id) => {
					self::pages::results::download::get(&context, request, dataset_id, search_params)
						.await
				}
				(&Method::GET, &["report", dataset_id]) if addressable(dataset_id) => {
					self::pages::report::get::get(&context, request, dataset_id).await
				}
				(&Method::GET, &["report", dataset_id, "download"]) if addressable(dataset_id) => {
					self::pages::report::download::get(&context, request, dataset_id).await
				}
				(&Method::GET, &["client", file_name]) => {
					self::pages::client::get(&context, request, file_name).await
				}
				_ => Err(Error::NotFound.into()),
			}
		}
		None => Err(Error::BadRequest.into()),
	};
	match result {
		Ok(response) => response,
		Err(error) => error_response(error),
	}
}

/// Whether a dataset id can be passed on to the results service.
fn addressable(dataset_id: &str) -> bool {
	!dataset_id.is_empty() && !automl_service::is_dot_segment(dataset_id)
}

/// Split a request path into its percent-decoded components. Returns `None` if a component is not valid UTF-8.
fn decode_path_components(path: &str) -> Option<Vec<Cow<str>>> {
	path.split('/')
		.skip(1)
		.map(|component| percent_encoding::percent_decode_str(component).decode_utf8().ok())
		.collect()
}

fn error_response(error: anyhow::Error) -> Response<Body> {
	let (status, body): (StatusCode, Cow<str>) = match error.downcast_ref::<Error>() {
		Some(Error::BadRequest) => (StatusCode::BAD_REQUEST, "bad request".into()),
		Some(Error::NotFound) => (StatusCode::NOT_FOUND, "not found".into()),
		None => {
			tracing::error!("{:#}", error);
			let body = if cfg!(debug_assertions) {
				format!("{:#}", error).into()
			} else {
				"internal server error".into()
			};
			(StatusCode::INTERNAL_SERVER_ERROR, body)
		}
	};
	let mut response = Response::new(Body::from(body.into_owned()));
	*response.status_mut() = status;
	response
}

pub fn run(options: Options) -> anyhow::Result<()> {
	tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()?
		.block_on(run_impl(options))
}

async fn run_impl(options: Options) -> anyhow::Result<()> {
	let service = match options.service_timeout {
		Some(timeout) => HttpResultsService::with_timeout(options.service_url.clone(), timeout)?,
		None => HttpResultsService::new(options.service_url.clone()),
	};
	tracing::info!(service_url = %service.base_url(), "using results service");
	let host = options.host;
	let port = options.port;
	let context = Context {
		options,
		service: Arc::new(service),
	};
	automl_util::serve::serve(host, port, context, handle).await?;
	Ok(())
}

#[cfg(test)]
fn test_context(service: test::FakeResultsService) -> Arc<Context> {
	Arc::new(Context {
		options: Options {
			host: "127.0.0.1".parse().unwrap(),
			port: 8080,
			service_url: "http://localhost:5000/api".parse().unwrap(),
			service_timeout: None,
			client_dir: None,
		},
		service: Arc::new(service),
	})
}

#[cfg(test)]
async fn get(context: &Arc<Context>, uri: &str) -> (StatusCode, http::HeaderMap, String) {
	let request = Request::get(uri).body(Body::empty()).unwrap();
	let response = handle(context.clone(), request).await;
	let status = response.status();
	let headers = response.headers().clone();
	let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
	(status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_routing() {
	let context = test_context(test::FakeResultsService::with_results(Ok(
		serde_json::json!({ "status": "running" }),
	)));
	let (status, _, body) = get(&context, "/health").await;
	assert_eq!((status, body.as_str()), (StatusCode::OK, "ok"));
	let (status, _, body) = get(&context, "/results/").await;
	assert_eq!((status, body.as_str()), (StatusCode::NOT_FOUND, "not found"));
	let (status, _, _) = get(&context, "/models/ds1").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	let (status, _, _) = get(&context, "/client/automl_app_client.js").await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	let (status, _, _) = get(&context, "/results/%FF").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dot_dataset_ids_are_not_found() {
	let context = test_context(test::FakeResultsService::with_results(Ok(
		serde_json::json!({ "status": "done" }),
	)));
	for uri in &[
		"/results/%2E",
		"/results/%2E%2E",
		"/results/%2e%2e/download",
		"/report/%2E%2E",
		"/report/%2E/download",
	] {
		let (status, _, _) = get(&context, uri).await;
		assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
	}
	let (status, _, body) = get(&context, "/results/v1.2").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains(r#"href="/report/v1.2""#));
}

#[tokio::test]
async fn test_results_page_decodes_dataset_id_and_version() {
	let service = test::FakeResultsService::with_results(Ok(serde_json::json!({
		"status": "running",
	})));
	let context = test_context(service);
	let (status, headers, body) = get(&context, "/results/my%20data?version=1700000000").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(headers[hyper::header::CONTENT_TYPE], "text/html; charset=utf-8");
	assert!(body.contains("Training is still in progress. Status: running"));
	assert!(body.contains("<title>Results for my data</title>"));
}

#[tokio::test]
async fn test_results_download_route() {
	let mut service = test::FakeResultsService::with_results(Ok(serde_json::json!({
		"status": "done",
	})));
	service.report = Ok(test::report("text/markdown", "# Report"));
	let context = test_context(service);
	let (status, headers, body) = get(&context, "/results/ds1/download?format=markdown").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		headers[hyper::header::CONTENT_DISPOSITION],
		"attachment; filename=\"automl_report_ds1.markdown\"; filename*=UTF-8''automl%5Freport%5Fds1%2Emarkdown",
	);
	assert_eq!(body, "# Report");
}

#[tokio::test]
async fn test_failed_results_download_shows_results_with_error() {
	let mut service = test::FakeResultsService::with_results(Ok(serde_json::json!({
		"status": "done",
		"comparison": [{ "Model": "A", "acc": 0.5 }],
	})));
	service.report = Err(automl_service::ServiceError::Transport("network down".to_owned()));
	let context = test_context(service);
	let (status, _, body) = get(&context, "/results/ds1/download").await;
	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert!(body.contains("Failed to download report: network down"));
	assert!(body.contains(r#"<td class="table-cell">0.5000</td>"#));
}

#[tokio::test]
async fn test_report_routes() {
	let context = test_context(test::FakeResultsService::with_report(Ok(test::report(
		"application/json",
		r##"{"error": false, "data": "# AutoML Report"}"##,
	))));
	let (status, _, body) = get(&context, "/report/ds1").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body.contains("# AutoML Report</pre>"));
	let (status, headers, body) = get(&context, "/report/ds1/download").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(headers[hyper::header::CONTENT_TYPE], "text/markdown");
	assert_eq!(body, "# AutoML Report");
}
