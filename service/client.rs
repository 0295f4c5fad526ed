use crate::{
	error::ServiceError,
	types::{ReportFormat, ReportPayload},
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// The request/response surface of the Results Service.
///
/// Responses are returned exactly as the service sent them; callers normalize them with the functions in [`crate::normalize`].
#[async_trait]
pub trait ResultsService: Send + Sync {
	/// Fetch the training results for a dataset, pinned to `version` when one is given.
	async fn get_results(
		&self,
		dataset_id: &str,
		version: Option<&str>,
	) -> Result<Value, ServiceError>;

	/// Fetch the rendered report for a dataset in the given format.
	async fn download_report(
		&self,
		dataset_id: &str,
		format: &ReportFormat,
	) -> Result<ReportPayload, ServiceError>;
}

/// [`ResultsService`] over HTTP.
///
/// Results live at `{base}/results/{dataset_id}` and reports at `{base}/report/{dataset_id}`.
#[derive(Clone, Debug)]
pub struct HttpResultsService {
	base_url: Url,
	client: reqwest::Client,
}

impl HttpResultsService {
	pub fn new(base_url: Url) -> HttpResultsService {
		HttpResultsService {
			base_url,
			client: reqwest::Client::new(),
		}
	}

	/// Like [`HttpResultsService::new`], but every request is abandoned after `timeout`.
	pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<HttpResultsService, ServiceError> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(HttpResultsService { base_url, client })
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn endpoint(&self, resource: &str, dataset_id: &str) -> Result<Url, ServiceError> {
		if is_dot_segment(dataset_id) {
			return Err(ServiceError::InvalidDatasetId(dataset_id.to_owned()));
		}
		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| {
				ServiceError::Transport(format!("{} cannot be used as a base url", self.base_url))
			})?
			.pop_if_empty()
			.extend(&[resource, dataset_id]);
		Ok(url)
	}
}

/// `.` and `..` are resolved away by every URL parser, even when percent-encoded, so no path can carry them as a dataset id.
pub fn is_dot_segment(segment: &str) -> bool {
	matches!(segment, "." | "..")
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}
	let body = response.text().await.unwrap_or_default();
	Err(ServiceError::Status {
		status: status.as_u16(),
		body,
	})
}

#[async_trait]
impl ResultsService for HttpResultsService {
	async fn get_results(
		&self,
		dataset_id: &str,
		version: Option<&str>,
	) -> Result<Value, ServiceError> {
		let mut url = self.endpoint("results", dataset_id)?;
		if let Some(version) = version {
			url.query_pairs_mut().append_pair("version", version);
		}
		tracing::debug!(dataset_id, ?version, "fetching results");
		let response = self.client.get(url).send().await?;
		let response = check_status(response).await?;
		let value = response.json::<Value>().await?;
		Ok(value)
	}

	async fn download_report(
		&self,
		dataset_id: &str,
		format: &ReportFormat,
	) -> Result<ReportPayload, ServiceError> {
		let mut url = self.endpoint("report", dataset_id)?;
		url.query_pairs_mut().append_pair("format", format.as_str());
		tracing::debug!(dataset_id, %format, "fetching report");
		let response = self.client.get(url).send().await?;
		let response = check_status(response).await?;
		let content_type = response
			.headers()
			.get(reqwest::header::CONTENT_TYPE)
			.and_then(|content_type| content_type.to_str().ok())
			.map(|content_type| content_type.to_owned());
		let bytes = response.bytes().await?.to_vec();
		Ok(ReportPayload {
			content_type,
			bytes,
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use mockito::Matcher;

	fn service(server: &mockito::Server) -> HttpResultsService {
		let base_url = format!("{}/api", server.url()).parse().unwrap();
		HttpResultsService::new(base_url)
	}

	#[test]
	fn test_endpoint_encodes_dataset_id_as_one_segment() {
		let service = HttpResultsService::new("http://localhost:5000/api/".parse().unwrap());
		let url = service.endpoint("results", "my data/1").unwrap();
		assert_eq!(url.as_str(), "http://localhost:5000/api/results/my%20data%2F1");
		let url = service.endpoint("report", "v1.2").unwrap();
		assert_eq!(url.as_str(), "http://localhost:5000/api/report/v1.2");
	}

	#[tokio::test]
	async fn test_dot_dataset_ids_are_refused() {
		let service = HttpResultsService::new("http://localhost:5000/api".parse().unwrap());
		for dataset_id in &[".", ".."] {
			assert_eq!(
				service.endpoint("results", dataset_id),
				Err(ServiceError::InvalidDatasetId(dataset_id.to_string()))
			);
			let error = service.get_results(dataset_id, None).await.unwrap_err();
			assert_eq!(error, ServiceError::InvalidDatasetId(dataset_id.to_string()));
			let error = service
				.download_report(dataset_id, &ReportFormat::markdown())
				.await
				.unwrap_err();
			assert_eq!(error, ServiceError::InvalidDatasetId(dataset_id.to_string()));
		}
	}

	#[tokio::test]
	async fn test_get_results_pinned_to_version() {
		let mut server = mockito::Server::new_async().await;
		let mock = server
			.mock("GET", "/api/results/ds1")
			.match_query(Matcher::UrlEncoded(
				"version".to_owned(),
				"1700003600".to_owned(),
			))
			.with_status(200)
			.with_header("content-type", "application/json")
			.with_body(r#"{"error": false, "data": {"status": "done"}}"#)
			.create_async()
			.await;
		let value = service(&server)
			.get_results("ds1", Some("1700003600"))
			.await
			.unwrap();
		mock.assert_async().await;
		assert_eq!(value["data"]["status"], "done");
	}

	#[tokio::test]
	async fn test_get_results_non_success_status() {
		let mut server = mockito::Server::new_async().await;
		let _mock = server
			.mock("GET", "/api/results/missing")
			.match_query(Matcher::Any)
			.with_status(404)
			.with_body("unknown dataset")
			.create_async()
			.await;
		let error = service(&server)
			.get_results("missing", None)
			.await
			.unwrap_err();
		assert_eq!(
			error,
			ServiceError::Status {
				status: 404,
				body: "unknown dataset".to_owned(),
			}
		);
	}

	#[tokio::test]
	async fn test_get_results_transport_failure() {
		// Nothing listens on port 1.
		let service = HttpResultsService::new("http://127.0.0.1:1/api".parse().unwrap());
		let error = service.get_results("ds1", None).await.unwrap_err();
		assert!(matches!(error, ServiceError::Transport(_)));
	}

	#[tokio::test]
	async fn test_download_report_keeps_content_type() {
		let mut server = mockito::Server::new_async().await;
		let _mock = server
			.mock("GET", "/api/report/ds1")
			.match_query(Matcher::UrlEncoded(
				"format".to_owned(),
				"markdown".to_owned(),
			))
			.with_status(200)
			.with_header("content-type", "text/markdown")
			.with_body("# AutoML Report\n")
			.create_async()
			.await;
		let payload = service(&server)
			.download_report("ds1", &ReportFormat::markdown())
			.await
			.unwrap();
		assert_eq!(payload.content_type.as_deref(), Some("text/markdown"));
		assert_eq!(payload.bytes, b"# AutoML Report\n".to_vec());
	}
}
