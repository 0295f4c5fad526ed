use crate::error::view_error;
use automl_app_common::{
	download::{download, report_filename, Downloader, ExportFile, OCTET_STREAM_MIME},
	error::ViewError,
};
use automl_service::{
	normalize::{report_bytes, training_run_from_value},
	ReportFormat, ResultsService, ServiceError, TrainingRun,
};

/// Training results for one dataset, and the version of them being shown.
///
/// Every fetch is issued under a [`LoadTicket`]. Only the newest ticket may change the view, so a slow response for an older request never overwrites a newer one.
#[derive(Debug)]
pub struct ResultsView {
	dataset_id: String,
	results: Option<TrainingRun>,
	loading: bool,
	error: Option<ViewError>,
	selected_version: Option<String>,
	generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
	generation: u64,
	version: Option<String>,
}

impl ResultsView {
	pub fn new(dataset_id: impl Into<String>) -> ResultsView {
		ResultsView {
			dataset_id: dataset_id.into(),
			results: None,
			loading: true,
			error: None,
			selected_version: None,
			generation: 0,
		}
	}

	pub fn dataset_id(&self) -> &str {
		&self.dataset_id
	}

	pub fn results(&self) -> Option<&TrainingRun> {
		self.results.as_ref()
	}

	pub fn loading(&self) -> bool {
		self.loading
	}

	pub fn error(&self) -> Option<&ViewError> {
		self.error.as_ref()
	}

	pub fn selected_version(&self) -> Option<&str> {
		self.selected_version.as_deref()
	}

	pub fn begin_load(&mut self, version: Option<&str>) -> LoadTicket {
		self.generation += 1;
		self.loading = true;
		LoadTicket {
			generation: self.generation,
			version: version.map(|version| version.to_owned()),
		}
	}

	/// Apply a response. Returns false and leaves the view untouched if a newer load has begun since `ticket` was issued.
	pub fn finish_load(
		&mut self,
		ticket: LoadTicket,
		response: Result<TrainingRun, ServiceError>,
	) -> bool {
		if ticket.generation != self.generation {
			tracing::debug!(
				dataset_id = %self.dataset_id,
				version = ?ticket.version,
				"ignoring stale results response"
			);
			return false;
		}
		self.loading = false;
		match response {
			Ok(run) => {
				// The service picks the version when none was requested.
				self.selected_version = ticket.version.filter(|version| run.has_version(version));
				self.results = Some(run);
				self.error = None;
			}
			Err(error) => {
				tracing::warn!(dataset_id = %self.dataset_id, %error, "failed to load results");
				self.error = Some(view_error(error));
			}
		}
		true
	}

	pub async fn load_results<S>(&mut self, service: &S, version: Option<&str>)
	where
		S: ResultsService + ?Sized,
	{
		let ticket = self.begin_load(version);
		let response = service
			.get_results(&self.dataset_id, version)
			.await
			.and_then(training_run_from_value);
		self.finish_load(ticket, response);
	}

	/// Load another version. The selector keeps showing the current version until the new results arrive.
	pub async fn select_version<S>(&mut self, service: &S, version: &str)
	where
		S: ResultsService + ?Sized,
	{
		self.load_results(service, Some(version)).await
	}

	/// Point the view at another dataset. Responses to requests issued before this call are ignored.
	pub fn retarget(&mut self, dataset_id: impl Into<String>) {
		self.dataset_id = dataset_id.into();
		self.generation += 1;
		self.results = None;
		self.error = None;
		self.selected_version = None;
		self.loading = true;
	}

	/// Fetch the report in `format` and hand it to `downloader` as `automl_report_<dataset_id>.<format>`. A failure is stored as a download error and the results stay as they are.
	pub async fn download_report<S, D>(
		&mut self,
		service: &S,
		downloader: &mut D,
		format: &ReportFormat,
	) where
		S: ResultsService + ?Sized,
		D: Downloader,
	{
		let file = match self.fetch_report(service, format).await {
			Ok(file) => file,
			Err(error) => {
				self.fail_download(error);
				return;
			}
		};
		match download(downloader, &file) {
			Ok(()) => {
				if self.error.as_ref().map(ViewError::is_download).unwrap_or(false) {
					self.error = None;
				}
			}
			Err(error) => self.fail_download(error),
		}
	}

	async fn fetch_report<S>(
		&self,
		service: &S,
		format: &ReportFormat,
	) -> Result<ExportFile, ServiceError>
	where
		S: ResultsService + ?Sized,
	{
		let payload = service.download_report(&self.dataset_id, format).await?;
		let mime = payload
			.content_type
			.clone()
			.filter(|content_type| !content_type.starts_with("application/json"))
			.unwrap_or_else(|| OCTET_STREAM_MIME.to_owned());
		let bytes = report_bytes(payload)?;
		Ok(ExportFile {
			filename: report_filename(&self.dataset_id, format.as_str()),
			mime,
			bytes,
		})
	}

	fn fail_download(&mut self, cause: impl std::fmt::Display) {
		let error = ViewError::download(cause);
		tracing::warn!(dataset_id = %self.dataset_id, %error, "report download failed");
		self.error = Some(error);
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test::{report, FakeResultsService, RecordingDownloader};
	use automl_app_common::download::AttachmentDownloader;
	use automl_service::TrainingStatus;
	use serde_json::json;

	fn done_run() -> serde_json::Value {
		json!({
			"status": "done",
			"versions": ["1700000000", "1700003600"],
			"comparison": [{ "Model": "A", "acc": 0.9123 }],
			"ranked": [{ "Model": "A", "Score": 0.9123 }],
		})
	}

	#[tokio::test]
	async fn test_load_results_unwraps_envelope() {
		let service = FakeResultsService::with_results(Ok(json!({ "error": false, "data": done_run() })));
		let mut view = ResultsView::new("ds1");
		assert!(view.loading());
		view.load_results(&service, None).await;
		assert!(!view.loading());
		assert!(view.error().is_none());
		let run = view.results().unwrap();
		assert_eq!(run.status, TrainingStatus::Done);
		assert_eq!(run.versions, vec!["1700000000", "1700003600"]);
		assert_eq!(view.selected_version(), None);
	}

	#[tokio::test]
	async fn test_error_envelope_is_no_results() {
		let service =
			FakeResultsService::with_results(Ok(json!({ "error": true, "data": done_run() })));
		let mut view = ResultsView::new("ds1");
		view.load_results(&service, None).await;
		assert!(view.results().is_none());
		assert_eq!(view.error().unwrap().message, "No results available");
	}

	#[tokio::test]
	async fn test_select_version_records_selection_on_success() {
		let service = FakeResultsService::with_results(Ok(done_run()));
		let mut view = ResultsView::new("ds1");
		view.load_results(&service, None).await;
		view.select_version(&service, "1700003600").await;
		assert_eq!(view.selected_version(), Some("1700003600"));
		assert_eq!(
			service.requests(),
			vec!["results ds1 None", "results ds1 Some(\"1700003600\")"]
		);
	}

	#[tokio::test]
	async fn test_failed_reload_keeps_previous_results_and_selection() {
		let mut view = ResultsView::new("ds1");
		view.load_results(&FakeResultsService::with_results(Ok(done_run())), Some("1700000000"))
			.await;
		let failing = FakeResultsService::with_results(Err(ServiceError::Transport(
			"network down".to_owned(),
		)));
		view.select_version(&failing, "1700003600").await;
		assert_eq!(view.error().unwrap().message, "network down");
		assert_eq!(view.selected_version(), Some("1700000000"));
		assert!(view.results().is_some());
	}

	#[test]
	fn test_stale_response_is_ignored() {
		let mut view = ResultsView::new("ds1");
		let first = view.begin_load(Some("1700000000"));
		let second = view.begin_load(Some("1700003600"));
		let run: TrainingRun = serde_json::from_value(done_run()).unwrap();
		// The newer request resolves first.
		assert!(view.finish_load(second, Ok(run.clone())));
		assert!(!view.finish_load(first, Err(ServiceError::NoResults)));
		assert!(view.error().is_none());
		assert_eq!(view.selected_version(), Some("1700003600"));
	}

	#[test]
	fn test_retarget_invalidates_in_flight_requests() {
		let mut view = ResultsView::new("ds1");
		let ticket = view.begin_load(None);
		view.retarget("ds2");
		let run: TrainingRun = serde_json::from_value(done_run()).unwrap();
		assert!(!view.finish_load(ticket, Ok(run)));
		assert_eq!(view.dataset_id(), "ds2");
		assert!(view.loading());
		assert!(view.results().is_none());
	}

	#[test]
	fn test_unknown_version_is_not_selected() {
		let mut view = ResultsView::new("ds1");
		let ticket = view.begin_load(Some("42"));
		let run: TrainingRun = serde_json::from_value(done_run()).unwrap();
		view.finish_load(ticket, Ok(run));
		assert_eq!(view.selected_version(), None);
	}

	#[tokio::test]
	async fn test_download_report_uses_format_as_extension() {
		let service = FakeResultsService::with_report(Ok(report("text/markdown", "# Report")));
		let mut view = ResultsView::new("ds1");
		let mut downloader = AttachmentDownloader::new();
		view.download_report(&service, &mut downloader, &ReportFormat::markdown())
			.await;
		assert!(view.error().is_none());
		assert_eq!(downloader.live_urls(), 0);
		let file = downloader.into_attachment().unwrap();
		assert_eq!(file.filename, "automl_report_ds1.markdown");
		assert_eq!(file.mime, "text/markdown");
		assert_eq!(file.bytes, b"# Report".to_vec());
	}

	#[tokio::test]
	async fn test_download_report_accepts_wrapped_payload() {
		let service = FakeResultsService::with_report(Ok(report(
			"application/json",
			r##"{"data": "# Wrapped"}"##,
		)));
		let mut view = ResultsView::new("ds1");
		let mut downloader = AttachmentDownloader::new();
		view.download_report(&service, &mut downloader, &ReportFormat::new("md"))
			.await;
		let file = downloader.into_attachment().unwrap();
		assert_eq!(file.filename, "automl_report_ds1.md");
		assert_eq!(file.mime, OCTET_STREAM_MIME);
		assert_eq!(file.bytes, b"# Wrapped".to_vec());
	}

	#[tokio::test]
	async fn test_download_failure_keeps_results() {
		let mut service = FakeResultsService::with_results(Ok(done_run()));
		service.report = Err(ServiceError::Transport("network down".to_owned()));
		let mut view = ResultsView::new("ds1");
		view.load_results(&service, None).await;
		let mut downloader = AttachmentDownloader::new();
		view.download_report(&service, &mut downloader, &ReportFormat::markdown())
			.await;
		let error = view.error().unwrap();
		assert!(error.is_download());
		assert_eq!(error.message, "Failed to download report: network down");
		assert!(view.results().is_some());
		assert!(downloader.attachment().is_none());
	}

	#[tokio::test]
	async fn test_failed_click_releases_object_url() {
		let service = FakeResultsService::with_report(Ok(report("text/markdown", "# Report")));
		let mut view = ResultsView::new("ds1");
		let mut downloader = RecordingDownloader::failing();
		view.download_report(&service, &mut downloader, &ReportFormat::markdown())
			.await;
		assert_eq!(
			view.error().unwrap().message,
			"Failed to download report: click blocked"
		);
		assert_eq!(downloader.live_urls(), 0);
	}
}
