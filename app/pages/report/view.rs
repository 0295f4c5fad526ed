use crate::error::view_error;
use automl_app_common::{
	download::{download, report_filename, Downloader, ExportFile, MARKDOWN_MIME},
	error::ViewError,
};
use automl_service::{normalize::report_bytes, ReportFormat, ResultsService};

/// The generated markdown report for one dataset.
#[derive(Debug)]
pub struct ReportView {
	dataset_id: String,
	report: String,
	loading: bool,
	error: Option<ViewError>,
}

impl ReportView {
	pub fn new(dataset_id: impl Into<String>) -> ReportView {
		ReportView {
			dataset_id: dataset_id.into(),
			report: String::new(),
			loading: true,
			error: None,
		}
	}

	pub fn dataset_id(&self) -> &str {
		&self.dataset_id
	}

	pub fn report(&self) -> &str {
		&self.report
	}

	pub fn loading(&self) -> bool {
		self.loading
	}

	pub fn error(&self) -> Option<&ViewError> {
		self.error.as_ref()
	}

	pub async fn load_report<S>(&mut self, service: &S)
	where
		S: ResultsService + ?Sized,
	{
		self.loading = true;
		let response = service
			.download_report(&self.dataset_id, &ReportFormat::markdown())
			.await
			.and_then(report_bytes);
		self.loading = false;
		match response {
			Ok(bytes) => {
				self.report = String::from_utf8_lossy(&bytes).into_owned();
				self.error = None;
			}
			Err(error) => {
				tracing::warn!(dataset_id = %self.dataset_id, %error, "failed to load report");
				self.error = Some(view_error(error));
			}
		}
	}

	/// Hand the loaded report to `downloader` as `automl_report_<dataset_id>.md`.
	pub fn download_report<D>(&mut self, downloader: &mut D)
	where
		D: Downloader,
	{
		let file = ExportFile {
			filename: report_filename(&self.dataset_id, "md"),
			mime: MARKDOWN_MIME.to_owned(),
			bytes: self.report.as_bytes().to_vec(),
		};
		match download(downloader, &file) {
			Ok(()) => {
				if self.error.as_ref().map(ViewError::is_download).unwrap_or(false) {
					self.error = None;
				}
			}
			Err(error) => {
				let error = ViewError::download(error);
				tracing::warn!(dataset_id = %self.dataset_id, %error, "report download failed");
				self.error = Some(error);
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test::{report, FakeResultsService, RecordingDownloader};
	use automl_app_common::{download::AttachmentDownloader, error::ViewErrorKind};
	use automl_service::ServiceError;

	#[tokio::test]
	async fn test_load_report_requests_markdown() {
		let service = FakeResultsService::with_report(Ok(report("text/markdown", "# AutoML Report\n")));
		let mut view = ReportView::new("ds1");
		assert!(view.loading());
		view.load_report(&service).await;
		assert!(!view.loading());
		assert_eq!(view.report(), "# AutoML Report\n");
		assert_eq!(service.requests(), vec!["report ds1 markdown"]);
	}

	#[tokio::test]
	async fn test_load_report_decodes_invalid_utf8_lossily() {
		let service = FakeResultsService::with_report(Ok(automl_service::ReportPayload {
			content_type: None,
			bytes: vec![b'a', 0xff, b'b'],
		}));
		let mut view = ReportView::new("ds1");
		view.load_report(&service).await;
		assert_eq!(view.report(), "a\u{fffd}b");
	}

	#[tokio::test]
	async fn test_load_report_failure() {
		let service =
			FakeResultsService::with_report(Err(ServiceError::Transport("network down".to_owned())));
		let mut view = ReportView::new("ds1");
		view.load_report(&service).await;
		assert!(!view.loading());
		let error = view.error().unwrap();
		assert_eq!(error.kind, ViewErrorKind::Transport);
		assert_eq!(error.message, "network down");
	}

	#[tokio::test]
	async fn test_download_report_names_file_md() {
		let service = FakeResultsService::with_report(Ok(report("text/markdown", "# Report\n\n  body")));
		let mut view = ReportView::new("ds1");
		view.load_report(&service).await;
		let mut downloader = AttachmentDownloader::new();
		view.download_report(&mut downloader);
		let file = downloader.into_attachment().unwrap();
		assert_eq!(file.filename, "automl_report_ds1.md");
		assert_eq!(file.mime, "text/markdown");
		assert_eq!(file.bytes, b"# Report\n\n  body".to_vec());
		assert_eq!(service.requests().len(), 1);
	}

	#[test]
	fn test_download_failure_releases_url_and_keeps_report() {
		let mut view = ReportView::new("ds1");
		view.report = "# Report".to_owned();
		let mut downloader = RecordingDownloader::failing();
		view.download_report(&mut downloader);
		assert_eq!(downloader.live_urls(), 0);
		assert!(downloader.clicked.is_empty());
		assert_eq!(
			view.error().unwrap().message,
			"Failed to download report: click blocked"
		);
		assert_eq!(view.report(), "# Report");
	}
}
