use async_trait::async_trait;
use automl_app_common::download::{Downloader, ExportFile};
use automl_service::{ReportFormat, ReportPayload, ResultsService, ServiceError};
use serde_json::Value;
use std::{collections::BTreeSet, sync::Mutex};

/// A results service answering every request with canned responses.
pub struct FakeResultsService {
	pub results: Result<Value, ServiceError>,
	pub report: Result<ReportPayload, ServiceError>,
	requests: Mutex<Vec<String>>,
}

impl FakeResultsService {
	pub fn with_results(results: Result<Value, ServiceError>) -> FakeResultsService {
		FakeResultsService {
			results,
			report: Err(ServiceError::NoResults),
			requests: Mutex::new(Vec::new()),
		}
	}

	pub fn with_report(report: Result<ReportPayload, ServiceError>) -> FakeResultsService {
		FakeResultsService {
			results: Err(ServiceError::NoResults),
			report,
			requests: Mutex::new(Vec::new()),
		}
	}

	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl ResultsService for FakeResultsService {
	async fn get_results(
		&self,
		dataset_id: &str,
		version: Option<&str>,
	) -> Result<Value, ServiceError> {
		self.requests
			.lock()
			.unwrap()
			.push(format!("results {} {:?}", dataset_id, version));
		self.results.clone()
	}

	async fn download_report(
		&self,
		dataset_id: &str,
		format: &ReportFormat,
	) -> Result<ReportPayload, ServiceError> {
		self.requests
			.lock()
			.unwrap()
			.push(format!("report {} {}", dataset_id, format));
		self.report.clone()
	}
}

pub fn report(content_type: &str, body: &str) -> ReportPayload {
	ReportPayload {
		content_type: Some(content_type.to_owned()),
		bytes: body.as_bytes().to_vec(),
	}
}

/// A downloader that tracks live object URLs and can refuse every click.
#[derive(Default)]
pub struct RecordingDownloader {
	fail_click: bool,
	next_url: u64,
	live: BTreeSet<u64>,
	pub clicked: Vec<ExportFile>,
}

impl RecordingDownloader {
	pub fn failing() -> RecordingDownloader {
		RecordingDownloader {
			fail_click: true,
			..Default::default()
		}
	}

	pub fn live_urls(&self) -> usize {
		self.live.len()
	}
}

impl Downloader for RecordingDownloader {
	type Url = (u64, ExportFile);
	type Error = String;

	fn create_object_url(&mut self, file: &ExportFile) -> Result<Self::Url, String> {
		let url = self.next_url;
		self.next_url += 1;
		self.live.insert(url);
		Ok((url, file.clone()))
	}

	fn click(&mut self, url: &Self::Url, _filename: &str) -> Result<(), String> {
		if self.fail_click {
			return Err("click blocked".to_owned());
		}
		self.clicked.push(url.1.clone());
		Ok(())
	}

	fn revoke_object_url(&mut self, url: Self::Url) {
		self.live.remove(&url.0);
	}
}
