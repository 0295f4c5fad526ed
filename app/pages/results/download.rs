use super::view::ResultsView;
use crate::{response, Context};
use automl_app_common::download::AttachmentDownloader;
use automl_service::ReportFormat;
use hyper::{Body, Request, Response, StatusCode};
use std::collections::BTreeMap;

/// Download the report from the results page. If the download fails, the results page is shown again with the error above the results.
pub async fn get(
	context: &Context,
	request: Request<Body>,
	dataset_id: &str,
	search_params: Option<BTreeMap<String, String>>,
) -> anyhow::Result<Response<Body>> {
	let search_param = |name: &str| {
		search_params
			.as_ref()
			.and_then(|search_params| search_params.get(name))
			.filter(|value| !value.is_empty())
			.map(|value| value.as_str())
	};
	let format = search_param("format")
		.map(ReportFormat::new)
		.unwrap_or_default();
	let mut view = ResultsView::new(dataset_id);
	view.load_results(context.service.as_ref(), search_param("version"))
		.await;
	let mut downloader = AttachmentDownloader::new();
	view.download_report(context.service.as_ref(), &mut downloader, &format)
		.await;
	match downloader.into_attachment() {
		Some(file) => response::attachment(file),
		None => super::get::render(context, &request, &view, StatusCode::BAD_GATEWAY),
	}
}
