use super::view::ReportView;
use crate::{response, Context};
use automl_app_common::download::AttachmentDownloader;
use hyper::{Body, Request, Response, StatusCode};

/// Download the report without the browser client. The report is fetched again because nothing is kept between requests.
pub async fn get(
	context: &Context,
	_request: Request<Body>,
	dataset_id: &str,
) -> anyhow::Result<Response<Body>> {
	let mut view = ReportView::new(dataset_id);
	view.load_report(context.service.as_ref()).await;
	if view.error().is_some() {
		return super::get::render(context, &view, StatusCode::BAD_GATEWAY);
	}
	let mut downloader = AttachmentDownloader::new();
	view.download_report(&mut downloader);
	match downloader.into_attachment() {
		Some(file) => response::attachment(file),
		None => super::get::render(context, &view, StatusCode::BAD_GATEWAY),
	}
}
