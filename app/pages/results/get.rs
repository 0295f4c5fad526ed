use super::view::ResultsView;
use crate::{
	layouts::document::{Document, PageInfo},
	response, Context,
};
use automl_app_common::timezone::get_timezone;
use html::html;
use hyper::{Body, Request, Response, StatusCode};
use std::collections::BTreeMap;

pub async fn get(
	context: &Context,
	request: Request<Body>,
	dataset_id: &str,
	search_params: Option<BTreeMap<String, String>>,
) -> anyhow::Result<Response<Body>> {
	let version = search_params
		.as_ref()
		.and_then(|search_params| search_params.get("version"))
		.filter(|version| !version.is_empty());
	let mut view = ResultsView::new(dataset_id);
	view.load_results(context.service.as_ref(), version.map(|v| v.as_str()))
		.await;
	let status = if view.error().is_some() {
		StatusCode::BAD_GATEWAY
	} else {
		StatusCode::OK
	};
	render(context, &request, &view, status)
}

/// Render `view` as a full page, in the timezone the request's cookie names.
pub fn render(
	context: &Context,
	request: &Request<Body>,
	view: &ResultsView,
	status: StatusCode,
) -> anyhow::Result<Response<Body>> {
	let timezone = get_timezone(request.headers());
	let page_info = PageInfo {
		title: format!("Results for {}", view.dataset_id()),
		client_js_src: context.client_js_src(),
	};
	let document = html! {
		<Document page_info={page_info}>
			{view.render(timezone)}
		</Document>
	};
	response::page(status, document)
}
