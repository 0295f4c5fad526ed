use super::view::ReportView;
use crate::{
	layouts::document::{Document, PageInfo},
	response, Context,
};
use html::html;
use hyper::{Body, Request, Response, StatusCode};

pub async fn get(
	context: &Context,
	_request: Request<Body>,
	dataset_id: &str,
) -> anyhow::Result<Response<Body>> {
	let mut view = ReportView::new(dataset_id);
	view.load_report(context.service.as_ref()).await;
	let status = if view.error().is_some() {
		StatusCode::BAD_GATEWAY
	} else {
		StatusCode::OK
	};
	render(context, &view, status)
}

pub fn render(
	context: &Context,
	view: &ReportView,
	status: StatusCode,
) -> anyhow::Result<Response<Body>> {
	let page_info = PageInfo {
		title: format!("AutoML Report for {}", view.dataset_id()),
		client_js_src: context.client_js_src(),
	};
	let document = html! {
		<Document page_info={page_info}>
			{view.render()}
		</Document>
	};
	response::page(status, document)
}
