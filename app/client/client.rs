use automl_app_common::{
	download::{download, report_filename, Downloader, ExportFile, MARKDOWN_MIME},
	element_ids::{REPORT_DOWNLOAD_BUTTON_ID, REPORT_PANEL_ID, VERSION_SELECT_ID},
	error::ViewError,
};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
	let document = match web_sys::window().and_then(|window| window.document()) {
		Some(document) => document,
		None => return,
	};
	if let Some(select_element) = document.get_element_by_id(VERSION_SELECT_ID) {
		select_field_submit_on_change(&select_element);
	}
	if let Some(button) = document.get_element_by_id(REPORT_DOWNLOAD_BUTTON_ID) {
		if document.get_element_by_id(REPORT_PANEL_ID).is_some() {
			boot_report_download(&button, document.clone());
		}
	}
}

/// Submit the version form as soon as another version is picked.
fn select_field_submit_on_change(select_element: &web_sys::Element) {
	let callback_fn = Closure::<dyn Fn(_)>::wrap(Box::new(move |event: web_sys::Event| {
		let form = event
			.current_target()
			.and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
			.and_then(|element| element.closest("form").ok().flatten())
			.and_then(|form| form.dyn_into::<web_sys::HtmlFormElement>().ok());
		if let Some(form) = form {
			form.submit().ok();
		}
	}));
	if let Some(select_element) = select_element.dyn_ref::<web_sys::HtmlSelectElement>() {
		select_element
			.add_event_listener_with_callback("change", callback_fn.as_ref().unchecked_ref())
			.ok();
	}
	callback_fn.forget();
}

/// Download the report shown in the panel without fetching it again.
fn boot_report_download(button: &web_sys::Element, document: web_sys::Document) {
	let callback_fn = Closure::<dyn Fn(_)>::wrap(Box::new(move |event: web_sys::Event| {
		let (report, pathname) = match (
			document.get_element_by_id(REPORT_PANEL_ID),
			document.location().and_then(|location| location.pathname().ok()),
		) {
			(Some(panel), Some(pathname)) => (panel.text_content().unwrap_or_default(), pathname),
			// Leave the link to the server download in place.
			_ => return,
		};
		let dataset_id = match dataset_id_from_path(&pathname)
			.and_then(|dataset_id| js_sys::decode_uri_component(dataset_id).ok())
		{
			Some(dataset_id) => String::from(dataset_id),
			None => return,
		};
		event.prevent_default();
		let file = ExportFile {
			filename: report_filename(&dataset_id, "md"),
			mime: MARKDOWN_MIME.to_owned(),
			bytes: report.into_bytes(),
		};
		let mut downloader = BrowserDownloader::new(document.clone());
		if let Err(error) = download(&mut downloader, &file) {
			let error = ViewError::download(error);
			web_sys::console::error_1(&error.to_string().into());
			if let Some(window) = web_sys::window() {
				window.alert_with_message(&error.to_string()).ok();
			}
		}
	}));
	button
		.add_event_listener_with_callback("click", callback_fn.as_ref().unchecked_ref())
		.ok();
	callback_fn.forget();
}

/// The still-encoded dataset id in a `/report/{dataset_id}` path.
fn dataset_id_from_path(pathname: &str) -> Option<&str> {
	let dataset_id = pathname.strip_prefix("/report/")?;
	let dataset_id = dataset_id.trim_end_matches('/');
	if dataset_id.is_empty() || dataset_id.contains('/') {
		None
	} else {
		Some(dataset_id)
	}
}

/// Downloads through a blob object URL and a hidden `<a download>` element.
pub struct BrowserDownloader {
	document: web_sys::Document,
}

impl BrowserDownloader {
	pub fn new(document: web_sys::Document) -> BrowserDownloader {
		BrowserDownloader { document }
	}
}

impl Downloader for BrowserDownloader {
	type Url = String;
	type Error = String;

	fn create_object_url(&mut self, file: &ExportFile) -> Result<String, String> {
		let array = js_sys::Uint8Array::from(file.bytes.as_slice());
		let parts = js_sys::Array::new();
		parts.push(&array.buffer());
		let options = BlobPropertyBag::new();
		options.set_type(&file.mime);
		let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
			.map_err(|error| js_error("failed to create blob", error))?;
		Url::create_object_url_with_blob(&blob)
			.map_err(|error| js_error("failed to create object url", error))
	}

	fn click(&mut self, url: &String, filename: &str) -> Result<(), String> {
		let anchor: HtmlAnchorElement = self
			.document
			.create_element("a")
			.map_err(|error| js_error("failed to create anchor", error))?
			.dyn_into()
			.map_err(|_| "created element is not an anchor".to_owned())?;
		anchor.set_href(url);
		anchor.set_download(filename);
		anchor.style().set_property("display", "none").ok();
		let body = self
			.document
			.body()
			.ok_or_else(|| "document has no body".to_owned())?;
		body.append_child(&anchor)
			.map_err(|error| js_error("failed to attach anchor", error))?;
		anchor.click();
		anchor.remove();
		Ok(())
	}

	fn revoke_object_url(&mut self, url: String) {
		Url::revoke_object_url(&url).ok();
	}
}

fn js_error(context: &str, error: JsValue) -> String {
	match error.as_string() {
		Some(message) => format!("{}: {}", context, message),
		None => context.to_owned(),
	}
}

#[test]
fn test_dataset_id_from_path() {
	assert_eq!(dataset_id_from_path("/report/ds1"), Some("ds1"));
	assert_eq!(dataset_id_from_path("/report/my%20data/"), Some("my%20data"));
	assert_eq!(dataset_id_from_path("/report/"), None);
	assert_eq!(dataset_id_from_path("/results/ds1"), None);
	assert_eq!(dataset_id_from_path("/report/ds1/download"), None);
}
