//! Exporting data as a file the user downloads.
//!
//! A download needs a temporary object URL pointing at the file's bytes. The URL is a resource owned by the host (the browser, or the server building an attachment) and must be released once the synthesized click has happened, whether or not the click succeeded. [`ObjectUrl`] ties that release to scope, so every path after creation releases it.

use derive_more::Display;
use std::collections::BTreeMap;

pub const MARKDOWN_MIME: &str = "text/markdown";
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
	pub filename: String,
	pub mime: String,
	pub bytes: Vec<u8>,
}

/// `automl_report_<dataset_id>.<extension>`. The extension is used verbatim.
pub fn report_filename(dataset_id: &str, extension: &str) -> String {
	format!("automl_report_{}.{}", dataset_id, extension)
}

/// The host operations behind a download.
pub trait Downloader {
	type Url;
	type Error: std::fmt::Display;
	fn create_object_url(&mut self, file: &ExportFile) -> Result<Self::Url, Self::Error>;
	fn click(&mut self, url: &Self::Url, filename: &str) -> Result<(), Self::Error>;
	fn revoke_object_url(&mut self, url: Self::Url);
}

/// An object URL that is revoked when dropped.
pub struct ObjectUrl<'a, D>
where
	D: Downloader,
{
	downloader: &'a mut D,
	url: Option<D::Url>,
}

impl<'a, D> ObjectUrl<'a, D>
where
	D: Downloader,
{
	pub fn create(downloader: &'a mut D, file: &ExportFile) -> Result<ObjectUrl<'a, D>, D::Error> {
		let url = downloader.create_object_url(file)?;
		Ok(ObjectUrl {
			downloader,
			url: Some(url),
		})
	}

	pub fn click(&mut self, filename: &str) -> Result<(), D::Error> {
		match &self.url {
			Some(url) => self.downloader.click(url, filename),
			None => Ok(()),
		}
	}
}

impl<'a, D> Drop for ObjectUrl<'a, D>
where
	D: Downloader,
{
	fn drop(&mut self) {
		if let Some(url) = self.url.take() {
			self.downloader.revoke_object_url(url);
		}
	}
}

/// Acquire an object URL for `file`, click it, and release it.
pub fn download<D>(downloader: &mut D, file: &ExportFile) -> Result<(), D::Error>
where
	D: Downloader,
{
	let mut url = ObjectUrl::create(downloader, file)?;
	url.click(&file.filename)
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display(fmt = "object url {} is not live", _0)]
pub struct StaleObjectUrl(pub u64);

/// Downloads for a server-rendered page. An object URL is a slot holding the file, and clicking it selects the file as the response attachment.
#[derive(Debug, Default)]
pub struct AttachmentDownloader {
	next_url: u64,
	live: BTreeMap<u64, ExportFile>,
	attachment: Option<ExportFile>,
}

impl AttachmentDownloader {
	pub fn new() -> AttachmentDownloader {
		AttachmentDownloader::default()
	}

	/// The number of object URLs created but not yet revoked.
	pub fn live_urls(&self) -> usize {
		self.live.len()
	}

	pub fn attachment(&self) -> Option<&ExportFile> {
		self.attachment.as_ref()
	}

	pub fn into_attachment(self) -> Option<ExportFile> {
		self.attachment
	}
}

impl Downloader for AttachmentDownloader {
	type Url = u64;
	type Error = StaleObjectUrl;

	fn create_object_url(&mut self, file: &ExportFile) -> Result<u64, StaleObjectUrl> {
		let url = self.next_url;
		self.next_url += 1;
		self.live.insert(url, file.clone());
		Ok(url)
	}

	fn click(&mut self, url: &u64, filename: &str) -> Result<(), StaleObjectUrl> {
		let file = self.live.get(url).ok_or(StaleObjectUrl(*url))?;
		self.attachment = Some(ExportFile {
			filename: filename.to_owned(),
			..file.clone()
		});
		Ok(())
	}

	fn revoke_object_url(&mut self, url: u64) {
		self.live.remove(&url);
	}
}

#[cfg(test)]
mod test {
	use super::*;

	/// Records every host call, and fails clicks on request.
	#[derive(Default)]
	struct RecordingDownloader {
		fail_click: bool,
		calls: Vec<String>,
	}

	impl Downloader for RecordingDownloader {
		type Url = String;
		type Error = String;

		fn create_object_url(&mut self, file: &ExportFile) -> Result<String, String> {
			self.calls.push(format!("create {}", file.filename));
			Ok("blob:1".to_owned())
		}

		fn click(&mut self, url: &String, filename: &str) -> Result<(), String> {
			self.calls.push(format!("click {} {}", url, filename));
			if self.fail_click {
				Err("click blocked".to_owned())
			} else {
				Ok(())
			}
		}

		fn revoke_object_url(&mut self, url: String) {
			self.calls.push(format!("revoke {}", url));
		}
	}

	fn file() -> ExportFile {
		ExportFile {
			filename: report_filename("ds1", "markdown"),
			mime: MARKDOWN_MIME.to_owned(),
			bytes: b"# Report".to_vec(),
		}
	}

	#[test]
	fn test_report_filename_uses_extension_verbatim() {
		assert_eq!(report_filename("ds1", "markdown"), "automl_report_ds1.markdown");
		assert_eq!(report_filename("ds1", "md"), "automl_report_ds1.md");
	}

	#[test]
	fn test_url_is_revoked_after_click() {
		let mut downloader = RecordingDownloader::default();
		download(&mut downloader, &file()).unwrap();
		assert_eq!(
			downloader.calls,
			vec![
				"create automl_report_ds1.markdown",
				"click blob:1 automl_report_ds1.markdown",
				"revoke blob:1",
			]
		);
	}

	#[test]
	fn test_url_is_revoked_when_click_fails() {
		let mut downloader = RecordingDownloader {
			fail_click: true,
			..Default::default()
		};
		let result = download(&mut downloader, &file());
		assert_eq!(result, Err("click blocked".to_owned()));
		assert_eq!(downloader.calls.last().map(String::as_str), Some("revoke blob:1"));
	}

	#[test]
	fn test_attachment_downloader() {
		let mut downloader = AttachmentDownloader::new();
		download(&mut downloader, &file()).unwrap();
		assert_eq!(downloader.live_urls(), 0);
		let attachment = downloader.into_attachment().unwrap();
		assert_eq!(attachment.filename, "automl_report_ds1.markdown");
		assert_eq!(attachment.bytes, b"# Report".to_vec());
	}

	#[test]
	fn test_attachment_downloader_rejects_revoked_url() {
		let mut downloader = AttachmentDownloader::new();
		let url = downloader.create_object_url(&file()).unwrap();
		downloader.revoke_object_url(url);
		assert_eq!(downloader.click(&url, "x"), Err(StaleObjectUrl(url)));
	}
}
