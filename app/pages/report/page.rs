use super::view::ReportView;
use automl_app_common::element_ids::{REPORT_DOWNLOAD_BUTTON_ID, REPORT_PANEL_ID};
use automl_ui as ui;
use html::{html, Node};

impl ReportView {
	pub fn render(&self) -> Node {
		if self.loading() {
			return html! {
				<ui::Loading>"Generating report..."</ui::Loading>
			};
		}
		let download_error = match self.error() {
			Some(error) if error.is_download() => Some(html! {
				<ui::Alert>{error.message.clone()}</ui::Alert>
			}),
			Some(error) => {
				return html! {
					<ui::Alert>{error.message.clone()}</ui::Alert>
				}
			}
			None => None,
		};
		let download_href = format!(
			"{}/download",
			crate::pages::dataset_href("report", self.dataset_id())
		);
		html! {
			<ui::S1>
				<ui::H1>"AutoML Report"</ui::H1>
				{download_error}
				<ui::ButtonRow>
					<ui::Button
						button_type={ui::ButtonType::Button}
						href={Some(download_href)}
						id={Some(REPORT_DOWNLOAD_BUTTON_ID.to_owned())}
					>
						"Download Report"
					</ui::Button>
				</ui::ButtonRow>
				<ui::CodePanel
					id={Some(REPORT_PANEL_ID.to_owned())}
					max_height={Some("600px".to_owned())}
				>
					{self.report().to_owned()}
				</ui::CodePanel>
			</ui::S1>
		}
	}
}
