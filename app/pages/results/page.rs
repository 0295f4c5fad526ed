use super::view::ResultsView;
use crate::pages::dataset_href;
use automl_app_common::{
	element_ids::{RESULTS_DOWNLOAD_BUTTON_ID, VERSION_SELECT_ID},
	error::ViewError,
	metrics::{comparison_table, ranking_table, ComparisonTable, RankingRow},
	time::format_version_label,
};
use automl_service::TrainingRun;
use automl_ui as ui;
use chrono_tz::Tz;
use html::{component, html, Node};

impl ResultsView {
	pub fn render(&self, timezone: Tz) -> Node {
		if self.loading() {
			return html! {
				<ui::Loading>"Loading results..."</ui::Loading>
			};
		}
		let download_error = match self.error() {
			Some(error) if error.is_download() => Some(error.clone()),
			Some(error) => return html!(<ErrorMessage error={error.clone()} />),
			None => None,
		};
		let run = match self.results() {
			Some(run) => run,
			None => {
				let error = download_error.unwrap_or_else(|| ViewError::shape("No results available"));
				return html!(<ErrorMessage error={error} />);
			}
		};
		let download_error = download_error.map(|error| html!(<ErrorMessage error={error} />));
		if !run.status.is_done() {
			return html! {
				<ui::S1>
					<ui::H1>"Training Results"</ui::H1>
					{download_error}
					<ui::Loading>
						<ui::P>{format!("Training is still in progress. Status: {}", run.status)}</ui::P>
						<ui::P>"Please check back later."</ui::P>
					</ui::Loading>
				</ui::S1>
			};
		}
		let version_select = if run.versions.len() > 1 {
			Some(self.render_version_select(run, timezone))
		} else {
			None
		};
		let mut download_href = format!("{}/download?format=markdown", dataset_href("results", self.dataset_id()));
		if let Some(version) = self.selected_version() {
			download_href.push('&');
			download_href.push_str(
				&url::form_urlencoded::Serializer::new(String::new())
					.append_pair("version", version)
					.finish(),
			);
		}
		html! {
			<ui::S1>
				<ui::H1>"Model Training Results"</ui::H1>
				{download_error}
				{version_select}
				<ui::S2>
					<ui::H2>"Model Comparison"</ui::H2>
					<ComparisonTableView table={comparison_table(&run.comparison)} />
				</ui::S2>
				<ui::S2>
					<ui::H2>"Model Ranking"</ui::H2>
					<RankingTableView rows={ranking_table(&run.ranked)} />
				</ui::S2>
				<ui::S2>
					<ui::H2>"Download Report"</ui::H2>
					<ui::ButtonRow>
						<ui::Button
							button_type={ui::ButtonType::Button}
							href={Some(download_href)}
							id={Some(RESULTS_DOWNLOAD_BUTTON_ID.to_owned())}
						>
							"Download Markdown Report"
						</ui::Button>
						<ui::Link href={dataset_href("report", self.dataset_id())}>
							"View Full Report"
						</ui::Link>
					</ui::ButtonRow>
				</ui::S2>
			</ui::S1>
		}
	}

	fn render_version_select(&self, run: &TrainingRun, timezone: Tz) -> Node {
		let options = run
			.versions
			.iter()
			.map(|version| ui::SelectFieldOption {
				text: format_version_label(version, timezone),
				value: version.clone(),
			})
			.collect();
		let value = self
			.selected_version()
			.map(|version| version.to_owned())
			.or_else(|| run.versions.first().cloned());
		html! {
			<ui::Form
				action={Some(dataset_href("results", self.dataset_id()))}
				id={Some("version-form".to_owned())}
			>
				<ui::SelectField
					id={Some(VERSION_SELECT_ID.to_owned())}
					label={Some("Version".to_owned())}
					name={Some("version".to_owned())}
					options={options}
					value={value}
				/>
				<noscript>
					<ui::Button
						button_type={ui::ButtonType::Submit}
						href={None}
						id={None}
					>
						"Show Version"
					</ui::Button>
				</noscript>
			</ui::Form>
		}
	}
}

#[component]
fn ErrorMessage(error: ViewError) {
	html! {
		<ui::Alert>
			{error.message}
		</ui::Alert>
	}
}

#[component]
fn ComparisonTableView(table: ComparisonTable) {
	let ComparisonTable { columns, rows } = table;
	html! {
		<ui::Table id={Some("comparison-table".to_owned())} width={Some("100%".to_owned())}>
			<ui::TableHeader>
				<ui::TableRow>
					<ui::TableHeaderCell text_align={None}>"Model"</ui::TableHeaderCell>
					{columns.into_iter().map(|column| html! {
						<ui::TableHeaderCell text_align={Some(ui::TextAlign::Right)}>
							{column}
						</ui::TableHeaderCell>
					}).collect::<Vec<_>>()}
				</ui::TableRow>
			</ui::TableHeader>
			<ui::TableBody>
				{rows.into_iter().map(|row| html! {
					<ui::TableRow>
						<ui::TableCell>{row.model}</ui::TableCell>
						{row.cells.into_iter().map(|cell| html! {
							<ui::TableCell>{cell}</ui::TableCell>
						}).collect::<Vec<_>>()}
					</ui::TableRow>
				}).collect::<Vec<_>>()}
			</ui::TableBody>
		</ui::Table>
	}
}

#[component]
fn RankingTableView(rows: Vec<RankingRow>) {
	html! {
		<ui::Table id={Some("ranking-table".to_owned())} width={Some("100%".to_owned())}>
			<ui::TableHeader>
				<ui::TableRow>
					<ui::TableHeaderCell text_align={None}>"Rank"</ui::TableHeaderCell>
					<ui::TableHeaderCell text_align={None}>"Model"</ui::TableHeaderCell>
					<ui::TableHeaderCell text_align={Some(ui::TextAlign::Right)}>"Score"</ui::TableHeaderCell>
				</ui::TableRow>
			</ui::TableHeader>
			<ui::TableBody>
				{rows.into_iter().map(|row| html! {
					<ui::TableRow>
						<ui::TableCell>{row.rank.to_string()}</ui::TableCell>
						<ui::TableCell>{row.model}</ui::TableCell>
						<ui::TableCell>{row.score}</ui::TableCell>
					</ui::TableRow>
				}).collect::<Vec<_>>()}
			</ui::TableBody>
		</ui::Table>
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test::FakeResultsService;
	use automl_service::ServiceError;
	use serde_json::json;

	async fn rendered(results: Result<serde_json::Value, ServiceError>) -> String {
		let service = FakeResultsService::with_results(results);
		let mut view = ResultsView::new("ds1");
		view.load_results(&service, None).await;
		view.render(chrono_tz::UTC).render_to_string()
	}

	#[test]
	fn test_loading() {
		let html = ResultsView::new("ds1").render(chrono_tz::UTC).render_to_string();
		assert_eq!(html, r#"<div class="loading">Loading results...</div>"#);
	}

	#[tokio::test]
	async fn test_done_run_renders_tables() {
		let html = rendered(Ok(json!({
			"status": "done",
			"versions": ["1700000000", "1700003600"],
			"comparison": [{ "Model": "A", "acc": 0.9123 }],
			"ranked": [{ "Model": "A", "Score": 0.9123 }],
		})))
		.await;
		assert!(html.contains(concat!(
			r#"<th class="table-header-cell table-align-left">Model</th>"#,
			r#"<th class="table-header-cell table-align-right">acc</th>"#,
		)));
		assert!(html.contains(concat!(
			r#"<tr><td class="table-cell">A</td><td class="table-cell">0.9123</td></tr>"#,
		)));
		assert!(html.contains(concat!(
			r#"<tr><td class="table-cell">1</td><td class="table-cell">A</td>"#,
			r#"<td class="table-cell">0.9123</td></tr>"#,
		)));
		assert!(html.contains(
			r#"<option value="1700000000" selected>Version 1700000000 (11/14/2023, 10:13:20 PM)</option>"#
		));
		assert!(html.contains(r#"href="/results/ds1/download?format=markdown""#));
		assert!(html.contains(r#"<a class="link" href="/report/ds1">View Full Report</a>"#));
	}

	#[tokio::test]
	async fn test_single_version_has_no_selector() {
		let html = rendered(Ok(json!({ "status": "done", "versions": ["1700000000"] }))).await;
		assert!(!html.contains("<select"));
		assert!(html.contains("Model Comparison"));
	}

	#[tokio::test]
	async fn test_running_run_renders_placeholder() {
		let html = rendered(Ok(json!({
			"status": "running",
			"comparison": [{ "Model": "A", "acc": 0.9 }],
		})))
		.await;
		assert!(html.contains(r#"<h1 class="h1">Training Results</h1>"#));
		assert!(!html.contains("Model Training Results"));
		assert!(html.contains("Training is still in progress. Status: running"));
		assert!(html.contains("Please check back later."));
		assert!(!html.contains("<table"));
	}

	#[tokio::test]
	async fn test_load_error_is_the_only_content() {
		let html = rendered(Err(ServiceError::Transport("network down".to_owned()))).await;
		insta::assert_snapshot!(html, @r###"<div class="alert-wrapper alert-level-danger" role="alert">network down</div>"###);
	}

	#[tokio::test]
	async fn test_empty_tables_render_empty_bodies() {
		let html = rendered(Ok(json!({ "status": "done", "comparison": null }))).await;
		assert!(html.contains(r#"<table class="table" id="comparison-table" style="width: 100%;"><thead class="table-header"><tr><th class="table-header-cell table-align-left">Model</th></tr></thead><tbody></tbody></table>"#));
	}
}
