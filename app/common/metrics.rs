use serde_json::{Map, Value};

/// One row of a results table. Same type as `automl_service::Record`, restated so the wasm client can use this crate without pulling in the service client and its TLS stack.
pub type Record = Map<String, Value>;

pub const PLACEHOLDER: &str = "-";

/// Finite numbers get exactly four fractional digits. Non-finite numbers print raw, text is verbatim, and a missing value is a dash.
pub fn format_number(value: f64) -> String {
	if value.is_finite() {
		// Negative zero prints as zero.
		let value = if value == 0.0 { 0.0 } else { value };
		format!("{:.4}", value)
	} else if value.is_nan() {
		"NaN".to_owned()
	} else if value.is_sign_positive() {
		"Infinity".to_owned()
	} else {
		"-Infinity".to_owned()
	}
}

pub fn format_metric_value(value: &Value) -> String {
	match value {
		Value::Null => PLACEHOLDER.to_owned(),
		Value::Number(number) => match number.as_f64() {
			Some(number) => format_number(number),
			None => number.to_string(),
		},
		Value::String(value) => value.clone(),
		Value::Bool(value) => value.to_string(),
		value => value.to_string(),
	}
}

pub fn format_cell(value: Option<&Value>) -> String {
	value
		.map(format_metric_value)
		.unwrap_or_else(|| PLACEHOLDER.to_owned())
}

pub fn is_model_key(key: &str) -> bool {
	key.eq_ignore_ascii_case("model")
}

/// Look up `key`, falling back to any case variant of it.
fn get_tolerant<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
	record.get(key).or_else(|| {
		record
			.iter()
			.find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
			.map(|(_, value)| value)
	})
}

pub fn model_name(record: &Record) -> String {
	match get_tolerant(record, "Model") {
		Some(Value::String(name)) => name.clone(),
		Some(Value::Null) | None => PLACEHOLDER.to_owned(),
		Some(value) => value.to_string(),
	}
}

/// The metric columns of a comparison table: every key of every record in first-appearance order, without the model name key.
pub fn columns(records: &[Record]) -> Vec<String> {
	let mut columns: Vec<String> = Vec::new();
	for record in records {
		for key in record.keys() {
			if !is_model_key(key) && !columns.iter().any(|column| column == key) {
				columns.push(key.clone());
			}
		}
	}
	columns
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonTable {
	pub columns: Vec<String>,
	pub rows: Vec<ComparisonRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
	pub model: String,
	pub cells: Vec<String>,
}

pub fn comparison_table(records: &[Record]) -> ComparisonTable {
	let columns = columns(records);
	let rows = records
		.iter()
		.map(|record| ComparisonRow {
			model: model_name(record),
			cells: columns
				.iter()
				.map(|column| format_cell(record.get(column)))
				.collect(),
		})
		.collect();
	ComparisonTable { columns, rows }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankingRow {
	pub rank: usize,
	pub model: String,
	pub score: String,
}

/// Ranks are positions in the sequence the service sent. Any rank or score field in the data does not affect them.
pub fn ranking_table(records: &[Record]) -> Vec<RankingRow> {
	records
		.iter()
		.enumerate()
		.map(|(index, record)| RankingRow {
			rank: index + 1,
			model: model_name(record),
			score: format_cell(get_tolerant(record, "Score")),
		})
		.collect()
}
