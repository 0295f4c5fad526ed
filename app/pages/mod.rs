use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub mod client;
pub mod health;
pub mod report;
pub mod results;

/// Characters escaped when a dataset id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'~');

/// `/{page}/{dataset_id}` with the dataset id encoded as one segment. Dot-only ids are fully escaped.
pub fn dataset_href(page: &str, dataset_id: &str) -> String {
	if automl_service::is_dot_segment(dataset_id) {
		return format!("/{}/{}", page, "%2E".repeat(dataset_id.len()));
	}
	format!("/{}/{}", page, utf8_percent_encode(dataset_id, PATH_SEGMENT))
}

#[test]
fn test_dataset_href() {
	assert_eq!(dataset_href("report", "ds1"), "/report/ds1");
	assert_eq!(dataset_href("results", "my data/1"), "/results/my%20data%2F1");
	assert_eq!(dataset_href("report", "v1.2"), "/report/v1.2");
	assert_eq!(dataset_href("report", "."), "/report/%2E");
	assert_eq!(dataset_href("report", ".."), "/report/%2E%2E");
}
