//! Ids of elements the server renders and the browser client looks up.

pub const VERSION_SELECT_ID: &str = "version-select";
pub const REPORT_PANEL_ID: &str = "report-panel";
pub const REPORT_DOWNLOAD_BUTTON_ID: &str = "download-report";
pub const RESULTS_DOWNLOAD_BUTTON_ID: &str = "download-markdown-report";
