use automl_app_common::timezone::TIMEZONE_COOKIE;
use html::{component, html, Node, RawTextNode};

#[derive(Clone)]
pub struct PageInfo {
	pub title: String,
	pub client_js_src: Option<String>,
}

const STYLES: &str = "
body { font-family: sans-serif; margin: 0 auto; max-width: 1000px; padding: 1rem; }
.table { border-collapse: collapse; }
.table-header-cell, .table-cell { border-bottom: 1px solid #ddd; padding: 0.5rem; }
.table-align-right { text-align: right; }
.alert-level-danger { background: #fdecea; border-radius: 4px; padding: 1rem; }
.code-panel { background: #f6f8fa; border-radius: 4px; padding: 1rem; }
.button-row { align-items: center; display: flex; gap: 1rem; }
";

#[component]
pub fn Document(page_info: PageInfo) {
	let timezone_script = format!(
		"document.cookie = `{}=${{Intl.DateTimeFormat().resolvedOptions().timeZone}};max-age=31536000;path=/`",
		TIMEZONE_COOKIE,
	);
	html! {
		<html lang="en">
			<head>
				<meta charset="utf-8" />
				<meta content="width=device-width, initial-scale=1" name="viewport" />
				<title>{page_info.title}</title>
				<style>{raw(STYLES.to_owned())}</style>
			</head>
			<body>
				{children}
				<script>{raw(timezone_script)}</script>
				{page_info.client_js_src.map(|client_js_src| html! {
					<script type="module">
						{raw(format!(r#"import init from "{}"; init()"#, client_js_src))}
					</script>
				})}
			</body>
		</html>
	}
}

fn raw(text: String) -> Node {
	RawTextNode(text.into()).into()
}
