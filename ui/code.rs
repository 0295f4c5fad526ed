use html::{component, html};

/// A monospaced panel that keeps its text verbatim, wraps long lines and scrolls past `max_height`.
#[component]
pub fn CodePanel(id: Option<String>, max_height: Option<String>) {
	let style = format!(
		"font-family: monospace; white-space: pre-wrap; overflow-y: auto; max-height: {};",
		max_height.unwrap_or_else(|| "none".to_owned()),
	);
	html! {
		<pre class="code-panel" id={id} style={style}>
			{children}
		</pre>
	}
}
