use html::{component, html};

#[component]
fn Greeting(name: String) {
	html! {
		<div class="greeting">{format!("Hello {}", name)}{children}</div>
	}
}

#[component]
fn Optional(visible: bool) {
	html! {
		<span>
			{if visible { Some("shown") } else { None }}
		</span>
	}
}

#[test]
fn test_component() {
	let html = html!(<Greeting name={"World".to_owned()} />).render_to_string();
	assert_eq!(html, r#"<div class="greeting">Hello World</div>"#);
}

#[test]
fn test_component_children() {
	let html = html! {
		<Greeting name={"A".to_owned()}>
			<b>"!"</b>
		</Greeting>
	}
	.render_to_string();
	assert_eq!(html, r#"<div class="greeting">Hello A<b>!</b></div>"#);
}

#[test]
fn test_escaping() {
	let html = html! {
		<a href={"/report/a\"b".to_owned()}>{"<script>&'".to_owned()}</a>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<a href="/report/a&quot;b">&lt;script&gt;&amp;&apos;</a>"#
	);
}

#[test]
fn test_whitespace_is_preserved() {
	let html = html!(<pre>{"# Title\n\n  indented".to_owned()}</pre>).render_to_string();
	assert_eq!(html, "<pre># Title\n\n  indented</pre>");
}

#[test]
fn test_optional_children_and_bool_attributes() {
	let shown = html!(<Optional visible={true} />).render_to_string();
	let hidden = html!(<Optional visible={false} />).render_to_string();
	assert_eq!(shown, "<span>shown</span>");
	assert_eq!(hidden, "<span></span>");
	let selected = html!(<option selected={true} disabled={false}>"x"</option>).render_to_string();
	assert_eq!(selected, "<option selected>x</option>");
}
