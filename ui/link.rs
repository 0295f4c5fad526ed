use html::{component, html};

#[component]
pub fn Link(href: String) {
	html! {
		<a class="link" href={href}>
			{children}
		</a>
	}
}
