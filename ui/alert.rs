use html::{component, html};

#[component]
pub fn Alert() {
	html! {
		<div class="alert-wrapper alert-level-danger" role="alert">
			{children}
		</div>
	}
}
