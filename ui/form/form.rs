use html::{component, html};

#[component]
pub fn Form(action: Option<String>, id: Option<String>) {
	html! {
		<form id={id} action={action} class="form" method="get">
			{children}
		</form>
	}
}
