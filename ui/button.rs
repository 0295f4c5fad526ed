use html::{component, html};

#[derive(Clone)]
pub enum ButtonType {
	Submit,
	Button,
}

/// Renders an anchor styled as a button when `href` is set, otherwise a `<button>`.
#[component]
pub fn Button(button_type: ButtonType, href: Option<String>, id: Option<String>) {
	let button_type = match button_type {
		ButtonType::Submit => "submit",
		ButtonType::Button => "button",
	};
	if let Some(href) = href {
		html! {
			<a class="button" href={href} id={id}>
				{children}
			</a>
		}
	} else {
		html! {
			<button class="button" id={id} type={button_type}>
				{children}
			</button>
		}
	}
}
