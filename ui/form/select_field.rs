use super::FieldLabel;
use html::{component, html};

#[derive(Clone)]
pub struct SelectFieldOption {
	pub text: String,
	pub value: String,
}

/// A labeled `<select>`. The option whose value equals `value` is marked selected.
#[component]
pub fn SelectField(
	id: Option<String>,
	label: Option<String>,
	name: Option<String>,
	options: Vec<SelectFieldOption>,
	value: Option<String>,
) {
	html! {
		<FieldLabel html_for={id.clone()}>
			{label}
			<select class="form-select" id={id} name={name}>
				{
					options.into_iter().map(|option| {
						let selected = value.as_deref() == Some(option.value.as_str());
						html! {
							<option value={option.value} selected={selected}>
								{option.text}
							</option>
						}
					}).collect::<Vec<_>>()
				}
			</select>
		</FieldLabel>
	}
}
