use html::{component, html};

#[component]
pub fn Table(id: Option<String>, width: Option<String>) {
	let style = format!("width: {};", width.unwrap_or_else(|| "auto".to_owned()));
	html! {
		<div class="table-wrapper">
			<table class="table" id={id} style={style}>
				{children}
			</table>
		</div>
	}
}

#[component]
pub fn TableHeader() {
	html! {
		<thead class="table-header">
			{children}
		</thead>
	}
}

#[component]
pub fn TableBody() {
	html! { <tbody>{children}</tbody> }
}

#[component]
pub fn TableRow() {
	html! {
		<tr>
			{children}
		</tr>
	}
}

#[derive(Clone)]
pub enum TextAlign {
	Left,
	Right,
}

#[component]
pub fn TableHeaderCell(text_align: Option<TextAlign>) {
	let text_align_class = match text_align {
		Some(TextAlign::Right) => "table-align-right",
		Some(TextAlign::Left) | None => "table-align-left",
	};
	let th_class = format!("table-header-cell {}", text_align_class);
	html! {
		<th class={th_class}>
			{children}
		</th>
	}
}

#[component]
pub fn TableCell() {
	html! {
		<td class="table-cell">
			{children}
		</td>
	}
}
