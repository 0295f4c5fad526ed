use html::{component, html};

#[component]
pub fn S1() {
	html! {
		<div class="s1">
			{children}
		</div>
	}
}

#[component]
pub fn S2() {
	html! {
		<div class="s2">{children}</div>
	}
}

#[component]
pub fn H1() {
	html! {
		<h1 class="h1">
			{children}
		</h1>
	}
}

#[component]
pub fn H2() {
	html! {
		<h2 class="h2">
			{children}
		</h2>
	}
}

#[component]
pub fn P() {
	html! {
		<p class="p">{children}</p>
	}
}

/// Placeholder shown while data is loading or a run is still in progress.
#[component]
pub fn Loading() {
	html! {
		<div class="loading">{children}</div>
	}
}

#[component]
pub fn ButtonRow() {
	html! {
		<div class="button-row">{children}</div>
	}
}
