//! Theme toggle button plus the global shortcut and OS-preference listener.

use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, MediaQueryListEvent};

use super::document::{apply_to_document, enable_transitions};
use super::preference::{
	THEME_KEY, Theme, is_toggle_shortcut, load_theme, system_theme_override, toggle_theme, track_theme,
};
use crate::components::listener::Subscription;
use crate::services::analytics::Gtag;
use crate::services::storage::{LocalStorage, PreferenceStore};

const SPIN: Duration = Duration::from_millis(300);
const PRELOAD_DELAY: Duration = Duration::from_millis(100);
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[component]
pub fn ThemeToggle() -> impl IntoView {
	let theme = RwSignal::new(load_theme(&LocalStorage));
	let spinning = RwSignal::new(false);
	let subscriptions = StoredValue::new_local(Vec::<Subscription>::new());

	Effect::new(move |_| {
		let current = theme.get();
		apply_to_document(current);
		track_theme(&Gtag, current);
	});

	set_timeout(enable_transitions, PRELOAD_DELAY);

	let toggle = move || {
		let Some(current) = theme.try_get_untracked() else {
			return;
		};
		let next = toggle_theme(&LocalStorage, current);
		info!("book-meeting: theme switched to {}", next.as_str());
		theme.set(next);
		spinning.set(true);
		set_timeout(
			move || {
				spinning.try_set(false);
			},
			SPIN,
		);
	};

	if let Some(window) = web_sys::window() {
		let on_key = move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
				return;
			};
			if is_toggle_shortcut(ev.ctrl_key(), ev.meta_key(), ev.shift_key(), &ev.key()) {
				ev.prevent_default();
				toggle();
			}
		};

		let on_scheme = move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<MediaQueryListEvent>() else {
				return;
			};
			if let Some(next) = system_theme_override(LocalStorage.get(THEME_KEY), ev.matches()) {
				theme.try_set(next);
			}
		};

		let registered = [
			window
				.document()
				.and_then(|doc| Subscription::new(&doc, "keydown", on_key)),
			window
				.match_media(DARK_QUERY)
				.ok()
				.flatten()
				.and_then(|query| Subscription::new(&query, "change", on_scheme)),
		];
		subscriptions.update_value(|subs| subs.extend(registered.into_iter().flatten()));
	}

	on_cleanup(move || {
		subscriptions.try_update_value(Vec::clear);
	});

	view! {
		<button
			id="themeToggle"
			class="theme-toggle"
			type="button"
			aria-label="Toggle theme"
			title="Toggle theme (Ctrl+Shift+D)"
			style:transform=move || if spinning.get() { "rotate(360deg)" } else { "" }
			on:click=move |_| toggle()
		>
			<span class="theme-icon" aria-hidden="true">
				{move || if theme.get() == Theme::Dark { "☀" } else { "☾" }}
			</span>
		</button>
	}
}
