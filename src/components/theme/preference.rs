//! Light/dark preference and its persistence.

use log::warn;

use crate::services::analytics::{Analytics, AnalyticsEvent};
use crate::services::storage::PreferenceStore;

/// Local-storage key holding the visitor's manual choice.
pub const THEME_KEY: &str = "deteqt-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	#[default]
	Dark,
	Light,
}

impl Theme {
	pub fn as_str(self) -> &'static str {
		match self {
			Theme::Dark => "dark",
			Theme::Light => "light",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"dark" => Some(Theme::Dark),
			"light" => Some(Theme::Light),
			_ => None,
		}
	}

	pub fn toggled(self) -> Self {
		match self {
			Theme::Dark => Theme::Light,
			Theme::Light => Theme::Dark,
		}
	}

	/// `meta[name=theme-color]` value for mobile browser chrome.
	pub fn meta_color(self) -> &'static str {
		match self {
			Theme::Dark => "#000000",
			Theme::Light => "#ffffff",
		}
	}

	/// Logo that stays legible on this background.
	pub fn logo_src(self) -> &'static str {
		match self {
			Theme::Dark => "assets/images/deteqt-logo-white.svg",
			Theme::Light => "assets/images/Deteqt-logo-black.svg",
		}
	}

	pub fn analytics_value(self) -> i64 {
		match self {
			Theme::Dark => 0,
			Theme::Light => 1,
		}
	}
}

/// The saved theme, or the dark default.
pub fn load_theme(store: &impl PreferenceStore) -> Theme {
	store
		.get(THEME_KEY)
		.as_deref()
		.and_then(Theme::parse)
		.unwrap_or_default()
}

pub fn save_theme(store: &impl PreferenceStore, theme: Theme) {
	if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
		warn!("book-meeting: theme preference not saved: {e}");
	}
}

/// Flip `current`, remember the choice, and return the new theme.
pub fn toggle_theme(store: &impl PreferenceStore, current: Theme) -> Theme {
	let next = current.toggled();
	save_theme(store, next);
	next
}

pub fn track_theme(analytics: &impl Analytics, theme: Theme) {
	analytics.track(&AnalyticsEvent::engagement(
		"theme_change",
		theme.as_str(),
		Some(theme.analytics_value()),
	));
}

/// Ctrl+Shift+D, or Cmd+Shift+D on macOS. Shift makes the key uppercase.
pub fn is_toggle_shortcut(ctrl: bool, meta: bool, shift: bool, key: &str) -> bool {
	(ctrl || meta) && shift && key == "D"
}

/// Theme to follow after the OS color scheme changed. A saved manual
/// preference always wins.
pub fn system_theme_override(saved: Option<String>, prefers_dark: bool) -> Option<Theme> {
	if saved.is_some_and(|s| !s.is_empty()) {
		return None;
	}
	Some(if prefers_dark { Theme::Dark } else { Theme::Light })
}
