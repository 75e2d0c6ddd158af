//! Light and dark color schemes.
//!
//! Dark is the default. A manual choice is kept in local storage and beats
//! the OS preference; without one, the page follows `prefers-color-scheme`
//! changes live.

mod component;
mod document;
mod preference;

pub use component::ThemeToggle;
pub use document::{LOGO_ID, apply_to_document, enable_transitions};
pub use preference::{
	THEME_KEY, Theme, is_toggle_shortcut, load_theme, save_theme, system_theme_override,
	toggle_theme, track_theme,
};
