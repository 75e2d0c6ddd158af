//! Reflects the active theme onto the document outside the Leptos tree.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement};

use super::preference::Theme;

/// Element id of the header logo swapped per theme.
pub const LOGO_ID: &str = "demo-logo";

fn theme_color_meta(document: &Document) -> Option<Element> {
	if let Some(meta) = document
		.query_selector("meta[name=\"theme-color\"]")
		.ok()
		.flatten()
	{
		return Some(meta);
	}
	let meta = document.create_element("meta").ok()?;
	meta.set_attribute("name", "theme-color").ok()?;
	document.head()?.append_child(&meta).ok()?;
	Some(meta)
}

/// Set `data-theme` on `<html>` and `<body>`, swap the logo, and update the
/// browser chrome color.
pub fn apply_to_document(theme: Theme) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	let value = theme.as_str();

	if let Some(html) = document.document_element() {
		let _ = html.set_attribute("data-theme", value);
	}
	if let Some(body) = document.body() {
		let _ = body.set_attribute("data-theme", value);
	}

	if let Some(logo) = document
		.get_element_by_id(LOGO_ID)
		.and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
	{
		logo.set_src(theme.logo_src());
	}

	match theme_color_meta(&document) {
		Some(meta) => {
			let _ = meta.set_attribute("content", theme.meta_color());
		}
		None => debug!("book-meeting: no theme-color meta available"),
	}
}

/// Drop the body's `preload` class so CSS transitions start working.
pub fn enable_transitions() {
	if let Some(body) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
	{
		let _ = body.class_list().remove_1("preload");
	}
}
