//! The reCAPTCHA widget.
//!
//! The form container is created by Leptos after the page has loaded, so the
//! widget is rendered explicitly with `grecaptcha.render` rather than relying
//! on the script's load-time scan for `.g-recaptcha` elements.

use log::{debug, info};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub trait Captcha {
	/// The challenge token, or `None` until the visitor has solved it.
	fn response(&self) -> Option<String>;
	fn reset(&self);
}

/// Handle returned by `grecaptcha.render`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetId(pub i32);

/// Draws a challenge widget into a container.
pub trait CaptchaRenderer {
	type Container;

	/// `None` while the script has not loaded yet, or when it refuses.
	fn render(&self, container: &Self::Container, site_key: &str) -> Option<WidgetId>;
}

/// Remembers what has been rendered so each site key is drawn once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetMount {
	rendered: Option<(String, WidgetId)>,
}

impl WidgetMount {
	pub fn widget(&self) -> Option<WidgetId> {
		self.rendered.as_ref().map(|(_, id)| *id)
	}

	/// Render unless `site_key` is already showing. Safe to call on every poll:
	/// a script that is not ready yet is simply retried next time.
	pub fn ensure<R: CaptchaRenderer>(
		&mut self,
		renderer: &R,
		container: &R::Container,
		site_key: &str,
	) -> Option<WidgetId> {
		if let Some((key, id)) = &self.rendered {
			if key == site_key {
				return Some(*id);
			}
		}
		let id = renderer.render(container, site_key)?;
		info!("book-meeting: captcha widget {} rendered", id.0);
		self.rendered = Some((site_key.to_string(), id));
		Some(id)
	}
}

#[derive(Serialize)]
struct RenderParams<'a> {
	sitekey: &'a str,
}

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = grecaptcha, js_name = getResponse, catch)]
	fn grecaptcha_get_response(widget: Option<i32>) -> Result<String, JsValue>;

	#[wasm_bindgen(js_namespace = grecaptcha, js_name = reset, catch)]
	fn grecaptcha_reset(widget: Option<i32>) -> Result<(), JsValue>;

	#[wasm_bindgen(js_namespace = grecaptcha, js_name = render, catch)]
	fn grecaptcha_render(container: &Element, params: &JsValue) -> Result<i32, JsValue>;
}

/// Google reCAPTCHA v2. Behaves as unsolved while the script is not loaded
/// or before its widget has been rendered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Recaptcha {
	widget: Option<WidgetId>,
}

impl Recaptcha {
	pub fn new(widget: Option<WidgetId>) -> Self {
		Self { widget }
	}
}

impl Captcha for Recaptcha {
	fn response(&self) -> Option<String> {
		let widget = self.widget?;
		grecaptcha_get_response(Some(widget.0))
			.ok()
			.filter(|token| !token.is_empty())
	}

	fn reset(&self) {
		if let Some(widget) = self.widget {
			let _ = grecaptcha_reset(Some(widget.0));
		}
	}
}

/// Explicit rendering through the global `grecaptcha` object.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecaptchaRenderer;

impl CaptchaRenderer for RecaptchaRenderer {
	type Container = Element;

	fn render(&self, container: &Element, site_key: &str) -> Option<WidgetId> {
		let params = serde_json::to_string(&RenderParams { sitekey: site_key })
			.ok()
			.and_then(|json| js_sys::JSON::parse(&json).ok())?;
		match grecaptcha_render(container, &params) {
			Ok(id) => Some(WidgetId(id)),
			Err(e) => {
				debug!("book-meeting: captcha not ready: {e:?}");
				None
			}
		}
	}
}
