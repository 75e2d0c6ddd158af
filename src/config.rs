//! Per-page settings embedded in the HTML.
//!
//! The host page may carry `<script id="page-config" type="application/json">`.
//! Every field is optional; anything left out keeps its built-in default.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::booking::MailConfig;
use crate::components::contact::ContactConfig;
use crate::components::particles::ParticleConfig;

pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
	pub mail: MailConfig,
	pub contact: ContactConfig,
	pub particles: ParticleConfig,
	/// reCAPTCHA v2 site key. Without it the widget is not rendered and the
	/// form cannot be submitted.
	pub recaptcha_site_key: Option<String>,
}

/// Parse config JSON, falling back to defaults when it is malformed.
pub fn parse_page_config(json: &str) -> PageConfig {
	match serde_json::from_str::<PageConfig>(json) {
		Ok(config) => {
			info!("book-meeting: loaded page config");
			config
		}
		Err(e) => {
			warn!("book-meeting: failed to parse page config: {}", e);
			PageConfig::default()
		}
	}
}

/// Read the config script from the DOM.
pub fn load_page_config() -> PageConfig {
	let text = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|script| script.text().ok());
	match text {
		Some(json) => parse_page_config(&json),
		None => PageConfig::default(),
	}
}
