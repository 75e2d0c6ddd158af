//! Fire-and-forget analytics events.

use log::debug;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One `gtag('event', action, {...})` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsEvent {
	#[serde(skip)]
	pub action: &'static str,
	pub event_category: &'static str,
	pub event_label: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<i64>,
}

impl AnalyticsEvent {
	/// An event in the `engagement` category.
	pub fn engagement(action: &'static str, label: impl Into<String>, value: Option<i64>) -> Self {
		Self {
			action,
			event_category: "engagement",
			event_label: label.into(),
			value,
		}
	}
}

pub trait Analytics {
	fn track(&self, event: &AnalyticsEvent);
}

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_name = gtag, catch)]
	fn gtag(command: &str, action: &str, params: &JsValue) -> Result<(), JsValue>;
}

/// Google Analytics global site tag. A page without `gtag` drops events.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gtag;

impl Analytics for Gtag {
	fn track(&self, event: &AnalyticsEvent) {
		let params = serde_json::to_string(event)
			.ok()
			.and_then(|json| js_sys::JSON::parse(&json).ok());
		let Some(params) = params else {
			return;
		};
		if gtag("event", event.action, &params).is_err() {
			debug!("book-meeting: analytics unavailable, dropped {}", event.action);
		}
	}
}
