//! Wall-clock timestamps for outgoing emails.

use js_sys::{Date, JSON};
use wasm_bindgen::JsValue;

use crate::components::booking::SubmissionStamp;

const DATE_FORMAT: &str = r#"{"year":"numeric","month":"long","day":"numeric","hour":"2-digit","minute":"2-digit","timeZoneName":"short"}"#;

/// The current time, localized for `en-US`.
pub fn submission_stamp() -> SubmissionStamp {
	let now = Date::new_0();
	let options = JSON::parse(DATE_FORMAT).unwrap_or(JsValue::UNDEFINED);
	SubmissionStamp {
		year: now.get_full_year() as i32,
		display: now.to_locale_string("en-US", &options).into(),
	}
}
