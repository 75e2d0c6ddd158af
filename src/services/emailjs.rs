//! EmailJS browser SDK.

use js_sys::{Array, JSON, Promise};
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::components::booking::{MailError, MailSender, OutgoingEmail};

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = emailjs, js_name = init, catch)]
	fn emailjs_init(public_key: &str) -> Result<(), JsValue>;

	#[wasm_bindgen(js_namespace = emailjs, js_name = send, catch)]
	fn emailjs_send(service_id: &str, template_id: &str, params: &JsValue)
	-> Result<Promise, JsValue>;
}

/// Sends through the globally loaded `emailjs` object.
#[derive(Clone, Debug)]
pub struct EmailJs {
	public_key: String,
}

impl EmailJs {
	pub fn new(public_key: impl Into<String>) -> Self {
		Self {
			public_key: public_key.into(),
		}
	}
}

impl MailSender for EmailJs {
	async fn send_all(&self, service_id: &str, messages: &[OutgoingEmail]) -> Result<(), MailError> {
		emailjs_init(&self.public_key).map_err(|_| MailError::Unavailable)?;

		// Every payload is encoded before the first send.
		let payloads = messages
			.iter()
			.map(|message| -> Result<JsValue, MailError> {
				let json = serde_json::to_string(&message.params)?;
				JSON::parse(&json).map_err(|e| MailError::Rejected(format!("{e:?}")))
			})
			.collect::<Result<Vec<_>, _>>()?;

		let pending = Array::new();
		for (message, params) in messages.iter().zip(&payloads) {
			let promise = emailjs_send(service_id, &message.template_id, params).map_err(|e| {
				if pending.length() == 0 {
					MailError::Unavailable
				} else {
					MailError::Rejected(format!("{e:?}"))
				}
			})?;
			pending.push(&promise);
		}

		let responses = JsFuture::from(Promise::all(&pending))
			.await
			.map_err(|e| MailError::Rejected(format!("{e:?}")))?;
		debug!("book-meeting: email provider responses {responses:?}");
		Ok(())
	}
}
