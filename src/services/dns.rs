//! DNS-over-HTTPS resolver backed by `fetch`.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::components::booking::{DnsResponse, LookupError, MxResolver, dns_query_url};

fn transport(e: wasm_bindgen::JsValue) -> LookupError {
	LookupError::Transport(format!("{e:?}"))
}

/// Queries the public Google DoH JSON API.
#[derive(Clone, Copy, Debug, Default)]
pub struct DohResolver;

impl MxResolver for DohResolver {
	async fn lookup(&self, domain: &str) -> Result<DnsResponse, LookupError> {
		let window = web_sys::window().ok_or(LookupError::NoWindow)?;

		let headers = Headers::new().map_err(transport)?;
		headers
			.set("Accept", "application/dns-json")
			.map_err(transport)?;
		let init = RequestInit::new();
		init.set_method("GET");
		init.set_headers(&headers);
		let request =
			Request::new_with_str_and_init(&dns_query_url(domain), &init).map_err(transport)?;

		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(transport)?
			.dyn_into()
			.map_err(transport)?;
		if !response.ok() {
			return Err(LookupError::Status(response.status()));
		}

		let body = JsFuture::from(response.text().map_err(transport)?)
			.await
			.map_err(transport)?
			.as_string()
			.unwrap_or_default();
		Ok(serde_json::from_str(&body)?)
	}
}
