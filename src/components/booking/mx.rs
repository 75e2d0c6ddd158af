//! Email-domain deliverability check via MX records.
//!
//! The lookup is best effort: if the resolver cannot be reached or answers
//! with something unreadable, the address is accepted ("fallback") so a DNS
//! outage never blocks a booking.

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use super::validation::{EmailIssue, email_domain, validate_email};

/// Public DNS-over-HTTPS JSON endpoint.
pub const DOH_ENDPOINT: &str = "https://dns.google/resolve";

/// DNS JSON response, reduced to what the verdict needs.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DnsResponse {
	/// DNS RCODE; `0` is NOERROR.
	#[serde(rename = "Status")]
	pub status: u32,
	#[serde(rename = "Answer", default)]
	pub answer: Vec<DnsAnswer>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DnsAnswer {
	#[serde(default)]
	pub name: String,
	#[serde(rename = "type", default)]
	pub record_type: u16,
	#[serde(default)]
	pub data: String,
}

impl DnsResponse {
	pub fn verdict(&self) -> MxCheck {
		MxCheck {
			valid: self.status == 0 && !self.answer.is_empty(),
			fallback: false,
		}
	}
}

/// Outcome of an MX check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MxCheck {
	pub valid: bool,
	/// Accepted only because the lookup itself failed.
	pub fallback: bool,
}

impl MxCheck {
	pub const FALLBACK: MxCheck = MxCheck {
		valid: true,
		fallback: true,
	};
}

#[derive(Debug, Error)]
pub enum LookupError {
	#[error("browser window unavailable")]
	NoWindow,
	#[error("request failed: {0}")]
	Transport(String),
	#[error("resolver answered HTTP {0}")]
	Status(u16),
	#[error("unreadable resolver response: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Resolves MX records for a domain.
#[allow(async_fn_in_trait)]
pub trait MxResolver {
	async fn lookup(&self, domain: &str) -> Result<DnsResponse, LookupError>;
}

/// Percent-encode a query component the way `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for byte in value.bytes() {
		match byte {
			b'A'..=b'Z'
			| b'a'..=b'z'
			| b'0'..=b'9'
			| b'-'
			| b'_'
			| b'.'
			| b'!'
			| b'~'
			| b'*'
			| b'\''
			| b'('
			| b')' => out.push(byte as char),
			_ => out.push_str(&format!("%{byte:02X}")),
		}
	}
	out
}

pub fn dns_query_url(domain: &str) -> String {
	format!("{DOH_ENDPOINT}?name={}&type=MX", encode_component(domain))
}

pub async fn check_mx<R: MxResolver>(resolver: &R, domain: &str) -> MxCheck {
	debug!("book-meeting: checking MX records for {domain}");
	match resolver.lookup(domain).await {
		Ok(response) => {
			let check = response.verdict();
			debug!(
				"book-meeting: {domain} status {} with {} answers",
				response.status,
				response.answer.len()
			);
			check
		}
		Err(e) => {
			warn!("book-meeting: MX lookup for {domain} failed, allowing address: {e}");
			MxCheck::FALLBACK
		}
	}
}

/// Format checks followed by the MX lookup.
pub async fn validate_email_with_mx<R: MxResolver>(
	resolver: &R,
	email: &str,
) -> Result<(), EmailIssue> {
	validate_email(email)?;
	let domain = email_domain(email).ok_or(EmailIssue::Malformed)?;
	if check_mx(resolver, &domain).await.valid {
		Ok(())
	} else {
		Err(EmailIssue::Undeliverable)
	}
}

#[cfg(test)]
mod tests {
	use pollster::block_on;

	use super::*;
	use crate::services::fakes::ScriptedResolver;

	#[test]
	fn test_verdict_from_json() {
		let found: DnsResponse = serde_json::from_str(
			r#"{"Status":0,"TC":false,"Answer":[{"name":"acme.io.","type":15,"TTL":300,"data":"10 mx.acme.io."}]}"#,
		)
		.unwrap();
		assert_eq!(
			found.verdict(),
			MxCheck {
				valid: true,
				fallback: false
			}
		);
		assert_eq!(found.answer[0].record_type, 15);

		let empty: DnsResponse = serde_json::from_str(r#"{"Status":0}"#).unwrap();
		assert!(!empty.verdict().valid);

		let nxdomain: DnsResponse =
			serde_json::from_str(r#"{"Status":3,"Answer":[{"name":"x","type":15,"data":"y"}]}"#)
				.unwrap();
		assert!(!nxdomain.verdict().valid);
	}

	#[test]
	fn test_query_url_encoding() {
		assert_eq!(
			dns_query_url("acme.io"),
			"https://dns.google/resolve?name=acme.io&type=MX"
		);
		assert_eq!(encode_component("a+b&c"), "a%2Bb%26c");
		assert_eq!(encode_component("é"), "%C3%A9");
	}

	#[test]
	fn test_lookup_failure_falls_back() {
		let resolver = ScriptedResolver::failing();
		assert_eq!(block_on(check_mx(&resolver, "acme.io")), MxCheck::FALLBACK);
		assert_eq!(
			block_on(validate_email_with_mx(&resolver, "jane@acme.io")),
			Ok(())
		);
	}

	#[test]
	fn test_mx_validation() {
		let resolver = ScriptedResolver::with_mx(&["acme.io"]);
		assert_eq!(
			block_on(validate_email_with_mx(&resolver, "jane@ACME.io")),
			Ok(())
		);
		assert_eq!(
			block_on(validate_email_with_mx(&resolver, "jane@nomail.dev")),
			Err(EmailIssue::Undeliverable)
		);
		// Format errors short-circuit before any lookup.
		assert_eq!(
			block_on(validate_email_with_mx(&resolver, "jane@gmail.com")),
			Err(EmailIssue::FreeProvider)
		);
		assert_eq!(resolver.queries(), vec!["acme.io", "nomail.dev"]);
	}
}
