//! Scraper-resistant contact address.
//!
//! The address never appears verbatim in the page source: its user and domain
//! parts are shipped reversed and only assembled in the browser.

use serde::Deserialize;

/// Link text shown until the visitor hovers or taps.
pub const PLACEHOLDER: &str = "Contact Us";

/// Reversed address parts, as written in the page config.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
	pub user: String,
	pub domain: String,
}

impl Default for ContactConfig {
	fn default() -> Self {
		Self {
			user: "ew".into(),
			domain: "ia.tqeted".into(),
		}
	}
}

impl ContactConfig {
	pub fn address(&self) -> Option<String> {
		reveal_address(&self.user, &self.domain)
	}
}

fn reversed(s: &str) -> String {
	s.chars().rev().collect()
}

/// `None` when either part is missing.
pub fn reveal_address(user_rev: &str, domain_rev: &str) -> Option<String> {
	if user_rev.is_empty() || domain_rev.is_empty() {
		return None;
	}
	Some(format!("{}@{}", reversed(user_rev), reversed(domain_rev)))
}

pub fn mailto_href(address: &str) -> String {
	format!("mailto:{address}")
}

/// What the link currently reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactLabel {
	address: String,
	revealed: bool,
}

impl ContactLabel {
	pub fn new(address: impl Into<String>) -> Self {
		Self {
			address: address.into(),
			revealed: false,
		}
	}

	pub fn text(&self) -> &str {
		if self.revealed { &self.address } else { PLACEHOLDER }
	}

	pub fn hover(&mut self) {
		self.revealed = true;
	}

	pub fn leave(&mut self) {
		self.revealed = false;
	}

	/// First tap reveals the address and returns `true`: the caller suppresses
	/// the default action and opens the mail client after a short delay.
	/// Later taps follow the link normally.
	pub fn touch(&mut self) -> bool {
		if self.revealed {
			return false;
		}
		self.revealed = true;
		true
	}
}
