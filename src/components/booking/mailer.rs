//! Confirmation and notification emails sent on a successful booking.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use super::validation::industries_list;

/// Email-delivery provider settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MailConfig {
	pub service_id: String,
	/// Template for the thank-you message to the visitor.
	pub user_template_id: String,
	/// Template for the internal notification.
	pub admin_template_id: String,
	pub admin_email: String,
	pub public_key: String,
}

impl Default for MailConfig {
	fn default() -> Self {
		Self {
			service_id: "service_rh40qdg".into(),
			user_template_id: "template_2tlcpty".into(),
			admin_template_id: "template_xha3i59".into(),
			admin_email: "we@deteqt.ai".into(),
			public_key: "H82v1rZUW3t2_Usfx".into(),
		}
	}
}

/// When the booking was made, as shown in the notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionStamp {
	pub year: i32,
	/// Localized date and time, e.g. "October 14, 2026 at 06:56 PM UTC".
	pub display: String,
}

/// One templated message for the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingEmail {
	pub template_id: String,
	pub params: BTreeMap<String, String>,
}

fn split_address(address: &str) -> (&str, &str) {
	address.split_once('@').unwrap_or((address, ""))
}

fn params<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
	pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Thank-you message addressed to the visitor.
pub fn user_email(
	config: &MailConfig,
	address: &str,
	industries: &[String],
	captcha_response: &str,
	stamp: &SubmissionStamp,
) -> OutgoingEmail {
	let (name, company) = split_address(address);
	OutgoingEmail {
		template_id: config.user_template_id.clone(),
		params: params([
			("to_email", address.to_string()),
			("to_name", name.to_string()),
			("company_name", company.to_string()),
			("industries", industries_list(industries)),
			("current_year", stamp.year.to_string()),
			("g-recaptcha-response", captcha_response.to_string()),
		]),
	}
}

/// Internal notification addressed to the admin mailbox.
pub fn admin_email(
	config: &MailConfig,
	address: &str,
	industries: &[String],
	stamp: &SubmissionStamp,
) -> OutgoingEmail {
	let (_, domain) = split_address(address);
	OutgoingEmail {
		template_id: config.admin_template_id.clone(),
		params: params([
			("to_email", config.admin_email.clone()),
			("user_email", address.to_string()),
			("user_domain", domain.to_string()),
			("industries", industries_list(industries)),
			("submission_date", stamp.display.clone()),
			("current_year", stamp.year.to_string()),
		]),
	}
}

#[derive(Debug, Error)]
pub enum MailError {
	#[error("email library is not loaded")]
	Unavailable,
	#[error("provider rejected the message: {0}")]
	Rejected(String),
	#[error("could not encode template parameters: {0}")]
	Encode(#[from] serde_json::Error),
}

impl MailError {
	/// The failure happened before anything reached the provider.
	pub fn nothing_sent(&self) -> bool {
		matches!(self, MailError::Unavailable | MailError::Encode(_))
	}
}

/// Email-delivery provider.
#[allow(async_fn_in_trait)]
pub trait MailSender {
	/// Deliver every message; fails if any single delivery fails.
	async fn send_all(&self, service_id: &str, messages: &[OutgoingEmail]) -> Result<(), MailError>;
}
