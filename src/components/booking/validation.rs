//! Synchronous field validation for the booking form.

use thiserror::Error;

/// Why an email address was rejected. `Display` is the inline message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EmailIssue {
	#[error("Enter a value for this field.")]
	Empty,
	#[error("Please enter a valid email address.")]
	Malformed,
	#[error("Please use your company or organization email address.")]
	FreeProvider,
	/// The domain publishes no MX records.
	#[error("This email domain cannot receive emails. Please use a valid company email address.")]
	Undeliverable,
}

/// Shown when no industry checkbox is ticked.
pub const INDUSTRIES_REQUIRED: &str = "Please select at least one industry.";

/// Shown for a moment after non-Latin characters were stripped from input.
pub const LATIN_ONLY: &str = "Only Latin characters are allowed.";

/// Consumer mailbox providers; bookings must come from a company domain.
pub const FREE_EMAIL_PROVIDERS: &[&str] = &[
	"gmail.com",
	"yahoo.com",
	"hotmail.com",
	"outlook.com",
	"aol.com",
	"icloud.com",
	"mail.com",
	"protonmail.com",
	"zoho.com",
	"yandex.com",
	"gmx.com",
	"mail.ru",
	"inbox.com",
	"live.com",
	"msn.com",
	"me.com",
	"mac.com",
];

/// Checkbox values and their display labels, in form order.
pub const INDUSTRIES: &[(&str, &str)] = &[
	("banking-finance", "Banking And Finance"),
	("education", "Education"),
	("government", "Government"),
	("heavy-equipment", "Heavy Equipment"),
	("manufacturing", "Manufacturing"),
	("retail", "Retail"),
	("transportation", "Transportation"),
	("other", "Other"),
];

/// `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot in the
/// domain with at least one character on each side.
fn is_well_formed(email: &str) -> bool {
	if email.chars().any(char::is_whitespace) {
		return false;
	}
	let Some((local, domain)) = email.split_once('@') else {
		return false;
	};
	if local.is_empty() || domain.contains('@') {
		return false;
	}
	domain
		.char_indices()
		.any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Lowercased domain part of an address, if it has one.
pub fn email_domain(email: &str) -> Option<String> {
	email
		.split('@')
		.nth(1)
		.filter(|d| !d.is_empty())
		.map(str::to_lowercase)
}

/// Format and provider checks. Deliverability is checked separately
/// (see `mx::validate_email_with_mx`).
pub fn validate_email(email: &str) -> Result<(), EmailIssue> {
	if email.is_empty() {
		return Err(EmailIssue::Empty);
	}
	if !is_well_formed(email) {
		return Err(EmailIssue::Malformed);
	}
	match email_domain(email) {
		Some(domain) if FREE_EMAIL_PROVIDERS.contains(&domain.as_str()) => {
			Err(EmailIssue::FreeProvider)
		}
		_ => Ok(()),
	}
}

pub fn validate_industries(selected: &[String]) -> Result<(), &'static str> {
	if selected.is_empty() {
		Err(INDUSTRIES_REQUIRED)
	} else {
		Ok(())
	}
}

/// Result of stripping disallowed characters from the email field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatinFilter {
	pub value: String,
	pub removed: bool,
}

/// Keep ASCII letters, digits, and `@ . - _ +`.
pub fn restrict_to_latin(input: &str) -> LatinFilter {
	let value: String = input
		.chars()
		.filter(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '-' | '_' | '+'))
		.collect();
	let removed = value.len() != input.len();
	LatinFilter { value, removed }
}

/// Tick or untick `value`, keeping the selection in form order.
pub fn toggle_industry(selected: &mut Vec<String>, value: &str, checked: bool) {
	selected.retain(|v| v != value);
	if checked {
		selected.push(value.to_string());
	}
	let rank = |v: &String| INDUSTRIES.iter().position(|(known, _)| known == v);
	selected.sort_by_key(|v| rank(v).unwrap_or(usize::MAX));
}

/// Display label for an industry value; unknown values pass through.
pub fn industry_label(value: &str) -> &str {
	INDUSTRIES
		.iter()
		.find(|(v, _)| *v == value)
		.map(|(_, label)| *label)
		.unwrap_or(value)
}

/// Comma-separated display labels for the selected industries.
pub fn industries_list(selected: &[String]) -> String {
	selected
		.iter()
		.map(|v| industry_label(v))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Which checks currently pass. Submit is enabled only when all do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormState {
	pub email_valid: bool,
	pub industries_valid: bool,
	pub captcha_valid: bool,
}

impl FormState {
	pub fn can_submit(&self) -> bool {
		self.email_valid && self.industries_valid && self.captcha_valid
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}
