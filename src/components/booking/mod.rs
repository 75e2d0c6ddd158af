//! Meeting-request form.
//!
//! A visitor enters a company email address and picks one or more industries.
//! The address is checked for shape, rejected if it belongs to a free mailbox
//! provider, and its domain must publish MX records. After the reCAPTCHA is
//! solved, a confirmation goes to the visitor and a notification to the team.
//!
//! # Example
//!
//! ```ignore
//! use book_meeting::components::booking::{BookingForm, MailConfig};
//!
//! view! { <BookingForm mail=MailConfig::default() site_key=Some("6Lc...".into()) /> }
//! ```

mod component;
mod field;
mod mailer;
mod mx;
mod submit;
mod validation;

pub use component::BookingForm;
pub use field::{EmailField, Feedback, InputOutcome, VERIFYING};
pub use mailer::{
	MailConfig, MailError, MailSender, OutgoingEmail, SubmissionStamp, admin_email, user_email,
};
pub use mx::{
	DOH_ENDPOINT, DnsAnswer, DnsResponse, LookupError, MxCheck, MxResolver, check_mx,
	dns_query_url, encode_component, validate_email_with_mx,
};
pub use submit::{
	CAPTCHA_REQUIRED, DELIVERY_FAILED, Field, IDLE_BUTTON_LABEL, Submission, SubmitError,
	SubmitGuard, SubmitPhase, SubmitRequest,
};
pub use validation::{
	EmailIssue, FREE_EMAIL_PROVIDERS, FormState, INDUSTRIES, INDUSTRIES_REQUIRED, LATIN_ONLY,
	LatinFilter, email_domain, industries_list, industry_label, restrict_to_latin,
	toggle_industry, validate_email, validate_industries,
};
