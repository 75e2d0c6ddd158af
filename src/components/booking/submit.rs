//! The booking submission sequence.
//!
//! Industries, then CAPTCHA, then the MX-backed email check, then delivery of
//! both messages. Once the provider has seen the token the CAPTCHA is reset,
//! whether or not delivery succeeded, since a token is single-use.

use log::{debug, info, warn};
use thiserror::Error;

use super::mailer::{MailConfig, MailError, MailSender, SubmissionStamp, admin_email, user_email};
use super::mx::{MxResolver, validate_email_with_mx};
use super::validation::{EmailIssue, INDUSTRIES_REQUIRED, validate_industries};
use crate::services::captcha::Captcha;

pub const CAPTCHA_REQUIRED: &str = "Please complete the reCAPTCHA verification.";
pub const DELIVERY_FAILED: &str =
	"Failed to submit form. Please try again or contact us directly.";

/// What the visitor entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitRequest {
	pub email: String,
	pub industries: Vec<String>,
}

/// Progress reported while a submission is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
	Verifying,
	Sending,
}

impl SubmitPhase {
	pub fn button_label(self) -> &'static str {
		match self {
			SubmitPhase::Verifying => "Verifying email...",
			SubmitPhase::Sending => "Submitting...",
		}
	}
}

pub const IDLE_BUTTON_LABEL: &str = "Submit";

/// Form field an error message belongs under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
	Email,
	Industries,
}

#[derive(Debug, Error)]
pub enum SubmitError {
	#[error("{}", INDUSTRIES_REQUIRED)]
	NoIndustries,
	#[error("{}", CAPTCHA_REQUIRED)]
	CaptchaIncomplete,
	#[error("{0}")]
	InvalidEmail(EmailIssue),
	#[error("{}", DELIVERY_FAILED)]
	Delivery(#[source] MailError),
}

impl SubmitError {
	pub fn field(&self) -> Field {
		match self {
			SubmitError::NoIndustries => Field::Industries,
			_ => Field::Email,
		}
	}

	/// Whether the visitor's progress (valid email, solved CAPTCHA) still
	/// stands after this error.
	pub fn keeps_form_state(&self) -> bool {
		match self {
			SubmitError::Delivery(e) => e.nothing_sent(),
			_ => true,
		}
	}
}

/// Admits one submission at a time. Held from the moment the visitor submits
/// until the attempt fails, or until the form resets after a success.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitGuard {
	busy: bool,
}

impl SubmitGuard {
	pub fn try_begin(&mut self) -> bool {
		if self.busy {
			return false;
		}
		self.busy = true;
		true
	}

	pub fn settle(&mut self, result: &Result<(), SubmitError>) {
		if result.is_err() {
			self.busy = false;
		}
	}

	pub fn release(&mut self) {
		self.busy = false;
	}

	pub fn is_busy(&self) -> bool {
		self.busy
	}
}

/// Collaborators a submission talks to.
pub struct Submission<'a, R, M, C> {
	pub resolver: &'a R,
	pub mailer: &'a M,
	pub captcha: &'a C,
	pub config: &'a MailConfig,
}

impl<R: MxResolver, M: MailSender, C: Captcha> Submission<'_, R, M, C> {
	pub async fn run(
		&self,
		request: &SubmitRequest,
		stamp: &SubmissionStamp,
		mut on_phase: impl FnMut(SubmitPhase),
	) -> Result<(), SubmitError> {
		validate_industries(&request.industries).map_err(|_| SubmitError::NoIndustries)?;

		let token = self
			.captcha
			.response()
			.ok_or(SubmitError::CaptchaIncomplete)?;

		on_phase(SubmitPhase::Verifying);
		validate_email_with_mx(self.resolver, &request.email)
			.await
			.map_err(SubmitError::InvalidEmail)?;

		on_phase(SubmitPhase::Sending);
		debug!("book-meeting: all checks passed, sending emails");
		let messages = [
			user_email(self.config, &request.email, &request.industries, &token, stamp),
			admin_email(self.config, &request.email, &request.industries, stamp),
		];
		let sent = self
			.mailer
			.send_all(&self.config.service_id, &messages)
			.await;
		if !matches!(&sent, Err(e) if e.nothing_sent()) {
			self.captcha.reset();
		}

		match sent {
			Ok(()) => {
				info!("book-meeting: booking emails sent");
				Ok(())
			}
			Err(e) => {
				warn!("book-meeting: failed to send emails: {e}");
				Err(SubmitError::Delivery(e))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pollster::block_on;

	use super::*;
	use crate::services::fakes::{RecordingMailer, ScriptedCaptcha, ScriptedResolver};

	fn stamp() -> SubmissionStamp {
		SubmissionStamp {
			year: 2026,
			display: "today".into(),
		}
	}

	fn request(email: &str, industries: &[&str]) -> SubmitRequest {
		SubmitRequest {
			email: email.into(),
			industries: industries.iter().map(|s| s.to_string()).collect(),
		}
	}

	#[test]
	fn test_successful_submission() {
		let (resolver, mailer, captcha) = (
			ScriptedResolver::with_mx(&["acme.io"]),
			RecordingMailer::default(),
			ScriptedCaptcha::solved("tok"),
		);
		let config = MailConfig::default();
		let submission = Submission {
			resolver: &resolver,
			mailer: &mailer,
			captcha: &captcha,
			config: &config,
		};
		let mut phases = Vec::new();

		let result = block_on(submission.run(
			&request("jane@acme.io", &["retail"]),
			&stamp(),
			|p| phases.push(p),
		));

		assert!(result.is_ok());
		assert_eq!(phases, vec![SubmitPhase::Verifying, SubmitPhase::Sending]);
		let sent = mailer.sent();
		assert_eq!(sent.len(), 1);
		let (service, messages) = &sent[0];
		assert_eq!(service, "service_rh40qdg");
		assert_eq!(messages.len(), 2);
		assert_eq!(messages[0].params["g-recaptcha-response"], "tok");
		assert_eq!(messages[1].params["to_email"], "we@deteqt.ai");
		assert_eq!(captcha.resets(), 1);
	}

	#[test]
	fn test_checks_run_in_order() {
		let (resolver, mailer) = (ScriptedResolver::with_mx(&[]), RecordingMailer::default());
		let config = MailConfig::default();

		let unsolved = ScriptedCaptcha::unsolved();
		let submission = Submission {
			resolver: &resolver,
			mailer: &mailer,
			captcha: &unsolved,
			config: &config,
		};
		let err = block_on(submission.run(&request("bad", &[]), &stamp(), |_| {})).unwrap_err();
		assert!(matches!(err, SubmitError::NoIndustries));
		assert_eq!(err.field(), Field::Industries);
		assert_eq!(err.to_string(), "Please select at least one industry.");

		let err =
			block_on(submission.run(&request("bad", &["retail"]), &stamp(), |_| {})).unwrap_err();
		assert!(matches!(err, SubmitError::CaptchaIncomplete));
		assert_eq!(err.field(), Field::Email);

		let solved = ScriptedCaptcha::solved("tok");
		let submission = Submission {
			captcha: &solved,
			..submission
		};
		let err = block_on(submission.run(&request("jane@acme.io", &["retail"]), &stamp(), |_| {}))
			.unwrap_err();
		assert!(matches!(
			err,
			SubmitError::InvalidEmail(EmailIssue::Undeliverable)
		));

		assert!(mailer.sent().is_empty());
		assert_eq!(solved.resets(), 0);
	}

	#[test]
	fn test_delivery_failure_resets_captcha() {
		let (resolver, mailer, captcha) = (
			ScriptedResolver::failing(),
			RecordingMailer::rejecting(),
			ScriptedCaptcha::solved("tok"),
		);
		let config = MailConfig::default();
		let submission = Submission {
			resolver: &resolver,
			mailer: &mailer,
			captcha: &captcha,
			config: &config,
		};

		let err = block_on(submission.run(&request("jane@acme.io", &["retail"]), &stamp(), |_| {}))
			.unwrap_err();
		assert!(matches!(err, SubmitError::Delivery(_)));
		assert_eq!(
			err.to_string(),
			"Failed to submit form. Please try again or contact us directly."
		);
		assert_eq!(captcha.resets(), 1);
		assert!(!err.keeps_form_state());
	}

	#[test]
	fn test_missing_provider_keeps_captcha() {
		let (resolver, mailer, captcha) = (
			ScriptedResolver::with_mx(&["acme.io"]),
			RecordingMailer::unavailable(),
			ScriptedCaptcha::solved("tok"),
		);
		let config = MailConfig::default();
		let submission = Submission {
			resolver: &resolver,
			mailer: &mailer,
			captcha: &captcha,
			config: &config,
		};

		let err = block_on(submission.run(&request("jane@acme.io", &["retail"]), &stamp(), |_| {}))
			.unwrap_err();
		assert!(matches!(err, SubmitError::Delivery(MailError::Unavailable)));
		assert!(err.keeps_form_state());
		assert_eq!(captcha.resets(), 0);
	}

	#[test]
	fn test_guard_admits_one_submission() {
		let mut guard = SubmitGuard::default();
		assert!(guard.try_begin());
		assert!(!guard.try_begin());
		assert!(guard.is_busy());

		guard.settle(&Err(SubmitError::CaptchaIncomplete));
		assert!(!guard.is_busy());

		assert!(guard.try_begin());
		guard.settle(&Ok(()));
		// Stays locked until the form is reset after success.
		assert!(!guard.try_begin());
		guard.release();
		assert!(guard.try_begin());
	}

	#[test]
	fn test_button_labels() {
		assert_eq!(SubmitPhase::Verifying.button_label(), "Verifying email...");
		assert_eq!(SubmitPhase::Sending.button_label(), "Submitting...");
	}
}
