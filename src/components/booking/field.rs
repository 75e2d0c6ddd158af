//! Email-field state: current value plus the message shown beneath it.
//!
//! Event handlers in the component translate DOM events into calls here and
//! own the timers; this type decides what the visitor sees.

use super::validation::{EmailIssue, LATIN_ONLY, restrict_to_latin, validate_email};

/// Text shown beneath the field.
pub const VERIFYING: &str = "Verifying email domain...";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Feedback {
	#[default]
	None,
	/// The MX lookup is in flight.
	Verifying,
	Error(String),
}

impl Feedback {
	pub fn message(&self) -> &str {
		match self {
			Feedback::None => "",
			Feedback::Verifying => VERIFYING,
			Feedback::Error(message) => message,
		}
	}

	pub fn is_error(&self) -> bool {
		matches!(self, Feedback::Error(_))
	}

	fn is_latin_warning(&self) -> bool {
		matches!(self, Feedback::Error(m) if m == LATIN_ONLY)
	}
}

/// What the component must schedule after an input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputOutcome {
	/// Disallowed characters were stripped; `value` is what remains.
	pub latin_removed: bool,
	pub value: String,
	/// A debounced format check should run.
	pub check_pending: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailField {
	pub value: String,
	pub feedback: Feedback,
}

impl EmailField {
	pub fn show_error(&mut self, message: impl Into<String>) {
		self.feedback = Feedback::Error(message.into());
	}

	pub fn clear(&mut self) {
		self.feedback = Feedback::None;
	}

	pub fn trimmed(&self) -> &str {
		self.value.trim()
	}

	pub fn on_input(&mut self, raw: &str, email_valid: bool) -> InputOutcome {
		let filtered = restrict_to_latin(raw);
		self.value = filtered.value;
		if filtered.removed {
			self.show_error(LATIN_ONLY);
		} else if self.feedback.is_latin_warning() {
			self.clear();
		}

		let check_pending = !self.trimmed().is_empty();
		if !check_pending && (email_valid || self.feedback == Feedback::None) {
			self.clear();
		}

		InputOutcome {
			latin_removed: filtered.removed,
			value: self.value.clone(),
			check_pending,
		}
	}

	/// The Latin warning expires unless the visitor has typed since.
	pub fn on_latin_timeout(&mut self, filtered: &str) {
		if self.value == filtered && self.feedback.is_latin_warning() {
			self.clear();
		}
	}

	/// Debounced format check. Never clears an MX error on its own.
	pub fn on_typing_pause(&mut self, email_valid: bool) {
		match validate_email(self.trimmed()) {
			Err(issue) => self.show_error(issue.to_string()),
			Ok(()) if email_valid => self.clear(),
			Ok(()) => {}
		}
	}

	/// Keep an existing error visible while the visitor corrects it.
	pub fn on_focus(&mut self, email_valid: bool) {
		if email_valid || self.trimmed().is_empty() {
			self.clear();
		}
	}

	/// Start the blur-time MX check. Returns the address to verify, or `None`
	/// for an empty field (which is cleared instead).
	pub fn begin_verification(&mut self) -> Option<String> {
		let email = self.trimmed().to_string();
		if email.is_empty() {
			self.clear();
			return None;
		}
		self.feedback = Feedback::Verifying;
		Some(email)
	}

	/// Record the verdict; returns whether the address is valid.
	pub fn finish_verification(&mut self, result: Result<(), EmailIssue>) -> bool {
		match result {
			Ok(()) => {
				self.clear();
				true
			}
			Err(issue) => {
				self.show_error(issue.to_string());
				false
			}
		}
	}
}
