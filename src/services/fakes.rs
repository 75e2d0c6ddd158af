//! In-memory collaborators for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::analytics::{Analytics, AnalyticsEvent};
use super::captcha::{Captcha, CaptchaRenderer, WidgetId};
use super::storage::{PreferenceStore, StorageError};
use crate::components::booking::{
	DnsAnswer, DnsResponse, LookupError, MailError, MailSender, MxResolver, OutgoingEmail,
};

/// Local storage double; `unavailable()` rejects every write and reads empty.
#[derive(Default)]
pub struct MemoryStore {
	items: RefCell<HashMap<String, String>>,
	unavailable: bool,
}

impl MemoryStore {
	pub fn unavailable() -> Self {
		Self {
			unavailable: true,
			..Self::default()
		}
	}

	pub fn with(key: &str, value: &str) -> Self {
		let store = Self::default();
		store.items.borrow_mut().insert(key.into(), value.into());
		store
	}
}

impl PreferenceStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		if self.unavailable {
			return None;
		}
		self.items.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		if self.unavailable {
			return Err(StorageError::Unavailable);
		}
		self.items.borrow_mut().insert(key.into(), value.into());
		Ok(())
	}
}

#[derive(Default)]
pub struct RecordingAnalytics {
	pub events: RefCell<Vec<AnalyticsEvent>>,
}

impl Analytics for RecordingAnalytics {
	fn track(&self, event: &AnalyticsEvent) {
		self.events.borrow_mut().push(event.clone());
	}
}

pub struct ScriptedCaptcha {
	token: Option<String>,
	resets: Cell<usize>,
}

impl ScriptedCaptcha {
	pub fn solved(token: &str) -> Self {
		Self {
			token: Some(token.into()),
			resets: Cell::new(0),
		}
	}

	pub fn unsolved() -> Self {
		Self {
			token: None,
			resets: Cell::new(0),
		}
	}

	pub fn resets(&self) -> usize {
		self.resets.get()
	}
}

impl Captcha for ScriptedCaptcha {
	fn response(&self) -> Option<String> {
		self.token.clone()
	}

	fn reset(&self) {
		self.resets.set(self.resets.get() + 1);
	}
}

/// Stands in for the reCAPTCHA script; `loading()` refuses until
/// `finish_loading` is called.
pub struct ScriptedRenderer {
	ready: Cell<bool>,
	next_id: Cell<i32>,
	requests: RefCell<Vec<String>>,
}

impl ScriptedRenderer {
	pub fn ready() -> Self {
		Self {
			ready: Cell::new(true),
			next_id: Cell::new(0),
			requests: RefCell::new(Vec::new()),
		}
	}

	pub fn loading() -> Self {
		let renderer = Self::ready();
		renderer.ready.set(false);
		renderer
	}

	pub fn finish_loading(&self) {
		self.ready.set(true);
	}

	/// Site keys of every render attempt, including refused ones.
	pub fn requests(&self) -> Vec<String> {
		self.requests.borrow().clone()
	}
}

impl CaptchaRenderer for ScriptedRenderer {
	type Container = &'static str;

	fn render(&self, _container: &&'static str, site_key: &str) -> Option<WidgetId> {
		self.requests.borrow_mut().push(site_key.to_string());
		if !self.ready.get() {
			return None;
		}
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		Some(WidgetId(id))
	}
}

/// Answers MX queries from a fixed domain list, or fails every lookup.
pub struct ScriptedResolver {
	mx_domains: Vec<String>,
	failing: bool,
	queries: RefCell<Vec<String>>,
}

impl ScriptedResolver {
	pub fn with_mx(domains: &[&str]) -> Self {
		Self {
			mx_domains: domains.iter().map(|d| d.to_string()).collect(),
			failing: false,
			queries: RefCell::new(Vec::new()),
		}
	}

	pub fn failing() -> Self {
		Self {
			failing: true,
			..Self::with_mx(&[])
		}
	}

	pub fn queries(&self) -> Vec<String> {
		self.queries.borrow().clone()
	}
}

impl MxResolver for ScriptedResolver {
	async fn lookup(&self, domain: &str) -> Result<DnsResponse, LookupError> {
		self.queries.borrow_mut().push(domain.to_string());
		if self.failing {
			return Err(LookupError::Status(503));
		}
		let answer = if self.mx_domains.iter().any(|d| d == domain) {
			vec![DnsAnswer {
				name: format!("{domain}."),
				record_type: 15,
				data: format!("10 mx.{domain}."),
			}]
		} else {
			Vec::new()
		};
		Ok(DnsResponse { status: 0, answer })
	}
}

#[derive(Default)]
pub struct RecordingMailer {
	rejecting: bool,
	unavailable: bool,
	sent: RefCell<Vec<(String, Vec<OutgoingEmail>)>>,
}

impl RecordingMailer {
	pub fn rejecting() -> Self {
		Self {
			rejecting: true,
			..Self::default()
		}
	}

	/// The provider library never loaded.
	pub fn unavailable() -> Self {
		Self {
			unavailable: true,
			..Self::default()
		}
	}

	pub fn sent(&self) -> Vec<(String, Vec<OutgoingEmail>)> {
		self.sent.borrow().clone()
	}
}

impl MailSender for RecordingMailer {
	async fn send_all(&self, service_id: &str, messages: &[OutgoingEmail]) -> Result<(), MailError> {
		if self.unavailable {
			return Err(MailError::Unavailable);
		}
		if self.rejecting {
			return Err(MailError::Rejected("quota exceeded".into()));
		}
		self.sent
			.borrow_mut()
			.push((service_id.to_string(), messages.to_vec()));
		Ok(())
	}
}
