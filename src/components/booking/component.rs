//! Leptos component for the booking form.
//!
//! Field state lives in signals; the pure rules in `field`, `validation` and
//! `submit` decide what changes. Timers, the CAPTCHA poll, and in-flight
//! requests only touch signals through `try_*` so they are harmless after
//! unmount.

use std::time::Duration;

use leptos::leptos_dom::helpers::{
	TimeoutHandle, event_target_checked, event_target_value, set_interval_with_handle,
	set_timeout_with_handle,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement};

use super::field::{EmailField, Feedback};
use super::mailer::MailConfig;
use super::mx::validate_email_with_mx;
use super::submit::{
	IDLE_BUTTON_LABEL, Submission, SubmitError, SubmitGuard, SubmitPhase, SubmitRequest,
};
use super::validation::{
	FormState, INDUSTRIES, INDUSTRIES_REQUIRED, toggle_industry, validate_industries,
};
use crate::services::analytics::{Analytics, AnalyticsEvent, Gtag};
use crate::services::captcha::{Captcha, Recaptcha, RecaptchaRenderer, WidgetId, WidgetMount};
use crate::services::clock::submission_stamp;
use crate::services::dns::DohResolver;
use crate::services::emailjs::EmailJs;

const TYPING_DELAY: Duration = Duration::from_millis(800);
const LATIN_WARNING: Duration = Duration::from_secs(2);
const CAPTCHA_POLL: Duration = Duration::from_millis(500);
const RESET_AFTER_SUCCESS: Duration = Duration::from_secs(5);

type TimerSlot = StoredValue<Option<TimeoutHandle>>;

/// Cancel whatever is pending in `slot` and schedule `f` in its place.
fn restart_timer(slot: TimerSlot, delay: Duration, f: impl FnOnce() + 'static) {
	cancel_timer(slot);
	slot.try_update_value(|pending| *pending = set_timeout_with_handle(f, delay).ok());
}

fn cancel_timer(slot: TimerSlot) {
	if let Some(handle) = slot.try_update_value(Option::take).flatten() {
		handle.clear();
	}
}

/// Email plus industry selection, guarded by reCAPTCHA, delivered by EmailJS.
#[component]
pub fn BookingForm(
	#[prop(optional)] mail: Option<MailConfig>,
	/// reCAPTCHA site key; the widget is omitted without one.
	#[prop(optional_no_strip)]
	site_key: Option<String>,
) -> impl IntoView {
	let mail = StoredValue::new(mail.unwrap_or_default());
	let has_captcha = site_key.is_some();
	let site_key = StoredValue::new(site_key);

	let field = RwSignal::new(EmailField::default());
	let industries = RwSignal::new(Vec::<String>::new());
	let industries_error = RwSignal::new(None::<&'static str>);
	let state = RwSignal::new(FormState::default());
	let guard = RwSignal::new(SubmitGuard::default());
	let button_label = RwSignal::new(IDLE_BUTTON_LABEL);
	let submitted = RwSignal::new(false);

	let input_ref = NodeRef::<leptos::html::Input>::new();
	let industries_ref = NodeRef::<leptos::html::Div>::new();
	let captcha_ref = NodeRef::<leptos::html::Div>::new();
	let widget = StoredValue::new(WidgetMount::default());
	let typing_timer: TimerSlot = StoredValue::new(None);
	let latin_timer: TimerSlot = StoredValue::new(None);
	let reset_timer: TimerSlot = StoredValue::new(None);

	Effect::new(move |_| {
		let s = state.get();
		debug!(
			"book-meeting: form state email={} industries={} captcha={} enabled={}",
			s.email_valid,
			s.industries_valid,
			s.captcha_valid,
			s.can_submit()
		);
	});

	// Renders the widget once the script is ready; a no-op afterwards.
	let mount_widget = move || -> Option<WidgetId> {
		let key = site_key.try_get_value().flatten()?;
		let container = captcha_ref.get_untracked()?;
		let container: &web_sys::Element = &container;
		widget
			.try_update_value(|mount| mount.ensure(&RecaptchaRenderer, container, &key))
			.flatten()
	};

	Effect::new(move |_| {
		if captcha_ref.get().is_some() {
			mount_widget();
		}
	});

	let poll = set_interval_with_handle(
		move || {
			let solved = Recaptcha::new(mount_widget()).response().is_some();
			let changed = state
				.try_with_untracked(|s| s.captcha_valid != solved)
				.unwrap_or(false);
			if changed {
				debug!("book-meeting: captcha solved={solved}");
				state.update(|s| s.captcha_valid = solved);
			}
		},
		CAPTCHA_POLL,
	)
	.ok();

	on_cleanup(move || {
		if let Some(handle) = poll {
			handle.clear();
		}
		cancel_timer(typing_timer);
		cancel_timer(latin_timer);
		cancel_timer(reset_timer);
	});

	let on_input = move |ev: Event| {
		let raw = event_target_value(&ev);
		let email_valid = state.get_untracked().email_valid;
		let Some(outcome) = field.try_update(|f| f.on_input(&raw, email_valid)) else {
			return;
		};

		if outcome.latin_removed {
			if let Some(input) = input_ref.get_untracked() {
				let cursor = input.selection_start().ok().flatten().unwrap_or(0);
				input.set_value(&outcome.value);
				let cursor = cursor.saturating_sub(1);
				let _ = input.set_selection_range(cursor, cursor);
			}
			let filtered = outcome.value.clone();
			restart_timer(latin_timer, LATIN_WARNING, move || {
				field.try_update(|f| f.on_latin_timeout(&filtered));
			});
		}

		if outcome.check_pending {
			restart_timer(typing_timer, TYPING_DELAY, move || {
				let email_valid = state.try_get_untracked().is_some_and(|s| s.email_valid);
				field.try_update(|f| f.on_typing_pause(email_valid));
			});
		} else {
			cancel_timer(typing_timer);
		}
	};

	let on_focus = move |_| {
		let email_valid = state.get_untracked().email_valid;
		field.update(|f| f.on_focus(email_valid));
	};

	let on_blur = move |_| {
		let Some(email) = field.try_update(|f| f.begin_verification()).flatten() else {
			state.update(|s| s.email_valid = false);
			return;
		};
		debug!("book-meeting: verifying {email} on blur");
		spawn_local(async move {
			let result = validate_email_with_mx(&DohResolver, &email).await;
			let valid = field
				.try_update(|f| f.finish_verification(result))
				.unwrap_or(false);
			state.try_update(|s| s.email_valid = valid);
		});
	};

	let on_industry = move |value: &'static str, checked: bool| {
		industries.update(|s| toggle_industry(s, value, checked));
		let verdict = industries.with(|s| validate_industries(s));
		industries_error.set(verdict.err());
		state.update(|s| s.industries_valid = verdict.is_ok());
	};

	let focus_first_industry = move || {
		let first = industries_ref
			.get_untracked()
			.and_then(|container| container.query_selector("input[type=\"checkbox\"]").ok().flatten())
			.and_then(|el| el.dyn_into::<HtmlElement>().ok());
		if let Some(first) = first {
			let _ = first.focus();
		}
	};

	let reset_form = move || {
		field.try_set(EmailField::default());
		industries.try_set(Vec::new());
		industries_error.try_set(None);
		state.try_update(FormState::reset);
		submitted.try_set(false);
		guard.try_update(SubmitGuard::release);
		button_label.try_set(IDLE_BUTTON_LABEL);
	};

	let submit = move || {
		let Some(config) = mail.try_get_value() else {
			return;
		};
		if !guard.try_update(SubmitGuard::try_begin).unwrap_or(false) {
			return;
		}
		let request = SubmitRequest {
			email: field.with_untracked(|f| f.trimmed().to_string()),
			industries: industries.get_untracked(),
		};
		let captcha = Recaptcha::new(widget.try_with_value(WidgetMount::widget).flatten());
		debug!("book-meeting: form submitted for {}", request.email);

		spawn_local(async move {
			let mailer = EmailJs::new(config.public_key.clone());
			let submission = Submission {
				resolver: &DohResolver,
				mailer: &mailer,
				captcha: &captcha,
				config: &config,
			};
			let result = submission
				.run(&request, &submission_stamp(), |phase| {
					button_label.try_set(phase.button_label());
					if phase == SubmitPhase::Sending {
						field.try_update(EmailField::clear);
					}
				})
				.await;
			guard.try_update(|g| g.settle(&result));

			match result {
				Ok(()) => {
					submitted.try_set(true);
					Gtag.track(&AnalyticsEvent::engagement("form_submit", "book_meeting", Some(1)));
					restart_timer(reset_timer, RESET_AFTER_SUCCESS, reset_form);
				}
				Err(SubmitError::NoIndustries) => {
					industries_error.try_set(Some(INDUSTRIES_REQUIRED));
					focus_first_industry();
				}
				Err(e @ SubmitError::CaptchaIncomplete) => {
					field.try_update(|f| f.show_error(e.to_string()));
				}
				Err(SubmitError::InvalidEmail(issue)) => {
					field.try_update(|f| f.show_error(issue.to_string()));
					if let Some(input) = input_ref.get_untracked() {
						let _ = input.focus();
					}
					state.try_update(|s| s.email_valid = false);
					button_label.try_set(IDLE_BUTTON_LABEL);
				}
				Err(e @ SubmitError::Delivery(_)) => {
					button_label.try_set(IDLE_BUTTON_LABEL);
					if !e.keeps_form_state() {
						state.try_update(FormState::reset);
					}
					field.try_update(|f| f.show_error(e.to_string()));
				}
			}
		});
	};

	let checkboxes = INDUSTRIES
		.iter()
		.map(|&(value, label)| {
			view! {
				<label class="checkbox-label">
					<input
						type="checkbox"
						name="industries"
						value=value
						prop:checked=move || industries.with(|s| s.iter().any(|v| v == value))
						on:change=move |ev| on_industry(value, event_target_checked(&ev))
					/>
					<span>{label}</span>
				</label>
			}
		})
		.collect_view();

	view! {
		<form
			id="bookingForm"
			class="booking-form"
			novalidate=true
			style:display=move || if submitted.get() { "none" } else { "flex" }
			on:submit=move |ev| {
				ev.prevent_default();
				submit();
			}
		>
			<div class="form-group">
				<label for="email">"Work email"</label>
				<input
					node_ref=input_ref
					type="email"
					id="email"
					name="email"
					autocomplete="email"
					placeholder="you@company.com"
					class:error=move || field.with(|f| f.feedback.is_error())
					class:validating=move || field.with(|f| f.feedback == Feedback::Verifying)
					prop:value=move || field.with(|f| f.value.clone())
					on:input=on_input
					on:focus=on_focus
					on:blur=on_blur
					on:keypress=move |ev| {
						if ev.key() == "Enter" {
							ev.prevent_default();
							submit();
						}
					}
				/>
				<span
					id="email-error"
					class="error-message"
					role="alert"
					style:color=move || {
						if field.with(|f| f.feedback == Feedback::Verifying) { "#666" } else { "" }
					}
				>
					{move || field.with(|f| f.feedback.message().to_string())}
				</span>
			</div>

			<div class="form-group">
				<span class="group-label">"Industries"</span>
				<div
					node_ref=industries_ref
					id="industries"
					class="checkbox-group"
					class:error=move || industries_error.get().is_some()
				>
					{checkboxes}
				</div>
				<span id="industries-error" class="error-message" role="alert">
					{move || industries_error.get().unwrap_or_default()}
				</span>
			</div>

			{has_captcha
				.then(|| view! { <div node_ref=captcha_ref id="recaptcha" class="recaptcha-container"></div> })}

			<button
				type="submit"
				id="submit-button"
				class="submit-button"
				disabled=move || guard.get().is_busy() || !state.get().can_submit()
			>
				<span class="button-text">{move || button_label.get()}</span>
			</button>
		</form>

		<div
			id="successMessage"
			class="success-message"
			style:display=move || if submitted.get() { "flex" } else { "none" }
		>
			<h2>"Thank you!"</h2>
			<p>"Check your inbox for a confirmation. We'll be in touch shortly."</p>
		</div>
	}
}
