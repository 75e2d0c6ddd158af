use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;
use log::debug;

use super::address::{ContactConfig, ContactLabel, mailto_href};
use crate::services::analytics::{Analytics, AnalyticsEvent, Gtag};

const TOUCH_NAVIGATE_DELAY: Duration = Duration::from_millis(800);

/// Mail link that shows its address on hover, or on first tap.
#[component]
pub fn ContactLink(#[prop(optional)] contact: Option<ContactConfig>) -> impl IntoView {
	let address = contact.unwrap_or_default().address();
	if address.is_none() {
		debug!("book-meeting: contact address not configured");
	}

	address.map(|address| {
		let href = mailto_href(&address);
		let label = RwSignal::new(ContactLabel::new(address));
		let target = href.clone();

		view! {
			<a
				id="contactEmail"
				class="contact-email"
				href=href
				on:mouseenter=move |_| label.update(ContactLabel::hover)
				on:mouseleave=move |_| label.update(ContactLabel::leave)
				on:touchstart=move |ev| {
					if label.try_update(ContactLabel::touch).unwrap_or(false) {
						ev.prevent_default();
						let target = target.clone();
						set_timeout(
							move || {
								if let Some(window) = web_sys::window() {
									let _ = window.location().set_href(&target);
								}
							},
							TOUCH_NAVIGATE_DELAY,
						);
					}
				}
				on:click=move |_| {
					Gtag.track(&AnalyticsEvent::engagement("contact_click", "email_contact", None))
				}
			>
				<span class="email-text">{move || label.with(|l| l.text().to_string())}</span>
			</a>
		}
	})
}
