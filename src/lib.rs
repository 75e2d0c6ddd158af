//! book-meeting: client-side "book a meeting" page.
//!
//! A decorative particle canvas sits behind a booking form that only accepts
//! deliverable company email addresses. The page also carries a persistent
//! light/dark toggle and an obfuscated contact link.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;
pub mod services;

pub use components::booking::BookingForm;
pub use components::contact::ContactLink;
pub use components::particles::ParticleCanvas;
pub use components::theme::ThemeToggle;
pub use config::{PageConfig, load_page_config};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("book-meeting: logging initialized");
}

/// Main application component.
/// Reads the page config from the DOM and lays out the page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let PageConfig {
		mail,
		contact,
		particles,
		recaptcha_site_key,
	} = load_page_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Book a Meeting | Deteqt" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleCanvas config=particles />

		<header class="page-header">
			<img id={components::theme::LOGO_ID} class="logo" alt="Deteqt" src="assets/images/deteqt-logo-white.svg" />
			<ThemeToggle />
		</header>

		<main class="booking-page">
			<h1>"Book a Meeting"</h1>
			<p class="subtitle">"Tell us where you work and we'll get back to you."</p>
			<BookingForm mail=mail site_key=recaptcha_site_key />
		</main>

		<footer class="page-footer">
			<ContactLink contact=contact />
		</footer>
	}
}
