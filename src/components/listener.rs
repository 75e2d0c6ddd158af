//! DOM event subscriptions that unregister themselves on drop.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// A live `addEventListener` registration.
///
/// Dropping it removes the listener and frees the closure.
pub struct Subscription {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Subscription {
	/// Register `handler` for `event` on `target`. Returns `None` if the
	/// browser rejects the registration.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
