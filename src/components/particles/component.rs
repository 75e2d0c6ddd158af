//! Leptos component hosting the particle canvas.
//!
//! Window resize, mouse, and touch events feed the driver; a
//! `requestAnimationFrame` loop calls [`ParticleDriver::tick`] once per frame.
//! Everything registered here is released when the component unmounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::canvas::{CanvasSurface, WindowViewport};
use super::config::ParticleConfig;
use super::simulation::{ParticleDriver, PointerInput};
use crate::components::listener::Subscription;

type SharedDriver = Rc<RefCell<ParticleDriver<CanvasSurface>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running particle animation: driver, input subscriptions, frame loop.
struct ParticleAnimation {
	driver: SharedDriver,
	subscriptions: Vec<Subscription>,
	frame: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl ParticleAnimation {
	fn start(canvas: Option<HtmlCanvasElement>, config: ParticleConfig) -> Option<Self> {
		let window = web_sys::window()?;
		let surface = canvas.and_then(CanvasSurface::new);
		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let driver = ParticleDriver::initialize(
			surface,
			&WindowViewport(window.clone()),
			config,
			seed,
		)?;
		let driver: SharedDriver = Rc::new(RefCell::new(driver));

		let mut animation = Self {
			driver,
			subscriptions: Vec::new(),
			frame: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
		};
		animation.subscribe(&window);
		animation.run_frames(&window);
		Some(animation)
	}

	fn subscribe(&mut self, window: &Window) {
		let driver = self.driver.clone();
		let on_resize = move |_: Event| {
			if let Some(win) = web_sys::window() {
				driver.borrow_mut().resize(&WindowViewport(win));
			}
		};

		let driver = self.driver.clone();
		let on_mouse_move = move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				driver.borrow_mut().handle_pointer(PointerInput::Move {
					x: ev.client_x() as f64,
					y: ev.client_y() as f64,
				});
			}
		};

		let driver = self.driver.clone();
		let on_touch_move = move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<TouchEvent>() {
				let first = ev
					.touches()
					.get(0)
					.map(|t| (t.client_x() as f64, t.client_y() as f64));
				driver
					.borrow_mut()
					.handle_pointer(PointerInput::TouchMove { first });
			}
		};

		let driver = self.driver.clone();
		let on_leave = move |_: Event| driver.borrow_mut().handle_pointer(PointerInput::Leave);

		let driver = self.driver.clone();
		let on_touch_end = move |_: Event| driver.borrow_mut().handle_pointer(PointerInput::TouchEnd);

		let subscriptions = [
			Subscription::new(window, "resize", on_resize),
			Subscription::new(window, "mousemove", on_mouse_move),
			Subscription::new(window, "touchmove", on_touch_move),
			Subscription::new(window, "touchend", on_touch_end),
			// `mouseleave` only fires on elements, so listen on the document.
			window
				.document()
				.and_then(|doc| Subscription::new(&doc, "mouseleave", on_leave)),
		];
		self.subscriptions.extend(subscriptions.into_iter().flatten());
	}

	fn run_frames(&self, window: &Window) {
		let (driver, frame, frame_id) =
			(self.driver.clone(), self.frame.clone(), self.frame_id.clone());
		*self.frame.borrow_mut() = Some(Closure::new(move || {
			driver.borrow_mut().tick();
			if let (Some(win), Some(cb)) = (web_sys::window(), frame.borrow().as_ref()) {
				frame_id.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *self.frame.borrow() {
			self.frame_id
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	}

	/// Stop the frame loop and drop every listener.
	fn dispose(self) {
		if let (Some(win), Some(id)) = (web_sys::window(), self.frame_id.take()) {
			let _ = win.cancel_animation_frame(id);
		}
		// Breaks the closure's reference cycle through `frame`.
		self.frame.borrow_mut().take();
		drop(self.subscriptions);
		if let Ok(driver) = Rc::try_unwrap(self.driver) {
			let _ = driver.into_inner().dispose();
		}
	}
}

/// Full-viewport decorative particle canvas.
///
/// Renders nothing interactive; pointer events pass through to the page.
#[component]
pub fn ParticleCanvas(#[prop(optional)] config: Option<ParticleConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animation = StoredValue::new_local(None::<ParticleAnimation>);
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let canvas: Option<HtmlCanvasElement> = canvas_ref.get().map(Into::into);
		if canvas.is_none() {
			return;
		}
		let started = ParticleAnimation::start(canvas, config.clone());
		animation.update_value(|slot| {
			if let Some(previous) = slot.take() {
				previous.dispose();
			}
			*slot = started;
		});
	});

	on_cleanup(move || {
		animation.try_update_value(|slot| {
			if let Some(running) = slot.take() {
				running.dispose();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="particleCanvas"
			class="particle-canvas"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		/>
	}
}
