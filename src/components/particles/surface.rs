//! Drawing and viewport capabilities consumed by the particle simulation.
//!
//! The simulation never touches the DOM directly. The browser implementations
//! live in `canvas.rs`; tests supply recording fakes.

use super::config::Color;

/// A two-stop linear gradient from `(x0, y0)` to `(x1, y1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
	pub x0: f64,
	pub y0: f64,
	pub x1: f64,
	pub y1: f64,
	pub start: Color,
	pub end: Color,
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

/// A 2-D surface the simulation renders onto.
pub trait RenderSurface {
	/// Resize the backing store to `width x height` pixels.
	fn set_size(&mut self, width: f64, height: f64);
	/// Clear a rectangle to transparent.
	fn clear_rect(&mut self, rect: Rect);
	/// Fill a rectangle with a linear gradient.
	fn fill_rect_with_gradient(&mut self, gradient: &LinearGradient, rect: Rect);
}

/// Source of the current viewport dimensions.
pub trait Viewport {
	fn size(&self) -> (f64, f64);
}

impl Viewport for (f64, f64) {
	fn size(&self) -> (f64, f64) {
		*self
	}
}
