//! Browser implementations of the surface and viewport capabilities.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::surface::{LinearGradient, Rect, RenderSurface, Viewport};

/// A `<canvas>` element with its 2-D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquire the 2-D context. `None` if the canvas cannot provide one.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		Some(Self { canvas, ctx })
	}
}

impl RenderSurface for CanvasSurface {
	fn set_size(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn clear_rect(&mut self, rect: Rect) {
		self.ctx.clear_rect(rect.x, rect.y, rect.width, rect.height);
	}

	fn fill_rect_with_gradient(&mut self, gradient: &LinearGradient, rect: Rect) {
		let fill = self
			.ctx
			.create_linear_gradient(gradient.x0, gradient.y0, gradient.x1, gradient.y1);
		let _ = fill.add_color_stop(0.0, &gradient.start.to_css());
		let _ = fill.add_color_stop(1.0, &gradient.end.to_css());

		#[allow(deprecated)]
		self.ctx.set_fill_style(&fill);
		self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
	}
}

/// The browser window's inner size.
pub struct WindowViewport(pub Window);

impl Viewport for WindowViewport {
	fn size(&self) -> (f64, f64) {
		let width = self.0.inner_width().ok().and_then(|v| v.as_f64());
		let height = self.0.inner_height().ok().and_then(|v| v.as_f64());
		(width.unwrap_or(0.0), height.unwrap_or(0.0))
	}
}
