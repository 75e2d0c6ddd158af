//! Tunable constants for the ambient particle field.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Functional `rgba()` notation, always carrying the alpha channel so
	/// gradient stops fade uniformly.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Particle field configuration.
///
/// Every field has a default, so a page config may override any subset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
	/// Canvas pixels per particle. Population is `floor(area / density)`.
	pub density: f64,
	/// Pointer distance below which particles are repelled and dimmed.
	pub interaction_radius: f64,
	/// Particle size range `[min, max)`.
	pub size_min: f64,
	pub size_max: f64,
	/// Opacity change per tick, drawn per particle from `[min, max)`.
	pub fade_speed_min: f64,
	pub fade_speed_max: f64,
	/// Displacement (pixels per tick) applied at zero pointer distance.
	pub push_strength: f64,
	/// Fraction of the remaining offset to the anchor closed each tick.
	pub return_rate: f64,
	/// Opacity removed at zero pointer distance.
	pub pointer_fade: f64,
	/// Gradient start color (top-left of each particle).
	pub color_start: Color,
	/// Gradient end color (bottom-right of each particle).
	pub color_end: Color,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			density: 15000.0,
			interaction_radius: 150.0,
			size_min: 1.0,
			size_max: 3.0,
			fade_speed_min: 0.002,
			fade_speed_max: 0.005,
			push_strength: 3.0,
			return_rate: 0.05,
			pointer_fade: 0.5,
			color_start: Color::rgb(102, 126, 234),
			color_end: Color::rgb(118, 75, 162),
		}
	}
}
