//! A single ambient particle: pulsing opacity, pointer repulsion, and a slow
//! return to its anchor.

use rand::Rng;

use super::config::ParticleConfig;
use super::surface::{LinearGradient, Rect, RenderSurface};

/// Canvas extent in pixels. Valid positions are `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn area(&self) -> f64 {
		self.width * self.height
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
	}
}

/// Latest pointer snapshot plus the fixed interaction radius.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
	/// `None` while no pointer is over the page.
	pub position: Option<(f64, f64)>,
	pub radius: f64,
}

impl PointerState {
	pub fn new(radius: f64) -> Self {
		Self {
			position: None,
			radius,
		}
	}

	pub fn is_active(&self) -> bool {
		self.position.is_some()
	}
}

/// Uniform sample from `[min, max)`. A degenerate range yields `min`.
pub(crate) fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
	min + rng.r#gen::<f64>() * (max - min)
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Rest position the particle relaxes toward when undisturbed.
	pub base_x: f64,
	pub base_y: f64,
	pub size: f64,
	/// Always within `[0, 1]`.
	pub opacity: f64,
	/// `1.0` while fading in, `-1.0` while fading out.
	pub fade_direction: f64,
	pub fade_speed: f64,
}

impl Particle {
	pub fn new<R: Rng>(bounds: Bounds, config: &ParticleConfig, rng: &mut R) -> Self {
		let mut particle = Self {
			x: 0.0,
			y: 0.0,
			base_x: 0.0,
			base_y: 0.0,
			size: config.size_min,
			opacity: 0.0,
			fade_direction: 1.0,
			fade_speed: config.fade_speed_min,
		};
		particle.reset(bounds, config, rng);
		particle.opacity = rng.r#gen::<f64>();
		particle.fade_direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
		particle.fade_speed = uniform(rng, config.fade_speed_min, config.fade_speed_max);
		particle
	}

	/// Move to a fresh random location and anchor there.
	pub fn reset<R: Rng>(&mut self, bounds: Bounds, config: &ParticleConfig, rng: &mut R) {
		self.x = rng.r#gen::<f64>() * bounds.width;
		self.y = rng.r#gen::<f64>() * bounds.height;
		self.size = uniform(rng, config.size_min, config.size_max);
		self.base_x = self.x;
		self.base_y = self.y;
	}

	/// Advance one tick.
	///
	/// Fade runs first, then pointer dimming subtracts from the faded value.
	pub fn update<R: Rng>(
		&mut self,
		pointer: &PointerState,
		bounds: Bounds,
		config: &ParticleConfig,
		rng: &mut R,
	) {
		self.opacity += self.fade_speed * self.fade_direction;
		if self.opacity >= 1.0 {
			self.opacity = 1.0;
			self.fade_direction = -1.0;
		} else if self.opacity <= 0.0 {
			self.opacity = 0.0;
			self.fade_direction = 1.0;
		}

		let repelled = pointer.position.and_then(|(px, py)| {
			let (dx, dy) = (px - self.x, py - self.y);
			let distance = (dx * dx + dy * dy).sqrt();
			(distance < pointer.radius).then_some((dx, dy, distance))
		});

		match repelled {
			Some((dx, dy, distance)) => {
				let proximity = 1.0 - distance / pointer.radius;
				self.opacity = (self.opacity - proximity * config.pointer_fade).max(0.0);

				let angle = dy.atan2(dx);
				let force = (pointer.radius - distance) / pointer.radius;
				self.x -= angle.cos() * force * config.push_strength;
				self.y -= angle.sin() * force * config.push_strength;
			}
			None => {
				self.x += (self.base_x - self.x) * config.return_rate;
				self.y += (self.base_y - self.y) * config.return_rate;
			}
		}

		if !bounds.contains(self.x, self.y) {
			self.reset(bounds, config, rng);
		}
	}

	/// Fill a `size`-wide square centered on the particle.
	pub fn draw<S: RenderSurface>(&self, surface: &mut S, config: &ParticleConfig) {
		let gradient = LinearGradient {
			x0: self.x - self.size,
			y0: self.y - self.size,
			x1: self.x + self.size,
			y1: self.y + self.size,
			start: config.color_start.with_alpha(self.opacity),
			end: config.color_end.with_alpha(self.opacity),
		};
		surface.fill_rect_with_gradient(
			&gradient,
			Rect {
				x: self.x - self.size / 2.0,
				y: self.y - self.size / 2.0,
				width: self.size,
				height: self.size,
			},
		);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::surface::testing::RecordingSurface;
	use super::*;

	const BOUNDS: Bounds = Bounds {
		width: 1000.0,
		height: 800.0,
	};

	fn still_particle(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			base_x: x,
			base_y: y,
			size: 2.0,
			opacity: 0.5,
			fade_direction: 1.0,
			fade_speed: 0.0,
		}
	}

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(7)
	}

	#[test]
	fn test_new_particle_in_ranges() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		for _ in 0..200 {
			let p = Particle::new(BOUNDS, &config, &mut rng);
			assert!(BOUNDS.contains(p.x, p.y));
			assert_eq!((p.x, p.y), (p.base_x, p.base_y));
			assert!((1.0..3.0).contains(&p.size));
			assert!((0.0..1.0).contains(&p.opacity));
			assert!(p.fade_direction == 1.0 || p.fade_direction == -1.0);
			assert!((0.002..0.005).contains(&p.fade_speed));
		}
	}

	#[test]
	fn test_reset_twice_gives_independent_valid_positions() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let mut p = still_particle(10.0, 10.0);
		p.reset(BOUNDS, &config, &mut rng);
		let first = (p.x, p.y);
		p.reset(BOUNDS, &config, &mut rng);
		assert!(BOUNDS.contains(first.0, first.1));
		assert!(BOUNDS.contains(p.x, p.y));
		assert_ne!(first, (p.x, p.y));
		assert_eq!((p.base_x, p.base_y), (p.x, p.y));
	}

	#[test]
	fn test_fade_is_triangle_wave() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let pointer = PointerState::new(150.0);
		let mut p = still_particle(500.0, 400.0);
		p.opacity = 0.0;
		p.fade_speed = 0.125;

		let mut samples = Vec::new();
		for _ in 0..32 {
			p.update(&pointer, BOUNDS, &config, &mut rng);
			samples.push(p.opacity);
		}

		// Peak after 8 ticks, trough after 16 (period = 2 / fade_speed).
		assert_eq!(samples[7], 1.0);
		assert_eq!(samples[15], 0.0);
		assert_eq!(samples[23], 1.0);
		assert_eq!(samples[31], 0.0);
		assert_eq!(samples[3], 0.5);
		assert_eq!(samples[11], 0.5);
	}

	#[test]
	fn test_pointer_pushes_along_connecting_line() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let mut pointer = PointerState::new(150.0);
		// Distance 50 along a 3-4-5 diagonal.
		pointer.position = Some((530.0, 440.0));
		let mut p = still_particle(500.0, 400.0);

		p.update(&pointer, BOUNDS, &config, &mut rng);

		let expected = (150.0 - 50.0) / 150.0 * 3.0;
		let (dx, dy) = (p.x - 500.0, p.y - 400.0);
		assert!(((dx * dx + dy * dy).sqrt() - expected).abs() < 1e-9);
		assert!((dx - -0.6 * expected).abs() < 1e-9);
		assert!((dy - -0.8 * expected).abs() < 1e-9);
	}

	#[test]
	fn test_pointer_dims_by_proximity() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let mut pointer = PointerState::new(150.0);
		pointer.position = Some((575.0, 400.0));
		let mut p = still_particle(500.0, 400.0);

		p.update(&pointer, BOUNDS, &config, &mut rng);
		// 0.5 - (1 - 75/150) * 0.5
		assert!((p.opacity - 0.25).abs() < 1e-12);

		p.opacity = 0.1;
		pointer.position = Some((p.x + 1.0, p.y));
		p.update(&pointer, BOUNDS, &config, &mut rng);
		assert_eq!(p.opacity, 0.0);
	}

	#[test]
	fn test_pointer_outside_radius_relaxes() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let mut pointer = PointerState::new(150.0);
		pointer.position = Some((900.0, 700.0));
		let mut p = still_particle(500.0, 400.0);
		p.x = 520.0;

		p.update(&pointer, BOUNDS, &config, &mut rng);
		assert!((p.x - 519.0).abs() < 1e-12);
		assert_eq!(p.opacity, 0.5);
	}

	#[test]
	fn test_anchor_decay_without_pointer() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let pointer = PointerState::new(150.0);
		let mut p = still_particle(200.0, 300.0);
		p.x = 100.0;
		p.y = 350.0;

		for k in 1..=40 {
			p.update(&pointer, BOUNDS, &config, &mut rng);
			let decay = 0.95f64.powi(k);
			assert!((p.x - (200.0 - 100.0 * decay)).abs() < 1e-9);
			assert!((p.y - (300.0 + 50.0 * decay)).abs() < 1e-9);
		}
	}

	#[test]
	fn test_leaving_bounds_resets() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let mut pointer = PointerState::new(150.0);
		let mut p = still_particle(0.5, 400.0);
		// Pointer just right of the particle pushes it past x = 0.
		pointer.position = Some((1.5, 400.0));

		p.update(&pointer, BOUNDS, &config, &mut rng);
		assert!(BOUNDS.contains(p.x, p.y));
		assert_eq!((p.base_x, p.base_y), (p.x, p.y));
	}

	#[test]
	fn test_position_stays_in_bounds_under_pointer() {
		let config = ParticleConfig::default();
		let mut rng = rng();
		let mut pointer = PointerState::new(150.0);
		let mut particles: Vec<_> = (0..100)
			.map(|_| Particle::new(BOUNDS, &config, &mut rng))
			.collect();

		for tick in 0..2000 {
			pointer.position = (tick % 300 < 200).then(|| {
				let t = tick as f64 * 0.01;
				(500.0 + 400.0 * t.cos(), 400.0 + 300.0 * t.sin())
			});
			for p in &mut particles {
				p.update(&pointer, BOUNDS, &config, &mut rng);
				assert!(BOUNDS.contains(p.x, p.y));
				assert!((0.0..=1.0).contains(&p.opacity));
			}
		}
	}

	#[test]
	fn test_draw_centers_square_with_gradient() {
		let config = ParticleConfig::default();
		let mut surface = RecordingSurface::default();
		let mut p = still_particle(100.0, 50.0);
		p.opacity = 0.4;

		p.draw(&mut surface, &config);

		let (gradient, rect) = surface.fills().next().unwrap();
		assert_eq!(
			*rect,
			Rect {
				x: 99.0,
				y: 49.0,
				width: 2.0,
				height: 2.0
			}
		);
		assert_eq!((gradient.x0, gradient.y0), (98.0, 48.0));
		assert_eq!((gradient.x1, gradient.y1), (102.0, 52.0));
		assert_eq!(gradient.start.to_css(), "rgba(102, 126, 234, 0.4)");
		assert_eq!(gradient.end.to_css(), "rgba(118, 75, 162, 0.4)");
	}
}
