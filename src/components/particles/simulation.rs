//! Particle population, pointer tracking, and per-frame orchestration.
//!
//! [`Simulation`] is the pure state machine: it knows nothing about frame
//! pacing. [`ParticleDriver`] pairs it with a render surface and is what the
//! browser animation loop (or a test harness) calls once per frame.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::ParticleConfig;
use super::particle::{Bounds, Particle, PointerState};
use super::surface::{Rect, RenderSurface, Viewport};

/// Pointer and touch input relevant to the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
	Move { x: f64, y: f64 },
	/// Touch move; carries the first touch point, if any.
	TouchMove { first: Option<(f64, f64)> },
	Leave,
	TouchEnd,
}

/// Number of particles for a canvas of the given size.
pub fn particle_count(width: f64, height: f64, density: f64) -> usize {
	if density <= 0.0 {
		return 0;
	}
	(width.max(0.0) * height.max(0.0) / density).floor() as usize
}

/// Owns every particle plus the pointer snapshot they react to.
pub struct Simulation {
	particles: Vec<Particle>,
	pointer: PointerState,
	bounds: Bounds,
	config: ParticleConfig,
	rng: SmallRng,
}

impl Simulation {
	pub fn new(config: ParticleConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut simulation = Self {
			particles: Vec::new(),
			pointer: PointerState::new(config.interaction_radius),
			bounds: Bounds::new(width, height),
			config,
			rng: SmallRng::seed_from_u64(seed),
		};
		simulation.populate();
		simulation
	}

	fn populate(&mut self) {
		let count = particle_count(self.bounds.width, self.bounds.height, self.config.density);
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles
				.push(Particle::new(self.bounds, &self.config, &mut self.rng));
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn config(&self) -> &ParticleConfig {
		&self.config
	}

	/// Discard the population and regenerate it for the new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = Bounds::new(width, height);
		self.populate();
		debug!(
			"book-meeting: particles regenerated, {} at {}x{}",
			self.particles.len(),
			width,
			height
		);
	}

	pub fn handle_pointer(&mut self, input: PointerInput) {
		match input {
			PointerInput::Move { x, y } => self.pointer.position = Some((x, y)),
			PointerInput::TouchMove { first: Some(point) } => self.pointer.position = Some(point),
			PointerInput::TouchMove { first: None } => {}
			PointerInput::Leave | PointerInput::TouchEnd => self.pointer.position = None,
		}
	}

	/// Advance every particle by one tick.
	pub fn step(&mut self) {
		for particle in &mut self.particles {
			particle.update(&self.pointer, self.bounds, &self.config, &mut self.rng);
		}
	}

	/// Clear the surface and draw the current state.
	pub fn render<S: RenderSurface>(&self, surface: &mut S) {
		surface.clear_rect(self.full_rect());
		for particle in &self.particles {
			particle.draw(surface, &self.config);
		}
	}

	/// One animation frame: clear, then update and draw each particle in turn.
	pub fn frame_tick<S: RenderSurface>(&mut self, surface: &mut S) {
		surface.clear_rect(self.full_rect());
		for particle in &mut self.particles {
			particle.update(&self.pointer, self.bounds, &self.config, &mut self.rng);
			particle.draw(surface, &self.config);
		}
	}

	fn full_rect(&self) -> Rect {
		Rect {
			x: 0.0,
			y: 0.0,
			width: self.bounds.width,
			height: self.bounds.height,
		}
	}
}

/// A simulation bound to the surface it draws on.
pub struct ParticleDriver<S: RenderSurface> {
	simulation: Simulation,
	surface: S,
}

impl<S: RenderSurface> ParticleDriver<S> {
	/// Size the surface to the viewport and populate it.
	///
	/// Returns `None` without side effects when no surface is available; the
	/// animation is decorative and its absence must not affect the page.
	pub fn initialize<V: Viewport>(
		surface: Option<S>,
		viewport: &V,
		config: ParticleConfig,
		seed: u64,
	) -> Option<Self> {
		let Some(mut surface) = surface else {
			debug!("book-meeting: no particle canvas, animation disabled");
			return None;
		};
		let (width, height) = viewport.size();
		surface.set_size(width, height);
		let simulation = Simulation::new(config, width, height, seed);
		info!(
			"book-meeting: particle field started with {} particles",
			simulation.particles().len()
		);
		Some(Self {
			simulation,
			surface,
		})
	}

	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn resize<V: Viewport>(&mut self, viewport: &V) {
		let (width, height) = viewport.size();
		self.surface.set_size(width, height);
		self.simulation.resize(width, height);
	}

	pub fn handle_pointer(&mut self, input: PointerInput) {
		self.simulation.handle_pointer(input);
	}

	pub fn tick(&mut self) {
		self.simulation.frame_tick(&mut self.surface);
	}

	/// Tear down, handing the surface back to the caller.
	pub fn dispose(self) -> S {
		self.surface
	}
}
