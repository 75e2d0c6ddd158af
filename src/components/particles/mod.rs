//! Decorative particle field behind the page content.
//!
//! Each particle pulses its opacity, is pushed away from (and dimmed by) a
//! nearby pointer, and drifts back to its anchor when left alone. The
//! simulation is headless: it draws through [`RenderSurface`] and reads the
//! viewport through [`Viewport`], so it runs the same in the browser and in
//! tests.
//!
//! # Example
//!
//! ```ignore
//! use book_meeting::components::particles::{ParticleConfig, ParticleDriver};
//!
//! let mut driver = ParticleDriver::initialize(Some(surface), &(1280.0, 720.0),
//!     ParticleConfig::default(), 42).unwrap();
//! for _ in 0..60 {
//!     driver.tick();
//! }
//! ```

mod canvas;
mod component;
mod config;
mod particle;
mod simulation;
mod surface;

pub use canvas::{CanvasSurface, WindowViewport};
pub use component::ParticleCanvas;
pub use config::{Color, ParticleConfig};
pub use particle::{Bounds, Particle, PointerState};
pub use simulation::{ParticleDriver, PointerInput, Simulation, particle_count};
pub use surface::{LinearGradient, Rect, RenderSurface, Viewport};
