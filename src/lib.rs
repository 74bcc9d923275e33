//! Orrery: an interactive solar system orbit simulation library
//!
//! This crate simulates the major solar system bodies on circular orbits,
//! evaluates the Newtonian point-mass gravitational acceleration field at
//! arbitrary points, and provides the camera mathematics used by the
//! terminal viewer to zoom and pan around the system.
//!
//! The simulation is deliberately kinematic: orbits are fixed circles
//! traversed at constant angular speed, not integrated from gravity. The
//! gravity evaluator answers "how hard does each body pull at this point
//! right now", ranked strongest first.

use thiserror::Error;

pub mod bodies;
pub mod constants;
pub mod gravity;
pub mod sim;
pub mod viewport;

// Re-export commonly used types
pub use bodies::{CelestialBody, Orbit, SolarSystem};
pub use gravity::GravitySample;
pub use sim::{RunState, Simulation, SimulationConfig};
pub use viewport::Camera;

/// Main error type for the orrery library
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("Duplicate body name: {0}")]
    DuplicateBody(String),

    #[error("System has no central body")]
    NoCentralBody,

    #[error("System has more than one central body: {0}")]
    ExtraCentralBody(String),

    #[error("Body not found: {0}")]
    BodyNotFound(String),
}

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;
