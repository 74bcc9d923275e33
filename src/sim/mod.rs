//! Orbit simulation: per-body angle updates and the run-state machine
//!
//! The simulation owns the body set and one orbital angle per orbiting
//! body. It exposes `tick(elapsed_ms)` as the pure update kernel and
//! `advance(now_ms)` as the wall-clock driver; the host (viewer, tests)
//! owns the frame scheduling and calls one of them per frame.

use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bodies::{CelestialBody, SolarSystem};
use crate::constants::{DAY_MS, TAU};
use crate::gravity::{self, GravitySample};
use crate::{OrreryError, Result};

/// Default time-scale multiplier (simulated milliseconds per elapsed
/// wall-clock millisecond)
pub const DEFAULT_TIME_SCALE: f64 = 100_000.0;

/// Animation run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Configuration for building a simulation
///
/// Initial orbital angles are drawn uniformly from [0, 2π) with a seeded
/// RNG so a given seed always produces the same starting scene.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Random seed for the initial angle draw
    pub seed: u64,
    /// Time-scale multiplier applied to elapsed wall-clock time
    pub time_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed for the initial angle draw
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the time-scale multiplier
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Build a stopped simulation over the given system
    pub fn build(&self, system: SolarSystem) -> Simulation {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let angles = system
            .iter()
            .map(|body| {
                if body.is_central() {
                    0.0
                } else {
                    rng.gen_range(0.0..TAU)
                }
            })
            .collect();

        Simulation {
            system,
            angles,
            time_scale: self.time_scale,
            state: RunState::Stopped,
            baseline_ms: None,
        }
    }
}

/// A running (or stopped) orbital simulation over a fixed body set
///
/// Positions are derived from angle and orbit radius on demand; the angle
/// is the only mutable state, updated once per tick and kept in [0, 2π).
#[derive(Debug, Clone)]
pub struct Simulation {
    system: SolarSystem,
    /// Orbital angle in radians per body, in table order. The central
    /// body's entry stays 0 and is never read.
    angles: Vec<f64>,
    time_scale: f64,
    state: RunState,
    /// Wall-clock timestamp of the last `advance` call, cleared on start
    baseline_ms: Option<f64>,
}

impl Simulation {
    /// Build a simulation with the default configuration
    pub fn new(system: SolarSystem) -> Self {
        SimulationConfig::default().build(system)
    }

    /// The underlying body set
    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    /// Current run state
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Whether the simulation is currently advancing
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Current time-scale multiplier
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Replace the time-scale multiplier
    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.time_scale = time_scale;
    }

    /// Transition STOPPED -> RUNNING and reset the elapsed-time baseline
    ///
    /// Resetting the baseline means the first `advance` after a restart
    /// applies no elapsed time, so bodies never jump by the interval spent
    /// stopped.
    pub fn start(&mut self) {
        self.state = RunState::Running;
        self.baseline_ms = None;
        log::debug!("Simulation started (time scale {})", self.time_scale);
    }

    /// Transition RUNNING -> STOPPED; subsequent ticks are ignored
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
        log::debug!("Simulation stopped");
    }

    /// Advance every orbiting body by the given elapsed wall-clock time
    ///
    /// Each body's angle grows by
    /// `(2π / (period_days × 86 400 000)) × elapsed_ms × time_scale` and is
    /// wrapped back into [0, 2π). Wrapping on every tick keeps the angle
    /// well-conditioned no matter how much cumulative time has passed.
    /// Does nothing while stopped.
    pub fn tick(&mut self, elapsed_ms: f64) {
        if self.state != RunState::Running {
            return;
        }

        for (body, angle) in self.system.iter().zip(self.angles.iter_mut()) {
            if let Some(orbit) = body.orbit {
                let angular_speed = TAU / (orbit.period_days * DAY_MS); // rad/ms
                *angle = (*angle + angular_speed * elapsed_ms * self.time_scale).rem_euclid(TAU);
            }
        }
    }

    /// Drive `tick` from a wall-clock timestamp in milliseconds
    ///
    /// The first call after `start` establishes the baseline and applies no
    /// elapsed time. Returns the elapsed time that was applied.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        if self.state != RunState::Running {
            return 0.0;
        }

        let elapsed = match self.baseline_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.baseline_ms = Some(now_ms);
        self.tick(elapsed);
        elapsed
    }

    /// Current orbital angle of a body, `None` for the central body
    pub fn angle_of(&self, name: &str) -> Result<Option<f64>> {
        let index = self
            .system
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| OrreryError::BodyNotFound(name.to_string()))?;
        if self.system.bodies()[index].is_central() {
            Ok(None)
        } else {
            Ok(Some(self.angles[index]))
        }
    }

    /// Derived position of the body at `index`, in AU
    fn position_at(&self, index: usize) -> Point2<f64> {
        match self.system.bodies()[index].orbit {
            Some(orbit) => {
                let angle = self.angles[index];
                Point2::new(
                    angle.cos() * orbit.radius_au,
                    angle.sin() * orbit.radius_au,
                )
            }
            None => Point2::origin(),
        }
    }

    /// Derived position of a body by name, in AU
    pub fn position_of(&self, name: &str) -> Result<Point2<f64>> {
        let index = self
            .system
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| OrreryError::BodyNotFound(name.to_string()))?;
        Ok(self.position_at(index))
    }

    /// Every body with its derived position, in table order
    pub fn positions(&self) -> Vec<(&CelestialBody, Point2<f64>)> {
        (0..self.system.len())
            .map(|i| (&self.system.bodies()[i], self.position_at(i)))
            .collect()
    }

    /// Gravitational acceleration from every body at `point`, strongest
    /// first
    pub fn gravity_at(&self, point: Point2<f64>) -> Vec<GravitySample> {
        gravity::field_at(&self.positions(), point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn stopped_sim(seed: u64) -> Simulation {
        SimulationConfig::new()
            .with_seed(seed)
            .with_time_scale(1.0)
            .build(SolarSystem::standard())
    }

    #[test]
    fn test_angles_stay_wrapped() {
        let mut sim = stopped_sim(7);
        sim.start();
        // Deliberately huge elapsed times to stress the wrap
        for _ in 0..1000 {
            sim.tick(1.0e12);
        }
        for body in sim.system().iter() {
            if let Some(angle) = sim.angle_of(&body.name).unwrap() {
                assert!((0.0..TAU).contains(&angle), "{}: {}", body.name, angle);
            }
        }
    }

    #[rstest]
    #[case(1_000.0, 1.0)]
    #[case(1_000.0, 100_000.0)]
    #[case(86_400_000.0, 2.5)]
    fn test_angle_advance_is_linear(#[case] elapsed_ms: f64, #[case] time_scale: f64) {
        let mut single = SimulationConfig::new()
            .with_seed(3)
            .with_time_scale(time_scale)
            .build(SolarSystem::standard());
        let mut double = single.clone();
        single.start();
        double.start();

        let before = single.angle_of("Mars").unwrap().unwrap();
        single.tick(elapsed_ms);
        double.tick(2.0 * elapsed_ms);

        let delta = (single.angle_of("Mars").unwrap().unwrap() - before).rem_euclid(TAU);
        let delta2 = (double.angle_of("Mars").unwrap().unwrap() - before).rem_euclid(TAU);
        // Absolute tolerance: for slow bodies the deltas are tiny and the
        // angle add/subtract cancellation dominates any relative bound.
        assert_relative_eq!(delta2, 2.0 * delta, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_advance_is_linear_in_time_scale() {
        let build = |time_scale: f64| {
            let mut sim = SimulationConfig::new()
                .with_seed(3)
                .with_time_scale(time_scale)
                .build(SolarSystem::standard());
            sim.start();
            sim
        };
        let mut base = build(50.0);
        let mut scaled = build(100.0);

        let before = base.angle_of("Earth").unwrap().unwrap();
        base.tick(1_000.0);
        scaled.tick(1_000.0);

        let delta = (base.angle_of("Earth").unwrap().unwrap() - before).rem_euclid(TAU);
        let delta2 = (scaled.angle_of("Earth").unwrap().unwrap() - before).rem_euclid(TAU);
        assert_relative_eq!(delta2, 2.0 * delta, epsilon = 1e-12);
    }

    #[test]
    fn test_one_period_is_one_revolution() {
        let mut sim = stopped_sim(11);
        sim.start();
        let before = sim.angle_of("Earth").unwrap().unwrap();
        // One Earth year of simulated time in a single tick
        sim.tick(365.0 * DAY_MS);
        let after = sim.angle_of("Earth").unwrap().unwrap();
        assert_relative_eq!(after, before, epsilon = 1e-9);
    }

    #[test]
    fn test_tick_ignored_while_stopped() {
        let mut sim = stopped_sim(5);
        let before = sim.angle_of("Venus").unwrap().unwrap();
        sim.tick(1.0e9);
        assert_eq!(sim.angle_of("Venus").unwrap().unwrap(), before);
        assert_eq!(sim.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_restart_applies_no_stale_elapsed_time() {
        let mut sim = stopped_sim(5);
        sim.start();
        sim.advance(0.0);
        sim.advance(1_000.0);
        let frozen = sim.angle_of("Mercury").unwrap().unwrap();

        sim.stop();
        // A long wall-clock gap while stopped must not reach the angles.
        sim.start();
        let applied = sim.advance(3_600_000.0);
        assert_eq!(applied, 0.0);
        assert_eq!(sim.angle_of("Mercury").unwrap().unwrap(), frozen);

        // The next frame resumes with ordinary per-frame deltas.
        let applied = sim.advance(3_600_016.0);
        assert_relative_eq!(applied, 16.0);
    }

    #[test]
    fn test_central_body_fixed_at_origin() {
        let mut sim = stopped_sim(9);
        sim.start();
        sim.tick(1.0e10);
        let sun = sim.position_of("Sun").unwrap();
        assert_eq!(sun, Point2::origin());
        assert!(sim.angle_of("Sun").unwrap().is_none());
    }

    #[test]
    fn test_position_derived_from_angle_and_radius() {
        let mut sim = stopped_sim(13);
        sim.start();
        sim.tick(12_345.0);
        let angle = sim.angle_of("Jupiter").unwrap().unwrap();
        let position = sim.position_of("Jupiter").unwrap();
        assert_relative_eq!(position.x, angle.cos() * 5.20, max_relative = 1e-12);
        assert_relative_eq!(position.y, angle.sin() * 5.20, max_relative = 1e-12);
    }

    #[test]
    fn test_seeded_angles_are_reproducible() {
        let a = stopped_sim(99);
        let b = stopped_sim(99);
        let c = stopped_sim(100);

        for body in a.system().iter() {
            assert_eq!(
                a.angle_of(&body.name).unwrap(),
                b.angle_of(&body.name).unwrap()
            );
        }
        // Different seeds should land at least one body elsewhere.
        let differs = a.system().iter().any(|body| {
            a.angle_of(&body.name).unwrap() != c.angle_of(&body.name).unwrap()
        });
        assert!(differs);
    }

    #[test]
    fn test_initial_angles_in_range() {
        let sim = stopped_sim(1234);
        for body in sim.system().iter() {
            if let Some(angle) = sim.angle_of(&body.name).unwrap() {
                assert!((0.0..TAU).contains(&angle));
            }
        }
    }
}
