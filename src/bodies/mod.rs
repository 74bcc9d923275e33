//! Celestial body definitions and the standard solar system table

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{OrreryError, Result};

/// Circular orbit parameters for a body revolving around the system center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Orbit radius in AU
    pub radius_au: f64,
    /// Orbital period in Earth days
    pub period_days: f64,
}

/// A celestial body in the solar system
///
/// Exactly one body per system is central (`orbit == None`); it sits at the
/// origin and never moves. Every other body revolves on a fixed circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    /// Name of the body, unique within a system
    pub name: String,
    /// Mass in kilograms
    pub mass_kg: f64,
    /// Orbit parameters, absent for the central body
    pub orbit: Option<Orbit>,
}

impl CelestialBody {
    /// Create a new orbiting body
    pub fn new(name: &str, mass_kg: f64, radius_au: f64, period_days: f64) -> Self {
        Self {
            name: name.to_string(),
            mass_kg,
            orbit: Some(Orbit {
                radius_au,
                period_days,
            }),
        }
    }

    /// Create the central body of a system
    pub fn central(name: &str, mass_kg: f64) -> Self {
        Self {
            name: name.to_string(),
            mass_kg,
            orbit: None,
        }
    }

    /// Whether this body is the system center
    pub fn is_central(&self) -> bool {
        self.orbit.is_none()
    }
}

// Masses in kg, orbit radii in AU, periods in Earth days.
static STANDARD_BODIES: Lazy<Vec<CelestialBody>> = Lazy::new(|| {
    vec![
        CelestialBody::central("Sun", 1.989e30),
        CelestialBody::new("Mercury", 3.30e23, 0.39, 88.0),
        CelestialBody::new("Venus", 4.87e24, 0.72, 225.0),
        CelestialBody::new("Earth", 5.97e24, 1.0, 365.0),
        CelestialBody::new("Mars", 6.42e23, 1.52, 687.0),
        CelestialBody::new("Jupiter", 1.90e27, 5.20, 4333.0),
        CelestialBody::new("Saturn", 5.68e26, 9.58, 10759.0),
        CelestialBody::new("Uranus", 8.68e25, 19.22, 30689.0),
        CelestialBody::new("Neptune", 1.02e26, 30.05, 60182.0),
    ]
});

/// A validated, fixed set of celestial bodies
///
/// The body set is established at construction and never changes; only the
/// simulation's per-body angles mutate at runtime. Deliberately not
/// deserializable: every instance goes through `new`'s validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
}

impl SolarSystem {
    /// Build a system from a body table
    ///
    /// Fails if a name is duplicated or the table does not contain exactly
    /// one central body.
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self> {
        let mut central = None;
        for (i, body) in bodies.iter().enumerate() {
            if bodies[..i].iter().any(|b| b.name == body.name) {
                return Err(OrreryError::DuplicateBody(body.name.clone()));
            }
            if body.is_central() {
                if central.is_some() {
                    return Err(OrreryError::ExtraCentralBody(body.name.clone()));
                }
                central = Some(i);
            }
        }
        if central.is_none() {
            return Err(OrreryError::NoCentralBody);
        }

        log::debug!("Constructed solar system with {} bodies", bodies.len());
        Ok(Self { bodies })
    }

    /// The standard nine-body solar system (Sun through Neptune)
    pub fn standard() -> Self {
        Self::new(STANDARD_BODIES.clone()).expect("standard body table is valid")
    }

    /// Number of bodies in the system
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the system contains no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate over the bodies in table order
    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    /// Access the body table
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// The central body of the system
    pub fn central(&self) -> &CelestialBody {
        self.bodies
            .iter()
            .find(|b| b.is_central())
            .expect("validated at construction")
    }

    /// Look up a body by name
    pub fn get(&self, name: &str) -> Result<&CelestialBody> {
        self.bodies
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| OrreryError::BodyNotFound(name.to_string()))
    }
}
