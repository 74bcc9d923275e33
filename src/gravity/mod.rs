//! Point-mass gravity evaluation
//!
//! Treats every body as a point mass and reports the magnitude of the
//! Newtonian acceleration it exerts at a query point, ranked strongest
//! first. A query exactly on top of a body reports 0 for that body: the
//! value is a guard against the 1/r² singularity, not a physical claim.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::bodies::CelestialBody;
use crate::constants::{AU_M, G};

/// Acceleration exerted by one body at a query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravitySample {
    /// Name of the attracting body
    pub body: String,
    /// Acceleration magnitude in m/s²
    pub acceleration: f64,
}

/// Acceleration magnitude of a point mass at the given distance
///
/// `a = G × mass / distance²`, with distance 0 mapped to 0.
pub fn acceleration_from(mass_kg: f64, distance_m: f64) -> f64 {
    if distance_m > 0.0 {
        G * mass_kg / (distance_m * distance_m)
    } else {
        0.0
    }
}

/// Evaluate the acceleration field of a positioned body set at `point`
///
/// Distances are measured in AU and converted to meters before applying
/// the inverse-square law. The result is sorted by acceleration
/// descending; the sort is stable, so ties keep body-table order.
pub fn field_at(
    positions: &[(&CelestialBody, Point2<f64>)],
    point: Point2<f64>,
) -> Vec<GravitySample> {
    let mut samples: Vec<GravitySample> = positions
        .iter()
        .map(|(body, position)| {
            let distance_m = nalgebra::distance(position, &point) * AU_M;
            GravitySample {
                body: body.name.clone(),
                acceleration: acceleration_from(body.mass_kg, distance_m),
            }
        })
        .collect();

    samples.sort_by(|a, b| b.acceleration.total_cmp(&a.acceleration));
    samples
}

/// Format an acceleration for display: scientific notation, 3 significant
/// digits
pub fn format_acceleration(acceleration: f64) -> String {
    format!("{:.2e}", acceleration)
}
