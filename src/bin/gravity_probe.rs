//! One-shot gravity query against the standard solar system
//!
//! Builds the standard body set with a seeded starting scene, optionally
//! advances the orbits by some number of simulated days, then prints the
//! ranked gravitational acceleration at the query point.

use clap::Parser;
use nalgebra::Point2;
use serde::Serialize;

use orrery::constants::DAY_MS;
use orrery::gravity::format_acceleration;
use orrery::{GravitySample, SimulationConfig, SolarSystem};

#[derive(Parser)]
#[command(name = "gravity-probe")]
#[command(about = "Rank solar system bodies by gravitational pull at a point")]
struct Args {
    /// Query x coordinate in AU
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Query y coordinate in AU
    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    /// Seed for the initial orbital angles
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Advance the orbits by this many simulated days before sampling
    #[arg(long, default_value_t = 0.0)]
    days: f64,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ProbeReport {
    x: f64,
    y: f64,
    samples: Vec<GravitySample>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Time scale 1 makes tick() take simulated milliseconds directly.
    let mut sim = SimulationConfig::new()
        .with_seed(args.seed)
        .with_time_scale(1.0)
        .build(SolarSystem::standard());
    if args.days > 0.0 {
        sim.start();
        sim.tick(args.days * DAY_MS);
        sim.stop();
    }

    let point = Point2::new(args.x, args.y);
    let samples = sim.gravity_at(point);

    if args.json {
        let report = ProbeReport {
            x: args.x,
            y: args.y,
            samples,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
    } else {
        println!("Gravity at ({:.4}, {:.4}) AU", args.x, args.y);
        println!();
        println!("{:<10} {}", "Body", "a (m/s^2)");
        for sample in &samples {
            println!(
                "{:<10} {}",
                sample.body,
                format_acceleration(sample.acceleration)
            );
        }
    }
}
