//! # Drift
//!
//! A hundred tubes wandering through a shared curl-noise field.
//!
//! ## What This Demonstrates
//!
//! - `Motion::Drift` - ambient curl-noise wandering
//! - The classic scattered spawn layout (colinear seeds trailing along -Z)
//! - Fixed-timestep stepping for a reproducible run
//!
//! ## Try This
//!
//! - Change the scene seed for a different swarm
//! - Lower `with_field_scale` for wider, lazier swirls
//! - Feed `tube.position_bytes()` / `tube.normal_bytes()` to your renderer
//!
//! Run with: `cargo run --example drift`

use tendrils::prelude::*;

fn main() -> Result<(), ConfigError> {
    let mut scene = Scene::builder()
        .with_tube_count(100)
        .with_field(CurlField::simplex(rand::random()))
        .with_field_scale(2.0)
        .build()?;

    let mut time = Time::fixed(1.0 / 60.0);
    let frames = 600; // ten seconds at the reference rate

    for _ in 0..frames {
        let (_, dt) = time.update();
        scene.advance(dt, Motion::Drift);
    }

    // Report where the swarm ended up.
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    let mut travel = 0.0;
    for tube in scene.tubes() {
        let head = tube.head();
        min = min.min(head);
        max = max.max(head);
        travel += tube.velocity().length();
    }

    println!("advanced {} tubes for {} frames", scene.len(), frames);
    println!("head bounds: {:.2?} .. {:.2?}", min, max);
    println!(
        "mean head speed: {:.4} units/frame",
        travel / scene.len() as f32
    );
    Ok(())
}
