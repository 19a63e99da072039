//! # Trail
//!
//! Tubes chasing a moving target, the way the pointer-trail mode drives
//! them: the host tracks a cursor, the tubes seek it, and the chain-follow
//! rule turns the pursuit into flowing ribbons.
//!
//! ## What This Demonstrates
//!
//! - `Motion::Seek` - directed pursuit of a per-frame target
//! - Switching motion modes mid-run (the caller owns the mode)
//! - Per-tube attraction/vlimit giving each tube its own character
//!
//! Run with: `cargo run --example trail`

use tendrils::prelude::*;

fn main() -> Result<(), ConfigError> {
    let mut scene = Scene::builder()
        .with_tube_count(40)
        .with_seed(7)
        .build()?;

    let mut time = Time::fixed(1.0 / 60.0);

    // A cursor circling the origin, like a pointer drawing loops.
    let cursor = |t: f32| Vec3::new((t * 0.8).cos() * 3.0, (t * 0.8).sin() * 3.0, 0.0);

    for frame in 0..900 {
        let (elapsed, dt) = time.update();

        // First second: drift. After that: chase the cursor.
        let motion = if frame < 60 {
            Motion::Drift
        } else {
            Motion::Seek(cursor(elapsed))
        };
        scene.advance(dt, motion);
    }

    let target = cursor(time.elapsed());
    let mut nearest = f32::MAX;
    let mut farthest: f32 = 0.0;
    for tube in scene.tubes() {
        let d = tube.head().distance(target);
        nearest = nearest.min(d);
        farthest = farthest.max(d);
    }

    println!("{} tubes chased the cursor for 900 frames", scene.len());
    println!(
        "distance to target: nearest {:.3}, farthest {:.3}",
        nearest, farthest
    );
    Ok(())
}
