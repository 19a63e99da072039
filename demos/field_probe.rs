//! # Field Probe
//!
//! Traces streamlines through a curl field and prints flow statistics.
//! Useful for eyeballing how epsilon and sampling scale shape the flow
//! before committing a scene to them.
//!
//! ## Try This
//!
//! - Raise the epsilon toward the noise wavelength and watch the flow smear
//! - Compare simplex and perlin backends at the same seed
//!
//! Run with: `cargo run --example field_probe`

use tendrils::field::CurlField;
use tendrils::Vec3;

fn main() {
    let field = CurlField::simplex(42);
    let scale = 2.0;
    let step = 0.02;

    // Integrate a few streamlines from scattered starts.
    for (i, start) in [
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-1.0, 2.0, 0.0),
        Vec3::new(3.0, -1.5, 1.0),
    ]
    .iter()
    .enumerate()
    {
        let mut p = *start;
        let mut path_len = 0.0;
        let mut mean_speed = 0.0;
        let steps = 500;

        for _ in 0..steps {
            let v = field.curl(p * scale);
            mean_speed += v.length();
            let delta = v * step;
            path_len += delta.length();
            p += delta;
        }

        println!(
            "streamline {}: start {:.2?} end {:.2?} length {:.3} mean |curl| {:.3}",
            i,
            start,
            p,
            path_len,
            mean_speed / steps as f32
        );
    }
}
