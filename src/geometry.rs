//! Pure arc geometry: sweep sampling and polar-to-pixel projection.
//!
//! No state, no display. All trigonometry the gauge ever performs happens
//! here, once per sample, while the point tables are built.

use core::f64::consts::PI;

use embedded_graphics::prelude::Point;

use crate::config::{END_ANGLE, SAMPLE_COUNT, START_ANGLE};

/// Evenly spaced sweep angles in degrees, ascending.
///
/// Yields `SAMPLE_COUNT` values starting at `START_ANGLE` with a step of
/// `(END_ANGLE - START_ANGLE) / SAMPLE_COUNT`, i.e. one degree.
pub fn sweep_angles() -> impl Iterator<Item = f64> + Clone {
    let step = f64::from(END_ANGLE - START_ANGLE) / SAMPLE_COUNT as f64;
    (0..SAMPLE_COUNT).map(move |i| f64::from(START_ANGLE) + i as f64 * step)
}

/// Project a point on a circle to integer pixel coordinates.
///
/// Both axes round up (`ceil`), not to nearest. The point tables depend on
/// this bias to reproduce pixel-for-pixel.
pub fn project(
    angle_degrees: f64,
    radius: u32,
    center: Point,
) -> Point {
    let radians = angle_degrees * PI / 180.0;
    let r = f64::from(radius);
    let x = libm::ceil(f64::from(center.x) + r * libm::cos(radians));
    let y = libm::ceil(f64::from(center.y) + r * libm::sin(radians));
    Point::new(x as i32, y as i32)
}
