//! Gauge error taxonomy.
//!
//! - Configuration errors fail construction.
//! - Value errors fail a single `update` and leave the contour untouched.
//! - `OutOfBounds` is raised by the bitmap instead of writing past its store.

use thiserror::Error;

/// Everything that can go wrong building or updating a gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GaugeError {
    /// `range_min >= range_max`, or a bound is not finite.
    #[error("range minimum must be below range maximum")]
    InvalidRange,
    /// A radius of zero.
    #[error("radii must be positive")]
    NonPositiveRadius,
    /// `r_int >= r_ext`.
    #[error("inner radius must be smaller than outer radius")]
    InnerRadiusTooLarge,
    /// `r_ext` exceeds [`MAX_OUTER_RADIUS`](crate::config::MAX_OUTER_RADIUS).
    #[error("outer radius exceeds surface capacity")]
    OuterRadiusTooLarge,
    /// A pixel write landed outside the background surface.
    #[error("pixel ({x}, {y}) outside background surface")]
    OutOfBounds { x: i32, y: i32 },
    /// Value outside the range under [`OutOfRangePolicy::Reject`](crate::OutOfRangePolicy::Reject).
    #[error("value outside gauge range")]
    ValueOutOfRange,
    /// Value is NaN.
    #[error("value is not a number")]
    InvalidValue,
}
