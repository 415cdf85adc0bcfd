//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, so they stay out of the `no_std` library.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Interval between gauge value steps.
pub const VALUE_STEP: Duration = Duration::from_millis(100);
