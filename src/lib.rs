// Crate-level lints: pixel math casts between i32, u32, f32 and f64 on purpose
#![allow(clippy::cast_possible_truncation)] // f64 -> i32 angle and pixel truncation
#![allow(clippy::cast_precision_loss)] // i32/usize -> f32 in scanline math
#![allow(clippy::cast_possible_wrap)] // u32 -> i32, radii are bounded by MAX_OUTER_RADIUS
#![allow(clippy::cast_sign_loss)] // i32 -> u32/usize where the value is known non-negative
#![cfg_attr(not(test), no_std)]

//! Half-ring dial gauge widget for `embedded-graphics` displays.
//!
//! A gauge is two concentric arcs swept from 180° to 360° (the upper half of
//! a circle on a display whose Y axis grows downward) and a filled wedge
//! between them whose angular extent tracks a value.
//!
//! ```text
//!            . - ~ ~ ~ - .
//!        .'  ░░░░░        '.      outer arc (r_ext)
//!      /  ░░░ . - ~ - .      \
//!     | ░░ .'           '.    |   inner arc (r_int)
//!     |░░ /               \   |
//!     +--+                 +--+   closing edge at 360°
//! ```
//!
//! # Pipeline
//!
//! 1. [`geometry`] samples the sweep once per degree and projects each angle
//!    onto both radii, rounding up.
//! 2. [`tables`] stores the two arcs, marks them into the background
//!    [`surface`] and assembles the closed contour.
//! 3. [`gauge`] maps each new value to a trim count and cuts a fresh contour
//!    from the stored tables. No trigonometry runs after construction.
//! 4. [`polygon`] rasterizes the contour; [`label`] prints the value.
//!
//! # Usage
//!
//! ```ignore
//! let config = GaugeConfig::new(10, 10, 50, 40).with_color(0x440044);
//! let mut gauge = DialGauge::new(config)?;
//! gauge.update(73.0)?;
//! gauge.draw(&mut display)?;
//! ```
//!
//! # Memory
//!
//! Nothing allocates. Point tables, contours, the bitmap and the label text
//! all live in fixed-capacity `heapless` buffers sized from the constants in
//! [`config`].

pub mod colors;
pub mod config;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod label;
pub mod polygon;
pub mod surface;
pub mod tables;

pub use config::{GaugeConfig, OutOfRangePolicy};
pub use error::GaugeError;
pub use gauge::{DialGauge, map_value_to_angle, trim_index};
pub use label::ValueLabel;
pub use polygon::{Contour, FillPolygon};
pub use surface::{Bitmap, Palette, Surface};
pub use tables::{PointTable, PointTables};
