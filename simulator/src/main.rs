//! Dial gauge simulator for desktop.
//!
//! Opens an SDL window through `embedded-graphics-simulator` and sweeps one
//! gauge from its range minimum to maximum, one step every 100 ms, wrapping
//! around until the window is closed.
//!
//! # Controls
//!
//! - `Space`: pause or resume the sweep
//!
//! Set `RUST_LOG=dial_gauge=trace` to watch every update.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

mod timing;

use std::thread;
use std::time::Instant;

use dial_gauge::colors::BLACK;
use dial_gauge::{DialGauge, GaugeConfig, GaugeError};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use profont::PROFONT_12_POINT;

use crate::timing::{FRAME_TIME, VALUE_STEP};

const SCREEN_WIDTH: u32 = 128;
const SCREEN_HEIGHT: u32 = 72;

/// Gauge placement and look.
const GAUGE: GaugeConfig = GaugeConfig::new(10, 10, 50, 40)
    .with_color(0x44_00_44)
    .with_label_font(&PROFONT_12_POINT);

fn main() -> Result<(), GaugeError> {
    env_logger::init();

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(4).build();
    let mut window = Window::new("Dial Gauge", &output_settings);

    let mut gauge = DialGauge::new(GAUGE)?;
    let steps = (GAUGE.range_max - GAUGE.range_min) as u32;
    log::info!("sweeping {} steps every {:?}", steps, VALUE_STEP);

    let mut step = 0u32;
    let mut paused = false;
    let mut last_step = Instant::now();

    display.clear(BLACK).ok();

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown {
                    keycode: Keycode::Space,
                    repeat: false,
                    ..
                } => {
                    paused = !paused;
                    log::info!("sweep {}", if paused { "paused" } else { "resumed" });
                }
                _ => {}
            }
        }

        if !paused && last_step.elapsed() >= VALUE_STEP {
            last_step = Instant::now();
            gauge.update(GAUGE.range_min + f64::from(step))?;
            step = if step >= steps { 0 } else { step + 1 };
        }

        gauge.draw(&mut display).ok();
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}
