// Virtual mouse driven by a webcam: wear a blue marker on the index finger
// and a red one on the thumb. The blue marker steers the cursor; touching
// the two markers together clicks. ESC or closing the preview window quits.

mod camera;
mod click;
mod config;
mod cursor;
mod draw;
mod error;
mod pipeline;
mod pointer;
mod types;
mod vision;

use std::time::Instant;

use log::info;

use camera::{CameraCapture, FrameSource};
use config::Config;
use draw::Drawer;
use error::Error;
use pipeline::FrameOrchestrator;
use pointer::SystemPointer;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let config = Config::default();

    // Camera first: without it there is nothing to track.
    let cam = CameraCapture::new(0, 640, 480)?;
    let (w, h) = cam.resolution();

    // Pointer + screen geometry (queried once; the mapping never changes).
    let pointer = SystemPointer::new()?;
    let screen = pointer.screen_size()?;
    info!("camera {w}x{h}, screen {}x{}", screen.0, screen.1);

    let mut drawer = Drawer::new("Virtual Mouse Preview", w, h)?;
    let mut orchestrator = FrameOrchestrator::new(config, cam, pointer, screen);

    // One iteration per camera frame. A failed read skips the iteration;
    // everything else flows through the orchestrator.
    while drawer.is_open() && !drawer.esc_pressed() {
        if let Some(frame) = orchestrator.step(Instant::now()) {
            drawer.present(&frame)?;
        }
    }

    Ok(())
}
