// The per-frame pipeline: acquire -> mirror -> segment -> locate -> map and
// smooth -> click decision -> actuate. Generic over the camera and pointer so
// the whole loop can be driven by scripted frames in tests.

use std::slice;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::camera::FrameSource;
use crate::click::ClickState;
use crate::config::Config;
use crate::cursor::{self, CursorState};
use crate::draw;
use crate::error::Error;
use crate::pointer::Pointer;
use crate::types::FrameBuffer;
use crate::vision;

/// Preview annotation colors: blue dot for the index marker, red for the
/// thumb, mirroring the marker colors themselves.
const INDEX_DOT: u32 = 0x000000FF;
const THUMB_DOT: u32 = 0x00FF0000;

pub struct FrameOrchestrator<S, P> {
    config: Config,
    source: S,
    pointer: P,
    screen_size: (usize, usize),
    cursor: CursorState,
    click: ClickState,
    pointer_warned: bool,
}

impl<S: FrameSource, P: Pointer> FrameOrchestrator<S, P> {
    pub fn new(config: Config, source: S, pointer: P, screen_size: (usize, usize)) -> Self {
        Self {
            config,
            source,
            pointer,
            screen_size,
            cursor: CursorState::centered(screen_size),
            click: ClickState::new(),
            pointer_warned: false,
        }
    }

    /// Run one iteration. Returns the annotated frame for the preview, or
    /// `None` when the camera had nothing for us this time (in which case
    /// nothing else happened either: no state change, no actuation).
    pub fn step(&mut self, now: Instant) -> Option<FrameBuffer> {
        let mut frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                // A single bad frame is expected noise; try again next turn.
                debug!("frame skipped: {e}");
                return None;
            }
        };
        frame.mirror_horizontal();

        let index_mask = vision::segment(
            &frame,
            slice::from_ref(&self.config.index_band),
            self.config.opening_radius,
        );
        let thumb_mask =
            vision::segment(&frame, &self.config.thumb_bands, self.config.opening_radius);
        let index = vision::locate(&index_mask);
        let thumb = vision::locate(&thumb_mask);

        let radius = self.config.draw_radius as i32;

        // Index marker drives the cursor; without it the cursor freezes.
        if let Some(tip) = index {
            draw::draw_disc(&mut frame, tip.x as i32, tip.y as i32, radius, INDEX_DOT);

            let mapped =
                cursor::map_to_screen(tip, (frame.width, frame.height), self.screen_size);
            self.cursor.smooth_toward(mapped, self.config.smooth_factor);

            let (x, y) = (self.cursor.x as i32, self.cursor.y as i32);
            if let Err(e) = self.pointer.move_to(x, y) {
                self.note_pointer_failure(e);
            }
        }

        // Click needs both markers; a lost marker neither fires nor resets.
        if let (Some(index_tip), Some(thumb_tip)) = (index, thumb) {
            draw::draw_disc(&mut frame, thumb_tip.x as i32, thumb_tip.y as i32, radius, THUMB_DOT);

            let cooldown = Duration::from_millis(self.config.click_cooldown_ms);
            let fire = self.click.update(
                index_tip,
                thumb_tip,
                now,
                self.config.click_distance,
                cooldown,
            );
            if fire {
                if let Err(e) = self.pointer.click() {
                    self.note_pointer_failure(e);
                }
            }
        }

        Some(frame)
    }

    /// Actuation failures are logged once per run, then silenced; the
    /// perception loop keeps going either way.
    fn note_pointer_failure(&mut self, e: Error) {
        if !self.pointer_warned {
            warn!("pointer actuation failed, continuing without it: {e}");
            self.pointer_warned = true;
        }
    }
}
