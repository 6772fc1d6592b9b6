// Debounced touch-to-click state machine.

use std::time::{Duration, Instant};

use crate::types::Point;

/// Click bookkeeping that survives across frames.
///
/// `active` means "the touch already fired its click and the markers have not
/// separated since". A new click needs the markers to move apart past the
/// threshold first, and the cooldown to have elapsed since the last fire.
///
/// The fire and reset paths share one distance threshold, so holding the
/// markers right at the boundary can oscillate with pixel noise. Known
/// limitation; a hysteresis band would change the feel of the gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickState {
    pub active: bool,
    pub last_click: Option<Instant>,
}

impl ClickState {
    pub fn new() -> Self {
        Self { active: false, last_click: None }
    }

    /// Advance the state machine for one frame where *both* markers were
    /// detected. Returns `true` when a click should be emitted this frame.
    ///
    /// When either marker is missing the caller must skip this entirely:
    /// losing track of a marker neither fires nor clears a click.
    pub fn update(
        &mut self,
        index: Point,
        thumb: Point,
        now: Instant,
        threshold: f64,
        cooldown: Duration,
    ) -> bool {
        let dist = index.distance_to(thumb);

        if dist < threshold {
            let cooled = match self.last_click {
                Some(t) => now.duration_since(t) > cooldown,
                None => true,
            };
            if !self.active && cooled {
                self.active = true;
                self.last_click = Some(now);
                return true;
            }
            // Still touching (or cooling down): suppress repeats.
            false
        } else {
            // Separated: arm the next touch.
            self.active = false;
            false
        }
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}
