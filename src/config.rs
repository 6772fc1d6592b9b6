// All tunables in one place. There is no config file; these defaults are the
// whole configuration surface and are meant to be edited for the local
// lighting setup.

/// Inclusive HSV threshold band. Hue uses the OpenCV convention (0..=179,
/// half degrees) so the usual color tables apply directly.
#[derive(Clone, Copy, Debug)]
pub struct HsvBand {
    pub hue: (u8, u8),
    pub sat: (u8, u8),
    pub val: (u8, u8),
}

impl HsvBand {
    #[inline]
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        self.hue.0 <= h && h <= self.hue.1
            && self.sat.0 <= s && s <= self.sat.1
            && self.val.0 <= v && v <= self.val.1
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Blue marker on the index finger: one contiguous hue band.
    pub index_band: HsvBand,
    /// Red marker on the thumb: red straddles the hue wrap-around, so it
    /// needs two bands whose masks are unioned.
    pub thumb_bands: [HsvBand; 2],

    /// Radius of the round structuring element for the opening pass.
    pub opening_radius: usize,

    /// EMA weight on the *previous* cursor position. Higher = steadier,
    /// laggier cursor.
    pub smooth_factor: f64,

    /// Radius of the discs drawn at detected markers in the preview.
    pub draw_radius: u32,

    /// Markers closer than this (camera pixels) count as touching.
    pub click_distance: f64,

    /// Minimum time between two fired clicks.
    pub click_cooldown_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let draw_radius = 20;
        Self {
            index_band: HsvBand {
                hue: (90, 150),
                sat: (60, 255),
                val: (60, 255),
            },
            thumb_bands: [
                HsvBand { hue: (0, 10), sat: (80, 255), val: (80, 255) },
                HsvBand { hue: (170, 179), sat: (80, 255), val: (80, 255) },
            ],
            opening_radius: 1,
            smooth_factor: 0.85,
            draw_radius,
            // Touch threshold: the two drawn discs just overlapping.
            click_distance: 2.0 * draw_radius as f64,
            click_cooldown_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_bounds_are_inclusive() {
        let band = HsvBand { hue: (90, 150), sat: (60, 255), val: (60, 255) };
        assert!(band.contains(90, 60, 60));
        assert!(band.contains(150, 255, 255));
        assert!(!band.contains(89, 255, 255));
        assert!(!band.contains(151, 255, 255));
        assert!(!band.contains(120, 59, 255));
    }

    #[test]
    fn click_distance_tracks_draw_radius() {
        let cfg = Config::default();
        assert_eq!(cfg.click_distance, 40.0);
        assert_eq!(cfg.click_cooldown_ms, 300);
    }
}
