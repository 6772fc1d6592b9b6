// Color-marker perception: HSV segmentation, mask cleanup, and locating the
// dominant blob per mask. Everything here is per-frame and stateless.

use crate::config::HsvBand;
use crate::types::{FrameBuffer, Mask, Point};

/// Convert one 0x00RRGGBB pixel to HSV with OpenCV-style ranges:
/// hue in 0..=179 (half degrees), saturation and value in 0..=255.
pub fn rgb_to_hsv(pixel: u32) -> (u8, u8, u8) {
    let r = ((pixel >> 16) & 0xFF) as f32;
    let g = ((pixel >> 8) & 0xFF) as f32;
    let b = (pixel & 0xFF) as f32;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

    // Hue in degrees, then halved to fit 0..=179.
    let h_deg = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta) + 120.0
    } else {
        60.0 * ((r - g) / delta) + 240.0
    };

    let h = (h_deg / 2.0).round() as i32 % 180;
    (h as u8, s.round() as u8, v.round() as u8)
}

/// Threshold a frame into a binary mask: a pixel is foreground when its HSV
/// value falls inside *any* of the given bands (the thumb's red needs two
/// bands because its hue wraps around zero), then run one morphological
/// opening to knock out speckle noise.
pub fn segment(frame: &FrameBuffer, bands: &[HsvBand], opening_radius: usize) -> Mask {
    let mut mask = Mask::new(frame.width, frame.height);
    for (i, &px) in frame.pixels.iter().enumerate() {
        let (h, s, v) = rgb_to_hsv(px);
        if bands.iter().any(|band| band.contains(h, s, v)) {
            mask.data[i] = 255;
        }
    }
    open(&mut mask, opening_radius);
    mask
}

/// Offsets of a filled disc of the given radius, the round structuring
/// element for erode/dilate. Radius 1 gives the 4-neighborhood cross.
fn disc_offsets(radius: usize) -> Vec<(i32, i32)> {
    let r = radius as i32;
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Morphological opening in place: erosion then dilation with the same round
/// structuring element. Pixels outside the frame count as background.
pub fn open(mask: &mut Mask, radius: usize) {
    if radius == 0 {
        return;
    }
    let offsets = disc_offsets(radius);
    let eroded = morph(mask, &offsets, true);
    let opened = morph(&eroded, &offsets, false);
    mask.data = opened.data;
}

fn morph(src: &Mask, offsets: &[(i32, i32)], erode: bool) -> Mask {
    let (w, h) = (src.width as i32, src.height as i32);
    let mut out = Mask::new(src.width, src.height);
    for y in 0..h {
        for x in 0..w {
            let mut hit = erode; // erode: all must be set; dilate: any
            for &(dx, dy) in offsets {
                let (nx, ny) = (x + dx, y + dy);
                let set = nx >= 0
                    && ny >= 0
                    && nx < w
                    && ny < h
                    && src.get(nx as usize, ny as usize) != 0;
                if erode {
                    hit &= set;
                    if !hit {
                        break;
                    }
                } else {
                    hit |= set;
                    if hit {
                        break;
                    }
                }
            }
            if hit {
                out.set(x as usize, y as usize, 255);
            }
        }
    }
    out
}

/// Find the dominant marker blob in a binary mask.
///
/// Foreground regions are traced 4-connected, seeded in raster scan order;
/// a region's area is its pixel count. We keep the first region that attains
/// the maximum area (strict `>` comparison), so ties resolve to the earliest
/// region in scan order and the result is reproducible. The returned point is
/// the center of the winning region's axis-aligned bounding box.
///
/// An empty mask simply means the marker is not visible right now, so the
/// result is `None`, not an error.
pub fn locate(mask: &Mask) -> Option<Point> {
    let (w, h) = (mask.width, mask.height);
    let mut visited = vec![false; w * h];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    let mut best_area = 0usize;
    let mut best_bbox: Option<(usize, usize, usize, usize)> = None; // min_x, min_y, max_x, max_y

    for sy in 0..h {
        for sx in 0..w {
            let idx = sy * w + sx;
            if mask.data[idx] == 0 || visited[idx] {
                continue;
            }

            // Flood-fill one region, tracking area and bounding box.
            let mut area = 0usize;
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (sx, sy, sx, sy);
            visited[idx] = true;
            stack.push((sx, sy));
            while let Some((x, y)) = stack.pop() {
                area += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                let mut visit = |nx: usize, ny: usize, stack: &mut Vec<(usize, usize)>| {
                    let nidx = ny * w + nx;
                    if mask.data[nidx] != 0 && !visited[nidx] {
                        visited[nidx] = true;
                        stack.push((nx, ny));
                    }
                };
                if x > 0 {
                    visit(x - 1, y, &mut stack);
                }
                if x + 1 < w {
                    visit(x + 1, y, &mut stack);
                }
                if y > 0 {
                    visit(x, y - 1, &mut stack);
                }
                if y + 1 < h {
                    visit(x, y + 1, &mut stack);
                }
            }

            if area > best_area {
                best_area = area;
                best_bbox = Some((min_x, min_y, max_x, max_y));
            }
        }
    }

    best_bbox.map(|(min_x, min_y, max_x, max_y)| {
        let bw = (max_x - min_x + 1) as f64;
        let bh = (max_y - min_y + 1) as f64;
        Point::new(min_x as f64 + bw / 2.0, min_y as f64 + bh / 2.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let h = rows.len();
        let w = rows[0].len();
        let mut mask = Mask::new(w, h);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    mask.set(x, y, 255);
                }
            }
        }
        mask
    }

    #[test]
    fn hsv_of_primaries() {
        assert_eq!(rgb_to_hsv(0x00FF0000), (0, 255, 255)); // red
        assert_eq!(rgb_to_hsv(0x0000FF00), (60, 255, 255)); // green
        assert_eq!(rgb_to_hsv(0x000000FF), (120, 255, 255)); // blue
        assert_eq!(rgb_to_hsv(0x00000000), (0, 0, 0)); // black
        assert_eq!(rgb_to_hsv(0x00FFFFFF), (0, 0, 255)); // white
    }

    #[test]
    fn blue_pixel_lands_in_index_band() {
        let cfg = Config::default();
        let (h, s, v) = rgb_to_hsv(0x000000FF);
        assert!(cfg.index_band.contains(h, s, v));
    }

    #[test]
    fn red_wraparound_needs_both_bands() {
        let cfg = Config::default();
        // Orange-ish red sits in the low band, crimson in the high band.
        let (h1, s1, v1) = rgb_to_hsv(0x00FF2000);
        let (h2, s2, v2) = rgb_to_hsv(0x00FF0030);
        let low = cfg.thumb_bands[0];
        let high = cfg.thumb_bands[1];
        assert!(low.contains(h1, s1, v1) || high.contains(h1, s1, v1));
        assert!(low.contains(h2, s2, v2) || high.contains(h2, s2, v2));
        // Pure blue matches neither.
        let (hb, sb, vb) = rgb_to_hsv(0x000000FF);
        assert!(!low.contains(hb, sb, vb) && !high.contains(hb, sb, vb));
    }

    #[test]
    fn segment_unions_thumb_bands() {
        let cfg = Config::default();
        let fb = FrameBuffer {
            width: 8,
            height: 8,
            // Left half low-band red, right half high-band red.
            pixels: (0..64)
                .map(|i| if i % 8 < 4 { 0x00FF0000 } else { 0x00FF0030 })
                .collect(),
        };
        let mask = segment(&fb, &cfg.thumb_bands, 0);
        assert!(mask.data.iter().all(|&v| v == 255));
    }

    #[test]
    fn opening_removes_single_pixel_speckle() {
        let mut mask = mask_from_rows(&[
            "........",
            ".#......",
            "....###.",
            "....###.",
            "....###.",
            "........",
        ]);
        open(&mut mask, 1);
        // The lone pixel is gone...
        assert_eq!(mask.get(1, 1), 0);
        // ...while the 3x3 blob keeps its center.
        assert_eq!(mask.get(5, 3), 255);
    }

    #[test]
    fn locate_empty_mask_is_none() {
        let mask = Mask::new(16, 16);
        assert_eq!(locate(&mask), None);
    }

    #[test]
    fn locate_picks_largest_region() {
        // Small blob first in scan order, big blob later; the big one wins.
        let mask = mask_from_rows(&[
            "##..........",
            "##..........",
            "............",
            "....#####...",
            "....#####...",
            "....#####...",
            "....#####...",
            "............",
        ]);
        let p = locate(&mask).unwrap();
        // Bounding box x in [4, 8], y in [3, 6].
        assert_eq!(p, Point::new(6.5, 5.0));
    }

    #[test]
    fn locate_tie_breaks_to_first_in_scan_order() {
        let mask = mask_from_rows(&[
            "##....##",
            "##....##",
        ]);
        let p = locate(&mask).unwrap();
        assert_eq!(p, Point::new(1.0, 1.0));
    }

    #[test]
    fn locate_single_pixel() {
        let mut mask = Mask::new(5, 5);
        mask.set(2, 3, 255);
        assert_eq!(locate(&mask), Some(Point::new(2.5, 3.5)));
    }
}
