//! Template localization over raster buffers.
//!
//! [`locate_template`] slides the template over the stitched frame and
//! returns the bounding rectangle of the single best candidate whose
//! similarity clears [`SIMILARITY_THRESHOLD`]. Multiple matches are not
//! reported; the caller only ever acts on one location per cycle.
//!
//! # Two-stage search
//!
//! A full per-pixel comparison at every candidate position is quadratic in
//! both image sizes, so candidates are first screened with a sparse grid of
//! template sample points under a per-channel tolerance. Only candidates that
//! survive the screen get a full mean-absolute-difference score. The sparse
//! grid rejects the overwhelming majority of positions after a handful of
//! pixel reads, which keeps a full-desktop scan in the tens of milliseconds.
//!
//! The function is deterministic and idempotent: the same frame and template
//! always produce the same result. Alpha is ignored on the frame side;
//! template pixels that are mostly transparent are skipped entirely, so
//! templates pasted from a clipboard with a soft edge still match.

use image::RgbaImage;
use tracing::trace;

use crate::domain::geometry::MatchRegion;

/// Minimum similarity (0.0–1.0) for a candidate to count as a match.
///
/// 0.95 tolerates the light antialiasing and colour-profile drift seen
/// between a pasted screenshot fragment and a fresh capture of the same
/// pixels, while rejecting merely similar UI elements.
const SIMILARITY_THRESHOLD: f64 = 0.95;

/// Per-channel tolerance for the sparse prefilter stage.
const PREFILTER_TOLERANCE: i32 = 24;

/// Template pixels with alpha below this are not compared.
const ALPHA_CUTOFF: u8 = 128;

/// Finds the best placement of `template` within `frame`.
///
/// Returns the match rectangle in frame coordinates if the best candidate's
/// similarity reaches the built-in confidence threshold, otherwise `None`.
/// A template that is empty or larger than the frame never matches.
pub fn locate_template(frame: &RgbaImage, template: &RgbaImage) -> Option<MatchRegion> {
    let (fw, fh) = frame.dimensions();
    let (tw, th) = template.dimensions();

    if tw == 0 || th == 0 || tw > fw || th > fh {
        return None;
    }

    let samples = sample_points(template);
    if samples.is_empty() {
        // Fully transparent template; nothing to compare against.
        return None;
    }

    let mut best: Option<(f64, u32, u32)> = None;

    for sy in 0..=(fh - th) {
        for sx in 0..=(fw - tw) {
            if !passes_prefilter(frame, template, sx, sy, &samples) {
                continue;
            }

            let score = similarity_at(frame, template, sx, sy);
            if score < SIMILARITY_THRESHOLD {
                continue;
            }
            // Strictly-greater keeps the earliest position on ties.
            if best.map_or(true, |(s, _, _)| score > s) {
                best = Some((score, sx, sy));
            }
        }
    }

    best.map(|(score, sx, sy)| {
        trace!("template matched at ({sx}, {sy}) with similarity {score:.4}");
        MatchRegion {
            left: sx as i32,
            top: sy as i32,
            width: tw,
            height: th,
        }
    })
}

/// Picks a sparse grid of opaque template pixels for the prefilter stage.
fn sample_points(template: &RgbaImage) -> Vec<(u32, u32)> {
    let (tw, th) = template.dimensions();
    // Roughly 100 samples regardless of template size, but never coarser
    // than needed to get at least one sample per row/column group.
    let step = ((tw * th) / 100).max(1);
    let step = (step as f64).sqrt().ceil() as u32;

    let mut points = Vec::new();
    for ty in (0..th).step_by(step as usize) {
        for tx in (0..tw).step_by(step as usize) {
            if template.get_pixel(tx, ty)[3] >= ALPHA_CUTOFF {
                points.push((tx, ty));
            }
        }
    }
    points
}

/// Cheap screen: every sampled template pixel must be within tolerance.
fn passes_prefilter(
    frame: &RgbaImage,
    template: &RgbaImage,
    sx: u32,
    sy: u32,
    samples: &[(u32, u32)],
) -> bool {
    for &(tx, ty) in samples {
        let tp = template.get_pixel(tx, ty);
        let fp = frame.get_pixel(sx + tx, sy + ty);
        for c in 0..3 {
            if (i32::from(fp[c]) - i32::from(tp[c])).abs() > PREFILTER_TOLERANCE {
                return false;
            }
        }
    }
    true
}

/// Full score: 1.0 minus the mean absolute RGB difference, normalized to 0–1.
fn similarity_at(frame: &RgbaImage, template: &RgbaImage, sx: u32, sy: u32) -> f64 {
    let (tw, th) = template.dimensions();
    let mut total_diff: u64 = 0;
    let mut compared: u64 = 0;

    for ty in 0..th {
        for tx in 0..tw {
            let tp = template.get_pixel(tx, ty);
            if tp[3] < ALPHA_CUTOFF {
                continue;
            }
            let fp = frame.get_pixel(sx + tx, sy + ty);
            for c in 0..3 {
                total_diff += u64::from(fp[c].abs_diff(tp[c]));
            }
            compared += 3;
        }
    }

    if compared == 0 {
        return 0.0;
    }
    1.0 - (total_diff as f64 / (compared as f64 * 255.0))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
