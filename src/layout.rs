//! Placement math for showing one image on a fixed-size screen.

/// Size of a `src_w`×`src_h` image letterboxed inside the canvas.
///
/// Aspect ratio is preserved and the image is only ever scaled down, so
/// small pictures stay at their native size in the middle of the screen.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fit_within(canvas_w: u32, canvas_h: u32, src_w: u32, src_h: u32) -> (f32, f32) {
    let iw = src_w.max(1) as f32;
    let ih = src_h.max(1) as f32;
    let cw = canvas_w.max(1) as f32;
    let ch = canvas_h.max(1) as f32;
    let scale = (cw / iw).min(ch / ih).min(1.0);
    (iw * scale, ih * scale)
}

/// Quad scale in normalized device coordinates for [`fit_within`].
///
/// A full-screen quad spans `[-1, 1]` on both axes; multiplying its corners
/// by the returned factors yields the centered, letterboxed placement.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ndc_scale(canvas_w: u32, canvas_h: u32, src_w: u32, src_h: u32) -> [f32; 2] {
    let (w, h) = fit_within(canvas_w, canvas_h, src_w, src_h);
    [w / canvas_w.max(1) as f32, h / canvas_h.max(1) as f32]
}

/// Largest size not exceeding `max_dim` on either side, keeping aspect ratio.
///
/// Used to stay under the GPU texture size limit.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn clamp_to_max_dim(src_w: u32, src_h: u32, max_dim: u32) -> (u32, u32) {
    let longest = src_w.max(src_h);
    if longest <= max_dim || max_dim == 0 {
        return (src_w, src_h);
    }
    let scale = max_dim as f32 / longest as f32;
    let w = (src_w as f32 * scale).round().clamp(1.0, max_dim as f32);
    let h = (src_h as f32 * scale).round().clamp(1.0, max_dim as f32);
    (w as u32, h as u32)
}
