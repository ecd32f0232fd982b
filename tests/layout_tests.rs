use photoloop::layout::{clamp_to_max_dim, fit_within, ndc_scale};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn wide_image_is_letterboxed() {
    let (w, h) = fit_within(1920, 1080, 4000, 1000);
    assert!(close(w, 1920.0));
    assert!(close(h, 480.0));
}

#[test]
fn tall_image_is_pillarboxed() {
    let (w, h) = fit_within(1920, 1080, 1000, 2000);
    assert!(close(w, 540.0));
    assert!(close(h, 1080.0));
}

#[test]
fn small_image_is_not_upscaled() {
    let (w, h) = fit_within(1920, 1080, 640, 480);
    assert!(close(w, 640.0));
    assert!(close(h, 480.0));
    let [sx, sy] = ndc_scale(1920, 1080, 640, 480);
    assert!(close(sx, 640.0 / 1920.0));
    assert!(close(sy, 480.0 / 1080.0));
}

#[test]
fn matching_aspect_fills_the_screen() {
    let [sx, sy] = ndc_scale(1280, 720, 2560, 1440);
    assert!(close(sx, 1.0));
    assert!(close(sy, 1.0));
}

#[test]
fn zero_sizes_do_not_divide_by_zero() {
    let [sx, sy] = ndc_scale(0, 0, 0, 0);
    assert!(sx.is_finite() && sy.is_finite());
}

#[test]
fn clamp_keeps_aspect_under_texture_limit() {
    assert_eq!(clamp_to_max_dim(16384, 8192, 8192), (8192, 4096));
    assert_eq!(clamp_to_max_dim(3000, 9000, 4500), (1500, 4500));
    assert_eq!(clamp_to_max_dim(800, 600, 8192), (800, 600));
    assert_eq!(clamp_to_max_dim(100_000, 1, 1000), (1000, 1));
}
