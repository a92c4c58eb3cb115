use tui_intro::engine::{ShadowLayer, ShadowStyle};
use tui_intro::scene::{MIN_SURFACE_H, MIN_SURFACE_W, Scene, SceneCtx, Scroller, Starfield, font};

// ── Bitmap font ─────────────────────────────────────────────────────────────

#[test]
fn text_width_accounts_for_gaps_and_scale() {
    assert_eq!(font::text_width("", 1), 0);
    // One glyph: 5 px; two glyphs: 5 + 1 + 5.
    assert_eq!(font::text_width("A", 1), 5);
    assert_eq!(font::text_width("AB", 1), 11);
    assert_eq!(font::text_width("AB", 2), 22);
    assert_eq!(font::text_height(3), 21);
}

#[test]
fn lowercase_folds_to_uppercase() {
    assert_eq!(font::glyph('a'), font::glyph('A'));
    assert!(font::glyph('Z').is_some());
    assert!(font::glyph('~').is_none());
}

#[test]
fn rasterized_pixels_stay_inside_the_text_box() {
    let text = "BEYOND 2025!";
    let scale = 2;
    let w = font::text_width(text, scale);
    let h = font::text_height(scale);
    let mut count = 0usize;
    font::for_each_pixel(text, scale, |x, y| {
        assert!(x < w, "x {x} outside width {w}");
        assert!(y < h, "y {y} outside height {h}");
        count += 1;
    });
    assert!(count > 0, "text should light at least one pixel");
}

#[test]
fn unknown_glyphs_advance_but_stay_dark() {
    let mut lit_tilde = 0usize;
    font::for_each_pixel("~", 1, |_, _| lit_tilde += 1);
    assert_eq!(lit_tilde, 0);
    // The blank glyph still occupies a cell in the width calculation.
    assert_eq!(font::text_width("~A", 1), 11);
}

// ── Starfield ───────────────────────────────────────────────────────────────

#[test]
fn starfield_places_all_layers_once() {
    let field = Starfield::new();
    assert_eq!(field.star_count(), 80 + 50 + 30);
}

#[test]
fn starfield_draw_touches_the_buffer() {
    let field = Starfield::new();
    let (w, h) = (120usize, 80usize);
    let mut buf = vec![0u8; w * h * 4];
    field.draw(&mut buf, w, h, 3.2);
    assert!(
        buf.chunks_exact(4).any(|px| px[0] > 0 || px[1] > 0),
        "stars should be visible on a black surface"
    );
}

// ── Scroller ────────────────────────────────────────────────────────────────

#[test]
fn scroller_enters_from_the_right_edge() {
    let s = Scroller::new("HELLO WORLD".to_string());
    let w = 200usize;
    assert_eq!(s.column_offset(0.0, w), w as f32);
}

#[test]
fn scroller_moves_left_and_loops() {
    let s = Scroller::new("HELLO WORLD".to_string());
    let w = 200usize;

    let early = s.column_offset(1.0, w);
    let later = s.column_offset(2.0, w);
    assert!(later < early, "marquee must move right-to-left");

    let period = s.loop_period_s(w);
    let a = s.column_offset(1.0, w);
    let b = s.column_offset(1.0 + period, w);
    assert!((a - b).abs() < 0.5, "offset must repeat each loop: {a} vs {b}");
}

// ── Scene composition ───────────────────────────────────────────────────────

fn ctx<'a>(w: usize, h: usize, shadow: &'a ShadowStyle) -> SceneCtx<'a> {
    SceneCtx {
        t: 12.5,
        w,
        h,
        scale: 1.2,
        sway_px: 18.0,
        shadow,
        scroller_t: Some(0.5),
    }
}

#[test]
fn degenerate_surface_skips_the_frame() {
    let mut scene = Scene::new("BEYOND", "SCROLL".to_string());
    let shadow = ShadowStyle::Off;
    let pixels = scene.render(&ctx(MIN_SURFACE_W - 1, MIN_SURFACE_H - 1, &shadow));
    assert!(pixels.is_empty());
}

#[test]
fn full_frame_is_opaque_rgba() {
    let mut scene = Scene::new("BEYOND", "SCROLL".to_string());
    let shadow = ShadowStyle::Off;
    let (w, h) = (160usize, 96usize);
    let pixels = scene.render(&ctx(w, h, &shadow));
    assert_eq!(pixels.len(), w * h * 4);
    assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn logo_and_shadow_layers_reach_the_surface() {
    let mut scene = Scene::new("BEYOND", "SCROLL".to_string());
    let layers = vec![ShadowLayer {
        offset_x_vw: -1.0,
        offset_y_vw: 1.0,
        color: (0, 184, 184),
    }];
    let shadow = ShadowStyle::Stacked(layers);
    let (w, h) = (200usize, 120usize);
    let pixels = scene.render(&ctx(w, h, &shadow)).to_vec();

    let logo_px = pixels
        .chunks_exact(4)
        .filter(|px| px[0] == 0 && px[1] == 238 && px[2] == 238)
        .count();
    assert!(logo_px > 0, "banner pixels missing");

    let shadow_px = pixels
        .chunks_exact(4)
        .filter(|px| px[0] == 0 && px[1] == 184 && px[2] == 184)
        .count();
    assert!(shadow_px > 0, "shadow layer pixels missing");
}

#[test]
fn zero_scale_hides_the_cube_but_keeps_the_frame() {
    let mut scene = Scene::new("BEYOND", "SCROLL".to_string());
    let shadow = ShadowStyle::Off;
    let (w, h) = (160usize, 96usize);
    let mut c = ctx(w, h, &shadow);
    c.scale = 0.0;
    c.scroller_t = None;
    let pixels = scene.render(&c);
    assert_eq!(pixels.len(), w * h * 4);
    // No cube edge color anywhere at scale zero.
    let edge_px = pixels
        .chunks_exact(4)
        .filter(|px| px[0] == 120 && px[1] == 255 && px[2] == 220)
        .count();
    assert_eq!(edge_px, 0);
}

#[test]
fn resize_between_frames_reallocates_cleanly() {
    let mut scene = Scene::new("BEYOND", "SCROLL".to_string());
    let shadow = ShadowStyle::Off;
    assert_eq!(scene.render(&ctx(64, 48, &shadow)).len(), 64 * 48 * 4);
    assert_eq!(scene.render(&ctx(200, 120, &shadow)).len(), 200 * 120 * 4);
    assert_eq!(scene.render(&ctx(64, 48, &shadow)).len(), 64 * 48 * 4);
}
