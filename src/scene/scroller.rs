use crate::scene::{font, put_px};
use std::f32::consts::TAU;

const SCROLL_SCALE: usize = 1;
const GAP_PX: f32 = 96.0;
const BOUNCE_AMP_PX: f32 = 3.0;
const BOUNCE_HZ: f32 = 0.9;
const TEXT_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Looping right-to-left marquee. Pure: the draw position is a function of
/// time since reveal, nothing persists between frames.
pub struct Scroller {
    text: String,
}

impl Scroller {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Leftmost pixel column of the text for a given time since reveal. The
    /// text enters from the right edge and wraps after it has fully left.
    pub fn column_offset(&self, t: f32, viewport_w: usize) -> f32 {
        let text_w = font::text_width(&self.text, SCROLL_SCALE) as f32;
        let span = text_w + viewport_w as f32 + GAP_PX;
        let speed = viewport_w as f32 / 7.0;
        viewport_w as f32 - (t * speed).rem_euclid(span)
    }

    /// Seconds until the scroll position repeats.
    pub fn loop_period_s(&self, viewport_w: usize) -> f32 {
        let text_w = font::text_width(&self.text, SCROLL_SCALE) as f32;
        let span = text_w + viewport_w as f32 + GAP_PX;
        span / (viewport_w as f32 / 7.0)
    }

    pub fn draw(&self, buf: &mut [u8], w: usize, h: usize, t: f32) {
        if w == 0 || h == 0 {
            return;
        }

        let x0 = self.column_offset(t, w).round() as i32;
        let bounce = (BOUNCE_AMP_PX * (TAU * BOUNCE_HZ * t).sin()).round() as i32;
        let y0 = h as i32 - font::text_height(SCROLL_SCALE) as i32 - 4 + bounce;

        font::for_each_pixel(&self.text, SCROLL_SCALE, |x, y| {
            put_px(buf, w, h, x0 + x as i32, y0 + y as i32, TEXT_COLOR);
        });
    }
}
