use crate::engine::ShadowStyle;
use crate::scene::{blend_px, font, put_px};

const LOGO_COLOR: (u8, u8, u8) = (0, 238, 238);

/// Banner stamped from the bitmap face, positioned by the shared sway offset,
/// with the projected shadow layers stamped beneath it.
pub struct Logo {
    text: String,
    scale: usize,
}

impl Logo {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            scale: 2,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn draw(&self, buf: &mut [u8], w: usize, h: usize, sway_px: f32, shadow: &ShadowStyle) {
        if w == 0 || h == 0 {
            return;
        }

        // Shrink until the banner fits narrow surfaces.
        let mut scale = self.scale;
        while scale > 1 && font::text_width(&self.text, scale) > w {
            scale -= 1;
        }

        let text_w = font::text_width(&self.text, scale);
        let base_x = (w as i32 - text_w as i32) / 2 + sway_px.round() as i32;
        let base_y = (h as f32 * 0.16) as i32;

        // Deepest layer first so nearer layers paint over it.
        let vw = w as f32 / 100.0;
        for layer in shadow.layers().iter().rev() {
            let ox = (layer.offset_x_vw * vw).round() as i32;
            let oy = (layer.offset_y_vw * vw).round() as i32;
            let color = layer.color;
            font::for_each_pixel(&self.text, scale, |x, y| {
                put_px(buf, w, h, base_x + ox + x as i32, base_y + oy + y as i32, color);
            });
        }

        font::for_each_pixel(&self.text, scale, |x, y| {
            put_px(buf, w, h, base_x + x as i32, base_y + y as i32, LOGO_COLOR);
        });

        // Soft glow line under the banner.
        let glow_y = base_y + font::text_height(scale) as i32 + 1;
        for x in 0..text_w as i32 {
            blend_px(buf, w, h, base_x + x, glow_y, LOGO_COLOR, 0.25);
        }
    }
}
