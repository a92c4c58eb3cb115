use crate::render::{Frame, Renderer, text_frame_begin, text_frame_end};
use std::io::Write;

/// Truecolor renderer: one terminal cell covers a 1x2 pixel column, upper
/// pixel as foreground over a half-block glyph, lower pixel as background.
pub struct HalfBlockRenderer {
    last_fg: Option<(u8, u8, u8)>,
    last_bg: Option<(u8, u8, u8)>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_at(pixels: &[u8], idx: usize) -> (u8, u8, u8) {
    (pixels[idx], pixels[idx + 1], pixels[idx + 2])
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, visual_rows, w, _h)) = text_frame_begin(frame, 1, 2, out)? else {
            return Ok(());
        };

        self.last_fg = None;
        self.last_bg = None;

        const HALF_BLOCK: &[u8] = "\u{2580}".as_bytes();

        for row in 0..visual_rows {
            let top_row = row * 2 * w;
            let bot_row = top_row + w;
            for x in 0..cols {
                let fg = rgb_at(frame.pixels_rgba, (top_row + x) * 4);
                let bg = rgb_at(frame.pixels_rgba, (bot_row + x) * 4);

                // Fold both color changes into one escape when possible.
                let fg_new = self.last_fg != Some(fg);
                let bg_new = self.last_bg != Some(bg);
                if fg_new && bg_new {
                    write!(
                        out,
                        "\x1b[38;2;{};{};{};48;2;{};{};{}m",
                        fg.0, fg.1, fg.2, bg.0, bg.1, bg.2
                    )?;
                } else if fg_new {
                    write!(out, "\x1b[38;2;{};{};{}m", fg.0, fg.1, fg.2)?;
                } else if bg_new {
                    write!(out, "\x1b[48;2;{};{};{}m", bg.0, bg.1, bg.2)?;
                }
                self.last_fg = Some(fg);
                self.last_bg = Some(bg);
                out.write_all(HALF_BLOCK)?;
            }
            out.write_all(b"\r\n")?;
        }

        // The HUD must not inherit the last cell's background.
        out.write_all(b"\x1b[0m")?;
        text_frame_end(frame, cols, visual_rows, out)
    }
}
