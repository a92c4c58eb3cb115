use crate::render::{Frame, Renderer, luma_u8, text_frame_begin, text_frame_end, write_fg_rgb};
use std::io::Write;

/// Reduced-capability renderer: one cell per pixel, brightness mapped onto a
/// compact ASCII ramp. Usable where half-block glyphs or truecolor pairs
/// render badly.
pub struct AsciiRenderer {
    last_fg: Option<(u8, u8, u8)>,
}

/// Dark -> bright.
const RAMP: &[u8] = b" .':;+=xzfkXEKDRQ#%&@";

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { last_fg: None }
    }

    fn cell(&mut self, rgb: (u8, u8, u8), out: &mut dyn Write) -> anyhow::Result<()> {
        if self.last_fg != Some(rgb) {
            write_fg_rgb(out, rgb.0, rgb.1, rgb.2)?;
            self.last_fg = Some(rgb);
        }
        let level = luma_u8(rgb.0, rgb.1, rgb.2) as usize;
        out.write_all(&[RAMP[level * (RAMP.len() - 1) / 255]])?;
        Ok(())
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, visual_rows, w, _h)) = text_frame_begin(frame, 1, 1, out)? else {
            return Ok(());
        };

        self.last_fg = None;

        for y in 0..visual_rows {
            for x in 0..cols {
                let i = (y * w + x) * 4;
                let rgb = (
                    frame.pixels_rgba[i],
                    frame.pixels_rgba[i + 1],
                    frame.pixels_rgba[i + 2],
                );
                self.cell(rgb, out)?;
            }
            out.write_all(b"\r\n")?;
        }

        text_frame_end(frame, cols, visual_rows, out)
    }
}
