mod ascii;
mod halfblock;

pub use ascii::AsciiRenderer;
pub use halfblock::HalfBlockRenderer;

use std::io::Write;

pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    pub visual_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels_rgba: &'a [u8],
    pub hud: &'a str,
    pub hud_rows: u16,
    pub overlay: Option<&'a str>,
    pub sync_updates: bool,
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 54 + g as u32 * 183 + b as u32 * 19) >> 8) as u8
}

pub(crate) fn write_fg_rgb(out: &mut dyn Write, r: u8, g: u8, b: u8) -> anyhow::Result<()> {
    write!(out, "\x1b[38;2;{};{};{}m", r, g, b)?;
    Ok(())
}

/// Common frame prologue: size sanity checks, synchronized-update begin,
/// home + reset, autowrap off. Returns None when the frame should be skipped.
pub(crate) fn text_frame_begin(
    frame: &Frame<'_>,
    px_w_mul: usize,
    px_h_mul: usize,
    out: &mut dyn Write,
) -> anyhow::Result<Option<(usize, usize, usize, usize)>> {
    let cols = frame.term_cols as usize;
    let visual_rows = frame.visual_rows as usize;
    let w = frame.pixel_width;
    let h = frame.pixel_height;

    if cols == 0 || visual_rows == 0 || w == 0 || h == 0 {
        return Ok(None);
    }
    if w != cols * px_w_mul || h != visual_rows * px_h_mul {
        // Internal mismatch; skip rather than panic.
        return Ok(None);
    }
    if frame.pixels_rgba.len() < w * h * 4 {
        return Ok(None);
    }

    if frame.sync_updates {
        out.write_all(b"\x1b[?2026h")?;
    }
    out.write_all(b"\x1b[H\x1b[0m")?;
    // Autowrap off while painting full-width rows; terminals otherwise wrap at
    // the last column and leave visible gaps.
    out.write_all(b"\x1b[?7l")?;
    Ok(Some((cols, visual_rows, w, h)))
}

/// Common frame epilogue: HUD rows, optional overlay, autowrap restore,
/// synchronized-update end, flush.
pub(crate) fn text_frame_end(
    frame: &Frame<'_>,
    cols: usize,
    visual_rows: usize,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut hud_lines = frame.hud.lines();
    for i in 0..(frame.hud_rows as usize) {
        write!(out, "\x1b[{};1H\x1b[0m\x1b[2K", visual_rows + i + 1)?;
        if let Some(mut line) = hud_lines.next() {
            if line.len() > cols {
                line = &line[..cols];
            }
            write!(out, "{line}")?;
        }
    }

    if let Some(text) = frame.overlay {
        draw_overlay_box(out, frame.term_cols, frame.term_rows, text)?;
    }

    out.write_all(b"\x1b[?7h")?;
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026l")?;
    }
    out.flush()?;
    Ok(())
}

/// Centered bordered box over the scene, used for the interaction prompt and
/// the one-shot audio failure report.
pub(crate) fn draw_overlay_box(
    out: &mut dyn Write,
    term_cols: u16,
    term_rows: u16,
    text: &str,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let cols = term_cols as usize;
    let rows = term_rows as usize;
    if cols < 8 || rows < 4 {
        return Ok(());
    }

    let max_inner = cols.saturating_sub(6).max(1);
    let lines: Vec<&str> = text.lines().collect();
    let inner_w = lines
        .iter()
        .map(|l| l.chars().count().min(max_inner))
        .max()
        .unwrap_or(1)
        .max(1);

    let box_w = inner_w + 4;
    let box_h = lines.len() + 2;
    let start_col = (cols.saturating_sub(box_w)) / 2 + 1;
    let start_row = (rows.saturating_sub(box_h)) / 2 + 1;

    let horiz = "-".repeat(box_w.saturating_sub(2));
    out.write_all(b"\x1b[0m\x1b[38;2;236;242;255m\x1b[48;2;10;14;24m")?;
    write!(out, "\x1b[{};{}H+{}+", start_row, start_col, horiz)?;
    for (i, line) in lines.iter().enumerate() {
        let clipped: String = line.chars().take(inner_w).collect();
        write!(
            out,
            "\x1b[{};{}H| {:<inner_w$} |",
            start_row + 1 + i,
            start_col,
            clipped,
            inner_w = inner_w
        )?;
    }
    write!(
        out,
        "\x1b[{};{}H+{}+",
        start_row + 1 + lines.len(),
        start_col,
        horiz
    )?;
    out.write_all(b"\x1b[0m")?;
    Ok(())
}
