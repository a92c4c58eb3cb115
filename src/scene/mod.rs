mod cube;
pub mod font;
mod logo;
mod scroller;
mod starfield;

pub use cube::Cube;
pub use logo::Logo;
pub use scroller::Scroller;
pub use starfield::Starfield;

use crate::engine::ShadowStyle;

/// Minimum pixel surface below which a frame is skipped instead of drawn.
pub const MIN_SURFACE_W: usize = 16;
pub const MIN_SURFACE_H: usize = 8;

/// Per-frame scene parameters, all derived outside the scene: the scheduler
/// clock, the smoothed scale, the published sway offset and shadow style.
pub struct SceneCtx<'a> {
    pub t: f32,
    pub w: usize,
    pub h: usize,
    pub scale: f32,
    pub sway_px: f32,
    pub shadow: &'a ShadowStyle,
    pub scroller_t: Option<f32>,
}

/// Composes backdrop, cube, logo and marquee into one RGBA buffer.
pub struct Scene {
    starfield: Starfield,
    logo: Logo,
    scroller: Scroller,
    cube: Cube,
    pixels: Vec<u8>,
}

impl Scene {
    pub fn new(banner: &str, scroll_text: String) -> Self {
        Self {
            starfield: Starfield::new(),
            logo: Logo::new(banner),
            scroller: Scroller::new(scroll_text),
            cube: Cube::new(),
            pixels: Vec::new(),
        }
    }

    pub fn scroller(&self) -> &Scroller {
        &self.scroller
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// Render one frame. A degenerate surface yields an empty slice; the
    /// caller skips presentation for that frame.
    pub fn render(&mut self, ctx: &SceneCtx<'_>) -> &[u8] {
        if ctx.w < MIN_SURFACE_W || ctx.h < MIN_SURFACE_H {
            self.pixels.clear();
            return &self.pixels;
        }

        let len = ctx.w * ctx.h * 4;
        if self.pixels.len() != len {
            self.pixels = vec![0; len];
        }
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = 2;
            px[1] = 3;
            px[2] = 12;
            px[3] = 255;
        }

        self.starfield.draw(&mut self.pixels, ctx.w, ctx.h, ctx.t);
        self.cube.draw(&mut self.pixels, ctx.w, ctx.h, ctx.t, ctx.scale);
        self.logo.draw(&mut self.pixels, ctx.w, ctx.h, ctx.sway_px, ctx.shadow);
        if let Some(st) = ctx.scroller_t {
            self.scroller.draw(&mut self.pixels, ctx.w, ctx.h, st);
        }

        &self.pixels
    }
}

pub(crate) fn put_px(buf: &mut [u8], w: usize, h: usize, x: i32, y: i32, color: (u8, u8, u8)) {
    if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
        return;
    }
    let i = (y as usize * w + x as usize) * 4;
    if i + 3 >= buf.len() {
        return;
    }
    buf[i] = color.0;
    buf[i + 1] = color.1;
    buf[i + 2] = color.2;
    buf[i + 3] = 255;
}

pub(crate) fn blend_px(
    buf: &mut [u8],
    w: usize,
    h: usize,
    x: i32,
    y: i32,
    color: (u8, u8, u8),
    alpha: f32,
) {
    if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
        return;
    }
    let a = alpha.clamp(0.0, 1.0);
    let i = (y as usize * w + x as usize) * 4;
    if i + 3 >= buf.len() {
        return;
    }
    buf[i] = (buf[i] as f32 * (1.0 - a) + color.0 as f32 * a) as u8;
    buf[i + 1] = (buf[i + 1] as f32 * (1.0 - a) + color.1 as f32 * a) as u8;
    buf[i + 2] = (buf[i + 2] as f32 * (1.0 - a) + color.2 as f32 * a) as u8;
    buf[i + 3] = 255;
}
