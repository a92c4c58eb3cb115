use crate::scene::put_px;

const VERTS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Camera distance in cube-space units; controls perspective strength.
const CAMERA_DIST: f32 = 3.2;

/// Cube half-extent as a fraction of the smaller surface dimension, before
/// the audio-driven scale is applied.
const BASE_EXTENT: f32 = 0.25;

const EDGE_COLOR: (u8, u8, u8) = (120, 255, 220);
const VERT_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Wireframe cube with slow two-axis rotation; the uniform scale is the
/// smoothed audio-reactive value.
pub struct Cube;

impl Cube {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, buf: &mut [u8], w: usize, h: usize, t: f32, scale: f32) {
        if w == 0 || h == 0 || !scale.is_finite() || scale <= 0.0 {
            return;
        }

        let ax = t * 0.7;
        let ay = t * 0.9;
        let (sx, cx) = ax.sin_cos();
        let (sy, cy) = ay.sin_cos();

        let extent = BASE_EXTENT * w.min(h) as f32 * scale;
        let cx0 = w as f32 / 2.0;
        let cy0 = h as f32 * 0.58;

        let mut projected = [(0i32, 0i32); 8];
        for (i, v) in VERTS.iter().enumerate() {
            // Rotate about X, then Y.
            let y1 = v[1] * cx - v[2] * sx;
            let z1 = v[1] * sx + v[2] * cx;
            let x2 = v[0] * cy + z1 * sy;
            let z2 = -v[0] * sy + z1 * cy;

            let persp = CAMERA_DIST / (z2 + CAMERA_DIST + 1.0);
            projected[i] = (
                (cx0 + x2 * extent * persp).round() as i32,
                (cy0 + y1 * extent * persp).round() as i32,
            );
        }

        for &(a, b) in &EDGES {
            line(buf, w, h, projected[a], projected[b], EDGE_COLOR);
        }
        for &(px, py) in &projected {
            put_px(buf, w, h, px, py, VERT_COLOR);
        }
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

fn line(buf: &mut [u8], w: usize, h: usize, from: (i32, i32), to: (i32, i32), color: (u8, u8, u8)) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).max(1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = from.0 + (dx as f32 * t).round() as i32;
        let y = from.1 + (dy as f32 * t).round() as i32;
        put_px(buf, w, h, x, y, color);
    }
}
