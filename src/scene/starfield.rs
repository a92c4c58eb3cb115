use crate::scene::blend_px;
use std::f32::consts::TAU;

struct LayerSpec {
    count: usize,
    size: usize,
    opacity: f32,
    /// Seconds for one full horizontal wrap; smaller = nearer = faster.
    drift_span_s: f32,
}

const LAYERS: [LayerSpec; 3] = [
    LayerSpec { count: 80, size: 1, opacity: 0.6, drift_span_s: 40.0 },
    LayerSpec { count: 50, size: 2, opacity: 0.8, drift_span_s: 25.0 },
    LayerSpec { count: 30, size: 3, opacity: 1.0, drift_span_s: 15.0 },
];

const TWINKLE_PERIOD_S: f32 = 5.0;

struct Star {
    // Normalized 0..1 so a resize needs no regeneration.
    x: f32,
    y: f32,
    layer: usize,
    twinkle_phase: f32,
}

/// Three-layer parallax backdrop. Placement is one-shot random at startup;
/// per frame the layers only drift and twinkle.
pub struct Starfield {
    stars: Vec<Star>,
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Starfield {
    pub fn new() -> Self {
        let mut stars = Vec::new();
        for (layer, spec) in LAYERS.iter().enumerate() {
            for _ in 0..spec.count {
                stars.push(Star {
                    x: fastrand::f32(),
                    y: fastrand::f32(),
                    layer,
                    twinkle_phase: fastrand::f32() * TAU,
                });
            }
        }
        Self { stars }
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn draw(&self, buf: &mut [u8], w: usize, h: usize, t: f32) {
        for star in &self.stars {
            let spec = &LAYERS[star.layer];
            let drift = t / spec.drift_span_s;
            let x = (star.x - drift).rem_euclid(1.0);

            let twinkle = 0.75 + 0.25 * (TAU * t / TWINKLE_PERIOD_S + star.twinkle_phase).sin();
            let alpha = (spec.opacity * twinkle).clamp(0.0, 1.0);

            let px = (x * w as f32) as i32;
            let py = (star.y * h as f32) as i32;
            for dy in 0..spec.size as i32 {
                for dx in 0..spec.size as i32 {
                    blend_px(buf, w, h, px + dx, py + dy, (235, 240, 255), alpha);
                }
            }
        }
    }
}
