/// Per-frame convergence rate toward the target scale.
pub const SMOOTHING_FACTOR: f32 = 0.08;

/// First-order exponential filter over the target scale. The target moves
/// every frame, so this tracks within a bound rather than converging exactly.
#[derive(Clone, Copy, Debug)]
pub struct ScaleSmoother {
    rendered: f32,
    factor: f32,
}

impl Default for ScaleSmoother {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleSmoother {
    /// Starts at zero so the cube grows in from nothing.
    pub fn new() -> Self {
        Self {
            rendered: 0.0,
            factor: SMOOTHING_FACTOR,
        }
    }

    pub fn tick(&mut self, target: f32) -> f32 {
        let target = if target.is_finite() { target } else { 0.0 };
        self.rendered += (target - self.rendered) * self.factor;
        self.rendered
    }

    pub fn value(&self) -> f32 {
        self.rendered
    }
}
