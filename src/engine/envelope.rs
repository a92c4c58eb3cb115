/// Seconds into an activation before the ramp toward the final parameter set
/// begins, and how long the ramp takes.
const TRANSITION_START_S: f32 = 10.0;
const TRANSITION_DURATION_S: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeParams {
    pub min_scale: f32,
    pub max_scale: f32,
    pub sensitivity: f32,
}

/// Subtle opening regime: the cube stays small while the intro builds.
const INITIAL_PARAMS: EnvelopeParams = EnvelopeParams {
    min_scale: 0.0,
    max_scale: 0.5,
    sensitivity: 0.002,
};

/// Full-reactivity regime after the ramp.
const FINAL_PARAMS: EnvelopeParams = EnvelopeParams {
    min_scale: 0.5,
    max_scale: 2.0,
    sensitivity: 0.01,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopePhase {
    Initial,
    Transitioning,
    Final,
}

/// Maps elapsed activation time into the {min, max, sensitivity} set and
/// combines it with the frame's amplitude into a target scale.
#[derive(Clone, Debug)]
pub struct ScaleEnvelope {
    from: EnvelopeParams,
    to: EnvelopeParams,
    start_s: f32,
    duration_s: f32,
}

impl Default for ScaleEnvelope {
    fn default() -> Self {
        Self {
            from: INITIAL_PARAMS,
            to: FINAL_PARAMS,
            start_s: TRANSITION_START_S,
            duration_s: TRANSITION_DURATION_S,
        }
    }
}

impl ScaleEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0 before the ramp, linear through it, saturating at 1.
    pub fn progress(&self, elapsed_s: f32) -> f32 {
        if !elapsed_s.is_finite() {
            return 0.0;
        }
        ((elapsed_s - self.start_s) / self.duration_s).clamp(0.0, 1.0)
    }

    pub fn phase(&self, elapsed_s: f32) -> EnvelopePhase {
        let p = self.progress(elapsed_s);
        if p <= 0.0 {
            EnvelopePhase::Initial
        } else if p < 1.0 {
            EnvelopePhase::Transitioning
        } else {
            EnvelopePhase::Final
        }
    }

    pub fn params_at(&self, progress: f32) -> EnvelopeParams {
        let t = progress.clamp(0.0, 1.0);
        EnvelopeParams {
            min_scale: lerp(self.from.min_scale, self.to.min_scale, t),
            max_scale: lerp(self.from.max_scale, self.to.max_scale, t),
            sensitivity: lerp(self.from.sensitivity, self.to.sensitivity, t),
        }
    }

    /// Target scale for this frame. The interpolated ceiling always wins over
    /// a large amplitude; a non-finite amplitude degrades to the floor.
    pub fn target_scale(&self, elapsed_s: f32, amplitude: f32) -> f32 {
        let amp = if amplitude.is_finite() { amplitude } else { 0.0 };
        let p = self.params_at(self.progress(elapsed_s));
        p.max_scale.min(p.min_scale + amp * p.sensitivity)
    }
}

fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
