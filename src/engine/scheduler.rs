use crate::engine::envelope::ScaleEnvelope;
use crate::engine::shadow::{ShadowProjector, ShadowStrategy, ShadowStyle};
use crate::engine::smoother::ScaleSmoother;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Running { started: Instant },
    Stopped,
}

/// Per-frame values the scheduler consumes. The amplitude comes from the
/// sampler (sampled by the caller immediately before the tick, preserving the
/// sample -> target -> smooth order); the translation is the sway offset
/// published for this frame; the viewport width is queried fresh, not cached.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs {
    pub amplitude: f32,
    pub translation_px: f32,
    pub viewport_w: f32,
}

#[derive(Clone, Debug)]
pub struct FrameOutputs {
    pub scale: f32,
    pub shadow: ShadowStyle,
    pub elapsed_s: f32,
}

/// Drives the scale and shadow pipelines once per display frame and owns the
/// activation lifecycle. Each activation has its own clock origin; Stopped is
/// terminal for that activation and a fresh start begins a new one.
pub struct AnimationScheduler {
    state: State,
    envelope: ScaleEnvelope,
    smoother: ScaleSmoother,
    projector: ShadowProjector,
    shadow: ShadowStyle,
    frames: u64,
}

impl AnimationScheduler {
    pub fn new(strategy: ShadowStrategy) -> Self {
        Self {
            state: State::Idle,
            envelope: ScaleEnvelope::new(),
            smoother: ScaleSmoother::new(),
            projector: ShadowProjector::new(strategy),
            shadow: ShadowStyle::Off,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Ticks delivered within the current activation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last published shadow descriptor; `Off` outside an activation.
    pub fn shadow(&self) -> &ShadowStyle {
        &self.shadow
    }

    pub fn scale(&self) -> f32 {
        self.smoother.value()
    }

    pub fn elapsed_s(&self, now: Instant) -> Option<f32> {
        match self.state {
            State::Running { started } => Some(now.duration_since(started).as_secs_f32()),
            _ => None,
        }
    }

    /// Begin an activation with a fresh clock origin. No-op while already
    /// running. The rendered scale is intentionally not reset: it re-converges
    /// from wherever the previous activation left it.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.state = State::Running { started: now };
        self.frames = 0;
    }

    /// Idempotent. Resets the shadow to its neutral value; after this, no
    /// further tick does any work until a fresh start.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.state = State::Stopped;
        }
        self.shadow = ShadowStyle::Off;
    }

    /// One frame of both pipelines. Returns `None` (and touches nothing)
    /// outside an activation.
    pub fn tick(&mut self, now: Instant, inputs: FrameInputs) -> Option<FrameOutputs> {
        let State::Running { started } = self.state else {
            return None;
        };
        let elapsed_s = now.duration_since(started).as_secs_f32();

        // Scale pipeline: target from amplitude + elapsed, then smooth.
        let target = self.envelope.target_scale(elapsed_s, inputs.amplitude);
        let scale = self.smoother.tick(target);

        // Shadow pipeline, independent of the scale path: degenerate inputs
        // collapse to a centered stack inside the projector.
        self.shadow = self.projector.project(inputs.translation_px, inputs.viewport_w);

        self.frames += 1;
        Some(FrameOutputs {
            scale,
            shadow: self.shadow.clone(),
            elapsed_s,
        })
    }
}
