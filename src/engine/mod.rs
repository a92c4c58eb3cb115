mod envelope;
mod motion;
mod scheduler;
mod shadow;
mod smoother;

pub use envelope::{EnvelopeParams, EnvelopePhase, ScaleEnvelope};
pub use motion::{SWAY_SPAN, SwayMotion};
pub use scheduler::{AnimationScheduler, FrameInputs, FrameOutputs};
pub use shadow::{
    LAYER_COUNT, MAX_OFFSET_VW, ShadowLayer, ShadowProjector, ShadowStrategy, ShadowStyle,
    normalize_translation,
};
pub use smoother::{SMOOTHING_FACTOR, ScaleSmoother};
