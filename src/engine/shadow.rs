/// Number of synthetic light layers on the full rendering path.
pub const LAYER_COUNT: usize = 10;

/// Deepest-layer offset, in vw units (1 vw = viewport width / 100).
pub const MAX_OFFSET_VW: f32 = 1.0;

/// Brightest layer's cyan channel value; deeper layers fade toward black.
const BASE_INTENSITY: f32 = 204.0;

/// Fraction of the viewport width at which the normalized translation
/// saturates. Matches the sway span, so the extremes land exactly on +/-1.
const NORMALIZE_SPAN: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowLayer {
    pub offset_x_vw: f32,
    pub offset_y_vw: f32,
    pub color: (u8, u8, u8),
}

/// Composed descriptor handed to the presentation layer. `Off` is the
/// neutral value the scheduler resets to on stop.
#[derive(Clone, Debug, PartialEq)]
pub enum ShadowStyle {
    Stacked(Vec<ShadowLayer>),
    Single(ShadowLayer),
    Off,
}

impl ShadowStyle {
    pub fn layers(&self) -> &[ShadowLayer] {
        match self {
            Self::Stacked(layers) => layers,
            Self::Single(layer) => std::slice::from_ref(layer),
            Self::Off => &[],
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}

/// Stacked (full path) vs. single soft layer (reduced path). Resolved once
/// from the capability report before the frame loop starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowStrategy {
    Stacked,
    Single,
}

/// Fans the logo's horizontal offset out into the layered shadow. The shadow
/// moves opposite to the element, simulating a fixed light source.
#[derive(Clone, Copy, Debug)]
pub struct ShadowProjector {
    strategy: ShadowStrategy,
}

impl ShadowProjector {
    pub fn new(strategy: ShadowStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ShadowStrategy {
        self.strategy
    }

    pub fn project(&self, translation_px: f32, viewport_w: f32) -> ShadowStyle {
        let normalized = normalize_translation(translation_px, viewport_w);
        match self.strategy {
            ShadowStrategy::Stacked => ShadowStyle::Stacked(
                (1..=LAYER_COUNT)
                    .map(|i| layer_at(normalized, i as f32 / LAYER_COUNT as f32))
                    .collect(),
            ),
            ShadowStrategy::Single => ShadowStyle::Single(layer_at(normalized, 0.5)),
        }
    }
}

/// Horizontal offset scaled into [-1, 1]. Degenerate inputs (non-finite
/// offset, zero-width viewport) map to 0: the shadow collapses to a centered
/// symmetric stack instead of failing.
pub fn normalize_translation(translation_px: f32, viewport_w: f32) -> f32 {
    if !translation_px.is_finite() || !viewport_w.is_finite() || viewport_w <= 0.0 {
        return 0.0;
    }
    (translation_px / (NORMALIZE_SPAN * viewport_w)).clamp(-1.0, 1.0)
}

fn layer_at(normalized: f32, layer_progress: f32) -> ShadowLayer {
    let intensity = (BASE_INTENSITY - BASE_INTENSITY * layer_progress).round() as u8;
    ShadowLayer {
        offset_x_vw: -normalized * MAX_OFFSET_VW * layer_progress,
        offset_y_vw: MAX_OFFSET_VW * layer_progress,
        color: (0, intensity, intensity),
    }
}
