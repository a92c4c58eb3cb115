use std::time::{Duration, Instant};
use tui_intro::engine::{
    AnimationScheduler, EnvelopePhase, FrameInputs, LAYER_COUNT, MAX_OFFSET_VW, ScaleEnvelope,
    ScaleSmoother, ShadowProjector, ShadowStrategy, ShadowStyle, SwayMotion,
    normalize_translation,
};

// ── Envelope phase progress ─────────────────────────────────────────────────

#[test]
fn progress_is_zero_before_the_ramp() {
    let env = ScaleEnvelope::new();
    assert_eq!(env.progress(0.0), 0.0);
    assert_eq!(env.progress(5.0), 0.0);
    assert_eq!(env.progress(10.0), 0.0);
}

#[test]
fn progress_ramps_linearly_and_saturates() {
    let env = ScaleEnvelope::new();
    assert!((env.progress(11.0) - 0.5).abs() < 1e-6);
    assert_eq!(env.progress(12.0), 1.0);
    assert_eq!(env.progress(13.0), 1.0);
    assert_eq!(env.progress(1e6), 1.0);
}

#[test]
fn progress_is_non_decreasing() {
    let env = ScaleEnvelope::new();
    let mut prev = 0.0f32;
    for i in 0..300 {
        let p = env.progress(i as f32 * 0.1);
        assert!(p >= prev, "progress regressed at t={}", i as f32 * 0.1);
        prev = p;
    }
}

#[test]
fn phase_classification_follows_progress() {
    let env = ScaleEnvelope::new();
    assert_eq!(env.phase(5.0), EnvelopePhase::Initial);
    assert_eq!(env.phase(11.0), EnvelopePhase::Transitioning);
    assert_eq!(env.phase(13.0), EnvelopePhase::Final);
}

// ── Envelope worked examples ────────────────────────────────────────────────

#[test]
fn initial_phase_worked_example() {
    let env = ScaleEnvelope::new();
    let p = env.params_at(env.progress(5.0));
    assert_eq!(p.min_scale, 0.0);
    assert_eq!(p.max_scale, 0.5);
    assert!((p.sensitivity - 0.002).abs() < 1e-9);

    // amplitude 128 at t=5: min(0.5, 0 + 128 * 0.002) = 0.256
    let target = env.target_scale(5.0, 128.0);
    assert!((target - 0.256).abs() < 1e-6, "target was {target}");
}

#[test]
fn transition_midpoint_worked_example() {
    let env = ScaleEnvelope::new();
    let p = env.params_at(env.progress(11.0));
    assert!((p.min_scale - 0.25).abs() < 1e-6);
    assert!((p.max_scale - 1.25).abs() < 1e-6);
    assert!((p.sensitivity - 0.006).abs() < 1e-7);

    // amplitude 128 at t=11: min(1.25, 0.25 + 0.768) = 1.018
    let target = env.target_scale(11.0, 128.0);
    assert!((target - 1.018).abs() < 1e-5, "target was {target}");
}

#[test]
fn target_is_monotonic_in_amplitude_and_saturates() {
    let env = ScaleEnvelope::new();
    let mut prev = f32::MIN;
    for amp in 0..=255 {
        let t = env.target_scale(11.0, amp as f32);
        assert!(t >= prev, "target regressed at amplitude {amp}");
        prev = t;
    }
    // The interpolated ceiling dominates large amplitudes.
    assert_eq!(env.target_scale(11.0, 1e9), 1.25);
    assert_eq!(env.target_scale(20.0, 1e9), 2.0);
}

#[test]
fn non_finite_amplitude_degrades_to_the_floor() {
    let env = ScaleEnvelope::new();
    assert_eq!(env.target_scale(5.0, f32::NAN), 0.0);
    assert_eq!(env.target_scale(20.0, f32::NAN), 0.5);
    assert_eq!(env.target_scale(20.0, f32::INFINITY), 0.5);
}

// ── Smoother ────────────────────────────────────────────────────────────────

#[test]
fn smoother_starts_at_zero() {
    assert_eq!(ScaleSmoother::new().value(), 0.0);
}

#[test]
fn smoothing_matches_the_closed_form_decay() {
    // For constant target T and r0 = 0: r_k = T - T * (1 - 0.08)^k.
    let mut s = ScaleSmoother::new();
    for k in 1..=50 {
        let v = s.tick(1.0);
        let expected = 1.0 - 0.92f32.powi(k);
        assert!(
            (v - expected).abs() < 1e-4,
            "tick {k}: rendered {v}, closed form {expected}"
        );
    }
    // (0.92)^50 ~ 0.015: still visibly short of the target at 50 ticks.
    assert!(1.0 - s.value() > 0.01);

    for _ in 0..200 {
        s.tick(1.0);
    }
    assert!((s.value() - 1.0).abs() < 1e-4);
}

#[test]
fn smoother_never_overshoots_a_constant_target() {
    let mut s = ScaleSmoother::new();
    for _ in 0..500 {
        let v = s.tick(1.5);
        assert!((0.0..=1.5).contains(&v));
    }
}

// ── Shadow projection ───────────────────────────────────────────────────────

#[test]
fn normalization_clamps_exactly_at_the_span_boundary() {
    // Span is 20% of the viewport: 160 px of an 800 px surface.
    assert_eq!(normalize_translation(160.0, 800.0), 1.0);
    assert_eq!(normalize_translation(-160.0, 800.0), -1.0);
    assert_eq!(normalize_translation(9999.0, 800.0), 1.0);
    assert_eq!(normalize_translation(-9999.0, 800.0), -1.0);
    assert!((normalize_translation(80.0, 800.0) - 0.5).abs() < 1e-6);
}

#[test]
fn degenerate_inputs_normalize_to_zero() {
    assert_eq!(normalize_translation(f32::NAN, 800.0), 0.0);
    assert_eq!(normalize_translation(f32::INFINITY, 800.0), 0.0);
    assert_eq!(normalize_translation(10.0, 0.0), 0.0);
    assert_eq!(normalize_translation(10.0, f32::NAN), 0.0);
}

#[test]
fn shadow_sign_law() {
    let projector = ShadowProjector::new(ShadowStrategy::Stacked);

    let right = projector.project(120.0, 800.0);
    for layer in right.layers() {
        assert!(layer.offset_x_vw <= 0.0, "moving right must cast left");
    }

    let left = projector.project(-120.0, 800.0);
    for layer in left.layers() {
        assert!(layer.offset_x_vw >= 0.0, "moving left must cast right");
    }
}

#[test]
fn shadow_offsets_strictly_increase_with_depth() {
    let projector = ShadowProjector::new(ShadowStrategy::Stacked);
    let style = projector.project(100.0, 800.0);
    let layers = style.layers();
    assert_eq!(layers.len(), LAYER_COUNT);

    let mut prev_x = 0.0f32;
    let mut prev_y = 0.0f32;
    for layer in layers {
        assert!(layer.offset_x_vw.abs() > prev_x);
        assert!(layer.offset_y_vw > prev_y);
        prev_x = layer.offset_x_vw.abs();
        prev_y = layer.offset_y_vw;
    }
    assert!((prev_y - MAX_OFFSET_VW).abs() < 1e-6);
}

#[test]
fn shadow_colors_fade_toward_black() {
    let projector = ShadowProjector::new(ShadowStrategy::Stacked);
    let style = projector.project(0.0, 800.0);
    let layers = style.layers();

    let mut prev = u8::MAX;
    for layer in layers {
        assert_eq!(layer.color.0, 0, "red channel stays dark");
        assert_eq!(layer.color.1, layer.color.2, "cyan ramp");
        assert!(layer.color.1 < prev, "intensity must strictly fall");
        prev = layer.color.1;
    }
    assert_eq!(layers.last().expect("ten layers").color, (0, 0, 0));
}

#[test]
fn centered_stack_for_zero_translation() {
    let projector = ShadowProjector::new(ShadowStrategy::Stacked);
    let style = projector.project(f32::NAN, 800.0);
    for layer in style.layers() {
        assert_eq!(layer.offset_x_vw, 0.0);
        assert!(layer.offset_y_vw > 0.0);
    }
}

#[test]
fn reduced_mode_is_one_midpoint_layer() {
    let projector = ShadowProjector::new(ShadowStrategy::Single);
    let style = projector.project(160.0, 800.0);
    let layers = style.layers();
    assert_eq!(layers.len(), 1);
    // Evaluated at layer progress 0.5 with normalized = 1.
    assert!((layers[0].offset_x_vw + 0.5 * MAX_OFFSET_VW).abs() < 1e-6);
    assert!((layers[0].offset_y_vw - 0.5 * MAX_OFFSET_VW).abs() < 1e-6);
    assert_eq!(layers[0].color, (0, 102, 102));
}

#[test]
fn off_style_exposes_no_layers() {
    assert!(ShadowStyle::Off.layers().is_empty());
    assert!(ShadowStyle::Off.is_off());
}

// ── Sway motion ─────────────────────────────────────────────────────────────

#[test]
fn sway_peaks_at_the_normalization_boundary() {
    let motion = SwayMotion::new();
    // Quarter period: the sine peak, 20% of the viewport width.
    let peak = motion.offset_px(1.5, 800.0);
    assert!((peak - 160.0).abs() < 1e-2, "peak was {peak}");
    let norm = normalize_translation(peak, 800.0);
    assert!((norm - 1.0).abs() < 1e-4);

    assert_eq!(motion.offset_px(0.0, 800.0), 0.0);
    let trough = motion.offset_px(4.5, 800.0);
    assert!((trough + 160.0).abs() < 1e-2, "trough was {trough}");
}

// ── Scheduler lifecycle ─────────────────────────────────────────────────────

fn inputs(amplitude: f32) -> FrameInputs {
    FrameInputs {
        amplitude,
        translation_px: 40.0,
        viewport_w: 800.0,
    }
}

#[test]
fn idle_scheduler_ignores_ticks() {
    let mut sched = AnimationScheduler::new(ShadowStrategy::Stacked);
    assert!(!sched.is_running());
    assert!(sched.tick(Instant::now(), inputs(128.0)).is_none());
    assert_eq!(sched.frames(), 0);
    assert!(sched.shadow().is_off());
}

#[test]
fn ticks_advance_the_frame_counter_and_publish_outputs() {
    let t0 = Instant::now();
    let mut sched = AnimationScheduler::new(ShadowStrategy::Stacked);
    sched.start(t0);

    let out = sched
        .tick(t0 + Duration::from_millis(16), inputs(128.0))
        .expect("running scheduler should tick");
    assert_eq!(sched.frames(), 1);
    assert!(out.scale > 0.0);
    assert_eq!(out.shadow.layers().len(), LAYER_COUNT);
    assert!(!sched.shadow().is_off());
}

#[test]
fn stop_is_idempotent_and_no_ticks_follow() {
    let t0 = Instant::now();
    let mut sched = AnimationScheduler::new(ShadowStrategy::Stacked);
    sched.start(t0);
    sched
        .tick(t0 + Duration::from_millis(16), inputs(128.0))
        .expect("first tick should run");

    sched.stop();
    sched.stop();

    let frames_after_stop = sched.frames();
    assert!(
        sched
            .tick(t0 + Duration::from_millis(32), inputs(128.0))
            .is_none()
    );
    assert_eq!(sched.frames(), frames_after_stop, "tick count must not move");
    assert!(sched.shadow().is_off(), "stop resets the shadow to neutral");
}

#[test]
fn stop_keeps_the_rendered_scale() {
    let t0 = Instant::now();
    let mut sched = AnimationScheduler::new(ShadowStrategy::Stacked);
    sched.start(t0);
    for i in 1..=20 {
        let _ = sched.tick(t0 + Duration::from_millis(16 * i), inputs(200.0));
    }
    let scale_before = sched.scale();
    assert!(scale_before > 0.0);

    sched.stop();
    assert_eq!(sched.scale(), scale_before);
}

#[test]
fn restart_begins_a_fresh_activation_clock() {
    let t0 = Instant::now();
    let mut sched = AnimationScheduler::new(ShadowStrategy::Stacked);
    sched.start(t0);
    let deep = sched
        .tick(t0 + Duration::from_secs(30), inputs(128.0))
        .expect("tick in final phase");
    assert!(deep.elapsed_s > 20.0);

    sched.stop();

    let t1 = t0 + Duration::from_secs(60);
    sched.start(t1);
    assert_eq!(sched.frames(), 0, "fresh activation restarts the counter");
    let early = sched
        .tick(t1 + Duration::from_secs(1), inputs(128.0))
        .expect("tick in fresh activation");
    assert!(
        early.elapsed_s < 2.0,
        "clock origin must reset (elapsed {})",
        early.elapsed_s
    );
}

#[test]
fn start_while_running_is_a_no_op() {
    let t0 = Instant::now();
    let mut sched = AnimationScheduler::new(ShadowStrategy::Stacked);
    sched.start(t0);
    let _ = sched.tick(t0 + Duration::from_secs(15), inputs(128.0));

    // A second enable signal must not restart the clock mid-activation.
    sched.start(t0 + Duration::from_secs(20));
    let out = sched
        .tick(t0 + Duration::from_secs(20), inputs(128.0))
        .expect("still running");
    assert!(out.elapsed_s > 19.0);
}

#[test]
fn degenerate_tick_inputs_do_not_poison_either_pipeline() {
    let t0 = Instant::now();
    let mut sched = AnimationScheduler::new(ShadowStrategy::Stacked);
    sched.start(t0);

    let out = sched
        .tick(
            t0 + Duration::from_millis(16),
            FrameInputs {
                amplitude: f32::NAN,
                translation_px: f32::NAN,
                viewport_w: 0.0,
            },
        )
        .expect("degenerate inputs must not kill the tick");

    assert!(out.scale.is_finite());
    for layer in out.shadow.layers() {
        assert_eq!(layer.offset_x_vw, 0.0, "shadow collapses to centered");
    }
}
