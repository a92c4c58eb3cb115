use crate::config::{RendererMode, ShadowMode};

#[derive(Debug, Clone)]
pub struct CapabilityReport {
    pub auto_probe: bool,
    pub requested_renderer: RendererMode,
    pub requested_shadow: ShadowMode,
    pub renderer: RendererMode,
    pub shadow: ShadowMode,
    notes: Vec<String>,
}

impl CapabilityReport {
    pub fn changed(&self) -> bool {
        self.renderer != self.requested_renderer
            || (self.requested_shadow != ShadowMode::Auto && self.shadow != self.requested_shadow)
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn status_label(&self) -> String {
        if !self.auto_probe {
            return format!(
                "off (renderer={:?}, shadow={:?})",
                self.renderer, self.shadow
            );
        }
        if self.changed() {
            return format!(
                "fallback ren {:?}->{:?}, shadow {:?}->{:?}",
                self.requested_renderer, self.renderer, self.requested_shadow, self.shadow
            );
        }
        format!("ok ren={:?}, shadow={:?}", self.renderer, self.shadow)
    }
}

/// Resolve renderer and shadow strategy once, before the frame loop starts.
/// The hot path never re-checks terminal capabilities.
pub fn probe_runtime(
    requested_renderer: RendererMode,
    requested_shadow: ShadowMode,
    auto_probe: bool,
) -> CapabilityReport {
    let mut report = CapabilityReport {
        auto_probe,
        requested_renderer,
        requested_shadow,
        renderer: requested_renderer,
        shadow: requested_shadow,
        notes: Vec::new(),
    };

    if !auto_probe {
        if report.shadow == ShadowMode::Auto {
            report.shadow = match report.renderer {
                RendererMode::HalfBlock => ShadowMode::Stacked,
                RendererMode::Ascii => ShadowMode::Single,
            };
        }
        report.push_note("capability probe disabled by --auto-probe=false");
        return report;
    }

    let truecolor = truecolor_available();

    if requested_renderer == RendererMode::HalfBlock && !truecolor {
        report.renderer = RendererMode::Ascii;
        report.push_note(
            "truecolor unavailable in this terminal; falling back to ascii renderer",
        );
    }

    report.shadow = match requested_shadow {
        ShadowMode::Auto => {
            if report.renderer == RendererMode::HalfBlock {
                ShadowMode::Stacked
            } else {
                ShadowMode::Single
            }
        }
        ShadowMode::Stacked if report.renderer == RendererMode::Ascii => {
            report.push_note(
                "stacked shadow needs the truecolor renderer; using single-layer shadow",
            );
            ShadowMode::Single
        }
        other => other,
    };

    if report.notes.is_empty() {
        report.push_note("probe selected requested renderer/shadow with no fallback");
    }

    report
}

fn truecolor_available() -> bool {
    if let Ok(v) = std::env::var("TUI_INTRO_FORCE_TRUECOLOR") {
        let s = v.trim().to_ascii_lowercase();
        if s == "1" || s == "true" || s == "yes" || s == "on" {
            return true;
        }
        if s == "0" || s == "false" || s == "no" || s == "off" {
            return false;
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return true;
    }

    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if term.contains("direct") || term.contains("kitty") || term.contains("ghostty") {
        return true;
    }

    false
}
