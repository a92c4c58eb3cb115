use anyhow::anyhow;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-intro", version, about = "Audio-reactive demoscene intro for truecolor terminals")]
pub struct Config {
    #[arg(long, value_enum, default_value_t = AudioSource::Mic)]
    pub source: AudioSource,

    #[arg(long)]
    pub device: Option<String>,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// FFT window length; half of it becomes the number of frequency bins.
    #[arg(long, default_value_t = 256)]
    pub fft_size: usize,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, value_enum, default_value_t = ShadowMode::Auto)]
    pub shadow: ShadowMode,

    #[arg(long)]
    pub scroll_text: Option<String>,

    #[arg(long, default_value_t = 13.0)]
    pub scroller_delay: f32,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub auto_probe: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,

    #[arg(long, default_value_t = false)]
    pub list_devices: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fft_size < 32 || !self.fft_size.is_power_of_two() {
            return Err(anyhow!(
                "--fft-size must be a power of two >= 32 (got {})",
                self.fft_size
            ));
        }
        if self.fps == 0 {
            return Err(anyhow!("--fps must be at least 1"));
        }
        if !self.scroller_delay.is_finite() || self.scroller_delay < 0.0 {
            return Err(anyhow!(
                "--scroller-delay must be a non-negative number of seconds"
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AudioSource {
    Mic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShadowMode {
    Auto,
    #[value(alias = "full", alias = "layers")]
    Stacked,
    #[value(alias = "soft", alias = "reduced")]
    Single,
}
