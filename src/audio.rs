use crate::config::AudioSource;
use anyhow::{Context, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat};
use ringbuf::HeapRb;
use ringbuf::traits::{Consumer as _, Producer as _, Split as _};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::TAU;
use std::io::{self, Write};
use std::sync::Arc;

/// Byte-spectrum conversion range: magnitudes below MIN_DB clamp to 0,
/// above MAX_DB to 255.
const MIN_DB: f32 = -100.0;
const MAX_DB: f32 = -30.0;

/// Per-refresh magnitude smoothing applied before the dB conversion.
const TIME_SMOOTHING: f32 = 0.8;

pub fn list_input_devices() -> anyhow::Result<()> {
    let host = cpal::default_host();
    let mut out = io::stdout();
    writeln!(out, "Input devices:")?;
    for dev in host.input_devices().context("enumerate input devices")? {
        let name = dev.name().unwrap_or_else(|_| "<unknown>".into());
        writeln!(out, "  - {name}")?;
    }
    Ok(())
}

/// Owns the capture stream and the frequency analysis for one enable-cycle.
/// Acquired at most once per activation; dropping it releases the stream.
pub struct AudioSystem {
    // Held for its lifetime; cpal stops capture when the stream drops.
    _stream: cpal::Stream,
    sampler: SpectrumSampler,
    pub sample_rate_hz: u32,
}

impl AudioSystem {
    pub fn new(
        source: AudioSource,
        device_query: Option<&str>,
        fft_size: usize,
    ) -> anyhow::Result<Self> {
        match source {
            AudioSource::Mic => Self::new_mic(device_query, fft_size),
        }
    }

    fn new_mic(device_query: Option<&str>, fft_size: usize) -> anyhow::Result<Self> {
        let host = cpal::default_host();
        let device = select_input_device(&host, device_query)?;
        let supported = device
            .default_input_config()
            .context("get default input config")?;
        let sample_rate_hz = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let config: cpal::StreamConfig = supported.clone().into();

        // Four seconds of headroom; the frame loop drains this every tick.
        let rb = HeapRb::<f32>::new((sample_rate_hz as usize).saturating_mul(4));
        let (mut prod, cons) = rb.split();

        let err_fn = |err| eprintln!("audio stream error: {err}");

        macro_rules! capture_stream {
            ($t:ty) => {
                device.build_input_stream(
                    &config,
                    move |data: &[$t], _| push_interleaved(data, channels, &mut prod),
                    err_fn,
                    None,
                )
            };
        }

        let stream = match supported.sample_format() {
            SampleFormat::F32 => capture_stream!(f32)?,
            SampleFormat::I16 => capture_stream!(i16)?,
            SampleFormat::U16 => capture_stream!(u16)?,
            fmt => return Err(anyhow!("unsupported sample format: {fmt:?}")),
        };

        stream.play().context("start input stream")?;

        Ok(Self {
            _stream: stream,
            sampler: SpectrumSampler::new(cons, fft_size),
            sample_rate_hz,
        })
    }

    /// One amplitude scalar for this frame; see [`SpectrumSampler::sample`].
    pub fn sample(&mut self) -> f32 {
        self.sampler.sample()
    }

    pub fn bins(&self) -> &[u8] {
        self.sampler.bins()
    }
}

/// Frequency analysis with preallocated buffers, driven by the frame loop.
///
/// Only one caller may invoke `sample`, once per frame: the byte bins are
/// overwritten in place on every refresh.
pub struct SpectrumSampler {
    cons: ringbuf::HeapCons<f32>,
    window: Vec<f32>,
    write_pos: usize,
    filled: usize,
    hann: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    fft_buf: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bins: Vec<u8>,
}

impl SpectrumSampler {
    pub fn new(cons: ringbuf::HeapCons<f32>, fft_size: usize) -> Self {
        let n = fft_size.max(32);
        let hann = (0..n)
            .map(|i| 0.5 * (1.0 - (TAU * i as f32 / n as f32).cos()))
            .collect::<Vec<_>>();

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n);

        Self {
            cons,
            window: vec![0.0; n],
            write_pos: 0,
            filled: 0,
            hann,
            fft,
            fft_buf: vec![Complex { re: 0.0, im: 0.0 }; n],
            smoothed: vec![0.0; n / 2],
            bins: vec![0; n / 2],
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    /// Drain pending capture data, refresh the byte spectrum in place, and
    /// return the mean magnitude across all bins. Returns 0.0 until a full
    /// window has been captured; never fails.
    pub fn sample(&mut self) -> f32 {
        let n = self.window.len();
        while let Some(s) = self.cons.try_pop() {
            self.window[self.write_pos] = s;
            self.write_pos = (self.write_pos + 1) % n;
            if self.filled < n {
                self.filled += 1;
            }
        }

        if self.filled == n {
            self.refresh_bins();
        }

        mean_magnitude(&self.bins)
    }

    fn refresh_bins(&mut self) {
        let n = self.window.len();
        for i in 0..n {
            let s = self.window[(self.write_pos + i) % n];
            self.fft_buf[i].re = s * self.hann[i];
            self.fft_buf[i].im = 0.0;
        }

        self.fft.process(&mut self.fft_buf);

        let scale = 1.0 / n as f32;
        for (i, c) in self.fft_buf.iter().take(self.bins.len()).enumerate() {
            let mag = (c.re * c.re + c.im * c.im).sqrt() * scale;
            self.smoothed[i] = self.smoothed[i] * TIME_SMOOTHING + mag * (1.0 - TIME_SMOOTHING);
            self.bins[i] = db_to_byte(self.smoothed[i]);
        }
    }
}

/// Arithmetic mean of the byte bins; 0.0 for an empty buffer.
pub fn mean_magnitude(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

fn db_to_byte(mag: f32) -> u8 {
    if mag <= 0.0 {
        return 0;
    }
    let db = 20.0 * mag.log10();
    let t = (db - MIN_DB) / (MAX_DB - MIN_DB);
    (t.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn select_input_device(
    host: &cpal::Host,
    device_query: Option<&str>,
) -> anyhow::Result<cpal::Device> {
    let Some(query) = device_query else {
        return host
            .default_input_device()
            .ok_or_else(|| anyhow!("no default input device found"));
    };

    let needle = query.to_lowercase();
    host.input_devices()
        .context("enumerate input devices")?
        .find(|d| {
            d.name()
                .is_ok_and(|n| n.to_lowercase().contains(&needle))
        })
        .ok_or_else(|| anyhow!("no input device matching: {needle}"))
}

/// Downmix interleaved frames to mono. A full ring buffer drops samples
/// rather than blocking the capture callback.
fn push_interleaved<T: Sample<Float = f32> + Copy>(
    data: &[T],
    channels: usize,
    prod: &mut ringbuf::HeapProd<f32>,
) {
    for frame in data.chunks(channels.max(1)) {
        let sum: f32 = frame.iter().map(|s| s.to_float_sample()).sum();
        let _ = prod.try_push(sum / frame.len() as f32);
    }
}
