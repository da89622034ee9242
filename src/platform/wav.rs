//! WAV clip loading and playback position tracking

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

/// A fully decoded WAV file as interleaved f32 samples in -1.0..=1.0
#[derive(Debug, Clone, PartialEq)]
pub struct WavClip {
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

impl WavClip {
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let reader = hound::WavReader::open(path)
            .with_context(|| format!("Failed to open WAV '{}'", path.display()))?;

        let spec = reader.spec();
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to read float samples")?,
            hound::SampleFormat::Int => {
                let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .collect::<Result<Vec<_>, _>>()
                    .context("Failed to read int samples")?
                    .into_iter()
                    .map(|s| s as f32 / max_val)
                    .collect()
            }
        };

        Ok(Self {
            samples,
            channels: spec.channels.max(1) as usize,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }
}

/// Read position in a clip, stepping at the output device's rate.
///
/// Rate conversion is linear interpolation between neighbouring frames.
/// Output channels beyond the clip's channel count reuse clip channels
/// modulo the clip's count, so mono plays on every speaker.
pub struct ClipCursor {
    clip: Arc<WavClip>,
    position: f64,
    step: f64,
}

impl ClipCursor {
    pub fn new(clip: Arc<WavClip>, output_rate: u32) -> Self {
        let step = clip.sample_rate as f64 / output_rate.max(1) as f64;
        Self {
            clip,
            position: 0.0,
            step,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.clip.frames() as f64
    }

    /// Value for output `channel` at the current position
    pub fn sample(&self, channel: usize) -> f32 {
        if self.is_finished() {
            return 0.0;
        }
        let frames = self.clip.frames();
        let source_channel = channel % self.clip.channels;
        let index = self.position.floor() as usize;
        let frac = (self.position - index as f64) as f32;

        let at = |frame: usize| self.clip.samples[frame * self.clip.channels + source_channel];
        let current = at(index);
        let next = if index + 1 < frames { at(index + 1) } else { current };
        current + (next - current) * frac
    }

    /// Move to the next output frame
    pub fn advance(&mut self) {
        self.position += self.step;
    }

    /// Fill an interleaved output buffer, padding with silence once the clip
    /// runs out. Returns whether the clip is exhausted.
    pub fn fill(&mut self, output: &mut [f32], channels: usize, volume: f32) -> bool {
        for frame in output.chunks_mut(channels) {
            for (channel, sample) in frame.iter_mut().enumerate() {
                *sample = self.sample(channel) * volume;
            }
            if !self.is_finished() {
                self.advance();
            }
        }
        self.is_finished()
    }
}
