//! Sound file playback on the default cpal output device

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, FromSample, Sample, SizedSample, Stream, StreamConfig,
};
use super::wav::{ClipCursor, WavClip};
use super::{PlaySoundParams, SoundBackend};
use crate::arbiter::CompletionNotifier;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How often a worker checks whether its clip has played out
const FINISH_POLL: Duration = Duration::from_millis(10);

/// Time allowed for the device to play the last buffers after the clip ends
const DRAIN_TIME: Duration = Duration::from_millis(100);

/// Slack on top of the clip length before a silent stream is given up on
const FINISH_MARGIN: Duration = Duration::from_secs(2);

/// End-of-clip signal shared between the stream callbacks and the worker
#[derive(Default)]
struct PlaybackWatch {
    finished: AtomicBool,
    failed: AtomicBool,
}

impl PlaybackWatch {
    fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }

    fn fail(&self) {
        self.failed.store(true, Ordering::Release);
    }

    /// Block until the clip has played out, the stream reported an error,
    /// or `limit` has passed
    fn wait(&self, limit: Duration) -> Result<(), anyhow::Error> {
        let started = Instant::now();
        loop {
            if self.failed.load(Ordering::Acquire) {
                return Err(anyhow::anyhow!("Output stream failed during playback"));
            }
            if self.finished.load(Ordering::Acquire) {
                return Ok(());
            }
            if started.elapsed() >= limit {
                return Err(anyhow::anyhow!(
                    "Playback did not finish within {:.2}s",
                    limit.as_secs_f32()
                ));
            }
            thread::sleep(FINISH_POLL);
        }
    }
}

/// Plays sound files on the default output device.
///
/// Every `play` runs on its own worker thread, which owns the cpal stream for
/// the length of the clip (streams aren't `Send` on every host).
pub struct CpalBackend {
    shutdown: Arc<AtomicBool>,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check that an output device is available
    pub fn probe() -> Result<(), anyhow::Error> {
        let device = Self::default_device()?;
        log::info!("Output device: {}", device.name()?);
        Ok(())
    }

    fn default_device() -> Result<Device, anyhow::Error> {
        cpal::default_host()
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("Default output device is not available"))
    }

    /// Worker body: load, play to the end, then release the arbiter
    fn run_playback(
        path: PathBuf,
        params: PlaySoundParams,
        on_complete: CompletionNotifier,
        shutdown: Arc<AtomicBool>,
    ) {
        match Self::play_clip(&path, params) {
            Ok(stream) => {
                if params.auto_stop {
                    drop(stream);
                    on_complete.notify();
                } else {
                    on_complete.notify();
                    while !shutdown.load(Ordering::Acquire) {
                        thread::sleep(FINISH_POLL);
                    }
                    drop(stream);
                }
            }
            Err(e) => {
                log::error!("Failed to play '{}': {e:#}", path.display());
                on_complete.notify();
            }
        }
    }

    /// Play the clip until it is exhausted and return the still-open stream
    fn play_clip(path: &Path, params: PlaySoundParams) -> Result<Stream, anyhow::Error> {
        let clip = Arc::new(WavClip::load(path)?);
        log::debug!(
            "Loaded '{}': {} ch, {} Hz, {:.2}s",
            path.display(),
            clip.channels,
            clip.sample_rate,
            clip.duration_secs()
        );
        let limit = Duration::from_secs_f32(clip.duration_secs()) + FINISH_MARGIN;

        let device = Self::default_device()?;
        let supported_config = device.default_output_config()?;
        let config: StreamConfig = supported_config.clone().into();

        let cursor = ClipCursor::new(clip, config.sample_rate.0);
        let watch = Arc::new(PlaybackWatch::default());
        let volume = params.volume;

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::I8 => Self::make_stream::<i8>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::I16 => Self::make_stream::<i16>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::I32 => Self::make_stream::<i32>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::I64 => Self::make_stream::<i64>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::U8 => Self::make_stream::<u8>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::U16 => Self::make_stream::<u16>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::U32 => Self::make_stream::<u32>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::U64 => Self::make_stream::<u64>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::F32 => Self::make_stream::<f32>(&device, &config, cursor, volume, watch.clone())?,
            cpal::SampleFormat::F64 => Self::make_stream::<f64>(&device, &config, cursor, volume, watch.clone())?,
            sample_format => return Err(anyhow::anyhow!("Unsupported sample format '{}'", sample_format)),
        };

        stream.play()?;
        watch.wait(limit)?;

        if params.auto_stop {
            thread::sleep(DRAIN_TIME);
            stream.pause()?;
        }

        Ok(stream)
    }

    /// Create a typed stream for the given sample format
    fn make_stream<T>(
        device: &Device,
        config: &StreamConfig,
        mut cursor: ClipCursor,
        volume: f32,
        watch: Arc<PlaybackWatch>,
    ) -> Result<Stream, anyhow::Error>
    where
        T: SizedSample + FromSample<f32>,
    {
        let num_channels = config.channels as usize;
        let mut scratch: Vec<f32> = Vec::new();

        let err_watch = watch.clone();
        let err_fn = move |err: cpal::StreamError| {
            log::error!("Error in output sound stream: {}", err);
            err_watch.fail();
        };

        let stream = device.build_output_stream(
            config,
            move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
                Self::process_frame(output, &mut cursor, &mut scratch, num_channels, volume, &watch);
            },
            err_fn,
            None,
        )?;

        Ok(stream)
    }

    /// Fill one device buffer from the clip
    fn process_frame<SampleType>(
        output: &mut [SampleType],
        cursor: &mut ClipCursor,
        scratch: &mut Vec<f32>,
        num_channels: usize,
        volume: f32,
        watch: &PlaybackWatch,
    ) where
        SampleType: Sample + FromSample<f32>,
    {
        scratch.resize(output.len(), 0.0);
        let done = cursor.fill(scratch, num_channels, volume);

        for (out, value) in output.iter_mut().zip(scratch.iter()) {
            *out = SampleType::from_sample(*value);
        }

        if done {
            watch.finish();
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundBackend for CpalBackend {
    fn play(&mut self, path: &Path, params: PlaySoundParams, on_complete: CompletionNotifier) {
        let path = path.to_path_buf();
        let shutdown = self.shutdown.clone();

        let spawned = thread::Builder::new()
            .name("playsounds-worker".into())
            .spawn(move || Self::run_playback(path, params, on_complete, shutdown));

        // A failed spawn drops the notifier with the closure, which completes it
        if let Err(e) = spawned {
            log::error!("Failed to spawn playback worker: {e}");
        }
    }
}

impl Drop for CpalBackend {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
    }
}
