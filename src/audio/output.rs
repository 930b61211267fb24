use tracing::trace;

use crate::audio::{AudioError, Sample};

/// Something that can make a cached sample audible.
pub trait SoundOutput {
    fn play(&mut self, sample: &Sample) -> Result<(), AudioError>;
}

/// Used when sound is disabled or no device could be opened.
pub struct NullOutput;

impl SoundOutput for NullOutput {
    fn play(&mut self, sample: &Sample) -> Result<(), AudioError> {
        trace!(secs = sample.duration_secs(), "sound output disabled, dropping sample");
        Ok(())
    }
}

/// Longest sample the output will render; letter sounds are well under this.
#[cfg(any(feature = "sound", test))]
pub(crate) const MAX_RENDER_SECS: u32 = 30;

/// Converts a sample to the device's rate and channel count with linear
/// interpolation. Extra device channels reuse the last source channel.
#[cfg(any(feature = "sound", test))]
pub(crate) fn render_for_device(
    sample: &Sample,
    rate: u32,
    channels: u16,
) -> Result<Vec<f32>, AudioError> {
    let src_channels = sample.channels.max(1) as usize;
    let src_frames = sample.frames.len() / src_channels;
    if src_frames == 0 || rate == 0 || channels == 0 {
        return Ok(Vec::new());
    }
    if sample.sample_rate == 0 {
        return Err(AudioError::Device("sample has no sample rate".to_string()));
    }

    let ratio = sample.sample_rate as f64 / rate as f64;
    let out_frames = ((src_frames as f64) / ratio).floor();
    let max_frames = rate as f64 * MAX_RENDER_SECS as f64;
    if out_frames > max_frames {
        return Err(AudioError::Device(format!(
            "sample longer than {MAX_RENDER_SECS}s at {rate} Hz"
        )));
    }
    let out_frames = out_frames as usize;
    let mut out = Vec::with_capacity(out_frames * channels as usize);

    for frame in 0..out_frames {
        let pos = frame as f64 * ratio;
        let idx = pos.floor() as usize;
        let next = (idx + 1).min(src_frames - 1);
        let frac = (pos - idx as f64) as f32;
        for ch in 0..channels as usize {
            let src_ch = ch.min(src_channels - 1);
            let a = sample.frames[idx * src_channels + src_ch];
            let b = sample.frames[next * src_channels + src_ch];
            out.push(a + (b - a) * frac);
        }
    }
    Ok(out)
}

#[cfg(feature = "sound")]
mod device {
    use std::sync::{Arc, Mutex};

    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
    use tracing::{debug, error};

    use super::{SoundOutput, render_for_device};
    use crate::audio::{AudioError, Sample};

    #[derive(Default)]
    struct Playback {
        buffer: Vec<f32>,
        position: usize,
    }

    /// Plays one sample at a time on the default output device; a new sample
    /// replaces whatever is still playing.
    pub struct CpalOutput {
        _stream: Stream,
        playback: Arc<Mutex<Playback>>,
        rate: u32,
        channels: u16,
    }

    impl CpalOutput {
        pub fn open() -> Result<Self, AudioError> {
            let host = cpal::default_host();
            let device = host
                .default_output_device()
                .ok_or_else(|| AudioError::Device("no default output device".to_string()))?;
            let supported = device
                .default_output_config()
                .map_err(|e| AudioError::Device(format!("failed to get output config: {e}")))?;

            let format = supported.sample_format();
            let config: StreamConfig = supported.config();
            debug!(
                rate = config.sample_rate.0,
                channels = config.channels,
                format = ?format,
                "opening output stream"
            );

            let playback = Arc::new(Mutex::new(Playback::default()));
            let stream = match format {
                SampleFormat::F32 => build_stream::<f32>(&device, &config, playback.clone()),
                SampleFormat::I16 => build_stream::<i16>(&device, &config, playback.clone()),
                SampleFormat::U16 => build_stream::<u16>(&device, &config, playback.clone()),
                other => {
                    return Err(AudioError::Device(format!(
                        "unsupported output sample format {other:?}"
                    )));
                }
            }?;
            stream
                .play()
                .map_err(|e| AudioError::Device(format!("failed to start stream: {e}")))?;

            Ok(Self {
                _stream: stream,
                playback,
                rate: config.sample_rate.0,
                channels: config.channels,
            })
        }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        playback: Arc<Mutex<Playback>>,
    ) -> Result<Stream, AudioError>
    where
        T: SizedSample + FromSample<f32>,
    {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut playback) = playback.lock() else {
                        return;
                    };
                    for out in data.iter_mut() {
                        let value = playback.buffer.get(playback.position).copied().unwrap_or(0.0);
                        if playback.position < playback.buffer.len() {
                            playback.position += 1;
                        }
                        *out = T::from_sample_(value);
                    }
                },
                |err| error!(error = %err, "output stream error"),
                None,
            )
            .map_err(|e| AudioError::Device(format!("failed to build output stream: {e}")))
    }

    impl SoundOutput for CpalOutput {
        fn play(&mut self, sample: &Sample) -> Result<(), AudioError> {
            let rendered = render_for_device(sample, self.rate, self.channels)?;
            let mut playback = self
                .playback
                .lock()
                .map_err(|_| AudioError::Device("playback state poisoned".to_string()))?;
            playback.buffer = rendered;
            playback.position = 0;
            Ok(())
        }
    }
}

#[cfg(feature = "sound")]
pub use device::CpalOutput;

/// Opens the best available output: the default device when built with the
/// `sound` feature, otherwise (or on failure) [`NullOutput`].
pub fn open_default(enabled: bool) -> Box<dyn SoundOutput> {
    if !enabled {
        return Box::new(NullOutput);
    }

    #[cfg(feature = "sound")]
    {
        match CpalOutput::open() {
            Ok(output) => return Box::new(output),
            Err(err) => tracing::warn!(error = %err, "no audio output, continuing silently"),
        }
    }

    #[cfg(not(feature = "sound"))]
    tracing::info!("built without the `sound` feature, letter sounds are muted");

    Box::new(NullOutput)
}
