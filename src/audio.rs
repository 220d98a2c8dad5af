//! Audio buffers and WAV I/O

use crate::error::AudioError;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Mono 16-bit PCM audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append buffers end to end, without gaps or crossfades.
    ///
    /// Every buffer must share the first buffer's sample rate; nothing is
    /// resampled.
    pub fn concat(buffers: &[AudioBuffer]) -> Result<AudioBuffer, AudioError> {
        let first = buffers.first().ok_or(AudioError::NoAudio)?;
        let sample_rate = first.sample_rate;

        if let Some(odd) = buffers.iter().find(|b| b.sample_rate != sample_rate) {
            return Err(AudioError::SampleRateMismatch {
                expected: sample_rate,
                found: odd.sample_rate,
            });
        }

        let total = buffers.iter().map(AudioBuffer::len).sum();
        let mut samples = Vec::with_capacity(total);
        for buffer in buffers {
            samples.extend_from_slice(&buffer.samples);
        }

        Ok(AudioBuffer::new(samples, sample_rate))
    }

    /// Save as a mono 16-bit PCM WAV file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AudioError> {
        save_wav(path, &self.samples, self.sample_rate)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AudioError> {
        load_wav(path)
    }
}

/// Load a WAV file of any integer or float format into a mono 16-bit buffer
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, AudioError> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    // Downmix by averaging channels
    let mono: Vec<i16> = samples
        .chunks(channels)
        .map(|frame| to_i16(frame.iter().sum::<f32>() / frame.len() as f32))
        .collect();

    Ok(AudioBuffer::new(mono, spec.sample_rate))
}

pub fn save_wav<P: AsRef<Path>>(
    path: P,
    samples: &[i16],
    sample_rate: u32,
) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Map a normalized sample back onto the 16-bit range; full scale clips to `i16::MAX`.
fn to_i16(sample: f32) -> i16 {
    (sample * 32768.0)
        .round()
        .clamp(i16::MIN as f32, i16::MAX as f32) as i16
}
