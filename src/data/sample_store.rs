use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use hound::{SampleFormat, WavReader};

use crate::error::AudioLoadError;

/// Decoded audio for one file. Only the first (left) channel is kept.
///
/// The sample buffer is shared, never mutated: loading another file builds a
/// new store instead of touching this one, so the playback thread can hold a
/// clone of [`SampleStore::shared_samples`] while the UI keeps the store.
#[derive(Debug, Clone)]
pub struct SampleStore {
    samples: Arc<[f32]>,
    pub sample_rate: u32,
    /// Channel count of the source file, before the left channel was picked.
    pub channels: u16,
}

impl SampleStore {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
            channels: 1,
        }
    }

    pub fn from_wav_file<P: AsRef<Path>>(path: P) -> Result<Self, AudioLoadError> {
        let reader = WavReader::open(&path).map_err(|source| AudioLoadError::Open {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::decode(reader)
    }

    pub fn from_wav_reader<R: Read>(reader: R) -> Result<Self, AudioLoadError> {
        let reader = WavReader::new(reader).map_err(|source| AudioLoadError::Open {
            path: "<stream>".into(),
            source,
        })?;
        Self::decode(reader)
    }

    fn decode<R: Read>(mut reader: WavReader<R>) -> Result<Self, AudioLoadError> {
        let spec = reader.spec();
        let channels = spec.channels;
        if channels == 0 {
            return Err(AudioLoadError::NoChannels);
        }
        let stride = channels as usize;

        // Interleaved frames: every `stride`-th sample starting at 0 is the left channel.
        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .step_by(stride)
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|source| AudioLoadError::Decode { format: "float", source })?,
            SampleFormat::Int => {
                let scale = match spec.bits_per_sample {
                    8 => 128.0,
                    16 => i16::MAX as f32,
                    24 => 8388608.0, // 2^23
                    32 => i32::MAX as f32,
                    bits => return Err(AudioLoadError::UnsupportedBitDepth(bits)),
                };
                reader
                    .samples::<i32>()
                    .step_by(stride)
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<Vec<f32>, _>>()
                    .map_err(|source| AudioLoadError::Decode { format: "integer", source })?
            }
        };

        log::debug!(
            "decoded {} frames, {} Hz, {} channel(s), {}-bit {:?}",
            samples.len(),
            spec.sample_rate,
            channels,
            spec.bits_per_sample,
            spec.sample_format
        );

        Ok(Self {
            samples: samples.into(),
            sample_rate: spec.sample_rate,
            channels,
        })
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// A cheap handle on the buffer for consumers on other threads.
    pub fn shared_samples(&self) -> Arc<[f32]> {
        Arc::clone(&self.samples)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.samples.get(index).copied()
    }

    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &[f32] {
        let start = start.min(self.samples.len());
        let end = end.clamp(start, self.samples.len());
        &self.samples[start..end]
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs()))
    }
}
