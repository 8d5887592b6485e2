use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use miniaudio::{Device, DeviceConfig, DeviceType, Format};

use wavgraph::SampleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Mono playback of the loaded buffer. The device callback only reads the
/// shared sample slice and the cursor below.
pub struct AudioPlayer {
    device: Option<Device>,
    device_rate: u32,
    shared: Arc<Mutex<Cursor>>,
}

struct Cursor {
    samples: Arc<[f32]>,
    sample_rate: u32,
    position: usize,
    state: PlaybackState,
}

/// The audio thread must keep running even if a UI-side holder panicked.
fn lock(shared: &Mutex<Cursor>) -> MutexGuard<'_, Cursor> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            device: None,
            device_rate: 0,
            shared: Arc::new(Mutex::new(Cursor {
                samples: Arc::from(Vec::new()),
                sample_rate: 44100,
                position: 0,
                state: PlaybackState::Stopped,
            })),
        }
    }

    /// Hand the store's samples to the device, opening it (again) when the
    /// sample rate changed.
    pub fn load(&mut self, store: &SampleStore) -> Result<()> {
        self.stop();
        {
            let mut cursor = lock(&self.shared);
            cursor.samples = store.shared_samples();
            cursor.sample_rate = store.sample_rate;
            cursor.position = 0;
        }

        if self.device.is_none() || self.device_rate != store.sample_rate {
            self.device = None;
            self.open_device(store.sample_rate)?;
        }
        Ok(())
    }

    pub fn unload(&mut self) {
        self.stop();
        lock(&self.shared).samples = Arc::from(Vec::new());
    }

    fn open_device(&mut self, sample_rate: u32) -> Result<()> {
        let shared = Arc::clone(&self.shared);

        let mut config = DeviceConfig::new(DeviceType::Playback);
        config.playback_mut().set_format(Format::F32);
        config.playback_mut().set_channels(1);
        config.set_sample_rate(sample_rate);

        config.set_data_callback(move |_device, output, _input| {
            let mut cursor = lock(&shared);
            let frames = output.as_samples_mut::<f32>();

            if cursor.state != PlaybackState::Playing {
                frames.fill(0.0);
                return;
            }

            for sample in frames {
                match cursor.samples.get(cursor.position).copied() {
                    Some(value) => {
                        *sample = value;
                        cursor.position += 1;
                    }
                    None => {
                        // ran off the end: park at the start, ready to play again
                        cursor.position = 0;
                        cursor.state = PlaybackState::Paused;
                        *sample = 0.0;
                    }
                }
            }
        });

        let device = Device::new(None, &config)
            .map_err(|e| anyhow::anyhow!("Failed to create audio device: {:?}", e))?;
        device
            .start()
            .map_err(|e| anyhow::anyhow!("Failed to start audio device: {:?}", e))?;

        log::info!("audio device opened at {} Hz", sample_rate);
        self.device = Some(device);
        self.device_rate = sample_rate;
        Ok(())
    }

    pub fn play(&mut self) {
        let mut cursor = lock(&self.shared);
        if !cursor.samples.is_empty() {
            cursor.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        let mut cursor = lock(&self.shared);
        if cursor.state == PlaybackState::Playing {
            cursor.state = PlaybackState::Paused;
        }
    }

    /// Play when paused or stopped, pause when playing. Returns the new state.
    pub fn toggle(&mut self) -> PlaybackState {
        if self.state() == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
        self.state()
    }

    /// Stop and return to the start of the file.
    pub fn stop(&mut self) {
        let mut cursor = lock(&self.shared);
        cursor.state = PlaybackState::Stopped;
        cursor.position = 0;
    }

    pub fn state(&self) -> PlaybackState {
        lock(&self.shared).state
    }

    pub fn position_seconds(&self) -> f64 {
        let cursor = lock(&self.shared);
        cursor.position as f64 / cursor.sample_rate.max(1) as f64
    }

    pub fn has_audio(&self) -> bool {
        !lock(&self.shared).samples.is_empty()
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}
