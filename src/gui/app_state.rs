use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use wavgraph::{InteractionController, SampleStore, Scene, SceneOptions, Settings, build_scene};

use super::audio_player::AudioPlayer;

pub struct AppState {
    pub store: Option<Arc<SampleStore>>,
    pub controller: InteractionController,
    pub player: AudioPlayer,
    pub settings: Settings,
    /// "Graph Signal" toggle
    pub graph_enabled: bool,
    pub current_filename: String,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            store: None,
            controller: InteractionController::new(&settings),
            player: AudioPlayer::new(),
            settings,
            graph_enabled: true,
            current_filename: String::new(),
        }
    }

    /// Decode `path` and make it the current file. On error the previous
    /// file stays loaded.
    pub fn load_file(&mut self, path: &Path) -> Result<Arc<SampleStore>> {
        let store = SampleStore::from_wav_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let store = Arc::new(store);

        // the graph is still useful without a sound card
        if let Err(e) = self.player.load(&store) {
            log::warn!("playback unavailable: {:#}", e);
        }

        self.current_filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.store = Some(store.clone());
        self.controller.load(store.sample_count());

        log::info!(
            "loaded {}: {} samples, {} Hz, {} channel(s)",
            self.current_filename,
            store.sample_count(),
            store.sample_rate,
            store.channels
        );
        Ok(store)
    }

    pub fn close_file(&mut self) {
        self.player.unload();
        self.store = None;
        self.current_filename.clear();
        self.controller.unload();
    }

    pub fn duration_seconds(&self) -> f64 {
        self.store.as_ref().map_or(0.0, |s| s.duration_seconds())
    }

    pub fn scene(&self) -> Scene {
        let options = SceneOptions::from_settings(&self.settings.render, self.graph_enabled);
        build_scene(self.store.as_deref(), &self.controller, &options)
    }
}

// ─── Format time as M:SS.ms ───────────────────────────────────────────────────

pub fn format_time(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = seconds % 60.0;
    format!("{}:{:05.2}", mins, secs)
}
