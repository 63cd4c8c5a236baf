//! Audio system for background music and the line clear cue
//!
//! Purely a consumer of [`GameEvent`]s; the game never calls into it.

use crate::game::GameEvent;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const MUSIC_FILE: &str = "background-music.mp3";
const CLEAR_FILE: &str = "glass-clear.mp3";

/// Audio manager handles all sound playback
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    music_sink: Option<Sink>,
    assets_path: PathBuf,
    music_volume: f32,
    sfx_volume: f32,
}

impl AudioManager {
    /// Create a new audio manager; `None` without an output device or assets
    pub fn new() -> Option<Self> {
        let (stream, stream_handle) = OutputStream::try_default().ok()?;
        let assets_path = Self::find_assets_path()?;

        Some(Self {
            _stream: stream,
            stream_handle,
            music_sink: None,
            assets_path,
            music_volume: 0.4,
            sfx_volume: 1.0,
        })
    }

    fn find_assets_path() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("assets"),
            std::env::current_exe().ok()?.parent()?.join("assets"),
        ];

        paths
            .iter()
            .find(|p| p.join("music").exists() && p.join("sfx").exists())
            .cloned()
    }

    /// Set music volume (0.0 to 1.0)
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.music_sink {
            sink.set_volume(self.music_volume);
        }
    }

    /// Set SFX volume (0.0 to 1.0)
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// React to one game event
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameStarted => self.play_music(),
            GameEvent::LinesCleared(_) => self.play_clear(),
            GameEvent::PausedChanged(true) => self.pause_music(),
            GameEvent::PausedChanged(false) => self.resume_music(),
            GameEvent::GameOver => self.stop_music(),
        }
    }

    fn open(path: &Path) -> Option<Decoder<BufReader<File>>> {
        let file = File::open(path)
            .map_err(|e| tracing::warn!("Cannot open {}: {}", path.display(), e))
            .ok()?;
        Decoder::new(BufReader::new(file))
            .map_err(|e| tracing::warn!("Cannot decode {}: {}", path.display(), e))
            .ok()
    }

    /// Play background music from the beginning, looping indefinitely
    pub fn play_music(&mut self) {
        self.stop_music();

        let Some(decoder) = Self::open(&self.assets_path.join("music").join(MUSIC_FILE)) else {
            return;
        };
        let Ok(sink) = Sink::try_new(&self.stream_handle) else {
            return;
        };

        sink.set_volume(self.music_volume);
        sink.append(decoder.repeat_infinite());
        self.music_sink = Some(sink);
    }

    /// Stop background music
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music_sink.take() {
            sink.stop();
        }
    }

    /// Pause background music
    pub fn pause_music(&mut self) {
        if let Some(sink) = &self.music_sink {
            sink.pause();
        }
    }

    /// Resume background music
    pub fn resume_music(&mut self) {
        if let Some(sink) = &self.music_sink {
            sink.play();
        }
    }

    /// Play the line clear cue once
    pub fn play_clear(&mut self) {
        if self.sfx_volume <= 0.0 {
            return;
        }

        let Some(decoder) = Self::open(&self.assets_path.join("sfx").join(CLEAR_FILE)) else {
            return;
        };
        if let Ok(sink) = Sink::try_new(&self.stream_handle) {
            sink.set_volume(self.sfx_volume);
            sink.append(decoder);
            sink.detach(); // Let it play and clean up automatically
        }
    }
}
