use std::path::{Path, PathBuf};

use log::{info, warn};
use raylib::prelude::*;

use crate::error::LoadError;

/// The looping background track. Holds at most one stream; loading a new
/// file drops (and so unloads) the previous one.
pub struct Soundtrack<'aud> {
    device: Option<&'aud RaylibAudio>,
    music: Option<Music<'aud>>,
    path: Option<PathBuf>,
    volume: f32,
}

impl<'aud> Soundtrack<'aud> {
    /// `device` is `None` when no audio output could be opened; the player
    /// then runs silently.
    pub fn new(device: Option<&'aud RaylibAudio>, volume: f32) -> Self {
        if device.is_none() {
            warn!("No audio device, soundtrack disabled");
        }
        Self {
            device,
            music: None,
            path: None,
            volume,
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let audio_error = |reason: String| LoadError::Audio {
            path: path.to_path_buf(),
            reason,
        };

        let device = self.device.ok_or_else(|| audio_error("no audio device".into()))?;
        let file_name = path.to_str().ok_or_else(|| audio_error("path is not valid UTF-8".into()))?;

        // Release the old stream before opening the new one
        self.music = None;
        self.path = None;

        let mut music = device.new_music(file_name).map_err(|e| audio_error(e.to_string()))?;
        music.looping = true;
        music.set_volume(self.volume);
        music.play_stream();
        info!("Playing soundtrack {}", path.display());

        self.music = Some(music);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Pauses a playing track, otherwise resumes it. Nothing loaded, nothing to do.
    pub fn toggle(&mut self) {
        let Some(music) = self.music.as_ref() else {
            return;
        };
        if music.is_stream_playing() {
            music.pause_stream();
        } else {
            music.resume_stream();
            if !music.is_stream_playing() {
                music.play_stream();
            }
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(music) = self.music.as_ref() {
            music.set_volume(volume);
        }
    }

    /// Refills the stream buffers; must run every frame.
    pub fn update(&self) {
        if let Some(music) = self.music.as_ref() {
            music.update_stream();
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.music.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.music.as_ref().is_some_and(|m| m.is_stream_playing())
    }

    pub fn title(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }
}
