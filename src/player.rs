use std::path::PathBuf;

use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use raylib::prelude::*;

use crate::batch::{BatchLoader, CompletedBatch, Decoder};
use crate::canvas::{viewport_for, Canvas};
use crate::config::Config;
use crate::controls::{volume_fraction, Control, Level};
use crate::notices::Notices;
use crate::schedule::Scheduler;
use crate::sidebar::{Pointer, Sidebar, SidebarView};
use crate::slide::Slide;
use crate::soundtrack::Soundtrack;
use crate::state::PlayerState;
use crate::texture_loader::{
    collect_image_paths, decode_image, is_audio_path, is_image_path, upload_texture, DecodedImage,
};

/// Every way the outside world can change the player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    ImagesSelected(Vec<PathBuf>),
    AudioSelected(PathBuf),
    TogglePlay,
    ToggleAudio,
    SetControl(Control, Level),
}

/// Sorts dropped paths into events: audio files become soundtrack
/// selections (the last one wins), images and directories form one batch.
/// Anything else is returned as ignored.
pub fn classify_dropped(paths: Vec<PathBuf>) -> (Vec<PlayerEvent>, Vec<PathBuf>) {
    let mut images = Vec::new();
    let mut events = Vec::new();
    let mut ignored = Vec::new();
    for path in paths {
        if is_audio_path(&path) {
            events.push(PlayerEvent::AudioSelected(path));
        } else if path.is_dir() || is_image_path(&path) {
            images.push(path);
        } else {
            ignored.push(path);
        }
    }
    if !images.is_empty() {
        events.insert(0, PlayerEvent::ImagesSelected(images));
    }
    (events, ignored)
}

/// The view controller: owns all session state and is the only thing that
/// mutates it, through `handle`.
pub struct Player<'aud> {
    state: PlayerState<Slide>,
    scheduler: Scheduler,
    canvas: Canvas,
    soundtrack: Soundtrack<'aud>,
    loader: BatchLoader<DecodedImage>,
    notices: Notices,
    sidebar: Sidebar,
    rng: ThreadRng,
    // Batches that must not start playback when they land
    quiet_batches: Vec<u64>,
}

impl<'aud> Player<'aud> {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        config: &Config,
        audio: Option<&'aud RaylibAudio>,
    ) -> anyhow::Result<Self> {
        let controls = config.controls();
        let viewport = viewport_for(rl.get_screen_width(), rl.get_screen_height());
        Ok(Self {
            state: PlayerState::new(controls),
            scheduler: Scheduler::new(),
            canvas: Canvas::new(rl, thread, viewport)?,
            soundtrack: Soundtrack::new(audio, volume_fraction(controls.volume)),
            loader: BatchLoader::new(decode_image as Decoder<DecodedImage>),
            notices: Notices::new(),
            sidebar: Sidebar::new(),
            rng: rand::rng(),
            quiet_batches: Vec::new(),
        })
    }

    /// Queues images given on the command line. With `autoplay` off the
    /// batch lands without starting playback.
    pub fn open_images(&mut self, paths: Vec<PathBuf>, autoplay: bool) {
        let (paths, errors) = collect_image_paths(&paths);
        for e in errors {
            warn!("{}", e);
            self.notices.push(e.notice());
        }
        if let Some(id) = self.loader.submit(paths) {
            if !autoplay {
                self.quiet_batches.push(id);
            }
        }
    }

    pub fn handle(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::ImagesSelected(paths) => self.open_images(paths, true),
            PlayerEvent::AudioSelected(path) => {
                if let Err(e) = self.soundtrack.load(&path) {
                    warn!("{}", e);
                    self.notices.push(e.notice());
                }
            }
            PlayerEvent::TogglePlay => {
                if self.state.toggle_playing() {
                    info!("Playback {}", if self.state.is_playing() { "started" } else { "paused" });
                }
            }
            PlayerEvent::ToggleAudio => self.soundtrack.toggle(),
            PlayerEvent::SetControl(control, level) => {
                self.state.set_control(control, level);
                if control == Control::Volume {
                    self.soundtrack.set_volume(volume_fraction(level));
                }
            }
        }
    }

    fn collect_input(&mut self, rl: &mut RaylibHandle) -> Vec<PlayerEvent> {
        let mut events = Vec::new();

        if rl.is_file_dropped() {
            let dropped = rl.load_dropped_files();
            let paths: Vec<PathBuf> = dropped.paths().into_iter().map(PathBuf::from).collect();
            let (dropped_events, ignored) = classify_dropped(paths);
            for path in ignored {
                warn!("Ignoring unsupported file {}", path.display());
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                self.notices.push(format!("{}: unsupported file type", name));
            }
            events.extend(dropped_events);
        }

        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            events.push(PlayerEvent::TogglePlay);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_M) {
            events.push(PlayerEvent::ToggleAudio);
        }

        let pointer = Pointer {
            position: rl.get_mouse_position(),
            pressed: rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
            down: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
        };
        events.extend(self.sidebar.handle_pointer(pointer, self.state.controls(), !self.state.is_empty()));

        events
    }

    /// Turns a finished batch into slides and appends them in one step.
    fn land_batch(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, batch: CompletedBatch<DecodedImage>) {
        let mut failures = batch.failures;
        let mut slides = Vec::with_capacity(batch.entries.len());
        for decoded in batch.entries {
            match upload_texture(rl, thread, &decoded) {
                Ok(texture) => {
                    let name = decoded
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    slides.push(Slide::new(texture, name));
                }
                Err(e) => failures.push(e),
            }
        }

        for e in &failures {
            warn!("{}", e);
            self.notices.push(e.notice());
        }

        let autoplay = !self.quiet_batches.contains(&batch.id);
        self.quiet_batches.retain(|&id| id != batch.id);
        let added = self.state.append_batch(slides, autoplay);
        info!(
            "Batch {} loaded: {} added, {} failed, {} total",
            batch.id,
            added,
            failures.len(),
            self.state.len()
        );
    }

    /// One frame of bookkeeping, run before `draw`.
    pub fn update(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let dt = rl.get_frame_time();

        // The canvas must match the new window size before anything is drawn into it
        if rl.is_window_resized() {
            let viewport = viewport_for(rl.get_screen_width(), rl.get_screen_height());
            self.canvas.fit(rl, thread, viewport);
        }

        for event in self.collect_input(rl) {
            self.handle(event);
        }

        for batch in self.loader.poll() {
            self.land_batch(rl, thread, batch);
        }

        if let Some(next) = self.scheduler.step(dt, &mut self.state, &mut self.rng) {
            debug!("Advanced to image {}", next);
        }

        self.notices.update(dt);
        self.soundtrack.update();
    }

    pub fn draw(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let current = self.state.current().zip(self.scheduler.transition());
        self.canvas.paint(rl, thread, current, self.state.controls().shade);

        let mouse = rl.get_mouse_position();
        let mut d = rl.begin_drawing(thread);
        d.clear_background(crate::constants::BACKGROUND);
        self.canvas.present(&mut d);

        let view = SidebarView {
            controls: self.state.controls(),
            image_count: self.state.len(),
            current_index: self.state.current_index(),
            current_name: self.state.current().map(|s| s.name()),
            playing: self.state.is_playing(),
            loading: (!self.loader.is_idle()).then(|| self.loader.progress()),
            next_in: self.scheduler.timer().map(|t| t.remaining()),
            audio_loaded: self.soundtrack.is_loaded(),
            audio_title: self.soundtrack.title(),
            audio_playing: self.soundtrack.is_playing(),
            notices: &self.notices,
        };
        self.sidebar.draw(&mut d, &view, mouse);
    }
}
