use clap::Parser;
use log::{info, warn};
use raylib::prelude::*;

mod advance;
mod batch;
mod canvas;
mod config;
mod constants;
mod controls;
mod error;
mod notices;
mod player;
mod schedule;
mod sidebar;
mod slide;
mod soundtrack;
mod state;
mod texture_loader;
mod transition;

use crate::config::Config;
use crate::constants::*;
use crate::player::{Player, PlayerEvent};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let (mut rl, thread) = raylib::init()
        .size(config.width, config.height)
        .title("Slideshow Player")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    rl.set_window_min_size(SIDEBAR_WIDTH + 200, 480);

    // Runs silently if there's no audio output
    let audio = match RaylibAudio::init_audio_device() {
        Ok(audio) => Some(audio),
        Err(e) => {
            warn!("Could not open audio device: {:?}", e);
            None
        }
    };

    let mut player = Player::new(&mut rl, &thread, &config, audio.as_ref())?;

    if !config.paths.is_empty() {
        player.open_images(config.paths.clone(), !config.paused);
    }
    if let Some(path) = &config.audio {
        player.handle(PlayerEvent::AudioSelected(path.clone()));
    }

    // --- Main Loop ---
    while !rl.window_should_close() {
        player.update(&mut rl, &thread);
        player.draw(&mut rl, &thread);
    }

    info!("Window closed");
    Ok(())
}
