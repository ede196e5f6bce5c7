use std::path::PathBuf;

use clap::Parser;

use crate::constants::*;
use crate::controls::{Controls, Level};

#[derive(Parser, Debug, Clone)]
#[command(name = "slideshow-player", version, about = "Random photo slideshow with fades, shade overlay and a soundtrack")]
pub struct Config {
    /// Image files or directories of images. More can be dropped onto the window.
    pub paths: Vec<PathBuf>,

    /// Soundtrack played in a loop. Can also be dropped onto the window.
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// Transition speed, 0 (slow fade) to 100 (fast fade)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub speed: u8,

    /// Time between images, 0 (short) to 100 (long)
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub delay: u8,

    /// Darkness of the overlay, 0 (none) to 100
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub shade: u8,

    /// Soundtrack volume, 0 to 100
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: u8,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,

    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Don't start playing when the initial images finish loading
    #[arg(long, default_value_t = false)]
    pub paused: bool,
}

impl Config {
    pub fn controls(&self) -> Controls {
        Controls {
            speed: Level::new(self.speed),
            delay: Level::new(self.delay),
            shade: Level::new(self.shade),
            volume: Level::new(self.volume),
        }
    }
}
