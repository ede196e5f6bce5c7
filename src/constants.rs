use raylib::prelude::Color;

pub const WINDOW_WIDTH: i32 = 1280;             // Default window width
pub const WINDOW_HEIGHT: i32 = 720;             // Default window height
pub const FPS: u32 = 60;                        // Default target frames per second
pub const SIDEBAR_WIDTH: i32 = 280;             // Width of the control sidebar (pixels)

pub const SLOWEST_TRANSITION_MS: f32 = 4000.0;  // Fade duration at speed 0
pub const FASTEST_TRANSITION_MS: f32 = 600.0;   // Fade duration at speed 100
pub const SHORTEST_DELAY_MS: f32 = 500.0;       // Time between images at delay 0
pub const LONGEST_DELAY_MS: f32 = 6000.0;       // Time between images at delay 100
pub const MAX_SHADE_ALPHA: f32 = 0.65;          // Shade overlay opacity at shade 100

pub const JITTER_MIN: f32 = 0.85;               // Random scale jitter range
pub const JITTER_MAX: f32 = 1.15;
pub const MAX_ROTATION_DEG: f32 = 5.0;          // Random rotation range is +/- this

pub const NOTICE_LIFETIME: f32 = 8.0;           // Seconds a failure notice stays visible
pub const MAX_NOTICES: usize = 5;

pub const BACKGROUND: Color = Color::new(5, 6, 10, 255);        // #05060a
pub const SIDEBAR_BACKGROUND: Color = Color::new(18, 20, 28, 255);
pub const ACCENT: Color = Color::new(120, 160, 255, 255);
pub const TEXT: Color = Color::new(220, 224, 235, 255);
pub const TEXT_DIM: Color = Color::new(120, 126, 140, 255);
pub const WARNING_TEXT: Color = Color::new(255, 150, 110, 255);

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3", "flac", "qoa", "xm", "mod"];
