use rand::Rng;
use raylib::prelude::*;

use crate::constants::*;
use crate::controls::{speed_to_duration_ms, Level};

/// Fade-in of one image. Jitter and rotation are drawn once when the
/// transition starts and stay fixed until the next one replaces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    duration: f32, // seconds
    elapsed: f32,
    jitter: f32,
    rotation: f32, // degrees
}

impl Transition {
    pub fn start<R: Rng + ?Sized>(rng: &mut R, speed: Level) -> Self {
        let jitter = rng.random_range(JITTER_MIN..=JITTER_MAX);
        let rotation = rng.random_range(-MAX_ROTATION_DEG..=MAX_ROTATION_DEG);
        Self::with_params(speed_to_duration_ms(speed) / 1000.0, jitter, rotation)
    }

    pub fn with_params(duration: f32, jitter: f32, rotation: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            jitter,
            rotation,
        }
    }

    /// Advances the clock. Once finished the transition is frozen.
    pub fn advance(&mut self, dt: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed += dt.max(0.0);
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn alpha(&self) -> f32 {
        self.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    #[cfg(test)]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

/// Largest scale at which the whole image fits on the canvas.
pub fn fit_scale(canvas_width: f32, canvas_height: f32, image_width: f32, image_height: f32) -> f32 {
    if image_width <= 0.0 || image_height <= 0.0 {
        return 0.0;
    }
    (canvas_width / image_width).min(canvas_height / image_height)
}

/// Where one frame of a transition lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub dest: Rectangle,
    pub origin: Vector2,
    pub rotation: f32,
}

impl Placement {
    /// Centered on the canvas, rotated around the image center.
    pub fn centered(canvas_width: f32, canvas_height: f32, image_width: f32, image_height: f32, transition: &Transition) -> Self {
        let scale = fit_scale(canvas_width, canvas_height, image_width, image_height) * transition.jitter();
        let scaled_width = image_width * scale;
        let scaled_height = image_height * scale;

        // Relative to the dest rectangle (ie. the center of the image)
        let origin = Vector2::new(scaled_width * 0.5, scaled_height * 0.5);

        Self {
            dest: Rectangle::new(canvas_width * 0.5, canvas_height * 0.5, scaled_width, scaled_height),
            origin,
            rotation: transition.rotation(),
        }
    }
}
