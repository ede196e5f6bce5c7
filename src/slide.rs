use raylib::prelude::*;

use crate::transition::{Placement, Transition};

/// One loaded image. The texture is released when the slide is dropped.
pub struct Slide {
    image: Texture2D,
    name: String,
}

/// Converts an opacity in [0, 1] to a color channel.
pub fn alpha_byte(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha_byte(alpha))
}

impl Slide {
    pub fn new(image: Texture2D, name: String) -> Self {
        Self { image, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Draws the image centered on a `canvas_width` x `canvas_height` surface,
    /// faded, scaled and rotated as the transition says.
    pub fn draw<D: RaylibDraw>(&self, d: &mut D, canvas_width: f32, canvas_height: f32, transition: &Transition) {
        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;
        let placement = Placement::centered(canvas_width, canvas_height, tex_width, tex_height, transition);

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height), // Source rect uses original texture size
            placement.dest,
            placement.origin,
            placement.rotation,
            with_alpha(Color::WHITE, transition.alpha()),
        );
    }
}
