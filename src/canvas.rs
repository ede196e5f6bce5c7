use log::{debug, error};
use raylib::prelude::*;

use crate::constants::*;
use crate::controls::{shade_alpha, Level};
use crate::slide::{with_alpha, Slide};
use crate::transition::Transition;

/// Area of the window left for the slideshow: everything right of the sidebar.
pub fn viewport_for(screen_width: i32, screen_height: i32) -> Rectangle {
    Rectangle::new(
        SIDEBAR_WIDTH as f32,
        0.0,
        (screen_width - SIDEBAR_WIDTH).max(1) as f32,
        screen_height.max(1) as f32,
    )
}

/// Offscreen drawing surface whose pixel size always matches the viewport.
pub struct Canvas {
    framebuffer: RenderTexture2D,
    viewport: Rectangle,
}

impl Canvas {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread, viewport: Rectangle) -> anyhow::Result<Self> {
        let framebuffer = rl
            .load_render_texture(thread, viewport.width as u32, viewport.height as u32)
            .map_err(|e| anyhow::anyhow!("failed to create render texture: {}", e))?;
        Ok(Self { framebuffer, viewport })
    }

    /// Reallocates the framebuffer when the viewport's pixel size changed.
    pub fn fit(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, viewport: Rectangle) {
        let resized = viewport.width != self.viewport.width || viewport.height != self.viewport.height;
        self.viewport = viewport;
        if !resized {
            return;
        }
        match rl.load_render_texture(thread, viewport.width as u32, viewport.height as u32) {
            Ok(framebuffer) => {
                debug!("Canvas resized to {}x{}", viewport.width, viewport.height);
                self.framebuffer = framebuffer;
            }
            Err(e) => error!("Failed to resize canvas to {}x{}: {}", viewport.width, viewport.height, e),
        }
    }

    /// Renders one frame: background, current image, then the shade overlay.
    pub fn paint(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        current: Option<(&Slide, &Transition)>,
        shade: Level,
    ) {
        let width = self.viewport.width;
        let height = self.viewport.height;

        let mut d = rl.begin_texture_mode(thread, &mut self.framebuffer);
        d.clear_background(BACKGROUND);

        let Some((slide, transition)) = current else {
            d.draw_text("Drop images here", width as i32 / 2 - 100, height as i32 / 2 - 12, 24, TEXT_DIM);
            return;
        };

        slide.draw(&mut d, width, height, transition);

        let alpha = shade_alpha(shade);
        if alpha > 0.0 {
            d.draw_rectangle(0, 0, width as i32, height as i32, with_alpha(Color::BLACK, alpha));
        }
    }

    /// Copies the framebuffer into the viewport. Render textures are stored
    /// upside down, hence the negative source height.
    pub fn present(&self, d: &mut RaylibDrawHandle) {
        d.draw_texture_pro(
            &self.framebuffer,
            Rectangle::new(0.0, 0.0, self.viewport.width, -self.viewport.height),
            self.viewport,
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_excludes_sidebar() {
        let v = viewport_for(1280, 720);
        assert_eq!(v.x, SIDEBAR_WIDTH as f32);
        assert_eq!(v.width, (1280 - SIDEBAR_WIDTH) as f32);
        assert_eq!(v.height, 720.0);
    }

    #[test]
    fn viewport_never_collapses() {
        let v = viewport_for(100, 0);
        assert_eq!(v.width, 1.0);
        assert_eq!(v.height, 1.0);
    }
}
