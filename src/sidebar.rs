use raylib::prelude::*;

use crate::constants::*;
use crate::controls::{Control, Controls, Level};
use crate::notices::Notices;
use crate::player::PlayerEvent;
use crate::slide::with_alpha;

const PADDING: f32 = 20.0;
const BUTTON_HEIGHT: f32 = 36.0;
const SLIDER_TOP: f32 = 170.0;
const SLIDER_BLOCK: f32 = 56.0;
const TRACK_HEIGHT: f32 = 10.0;
const TRACK_GRAB_MARGIN: f32 = 8.0; // extra pixels above/below the track that still grab it

pub fn contains(rect: Rectangle, point: Vector2) -> bool {
    point.x >= rect.x && point.x <= rect.x + rect.width && point.y >= rect.y && point.y <= rect.y + rect.height
}

fn inflate(rect: Rectangle, dy: f32) -> Rectangle {
    Rectangle::new(rect.x, rect.y - dy, rect.width, rect.height + 2.0 * dy)
}

/// Slider position under `mouse_x`, clamped to the track ends.
pub fn slider_level(track: Rectangle, mouse_x: f32) -> Level {
    if track.width <= 0.0 {
        return Level::new(0);
    }
    let t = ((mouse_x - track.x) / track.width).clamp(0.0, 1.0);
    Level::new((t * Level::MAX as f32).round() as u8)
}

pub fn play_button() -> Rectangle {
    Rectangle::new(PADDING, 60.0, SIDEBAR_WIDTH as f32 - 2.0 * PADDING, BUTTON_HEIGHT)
}

pub fn audio_button() -> Rectangle {
    Rectangle::new(PADDING, 60.0 + BUTTON_HEIGHT + 10.0, SIDEBAR_WIDTH as f32 - 2.0 * PADDING, BUTTON_HEIGHT)
}

pub fn slider_track(control: Control) -> Rectangle {
    let slot = Control::ALL.iter().position(|&c| c == control).unwrap_or(0) as f32;
    Rectangle::new(
        PADDING,
        SLIDER_TOP + slot * SLIDER_BLOCK + 26.0,
        SIDEBAR_WIDTH as f32 - 2.0 * PADDING,
        TRACK_HEIGHT,
    )
}

/// Mouse state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    pub position: Vector2,
    pub pressed: bool,
    pub down: bool,
}

/// What the sidebar needs to know to draw itself.
pub struct SidebarView<'a> {
    pub controls: &'a Controls,
    pub image_count: usize,
    pub current_index: usize,
    pub current_name: Option<&'a str>,
    pub playing: bool,
    pub loading: Option<(usize, usize)>,
    pub next_in: Option<f32>,
    pub audio_loaded: bool,
    pub audio_title: Option<String>,
    pub audio_playing: bool,
    pub notices: &'a Notices,
}

/// Immediate-mode control panel. The only state kept between frames is
/// which slider, if any, the mouse is dragging.
#[derive(Debug, Default)]
pub struct Sidebar {
    dragging: Option<Control>,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<Control> {
        self.dragging
    }

    pub fn handle_pointer(&mut self, pointer: Pointer, controls: &Controls, can_play: bool) -> Vec<PlayerEvent> {
        let mut events = Vec::new();

        if !pointer.down {
            self.dragging = None;
        }

        if pointer.pressed {
            if contains(play_button(), pointer.position) {
                if can_play {
                    events.push(PlayerEvent::TogglePlay);
                }
            } else if contains(audio_button(), pointer.position) {
                events.push(PlayerEvent::ToggleAudio);
            } else {
                self.dragging = Control::ALL
                    .into_iter()
                    .find(|&c| contains(inflate(slider_track(c), TRACK_GRAB_MARGIN), pointer.position));
            }
        }

        if let Some(control) = self.dragging {
            let level = slider_level(slider_track(control), pointer.position.x);
            if level != controls.get(control) {
                events.push(PlayerEvent::SetControl(control, level));
            }
        }

        events
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, view: &SidebarView, mouse: Vector2) {
        let height = d.get_screen_height();
        d.draw_rectangle(0, 0, SIDEBAR_WIDTH, height, SIDEBAR_BACKGROUND);
        d.draw_text("Slideshow", PADDING as i32, 20, 24, TEXT);

        // --- Buttons ---
        let can_play = view.image_count > 0;
        let play_label = if view.playing { "Pause" } else { "Play" };
        draw_button(d, play_button(), play_label, can_play, can_play && contains(play_button(), mouse));

        let audio_label = match (view.audio_loaded, view.audio_playing) {
            (false, _) => "Audio: drop a file",
            (true, true) => "Pause audio",
            (true, false) => "Play audio",
        };
        draw_button(d, audio_button(), audio_label, view.audio_loaded, contains(audio_button(), mouse));

        // --- Sliders ---
        for control in Control::ALL {
            let track = slider_track(control);
            let level = view.controls.get(control);
            let active = self.dragging() == Some(control);

            d.draw_text(control.label(), track.x as i32, track.y as i32 - 22, 18, TEXT);
            let value = level.get().to_string();
            d.draw_text(&value, (track.x + track.width) as i32 - 30, track.y as i32 - 22, 18, TEXT_DIM);

            d.draw_rectangle_rec(track, Color::new(40, 44, 58, 255));
            let filled = Rectangle::new(track.x, track.y, track.width * level.get() as f32 / Level::MAX as f32, track.height);
            d.draw_rectangle_rec(filled, ACCENT);
            let knob = Vector2::new(filled.x + filled.width, track.y + track.height * 0.5);
            d.draw_circle_v(knob, if active { 9.0 } else { 7.0 }, TEXT);
        }

        // --- Status ---
        let mut y = (SLIDER_TOP + 4.0 * SLIDER_BLOCK + 10.0) as i32;
        let x = PADDING as i32;
        let images = match view.image_count {
            0 => "No images loaded".to_string(),
            1 => "1 image".to_string(),
            n => format!("{} images", n),
        };
        d.draw_text(&images, x, y, 18, TEXT);
        y += 24;

        if let Some(name) = view.current_name {
            d.draw_text(&format!("#{} {}", view.current_index + 1, clip(name, 24)), x, y, 16, TEXT_DIM);
            y += 22;
        }

        if let Some(seconds) = view.next_in {
            d.draw_text(&format!("Next in {:.1}s", seconds), x, y, 16, TEXT_DIM);
            y += 22;
        }

        if let Some((done, total)) = view.loading {
            d.draw_text(&format!("Loading {}/{}", done, total), x, y, 16, ACCENT);
            y += 22;
        }

        if let Some(title) = &view.audio_title {
            d.draw_text(&format!("Audio: {}", clip(title, 22)), x, y, 16, TEXT_DIM);
            y += 22;
        }

        if !view.notices.is_empty() {
            y += 8;
            for notice in view.notices.iter() {
                d.draw_text(&clip(&notice.text, 30), x, y, 14, with_alpha(WARNING_TEXT, notice.opacity()));
                y += 18;
            }
        }

        d.draw_text("Space: play/pause   M: audio", x, height - 30, 14, TEXT_DIM);
    }
}

fn draw_button(d: &mut RaylibDrawHandle, rect: Rectangle, label: &str, enabled: bool, hovered: bool) {
    let (fill, text) = match (enabled, hovered) {
        (false, _) => (Color::new(30, 32, 40, 255), TEXT_DIM),
        (true, true) => (Color::new(70, 90, 140, 255), TEXT),
        (true, false) => (Color::new(50, 60, 90, 255), TEXT),
    };
    d.draw_rectangle_rec(rect, fill);
    d.draw_rectangle_lines_ex(rect, 1.0, with_alpha(ACCENT, if enabled { 0.8 } else { 0.2 }));
    d.draw_text(label, rect.x as i32 + 12, rect.y as i32 + 9, 18, text);
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(rect: Rectangle) -> Vector2 {
        Vector2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
    }

    fn press(position: Vector2) -> Pointer {
        Pointer { position, pressed: true, down: true }
    }

    #[test]
    fn slider_level_maps_track_to_0_100() {
        let track = Rectangle::new(20.0, 0.0, 200.0, 10.0);
        assert_eq!(slider_level(track, 20.0).get(), 0);
        assert_eq!(slider_level(track, 120.0).get(), 50);
        assert_eq!(slider_level(track, 220.0).get(), 100);
        assert_eq!(slider_level(track, -50.0).get(), 0);
        assert_eq!(slider_level(track, 900.0).get(), 100);
    }

    #[test]
    fn play_button_is_inert_without_images() {
        let mut sidebar = Sidebar::new();
        let events = sidebar.handle_pointer(press(center(play_button())), &Controls::default(), false);
        assert!(events.is_empty());
        let events = sidebar.handle_pointer(press(center(play_button())), &Controls::default(), true);
        assert_eq!(events, vec![PlayerEvent::TogglePlay]);
    }

    #[test]
    fn audio_button_toggles_audio() {
        let mut sidebar = Sidebar::new();
        let events = sidebar.handle_pointer(press(center(audio_button())), &Controls::default(), false);
        assert_eq!(events, vec![PlayerEvent::ToggleAudio]);
    }

    #[test]
    fn dragging_a_slider_sets_its_control() {
        let mut sidebar = Sidebar::new();
        let controls = Controls::default();
        let track = slider_track(Control::Shade);

        let start = Vector2::new(track.x, track.y + 2.0);
        let events = sidebar.handle_pointer(press(start), &controls, true);
        assert_eq!(events, vec![PlayerEvent::SetControl(Control::Shade, Level::new(0))]);
        assert_eq!(sidebar.dragging(), Some(Control::Shade));

        // Moving far below the track keeps dragging the same slider
        let held = Pointer {
            position: Vector2::new(track.x + track.width, track.y + 300.0),
            pressed: false,
            down: true,
        };
        let events = sidebar.handle_pointer(held, &controls, true);
        assert_eq!(events, vec![PlayerEvent::SetControl(Control::Shade, Level::new(100))]);

        let released = Pointer { down: false, ..held };
        assert!(sidebar.handle_pointer(released, &controls, true).is_empty());
        assert_eq!(sidebar.dragging(), None);
    }

    #[test]
    fn unchanged_level_emits_nothing() {
        let mut sidebar = Sidebar::new();
        let controls = Controls::default();
        let track = slider_track(Control::Speed);
        let at_current = Vector2::new(track.x + track.width * 0.5, track.y + 1.0);
        assert!(sidebar.handle_pointer(press(at_current), &controls, true).is_empty());
        assert_eq!(sidebar.dragging(), Some(Control::Speed));
    }

    #[test]
    fn slider_tracks_do_not_overlap() {
        let tracks: Vec<Rectangle> = Control::ALL.into_iter().map(slider_track).collect();
        for pair in tracks.windows(2) {
            assert!(pair[0].y + pair[0].height + 2.0 * TRACK_GRAB_MARGIN < pair[1].y);
        }
        assert!(audio_button().y + audio_button().height < tracks[0].y - TRACK_GRAB_MARGIN);
    }

    #[test]
    fn clip_long_names() {
        assert_eq!(clip("short.png", 24), "short.png");
        assert_eq!(clip("a-really-long-file-name.jpeg", 10), "a-reall...");
    }
}
