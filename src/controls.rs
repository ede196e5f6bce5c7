use crate::constants::*;

/// Slider position, always an integer in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(u8);

impl Level {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Self {
        Level(value.min(Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn fraction(self) -> f32 {
        self.0 as f32 / Self::MAX as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Speed,
    Delay,
    Shade,
    Volume,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::Speed, Control::Delay, Control::Shade, Control::Volume];

    pub fn label(self) -> &'static str {
        match self {
            Control::Speed => "Speed",
            Control::Delay => "Delay",
            Control::Shade => "Shade",
            Control::Volume => "Volume",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub speed: Level,
    pub delay: Level,
    pub shade: Level,
    pub volume: Level,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            speed: Level::new(50),
            delay: Level::new(40),
            shade: Level::new(30),
            volume: Level::new(70),
        }
    }
}

impl Controls {
    pub fn get(&self, control: Control) -> Level {
        match control {
            Control::Speed => self.speed,
            Control::Delay => self.delay,
            Control::Shade => self.shade,
            Control::Volume => self.volume,
        }
    }

    pub fn set(&mut self, control: Control, level: Level) {
        match control {
            Control::Speed => self.speed = level,
            Control::Delay => self.delay = level,
            Control::Shade => self.shade = level,
            Control::Volume => self.volume = level,
        }
    }
}

// --- Slider mappings ---

/// Speed 0 fades over 4000 ms, speed 100 over 600 ms.
pub fn speed_to_duration_ms(speed: Level) -> f32 {
    SLOWEST_TRANSITION_MS - speed.fraction() * (SLOWEST_TRANSITION_MS - FASTEST_TRANSITION_MS)
}

/// Delay 0 waits 500 ms between images, delay 100 waits 6000 ms.
pub fn delay_to_ms(delay: Level) -> f32 {
    SHORTEST_DELAY_MS + delay.fraction() * (LONGEST_DELAY_MS - SHORTEST_DELAY_MS)
}

pub fn shade_alpha(shade: Level) -> f32 {
    shade.fraction() * MAX_SHADE_ALPHA
}

pub fn volume_fraction(volume: Level) -> f32 {
    volume.fraction()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> impl Iterator<Item = Level> {
        (0..=100).map(Level::new)
    }

    #[test]
    fn level_clamps_to_100() {
        assert_eq!(Level::new(250).get(), 100);
        assert_eq!(Level::new(0).get(), 0);
    }

    #[test]
    fn speed_mapping_endpoints_and_monotonic() {
        assert_eq!(speed_to_duration_ms(Level::new(0)), 4000.0);
        assert_eq!(speed_to_duration_ms(Level::new(100)), 600.0);
        let durations: Vec<f32> = levels().map(speed_to_duration_ms).collect();
        assert!(durations.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn delay_mapping_endpoints_and_monotonic() {
        assert_eq!(delay_to_ms(Level::new(0)), 500.0);
        assert_eq!(delay_to_ms(Level::new(100)), 6000.0);
        let delays: Vec<f32> = levels().map(delay_to_ms).collect();
        assert!(delays.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn shade_alpha_range() {
        assert_eq!(shade_alpha(Level::new(0)), 0.0);
        assert!((shade_alpha(Level::new(100)) - 0.65).abs() < f32::EPSILON);
    }

    #[test]
    fn volume_is_a_fraction() {
        assert_eq!(volume_fraction(Level::new(0)), 0.0);
        assert_eq!(volume_fraction(Level::new(50)), 0.5);
        assert_eq!(volume_fraction(Level::new(100)), 1.0);
    }

    #[test]
    fn set_and_get_each_control() {
        let mut controls = Controls::default();
        for (i, control) in Control::ALL.into_iter().enumerate() {
            controls.set(control, Level::new(i as u8 * 10));
        }
        assert_eq!(controls.speed.get(), 0);
        assert_eq!(controls.delay.get(), 10);
        assert_eq!(controls.shade.get(), 20);
        assert_eq!(controls.volume.get(), 30);
        assert_eq!(controls.get(Control::Shade), Level::new(20));
    }
}
