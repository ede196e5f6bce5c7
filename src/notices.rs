use std::collections::VecDeque;

use crate::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    age: f32,
}

/// Recent failures shown in the sidebar. Oldest first; each one fades out
/// after `NOTICE_LIFETIME` seconds.
#[derive(Debug, Default)]
pub struct Notices {
    items: VecDeque<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        if self.items.len() == MAX_NOTICES {
            self.items.pop_front();
        }
        self.items.push_back(Notice {
            text: text.into(),
            age: 0.0,
        });
    }

    pub fn update(&mut self, dt: f32) {
        for notice in self.items.iter_mut() {
            notice.age += dt;
        }
        self.items.retain(|n| n.age < NOTICE_LIFETIME);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Notice {
    /// 1.0 while fresh, fading to 0.0 over the last second.
    pub fn opacity(&self) -> f32 {
        (NOTICE_LIFETIME - self.age).clamp(0.0, 1.0)
    }
}
