use crate::controls::{Control, Controls, Level};

/// Inputs that restart the image transition when any of them changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionKey {
    pub index: usize,
    pub count: usize,
    pub speed: Level,
    pub shade: Level,
}

/// Inputs that restart the advance timer when any of them changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceKey {
    pub playing: bool,
    pub count: usize,
    pub delay: Level,
    pub index: usize,
}

/// Everything the player knows about the session. Entries are only ever
/// appended; the current index is never touched by an append.
#[derive(Debug)]
pub struct PlayerState<E> {
    entries: Vec<E>,
    current_index: usize,
    is_playing: bool,
    controls: Controls,
}

impl<E> PlayerState<E> {
    pub fn new(controls: Controls) -> Self {
        Self {
            entries: Vec::new(),
            current_index: 0,
            is_playing: false,
            controls,
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&E> {
        self.entries.get(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Appends a finished batch in one step. A non-empty batch starts
    /// playback unless `autoplay` is off. Returns the number of entries added.
    pub fn append_batch(&mut self, batch: Vec<E>, autoplay: bool) -> usize {
        let added = batch.len();
        if added == 0 {
            return 0;
        }
        self.entries.extend(batch);
        if autoplay && !self.is_playing {
            self.is_playing = true;
        }
        added
    }

    /// Flips play/pause. Does nothing while no images are loaded.
    pub fn toggle_playing(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.is_playing = !self.is_playing;
        true
    }

    pub fn set_control(&mut self, control: Control, level: Level) {
        self.controls.set(control, level);
    }

    /// Moves to `index` if it is in range.
    pub fn set_index(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    pub fn transition_key(&self) -> TransitionKey {
        TransitionKey {
            index: self.current_index,
            count: self.entries.len(),
            speed: self.controls.speed,
            shade: self.controls.shade,
        }
    }

    pub fn advance_key(&self) -> AdvanceKey {
        AdvanceKey {
            playing: self.is_playing,
            count: self.entries.len(),
            delay: self.controls.delay,
            index: self.current_index,
        }
    }
}
