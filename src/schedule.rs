use log::debug;
use rand::Rng;

use crate::advance::{pick_next_index, AdvanceTimer};
use crate::state::{AdvanceKey, PlayerState, TransitionKey};
use crate::transition::Transition;

/// Which loops were restarted by the last `sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Restarted {
    pub transition: bool,
    pub timer: bool,
}

/// Owns the two timing loops of the player: the fade of the current image
/// and the countdown to the next one. Each loop is tied to a key of the
/// state; when its key changes the running loop is dropped and a fresh one
/// takes its place, so nothing stale ever fires.
#[derive(Debug, Default)]
pub struct Scheduler {
    transition_key: Option<TransitionKey>,
    advance_key: Option<AdvanceKey>,
    transition: Option<Transition>,
    timer: Option<AdvanceTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn timer(&self) -> Option<&AdvanceTimer> {
        self.timer.as_ref()
    }

    pub fn sync<E, R: Rng + ?Sized>(&mut self, state: &PlayerState<E>, rng: &mut R) -> Restarted {
        let mut restarted = Restarted::default();

        let transition_key = state.transition_key();
        if self.transition_key != Some(transition_key) {
            self.transition_key = Some(transition_key);
            self.transition = if state.is_empty() {
                None
            } else {
                Some(Transition::start(rng, transition_key.speed))
            };
            restarted.transition = true;
            debug!("transition restarted for image {} ({:?})", transition_key.index, self.transition);
        }

        let advance_key = state.advance_key();
        if self.advance_key != Some(advance_key) {
            self.advance_key = Some(advance_key);
            self.timer = if advance_key.playing && advance_key.count >= 2 {
                Some(AdvanceTimer::start(advance_key.delay))
            } else {
                None
            };
            restarted.timer = true;
        }

        restarted
    }

    /// Moves both loops forward by `dt` seconds. Returns the index to show
    /// next when the advance timer runs out.
    pub fn tick<E, R: Rng + ?Sized>(&mut self, dt: f32, state: &PlayerState<E>, rng: &mut R) -> Option<usize> {
        if let Some(transition) = self.transition.as_mut() {
            transition.advance(dt);
        }

        let fired = self.timer.as_mut().is_some_and(|timer| timer.tick(dt));
        if !fired {
            return None;
        }
        self.timer = None;
        pick_next_index(rng, state.len(), state.current_index())
    }

    /// One frame: catch up with input applied since the last frame, move
    /// the loops forward, then restart them if the image changed. A timer
    /// whose inputs changed this frame is replaced before it can fire.
    pub fn step<E, R: Rng + ?Sized>(&mut self, dt: f32, state: &mut PlayerState<E>, rng: &mut R) -> Option<usize> {
        self.sync(state, rng);
        let next = self.tick(dt, state, rng);
        if let Some(index) = next {
            state.set_index(index);
            self.sync(state, rng);
        }
        next
    }
}
