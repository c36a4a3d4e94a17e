/// Building blocks of the player state machine: what each state carries and
/// the stack they live on. Transition rules live in `player.rs`, this file
/// only knows how to hold and count down states.
///
/// ┌──────────── Stack shapes ─────────────────┐
/// │  [idle]                  attract mode     │
/// │  [idle, selecting]       picking a char   │
/// │  [idle, crashing]        attract crash    │
/// │  [moving]                round in play    │
/// │  [moving, home]          scored a crossing│
/// └───────────────────────────────────────────┘
use crate::clock;
use crate::sprite::Sprite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateTag {
    Idle,
    Selecting,
    Moving,
    Crashing,
    Splashing,
    Home,
    Bonus,
}

impl StateTag {
    /// Base states may sit at the bottom of the stack
    pub fn is_base(self) -> bool {
        matches!(self, StateTag::Idle | StateTag::Selecting | StateTag::Moving)
    }

    /// Transient states always hand control back to the state beneath them
    pub fn is_transient(self) -> bool {
        !self.is_base()
    }

    /// Enemies and bonuses only hit a player in one of these states
    pub fn accepts_collisions(self) -> bool {
        matches!(self, StateTag::Idle | StateTag::Moving)
    }
}

/// One activation of a state. Every field is set explicitly when the state is
/// pushed; nothing carries over from an earlier activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    tag: StateTag,
    timer: f64,
    sprite: Sprite,
    row_offset: f64,
}

impl PlayerState {
    pub fn new(tag: StateTag, timer: f64, sprite: Sprite, row_offset: f64) -> Self {
        PlayerState {
            tag,
            timer,
            sprite,
            row_offset,
        }
    }

    pub fn tag(&self) -> StateTag {
        self.tag
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn sprite(&self) -> Sprite {
        self.sprite
    }

    pub fn row_offset(&self) -> f64 {
        self.row_offset
    }

    /// Counts the state timer down, clamped at expiry
    pub fn charge_time(&mut self, dt: f64, ticks_per_second: f64) -> f64 {
        self.timer = clock::charge(self.timer, dt, ticks_per_second);
        self.timer
    }

    pub(crate) fn reset_timer(&mut self, ticks: f64) {
        self.timer = ticks;
    }

    pub(crate) fn set_sprite(&mut self, sprite: Sprite) {
        self.sprite = sprite;
    }
}

/// Stack of player states. The bottom is held apart from the rest so the
/// stack can never be emptied.
#[derive(Debug, Clone, PartialEq)]
pub struct StateStack {
    bottom: PlayerState,
    above: Vec<PlayerState>,
}

impl StateStack {
    pub fn new(base: PlayerState) -> Self {
        debug_assert!(base.tag().is_base(), "{:?} is not a base state", base.tag());
        StateStack {
            bottom: base,
            above: Vec::new(),
        }
    }

    /// Drops every state and starts over from `base`
    pub fn reset(&mut self, base: PlayerState) {
        debug_assert!(base.tag().is_base(), "{:?} is not a base state", base.tag());
        self.above.clear();
        self.bottom = base;
    }

    pub fn push(&mut self, state: PlayerState) {
        self.above.push(state);
    }

    /// Removes the top state. The bottom state is never popped: debug builds
    /// assert, release builds log, return None and leave the stack alone.
    pub fn pop(&mut self) -> Option<PlayerState> {
        debug_assert!(
            !self.above.is_empty(),
            "popped the base {:?} state off the player stack",
            self.bottom.tag()
        );
        let popped = self.above.pop();
        if popped.is_none() {
            log::error!(
                "refusing to pop the base {:?} state off the player stack",
                self.bottom.tag()
            );
        }
        popped
    }

    pub fn top(&self) -> &PlayerState {
        self.above.last().unwrap_or(&self.bottom)
    }

    pub fn top_mut(&mut self) -> &mut PlayerState {
        self.above.last_mut().unwrap_or(&mut self.bottom)
    }

    /// The state that becomes active once the top is popped
    pub fn beneath(&self) -> Option<&PlayerState> {
        match self.above.len() {
            0 => None,
            1 => Some(&self.bottom),
            len => self.above.get(len - 2),
        }
    }

    pub fn bottom(&self) -> &PlayerState {
        &self.bottom
    }

    pub fn len(&self) -> usize {
        self.above.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Tags from bottom to top
    pub fn tags(&self) -> Vec<StateTag> {
        std::iter::once(&self.bottom)
            .chain(self.above.iter())
            .map(PlayerState::tag)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn idle() -> PlayerState {
        PlayerState::new(StateTag::Idle, 10.0, Sprite::CharBoy, -10.0)
    }

    fn crashing() -> PlayerState {
        PlayerState::new(StateTag::Crashing, 20.0, Sprite::Crash, 45.0)
    }

    #[test]
    fn timer_never_climbs_and_stays_expired() {
        let mut state = crashing();
        let mut last = state.timer();
        for _ in 0..30 {
            let now = state.charge_time(0.1, 10.0);
            assert!(now <= last);
            last = now;
        }
        assert!(last <= 0.0);
        assert_relative_eq!(state.charge_time(0.1, 10.0), last);
    }

    #[test]
    fn push_and_pop_restore_the_state_beneath() {
        let mut stack = StateStack::new(idle());
        stack.push(crashing());
        assert_eq!(stack.top().tag(), StateTag::Crashing);
        assert_eq!(stack.beneath().map(PlayerState::tag), Some(StateTag::Idle));
        assert_eq!(stack.pop().map(|s| s.tag()), Some(StateTag::Crashing));
        assert_eq!(stack.top().tag(), StateTag::Idle);
        assert!(stack.beneath().is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "popped the base Idle state")]
    fn popping_the_base_state_asserts_in_debug() {
        let mut stack = StateStack::new(idle());
        stack.pop();
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn base_state_cannot_be_popped() {
        let mut stack = StateStack::new(idle());
        assert!(stack.pop().is_none());
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.tags(), vec![StateTag::Idle]);
    }

    #[test]
    fn reset_clears_to_a_single_base() {
        let mut stack = StateStack::new(idle());
        stack.push(PlayerState::new(StateTag::Selecting, 300.0, Sprite::CharBoy, -10.0));
        stack.push(crashing());
        stack.reset(PlayerState::new(StateTag::Moving, 0.0, Sprite::CharBoy, -10.0));
        assert_eq!(stack.tags(), vec![StateTag::Moving]);
    }

    #[test]
    fn beneath_looks_one_below_top() {
        let mut stack = StateStack::new(idle());
        stack.push(PlayerState::new(StateTag::Selecting, 300.0, Sprite::CharBoy, -10.0));
        stack.push(crashing());
        assert_eq!(
            stack.beneath().map(PlayerState::tag),
            Some(StateTag::Selecting)
        );
    }

    #[test]
    fn tags_classify_base_and_transient() {
        assert!(StateTag::Idle.is_base());
        assert!(StateTag::Moving.is_base());
        assert!(StateTag::Home.is_transient());
        assert!(StateTag::Moving.accepts_collisions());
        assert!(!StateTag::Crashing.accepts_collisions());
        assert!(!StateTag::Selecting.accepts_collisions());
    }
}
