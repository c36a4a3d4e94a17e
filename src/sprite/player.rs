use crate::clock::GameClock;
use crate::config::Config;
use crate::grid::{Direction, Placement, Position};
use crate::sprite::state::{PlayerState, StateStack, StateTag};
use crate::sprite::{Drawable, Shape, Sprite, CHARACTERS};
use rand::Rng;

// vertical nudge per state so each image sits right in its square
const WALKING_ROW_OFFSET: f64 = -10.0;
const CRASH_ROW_OFFSET: f64 = 45.0;
const SPLASH_ROW_OFFSET: f64 = 50.0;
const HOME_ROW_OFFSET: f64 = 2.0;
const BONUS_ROW_OFFSET: f64 = -10.0;

/// Discrete commands delivered by the host on key-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Select,
}

impl Command {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            Command::Select => None,
        }
    }
}

/// Round boundaries crossed by a transition, for the world to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    Started,
    Ended,
}

/// Where a one-square move ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Blocked,
    Moved,
    Home,
    Splash,
}

/// ┌──────────────── State Transition Flow ─────────────────────────────┐
/// │  From (top)   →  Trigger              →  Action                    │
/// ├────────────────────────────────────────────────────────────────────┤
/// │  Idle         →  timer expires        →  random left/up/right step │
/// │  Idle         →  Select               →  push Selecting            │
/// │  Selecting    →  timer expires        →  reset to [Idle]           │
/// │  Selecting    →  Up / Down            →  cycle character           │
/// │  Selecting    →  Select               →  reset to [Moving], begin  │
/// │  Moving       →  direction            →  step, score               │
/// │  Moving       →  goal on home column  →  push Home                 │
/// │  Moving       →  goal elsewhere       →  push Splashing            │
/// │  Moving       →  round clock expires  →  end round, [Idle]         │
/// │  Moving/Idle  →  enemy / bonus hit    →  push Crashing / Bonus     │
/// │  -------         ------                                            │
/// │  Transient    →  timer expires        →  pop, back to restart      │
/// │  Transient    →  Select over Idle     →  pop, push Selecting       │
/// └────────────────────────────────────────────────────────────────────┘
/// Transient = Crashing, Splashing, Home, Bonus. Anything not listed is a
/// no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    placement: Placement,
    stack: StateStack,
    character: usize,
}

impl Player {
    /// Starts in attract mode on the restart square
    pub fn new(config: &Config) -> Self {
        let mut player = Player {
            placement: Placement::default(),
            stack: StateStack::new(idle_state(config, CHARACTERS[0])),
            character: 0,
        };
        player.place(config.restart, config);
        player
    }

    pub fn state(&self) -> StateTag {
        self.stack.top().tag()
    }

    /// Tag of the state that resumes when the active one pops
    pub fn beneath(&self) -> Option<StateTag> {
        self.stack.beneath().map(PlayerState::tag)
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    /// Tags from bottom to top
    pub fn stack_tags(&self) -> Vec<StateTag> {
        self.stack.tags()
    }

    /// Sprite of the chosen character
    pub fn character(&self) -> Sprite {
        CHARACTERS[self.character]
    }

    pub fn accepts_collisions(&self) -> bool {
        self.state().accepts_collisions()
    }

    // ==================== Per tick ====================

    pub fn update(
        &mut self,
        dt: f64,
        clock: &mut GameClock,
        config: &Config,
        rng: &mut impl Rng,
    ) -> Option<RoundEvent> {
        match self.state() {
            StateTag::Idle => {
                self.wander(dt, config, rng);
                None
            }
            StateTag::Selecting => {
                if self.charge_state(dt, config) <= 0.0 {
                    log::debug!("character selection timed out");
                    self.set_idle(config);
                }
                None
            }
            StateTag::Moving => {
                self.settle(config);
                self.charge_round(dt, clock, config)
            }
            StateTag::Crashing | StateTag::Splashing | StateTag::Home | StateTag::Bonus => {
                self.update_transient(dt, clock, config)
            }
        }
    }

    pub fn handle_input(
        &mut self,
        command: Command,
        clock: &mut GameClock,
        config: &Config,
    ) -> Option<RoundEvent> {
        match (self.state(), command) {
            (StateTag::Idle, Command::Select) => {
                self.push_selecting(config);
                None
            }
            (StateTag::Selecting, Command::Up) => {
                self.character = (self.character + CHARACTERS.len() - 1) % CHARACTERS.len();
                self.show_character();
                None
            }
            (StateTag::Selecting, Command::Down) => {
                self.character = (self.character + 1) % CHARACTERS.len();
                self.show_character();
                None
            }
            (StateTag::Selecting, Command::Select) => Some(self.begin_round(clock, config)),
            (StateTag::Moving, command) => {
                if let Some(direction) = command.direction() {
                    self.play_step(direction, clock, config);
                }
                None
            }
            (tag, Command::Select)
                if tag.is_transient() && self.beneath() == Some(StateTag::Idle) =>
            {
                self.stack.pop();
                self.push_selecting(config);
                None
            }
            _ => None,
        }
    }

    // ==================== Transitions ====================

    /// Clears the stack down to a fresh idle state on the restart square
    pub fn set_idle(&mut self, config: &Config) {
        log::debug!("player -> idle");
        let idle = idle_state(config, self.character());
        self.stack.reset(idle);
        self.place(config.restart, config);
    }

    pub(crate) fn push_selecting(&mut self, config: &Config) {
        log::debug!("player -> selecting");
        let selecting = PlayerState::new(
            StateTag::Selecting,
            config.ticks(config.select_seconds),
            self.character(),
            WALKING_ROW_OFFSET,
        );
        self.stack.push(selecting);
        self.place(config.restart, config);
    }

    /// Replaces the whole stack with `moving` and restarts the round clock
    pub fn begin_round(&mut self, clock: &mut GameClock, config: &Config) -> RoundEvent {
        log::info!("round started with {:?}", self.character());
        let moving = PlayerState::new(StateTag::Moving, 0.0, self.character(), WALKING_ROW_OFFSET);
        self.stack.reset(moving);
        clock.begin();
        self.place(config.restart, config);
        RoundEvent::Started
    }

    /// Enemy hit. Ignored unless the active state takes collisions.
    pub(crate) fn push_crashing(&mut self, config: &Config) {
        if !self.accepts_collisions() {
            log::warn!("crash ignored while {:?}", self.state());
            return;
        }
        self.push_transient(
            StateTag::Crashing,
            config.ticks(config.crash_seconds),
            Sprite::Crash,
            CRASH_ROW_OFFSET,
            config,
        );
    }

    fn push_splashing(&mut self, config: &Config) {
        self.push_transient(
            StateTag::Splashing,
            config.ticks(config.splash_seconds),
            Sprite::Splash,
            SPLASH_ROW_OFFSET,
            config,
        );
    }

    fn push_home(&mut self, config: &Config) {
        self.push_transient(
            StateTag::Home,
            config.ticks(config.home_seconds),
            Sprite::Heart,
            HOME_ROW_OFFSET,
            config,
        );
    }

    /// Bonus pickup. Ignored unless the active state takes collisions.
    pub(crate) fn push_bonus(&mut self, config: &Config) {
        if !self.accepts_collisions() {
            log::warn!("bonus ignored while {:?}", self.state());
            return;
        }
        self.push_transient(
            StateTag::Bonus,
            config.ticks(config.bonus_seconds),
            Sprite::Star,
            BONUS_ROW_OFFSET,
            config,
        );
    }

    fn push_transient(
        &mut self,
        tag: StateTag,
        ticks: f64,
        sprite: Sprite,
        row_offset: f64,
        config: &Config,
    ) {
        log::debug!("player -> {:?} over {:?}", tag, self.state());
        self.stack
            .push(PlayerState::new(tag, ticks, sprite, row_offset));
        self.settle(config);
    }

    // ==================== State behaviour ====================

    /// Attract mode: every `idle_move_seconds` take a random step, biased
    /// upward, with no scoring
    fn wander(&mut self, dt: f64, config: &Config, rng: &mut impl Rng) {
        if self.charge_state(dt, config) <= 0.0 {
            self.stack
                .top_mut()
                .reset_timer(config.ticks(config.idle_move_seconds));
            let direction = match rng.gen_range(0..4) {
                0 => Direction::Left,
                3 => Direction::Right,
                _ => Direction::Up,
            };
            match self.walk(direction, config) {
                Step::Home => self.push_home(config),
                Step::Splash => self.push_splashing(config),
                Step::Moved | Step::Blocked => {}
            }
        }
        self.settle(config);
    }

    fn play_step(&mut self, direction: Direction, clock: &mut GameClock, config: &Config) {
        match self.walk(direction, config) {
            Step::Moved => {
                let row = self.position().row;
                if row > config.goal_row() && row < config.start_row() {
                    clock.add_points(config.points_step);
                }
            }
            Step::Home => {
                let time_bonus = u32::try_from(clock.seconds_remaining().max(0)).unwrap_or(0);
                clock.add_points(config.points_home.saturating_add(time_bonus));
                log::info!("home! score is now {}", clock.score());
                self.push_home(config);
            }
            Step::Splash => {
                log::debug!("splash at column {}", self.position().col);
                self.push_splashing(config);
            }
            Step::Blocked => {}
        }
    }

    fn update_transient(
        &mut self,
        dt: f64,
        clock: &mut GameClock,
        config: &Config,
    ) -> Option<RoundEvent> {
        let beneath = self.beneath();
        if self.charge_state(dt, config) <= 0.0 {
            self.stack.pop();
            log::debug!("player resumes {:?}", self.state());
            self.place(config.restart, config);
        } else {
            self.settle(config);
        }

        match beneath {
            Some(tag) if tag != StateTag::Idle => self.charge_round(dt, clock, config),
            _ => None,
        }
    }

    fn charge_round(
        &mut self,
        dt: f64,
        clock: &mut GameClock,
        config: &Config,
    ) -> Option<RoundEvent> {
        if clock.charge_time(dt) <= 0.0 {
            clock.end();
            log::info!(
                "round over: score {}, high score {}",
                clock.score(),
                clock.high_score()
            );
            self.set_idle(config);
            Some(RoundEvent::Ended)
        } else {
            None
        }
    }

    fn charge_state(&mut self, dt: f64, config: &Config) -> f64 {
        self.stack
            .top_mut()
            .charge_time(dt, config.ticks_per_second)
    }

    // ==================== Grid ====================

    /// One square in `direction` if the board allows it. Stepping up from
    /// row 1 always lands on the goal row, home or water.
    fn walk(&mut self, direction: Direction, config: &Config) -> Step {
        let Position { col, row } = self.position();
        let (target, step) = match direction {
            Direction::Up if row > 1 => (Position::new(col, row - 1), Step::Moved),
            Direction::Up if row == 1 => {
                let landing = if config.home_columns.is_home(col) {
                    Step::Home
                } else {
                    Step::Splash
                };
                (Position::new(col, config.goal_row()), landing)
            }
            Direction::Down if row < config.start_row() => {
                (Position::new(col, row + 1), Step::Moved)
            }
            Direction::Left if col > 0.0 => (Position::new(col - 1.0, row), Step::Moved),
            Direction::Right if col < f64::from(config.num_cols - 1) => {
                (Position::new(col + 1.0, row), Step::Moved)
            }
            _ => return Step::Blocked,
        };
        self.place(target, config);
        step
    }

    fn show_character(&mut self) {
        let sprite = self.character();
        self.stack.top_mut().set_sprite(sprite);
    }

    fn place(&mut self, position: Position, config: &Config) {
        let row_offset = self.stack.top().row_offset();
        self.placement.place(position, row_offset, config);
    }

    /// Re-derives pixels for the active state's row offset
    fn settle(&mut self, config: &Config) {
        self.place(self.position(), config);
    }
}

fn idle_state(config: &Config, sprite: Sprite) -> PlayerState {
    PlayerState::new(
        StateTag::Idle,
        config.ticks(config.idle_move_seconds),
        sprite,
        WALKING_ROW_OFFSET,
    )
}

impl Shape for Player {
    fn position(&self) -> Position {
        self.placement.position()
    }

    fn render(&self) -> Option<Drawable> {
        Some(Drawable {
            sprite: self.stack.top().sprite(),
            point: self.placement.point(),
        })
    }
}
