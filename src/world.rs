use crate::clock::GameClock;
use crate::config::Config;
use crate::sprite::bonus::Bonus;
use crate::sprite::enemy::Enemy;
use crate::sprite::player::{Command, Player, RoundEvent};
use crate::sprite::state::StateTag;
use crate::sprite::{Drawable, Shape};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use std::fmt;

pub const TITLE: &str = "Bugs, Bugs, Bugs!";

/// Text shown over the board, picked from the player's active state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Idle { score: u32, high_score: u32 },
    Selecting,
    Playing { score: u32, seconds: i64 },
}

impl Banner {
    /// Large headline drawn near the top, only in attract mode
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Banner::Idle { .. } => Some(TITLE),
            _ => None,
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Banner::Idle { score, high_score } => write!(
                f,
                "Score: {}    High Score: {}    Space to play",
                score, high_score
            ),
            Banner::Selecting => write!(f, "Press ▲▼ to select character / Space to start"),
            Banner::Playing { score, seconds } => write!(
                f,
                "Score: {}                  Time: {} seconds",
                score, seconds
            ),
        }
    }
}

/// Everything the host needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub drawables: Vec<Drawable>,
    pub banner: Banner,
}

/// The whole simulation, owned in one place and driven by the host.
///
/// Per tick: enemies, then bonuses, then the player.
pub struct World {
    config: Config,
    clock: GameClock,
    player: Player,
    enemies: Vec<Enemy>,
    bonuses: Vec<Bonus>,
    rng: StdRng,
}

impl World {
    pub fn new(config: Config, mut rng: StdRng) -> Result<Self> {
        config.validate().context("invalid game configuration")?;

        let enemies = config
            .enemy_rows
            .iter()
            .map(|row| Enemy::spawn(*row, &config, &mut rng))
            .collect();
        let bonuses = config
            .bonuses
            .iter()
            .map(|spec| Bonus::new(spec, &config))
            .collect();
        let mut clock = GameClock::new(&config);
        clock.begin();
        let player = Player::new(&config);

        log::info!(
            "world ready: {}x{} grid, {} enemies, {} bonuses",
            config.num_cols,
            config.num_rows,
            config.enemy_rows.len(),
            config.bonuses.len()
        );
        Ok(World {
            config,
            clock,
            player,
            enemies,
            bonuses,
            rng,
        })
    }

    /// Advances the simulation by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        for enemy in self.enemies.iter_mut() {
            enemy.update(dt, &mut self.player, &self.config);
        }
        for bonus in self.bonuses.iter_mut() {
            bonus.update(&mut self.clock, &mut self.player, &self.config);
        }
        let event = self
            .player
            .update(dt, &mut self.clock, &self.config, &mut self.rng);
        self.on_round(event);
    }

    pub fn handle_input(&mut self, command: Command) {
        let event = self
            .player
            .handle_input(command, &mut self.clock, &self.config);
        self.on_round(event);
    }

    fn on_round(&mut self, event: Option<RoundEvent>) {
        if let Some(RoundEvent::Started) = event {
            for bonus in self.bonuses.iter_mut() {
                bonus.reset_bonus();
            }
        }
    }

    pub fn render(&self) -> Frame {
        let drawables = self
            .bonuses
            .iter()
            .filter_map(Shape::render)
            .chain(self.enemies.iter().filter_map(Shape::render))
            .chain(self.player.render())
            .collect();
        Frame {
            drawables,
            banner: self.banner(),
        }
    }

    pub fn banner(&self) -> Banner {
        let idle = Banner::Idle {
            score: self.clock.score(),
            high_score: self.clock.high_score(),
        };
        let playing = Banner::Playing {
            score: self.clock.score(),
            seconds: self.clock.seconds_remaining(),
        };
        match self.player.state() {
            StateTag::Idle => idle,
            StateTag::Selecting => Banner::Selecting,
            StateTag::Moving => playing,
            _ if self.player.beneath() == Some(StateTag::Moving) => playing,
            _ => idle,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }
}
