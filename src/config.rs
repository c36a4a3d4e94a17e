use crate::grid::{Position, DEFAULT_TOLERANCE};
use crate::sprite::Sprite;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Which goal-row columns count as a safe landing ("home") rather than a
/// splash into the water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeColumns {
    Odd,
    Even,
}

impl HomeColumns {
    pub fn is_home(self, col: f64) -> bool {
        let col = col.round() as i64;
        match self {
            HomeColumns::Odd => col.rem_euclid(2) == 1,
            HomeColumns::Even => col.rem_euclid(2) == 0,
        }
    }
}

/// A bonus pickup: which sprite it shows and how many seconds into the
/// round it appears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusSpec {
    pub sprite: Sprite,
    pub appears_after: f64,
}

/// Every tunable of the game. Durations are given in seconds and converted
/// to clock ticks with [`Config::ticks`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub num_rows: i32,
    pub num_cols: i32,
    pub col_width: f64,
    pub row_height: f64,
    pub scaling_factor: f64,
    pub ticks_per_second: f64,
    pub round_seconds: f64,
    pub points_step: u32,
    pub points_home: u32,
    pub points_bonus: u32,
    pub idle_move_seconds: f64,
    pub select_seconds: f64,
    pub crash_seconds: f64,
    pub splash_seconds: f64,
    pub home_seconds: f64,
    pub bonus_seconds: f64,
    pub bonus_visible_seconds: f64,
    pub collision_tolerance: f64,
    pub enemy_speed_min: f64,
    pub enemy_speed_max: f64,
    pub enemy_rows: Vec<i32>,
    pub restart: Position,
    pub altar: Position,
    pub home_columns: HomeColumns,
    pub bonuses: Vec<BonusSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_rows: 6,
            num_cols: 5,
            col_width: 101.0,
            row_height: 83.0,
            scaling_factor: 1.2,
            ticks_per_second: 10.0,
            round_seconds: 30.0,
            points_step: 10,
            points_home: 50,
            points_bonus: 100,
            idle_move_seconds: 1.0,
            select_seconds: 30.0,
            crash_seconds: 2.0,
            splash_seconds: 2.0,
            home_seconds: 2.0,
            bonus_seconds: 1.0,
            bonus_visible_seconds: 2.0,
            collision_tolerance: DEFAULT_TOLERANCE,
            enemy_speed_min: 0.5,
            enemy_speed_max: 2.0,
            enemy_rows: vec![1, 2, 3, 1],
            restart: Position::new(2.0, 5),
            altar: Position::new(2.0, 2),
            home_columns: HomeColumns::Odd,
            bonuses: vec![
                BonusSpec {
                    sprite: Sprite::GemBlue,
                    appears_after: 5.0,
                },
                BonusSpec {
                    sprite: Sprite::GemGreen,
                    appears_after: 10.0,
                },
                BonusSpec {
                    sprite: Sprite::GemOrange,
                    appears_after: 15.0,
                },
                BonusSpec {
                    sprite: Sprite::Key,
                    appears_after: 20.0,
                },
            ],
        }
    }
}

impl Config {
    pub fn ticks(&self, seconds: f64) -> f64 {
        seconds * self.ticks_per_second
    }

    /// Length of a round in ticks
    pub fn playing_time(&self) -> f64 {
        self.ticks(self.round_seconds)
    }

    pub fn goal_row(&self) -> i32 {
        0
    }

    pub fn start_row(&self) -> i32 {
        self.num_rows - 1
    }

    fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.row < self.num_rows
            && position.col >= 0.0
            && position.col < f64::from(self.num_cols)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_rows < 2 || self.num_cols < 2 {
            return Err(anyhow!(
                "grid must be at least 2x2, got {}x{}",
                self.num_cols,
                self.num_rows
            ));
        }
        if self.ticks_per_second <= 0.0 {
            return Err(anyhow!(
                "ticks_per_second must be positive, got {}",
                self.ticks_per_second
            ));
        }
        if self.enemy_speed_min < 0.0 || self.enemy_speed_min > self.enemy_speed_max {
            return Err(anyhow!(
                "invalid enemy speed range [{}, {}]",
                self.enemy_speed_min,
                self.enemy_speed_max
            ));
        }
        if !self.contains(self.restart) {
            return Err(anyhow!("restart square {:?} is off the grid", self.restart));
        }
        if !self.contains(self.altar) {
            return Err(anyhow!("bonus altar {:?} is off the grid", self.altar));
        }
        if let Some(row) = self
            .enemy_rows
            .iter()
            .find(|row| **row < 0 || **row >= self.num_rows)
        {
            return Err(anyhow!("enemy row {} is off the grid", row));
        }
        Ok(())
    }
}
