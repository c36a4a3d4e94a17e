use crate::config::Config;
use crate::grid::{collides, Placement, Position};
use crate::sprite::player::Player;
use crate::sprite::{Drawable, Shape, Sprite};
use rand::Rng;

const ROW_OFFSET: f64 = -20.0;
const SPAWN_COL: f64 = -1.0;

/// A bug crawling left to right along one road row. Speed is picked once at
/// spawn and kept for the life of the enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    placement: Placement,
    speed: f64,
}

impl Enemy {
    pub fn new(row: i32, speed: f64, config: &Config) -> Self {
        let mut placement = Placement::default();
        placement.place(Position::new(SPAWN_COL, row), ROW_OFFSET, config);
        Enemy { placement, speed }
    }

    /// Spawns just off the left edge with a speed drawn from the configured
    /// range
    pub fn spawn(row: i32, config: &Config, rng: &mut impl Rng) -> Self {
        let speed = if config.enemy_speed_min < config.enemy_speed_max {
            rng.gen_range(config.enemy_speed_min..config.enemy_speed_max)
        } else {
            config.enemy_speed_min
        };
        log::debug!("enemy spawned on row {} at speed {:.2}", row, speed);
        Enemy::new(row, speed, config)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Moves `speed * dt` columns right, re-entering at col -1 after passing
    /// the right edge, then checks for a hit on the player. Returns true when
    /// this enemy crashed the player.
    pub fn update(&mut self, dt: f64, player: &mut Player, config: &Config) -> bool {
        let current = self.placement.position();
        let mut col = current.col + self.speed * dt;
        if col >= f64::from(config.num_cols) {
            col = SPAWN_COL;
        }
        self.placement
            .place(Position::new(col, current.row), ROW_OFFSET, config);

        if player.accepts_collisions()
            && collides(
                player.position(),
                self.placement.position(),
                config.collision_tolerance,
            )
        {
            player.push_crashing(config);
            true
        } else {
            false
        }
    }
}

impl Shape for Enemy {
    fn position(&self) -> Position {
        self.placement.position()
    }

    fn render(&self) -> Option<Drawable> {
        Some(Drawable {
            sprite: Sprite::EnemyBug,
            point: self.placement.point(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::state::StateTag;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parked_player(config: &Config) -> Player {
        // idle at the restart square, well away from road row 1
        Player::new(config)
    }

    #[test]
    fn spawn_speed_is_in_range() {
        let config = Config::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let enemy = Enemy::spawn(1, &config, &mut rng);
            assert!(enemy.speed() >= 0.5 && enemy.speed() < 2.0);
            assert_relative_eq!(enemy.position().col, -1.0);
        }
    }

    #[test]
    fn moves_by_speed_times_dt() {
        let config = Config::default();
        let mut player = parked_player(&config);
        let mut enemy = Enemy::new(1, 1.5, &config);
        enemy.update(0.5, &mut player, &config);
        assert_relative_eq!(enemy.position().col, -0.25);
        assert_eq!(enemy.position().row, 1);
    }

    #[test]
    fn wraps_back_to_spawn_after_right_edge() {
        let config = Config::default();
        let mut player = parked_player(&config);
        let mut enemy = Enemy::new(1, 1.0, &config);
        enemy.placement.place(Position::new(4.8, 1), ROW_OFFSET, &config);
        enemy.update(0.5, &mut player, &config);
        assert_relative_eq!(enemy.position().col, -1.0);
        assert_relative_eq!(enemy.render().map(|d| d.point.x).unwrap_or(0.0), -101.0);
    }

    #[test]
    fn crashes_a_player_in_the_same_square() {
        let config = Config::default();
        let mut player = parked_player(&config);
        let mut enemy = Enemy::new(5, 1.0, &config);
        enemy.placement.place(Position::new(1.6, 5), ROW_OFFSET, &config);
        assert!(enemy.update(0.1, &mut player, &config));
        assert_eq!(player.state(), StateTag::Crashing);

        // already crashing, no second hit
        assert!(!enemy.update(0.1, &mut player, &config));
        assert_eq!(player.stack_tags(), vec![StateTag::Idle, StateTag::Crashing]);
    }
}
