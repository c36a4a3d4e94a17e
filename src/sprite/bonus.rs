use crate::clock::GameClock;
use crate::config::{BonusSpec, Config};
use crate::grid::{collides, Placement, Position, Point};
use crate::sprite::player::Player;
use crate::sprite::{Drawable, Shape, Sprite};

const ROW_OFFSET: f64 = 25.0;
// bonus images are narrower than a column; nudge them toward the middle
const COL_OFFSET: f64 = 20.0;

/// A pickup that sits on the altar square while the round clock is inside
/// `[end_time, begin_time]`.
///
/// `earned` is sticky for the round: once collected the bonus stays hidden
/// until [`Bonus::reset_bonus`] runs at the start of the next round.
#[derive(Debug, Clone, PartialEq)]
pub struct Bonus {
    placement: Placement,
    sprite: Sprite,
    altar: Position,
    begin_time: f64,
    end_time: f64,
    points: u32,
    earned: bool,
    visible: bool,
}

impl Bonus {
    /// Window opens `appears_after` seconds into the round and stays open for
    /// `bonus_visible_seconds`.
    pub fn new(spec: &BonusSpec, config: &Config) -> Self {
        let begin_time = config.playing_time() - config.ticks(spec.appears_after);
        let end_time = begin_time - config.ticks(config.bonus_visible_seconds);
        Bonus::with_window(spec.sprite, begin_time, end_time, config.points_bonus, config)
    }

    pub fn with_window(
        sprite: Sprite,
        begin_time: f64,
        end_time: f64,
        points: u32,
        config: &Config,
    ) -> Self {
        let altar = config.altar;
        let mut placement = Placement::default();
        placement.place(Position::new(-1.0, altar.row), ROW_OFFSET, config);
        Bonus {
            placement,
            sprite,
            altar,
            begin_time,
            end_time,
            points,
            earned: false,
            visible: false,
        }
    }

    pub fn begin_time(&self) -> f64 {
        self.begin_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_earned(&self) -> bool {
        self.earned
    }

    /// Recomputes visibility from the round clock and hands out the bonus
    /// when the player walks onto it. Returns true on pickup.
    pub fn update(&mut self, clock: &mut GameClock, player: &mut Player, config: &Config) -> bool {
        let timer = clock.timer();
        self.visible = !self.earned && timer <= self.begin_time && timer >= self.end_time;
        if !self.visible {
            return false;
        }

        self.placement.place(self.altar, ROW_OFFSET, config);
        if player.accepts_collisions()
            && collides(
                player.position(),
                self.placement.position(),
                config.collision_tolerance,
            )
        {
            log::info!("bonus {:?} collected for {} points", self.sprite, self.points);
            clock.add_points(self.points);
            self.earned = true;
            self.visible = false;
            player.push_bonus(config);
            return true;
        }
        false
    }

    /// Makes the bonus collectable again for a new round
    pub fn reset_bonus(&mut self) {
        self.earned = false;
        self.visible = false;
    }
}

impl Shape for Bonus {
    fn position(&self) -> Position {
        self.placement.position()
    }

    fn render(&self) -> Option<Drawable> {
        if !self.visible || self.earned {
            return None;
        }
        let point = self.placement.point();
        Some(Drawable {
            sprite: self.sprite,
            point: Point {
                x: point.x + COL_OFFSET,
                y: point.y,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::player::Command;
    use crate::sprite::state::StateTag;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playing(config: &Config) -> (GameClock, Player) {
        let mut clock = GameClock::new(config);
        let mut player = Player::new(config);
        player.begin_round(&mut clock, config);
        (clock, player)
    }

    /// Walks the player from the restart square (2, 5) up to the altar (2, 2)
    fn walk_to_altar(player: &mut Player, clock: &mut GameClock, config: &Config) {
        for _ in 0..3 {
            player.handle_input(Command::Up, clock, config);
        }
    }

    #[test]
    fn window_is_measured_from_round_start() {
        let config = Config::default();
        let bonus = Bonus::new(&config.bonuses[0], &config);
        assert_relative_eq!(bonus.begin_time(), 250.0);
        assert_relative_eq!(bonus.end_time(), 230.0);
    }

    #[test]
    fn hidden_outside_the_window() {
        let config = Config::default();
        let (mut clock, mut player) = playing(&config);
        let mut bonus = Bonus::with_window(Sprite::GemBlue, 100.0, 80.0, 100, &config);
        assert!(!bonus.update(&mut clock, &mut player, &config));
        assert!(!bonus.is_visible());
        assert!(bonus.render().is_none());

        clock.charge_time(19.0);
        assert!(!bonus.update(&mut clock, &mut player, &config));
        assert!(!bonus.is_visible());
    }

    #[test]
    fn visible_on_the_altar_inside_the_window() {
        let config = Config::default();
        let (mut clock, mut player) = playing(&config);
        let mut bonus = Bonus::with_window(Sprite::Key, 300.0, 280.0, 100, &config);
        bonus.update(&mut clock, &mut player, &config);
        assert!(bonus.is_visible());
        assert_eq!(bonus.position(), config.altar);
        let drawn = bonus.render().map(|d| d.point);
        assert_eq!(drawn, Some(Point { x: 222.0, y: 191.0 }));
    }

    #[test]
    fn collected_once_per_round() {
        let config = Config::default();
        let (mut clock, mut player) = playing(&config);
        let mut bonus = Bonus::with_window(Sprite::GemGreen, 100.0, 80.0, 100, &config);
        let mut rng = StdRng::seed_from_u64(7);

        clock.charge_time(20.0); // timer = 100
        walk_to_altar(&mut player, &mut clock, &config);
        let before = clock.score();
        assert!(bonus.update(&mut clock, &mut player, &config));
        assert!(bonus.is_earned());
        assert_eq!(clock.score(), before + 100);
        assert_eq!(player.state(), StateTag::Bonus);

        // let the bonus state run out, then stand on the altar again at timer=90
        while player.state() == StateTag::Bonus {
            player.update(0.1, &mut clock, &config, &mut rng);
        }
        walk_to_altar(&mut player, &mut clock, &config);
        let timer = clock.timer();
        assert!(timer <= 100.0 && timer >= 80.0);
        let score = clock.score();
        assert!(!bonus.update(&mut clock, &mut player, &config));
        assert_eq!(clock.score(), score);
        assert!(bonus.render().is_none());
    }

    #[test]
    fn reset_makes_it_collectable_again() {
        let config = Config::default();
        let (mut clock, mut player) = playing(&config);
        let mut bonus = Bonus::with_window(Sprite::GemOrange, 300.0, 280.0, 100, &config);
        walk_to_altar(&mut player, &mut clock, &config);
        assert!(bonus.update(&mut clock, &mut player, &config));
        bonus.reset_bonus();
        assert!(!bonus.is_earned());
        assert!(!bonus.is_visible());
    }
}
