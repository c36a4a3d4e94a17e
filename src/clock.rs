use crate::config::Config;

/// Round countdown and scores.
///
/// `timer` counts down in ticks while a round is live and is left alone
/// between rounds. `high_score` only moves at [`GameClock::end`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameClock {
    timer: f64,
    score: u32,
    high_score: u32,
    playing_time: f64,
    ticks_per_second: f64,
}

impl GameClock {
    pub fn new(config: &Config) -> Self {
        GameClock {
            timer: 0.0,
            score: 0,
            high_score: 0,
            playing_time: config.playing_time(),
            ticks_per_second: config.ticks_per_second,
        }
    }

    pub fn begin(&mut self) {
        self.timer = self.playing_time;
        self.score = 0;
    }

    /// Deducts `dt` seconds worth of ticks and returns what is left. Once the
    /// timer has run out it stays put.
    pub fn charge_time(&mut self, dt: f64) -> f64 {
        self.timer = charge(self.timer, dt, self.ticks_per_second);
        self.timer
    }

    pub fn end(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whole seconds left on the round, as shown on the playing banner
    pub fn seconds_remaining(&self) -> i64 {
        (self.timer / self.ticks_per_second).round() as i64
    }
}

/// Shared countdown rule for the round clock and per-state timers.
pub(crate) fn charge(timer: f64, dt: f64, ticks_per_second: f64) -> f64 {
    if timer > 0.0 {
        timer - ticks_per_second * dt
    } else {
        timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn clock() -> GameClock {
        GameClock::new(&Config::default())
    }

    #[test]
    fn begin_resets_score_and_timer() {
        let mut clock = clock();
        clock.begin();
        clock.add_points(120);
        clock.charge_time(3.0);
        clock.begin();
        assert_eq!(clock.score(), 0);
        assert_relative_eq!(clock.timer(), 300.0);
    }

    #[test]
    fn charge_time_counts_ticks() {
        let mut clock = clock();
        clock.begin();
        assert_relative_eq!(clock.charge_time(0.5), 295.0);
        assert_eq!(clock.seconds_remaining(), 30);
    }

    #[test]
    fn charge_time_stops_after_expiry() {
        let mut clock = clock();
        clock.begin();
        let expired = clock.charge_time(31.0);
        assert!(expired <= 0.0);
        assert_relative_eq!(clock.charge_time(1.0), expired);
        assert_relative_eq!(clock.charge_time(0.25), expired);
    }

    #[test]
    fn end_keeps_the_best_score() {
        let mut clock = clock();
        clock.begin();
        clock.add_points(90);
        clock.end();
        assert_eq!(clock.high_score(), 90);

        clock.begin();
        clock.add_points(40);
        clock.end();
        assert_eq!(clock.high_score(), 90);

        clock.begin();
        clock.add_points(130);
        clock.end();
        assert_eq!(clock.high_score(), 130);
    }

    #[test]
    fn idle_clock_does_not_move_without_charges() {
        let mut clock = clock();
        clock.begin();
        clock.charge_time(1.0);
        let frozen = clock.timer();
        clock.end();
        assert_relative_eq!(clock.timer(), frozen);
    }
}
