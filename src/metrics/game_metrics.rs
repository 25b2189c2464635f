use std::time::{Duration, Instant};

use crate::game::{GameEvent, GameState};

/// Points awarded per food eaten
pub const FOOD_POINTS: u32 = 10;

/// Score and session stats, fed only by engine events
pub struct GameMetrics {
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    pub start_time: Instant,
    pub elapsed_time: Duration,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            score: 0,
            high_score: 0,
            games_played: 0,
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            running: false,
        }
    }

    pub fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::StateChanged(GameState::Started) => self.on_game_start(),
            GameEvent::StateChanged(GameState::Stopped) => self.on_game_over(),
            GameEvent::FoodEaten => self.score += FOOD_POINTS,
        }
    }

    /// Refresh the round clock; frozen once the round ends
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    fn on_game_start(&mut self) {
        self.score = 0;
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    fn on_game_over(&mut self) {
        self.update();
        self.running = false;
        self.games_played += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_round(metrics: &mut GameMetrics, foods: u32) {
        metrics.on_event(GameEvent::StateChanged(GameState::Started));
        for _ in 0..foods {
            metrics.on_event(GameEvent::FoodEaten);
        }
        metrics.on_event(GameEvent::StateChanged(GameState::Stopped));
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_food_scores_ten() {
        let mut metrics = GameMetrics::new();
        metrics.on_event(GameEvent::StateChanged(GameState::Started));
        metrics.on_event(GameEvent::FoodEaten);
        metrics.on_event(GameEvent::FoodEaten);
        assert_eq!(metrics.score, 20);
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        play_round(&mut metrics, 1);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        play_round(&mut metrics, 0);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.score, 0);
        assert_eq!(metrics.games_played, 2);

        play_round(&mut metrics, 3);
        assert_eq!(metrics.high_score, 30); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.on_event(GameEvent::StateChanged(GameState::Started));
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_event(GameEvent::StateChanged(GameState::Started));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_clock_freezes_after_round() {
        let mut metrics = GameMetrics::new();
        play_round(&mut metrics, 0);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }
}
