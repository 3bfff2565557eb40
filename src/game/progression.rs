use log::{debug, info};
use rand::Rng;

use crate::models::{Direction, GameSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Not the prompted direction; nothing changes.
    Wrong,
    /// Correct; here is the next prompt.
    Next(Direction),
    /// Step finished. `sequence_advanced` tells the caller to persist settings.
    Reward { sequence_advanced: bool },
}

/// Arrow prompts and the per-step counter.
#[derive(Debug, Clone)]
pub struct Progression {
    current: Direction,
    completed: u32,
}

impl Progression {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            current: Direction::random(rng),
            completed: 0,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    /// Arrows completed in the current step.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Start over, e.g. when a new session begins.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.completed = 0;
        self.current = Direction::random(rng);
    }

    /// Draw the next prompt. Within a step it never repeats the previous one.
    pub fn next_prompt<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Direction {
        self.current = if self.completed > 0 {
            Direction::random_except(rng, self.current)
        } else {
            Direction::random(rng)
        };
        debug!("Prompt: {}", self.current);
        self.current
    }

    pub fn on_swipe<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        settings: &mut GameSettings,
        rng: &mut R,
    ) -> SwipeOutcome {
        debug!("Gesture {} (wanted {})", direction, self.current);
        if direction != self.current {
            return SwipeOutcome::Wrong;
        }

        self.completed += 1;
        let required = settings.current_arrow_count().max(1);
        if self.completed >= required {
            info!("Completed {} arrows, reward time", self.completed);
            self.completed = 0;
            let sequence_advanced = settings.advance_sequence();
            SwipeOutcome::Reward { sequence_advanced }
        } else {
            SwipeOutcome::Next(self.next_prompt(rng))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn follow(p: &mut Progression, settings: &mut GameSettings, rng: &mut StdRng) -> SwipeOutcome {
        let wanted = p.current();
        p.on_swipe(wanted, settings, rng)
    }

    #[test]
    fn test_reward_after_threshold() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut settings = GameSettings::default();
        let mut p = Progression::new(&mut rng);

        assert!(matches!(follow(&mut p, &mut settings, &mut rng), SwipeOutcome::Next(_)));
        assert!(matches!(follow(&mut p, &mut settings, &mut rng), SwipeOutcome::Next(_)));
        assert_eq!(p.completed(), 2);
        assert_eq!(
            follow(&mut p, &mut settings, &mut rng),
            SwipeOutcome::Reward {
                sequence_advanced: false
            }
        );
        assert_eq!(p.completed(), 0);
    }

    #[test]
    fn test_wrong_direction_is_ignored() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut settings = GameSettings::default();
        let mut p = Progression::new(&mut rng);
        let wanted = p.current();
        let wrong = Direction::random_except(&mut rng, wanted);

        assert_eq!(p.on_swipe(wrong, &mut settings, &mut rng), SwipeOutcome::Wrong);
        assert_eq!(p.current(), wanted);
        assert_eq!(p.completed(), 0);
    }

    #[test]
    fn test_next_prompt_differs_within_step() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut settings = GameSettings::default();
        settings.set_standard_arrow_count(20);
        let mut p = Progression::new(&mut rng);
        for _ in 0..19 {
            let before = p.current();
            match follow(&mut p, &mut settings, &mut rng) {
                SwipeOutcome::Next(next) => assert_ne!(next, before),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_sequence_steps_and_wraps() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut settings = GameSettings::default();
        settings.set_advanced(true);
        settings.advanced_sequence = vec![1, 2];
        let mut p = Progression::new(&mut rng);

        assert_eq!(
            follow(&mut p, &mut settings, &mut rng),
            SwipeOutcome::Reward {
                sequence_advanced: true
            }
        );
        assert_eq!(settings.current_sequence_index, 1);

        p.next_prompt(&mut rng);
        assert!(matches!(follow(&mut p, &mut settings, &mut rng), SwipeOutcome::Next(_)));
        assert!(matches!(
            follow(&mut p, &mut settings, &mut rng),
            SwipeOutcome::Reward { .. }
        ));
        assert_eq!(settings.current_sequence_index, 0);
    }
}
