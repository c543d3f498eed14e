//! Static level table keyed on total completions.

use serde::Serialize;

/// One tier of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    pub number: u32,
    pub title: &'static str,
    pub required_completions: u32,
    pub quote: &'static str,
}

pub const LEVELS: [Level; 8] = [
    Level {
        number: 1,
        title: "Beginner",
        required_completions: 0,
        quote: "Every action is a vote for the type of person you wish to become.",
    },
    Level {
        number: 2,
        title: "Apprentice",
        required_completions: 10,
        quote: "You do not rise to the level of your goals. You fall to the level of your systems.",
    },
    Level {
        number: 3,
        title: "Dedicated",
        required_completions: 30,
        quote: "Habits are the compound interest of self-improvement.",
    },
    Level {
        number: 4,
        title: "Consistent Creator",
        required_completions: 75,
        quote: "The most effective way to change your habits is to focus on who you wish to become.",
    },
    Level {
        number: 5,
        title: "Habit Master",
        required_completions: 150,
        quote: "Success is the product of daily habits, not once-in-a-lifetime transformations.",
    },
    Level {
        number: 6,
        title: "Discipline Expert",
        required_completions: 300,
        quote: "You should be far more concerned with your current trajectory than with your current results.",
    },
    Level {
        number: 7,
        title: "Lifestyle Architect",
        required_completions: 500,
        quote: "Environment is the invisible hand that shapes human behavior.",
    },
    Level {
        number: 8,
        title: "Legend",
        required_completions: 1000,
        quote: "The ultimate form of intrinsic motivation is when a habit becomes part of your identity.",
    },
];

impl Level {
    /// Highest tier whose threshold is at or below `completions`.
    pub fn current(completions: u32) -> Level {
        LEVELS
            .iter()
            .take_while(|level| completions >= level.required_completions)
            .last()
            .copied()
            .unwrap_or(LEVELS[0])
    }

    /// The tier after `self`, or `None` at the top.
    pub fn next(&self) -> Option<Level> {
        LEVELS.iter().find(|l| l.number == self.number + 1).copied()
    }

    /// Linear position between the current and next thresholds; 1.0 at the top.
    pub fn progress(completions: u32) -> f64 {
        let current = Self::current(completions);
        match current.next() {
            Some(next) => {
                let into_level = completions - current.required_completions;
                let span = next.required_completions - current.required_completions;
                f64::from(into_level) / f64::from(span)
            }
            None => 1.0,
        }
    }

    /// Completions still needed for the next tier (0 at the top).
    pub fn completions_to_next(completions: u32) -> u32 {
        Self::current(completions)
            .next()
            .map(|next| next.required_completions.saturating_sub(completions))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_lowest_tier() {
        let level = Level::current(0);
        assert_eq!(level.number, 1);
        assert_eq!(level.title, "Beginner");
        assert_eq!(Level::progress(0), 0.0);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(Level::current(9).number, 1);
        assert_eq!(Level::current(10).number, 2);
        assert_eq!(Level::current(74).number, 3);
        assert_eq!(Level::current(75).number, 4);
    }

    #[test]
    fn progress_interpolates() {
        assert_eq!(Level::progress(20), 0.5);
        assert_eq!(Level::completions_to_next(20), 10);
    }

    #[test]
    fn top_tier_is_complete() {
        for total in [1000, 1001, 50_000] {
            assert_eq!(Level::current(total).title, "Legend");
            assert_eq!(Level::progress(total), 1.0);
            assert_eq!(Level::completions_to_next(total), 0);
        }
    }
}
