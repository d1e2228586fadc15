//! The streak path: a row of day cells leading to the next reward chests.

use serde::{Deserialize, Serialize};

/// Minimum number of cells on the path (three weeks).
const MIN_CELLS: u32 = 21;
/// Cells shown beyond the current streak.
const LOOKAHEAD: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Completed,
    /// The day the user is working towards.
    Next,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCell {
    pub day: u32,
    pub state: CellState,
    pub reward_day: bool,
}

impl PathCell {
    pub fn glyph(&self) -> String {
        match (self.reward_day, self.state) {
            (true, CellState::Completed) => "💎".to_string(),
            (true, _) => "🎁".to_string(),
            (false, CellState::Completed) => "✓".to_string(),
            (false, _) => self.day.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPath {
    pub streak: u32,
    pub cells: Vec<PathCell>,
}

impl StreakPath {
    pub fn build(streak: u32, milestone_interval: u32) -> Self {
        let len = MIN_CELLS.max(streak.saturating_add(LOOKAHEAD));
        let cells = (1..=len)
            .map(|day| PathCell {
                day,
                state: if day <= streak {
                    CellState::Completed
                } else if day == streak + 1 {
                    CellState::Next
                } else {
                    CellState::Upcoming
                },
                reward_day: milestone_interval > 0 && day % milestone_interval == 0,
            })
            .collect();
        Self { streak, cells }
    }

    pub fn headline(&self) -> String {
        match self.streak {
            0 => "Start your streak by completing today! A reward chest waits every few days."
                .to_string(),
            1 => "1-day streak. Keep going to unlock reward chests.".to_string(),
            n => format!("{n}-day streak! Keep going to unlock reward chests."),
        }
    }

    /// Days left until the next chest.
    pub fn days_to_next_reward(&self) -> Option<u32> {
        self.cells
            .iter()
            .find(|c| c.reward_day && c.state != CellState::Completed)
            .map(|c| c.day - self.streak)
    }
}
