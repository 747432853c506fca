//! Finished rounds of the current session

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Rounds kept before the oldest is dropped
pub const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub score: u32,
    pub level: u32,
    /// Caller clock when the round was reset
    pub ended_at: f64,
}

/// The last [`HISTORY_LEN`] rounds that scored, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundHistory {
    rounds: VecDeque<RoundRecord>,
}

impl RoundHistory {
    /// Log a finished round. Scoreless rounds are not kept.
    pub fn record(&mut self, score: u32, level: u32, ended_at: f64) {
        if score == 0 {
            return;
        }
        if self.rounds.len() == HISTORY_LEN {
            self.rounds.pop_front();
        }
        self.rounds.push_back(RoundRecord {
            score,
            level,
            ended_at,
        });
    }

    /// Highest scoring kept round; the earlier one wins a tie
    pub fn best(&self) -> Option<&RoundRecord> {
        self.rounds
            .iter()
            .reduce(|best, round| if round.score > best.score { round } else { best })
    }

    pub fn latest(&self) -> Option<&RoundRecord> {
        self.rounds.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.rounds.iter()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
