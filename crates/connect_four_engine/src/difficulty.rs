use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// AI strength tier. `Default` is the tier handed to a side that has no
/// explicit difficulty (typically a human-controlled one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
    Default,
}

/// Search and evaluation parameters of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// Plies searched by `best_move`, counting the root move.
    pub depth: u32,
    /// Bonus per Yellow token in the center column.
    pub center_weight: i32,
    /// Subtracted from a window where the opponent holds three cells and the
    /// fourth is empty.
    pub opponent_three_penalty: i32,
    /// Halve the heuristic total.
    pub halve_score: bool,
}

// Indexed by `Difficulty as usize`
const PROFILES: [DifficultyProfile; 4] = [
    // Easy
    DifficultyProfile {
        depth: 3,
        center_weight: 2,
        opponent_three_penalty: 0,
        halve_score: true,
    },
    // Medium
    DifficultyProfile {
        depth: 4,
        center_weight: 3,
        opponent_three_penalty: 0,
        halve_score: false,
    },
    // Difficult
    DifficultyProfile {
        depth: 5,
        center_weight: 3,
        opponent_three_penalty: 4,
        halve_score: false,
    },
    // Default
    DifficultyProfile {
        depth: 3,
        center_weight: 0,
        opponent_three_penalty: 0,
        halve_score: false,
    },
];

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Difficult,
        Difficulty::Default,
    ];

    /// The tiers that play in a tournament.
    pub const AI_TIERS: [Difficulty; 3] =
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Difficult];

    pub fn profile(self) -> &'static DifficultyProfile {
        &PROFILES[self as usize]
    }

    pub fn depth(self) -> u32 {
        self.profile().depth
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Difficult => "difficult",
            Difficulty::Default => "default",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, difficult or default)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}
