//! Standings and winner determination.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::player::{PlayerId, PlayerMap};

/// Players tied for the lead. Never more than the player cap.
pub type Leaders = SmallVec<[PlayerId; 5]>;

/// Result of a round or of the whole game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single player with strictly the most live cells.
    Winner(PlayerId),
    /// Several players share the highest count, in ascending id order.
    Draw(Leaders),
    /// Nobody has a live cell.
    #[default]
    NoSurvivors,
}

impl GameResult {
    /// Decide the leader from per-player live-cell counts.
    ///
    /// Players with zero cells never lead.
    #[must_use]
    pub fn from_counts(counts: &PlayerMap<usize>) -> Self {
        let best = counts.iter().map(|(_, &count)| count).max().unwrap_or(0);
        if best == 0 {
            return GameResult::NoSurvivors;
        }

        let leaders: Leaders = counts
            .iter()
            .filter(|&(_, &count)| count == best)
            .map(|(player, _)| player)
            .collect();

        if leaders.len() == 1 {
            GameResult::Winner(leaders[0])
        } else {
            GameResult::Draw(leaders)
        }
    }

    /// Check if a player won outright.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Every player sharing the lead; empty when nobody survived.
    #[must_use]
    pub fn leaders(&self) -> &[PlayerId] {
        match self {
            GameResult::Winner(p) => std::slice::from_ref(p),
            GameResult::Draw(ps) => ps,
            GameResult::NoSurvivors => &[],
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "Winner: {p}"),
            GameResult::Draw(ps) => {
                f.write_str("Draw between players ")?;
                for (i, p) in ps.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", p.tag())?;
                }
                Ok(())
            }
            GameResult::NoSurvivors => f.write_str("All life was lost"),
        }
    }
}
