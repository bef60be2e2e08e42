use std::str::FromStr;

use rocket::serde::{ser::SerializeMap, Serialize, Serializer};

/// Which standings `/leaderboard` serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaderboardPolicy {
    /// Best few scores per known game, only from the recent window.
    Windowed,
    /// Best scores across all games, regardless of age.
    Global,
}

impl FromStr for LeaderboardPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windowed" => Ok(Self::Windowed),
            "global" => Ok(Self::Global),
            other => Err(format!("unknown leaderboard policy: {}", other)),
        }
    }
}

/// A collection ranked from best to worst.
pub struct Leaderboard<T: LeaderboardItem> {
    collection: Vec<T>,
}

impl<T: LeaderboardItem> Leaderboard<T> {
    pub fn new(mut collection: Vec<T>) -> Self {
        // Stable, so equal ranks keep the order they were fetched in
        collection.sort_by(|a, b| a.rank().cmp(&b.rank()));
        Self { collection }
    }
}

#[cfg(test)]
impl<T: LeaderboardItem> Leaderboard<T> {
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.collection.iter()
    }
}

impl<T: LeaderboardItem> Serialize for Leaderboard<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.collection.serialize(serializer)
    }
}

/// Something that can be placed on a leaderboard.
/// Lower rank keys are better.
pub trait LeaderboardItem: Serialize {
    type Rank: Ord;

    fn rank(&self) -> Self::Rank;
}

/// Leaderboards keyed by game name, serialized as a JSON object
/// with the games in insertion order.
pub struct GameLeaderboards<T: LeaderboardItem> {
    boards: Vec<(String, Leaderboard<T>)>,
}

impl<T: LeaderboardItem> GameLeaderboards<T> {
    pub fn insert(&mut self, game_name: impl Into<String>, board: Leaderboard<T>) {
        let game_name = game_name.into();
        match self.boards.iter_mut().find(|(name, _)| *name == game_name) {
            Some((_, existing)) => *existing = board,
            None => self.boards.push((game_name, board)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, game_name: &str) -> Option<&Leaderboard<T>> {
        self.boards
            .iter()
            .find(|(name, _)| name == game_name)
            .map(|(_, board)| board)
    }
}

impl<T: LeaderboardItem> Default for GameLeaderboards<T> {
    fn default() -> Self {
        Self { boards: Vec::new() }
    }
}

impl<T: LeaderboardItem> Serialize for GameLeaderboards<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.boards.len()))?;
        for (game_name, board) in &self.boards {
            map.serialize_entry(game_name, board)?;
        }
        map.end()
    }
}

/// The body of a `/leaderboard` response.
#[derive(Serialize)]
#[serde(crate = "rocket::serde", untagged)]
pub enum Standings<T: LeaderboardItem> {
    PerGame(GameLeaderboards<T>),
    Global(Leaderboard<T>),
}
