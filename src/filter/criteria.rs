//! Filter criteria value objects
//!
//! The UI layer populates a [`FilterCriteria`] from its controls; the engine
//! only ever sees this value, never the controls themselves. Each field keeps
//! the string form its `<select>` option uses via `as_str` / `from_str`.

use serde::{Deserialize, Serialize};

use crate::catalog::GameRecord;

/// Player count filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayerCount {
    #[default]
    All,
    /// min_players <= n <= max_players
    Exactly(u32),
    /// "N+" option: max_players >= n
    AtLeast(u32),
}

impl PlayerCount {
    pub fn as_str(&self) -> String {
        match self {
            PlayerCount::All => "all".to_string(),
            PlayerCount::Exactly(n) => n.to_string(),
            PlayerCount::AtLeast(n) => format!("{n}+"),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.is_empty() {
            return Some(PlayerCount::All);
        }
        if let Some(n) = s.strip_suffix('+') {
            return n.parse().ok().map(PlayerCount::AtLeast);
        }
        s.parse().ok().map(PlayerCount::Exactly)
    }

    pub fn matches(&self, game: &GameRecord) -> bool {
        match *self {
            PlayerCount::All => true,
            PlayerCount::Exactly(n) => game.min_players <= n && n <= game.max_players,
            PlayerCount::AtLeast(n) => game.max_players >= n,
        }
    }
}

/// Play time partition: (0, 30], (30, 60], (60, inf)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeBucket {
    #[default]
    All,
    UpTo30,
    UpTo60,
    Over60,
}

impl TimeBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBucket::All => "all",
            TimeBucket::UpTo30 => "30",
            TimeBucket::UpTo60 => "60",
            TimeBucket::Over60 => "over60",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Some(TimeBucket::All),
            "30" => Some(TimeBucket::UpTo30),
            "60" => Some(TimeBucket::UpTo60),
            "over60" | "60+" => Some(TimeBucket::Over60),
            _ => None,
        }
    }

    /// Games with no number in their play time are never excluded
    pub fn matches(&self, game: &GameRecord) -> bool {
        let Some(minutes) = game.max_play_minutes() else {
            return true;
        };
        match self {
            TimeBucket::All => true,
            TimeBucket::UpTo30 => minutes <= 30,
            TimeBucket::UpTo60 => minutes > 30 && minutes <= 60,
            TimeBucket::Over60 => minutes > 60,
        }
    }
}

/// Difficulty partition: [0, 2), [2, 3), [3, 4), [4, 5]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyBucket {
    #[default]
    All,
    Easy,
    Normal,
    Hard,
    Expert,
}

impl DifficultyBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyBucket::All => "all",
            DifficultyBucket::Easy => "easy",
            DifficultyBucket::Normal => "normal",
            DifficultyBucket::Hard => "hard",
            DifficultyBucket::Expert => "expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Some(DifficultyBucket::All),
            "easy" => Some(DifficultyBucket::Easy),
            "normal" => Some(DifficultyBucket::Normal),
            "hard" => Some(DifficultyBucket::Hard),
            "expert" => Some(DifficultyBucket::Expert),
            _ => None,
        }
    }

    pub fn matches(&self, game: &GameRecord) -> bool {
        let d = game.difficulty;
        match self {
            DifficultyBucket::All => true,
            DifficultyBucket::Easy => d < 2.0,
            DifficultyBucket::Normal => (2.0..3.0).contains(&d),
            DifficultyBucket::Hard => (3.0..4.0).contains(&d),
            DifficultyBucket::Expert => d >= 4.0,
        }
    }
}

/// Ordering of the filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortMode {
    #[default]
    Name,
    DifficultyAsc,
    DifficultyDesc,
    /// Keeps the order of the shuffled source
    Random,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::DifficultyAsc => "difficulty-asc",
            SortMode::DifficultyDesc => "difficulty-desc",
            SortMode::Random => "random",
        }
    }

    /// Unknown values fall back to name order
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "difficulty-asc" => SortMode::DifficultyAsc,
            "difficulty-desc" => SortMode::DifficultyDesc,
            "random" => SortMode::Random,
            _ => SortMode::Name,
        }
    }
}

/// Everything the listing controls can express
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub player_count: PlayerCount,
    /// `None` = all genres
    pub genre: Option<String>,
    pub time: TimeBucket,
    pub difficulty: DifficultyBucket,
    /// Case-insensitive title substring
    pub search: String,
    pub sort: SortMode,
    pub wishlist_only: bool,
}

impl FilterCriteria {
    /// Lowercased, trimmed search text
    pub fn search_key(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// Apply one `key=value` setting using the control's string form.
    /// Returns false for unknown keys or values.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match key {
            "players" => PlayerCount::from_str(value)
                .map(|v| self.player_count = v)
                .is_some(),
            "genre" => {
                let value = value.trim();
                self.genre = if value.is_empty() || value.eq_ignore_ascii_case("all") {
                    None
                } else {
                    Some(value.to_string())
                };
                true
            }
            "time" => TimeBucket::from_str(value).map(|v| self.time = v).is_some(),
            "difficulty" => DifficultyBucket::from_str(value)
                .map(|v| self.difficulty = v)
                .is_some(),
            "search" => {
                self.search = value.to_string();
                true
            }
            "sort" => {
                self.sort = SortMode::from_str(value);
                true
            }
            "wishlist" => {
                self.wishlist_only = matches!(value, "1" | "true" | "on" | "yes");
                true
            }
            _ => false,
        }
    }
}
