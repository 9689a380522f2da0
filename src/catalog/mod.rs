//! Catalog store
//!
//! Holds the full list of game records for the session. Loaded once from the
//! remote collection and never mutated afterwards; every other component
//! refers to records by their `id`.

pub mod assets;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ShelfError};

pub use assets::{gradient_for, resolve_image};

static NUMBER_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static regex"));

/// A single game in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Empty when the source omits it; such records are dropped at load
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub min_players: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub max_players: u32,
    /// `None` when the stored value is the "not applicable" sentinel (0 or below)
    #[serde(default, deserialize_with = "best_players")]
    pub best_players: Option<u32>,
    /// Free text such as "30-60" or "about 45 minutes"
    #[serde(default)]
    pub play_time: String,
    /// 0.0 - 5.0
    #[serde(default, deserialize_with = "lenient_f64")]
    pub difficulty: f64,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub mechanism: Option<String>,
    /// Filenames or URLs, first one is the cover
    #[serde(default, alias = "image", deserialize_with = "image_list")]
    pub images: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Rich text (HTML)
    #[serde(default)]
    pub description: String,
    /// Comma separated expansion names
    #[serde(default)]
    pub expansion: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

impl GameRecord {
    /// Minimal record, mostly useful for tests and fixtures
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            min_players: 1,
            max_players: 1,
            best_players: None,
            play_time: String::new(),
            difficulty: 0.0,
            genre: None,
            mechanism: None,
            images: Vec::new(),
            icon: None,
            description: String::new(),
            expansion: None,
            average_rating: None,
            review_count: None,
        }
    }

    /// Shape check applied when the catalog is loaded
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && self.min_players <= self.max_players
    }

    /// Largest integer embedded in `play_time`, if any
    pub fn max_play_minutes(&self) -> Option<u32> {
        NUMBER_TOKEN
            .find_iter(&self.play_time)
            .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
            .max()
    }

    /// Expansion names, trimmed, empty entries dropped
    pub fn expansions(&self) -> Vec<&str> {
        self.expansion
            .as_deref()
            .map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// "2-4" or "2" when min == max
    pub fn player_range_label(&self) -> String {
        if self.min_players == self.max_players {
            self.min_players.to_string()
        } else {
            format!("{}-{}", self.min_players, self.max_players)
        }
    }

    /// Difficulty formatted the way the badges show it ("2.5/5")
    pub fn difficulty_label(&self) -> String {
        format!("{}/5", trim_float(self.difficulty))
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str).filter(|s| !s.is_empty())
    }
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", (value * 100.0).round() / 100.0)
    }
}

/// The session catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<GameRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build from fetched records, dropping malformed ones and duplicate ids
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for record in records {
            if !record.is_well_formed() {
                log::warn!("Skipping malformed record {:?}", record.id);
                continue;
            }
            if by_id.contains_key(&record.id) {
                log::warn!("Skipping duplicate record {:?}", record.id);
                continue;
            }
            by_id.insert(record.id.clone(), kept.len());
            kept.push(record);
        }

        log::info!("Catalog loaded with {} games", kept.len());
        Self {
            records: kept,
            by_id,
        }
    }

    /// Parse a JSON array of records. Elements that do not decode are
    /// skipped; only a non-array document is an error.
    pub fn from_json(json: &str) -> Result<Self> {
        let elements: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let records = elements
            .into_iter()
            .enumerate()
            .filter_map(|(i, element)| match serde_json::from_value(element) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping undecodable record #{i}: {e}");
                    None
                }
            })
            .collect();
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&GameRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Like [`Catalog::get`], as an error when the id is unknown
    pub fn require(&self, id: &str) -> Result<&GameRecord> {
        self.get(id).ok_or_else(|| ShelfError::NotFound(id.to_string()))
    }

    /// Position of `id` in load order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn record_at(&self, index: usize) -> Option<&GameRecord> {
        self.records.get(index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load-order indices in a seeded random order. Computed once at load for
    /// the random sort mode so that re-filtering keeps a stable order.
    pub fn shuffled_order(&self, seed: u64) -> Vec<usize> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..self.records.len()).collect();
        order.shuffle(&mut rng);
        order
    }

    /// All distinct genres, sorted, for populating the genre filter
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = self
            .records
            .iter()
            .filter_map(|r| r.genre.as_deref())
            .filter(|g| !g.is_empty())
            .collect();
        genres.sort_unstable();
        genres.dedup();
        genres
    }
}

fn lenient_number(value: Option<serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<f64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(de)?;
    Ok(lenient_number(value).filter(|v| v.is_finite()).unwrap_or(0.0))
}

fn lenient_u32<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<u32, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(de)?;
    Ok(lenient_number(value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v as u32)
        .unwrap_or(0))
}

fn best_players<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<u32>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(de)?;
    Ok(lenient_number(value)
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v as u32))
}

fn image_list<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(de)? {
        Some(OneOrMany::One(s)) if !s.is_empty() => vec![s],
        Some(OneOrMany::Many(v)) => v.into_iter().filter(|s| !s.is_empty()).collect(),
        _ => Vec::new(),
    })
}
