use anyhow::{Context, Result};
use chrono::Local;
use log::warn;
use serde::{Deserialize, Serialize};

use super::store::Store;

/// Key the leaderboard is stored under
pub const LEADERBOARD_KEY: &str = "leaderboard.json";
/// Number of records kept
pub const MAX_ENTRIES: usize = 10;
/// Timestamp format of each record
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One leaderboard record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
    pub date: String,
}

/// Best scores, highest first, one record per player name (compared
/// case-insensitively). Stored as a flat JSON list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `store`; a missing or corrupt list yields an empty board
    pub fn load(store: &impl Store) -> Self {
        match Self::try_load(store) {
            Ok(board) => board,
            Err(err) => {
                warn!("Error loading leaderboard, starting empty: {err:#}");
                Self::default()
            }
        }
    }

    fn try_load(store: &impl Store) -> Result<Self> {
        let Some(text) = store.read(LEADERBOARD_KEY)? else {
            return Ok(Self::default());
        };
        let mut board: Leaderboard =
            serde_json::from_str(&text).context("Failed to parse leaderboard")?;
        board.normalize();
        Ok(board)
    }

    pub fn save(&self, store: &impl Store) -> Result<()> {
        let text = serde_json::to_string(self).context("Failed to serialize leaderboard")?;
        store.write(LEADERBOARD_KEY, &text)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record `score` for `username`, stamped with the local time
    pub fn add_score(&mut self, username: &str, score: u32) {
        let date = Local::now().format(DATE_FORMAT).to_string();
        self.add_score_at(username, score, date);
    }

    /// Record `score` with an explicit timestamp. An existing record for the
    /// same name (any case) is only replaced by a strictly higher score.
    pub fn add_score_at(&mut self, username: &str, score: u32, date: String) {
        let key = username.to_lowercase();
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.username.to_lowercase() == key)
        {
            Some(existing) => {
                if score > existing.score {
                    existing.score = score;
                    existing.date = date;
                }
            }
            None => self.entries.push(ScoreEntry {
                username: username.to_string(),
                score,
                date,
            }),
        }
        self.normalize();
    }

    /// Highest first, capped at MAX_ENTRIES. Ties keep insertion order.
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::persistence::store::BrokenStore;

    fn stamp() -> String {
        "2024-01-01 12:00".to_string()
    }

    #[test]
    fn test_case_insensitive_keep_max() {
        let mut board = Leaderboard::new();
        board.add_score("Alice", 50);
        board.add_score("alice", 80);

        assert_eq!(board.len(), 1);
        assert_eq!(board.entries()[0].score, 80);
        assert_eq!(board.entries()[0].username, "Alice");
    }

    #[test]
    fn test_lower_score_does_not_replace() {
        let mut board = Leaderboard::new();
        board.add_score_at("Bob", 90, "first".to_string());
        board.add_score_at("BOB", 40, "second".to_string());
        board.add_score_at("bob", 90, "third".to_string());

        assert_eq!(board.entries(), &[ScoreEntry {
            username: "Bob".to_string(),
            score: 90,
            date: "first".to_string(),
        }]);
    }

    #[test]
    fn test_higher_score_refreshes_date() {
        let mut board = Leaderboard::new();
        board.add_score_at("Bob", 10, "old".to_string());
        board.add_score_at("bob", 20, "new".to_string());

        assert_eq!(board.entries()[0].date, "new");
    }

    #[test]
    fn test_keeps_top_ten_descending() {
        let mut board = Leaderboard::new();
        for i in 0..11u32 {
            board.add_score_at(&format!("player{i}"), (i + 1) * 10, stamp());
        }

        assert_eq!(board.len(), MAX_ENTRIES);
        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
        assert!(board.entries().iter().all(|e| e.username != "player0"));
    }

    #[test]
    fn test_low_score_on_full_board_is_dropped() {
        let mut board = Leaderboard::new();
        for i in 0..10u32 {
            board.add_score_at(&format!("p{i}"), 100 + i, stamp());
        }
        board.add_score_at("late", 5, stamp());

        assert_eq!(board.len(), MAX_ENTRIES);
        assert!(board.entries().iter().all(|e| e.username != "late"));
    }

    #[test]
    fn test_date_format() {
        let mut board = Leaderboard::new();
        board.add_score("Dana", 30);

        let date = &board.entries()[0].date;
        assert!(chrono::NaiveDateTime::parse_from_str(date, DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut board = Leaderboard::new();
        board.add_score_at("Eve", 70, stamp());
        board.add_score_at("Finn", 90, stamp());
        board.save(&store).unwrap();

        let loaded = Leaderboard::load(&store);
        assert_eq!(loaded, board);
        assert_eq!(loaded.entries()[0].username, "Finn");
    }

    #[test]
    fn test_serialized_as_flat_list() {
        let mut board = Leaderboard::new();
        board.add_score_at("Gus", 10, stamp());

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"[{"username":"Gus","score":10,"date":"2024-01-01 12:00"}]"#);
    }

    #[test]
    fn test_corrupt_file_gives_empty_board() {
        let store = MemoryStore::new();
        store.write(LEADERBOARD_KEY, "not a list").unwrap();

        assert!(Leaderboard::load(&store).is_empty());
    }

    #[test]
    fn test_failed_save_keeps_board() {
        let mut board = Leaderboard::new();
        board.add_score_at("Gil", 40, stamp());

        assert!(board.save(&BrokenStore).is_err());
        assert_eq!(board.len(), 1);
        board.add_score_at("Hana", 60, stamp());
        assert_eq!(board.entries()[0].username, "Hana");
        assert!(Leaderboard::load(&BrokenStore).is_empty());
    }
}
