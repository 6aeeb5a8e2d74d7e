use crate::app_dirs::AppDirs;
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, Result};
use std::path::{Path, PathBuf};

/// One finished game
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub played_at: DateTime<Local>,
    pub score: u32,
    pub words_cleared: u32,
    pub duration_secs: f64,
    pub vocabulary: String,
}

/// Database manager for game results
#[derive(Debug)]
pub struct ScoreDb {
    conn: Connection,
}

impl ScoreDb {
    /// Open the default database, creating directories and tables if needed
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("wordfall_scores.db"));
        Self::open(&db_path)
    }

    /// Open a database at an explicit path. Used by tests.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path.as_ref())
    }

    fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        let conn = Connection::open(db_path)?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS game_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                played_at TEXT NOT NULL,
                score INTEGER NOT NULL,
                words_cleared INTEGER NOT NULL,
                duration_secs REAL NOT NULL,
                vocabulary TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_game_results_played_at ON game_results(played_at)",
            [],
        )?;

        Ok(ScoreDb { conn })
    }

    /// Record one finished game
    pub fn record(&self, result: &ScoreRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO game_results (played_at, score, words_cleared, duration_secs, vocabulary)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                result.played_at.to_rfc3339(),
                result.score,
                result.words_cleared,
                result.duration_secs,
                result.vocabulary,
            ],
        )?;

        Ok(())
    }

    /// Highest score across all recorded games
    pub fn best_score(&self) -> Result<Option<u32>> {
        let mut stmt = self.conn.prepare("SELECT MAX(score) FROM game_results")?;
        let best: Option<u32> = stmt.query_row([], |row| row.get(0))?;
        Ok(best)
    }

    /// Most recent results, newest first. A negative limit returns everything.
    fn query_recent(&self, limit: i64) -> Result<Vec<ScoreRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT played_at, score, words_cleared, duration_secs, vocabulary
            FROM game_results
            ORDER BY played_at DESC
            LIMIT ?1
            "#,
        )?;

        let record_iter = stmt.query_map([limit], |row| {
            let played_at_str: String = row.get(0)?;
            let played_at = DateTime::parse_from_rfc3339(&played_at_str)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        0,
                        "played_at".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);

            Ok(ScoreRecord {
                played_at,
                score: row.get(1)?,
                words_cleared: row.get(2)?,
                duration_secs: row.get(3)?,
                vocabulary: row.get(4)?,
            })
        })?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        Ok(records)
    }

    /// Most recent results, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        self.query_recent(limit.min(i64::MAX as usize) as i64)
    }

    /// Every recorded result, newest first
    pub fn all(&self) -> Result<Vec<ScoreRecord>> {
        self.query_recent(-1)
    }

    /// Number of recorded games
    pub fn total_games(&self) -> Result<u32> {
        let mut stmt = self.conn.prepare("SELECT COUNT(*) FROM game_results")?;
        let count: u32 = stmt.query_row([], |row| row.get(0))?;
        Ok(count)
    }

    /// Export the full history as CSV, newest first
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let records = self.all()?;

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["played_at", "score", "words_cleared", "duration_secs", "vocabulary"])?;
        for record in &records {
            writer.write_record([
                record.played_at.to_rfc3339(),
                record.score.to_string(),
                record.words_cleared.to_string(),
                format!("{:.2}", record.duration_secs),
                record.vocabulary.clone(),
            ])?;
        }
        writer.flush()?;

        Ok(())
    }
}
