//! Turn History Queries
//!
//! Read-only access to the `turns` table the agent loop maintains in its
//! SQLite state database. The dashboard never writes and never migrates;
//! a database that does not exist yet simply means no turns were recorded.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

/// One processed turn, as recorded by the agent loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnRecord {
    pub ts: Option<String>,
    pub input_type: Option<String>,
    pub user_text: Option<String>,
    pub asr_text: Option<String>,
    pub telegram_reply: Option<String>,
    pub voice_reply: Option<String>,
    pub status: Option<String>,
}

/// Fetch the most recent `limit` turns, newest first.
///
/// A missing database file yields an empty history rather than an error.
pub fn fetch_turns(db_path: &Path, limit: i64) -> rusqlite::Result<Vec<TurnRecord>> {
    if !db_path.exists() {
        return Ok(Vec::new());
    }

    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut stmt = conn.prepare(
        "SELECT ts, input_type, user_text, asr_text, telegram_reply, voice_reply, status
         FROM turns
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit], |row| {
        Ok(TurnRecord {
            ts: row.get(0)?,
            input_type: row.get(1)?,
            user_text: row.get(2)?,
            asr_text: row.get(3)?,
            telegram_reply: row.get(4)?,
            voice_reply: row.get(5)?,
            status: row.get(6)?,
        })
    })?;

    rows.collect()
}
