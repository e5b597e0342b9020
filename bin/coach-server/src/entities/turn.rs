use std::future::Future;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

use crate::entities::dao::{ChatTurn, TurnRole};
use crate::entities::SqliteStore;

pub trait TurnStore: Send + Sync + 'static {
    /// Insert one turn.
    fn append(&self, turn: ChatTurn) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Insert every turn in a single transaction: all rows land or none do.
    fn append_all(
        &self,
        turns: Vec<ChatTurn>,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// All turns of a session, oldest first. Unknown sessions yield an empty vec.
    fn list_by_session(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatTurn>, sqlx::Error>> + Send;
}

impl TurnStore for SqliteStore {
    async fn append(&self, turn: ChatTurn) -> Result<(), sqlx::Error> {
        insert_turn(&turn).execute(&self.pool).await?;
        Ok(())
    }

    async fn append_all(&self, turns: Vec<ChatTurn>) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for turn in &turns {
            // Dropping `tx` on an early return rolls the transaction back.
            insert_turn(turn).execute(&mut *tx).await?;
        }
        tx.commit().await
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<ChatTurn>, sqlx::Error> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, session_id, role, content, timestamp \
             FROM chat_history WHERE session_id = ?1 ORDER BY timestamp ASC, seq ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, session_id, role, content, timestamp)| {
                let role = match role.parse::<TurnRole>() {
                    Ok(role) => role,
                    Err(e) => {
                        tracing::warn!(turn_id = %id, error = %e, "skipping turn with unknown role");
                        return None;
                    }
                };
                let timestamp = match timestamp.parse::<DateTime<Utc>>() {
                    Ok(ts) => ts,
                    Err(e) => {
                        tracing::warn!(turn_id = %id, raw = %timestamp, error = %e, "skipping turn with unparsable timestamp");
                        return None;
                    }
                };
                Some(ChatTurn { id, session_id, role, content, timestamp })
            })
            .collect())
    }
}

/// Fixed-width RFC 3339 so lexical order in SQLite matches time order.
fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn insert_turn(turn: &ChatTurn) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    sqlx::query(
        "INSERT INTO chat_history (id, session_id, role, content, timestamp) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&turn.id)
    .bind(&turn.session_id)
    .bind(turn.role.as_str())
    .bind(&turn.content)
    .bind(encode_timestamp(&turn.timestamp))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
