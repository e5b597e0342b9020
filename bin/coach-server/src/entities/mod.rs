//! Database abstraction layer.
//!
//! [`TurnStore`] defines the interface for persisting conversation turns.
//! The default implementation is [`SqliteStore`]. To swap to another
//! database, implement [`TurnStore`] for the new type and change the concrete
//! type in [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures, so no extra
//! `async-trait` crate is required.

pub mod dao;
pub mod turn;

pub use dao::{ChatTurn, TurnRole};
pub use turn::TurnStore;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g. `"sqlite://career.db"`
    /// or `"sqlite::memory:"` for tests. A migration failure is returned to the
    /// caller, which aborts startup.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to `:memory:` is its own database, so tests get a
        // single long-lived connection.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
