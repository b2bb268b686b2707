//! Entry store
//!
//! Track entries keyed by catalog uri. Upserting a known uri only restamps
//! its generation: the catalog is treated as immutable for a uri once first
//! seen. Nothing is ever deleted; stale entries drop out of the active view
//! through the generation filter alone.

use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use tracing::{debug, trace};

use crate::error::Result;
use crate::models::{Entry, Generation};
use crate::services::result_mapper::TrackItem;

/// Local persistent track collection
#[derive(Clone)]
pub struct EntryStore {
    pool: SqlitePool,
}

impl EntryStore {
    /// Wrap an initialized pool (see [`crate::db::init_database_pool`])
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store backed by a private in-memory database
    pub async fn in_memory() -> Result<Self> {
        Ok(Self::new(super::init_memory_pool().await?))
    }

    /// Insert `item` or restamp the existing entry with its uri
    ///
    /// Runs in one transaction: either the whole entry is written or
    /// nothing is.
    pub async fn upsert(
        &self,
        item: &TrackItem,
        generation: Generation,
        cover_override: Option<&str>,
    ) -> Result<Entry> {
        let mut tx = self.pool.begin().await?;

        let entry = match fetch_entry(&mut *tx, &item.uri).await? {
            Some(mut existing) => {
                sqlx::query("UPDATE entries SET last_seen_generation = ? WHERE uri = ?")
                    .bind(generation_to_db(generation))
                    .bind(&existing.uri)
                    .execute(&mut *tx)
                    .await?;
                trace!(uri = %existing.uri, generation = %generation, "Entry restamped");
                existing.last_seen_generation = generation;
                existing
            }
            None => {
                let entry = Entry::from_track(item, generation, cover_override);
                insert_entry(&mut *tx, &entry).await?;
                debug!(uri = %entry.uri, title = %entry.title, generation = %generation, "Entry created");
                entry
            }
        };

        tx.commit().await?;
        Ok(entry)
    }

    pub async fn lookup(&self, uri: &str) -> Result<Option<Entry>> {
        fetch_entry(&self.pool, uri).await
    }

    /// Entries visible at `generation`, in insertion order
    pub async fn entries_at(&self, generation: Generation) -> Result<Vec<Entry>> {
        let rows = sqlx::query(
            r#"
            SELECT uri, title, artist_display, duration_secs, playback_uri,
                   cover_url, external_url, last_seen_generation
            FROM entries
            WHERE last_seen_generation = ?
            ORDER BY rowid
            "#,
        )
        .bind(generation_to_db(generation))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// Total stored entries, stale ones included
    pub async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    /// Highest generation any stored entry carries
    pub async fn latest_generation(&self) -> Result<Generation> {
        let (max,): (Option<i64>,) =
            sqlx::query_as("SELECT MAX(last_seen_generation) FROM entries")
                .fetch_one(&self.pool)
                .await?;
        Ok(generation_from_db(max.unwrap_or(0)))
    }
}

async fn fetch_entry<'e, E>(executor: E, uri: &str) -> Result<Option<Entry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(
        r#"
        SELECT uri, title, artist_display, duration_secs, playback_uri,
               cover_url, external_url, last_seen_generation
        FROM entries
        WHERE uri = ?
        "#,
    )
    .bind(uri)
    .fetch_optional(executor)
    .await?;

    Ok(row.as_ref().map(entry_from_row))
}

async fn insert_entry<'e, E>(executor: E, entry: &Entry) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO entries (uri, title, artist_display, duration_secs, playback_uri,
                             cover_url, external_url, last_seen_generation)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.uri)
    .bind(&entry.title)
    .bind(&entry.artist_display)
    .bind(i64::from(entry.duration_secs))
    .bind(&entry.playback_uri)
    .bind(&entry.cover_url)
    .bind(&entry.external_url)
    .bind(generation_to_db(entry.last_seen_generation))
    .execute(executor)
    .await?;

    Ok(())
}

fn entry_from_row(row: &SqliteRow) -> Entry {
    let duration: i64 = row.get("duration_secs");
    let generation: i64 = row.get("last_seen_generation");

    Entry {
        uri: row.get("uri"),
        title: row.get("title"),
        artist_display: row.get("artist_display"),
        duration_secs: u32::try_from(duration).unwrap_or(0),
        playback_uri: row.get("playback_uri"),
        cover_url: row.get("cover_url"),
        external_url: row.get("external_url"),
        last_seen_generation: generation_from_db(generation),
    }
}

// SQLite integers are signed
fn generation_to_db(generation: Generation) -> i64 {
    i64::try_from(generation.value()).unwrap_or(i64::MAX)
}

fn generation_from_db(value: i64) -> Generation {
    Generation::new(u64::try_from(value).unwrap_or(0))
}
