use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

/// A cached/favorited lyrics lookup result. Logical identity is the
/// `(artist, title)` pair; `id` is a storage surrogate only.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: Option<i64>,
    pub artist: String,
    pub title: String,
    pub lyrics: String,
    pub cover_url: Option<String>,
    pub audio_url: Option<String>,
    pub is_favorite: bool,
}

/// Bumping this wipes the table on next open. The cache is disposable, so
/// destructive reset stands in for migrations.
const SCHEMA_VERSION: i32 = 1;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .context("read user_version")?;

        if version != 0 && version != SCHEMA_VERSION {
            tracing::warn!(version, "schema version mismatch, resetting song cache");
            self.conn
                .execute_batch("DROP TABLE IF EXISTS songs;")
                .context("drop songs")?;
        }

        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS songs (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  artist TEXT NOT NULL,
  title TEXT NOT NULL,
  lyrics TEXT NOT NULL,
  cover_url TEXT,
  audio_url TEXT,
  is_favorite INTEGER NOT NULL DEFAULT 1,
  UNIQUE(artist, title)
);
"#,
            )
            .context("init schema")?;

        self.conn
            .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
            .context("set user_version")?;
        Ok(())
    }

    pub fn find_by_key(&self, artist: &str, title: &str) -> anyhow::Result<Option<Song>> {
        self.conn
            .query_row(
                r#"
SELECT id, artist, title, lyrics, cover_url, audio_url, is_favorite
FROM songs WHERE artist=?1 AND title=?2 LIMIT 1
"#,
                params![artist, title],
                row_to_song,
            )
            .optional()
            .context("find song by key")
    }

    /// Replace-on-conflict by `(artist, title)`; the surrogate id of a
    /// replaced row is not preserved.
    pub fn upsert(&self, song: &Song) -> anyhow::Result<()> {
        self.conn
            .execute(
                r#"
INSERT INTO songs(artist, title, lyrics, cover_url, audio_url, is_favorite)
VALUES(?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(artist, title) DO UPDATE SET
  lyrics=excluded.lyrics,
  cover_url=excluded.cover_url,
  audio_url=excluded.audio_url,
  is_favorite=excluded.is_favorite
"#,
                params![
                    song.artist,
                    song.title,
                    song.lyrics,
                    song.cover_url,
                    song.audio_url,
                    song.is_favorite as i32
                ],
            )
            .context("upsert song")?;
        Ok(())
    }

    pub fn delete(&self, song: &Song) -> anyhow::Result<()> {
        match song.id {
            Some(id) => self
                .conn
                .execute("DELETE FROM songs WHERE id=?1", params![id]),
            None => self.conn.execute(
                "DELETE FROM songs WHERE artist=?1 AND title=?2",
                params![song.artist, song.title],
            ),
        }
        .context("delete song")?;
        Ok(())
    }

    /// All cached songs, most-recently-inserted first.
    pub fn list_all(&self) -> anyhow::Result<Vec<Song>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT id, artist, title, lyrics, cover_url, audio_url, is_favorite
FROM songs ORDER BY id DESC
"#,
        )?;

        let songs = stmt
            .query_map([], row_to_song)?
            .collect::<Result<Vec<_>, _>>()
            .context("list songs")?;
        Ok(songs)
    }
}

fn row_to_song(row: &rusqlite::Row<'_>) -> rusqlite::Result<Song> {
    let is_favorite: i32 = row.get(6)?;
    Ok(Song {
        id: Some(row.get(0)?),
        artist: row.get(1)?,
        title: row.get(2)?,
        lyrics: row.get(3)?,
        cover_url: row.get(4)?,
        audio_url: row.get(5)?,
        is_favorite: is_favorite != 0,
    })
}

// Simple way to use rusqlite from async tasks: open per-operation and run it
// on the blocking pool. Cache operations must never run on the UI loop.
#[derive(Debug, Clone)]
pub struct StorageHandle {
    path: PathBuf,
}

impl StorageHandle {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn open(&self) -> anyhow::Result<Storage> {
        Storage::open(&self.path)
    }

    pub async fn find_by_key(&self, artist: &str, title: &str) -> anyhow::Result<Option<Song>> {
        let h = self.clone();
        let (artist, title) = (artist.to_string(), title.to_string());
        tokio::task::spawn_blocking(move || h.open()?.find_by_key(&artist, &title))
            .await
            .context("join find_by_key")?
    }

    pub async fn upsert(&self, song: Song) -> anyhow::Result<()> {
        let h = self.clone();
        tokio::task::spawn_blocking(move || h.open()?.upsert(&song))
            .await
            .context("join upsert")?
    }

    pub async fn delete(&self, song: Song) -> anyhow::Result<()> {
        let h = self.clone();
        tokio::task::spawn_blocking(move || h.open()?.delete(&song))
            .await
            .context("join delete")?
    }

    pub async fn list_all(&self) -> anyhow::Result<Vec<Song>> {
        let h = self.clone();
        tokio::task::spawn_blocking(move || h.open()?.list_all())
            .await
            .context("join list_all")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(artist: &str, title: &str, lyrics: &str) -> Song {
        Song {
            id: None,
            artist: artist.into(),
            title: title.into(),
            lyrics: lyrics.into(),
            cover_url: None,
            audio_url: None,
            is_favorite: true,
        }
    }

    fn open_temp() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("songs.sqlite3")).unwrap();
        (dir, storage)
    }

    #[test]
    fn upsert_replaces_on_key_conflict() {
        let (_dir, storage) = open_temp();
        storage.upsert(&song("Queen", "Bohemian Rhapsody", "v1")).unwrap();
        storage.upsert(&song("Queen", "Bohemian Rhapsody", "v2")).unwrap();

        let all = storage.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].lyrics, "v2");
    }

    #[test]
    fn find_delete_roundtrip() {
        let (_dir, storage) = open_temp();
        storage.upsert(&song("Queen", "Bohemian Rhapsody", "Is this...")).unwrap();

        let found = storage.find_by_key("Queen", "Bohemian Rhapsody").unwrap().unwrap();
        assert!(found.is_favorite);
        assert!(found.id.is_some());

        // key lookup is case-sensitive as stored
        assert!(storage.find_by_key("queen", "Bohemian Rhapsody").unwrap().is_none());

        storage.delete(&found).unwrap();
        assert!(storage.find_by_key("Queen", "Bohemian Rhapsody").unwrap().is_none());
    }

    #[test]
    fn list_all_is_most_recent_first() {
        let (_dir, storage) = open_temp();
        storage.upsert(&song("A", "first", "")).unwrap();
        storage.upsert(&song("B", "second", "")).unwrap();
        storage.upsert(&song("C", "third", "")).unwrap();

        let titles: Vec<_> = storage.list_all().unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[test]
    fn schema_bump_resets_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.sqlite3");
        {
            let storage = Storage::open(&path).unwrap();
            storage.upsert(&song("A", "t", "")).unwrap();
            storage
                .conn
                .execute_batch("PRAGMA user_version = 99;")
                .unwrap();
        }
        let storage = Storage::open(&path).unwrap();
        assert!(storage.list_all().unwrap().is_empty());
    }
}
