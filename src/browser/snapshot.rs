use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

/// Private copy of a browser cookie database.
///
/// Browsers keep their stores locked while running, so the database (and its
/// write-ahead log, if any) is copied and the copy is opened instead.
pub(crate) struct Snapshot {
    conn: Connection,
    _dir: TempDir,
}

impl Snapshot {
    pub(crate) fn open(store: &Path) -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create snapshot directory")?;
        let copy = dir.path().join("cookies.db");

        std::fs::copy(store, &copy)
            .with_context(|| format!("Failed to copy cookie store {:?}", store))?;

        let mut wal = store.as_os_str().to_owned();
        wal.push("-wal");
        let wal = Path::new(&wal);
        if wal.is_file() {
            std::fs::copy(wal, dir.path().join("cookies.db-wal"))
                .context("Failed to copy cookie store WAL")?;
        }

        let conn = Connection::open(&copy).context("Failed to open cookie store copy")?;
        Ok(Self { conn, _dir: dir })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
