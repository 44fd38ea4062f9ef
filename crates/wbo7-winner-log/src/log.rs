//! [`CsvWinnerLog`] — the CSV implementation of [`WinnerLog`].

use std::{
  fs::{File, OpenOptions},
  io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
};

use wbo7_core::winner::{WinnerLog, WinnerRow};

use crate::{Error, Result};

/// Column names of the header row, in order.
pub const HEADER: [&str; 5] = ["Date", "Name", "NationalId", "Email", "BetNumber"];

/// A winner log stored as a CSV file at a fixed path.
///
/// Cloning is cheap and clones share the writer lock.
#[derive(Debug, Clone)]
pub struct CsvWinnerLog {
  path: Arc<PathBuf>,
  lock: Arc<Mutex<()>>,
}

impl CsvWinnerLog {
  /// Point at `path`. Nothing is created until the first append.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: Arc::new(path.into()),
      lock: Arc::new(Mutex::new(())),
    }
  }

  pub fn path(&self) -> &Path { &self.path }
}

fn append_rows(path: &Path, rows: &[WinnerRow]) -> Result<()> {
  let file = OpenOptions::new().create(true).append(true).open(path)?;
  let needs_header = file.metadata()?.len() == 0;

  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(file);

  if needs_header {
    writer.write_record(HEADER)?;
  }
  for row in rows {
    writer.serialize(row)?;
  }

  writer.flush()?;
  writer.get_ref().sync_all()?;
  Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<WinnerRow>> {
  let file = match File::open(path) {
    Ok(f) => f,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(e) => return Err(e.into()),
  };

  let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
  let mut rows = Vec::new();
  for record in reader.deserialize::<WinnerRow>() {
    match record {
      Ok(row) => rows.push(row),
      Err(e) if e.is_io_error() => return Err(e.into()),
      // Hand-edited files may carry rows we cannot read; keep the rest.
      Err(e) => tracing::warn!(
        path = %path.display(),
        line = e.position().map(|p| p.line()),
        error = %e,
        "skipping unreadable winner log row"
      ),
    }
  }
  Ok(rows)
}

// ─── WinnerLog impl ──────────────────────────────────────────────────────────

impl WinnerLog for CsvWinnerLog {
  type Error = Error;

  async fn append_winners(&self, rows: Vec<WinnerRow>) -> Result<()> {
    if rows.is_empty() {
      return Ok(());
    }

    let path = Arc::clone(&self.path);
    let lock = Arc::clone(&self.lock);
    let count = rows.len();

    tokio::task::spawn_blocking(move || {
      let _guard = lock.lock().map_err(|_| Error::LockPoisoned)?;
      append_rows(&path, &rows)
    })
    .await??;

    tracing::info!(count, path = %self.path.display(), "appended winners");
    Ok(())
  }

  async fn read_all(&self) -> Result<Vec<WinnerRow>> {
    let path = Arc::clone(&self.path);
    let lock = Arc::clone(&self.lock);

    tokio::task::spawn_blocking(move || {
      let _guard = lock.lock().map_err(|_| Error::LockPoisoned)?;
      read_rows(&path)
    })
    .await?
  }
}
