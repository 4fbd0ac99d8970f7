//! Async dataset loading
//!
//! `load_all` is the single join point before any density work: it reads
//! every file concurrently on the blocking pool, waits for all of them, and
//! only then reports either the tables (in request order) or the first
//! failure.

use crate::csv_reader::CsvTable;
use crate::reader::{IoError, IoResult};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

/// Load every CSV file, resolving once all loads have finished
pub async fn load_all<P: AsRef<Path>>(paths: &[P]) -> IoResult<Vec<CsvTable>> {
    let mut set = JoinSet::new();
    for (idx, path) in paths.iter().enumerate() {
        let path: PathBuf = path.as_ref().to_path_buf();
        set.spawn_blocking(move || {
            let result = CsvTable::open(&path);
            (idx, path, result)
        });
    }

    let mut slots: Vec<Option<IoResult<CsvTable>>> = (0..paths.len()).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        let (idx, path, result) = joined.map_err(|e| IoError::Join(e.to_string()))?;
        match &result {
            Ok(table) => tracing::info!(path = %path.display(), rows = table.len(), "loaded dataset"),
            Err(e) => tracing::error!(path = %path.display(), "failed to load dataset: {}", e),
        }
        slots[idx] = Some(result);
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(IoError::Join("load task vanished".to_string()))))
        .collect()
}

/// Load every CSV file and concatenate the rows into one table
pub async fn load_merged<P: AsRef<Path>>(paths: &[P]) -> IoResult<CsvTable> {
    let tables = load_all(paths).await?;
    Ok(CsvTable::merge(tables))
}
