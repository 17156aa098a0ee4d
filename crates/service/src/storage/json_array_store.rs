use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{
    ser::{PrettyFormatter, Serializer},
    Value,
};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{debug, error, info, warn};

use crate::errors::ServiceError;

/// Why a load fell back to an empty collection. Only used for log context.
#[derive(Debug)]
enum StoreReadIssue {
    Io(std::io::Error),
    Malformed(serde_json::Error),
}

/// Generic JSON file-backed array store.
///
/// The whole collection lives in one file as a JSON array and is re-read on
/// every access, so manual edits to the file are picked up. Mutations hold the
/// write half of an `RwLock` across load-modify-save; listings hold the read
/// half, so readers run in parallel but never observe a half-finished append.
///
/// Appends work on the raw JSON entries, so an entry that no longer decodes
/// as `T` is hidden from listings but kept on disk.
pub struct JsonArrayStore<T> {
    file_path: PathBuf,
    lock: RwLock<()>,
    _item: PhantomData<fn() -> T>,
}

impl<T> JsonArrayStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Initialize the store for a path. Creates the parent directory if missing;
    /// the file itself is only written on the first save.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = non_empty_parent(&file_path) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage_write("create data dir", e))?;
        }
        Ok(Arc::new(Self { file_path, lock: RwLock::new(()), _item: PhantomData }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the persisted collection. Never fails: a missing file is an empty
    /// collection, unreadable content or anything but a JSON array is logged
    /// and treated as empty, and single entries that don't decode as `T` are
    /// logged and skipped.
    pub async fn load(&self) -> Vec<T> {
        self.load_raw()
            .await
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(path = %self.file_path.display(), index, error = %e, "skipping undecodable entry");
                    None
                }
            })
            .collect()
    }

    async fn load_raw(&self) -> Vec<Value> {
        match self.read_entries().await {
            Ok(entries) => entries,
            Err(StoreReadIssue::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "data file not found; starting empty");
                Vec::new()
            }
            Err(StoreReadIssue::Io(e)) => {
                error!(path = %self.file_path.display(), error = %e, "error loading data");
                Vec::new()
            }
            Err(StoreReadIssue::Malformed(e)) => {
                warn!(
                    path = %self.file_path.display(),
                    error = %e,
                    "failed to decode JSON from the data file; discarding its content"
                );
                Vec::new()
            }
        }
    }

    async fn read_entries(&self) -> Result<Vec<Value>, StoreReadIssue> {
        let bytes = fs::read(&self.file_path).await.map_err(StoreReadIssue::Io)?;
        serde_json::from_slice(&bytes).map_err(StoreReadIssue::Malformed)
    }

    /// Overwrite the file with `items` via temp file + fsync + rename.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        self.write_atomic(&encode_pretty(items)?, items.len()).await
    }

    async fn write_atomic(&self, data: &[u8], count: usize) -> Result<(), ServiceError> {
        let tmp_path = self.temp_path();

        if let Err(e) = write_synced(&tmp_path, data).await {
            let _ = fs::remove_file(&tmp_path).await;
            error!(path = %self.file_path.display(), error = %e, "error saving data");
            return Err(ServiceError::storage_write("write temp file", e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.file_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            error!(path = %self.file_path.display(), error = %e, "error saving data");
            return Err(ServiceError::storage_write("replace data file", e));
        }
        // the new content is already visible; a failed dir sync only weakens crash durability
        if let Err(e) = sync_parent_dir(&self.file_path).await {
            warn!(path = %self.file_path.display(), error = %e, "could not sync data directory");
        }

        info!(path = %self.file_path.display(), count, "data successfully saved");
        Ok(())
    }

    /// All items in insertion order.
    pub async fn list(&self) -> Vec<T> {
        let _guard = self.lock.read().await;
        self.load().await
    }

    /// Append one item and persist; returns the new collection length.
    pub async fn append(&self, item: T) -> Result<usize, ServiceError> {
        let entry = serde_json::to_value(&item).map_err(|e| ServiceError::storage_write("encode data", e))?;
        let _guard = self.lock.write().await;
        let mut entries = self.load_raw().await;
        entries.push(entry);
        self.write_atomic(&encode_pretty(&entries)?, entries.len()).await?;
        Ok(entries.len())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data".to_string());
        self.file_path.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()))
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn encode_pretty<S: Serialize>(items: &[S]) -> Result<Vec<u8>, ServiceError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    items
        .serialize(&mut ser)
        .map_err(|e| ServiceError::storage_write("encode data", e))?;
    Ok(buf)
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let dir = non_empty_parent(path).unwrap_or_else(|| Path::new("."));
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
