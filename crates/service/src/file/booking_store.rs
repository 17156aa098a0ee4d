use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::booking::{BookingStore, Record};
use crate::errors::ServiceError;
use crate::storage::json_array_store::JsonArrayStore;

/// File-backed booking store: the whole collection is one JSON array.
#[derive(Clone)]
pub struct FileBookingStore {
    store: Arc<JsonArrayStore<Record>>,
}

impl FileBookingStore {
    /// Initialize the store for the given file path. The file is created on
    /// the first successful submission.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonArrayStore::<Record>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

#[async_trait::async_trait]
impl BookingStore for FileBookingStore {
    async fn append(&self, record: Record) -> Result<(), ServiceError> {
        self.store.append(record).await.map(|_| ())
    }

    async fn list(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(self.store.list().await)
    }
}
