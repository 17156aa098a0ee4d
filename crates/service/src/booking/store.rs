use crate::booking::domain::Record;
use crate::errors::ServiceError;
use async_trait::async_trait;

/// Trait abstraction for booking persistence.
/// `append` must be serialized against other appends; `list` returns
/// records in insertion order.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn append(&self, record: Record) -> Result<(), ServiceError>;
    async fn list(&self) -> Result<Vec<Record>, ServiceError>;
}
