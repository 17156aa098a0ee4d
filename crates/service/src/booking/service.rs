use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::booking::{BookingStore, Record};
use crate::errors::ServiceError;

/// Submit/list flows on top of a [`BookingStore`].
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Validate a raw submission body and append it to the collection.
    pub async fn submit(&self, payload: &Value) -> Result<Record, ServiceError> {
        info!(event = "booking_received", %payload, "received data");
        let record = Record::from_payload(payload).inspect_err(|e| {
            error!(event = "booking_rejected", %payload, reason = %e, "rejected submission");
        })?;
        self.store.append(record.clone()).await?;
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<Record>, ServiceError> {
        self.store.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::booking_store::FileBookingStore;
    use serde_json::json;

    async fn service() -> (BookingService, std::path::PathBuf) {
        let tmp = std::env::temp_dir().join(format!("svc_booking_flow_{}.json", uuid::Uuid::new_v4()));
        let store = FileBookingStore::new(&tmp).await.expect("store init");
        (BookingService::new(store), tmp)
    }

    #[tokio::test]
    async fn submit_then_list_round_trips_in_order() -> Result<(), anyhow::Error> {
        let (svc, tmp) = service().await;
        let payloads: Vec<Value> = (0..5)
            .map(|i| json!({"name": format!("guest-{i}"), "phone_number": "555", "date": "2024-05-01", "time": format!("1{i}:00")}))
            .collect();
        for p in &payloads {
            svc.submit(p).await?;
        }

        let listed: Vec<Value> = svc
            .list()
            .await?
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?;
        assert_eq!(listed, payloads);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn rejected_submissions_leave_collection_unchanged() -> Result<(), anyhow::Error> {
        let (svc, tmp) = service().await;
        svc.submit(&json!({"name": "Ana", "phone_number": "1", "date": "d", "time": "t"})).await?;

        let missing = svc.submit(&json!({"name": "Ben", "phone_number": "", "date": "d", "time": "t"})).await;
        assert!(matches!(missing, Err(ServiceError::MissingFields)));
        let not_object = svc.submit(&json!(["Ben"])).await;
        assert!(matches!(not_object, Err(ServiceError::InvalidFormat)));

        assert_eq!(svc.list().await?.len(), 1);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
