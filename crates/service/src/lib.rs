//! Service layer for the booking API.
//! - `storage` holds the generic file-backed JSON array store.
//! - `booking` defines the record model, payload validation and the store trait.
//! - `file` wires the booking store onto a JSON file.

pub mod booking;
pub mod errors;
pub mod file;
pub mod storage;
