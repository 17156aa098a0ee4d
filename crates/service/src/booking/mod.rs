//! Booking domain: the record model, the store abstraction and the
//! submit/list flows the HTTP layer calls into.

pub mod domain;
pub mod service;
pub mod store;

pub use domain::Record;
pub use service::BookingService;
pub use store::BookingStore;
