//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed store that keeps a whole collection as
//! one JSON array and rewrites it atomically on every mutation.

pub mod json_array_store;
