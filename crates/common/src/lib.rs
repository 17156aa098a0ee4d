//! Shared helpers for the booking API crates: logging setup and the small
//! wire types every layer agrees on.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_body_serializes_as_message_field() {
        let body = types::MessageBody::new("Missing data!");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Missing data!"}));
    }
}
