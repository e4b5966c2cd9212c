//! Resource id generation
//!
//! The backend accepts client-chosen ids. Unique ids are built from the
//! current timestamp in hex followed by random hex padding, 20 characters in
//! total, so ids created in sequence sort roughly by creation time.

use chrono::Utc;
use uuid::Uuid;

const PADDING: usize = 7;

/// Generates a new unique id
pub fn unique() -> String {
    let now = Utc::now();
    let random = Uuid::new_v4().simple().to_string();

    format!(
        "{:x}{:05x}{}",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        &random[..PADDING]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_are_hex_and_distinct() {
        let a = unique();
        let b = unique();

        assert_ne!(a, b);
        assert_eq!(a.len(), 20);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
