//! KeePass-style identifiers: 16 bytes, standard base64

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use uuid::Uuid;

/// All-zero UUID. KeePass uses it for "not set" references such as the
/// recycle bin or the last selected group.
pub const PLACEHOLDER_UUID: &str = "AAAAAAAAAAAAAAAAAAAAAA==";

/// Fresh random identifier for a group or entry.
pub fn new_uuid() -> String {
    STANDARD.encode(Uuid::new_v4().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_placeholder_decodes_to_zero_bytes() {
        let bytes = STANDARD.decode(PLACEHOLDER_UUID).unwrap();
        assert_eq!(bytes, vec![0u8; 16]);
    }

    #[test]
    fn test_new_uuid_is_sixteen_bytes_and_unique() {
        let ids: HashSet<String> = (0..500).map(|_| new_uuid()).collect();
        assert_eq!(ids.len(), 500);
        for id in &ids {
            assert_eq!(id.len(), 24);
            assert_ne!(id, PLACEHOLDER_UUID);
        }
    }
}
