//! Opaque typed payload

use serde::{Deserialize, Serialize};

/// Self-describing byte blob carrying an application message
///
/// `type_url` identifies the message type, `value` holds its encoded bytes.
/// An empty `value` is the absent byte sequence; an empty `type_url` means no
/// value has ever been written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedValue {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl TypedValue {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    /// True when the payload carries no type, i.e. it was never written
    pub fn is_empty(&self) -> bool {
        self.type_url.is_empty()
    }

    /// Type name with any `host/` prefix stripped from the URL
    pub fn type_name(&self) -> &str {
        match self.type_url.rfind('/') {
            Some(idx) => &self.type_url[idx + 1..],
            None => &self.type_url,
        }
    }
}
