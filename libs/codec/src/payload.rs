//! Opaque payload codec
//!
//! Application messages travel as [`TypedValue`]s: a type URL plus the
//! message bytes. User types opt in through [`PayloadMessage`], usually via
//! [`impl_payload_message!`](crate::impl_payload_message), which encodes the
//! message with bincode and tags it with a fixed type name.
//!
//! ```rust
//! use codec::{impl_payload_message, unwrap, wrap};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! impl_payload_message!(Counter, "example.Counter");
//!
//! let packed = wrap(Some(&Counter { count: 3 })).unwrap().unwrap();
//! assert_eq!(packed.type_url, "type.googleapis.com/example.Counter");
//!
//! let mut counter = Counter::default();
//! unwrap(&packed, Some(&mut counter)).unwrap();
//! assert_eq!(counter.count, 3);
//! ```

use crate::constants::TYPE_URL_PREFIX;
use crate::error::{CodecError, CodecResult};
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use types::TypedValue;

/// A message that can be packed into and unpacked from a [`TypedValue`]
///
/// Object safe so effect tracking can take `&dyn PayloadMessage`.
pub trait PayloadMessage {
    /// Type name without URL prefix, e.g. `example.Counter`
    fn type_name(&self) -> &str;

    fn pack(&self) -> CodecResult<TypedValue>;

    /// Replace `self` with the message decoded from `value`
    fn unpack_into(&mut self, value: &TypedValue) -> CodecResult<()>;
}

/// A `TypedValue` packs to itself; there is no double wrapping
impl PayloadMessage for TypedValue {
    fn type_name(&self) -> &str {
        TypedValue::type_name(self)
    }

    fn pack(&self) -> CodecResult<TypedValue> {
        Ok(self.clone())
    }

    fn unpack_into(&mut self, value: &TypedValue) -> CodecResult<()> {
        self.clone_from(value);
        Ok(())
    }
}

/// Full type URL for a type name
pub fn type_url(type_name: &str) -> String {
    format!("{}{}", TYPE_URL_PREFIX, type_name)
}

/// Pack a message; an absent message packs to an absent payload
pub fn wrap(message: Option<&dyn PayloadMessage>) -> CodecResult<Option<TypedValue>> {
    message.map(|message| message.pack()).transpose()
}

/// Decode `payload` into `receiver`
///
/// Fails when there is no receiver, when the type URL does not match the
/// receiver's type, or when the bytes are corrupt. Callers that treat an
/// empty payload as "never written" must check [`TypedValue::is_empty`]
/// themselves before calling.
pub fn unwrap(payload: &TypedValue, receiver: Option<&mut dyn PayloadMessage>) -> CodecResult<()> {
    let receiver = receiver.ok_or(CodecError::NilReceiver)?;
    receiver.unpack_into(payload)
}

fn payload_options() -> impl Options {
    bincode::DefaultOptions::new().reject_trailing_bytes()
}

/// Encode a serde message under `type_name`; used by `impl_payload_message!`
pub fn pack_serde<T: Serialize + ?Sized>(type_name: &str, message: &T) -> CodecResult<TypedValue> {
    let value = payload_options()
        .serialize(message)
        .map_err(|e| CodecError::encode("payload message", e))?;
    Ok(TypedValue::new(type_url(type_name), value))
}

/// Decode a serde message after checking the payload carries `type_name`
pub fn unpack_serde<T: DeserializeOwned>(type_name: &str, value: &TypedValue) -> CodecResult<T> {
    let expected = type_url(type_name);
    if value.type_url != expected {
        return Err(CodecError::type_mismatch(expected, value.type_url.clone()));
    }
    payload_options()
        .deserialize(&value.value)
        .map_err(|e| CodecError::decode("payload message", e))
}

/// Implement [`PayloadMessage`] for a serde type under a fixed type name
///
/// ```rust
/// use codec::impl_payload_message;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Greeting {
///     greeting: String,
/// }
///
/// impl_payload_message!(Greeting, "example.Greeting");
/// ```
#[macro_export]
macro_rules! impl_payload_message {
    ($type:ty, $type_name:expr) => {
        impl $crate::PayloadMessage for $type {
            fn type_name(&self) -> &str {
                $type_name
            }

            fn pack(&self) -> $crate::CodecResult<$crate::TypedValue> {
                $crate::payload::pack_serde($type_name, self)
            }

            fn unpack_into(&mut self, value: &$crate::TypedValue) -> $crate::CodecResult<()> {
                *self = $crate::payload::unpack_serde($type_name, value)?;
                Ok(())
            }
        }
    };
}
