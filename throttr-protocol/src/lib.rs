//! # throttr-protocol
//!
//! Wire protocol for throttr, a rate-limiting and pub/sub server.
//!
//! This crate provides:
//! - Single-byte tag sets ([`RequestType`], [`TtlType`], [`AttributeType`], ...)
//! - Fixed header sizes per request kind
//! - Zero-copy request views decoded straight from a receive buffer
//! - Encoders producing the exact wire bytes for every request kind
//! - The [`RequestEntry`] value a server stores per key
//!
//! All multi-byte integers are little-endian. The width of quota, TTL and
//! length fields (`V`) is fixed at build time by the `value-u8`,
//! `value-u32` and `value-u64` features; without any of them it is `u16`.
//!
//! ```
//! use throttr_protocol::{decode_insert, encode_insert, TtlType};
//!
//! let buf = encode_insert(100, TtlType::Seconds, 60, "user:42").unwrap();
//! let request = decode_insert(&buf).unwrap();
//! assert_eq!(request.quota, 100);
//! assert_eq!(request.key, b"user:42");
//! ```

pub mod endian;
pub mod entry;
pub mod error;
pub mod key;
pub mod requests;
pub mod types;
pub mod value;
pub mod wire;

pub use endian::{from_little_endian, is_big_endian, to_little_endian, WireValue};
pub use entry::RequestEntry;
pub use error::{EntryError, ProtocolError};
pub use key::{RequestKey, RequestKeyHasher};
pub use requests::*;
pub use types::{AttributeType, ChangeType, EntryType, RequestType, TtlType};
pub use value::{ValueType, MAX_VALUE_LEN, VALUE_SIZE};
