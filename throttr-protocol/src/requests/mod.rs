//! Per-request wire layouts.
//!
//! Every message starts with its [`RequestType`](crate::RequestType) tag,
//! followed by a fixed header and then the variable fields in header order.
//! `V` is the configured value width ([`VALUE_SIZE`](crate::VALUE_SIZE)).
//!
//! ```text
//! insert       tag | quota:V | ttl_type:1 | ttl:V | key_len:1      | key
//! update       tag | attribute:1 | change:1 | value:V | key_len:1  | key
//! set          tag | ttl_type:1 | ttl:V | key_len:1 | value_len:V  | key, value
//! query        tag | key_len:1                                     | key
//! purge        tag | key_len:1                                     | key
//! get          tag | key_len:1                                     | key
//! stat         tag | key_len:1                                     | key
//! subscribe    tag | channel_len:1                                 | channel
//! unsubscribe  tag | channel_len:1                                 | channel
//! channel      tag | channel_len:1                                 | channel
//! publish      tag | channel_len:1 | value_len:V                   | channel, value
//! event        tag | channel_len:1 | buffer_len:V                  | channel, payload
//! connection   tag | id:16
//! list, info, stats, connections, channels, whoami: tag only
//! ```
//!
//! Decoding returns a view whose byte fields borrow from the input buffer.
//! Bytes past the end of the message are ignored.

/// Request made of the tag byte alone.
macro_rules! tag_only_request {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, $label:literal, $encode:ident, $decode:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {
            pub const HEADER_SIZE: usize = $kind.header_size();

            pub fn from_buffer(buffer: &[u8]) -> Result<Self, $crate::error::ProtocolError> {
                $crate::wire::WireReader::header(buffer, $kind)?;
                Ok($name)
            }

            pub fn to_buffer(&self) -> ::bytes::BytesMut {
                $encode()
            }

            pub fn encoded_len(&self) -> usize {
                Self::HEADER_SIZE
            }
        }

        #[doc = concat!("Encodes a `", $label, "` request.")]
        pub fn $encode() -> ::bytes::BytesMut {
            $crate::wire::WireWriter::new($kind, 0).finish()
        }

        #[doc = concat!("Decodes a `", $label, "` request.")]
        pub fn $decode(buffer: &[u8]) -> Result<$name, $crate::error::ProtocolError> {
            $name::from_buffer(buffer)
        }
    };
}

/// Request carrying one field with a one-byte length prefix.
macro_rules! short_field_request {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, $label:literal, $field:ident, $field_str:ident,
        $encode:ident, $decode:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a> {
            pub $field: &'a [u8],
        }

        impl<'a> $name<'a> {
            pub const HEADER_SIZE: usize = $kind.header_size();

            pub fn from_buffer(buffer: &'a [u8]) -> Result<Self, $crate::error::ProtocolError> {
                let mut reader = $crate::wire::WireReader::header(buffer, $kind)?;
                let len = reader.u8()? as usize;
                let $field = reader.bytes(len)?;
                Ok(Self { $field })
            }

            pub fn to_buffer(&self) -> Result<::bytes::BytesMut, $crate::error::ProtocolError> {
                $encode(self.$field)
            }

            pub fn encoded_len(&self) -> usize {
                Self::HEADER_SIZE + self.$field.len()
            }

            pub fn $field_str(&self) -> Option<&'a str> {
                std::str::from_utf8(self.$field).ok()
            }
        }

        #[doc = concat!("Encodes a `", $label, "` request.")]
        pub fn $encode<T: AsRef<[u8]>>(
            $field: T,
        ) -> Result<::bytes::BytesMut, $crate::error::ProtocolError> {
            let $field = $field.as_ref();
            let len = $crate::wire::check_u8_len(stringify!($field), $field)?;
            Ok($crate::wire::WireWriter::new($kind, $field.len())
                .u8(len)
                .bytes($field)
                .finish())
        }

        #[doc = concat!("Decodes a `", $label, "` request.")]
        pub fn $decode(buffer: &[u8]) -> Result<$name<'_>, $crate::error::ProtocolError> {
            $name::from_buffer(buffer)
        }
    };
}

/// Adds `request_key()` to views that carry a `key` field.
macro_rules! impl_request_key {
    ($($name:ident),+ $(,)?) => {$(
        impl<'a> $name<'a> {
            /// Lookup identity of the key this request targets.
            pub fn request_key(&self) -> $crate::key::RequestKey<'a> {
                $crate::key::RequestKey::new(self.key)
            }
        }
    )+};
}

mod admin;
mod keyed;
mod pubsub;
mod storage;

pub use admin::*;
pub use keyed::*;
pub use pubsub::*;
pub use storage::*;

#[cfg(all(test, not(feature = "value-u8")))]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::types::{AttributeType, ChangeType, RequestType, TtlType};
    use bytes::BytesMut;
    use uuid::Uuid;

    type Decode = fn(&[u8]) -> Result<(), ProtocolError>;

    fn sample(kind: RequestType, buf: BytesMut, decode: Decode) -> (RequestType, BytesMut, Decode) {
        (kind, buf, decode)
    }

    fn samples() -> Vec<(RequestType, BytesMut, Decode)> {
        let ch = "ch";
        vec![
            sample(
                RequestType::Insert,
                encode_insert(5000, TtlType::Milliseconds, 60000, "k").unwrap(),
                |b| decode_insert(b).map(drop),
            ),
            sample(RequestType::Query, encode_query("k").unwrap(), |b| {
                decode_query(b).map(drop)
            }),
            sample(
                RequestType::Update,
                encode_update(AttributeType::Ttl, ChangeType::Decrease, 3, "k").unwrap(),
                |b| decode_update(b).map(drop),
            ),
            sample(RequestType::Purge, encode_purge("k").unwrap(), |b| {
                decode_purge(b).map(drop)
            }),
            sample(
                RequestType::Set,
                encode_set(TtlType::Seconds, 10, "k", [1u8, 2, 3]).unwrap(),
                |b| decode_set(b).map(drop),
            ),
            sample(RequestType::Get, encode_get("k").unwrap(), |b| {
                decode_get(b).map(drop)
            }),
            sample(RequestType::List, encode_list(), |b| decode_list(b).map(drop)),
            sample(RequestType::Info, encode_info(), |b| decode_info(b).map(drop)),
            sample(RequestType::Stats, encode_stats(), |b| {
                decode_stats(b).map(drop)
            }),
            sample(RequestType::Stat, encode_stat("k").unwrap(), |b| {
                decode_stat(b).map(drop)
            }),
            sample(RequestType::Subscribe, encode_subscribe(ch).unwrap(), |b| {
                decode_subscribe(b).map(drop)
            }),
            sample(
                RequestType::Unsubscribe,
                encode_unsubscribe(ch).unwrap(),
                |b| decode_unsubscribe(b).map(drop),
            ),
            sample(
                RequestType::Publish,
                encode_publish(ch, b"hello").unwrap(),
                |b| decode_publish(b).map(drop),
            ),
            sample(RequestType::Connections, encode_connections(), |b| {
                decode_connections(b).map(drop)
            }),
            sample(
                RequestType::Connection,
                encode_connection(Uuid::from_bytes([0x7F; 16])),
                |b| decode_connection(b).map(drop),
            ),
            sample(RequestType::Channels, encode_channels(), |b| {
                decode_channels(b).map(drop)
            }),
            sample(RequestType::Channel, encode_channel(ch).unwrap(), |b| {
                decode_channel(b).map(drop)
            }),
            sample(RequestType::WhoAmI, encode_whoami(), |b| {
                decode_whoami(b).map(drop)
            }),
            sample(
                RequestType::Event,
                encode_event(ch, b"payload").unwrap(),
                |b| decode_event(b).map(drop),
            ),
        ]
    }

    #[test]
    fn test_every_kind_is_covered() {
        let kinds: Vec<_> = samples().into_iter().map(|(kind, _, _)| kind).collect();
        for kind in RequestType::ALL {
            assert!(kinds.contains(kind), "missing sample for {}", kind);
        }
    }

    #[test]
    fn test_tag_byte_leads_every_message() {
        for (kind, buf, _) in samples() {
            assert_eq!(buf[0], kind.as_u8(), "{}", kind);
            assert_eq!(RequestType::peek(&buf), Ok(kind));
            assert!(buf.len() >= kind.header_size());
        }
    }

    #[test]
    fn test_every_truncation_is_too_short() {
        for (kind, buf, decode) in samples() {
            assert_eq!(decode(&buf), Ok(()), "{}", kind);
            for n in 0..buf.len() {
                let result = decode(&buf[..n]);
                let is_too_short = matches!(
                    result,
                    Err(ProtocolError::TooShort { available, .. }) if available == n
                );
                assert!(
                    is_too_short,
                    "{} truncated to {} bytes gave {:?}",
                    kind,
                    n,
                    result
                );
            }
        }
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        for (kind, buf, decode) in samples() {
            let mut longer = buf.to_vec();
            longer.extend_from_slice(&[0xAA, 0xBB]);
            assert_eq!(decode(&longer), Ok(()), "{}", kind);
        }
    }

    #[test]
    fn test_decoders_reject_foreign_tags() {
        let samples = samples();
        for (kind, _, decode) in &samples {
            for (other, buf, _) in &samples {
                if other == kind {
                    continue;
                }
                // Pad so the size check passes and the tag check is reached.
                let mut padded = buf.to_vec();
                padded.resize(padded.len().max(64), 0);
                assert_eq!(
                    decode(&padded),
                    Err(ProtocolError::UnexpectedRequestType {
                        expected: *kind,
                        actual: other.as_u8()
                    }),
                    "{} decoder fed {}",
                    kind,
                    other
                );
            }
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        for (kind, buf, decode) in samples() {
            let mut bad = buf.to_vec();
            bad[0] = 0xEE;
            assert_eq!(
                decode(&bad),
                Err(ProtocolError::InvalidTag {
                    field: "request_type",
                    value: 0xEE
                }),
                "{}",
                kind
            );
        }
    }
}
