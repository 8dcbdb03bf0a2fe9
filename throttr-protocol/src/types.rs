//! Single-byte tag sets used on the wire.

use crate::error::ProtocolError;
use crate::value::{ValueType, VALUE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Defines a `#[repr(u8)]` tag enum with lossless byte conversions,
/// lowercase names for `Display`/`FromStr`, and the same names for serde.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// All variants in tag order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical wire byte.
            #[inline]
            pub const fn as_u8(self) -> u8 {
                self as u8
            }

            /// Lowercase protocol name.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = ProtocolError;

            #[inline]
            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok($name::$variant), )+
                    _ => Err(ProtocolError::InvalidTag {
                        field: $field,
                        value,
                    }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $( $text => Ok($name::$variant), )+
                    other => Err(format!("unknown {}: {}", $field, other)),
                }
            }
        }
    };
}

wire_enum! {
    /// Request kinds. Always the first byte of a message.
    RequestType, "request_type" {
        Insert = 0x01 => "insert",
        Query = 0x02 => "query",
        Update = 0x03 => "update",
        Purge = 0x04 => "purge",
        Set = 0x05 => "set",
        Get = 0x06 => "get",
        List = 0x07 => "list",
        Info = 0x08 => "info",
        Stat = 0x09 => "stat",
        Stats = 0x10 => "stats",
        Subscribe = 0x11 => "subscribe",
        Unsubscribe = 0x12 => "unsubscribe",
        Publish = 0x13 => "publish",
        Connections = 0x14 => "connections",
        Connection = 0x15 => "connection",
        Channels = 0x16 => "channels",
        Channel = 0x17 => "channel",
        WhoAmI = 0x18 => "whoami",
        /// Server to client push of a published message.
        Event = 0x19 => "event",
    }
}

wire_enum! {
    /// Kind of value held by a stored entry.
    EntryType, "entry_type" {
        /// Numeric quota.
        Counter = 0x00 => "counter",
        /// Opaque bytes.
        Raw = 0x01 => "raw",
    }
}

wire_enum! {
    /// Unit of a TTL magnitude.
    TtlType, "ttl_type" {
        Nanoseconds = 0x01 => "nanoseconds",
        Microseconds = 0x02 => "microseconds",
        Milliseconds = 0x03 => "milliseconds",
        Seconds = 0x04 => "seconds",
        Minutes = 0x05 => "minutes",
        Hours = 0x06 => "hours",
    }
}

wire_enum! {
    /// Field mutated by an update.
    AttributeType, "attribute" {
        Quota = 0x00 => "quota",
        Ttl = 0x01 => "ttl",
    }
}

wire_enum! {
    /// How an update mutates its attribute.
    ChangeType, "change" {
        Patch = 0x00 => "patch",
        Increase = 0x01 => "increase",
        Decrease = 0x02 => "decrease",
    }
}

impl RequestType {
    /// Reads the tag byte at the start of `buffer`.
    ///
    /// This is the primitive a dispatcher uses to choose a decoder.
    pub fn peek(buffer: &[u8]) -> Result<Self, ProtocolError> {
        match buffer.first() {
            Some(&tag) => Self::try_from(tag),
            None => Err(ProtocolError::too_short(1, 0)),
        }
    }

    /// Size of the fixed part of a message of this kind, tag included.
    pub const fn header_size(self) -> usize {
        match self {
            RequestType::Insert => 1 + VALUE_SIZE + 1 + VALUE_SIZE + 1,
            RequestType::Update => 1 + 1 + 1 + VALUE_SIZE + 1,
            RequestType::Set => 1 + 1 + VALUE_SIZE + 1 + VALUE_SIZE,
            RequestType::Publish | RequestType::Event => 1 + 1 + VALUE_SIZE,
            RequestType::Query
            | RequestType::Purge
            | RequestType::Get
            | RequestType::Stat
            | RequestType::Subscribe
            | RequestType::Unsubscribe
            | RequestType::Channel => 2,
            RequestType::Connection => 1 + 16,
            RequestType::List
            | RequestType::Info
            | RequestType::Stats
            | RequestType::Connections
            | RequestType::Channels
            | RequestType::WhoAmI => 1,
        }
    }
}

impl TtlType {
    /// Converts a TTL magnitude in this unit into a duration.
    pub fn to_duration(self, ttl: ValueType) -> Duration {
        let ttl = ttl as u64;
        match self {
            TtlType::Nanoseconds => Duration::from_nanos(ttl),
            TtlType::Microseconds => Duration::from_micros(ttl),
            TtlType::Milliseconds => Duration::from_millis(ttl),
            TtlType::Seconds => Duration::from_secs(ttl),
            TtlType::Minutes => Duration::from_secs(ttl.saturating_mul(60)),
            TtlType::Hours => Duration::from_secs(ttl.saturating_mul(3600)),
        }
    }
}
