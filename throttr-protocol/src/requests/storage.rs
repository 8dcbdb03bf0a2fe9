//! Requests that create or mutate stored entries: insert, update, set.

use crate::error::ProtocolError;
use crate::types::{AttributeType, ChangeType, RequestType, TtlType};
use crate::value::ValueType;
use crate::wire::{check_u8_len, check_value_len, WireReader, WireWriter};
use bytes::BytesMut;

/// Creates a counter entry holding `quota`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertRequest<'a> {
    pub quota: ValueType,
    pub ttl_type: TtlType,
    pub ttl: ValueType,
    pub key: &'a [u8],
}

impl<'a> InsertRequest<'a> {
    pub const HEADER_SIZE: usize = RequestType::Insert.header_size();

    pub fn from_buffer(buffer: &'a [u8]) -> Result<Self, ProtocolError> {
        let mut reader = WireReader::header(buffer, RequestType::Insert)?;
        let quota = reader.value()?;
        let ttl_type = reader.tag()?;
        let ttl = reader.value()?;
        let key_len = reader.u8()? as usize;
        let key = reader.bytes(key_len)?;

        Ok(Self {
            quota,
            ttl_type,
            ttl,
            key,
        })
    }

    pub fn to_buffer(&self) -> Result<BytesMut, ProtocolError> {
        encode_insert(self.quota, self.ttl_type, self.ttl, self.key)
    }

    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.key.len()
    }

    pub fn key_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.key).ok()
    }
}

/// Encodes an `insert` request.
pub fn encode_insert<K: AsRef<[u8]>>(
    quota: ValueType,
    ttl_type: TtlType,
    ttl: ValueType,
    key: K,
) -> Result<BytesMut, ProtocolError> {
    let key = key.as_ref();
    let key_len = check_u8_len("key", key)?;

    Ok(WireWriter::new(RequestType::Insert, key.len())
        .value(quota)
        .u8(ttl_type.as_u8())
        .value(ttl)
        .u8(key_len)
        .bytes(key)
        .finish())
}

/// Decodes an `insert` request.
pub fn decode_insert(buffer: &[u8]) -> Result<InsertRequest<'_>, ProtocolError> {
    InsertRequest::from_buffer(buffer)
}

/// Mutates the quota or TTL of an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRequest<'a> {
    pub attribute: AttributeType,
    pub change: ChangeType,
    pub value: ValueType,
    pub key: &'a [u8],
}

impl<'a> UpdateRequest<'a> {
    pub const HEADER_SIZE: usize = RequestType::Update.header_size();

    pub fn from_buffer(buffer: &'a [u8]) -> Result<Self, ProtocolError> {
        let mut reader = WireReader::header(buffer, RequestType::Update)?;
        let attribute = reader.tag()?;
        let change = reader.tag()?;
        let value = reader.value()?;
        let key_len = reader.u8()? as usize;
        let key = reader.bytes(key_len)?;

        Ok(Self {
            attribute,
            change,
            value,
            key,
        })
    }

    pub fn to_buffer(&self) -> Result<BytesMut, ProtocolError> {
        encode_update(self.attribute, self.change, self.value, self.key)
    }

    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.key.len()
    }

    pub fn key_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.key).ok()
    }
}

/// Encodes an `update` request.
pub fn encode_update<K: AsRef<[u8]>>(
    attribute: AttributeType,
    change: ChangeType,
    value: ValueType,
    key: K,
) -> Result<BytesMut, ProtocolError> {
    let key = key.as_ref();
    let key_len = check_u8_len("key", key)?;

    Ok(WireWriter::new(RequestType::Update, key.len())
        .u8(attribute.as_u8())
        .u8(change.as_u8())
        .value(value)
        .u8(key_len)
        .bytes(key)
        .finish())
}

/// Decodes an `update` request.
pub fn decode_update(buffer: &[u8]) -> Result<UpdateRequest<'_>, ProtocolError> {
    UpdateRequest::from_buffer(buffer)
}

/// Creates a raw entry holding an opaque value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetRequest<'a> {
    pub ttl_type: TtlType,
    pub ttl: ValueType,
    pub key: &'a [u8],
    pub value: &'a [u8],
}

impl<'a> SetRequest<'a> {
    pub const HEADER_SIZE: usize = RequestType::Set.header_size();

    pub fn from_buffer(buffer: &'a [u8]) -> Result<Self, ProtocolError> {
        let mut reader = WireReader::header(buffer, RequestType::Set)?;
        let ttl_type = reader.tag()?;
        let ttl = reader.value()?;
        let key_len = reader.u8()? as usize;
        let value_len = reader.value_len()?;
        let key = reader.bytes(key_len)?;
        let value = reader.bytes(value_len)?;

        Ok(Self {
            ttl_type,
            ttl,
            key,
            value,
        })
    }

    pub fn to_buffer(&self) -> Result<BytesMut, ProtocolError> {
        encode_set(self.ttl_type, self.ttl, self.key, self.value)
    }

    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.key.len() + self.value.len()
    }

    pub fn key_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.key).ok()
    }
}

/// Encodes a `set` request.
pub fn encode_set<K: AsRef<[u8]>, V: AsRef<[u8]>>(
    ttl_type: TtlType,
    ttl: ValueType,
    key: K,
    value: V,
) -> Result<BytesMut, ProtocolError> {
    let key = key.as_ref();
    let value = value.as_ref();
    let key_len = check_u8_len("key", key)?;
    let value_len = check_value_len("value", value)?;

    Ok(WireWriter::new(RequestType::Set, key.len() + value.len())
        .u8(ttl_type.as_u8())
        .value(ttl)
        .u8(key_len)
        .value(value_len)
        .bytes(key)
        .bytes(value)
        .finish())
}

/// Decodes a `set` request.
pub fn decode_set(buffer: &[u8]) -> Result<SetRequest<'_>, ProtocolError> {
    SetRequest::from_buffer(buffer)
}

impl_request_key!(InsertRequest, UpdateRequest, SetRequest);
