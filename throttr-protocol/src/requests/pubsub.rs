//! Channel messaging: subscribe, unsubscribe, publish and the event push.

use crate::error::ProtocolError;
use crate::types::RequestType;
use crate::wire::{check_u8_len, check_value_len, WireReader, WireWriter};
use bytes::BytesMut;

short_field_request! {
    /// Starts delivery of a channel's messages to this connection.
    SubscribeRequest, RequestType::Subscribe, "subscribe", channel, channel_str,
    encode_subscribe, decode_subscribe
}

short_field_request! {
    /// Stops delivery of a channel's messages to this connection.
    UnsubscribeRequest, RequestType::Unsubscribe, "unsubscribe", channel, channel_str,
    encode_unsubscribe, decode_unsubscribe
}

/// Sends a message to every subscriber of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishRequest<'a> {
    pub channel: &'a [u8],
    pub value: &'a [u8],
}

impl<'a> PublishRequest<'a> {
    pub const HEADER_SIZE: usize = RequestType::Publish.header_size();

    pub fn from_buffer(buffer: &'a [u8]) -> Result<Self, ProtocolError> {
        let (channel, value) = read_channel_and_body(buffer, RequestType::Publish)?;
        Ok(Self { channel, value })
    }

    pub fn to_buffer(&self) -> Result<BytesMut, ProtocolError> {
        encode_publish(self.channel, self.value)
    }

    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.channel.len() + self.value.len()
    }

    pub fn channel_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.channel).ok()
    }
}

/// Encodes a `publish` request.
pub fn encode_publish<C: AsRef<[u8]>, V: AsRef<[u8]>>(
    channel: C,
    value: V,
) -> Result<BytesMut, ProtocolError> {
    write_channel_and_body(RequestType::Publish, channel.as_ref(), "value", value.as_ref())
}

/// Decodes a `publish` request.
pub fn decode_publish(buffer: &[u8]) -> Result<PublishRequest<'_>, ProtocolError> {
    PublishRequest::from_buffer(buffer)
}

/// Message pushed by the server to a subscriber of `channel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRequest<'a> {
    pub channel: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> EventRequest<'a> {
    pub const HEADER_SIZE: usize = RequestType::Event.header_size();

    pub fn from_buffer(buffer: &'a [u8]) -> Result<Self, ProtocolError> {
        let (channel, payload) = read_channel_and_body(buffer, RequestType::Event)?;
        Ok(Self { channel, payload })
    }

    pub fn to_buffer(&self) -> Result<BytesMut, ProtocolError> {
        encode_event(self.channel, self.payload)
    }

    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.channel.len() + self.payload.len()
    }

    pub fn channel_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.channel).ok()
    }
}

/// Encodes an `event` push.
pub fn encode_event<C: AsRef<[u8]>, P: AsRef<[u8]>>(
    channel: C,
    payload: P,
) -> Result<BytesMut, ProtocolError> {
    write_channel_and_body(RequestType::Event, channel.as_ref(), "payload", payload.as_ref())
}

/// Decodes an `event` push.
pub fn decode_event(buffer: &[u8]) -> Result<EventRequest<'_>, ProtocolError> {
    EventRequest::from_buffer(buffer)
}

// publish and event share: tag | channel_len:1 | body_len:V | channel | body
fn read_channel_and_body(
    buffer: &[u8],
    kind: RequestType,
) -> Result<(&[u8], &[u8]), ProtocolError> {
    let mut reader = WireReader::header(buffer, kind)?;
    let channel_len = reader.u8()? as usize;
    let body_len = reader.value_len()?;
    let channel = reader.bytes(channel_len)?;
    let body = reader.bytes(body_len)?;
    Ok((channel, body))
}

fn write_channel_and_body(
    kind: RequestType,
    channel: &[u8],
    body_field: &'static str,
    body: &[u8],
) -> Result<BytesMut, ProtocolError> {
    let channel_len = check_u8_len("channel", channel)?;
    let body_len = check_value_len(body_field, body)?;

    Ok(WireWriter::new(kind, channel.len() + body.len())
        .u8(channel_len)
        .value(body_len)
        .bytes(channel)
        .bytes(body)
        .finish())
}
