//! Introspection requests about the server, its connections and channels.

use crate::error::ProtocolError;
use crate::types::RequestType;
use crate::wire::{WireReader, WireWriter};
use bytes::BytesMut;
use uuid::Uuid;

tag_only_request! {
    /// Lists every stored entry.
    ListRequest, RequestType::List, "list", encode_list, decode_list
}

tag_only_request! {
    /// Server-wide information.
    InfoRequest, RequestType::Info, "info", encode_info, decode_info
}

tag_only_request! {
    /// Read/write counters of every entry.
    StatsRequest, RequestType::Stats, "stats", encode_stats, decode_stats
}

tag_only_request! {
    /// Lists every open connection.
    ConnectionsRequest, RequestType::Connections, "connections",
    encode_connections, decode_connections
}

tag_only_request! {
    /// Lists every channel with subscribers.
    ChannelsRequest, RequestType::Channels, "channels", encode_channels, decode_channels
}

tag_only_request! {
    /// Identifier of the connection sending the request.
    WhoAmIRequest, RequestType::WhoAmI, "whoami", encode_whoami, decode_whoami
}

short_field_request! {
    /// Subscribers of one channel.
    ChannelRequest, RequestType::Channel, "channel", channel, channel_str,
    encode_channel, decode_channel
}

/// Details of one connection, addressed by its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub id: Uuid,
}

impl ConnectionRequest {
    pub const HEADER_SIZE: usize = RequestType::Connection.header_size();

    pub fn from_buffer(buffer: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = WireReader::header(buffer, RequestType::Connection)?;
        let id = Uuid::from_bytes(reader.array()?);
        Ok(Self { id })
    }

    pub fn to_buffer(&self) -> BytesMut {
        encode_connection(self.id)
    }

    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE
    }
}

/// Encodes a `connection` request.
pub fn encode_connection(id: Uuid) -> BytesMut {
    WireWriter::new(RequestType::Connection, 0)
        .bytes(id.as_bytes())
        .finish()
}

/// Decodes a `connection` request.
pub fn decode_connection(buffer: &[u8]) -> Result<ConnectionRequest, ProtocolError> {
    ConnectionRequest::from_buffer(buffer)
}
