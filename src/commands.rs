//! Command execution.

use crate::{Commands, EncodeCommand, Format};
use bytes::BytesMut;
use colored::Colorize;
use serde_json::{json, Map, Value};
use throttr_protocol::wire::WireReader;
use throttr_protocol::*;
use tracing::{debug, warn};

/// Executes a command and returns the formatted output.
pub fn execute(cmd: Commands, format: Format) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Encode { request } => {
            let buf = encode(request)?;
            let kind = RequestType::peek(&buf)?;
            debug!(%kind, bytes = buf.len(), "encoded request");
            Ok(format_encoded(kind, &buf, format))
        }

        Commands::Decode { hex } => {
            let buf = parse_hex(&hex)?;
            let report = describe(&buf)?;
            debug!(kind = %report.kind, bytes = report.size, "decoded request");
            if report.trailing > 0 {
                warn!(trailing = report.trailing, "ignoring bytes past the end of the message");
            }
            Ok(format_report(&report, format))
        }
    }
}

/// Builds the wire bytes of a request.
pub fn encode(request: EncodeCommand) -> Result<BytesMut, Box<dyn std::error::Error>> {
    let buf = match request {
        EncodeCommand::Insert {
            quota,
            ttl_type,
            ttl,
            key,
        } => encode_insert(quota, ttl_type, ttl, key)?,
        EncodeCommand::Update {
            attribute,
            change,
            value,
            key,
        } => encode_update(attribute, change, value, key)?,
        EncodeCommand::Set {
            ttl_type,
            ttl,
            hex_value,
            key,
            value,
        } => encode_set(ttl_type, ttl, key, payload_arg(&value, hex_value)?)?,
        EncodeCommand::Query { key } => encode_query(key)?,
        EncodeCommand::Purge { key } => encode_purge(key)?,
        EncodeCommand::Get { key } => encode_get(key)?,
        EncodeCommand::Stat { key } => encode_stat(key)?,
        EncodeCommand::Subscribe { channel } => encode_subscribe(channel)?,
        EncodeCommand::Unsubscribe { channel } => encode_unsubscribe(channel)?,
        EncodeCommand::Publish {
            hex_value,
            channel,
            value,
        } => encode_publish(channel, payload_arg(&value, hex_value)?)?,
        EncodeCommand::Event {
            hex_value,
            channel,
            payload,
        } => encode_event(channel, payload_arg(&payload, hex_value)?)?,
        EncodeCommand::Channel { channel } => encode_channel(channel)?,
        EncodeCommand::Connection { id } => {
            encode_connection(id.unwrap_or_else(uuid::Uuid::new_v4))
        }
        EncodeCommand::List => encode_list(),
        EncodeCommand::Info => encode_info(),
        EncodeCommand::Stats => encode_stats(),
        EncodeCommand::Connections => encode_connections(),
        EncodeCommand::Channels => encode_channels(),
        EncodeCommand::WhoAmI => encode_whoami(),
    };
    Ok(buf)
}

/// A decoded request, flattened for display.
#[derive(Debug)]
pub struct Report {
    pub kind: RequestType,
    /// Bytes the message occupies.
    pub size: usize,
    /// Bytes after the message.
    pub trailing: usize,
    pub fields: Vec<(&'static str, Value)>,
}

/// Decodes a message of any kind, dispatching on its tag byte.
pub fn describe(buf: &[u8]) -> Result<Report, ProtocolError> {
    let kind = RequestType::peek(buf)?;
    let (size, fields) = match kind {
        RequestType::Insert => {
            let r = decode_insert(buf)?;
            let fields = vec![
                ("quota", Value::from(r.quota)),
                ("ttl_type", Value::from(r.ttl_type.name())),
                ("ttl", Value::from(r.ttl)),
                ("key", bytes_value(r.key)),
            ];
            (r.encoded_len(), fields)
        }
        RequestType::Update => {
            let r = decode_update(buf)?;
            let fields = vec![
                ("attribute", Value::from(r.attribute.name())),
                ("change", Value::from(r.change.name())),
                ("value", Value::from(r.value)),
                ("key", bytes_value(r.key)),
            ];
            (r.encoded_len(), fields)
        }
        RequestType::Set => {
            let r = decode_set(buf)?;
            let fields = vec![
                ("ttl_type", Value::from(r.ttl_type.name())),
                ("ttl", Value::from(r.ttl)),
                ("key", bytes_value(r.key)),
                ("value", bytes_value(r.value)),
            ];
            (r.encoded_len(), fields)
        }
        RequestType::Query => {
            let r = decode_query(buf)?;
            (r.encoded_len(), vec![("key", bytes_value(r.key))])
        }
        RequestType::Purge => {
            let r = decode_purge(buf)?;
            (r.encoded_len(), vec![("key", bytes_value(r.key))])
        }
        RequestType::Get => {
            let r = decode_get(buf)?;
            (r.encoded_len(), vec![("key", bytes_value(r.key))])
        }
        RequestType::Stat => {
            let r = decode_stat(buf)?;
            (r.encoded_len(), vec![("key", bytes_value(r.key))])
        }
        RequestType::Subscribe => {
            let r = decode_subscribe(buf)?;
            (r.encoded_len(), vec![("channel", bytes_value(r.channel))])
        }
        RequestType::Unsubscribe => {
            let r = decode_unsubscribe(buf)?;
            (r.encoded_len(), vec![("channel", bytes_value(r.channel))])
        }
        RequestType::Channel => {
            let r = decode_channel(buf)?;
            (r.encoded_len(), vec![("channel", bytes_value(r.channel))])
        }
        RequestType::Publish => {
            let r = decode_publish(buf)?;
            let fields = vec![
                ("channel", bytes_value(r.channel)),
                ("value", bytes_value(r.value)),
            ];
            (r.encoded_len(), fields)
        }
        RequestType::Event => {
            let r = decode_event(buf)?;
            let fields = vec![
                ("channel", bytes_value(r.channel)),
                ("payload", bytes_value(r.payload)),
            ];
            (r.encoded_len(), fields)
        }
        RequestType::Connection => {
            let r = decode_connection(buf)?;
            (r.encoded_len(), vec![("id", Value::from(r.id.to_string()))])
        }
        RequestType::List
        | RequestType::Info
        | RequestType::Stats
        | RequestType::Connections
        | RequestType::Channels
        | RequestType::WhoAmI => (kind.header_size(), Vec::new()),
    };

    let mut reader = WireReader::new(buf);
    reader.bytes(size)?;
    Ok(Report {
        kind,
        size: reader.position(),
        trailing: reader.remaining(),
        fields,
    })
}

/// Parses a hex argument, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(arg: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = arg.split_whitespace().collect();
    let digits = digits.strip_prefix("0x").unwrap_or(&digits);
    hex::decode(digits)
}

fn payload_arg(arg: &str, is_hex: bool) -> Result<Vec<u8>, hex::FromHexError> {
    if is_hex {
        parse_hex(arg)
    } else {
        Ok(arg.as_bytes().to_vec())
    }
}

// Text when the bytes are UTF-8, hex otherwise.
fn bytes_value(data: &[u8]) -> Value {
    match std::str::from_utf8(data) {
        Ok(text) => Value::from(text),
        Err(_) => Value::from(format!("0x{}", hex::encode(data))),
    }
}

fn format_encoded(kind: RequestType, buf: &[u8], format: Format) -> String {
    match format {
        Format::Json => format_json(&json!({
            "kind": kind.name(),
            "size": buf.len(),
            "hex": hex::encode(buf),
        })),
        Format::Text => format!(
            "{} ({} bytes)\n{}",
            kind.name().cyan(),
            buf.len(),
            hex::encode(buf)
        ),
    }
}

fn format_report(report: &Report, format: Format) -> String {
    match format {
        Format::Json => {
            let fields: Map<String, Value> = report
                .fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect();
            format_json(&json!({
                "kind": report.kind.name(),
                "size": report.size,
                "trailing": report.trailing,
                "fields": fields,
            }))
        }
        Format::Text => {
            let mut output = format!(
                "{} ({} bytes)",
                report.kind.name().cyan().bold(),
                report.size
            );
            for (name, value) in &report.fields {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                output.push_str(&format!("\n  {}: {}", name, value.yellow()));
            }
            if report.trailing > 0 {
                output.push_str(&format!(
                    "\n{}",
                    format!("{} trailing bytes ignored", report.trailing).dimmed()
                ));
            }
            output
        }
    }
}

/// Formats JSON for display.
fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
