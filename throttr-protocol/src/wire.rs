//! Bounds-checked field access shared by every request codec.
//!
//! Decoding goes through [`WireReader`], a cursor that checks the remaining
//! length before every read. Lengths taken from the buffer itself therefore
//! never index past its end: a short buffer yields
//! [`ProtocolError::TooShort`] with the total number of bytes the message
//! would have needed up to that point.
//!
//! Encoding validates every variable field with [`check_u8_len`] or
//! [`check_value_len`] before anything is allocated, then writes through
//! [`WireWriter`].

use crate::endian::WireValue;
use crate::error::ProtocolError;
use crate::types::RequestType;
use crate::value::{ValueType, MAX_VALUE_LEN};
use bytes::{BufMut, BytesMut};

/// Largest length a one-byte size prefix can describe.
pub const MAX_U8_LEN: usize = u8::MAX as usize;

/// Cursor over an untrusted input buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Checks the whole fixed header is present, then consumes and verifies
    /// the tag byte.
    pub fn header(buf: &'a [u8], kind: RequestType) -> Result<Self, ProtocolError> {
        let header_size = kind.header_size();
        if buf.len() < header_size {
            return Err(ProtocolError::too_short(header_size, buf.len()));
        }

        let mut reader = Self::new(buf);
        let tag = reader.u8()?;
        if tag != kind.as_u8() {
            return Err(match RequestType::try_from(tag) {
                Ok(_) => ProtocolError::UnexpectedRequestType {
                    expected: kind,
                    actual: tag,
                },
                Err(e) => e,
            });
        }
        Ok(reader)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consumes `len` bytes and returns them as a slice of the input.
    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or_else(|| ProtocolError::too_short(usize::MAX, self.buf.len()))?;
        let slice = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| ProtocolError::too_short(end, self.buf.len()))?;
        self.pos = end;
        Ok(slice)
    }

    pub fn u8(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.bytes(1)?[0])
    }

    /// Reads a fixed-size array.
    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], ProtocolError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    /// Reads a value-width integer.
    pub fn value(&mut self) -> Result<ValueType, ProtocolError> {
        self.int::<ValueType>()
    }

    /// Reads any wire integer in little-endian order.
    pub fn int<T: WireValue>(&mut self) -> Result<T, ProtocolError> {
        let raw = self.bytes(T::SIZE)?;
        T::read_le(raw).ok_or_else(|| ProtocolError::too_short(self.pos, self.buf.len()))
    }

    /// Reads a one-byte tag and converts it.
    pub fn tag<T>(&mut self) -> Result<T, ProtocolError>
    where
        T: TryFrom<u8, Error = ProtocolError>,
    {
        T::try_from(self.u8()?)
    }

    /// Reads a value-width field that is a length.
    pub fn value_len(&mut self) -> Result<usize, ProtocolError> {
        let len = self.value()?.to_u64();
        // Anything beyond usize can never fit in the buffer.
        Ok(usize::try_from(len).unwrap_or(usize::MAX))
    }
}

/// Checks a field that carries a one-byte length prefix.
pub fn check_u8_len(field: &'static str, data: &[u8]) -> Result<u8, ProtocolError> {
    u8::from_len(data.len()).ok_or(ProtocolError::FieldTooLarge {
        field,
        size: data.len(),
        max: MAX_U8_LEN,
    })
}

/// Checks a field that carries a value-width length prefix.
pub fn check_value_len(field: &'static str, data: &[u8]) -> Result<ValueType, ProtocolError> {
    ValueType::from_len(data.len()).ok_or(ProtocolError::FieldTooLarge {
        field,
        size: data.len(),
        max: MAX_VALUE_LEN,
    })
}

/// Output buffer sized up front for one message.
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    /// Starts a message of `kind` with room for `tail` variable bytes.
    pub fn new(kind: RequestType, tail: usize) -> Self {
        let mut buf = BytesMut::with_capacity(kind.header_size() + tail);
        buf.put_u8(kind.as_u8());
        Self { buf }
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.buf.put_u8(value);
        self
    }

    pub fn value(mut self, value: ValueType) -> Self {
        value.put_le(&mut self.buf);
        self
    }

    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.buf.put_slice(data);
        self
    }

    pub fn finish(self) -> BytesMut {
        self.buf
    }
}
