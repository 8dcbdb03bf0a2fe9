//! Host to wire byte order.
//!
//! Every multi-byte integer on the wire is little-endian. This module is
//! the only place host byte order is looked at: [`WireValue::read_le`] and
//! [`WireValue::put_le`] go through [`to_little_endian`] and
//! [`from_little_endian`], and the codec only ever reads and writes
//! integers through those two methods.

use bytes::BufMut;
use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// Unsigned integer that can appear as a fixed-width wire field.
pub trait WireValue: Copy + Eq + Ord + fmt::Debug + fmt::Display + sealed::Sealed {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Largest length this type can describe when used as a size prefix.
    const MAX_LEN: usize;

    /// Reverses the byte order.
    fn swap_bytes(self) -> Self;

    /// Reads the value from the first `SIZE` bytes of `bytes`, which hold
    /// it in wire order. Returns `None` when fewer bytes are available.
    fn read_le(bytes: &[u8]) -> Option<Self>;

    /// Appends the value in wire order.
    fn put_le<B: BufMut>(self, buf: &mut B);

    /// Widens to `u64`.
    fn to_u64(self) -> u64;

    /// Narrows a length, failing when it does not fit.
    fn from_len(len: usize) -> Option<Self>;
}

macro_rules! impl_wire_value {
    ($($ty:ty),*) => {$(
        impl WireValue for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            const MAX_LEN: usize = if (<$ty>::MAX as u128) > (usize::MAX as u128) {
                usize::MAX
            } else {
                <$ty>::MAX as usize
            };

            #[inline]
            fn swap_bytes(self) -> Self {
                <$ty>::swap_bytes(self)
            }

            #[inline]
            fn read_le(bytes: &[u8]) -> Option<Self> {
                let raw: [u8; std::mem::size_of::<$ty>()] =
                    bytes.get(..Self::SIZE)?.try_into().ok()?;
                Some(from_little_endian(<$ty>::from_ne_bytes(raw)))
            }

            #[inline]
            fn put_le<B: BufMut>(self, buf: &mut B) {
                buf.put_slice(&to_little_endian(self).to_ne_bytes());
            }

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_len(len: usize) -> Option<Self> {
                <$ty>::try_from(len).ok()
            }
        }
    )*};
}

impl_wire_value!(u8, u16, u32, u64);

/// Returns whether the host stores integers most significant byte first.
#[inline]
pub const fn is_big_endian() -> bool {
    cfg!(target_endian = "big")
}

/// Converts a host-order integer into its little-endian wire form.
///
/// A byte swap on big-endian hosts, a no-op everywhere else (and always a
/// no-op for single-byte values).
#[inline]
pub fn to_little_endian<T: WireValue>(value: T) -> T {
    normalize(value, is_big_endian())
}

/// Converts a little-endian wire integer back into host order.
#[inline]
pub fn from_little_endian<T: WireValue>(value: T) -> T {
    // Swapping is an involution, so both directions are the same operation.
    normalize(value, is_big_endian())
}

#[inline]
fn normalize<T: WireValue>(value: T, host_is_big_endian: bool) -> T {
    if T::SIZE == 1 || !host_is_big_endian {
        value
    } else {
        value.swap_bytes()
    }
}
