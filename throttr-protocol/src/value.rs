//! Width of the numeric fields on the wire.
//!
//! Quota, TTL, update values and every value-width size prefix share one
//! unsigned integer type, chosen at build time through Cargo features:
//!
//! | feature     | `ValueType` |
//! |-------------|-------------|
//! | (none)      | `u16`       |
//! | `value-u8`  | `u8`        |
//! | `value-u32` | `u32`       |
//! | `value-u64` | `u64`       |
//!
//! When several features are enabled the widest one wins.

use crate::endian::WireValue;

#[cfg(feature = "value-u64")]
pub type ValueType = u64;

#[cfg(all(feature = "value-u32", not(feature = "value-u64")))]
pub type ValueType = u32;

#[cfg(all(
    feature = "value-u8",
    not(any(feature = "value-u32", feature = "value-u64"))
))]
pub type ValueType = u8;

#[cfg(not(any(feature = "value-u8", feature = "value-u32", feature = "value-u64")))]
pub type ValueType = u16;

/// Size in bytes of a value-width field.
pub const VALUE_SIZE: usize = <ValueType as WireValue>::SIZE;

/// Largest byte length a value-width size prefix can describe.
pub const MAX_VALUE_LEN: usize = <ValueType as WireValue>::MAX_LEN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_size_matches_type() {
        assert_eq!(VALUE_SIZE, std::mem::size_of::<ValueType>());
    }

    #[test]
    fn test_max_value_len_matches_type() {
        assert_eq!(MAX_VALUE_LEN as u64, ValueType::MAX as u64);
    }

    #[cfg(not(any(feature = "value-u8", feature = "value-u32", feature = "value-u64")))]
    #[test]
    fn test_default_width_is_16_bits() {
        assert_eq!(VALUE_SIZE, 2);
        assert_eq!(MAX_VALUE_LEN, 65_535);
    }
}
