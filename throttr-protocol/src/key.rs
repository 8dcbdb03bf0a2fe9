//! Content-addressed request keys.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault};

/// Borrowed key identifying a stored entry.
///
/// Equality and hashing look only at the key bytes, so two keys decoded from
/// different buffers compare and hash equal when their bytes match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestKey<'a> {
    key: &'a [u8],
}

impl<'a> RequestKey<'a> {
    pub fn new(key: &'a [u8]) -> Self {
        Self { key }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.key
    }

    /// The key as text, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.key).ok()
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Hash of the key under [`RequestKeyHasher`].
    pub fn hash_value(&self) -> u64 {
        RequestKeyHasher::default().hash_one(self)
    }
}

impl<'a> From<&'a str> for RequestKey<'a> {
    fn from(key: &'a str) -> Self {
        Self::new(key.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for RequestKey<'a> {
    fn from(key: &'a [u8]) -> Self {
        Self::new(key)
    }
}

impl AsRef<[u8]> for RequestKey<'_> {
    fn as_ref(&self) -> &[u8] {
        self.key
    }
}

impl Borrow<[u8]> for RequestKey<'_> {
    fn borrow(&self) -> &[u8] {
        self.key
    }
}

impl fmt::Debug for RequestKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.debug_tuple("RequestKey").field(&s).finish(),
            None => f.debug_tuple("RequestKey").field(&self.key).finish(),
        }
    }
}

/// Deterministic hasher for maps keyed by [`RequestKey`].
pub type RequestKeyHasher = BuildHasherDefault<DefaultHasher>;
