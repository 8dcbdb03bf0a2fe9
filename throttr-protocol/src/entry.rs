//! Entry values materialized from `insert` and `set` requests.
//!
//! The entry map and expiry scheduling belong to the server. This module
//! fixes the shape of an entry and how an `update` request mutates it.
//!
//! Arithmetic on `increase`/`decrease` is checked: a result that does not
//! fit in [`ValueType`] (or an expiry instant the clock cannot represent)
//! fails with [`EntryError`] and leaves the entry untouched.

use crate::endian::WireValue;
use crate::error::EntryError;
use crate::requests::{InsertRequest, SetRequest, UpdateRequest};
use crate::types::{AttributeType, ChangeType, EntryType, TtlType};
use crate::value::{ValueType, VALUE_SIZE};
use std::time::{Duration, Instant};

/// A stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEntry {
    pub entry_type: EntryType,
    /// Counter entries hold their quota here in wire order.
    pub value: Vec<u8>,
    pub ttl_type: TtlType,
    pub expires_at: Instant,
}

impl RequestEntry {
    /// Creates a counter entry.
    pub fn counter(quota: ValueType, ttl_type: TtlType, ttl: ValueType, now: Instant) -> Self {
        let mut value = Vec::with_capacity(VALUE_SIZE);
        quota.put_le(&mut value);
        Self {
            entry_type: EntryType::Counter,
            value,
            ttl_type,
            expires_at: expiry(now, ttl_type, ttl),
        }
    }

    /// Creates a raw entry holding `value`.
    pub fn raw(value: impl Into<Vec<u8>>, ttl_type: TtlType, ttl: ValueType, now: Instant) -> Self {
        Self {
            entry_type: EntryType::Raw,
            value: value.into(),
            ttl_type,
            expires_at: expiry(now, ttl_type, ttl),
        }
    }

    pub fn from_insert(request: &InsertRequest<'_>, now: Instant) -> Self {
        Self::counter(request.quota, request.ttl_type, request.ttl, now)
    }

    pub fn from_set(request: &SetRequest<'_>, now: Instant) -> Self {
        Self::raw(request.value, request.ttl_type, request.ttl, now)
    }

    pub fn is_counter(&self) -> bool {
        self.entry_type == EntryType::Counter
    }

    /// Current quota of a counter entry.
    pub fn quota(&self) -> Result<ValueType, EntryError> {
        if !self.is_counter() {
            return Err(EntryError::NotACounter);
        }
        if self.value.len() != VALUE_SIZE {
            return Err(EntryError::InvalidCounter {
                len: self.value.len(),
                expected: VALUE_SIZE,
            });
        }
        ValueType::read_le(&self.value).ok_or(EntryError::InvalidCounter {
            len: self.value.len(),
            expected: VALUE_SIZE,
        })
    }

    fn store_quota(&mut self, quota: ValueType) {
        self.value.clear();
        quota.put_le(&mut self.value);
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, zero once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Applies an `update` request.
    pub fn apply_update(
        &mut self,
        request: &UpdateRequest<'_>,
        now: Instant,
    ) -> Result<(), EntryError> {
        match request.attribute {
            AttributeType::Quota => self.update_quota(request.change, request.value),
            AttributeType::Ttl => self.update_ttl(request.change, request.value, now),
        }
    }

    fn update_quota(&mut self, change: ChangeType, value: ValueType) -> Result<(), EntryError> {
        let quota = self.quota()?;
        let next = match change {
            ChangeType::Patch => value,
            ChangeType::Increase => quota.checked_add(value).ok_or(EntryError::Overflow)?,
            ChangeType::Decrease => quota.checked_sub(value).ok_or(EntryError::Underflow)?,
        };
        self.store_quota(next);
        Ok(())
    }

    fn update_ttl(
        &mut self,
        change: ChangeType,
        value: ValueType,
        now: Instant,
    ) -> Result<(), EntryError> {
        let delta = self.ttl_type.to_duration(value);
        self.expires_at = match change {
            ChangeType::Patch => now.checked_add(delta).ok_or(EntryError::Overflow)?,
            ChangeType::Increase => self
                .expires_at
                .checked_add(delta)
                .ok_or(EntryError::Overflow)?,
            ChangeType::Decrease => self
                .expires_at
                .checked_sub(delta)
                .ok_or(EntryError::Underflow)?,
        };
        Ok(())
    }
}

// Instants far enough in the future to overflow the clock clamp to the
// largest representable offset instead of panicking.
fn expiry(now: Instant, ttl_type: TtlType, ttl: ValueType) -> Instant {
    let ttl = ttl_type.to_duration(ttl);
    now.checked_add(ttl).unwrap_or_else(|| far_future(now))
}

fn far_future(now: Instant) -> Instant {
    let mut step = Duration::from_secs(u64::MAX / 2);
    let mut at = now;
    while step > Duration::ZERO {
        match at.checked_add(step) {
            Some(next) => at = next,
            None => step /= 2,
        }
    }
    at
}
