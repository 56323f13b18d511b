//! # intlong-rs
//!
//! A boxing-free open-addressing hash map from `i32` keys to `i64` values.
//!
//! The key itself, after a sign-fold, is the hash: lookups never run a hash
//! function, and all entries live in two flat parallel arrays, so inserts
//! never allocate per entry. Collisions are resolved by linear probing and
//! the table grows by a configurable multiplier once a load-factor threshold
//! is crossed.
//!
//! ## Example
//!
//! ```rust
//! use intlong_rs::IntLongMap;
//!
//! let mut map = IntLongMap::new();
//! assert_eq!(map.put(7, 700), map.no_entry_value());
//! assert_eq!(map.get(7), 700);
//! assert_eq!(map.put(7, 701), 700);
//! assert_eq!(map.len(), 1);
//! ```
//!
//! Absence is reported through a configurable sentinel value rather than an
//! option type; see [`IntLongMap::get`] for the resulting ambiguity and
//! [`OptionMap`] for a boundary adapter that translates the sentinel to
//! `Option<i64>`.

#![forbid(unsafe_code)]

use thiserror::Error;

// =============================================================================
// Configuration
// =============================================================================

/// Largest accepted initial capacity, matching the 2^30 ceiling common to
/// int-indexed table implementations.
const MAX_CAPACITY: usize = 1 << 30;

const DEFAULT_CAPACITY: usize = 16;
const DEFAULT_LOAD_FACTOR: f64 = 0.75;
const DEFAULT_MULTIPLIER: f64 = 2.0;
const DEFAULT_NO_ENTRY_VALUE: i64 = i64::MIN;

// =============================================================================
// Errors
// =============================================================================

/// Construction-time parameter errors. A failed constructor produces no
/// partial map; `get`/`put`/`len` on a constructed map cannot fail.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Initial capacity of zero, or above `2^30`.
    #[error("illegal initial capacity: {0}")]
    InvalidCapacity(usize),
    /// Load factor outside `(0, 1.0]`, or NaN.
    #[error("illegal load factor: {0}")]
    InvalidLoadFactor(f64),
    /// Growth multiplier that is non-positive or NaN.
    #[error("illegal multiplier: {0}")]
    InvalidMultiplier(f64),
}

// =============================================================================
// IntLongMap
// =============================================================================

/// Open-addressing hash table from `i32` keys to `i64` values.
///
/// Layout:
/// - Parallel `keys`/`values` arrays, index-aligned; a key slot holding `0`
///   is structurally empty.
/// - Key `0` therefore cannot live in the main table; its entry is a single
///   side slot (`zero_value`/`zero_present`) outside the arrays. This trades
///   one special case for not carrying an occupancy bitset.
/// - `limit` is `floor(capacity * load_factor)` clamped strictly below
///   capacity, so the key ring always contains an empty slot and the linear
///   probes terminate without tracking a wrap-around.
#[derive(Clone, Debug)]
pub struct IntLongMap {
    keys: Vec<i32>,
    values: Vec<i64>,
    load_factor: f64,
    multiplier: f64,
    no_entry_value: i64,
    /// Occupied main-table slots; excludes the zero-key side slot.
    len: usize,
    /// Grow once `len` reaches this. Always strictly below capacity.
    limit: usize,
    zero_value: i64,
    zero_present: bool,
}

fn occupancy_limit(capacity: usize, load_factor: f64) -> usize {
    ((capacity as f64 * load_factor) as usize).min(capacity - 1)
}

impl IntLongMap {
    /// Creates a map with capacity 16, load factor 0.75, growth multiplier
    /// 2.0, and `i64::MIN` as the no-entry sentinel.
    pub fn new() -> Self {
        Self::raw(
            DEFAULT_CAPACITY,
            DEFAULT_LOAD_FACTOR,
            DEFAULT_MULTIPLIER,
            DEFAULT_NO_ENTRY_VALUE,
        )
    }

    /// Creates a map with the given initial capacity and default load
    /// factor, multiplier, and sentinel.
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(
            initial_capacity,
            DEFAULT_LOAD_FACTOR,
            DEFAULT_MULTIPLIER,
            DEFAULT_NO_ENTRY_VALUE,
        )
    }

    /// Creates a map with every parameter explicit. All parameters are fixed
    /// for the lifetime of the map.
    ///
    /// `no_entry_value` is the value reported by [`get`](Self::get) and
    /// [`put`](Self::put) for absent keys; any `i64` is accepted, including
    /// values the caller may later store.
    pub fn with_config(
        initial_capacity: usize,
        load_factor: f64,
        multiplier: f64,
        no_entry_value: i64,
    ) -> Result<Self, ConfigError> {
        if initial_capacity < 1 || initial_capacity > MAX_CAPACITY {
            return Err(ConfigError::InvalidCapacity(initial_capacity));
        }
        if load_factor.is_nan() || load_factor <= 0.0 || load_factor > 1.0 {
            return Err(ConfigError::InvalidLoadFactor(load_factor));
        }
        if multiplier.is_nan() || multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier(multiplier));
        }
        Ok(Self::raw(
            initial_capacity,
            load_factor,
            multiplier,
            no_entry_value,
        ))
    }

    /// Parameters must already be validated.
    fn raw(capacity: usize, load_factor: f64, multiplier: f64, no_entry_value: i64) -> Self {
        Self {
            keys: vec![0; capacity],
            values: vec![0; capacity],
            load_factor,
            multiplier,
            no_entry_value,
            len: 0,
            limit: occupancy_limit(capacity, load_factor),
            zero_value: no_entry_value,
            zero_present: false,
        }
    }

    /// The value reported for keys with no mapping.
    #[inline]
    pub fn no_entry_value(&self) -> i64 {
        self.no_entry_value
    }

    /// Number of key-value mappings, counting the zero-key entry when
    /// present.
    #[inline]
    pub fn len(&self) -> usize {
        self.len + usize::from(self.zero_present)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current main-table slot count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    #[inline]
    pub fn growth_multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Returns the value mapped to `key`, or
    /// [`no_entry_value`](Self::no_entry_value) when there is no mapping.
    ///
    /// A sentinel result does not necessarily mean the key is absent: the
    /// sentinel is itself a storable value, and the two cases are not
    /// distinguished.
    pub fn get(&self, key: i32) -> i64 {
        // Key 0 doubles as the empty-slot marker in `keys`, so its entry
        // lives in the side slot, never in the main table.
        if key == 0 {
            return self.zero_value;
        }
        match self.slot_of(key) {
            Some(index) => self.values[index],
            None => self.no_entry_value,
        }
    }

    /// Maps `key` to `value`, returning the previous value or
    /// [`no_entry_value`](Self::no_entry_value) when there was none.
    ///
    /// Storing a value equal to the sentinel is deliberately not rejected;
    /// the return value is then ambiguous between "was absent" and "stored
    /// the sentinel".
    pub fn put(&mut self, key: i32, value: i64) -> i64 {
        if key == 0 {
            let previous = self.zero_value;
            self.zero_value = value;
            self.zero_present = true;
            return previous;
        }
        // Grow before probing: `slot_of` only terminates while the key ring
        // still has an empty slot, so the threshold check cannot come after.
        if self.len >= self.limit {
            self.grow();
        }
        match self.slot_of(key) {
            Some(index) => std::mem::replace(&mut self.values[index], value),
            None => {
                self.raw_insert(key, value);
                self.no_entry_value
            }
        }
    }

    /// Bucket index for a nonzero key. Clearing the sign bit is the entire
    /// hash; keys `k` and `k | i32::MIN` share a bucket, an accepted bias.
    #[inline]
    fn bucket(&self, key: i32) -> usize {
        (key & i32::MAX) as usize % self.keys.len()
    }

    /// Index of the slot holding `key`, or `None` when the key is absent.
    fn slot_of(&self, key: i32) -> Option<usize> {
        debug_assert_ne!(key, 0);
        let mut index = self.bucket(key);
        while self.keys[index] != 0 && self.keys[index] != key {
            index += 1;
            if index == self.keys.len() {
                index = 0;
            }
        }
        (self.keys[index] == key).then_some(index)
    }

    /// Inserts a key known to be absent into the first empty slot on its
    /// probe path. No limit check: callers guarantee a free slot exists.
    fn raw_insert(&mut self, key: i32, value: i64) {
        debug_assert_ne!(key, 0);
        let mut index = self.bucket(key);
        while self.keys[index] != 0 {
            index += 1;
            if index == self.keys.len() {
                index = 0;
            }
        }
        self.keys[index] = key;
        self.values[index] = value;
        self.len += 1;
    }

    /// Replaces the storage with a larger zero-filled pair of arrays and
    /// re-inserts every occupied slot. The zero-key side slot is untouched.
    fn grow(&mut self) {
        // Capacity must strictly increase, even for multipliers at or below
        // 1.0: a flat capacity would eventually fill the key ring and the
        // probe loops would never find an empty slot.
        let new_capacity =
            ((self.keys.len() as f64 * self.multiplier) as usize).max(self.keys.len() + 1);
        let old_keys = std::mem::replace(&mut self.keys, vec![0; new_capacity]);
        let old_values = std::mem::replace(&mut self.values, vec![0; new_capacity]);
        self.limit = occupancy_limit(new_capacity, self.load_factor);
        self.len = 0;
        for (key, value) in old_keys.into_iter().zip(old_values) {
            if key != 0 {
                self.raw_insert(key, value);
            }
        }
    }
}

impl Default for IntLongMap {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Capability trait + Option adapter
// =============================================================================

/// The narrow capability a primitive `i32 -> i64` table offers: sentinel
/// accessor, point lookup, upsert, and count.
///
/// Removal, iteration, and bulk operations are intentionally absent from the
/// trait rather than present-but-failing, so generic code written against it
/// cannot reach an unimplemented operation.
pub trait BasicIntLongMap {
    fn no_entry_value(&self) -> i64;
    fn get(&self, key: i32) -> i64;
    fn put(&mut self, key: i32, value: i64) -> i64;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BasicIntLongMap for IntLongMap {
    #[inline]
    fn no_entry_value(&self) -> i64 {
        IntLongMap::no_entry_value(self)
    }

    #[inline]
    fn get(&self, key: i32) -> i64 {
        IntLongMap::get(self, key)
    }

    #[inline]
    fn put(&mut self, key: i32, value: i64) -> i64 {
        IntLongMap::put(self, key, value)
    }

    #[inline]
    fn len(&self) -> usize {
        IntLongMap::len(self)
    }
}

/// Adapter exposing a [`BasicIntLongMap`] through `Option`-based lookups,
/// translating the sentinel convention at the boundary for code that expects
/// standard-map signatures.
///
/// The translation inherits the sentinel ambiguity: a stored value equal to
/// the sentinel reads back as `None`.
#[derive(Clone, Debug, Default)]
pub struct OptionMap<M = IntLongMap> {
    inner: M,
}

impl<M: BasicIntLongMap> OptionMap<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn get(&self, key: i32) -> Option<i64> {
        let value = self.inner.get(key);
        (value != self.inner.no_entry_value()).then_some(value)
    }

    pub fn insert(&mut self, key: i32, value: i64) -> Option<i64> {
        let previous = self.inner.put(key, value);
        (previous != self.inner.no_entry_value()).then_some(previous)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: BasicIntLongMap> From<M> for OptionMap<M> {
    fn from(inner: M) -> Self {
        Self { inner }
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests;
