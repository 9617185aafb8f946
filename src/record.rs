//! Record types: parsed input values, ordered sequences, and transform results.

use std::fmt;

/// A single validated integer read from one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Record(i64);

impl Record {
    pub fn new(value: i64) -> Self {
        Record(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_even(self) -> bool {
        self.0 % 2 == 0
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered sequence of records. Insertion order is output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSequence<T = Record> {
    items: Vec<T>,
}

impl<T> RecordSequence<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for RecordSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for RecordSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for RecordSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for RecordSequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RecordSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Exact result of squaring or cubing an `i64`.
///
/// The cube of `i64::MIN` needs 190 bits, so the magnitude is kept as three
/// little-endian 64-bit limbs plus a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Power {
    negative: bool,
    limbs: [u64; 3],
}

/// 10^19, the largest power of ten below 2^64.
const DECIMAL_CHUNK: u128 = 10_000_000_000_000_000_000;

impl Power {
    /// `v * v`.
    pub fn square(v: i64) -> Self {
        let m = u128::from(v.unsigned_abs());
        let sq = m * m;
        Self {
            negative: false,
            limbs: [sq as u64, (sq >> 64) as u64, 0],
        }
    }

    /// `v * v * v`.
    pub fn cube(v: i64) -> Self {
        let m = u128::from(v.unsigned_abs());
        // m <= 2^63, so m * m <= 2^126 and the high half is below 2^62.
        let sq = m * m;
        let lo = (sq as u64) as u128 * m;
        let hi = (sq >> 64) * m + (lo >> 64);
        let limbs = [lo as u64, hi as u64, (hi >> 64) as u64];
        Self {
            negative: v < 0 && limbs != [0; 3],
            limbs,
        }
    }

    /// The value as an `i128`, if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        if self.limbs[2] != 0 {
            return None;
        }
        let magnitude = (u128::from(self.limbs[1]) << 64) | u128::from(self.limbs[0]);
        if self.negative {
            0i128.checked_sub_unsigned(magnitude)
        } else {
            i128::try_from(magnitude).ok()
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        if self.limbs[2] == 0 {
            let magnitude = (u128::from(self.limbs[1]) << 64) | u128::from(self.limbs[0]);
            return write!(f, "{sign}{magnitude}");
        }

        // Long division by 10^19, most significant limb first.
        let mut limbs = self.limbs;
        let mut chunks = Vec::with_capacity(4);
        while limbs != [0; 3] {
            let mut rem: u128 = 0;
            for limb in limbs.iter_mut().rev() {
                let cur = (rem << 64) | u128::from(*limb);
                *limb = (cur / DECIMAL_CHUNK) as u64;
                rem = cur % DECIMAL_CHUNK;
            }
            chunks.push(rem as u64);
        }

        write!(f, "{sign}")?;
        let mut rest = chunks.iter().rev();
        if let Some(first) = rest.next() {
            write!(f, "{first}")?;
        }
        for chunk in rest {
            write!(f, "{chunk:019}")?;
        }
        Ok(())
    }
}
