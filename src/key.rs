//! Keys and the in-place search buffer.
//!
//! A [`Key`] is an emitted, immutable sequence of cut depths. During search the
//! enumerator works on a single [`KeyBuffer`] per partition: a fixed-size depth
//! array plus a depth-frequency table, mutated by [`KeyBuffer::commit`] on the
//! way down and restored by [`KeyBuffer::retract`] on the way back up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cut depth. Depth values live in `[0, depths)` with `depths <= 256`.
pub type Depth = u8;

/// A complete key: exactly `length` depth values.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(pub Vec<Depth>);

impl Key {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn depths(&self) -> &[Depth] {
        &self.0
    }
}

impl From<Vec<Depth>> for Key {
    fn from(value: Vec<Depth>) -> Self {
        Self(value)
    }
}

impl From<&[Depth]> for Key {
    fn from(value: &[Depth]) -> Self {
        Self(value.to_vec())
    }
}

/// Space-separated depths, the format the driver prints samples in.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Reusable per-partition search state.
///
/// Invariant: `freqs[v]` equals the number of positions `< filled` holding `v`.
#[derive(Clone, Debug)]
pub struct KeyBuffer {
    cuts: Vec<Depth>,
    freqs: Vec<u32>,
    filled: usize,
}

impl KeyBuffer {
    /// Empty buffer for keys of `length` cuts over `depths` values.
    #[must_use]
    pub fn new(length: usize, depths: usize) -> Self {
        Self {
            cuts: vec![0; length],
            freqs: vec![0; depths],
            filled: 0,
        }
    }

    /// Buffer pre-loaded with `prefix`, as if each cut had been committed in turn.
    ///
    /// # Panics
    ///
    /// Panics if the prefix is longer than the key or holds an out-of-range depth.
    #[must_use]
    pub fn with_prefix(length: usize, depths: usize, prefix: &[Depth]) -> Self {
        assert!(prefix.len() <= length, "prefix longer than key");
        let mut buf = Self::new(length, depths);
        for &d in prefix {
            buf.commit(d);
        }
        buf
    }

    /// Number of committed positions.
    #[inline]
    #[must_use]
    pub const fn filled(&self) -> usize {
        self.filled
    }

    /// Full key length this buffer was sized for.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.cuts.len()
    }

    /// Committed prefix.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &[Depth] {
        &self.cuts[..self.filled]
    }

    /// Occurrences of `depth` in the committed prefix.
    #[inline]
    #[must_use]
    pub fn frequency(&self, depth: Depth) -> u32 {
        self.freqs[usize::from(depth)]
    }

    /// The depth-frequency table.
    #[inline]
    #[must_use]
    pub fn frequencies(&self) -> &[u32] {
        &self.freqs
    }

    /// Last committed depth, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<Depth> {
        self.filled.checked_sub(1).map(|i| self.cuts[i])
    }

    /// Place `depth` at the next position.
    #[inline]
    pub fn commit(&mut self, depth: Depth) {
        self.cuts[self.filled] = depth;
        self.freqs[usize::from(depth)] += 1;
        self.filled += 1;
    }

    /// Undo the most recent [`commit`](Self::commit).
    #[inline]
    pub fn retract(&mut self) {
        debug_assert!(self.filled > 0, "retract on empty buffer");
        self.filled -= 1;
        let depth = self.cuts[self.filled];
        self.freqs[usize::from(depth)] -= 1;
    }

    /// Snapshot of the committed prefix as an owned key.
    #[must_use]
    pub fn to_key(&self) -> Key {
        Key::from(self.prefix())
    }
}
