//! Uniform reservoir sampling combiner

use crate::combine::CombineFn;
use crate::utils::derive_seed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::marker::PhantomData;

// ======================================================================
// Reservoir (Algorithm R) with a two-level merge
// ======================================================================

/// Fixed-capacity uniform sample over a stream of unknown length.
///
/// After `m` offers, each offered item is held with probability
/// `min(1, capacity / m)` and every size-`capacity` subset is equally likely.
///
/// The generator is owned by the reservoir; a partition's reservoir is never
/// touched by another thread.
#[derive(Clone, Debug)]
pub struct Reservoir<T> {
    capacity: usize,
    seen: u64,
    items: Vec<T>,
    rng: StdRng,
}

impl<T> Reservoir<T> {
    /// Empty reservoir holding at most `capacity` items.
    #[must_use]
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            capacity,
            seen: 0,
            items: Vec::with_capacity(capacity.min(1 << 16)),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Offer one item.
    pub fn offer(&mut self, item: T) {
        self.offer_with(|| item);
    }

    /// Offer an item that is only materialized if it is accepted.
    ///
    /// The enumerator uses this to avoid allocating a key for every solution.
    pub fn offer_with<F: FnOnce() -> T>(&mut self, make: F) {
        if self.capacity == 0 {
            self.seen += 1;
            return;
        }
        if self.items.len() < self.capacity {
            self.items.push(make());
        } else {
            // idx uniform over [0, seen], seen counted before this item
            let idx = self.rng.gen_range(0..=self.seen);
            if let Ok(idx) = usize::try_from(idx)
                && idx < self.capacity
            {
                self.items[idx] = make();
            }
        }
        self.seen += 1;
    }

    /// Number of items offered so far.
    #[must_use]
    pub const fn seen(&self) -> u64 {
        self.seen
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Absorb `other`, leaving a uniform sample of the union of both streams.
    ///
    /// Draws `min(k, seen_a + seen_b)` items. Each draw picks a side with
    /// probability proportional to the part of its stream not yet drawn, then
    /// takes a random remaining item from that side's sample. The number of
    /// items taken from each side is therefore hypergeometric, exactly as if a
    /// single reservoir had seen both streams.
    ///
    /// `k` is the smaller of the two capacities, which guarantees a side never
    /// runs out of retained items before its stream share is exhausted.
    pub fn merge(&mut self, other: Self) {
        let capacity = self.capacity.min(other.capacity);
        let total = self.seen + other.seen;
        let take = usize::try_from(total).map_or(capacity, |t| t.min(capacity));

        let mut left = std::mem::take(&mut self.items);
        let mut right = other.items;
        let (mut left_rest, mut right_rest) = (self.seen, other.seen);

        let mut merged = Vec::with_capacity(take);
        for _ in 0..take {
            let from_left = self.rng.gen_range(0..left_rest + right_rest) < left_rest;
            let pool = if from_left {
                left_rest -= 1;
                &mut left
            } else {
                right_rest -= 1;
                &mut right
            };
            debug_assert!(!pool.is_empty(), "reservoir side exhausted early");
            let j = self.rng.gen_range(0..pool.len());
            merged.push(pool.swap_remove(j));
        }

        self.capacity = capacity;
        self.seen = total;
        self.items = merged;
    }
}

/// Uniform reservoir sample of size **k** across partitions.
///
/// Per-partition reservoirs come from [`UniformReservoir::create_partition`],
/// each seeded from `(seed, partition)`, so a fixed seed reproduces the same
/// sample no matter which partition finishes first. Merging is the two-level
/// merge in [`Reservoir::merge`].
#[derive(Clone, Copy, Debug)]
pub struct UniformReservoir<T> {
    pub k: usize,
    pub seed: u64,
    _m: PhantomData<T>,
}

impl<T> UniformReservoir<T> {
    #[must_use]
    pub const fn new(k: usize, seed: u64) -> Self {
        Self {
            k,
            seed,
            _m: PhantomData,
        }
    }

    /// The reservoir owned by partition `index`.
    #[must_use]
    pub fn create_partition(&self, index: u64) -> Reservoir<T> {
        Reservoir::new(self.k, derive_seed(self.seed, index))
    }
}

impl<T: Send + Sync + 'static> CombineFn<T, Reservoir<T>, Vec<T>> for UniformReservoir<T> {
    /// The merge-side accumulator.
    fn create(&self) -> Reservoir<T> {
        Reservoir::new(self.k, derive_seed(self.seed, u64::MAX))
    }

    fn add_input(&self, acc: &mut Reservoir<T>, v: T) {
        acc.offer(v);
    }

    fn merge(&self, acc: &mut Reservoir<T>, other: Reservoir<T>) {
        acc.merge(other);
    }

    fn finish(&self, acc: Reservoir<T>) -> Vec<T> {
        acc.into_items()
    }
}
