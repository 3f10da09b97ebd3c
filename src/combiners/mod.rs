//! Built-in combiners for partition results.
//!
//! - [`UniformReservoir<T>`] -- uniform random sample of fixed size, mergeable
//!   across partitions.
//!
//! # Examples
//! ```
//! use keyspace::combine::{CombineFn, merge_all};
//! use keyspace::combiners::UniformReservoir;
//!
//! let comb = UniformReservoir::<u32>::new(4, 7);
//! let mut left = comb.create_partition(0);
//! let mut right = comb.create_partition(1);
//! (0..100).for_each(|x| left.offer(x));
//! (100..150).for_each(|x| right.offer(x));
//!
//! let sample: Vec<u32> = merge_all(&comb, [left, right]);
//! assert_eq!(sample.len(), 4);
//! ```

mod sampling;

pub use sampling::{Reservoir, UniformReservoir};
