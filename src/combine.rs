//! The combiner abstraction shared by partition results.
//!
//! Each partition builds its own accumulator with [`CombineFn::create`] and
//! [`CombineFn::add_input`]; after the join the runner folds the accumulators
//! together with [`CombineFn::merge`] on a single thread and calls
//! [`CombineFn::finish`] once.

/// A mergeable aggregation from values `V` through accumulator `A` to output `O`.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn merge(&self, acc: &mut A, other: A);
    fn finish(&self, acc: A) -> O;
}

/// Fold already-built accumulators into one output.
pub fn merge_all<V, A, O, C>(comb: &C, accs: impl IntoIterator<Item = A>) -> O
where
    C: CombineFn<V, A, O>,
{
    let mut total = comb.create();
    for acc in accs {
        comb.merge(&mut total, acc);
    }
    comb.finish(total)
}
