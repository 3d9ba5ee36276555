use std::iter::{Flatten, Fuse};

/// Single-pass iterator over the elements of a sequence of sequences.
///
/// Inner sequences are opened lazily, one at a time, and drained in source
/// order. Once the outer sequence runs out the iterator stays exhausted; a
/// new traversal needs a fresh [`flat_iter`] call.
pub type FlatIter<O> = Fuse<Flatten<O>>;

pub fn flat_iter<T>(outer: T) -> FlatIter<T::IntoIter>
where
    T: IntoIterator,
    T::Item: IntoIterator,
{
    outer.into_iter().flatten().fuse()
}
