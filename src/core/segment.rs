//! Lazy segmentation of an input sequence into fixed-size batches
//!
//! [`segment`] is the intake side of the pipeline: it pulls items from the
//! source one at a time and yields them in groups of `size`, so unbounded
//! sources work and nothing beyond the current partial group is buffered.

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Group a source into batches of `size` items.
///
/// Every batch has exactly `size` items except possibly the last, which holds
/// the remainder when the source length is not a multiple of `size`. An empty
/// source yields no batches. Items appear in source order, and concatenating
/// the batches reproduces the source exactly.
///
/// # Example
/// ```
/// use std::num::NonZeroUsize;
///
/// let size = NonZeroUsize::new(5).unwrap();
/// let batches: Vec<Vec<u32>> = batchflow::segment(1..=22, size).collect();
/// assert_eq!(batches.len(), 5);
/// assert_eq!(batches[0], vec![1, 2, 3, 4, 5]);
/// assert_eq!(batches[4], vec![21, 22]);
/// ```
pub fn segment<I>(source: I, size: NonZeroUsize) -> Batches<I::IntoIter>
where
    I: IntoIterator,
{
    Batches {
        source: source.into_iter(),
        size: size.get(),
    }
}

/// Iterator of fixed-size batches produced by [`segment`].
#[derive(Debug, Clone)]
pub struct Batches<I> {
    source: I,
    size: usize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.size);
        for item in self.source.by_ref() {
            batch.push(item);
            if batch.len() == self.size {
                return Some(batch);
            }
        }
        if batch.is_empty() { None } else { Some(batch) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        (
            lower.div_ceil(self.size),
            upper.map(|n| n.div_ceil(self.size)),
        )
    }
}

impl<I: FusedIterator> FusedIterator for Batches<I> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_even_split() {
        let batches: Vec<Vec<u32>> = segment(1..=10, size(5)).collect();
        assert_eq!(batches, vec![vec![1, 2, 3, 4, 5], vec![6, 7, 8, 9, 10]]);
    }

    #[test]
    fn test_remainder_in_final_batch() {
        let batches: Vec<Vec<u32>> = segment(1..=22, size(5)).collect();
        assert_eq!(batches.len(), 5);
        for batch in &batches[..4] {
            assert_eq!(batch.len(), 5);
        }
        assert_eq!(batches[4], vec![21, 22]);
    }

    #[test]
    fn test_empty_source_yields_no_batches() {
        let batches: Vec<Vec<u32>> = segment(std::iter::empty(), size(3)).collect();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_batch_size_larger_than_source() {
        let batches: Vec<Vec<u32>> = segment(1..=3, size(10)).collect();
        assert_eq!(batches, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_size_one() {
        let batches: Vec<Vec<u32>> = segment(1..=3, size(1)).collect();
        assert_eq!(batches, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_concatenation_reproduces_source() {
        for (len, s) in [(0usize, 1usize), (7, 3), (9, 3), (100, 7), (1, 4)] {
            let source: Vec<usize> = (0..len).collect();
            let rejoined: Vec<usize> = segment(source.clone(), size(s)).flatten().collect();
            assert_eq!(rejoined, source);

            let count = segment(source, size(s)).count();
            assert_eq!(count, len.div_ceil(s));
        }
    }

    #[test]
    fn test_lazy_pull_from_source() {
        // Only enough items for the requested batches are consumed.
        let mut pulled = 0u32;
        let source = (1..).inspect(|_| pulled += 1);
        let mut batches = segment(source, size(4));

        let first = batches.next().unwrap();
        assert_eq!(first, vec![1, 2, 3, 4]);
        drop(batches);
        assert_eq!(pulled, 4);
    }

    #[test]
    fn test_size_hint() {
        let batches = segment(1..=22, size(5));
        assert_eq!(batches.size_hint(), (5, Some(5)));

        let batches = segment(std::iter::empty::<u32>(), size(5));
        assert_eq!(batches.size_hint(), (0, Some(0)));
    }
}
