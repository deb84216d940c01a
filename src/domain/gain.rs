//! Entropy and information gain under the unique-name assumption.
//!
//! Every entity in a subset carries a distinct name, so a subset of `n` entities is a
//! uniform distribution over `n` identities and its entropy is `log2(n)`.

use crate::domain::catalog::Predicate;

/// Entities split by one question, input order kept on both sides.
#[derive(Debug)]
pub struct Partition<'a, E> {
    pub yes: Vec<&'a E>,
    pub no: Vec<&'a E>,
}

impl<E> Partition<'_, E> {
    /// Both sides non-empty.
    pub fn is_split(&self) -> bool {
        !self.yes.is_empty() && !self.no.is_empty()
    }
}

/// Entropy of a set of `len` distinct identities.
pub fn entropy_of_len(len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    (len as f64).log2()
}

pub fn entropy<T>(subset: &[T]) -> f64 {
    entropy_of_len(subset.len())
}

pub fn partition<'a, E, P>(subset: &[&'a E], predicate: &P) -> Partition<'a, E>
where
    P: Predicate<E>,
{
    let (yes, no) = subset.iter().copied().partition(|e| predicate.test(e));
    Partition { yes, no }
}

/// Gain of splitting `total` identities into `yes` and `no`.
///
/// An empty side means the question separates nothing: gain 0.
pub fn split_gain(total: usize, yes: usize, no: usize) -> f64 {
    if yes == 0 || no == 0 {
        return 0.0;
    }
    let total_f = total as f64;
    let weighted = (yes as f64 / total_f) * entropy_of_len(yes)
        + (no as f64 / total_f) * entropy_of_len(no);
    entropy_of_len(total) - weighted
}

pub fn information_gain<E, P>(subset: &[&E], predicate: &P) -> f64
where
    P: Predicate<E>,
{
    let split = partition(subset, predicate);
    split_gain(subset.len(), split.yes.len(), split.no.len())
}
