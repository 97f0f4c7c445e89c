//! Comparisons of a [`Podder`] with itself and with other sequences.
//!
//! Contiguous sequences are compared by their object representation:
//! - equality holds iff both have the same length and identical bytes;
//! - ordering compares the bytes of the common prefix only.
//!
//! Ordering has no length tie-break. When one operand is a strict prefix of
//! the other, `partial_cmp` returns `None` and all of `<`, `>`, `<=`, `>=`
//! are `false`. Since bytes are compared in memory order, multi-byte
//! integers do not order numerically on little-endian targets.
//!
//! [`VecDeque`] and [`LinkedList`] are compared element by element with the
//! element's own `PartialEq`/`PartialOrd`, lexicographically.

use alloc::{
    collections::{LinkedList, VecDeque},
    vec::Vec,
};
use core::{borrow::Borrow, cmp::Ordering};

use bytemuck::Pod;

use crate::{Backend, GrowthPolicy, Podder, utils::bytes_of_slice};

#[inline]
fn bytes_eq<T: Pod>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && bytes_of_slice(a) == bytes_of_slice(b)
}

#[inline]
fn bytes_partial_cmp<T: Pod>(a: &[T], b: &[T]) -> Option<Ordering> {
    let common = core::cmp::min(a.len(), b.len());
    match bytes_of_slice(&a[..common]).cmp(bytes_of_slice(&b[..common])) {
        Ordering::Equal if a.len() != b.len() => None,
        ord => Some(ord),
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Podder<T, P, A> {
    /// Element-wise equality with any sequence of known length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::{Podder, podder};
    /// let v: Podder<u16> = podder![1, 2, 3];
    /// assert!(v.eq_seq(1..4u16));
    /// assert!(!v.eq_seq([1u16, 2].iter()));
    /// ```
    pub fn eq_seq<I>(&self, other: I) -> bool
    where
        T: PartialEq,
        I: IntoIterator,
        I::Item: Borrow<T>,
        I::IntoIter: ExactSizeIterator,
    {
        let other = other.into_iter();
        other.len() == self.len() && self.iter().zip(other).all(|(a, b)| *a == *b.borrow())
    }

    /// Element-wise lexicographic comparison with any sequence of known length.
    ///
    /// Unlike the bytewise [`PartialOrd`] impls, a strict prefix compares as less.
    pub fn partial_cmp_seq<I>(&self, other: I) -> Option<Ordering>
    where
        T: PartialOrd,
        I: IntoIterator,
        I::Item: Borrow<T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.iter()
            .copied()
            .partial_cmp(other.into_iter().map(|b| *b.borrow()))
    }
}

macro_rules! impl_bytewise_cmp {
    ($(impl[$($generics:tt)*] $rhs:ty;)+) => {$(
        impl<T: Pod, P: GrowthPolicy, A: Backend, $($generics)*> PartialEq<$rhs> for Podder<T, P, A> {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                bytes_eq(self.as_slice(), &other[..])
            }
        }

        impl<T: Pod, P: GrowthPolicy, A: Backend, $($generics)*> PartialOrd<$rhs> for Podder<T, P, A> {
            #[inline]
            fn partial_cmp(&self, other: &$rhs) -> Option<Ordering> {
                bytes_partial_cmp(self.as_slice(), &other[..])
            }
        }
    )+};
}

impl_bytewise_cmp! {
    impl[P2: GrowthPolicy, A2: Backend] Podder<T, P2, A2>;
    impl[] [T];
    impl[] &[T];
    impl[] &mut [T];
    impl[const N: usize] [T; N];
    impl[const N: usize] &[T; N];
    impl[] Vec<T>;
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Eq for Podder<T, P, A> {}

macro_rules! impl_reverse_eq {
    ($(impl[$($generics:tt)*] $lhs:ty;)+) => {$(
        impl<T: Pod, P: GrowthPolicy, A: Backend, $($generics)*> PartialEq<Podder<T, P, A>> for $lhs {
            #[inline]
            fn eq(&self, other: &Podder<T, P, A>) -> bool {
                bytes_eq(&self[..], other.as_slice())
            }
        }
    )+};
}

impl_reverse_eq! {
    impl[] [T];
    impl[const N: usize] [T; N];
    impl[] Vec<T>;
}

macro_rules! impl_elementwise_cmp {
    ($($rhs:ident),+) => {$(
        impl<T: Pod + PartialEq, P: GrowthPolicy, A: Backend> PartialEq<$rhs<T>> for Podder<T, P, A> {
            #[inline]
            fn eq(&self, other: &$rhs<T>) -> bool {
                self.eq_seq(other)
            }
        }

        impl<T: Pod + PartialOrd, P: GrowthPolicy, A: Backend> PartialOrd<$rhs<T>> for Podder<T, P, A> {
            #[inline]
            fn partial_cmp(&self, other: &$rhs<T>) -> Option<Ordering> {
                self.partial_cmp_seq(other)
            }
        }
    )+};
}

impl_elementwise_cmp!(VecDeque, LinkedList);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::Golden;

    type Words = Podder<u32>;

    #[test]
    fn prefix_is_unordered() {
        let a = Words::from_slice(&[1, 2, 3, 4]);
        let b = Words::from_slice(&[1, 2, 3, 4, 5, 6, 7]);
        assert!(!(a == b));
        assert!(!(a < b));
        assert!(!(a > b));
        assert!(!(a <= b));
        assert!(!(a >= b));
        assert_eq!(a.partial_cmp(&b), None);
        assert!(a != b);
    }

    #[test]
    fn equality_crosses_representations_and_policies() {
        let small = Words::from_slice(&[1, 2]);
        let mut medium: Podder<u32, Golden> = Podder::with_capacity(100);
        medium.extend([1, 2]);
        assert!(small.is_small());
        assert!(!medium.is_small());
        assert_eq!(small, medium);
        assert_eq!(small.partial_cmp(&medium), Some(Ordering::Equal));
    }

    #[test]
    fn compares_with_contiguous_sequences() {
        let v = Podder::<u8>::from_slice(&[1, 2, 3]);
        assert_eq!(v, [1, 2, 3]);
        assert_eq!(v, &[1, 2, 3]);
        assert_eq!(v, [1u8, 2, 3][..]);
        assert_eq!(v, alloc::vec![1u8, 2, 3]);
        assert_eq!([1u8, 2, 3], v);
        assert_eq!(alloc::vec![1u8, 2, 3], v);
        assert!(v < [1, 3, 0]);
        assert!(v > [1, 2, 2]);
    }

    #[test]
    fn ordering_is_bytewise() {
        let a = Words::from_slice(&[0x0100]);
        let b = Words::from_slice(&[0x0001]);
        let expected = if cfg!(target_endian = "little") {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        assert_eq!(a.partial_cmp(&b), Some(expected));
    }

    #[test]
    fn floats_compare_bitwise() {
        let nan = Podder::<f32>::from_slice(&[f32::NAN]);
        assert_eq!(nan, nan.clone());
        let zero = Podder::<f32>::from_slice(&[0.0]);
        assert_ne!(zero, [-0.0f32]);
    }

    #[test]
    fn deque_and_list_are_elementwise() {
        let v = Words::from_slice(&[1, 2, 3]);
        let deque: VecDeque<u32> = [1, 2, 3].into_iter().collect();
        let list: LinkedList<u32> = [1, 2].into_iter().collect();
        assert_eq!(v, deque);
        assert_ne!(v, list);
        assert_eq!(v.partial_cmp(&list), Some(Ordering::Greater));
        assert_eq!(v.partial_cmp(&deque), Some(Ordering::Equal));
        assert_eq!(v.partial_cmp_seq([1u32, 2, 3, 4].iter()), Some(Ordering::Less));
    }
}
