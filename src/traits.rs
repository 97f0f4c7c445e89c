use alloc::borrow::{Borrow, BorrowMut, Cow};
use core::{fmt, hash, ops, slice};

use bytemuck::Pod;

use crate::{Backend, GrowthPolicy, Podder};

impl<T: Pod, P: GrowthPolicy, A: Backend> ops::Deref for Podder<T, P, A> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> ops::DerefMut for Podder<T, P, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: Pod + fmt::Debug, P: GrowthPolicy, A: Backend> fmt::Debug for Podder<T, P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> AsRef<[T]> for Podder<T, P, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> AsMut<[T]> for Podder<T, P, A> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Borrow<[T]> for Podder<T, P, A> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> BorrowMut<[T]> for Podder<T, P, A> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// Only integer-like `T` implement `Hash`, for which value equality and the
// bytewise equality of `Podder` agree.
impl<T: Pod + hash::Hash, P: GrowthPolicy, A: Backend> hash::Hash for Podder<T, P, A> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash::Hash::hash(self.as_slice(), state);
    }
}

impl<T: Pod, I: slice::SliceIndex<[T]>, P: GrowthPolicy, A: Backend> ops::Index<I> for Podder<T, P, A> {
    type Output = I::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        ops::Index::index(self.as_slice(), index)
    }
}

impl<T: Pod, I: slice::SliceIndex<[T]>, P: GrowthPolicy, A: Backend> ops::IndexMut<I>
    for Podder<T, P, A>
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        ops::IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<'a, T: Pod, P: GrowthPolicy, A: Backend> IntoIterator for &'a Podder<T, P, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T: Pod, P: GrowthPolicy, A: Backend> IntoIterator for &'a mut Podder<T, P, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<'a, T: Pod, P: GrowthPolicy, A: Backend> From<&'a Podder<T, P, A>> for Cow<'a, [T]> {
    #[inline]
    fn from(value: &'a Podder<T, P, A>) -> Self {
        Cow::Borrowed(value.as_slice())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::{collections::HashSet, format};

    type Bytes = Podder<u8>;

    #[test]
    fn slice_views() {
        let mut v = Bytes::from_slice(b"hello");
        v[0] = b'j';
        assert_eq!(&v[..], b"jello");
        assert_eq!(v.iter().rev().next(), Some(&b'o'));
        for b in &mut v {
            *b = b.to_ascii_uppercase();
        }
        assert_eq!(&*v, b"JELLO");
        let cow: Cow<'_, [u8]> = (&v).into();
        assert_eq!(&*cow, b"JELLO");
    }

    #[test]
    fn debug_matches_slice() {
        let v = Podder::<i16>::from_slice(&[-1, 2]);
        assert_eq!(format!("{v:?}"), "[-1, 2]");
    }

    #[test]
    fn hash_agrees_with_borrowed_slice() {
        let mut set = HashSet::new();
        set.insert(Bytes::from_slice(b"abc"));
        set.insert(Bytes::from_slice(b"abc"));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&b"abc"[..]));
    }
}
