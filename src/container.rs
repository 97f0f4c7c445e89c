use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator, marker::PhantomData, mem, ptr, ptr::NonNull, slice};

use bytemuck::Pod;
use log::trace;
use static_assertions::const_assert_eq;

use crate::{
    PodderError, VALIDATE,
    backend::{Backend, Global, HeapBuf, capacity_overflow},
    growth::{GrowthPolicy, VisualStudio, required_capacity},
    layout::{Inline, Model, Repr, State},
    stride::Stride,
    utils::{cold_path, same_bytes},
};

/// A vector of plain-old-data elements that keeps short sequences inline.
///
/// A `Podder` is exactly three machine words. While the elements fit in
/// the inline buffer (see [`Podder::inline_capacity`]) no heap memory is
/// used; once they do not, the elements move to a heap buffer owned by the
/// backend `A` and grown according to the policy `P`.
///
/// Elements are relocated with plain byte copies, which is what the
/// [`Pod`] bound is for.
///
/// Moving a `Podder` (or calling [`Podder::swap`]) invalidates every
/// pointer obtained from [`as_ptr`](Podder::as_ptr) while it was small.
///
/// # Examples
///
/// ```
/// # use podder::{Model, Podder, podder};
/// let mut v: Podder<u32> = podder![1, 2, 3];
/// assert_eq!(v.model(), Model::Small);
///
/// v.extend([4, 5, 6]);
/// assert_eq!(v.model(), Model::Medium);
/// assert_eq!(v, [1, 2, 3, 4, 5, 6]);
/// ```
pub struct Podder<T: Pod, P: GrowthPolicy = VisualStudio, A: Backend = Global> {
    repr: Repr<T>,
    _marker: PhantomData<(T, fn() -> (P, A))>,
}

const_assert_eq!(mem::size_of::<Podder<u8>>(), 3 * mem::size_of::<usize>());
const_assert_eq!(mem::size_of::<Podder<[u64; 8]>>(), 3 * mem::size_of::<usize>());

unsafe impl<T: Pod + Send, P: GrowthPolicy, A: Backend> Send for Podder<T, P, A> {}
unsafe impl<T: Pod + Sync, P: GrowthPolicy, A: Backend> Sync for Podder<T, P, A> {}

impl<T: Pod, P: GrowthPolicy, A: Backend> Drop for Podder<T, P, A> {
    fn drop(&mut self) {
        self.release_heap();
    }
}

/// Creates a [`Podder`] with the default growth policy and backend.
///
/// # Examples
///
/// ```
/// # use podder::{Podder, podder};
/// let empty: Podder<u8> = podder![];
/// let zeros = podder![0u16; 4];
/// let items = podder![1i64, 2, 3];
///
/// assert!(empty.is_empty());
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// assert_eq!(items.len(), 3);
/// ```
#[macro_export]
macro_rules! podder {
    [] => { <$crate::Podder<_>>::new() };
    [$elem:expr; $n:expr] => { <$crate::Podder<_>>::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { <$crate::Podder<_>>::from_slice(&[ $($item),+ ]) };
}

// Representation plumbing.
impl<T: Pod, P: GrowthPolicy, A: Backend> Podder<T, P, A> {
    /// The capacity to grow to from `capacity` so that `requested` elements fit.
    #[inline]
    fn grown_capacity(capacity: usize, requested: usize) -> usize {
        let max = Inline::<T>::MAX_CAPACITY;
        if requested > max {
            capacity_overflow();
        }
        core::cmp::min(required_capacity::<P>(capacity, requested), max)
    }

    /// A fresh empty container able to hold `count` elements, allocating exactly
    /// `count` if they do not fit inline.
    fn with_exact_capacity(count: usize) -> Self {
        let mut this = Self::new();
        if count > this.capacity() {
            if count > Inline::<T>::MAX_CAPACITY {
                capacity_overflow();
            }
            let buf = HeapBuf::<T, A>::allocate(count);
            this.repr.set_medium(buf.as_ptr(), buf.capacity(), 0);
        }
        this
    }

    /// Frees the heap buffer, if any, leaving an empty unallocated medium.
    fn release_heap(&mut self) {
        if let State::Medium(m) = self.repr.state() {
            if m.capacity() != 0 {
                trace!(target: "podder", "releasing heap buffer of {} elements", m.capacity());
                // SAFETY: a medium with non-zero capacity owns its buffer.
                unsafe { HeapBuf::<T, A>::from_raw(m.begin(), m.capacity()) }.release();
            }
            self.repr.set_medium(NonNull::dangling(), 0, 0);
        }
    }

    /// Moves the elements into a heap buffer of exactly `capacity` elements.
    ///
    /// `capacity` must not be below `len()`.
    fn grow_to(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len());
        match self.repr.state() {
            State::Small { len } => {
                let buf = HeapBuf::<T, A>::allocate(capacity);
                // SAFETY: `len` initialized inline elements, the new buffer holds `capacity >= len`.
                unsafe {
                    ptr::copy_nonoverlapping(self.repr.inline_ptr(), buf.as_ptr().as_ptr(), len)
                };
                self.repr.set_medium(buf.as_ptr(), buf.capacity(), len);
                trace!(target: "podder", "spilled {len} elements to the heap, capacity {capacity}");
            }
            State::Medium(m) => {
                // SAFETY: the medium owns the buffer described by its fields.
                let mut buf = unsafe { HeapBuf::<T, A>::from_raw(m.begin(), m.capacity()) };
                buf.resize(capacity);
                self.repr.set_medium(buf.as_ptr(), buf.capacity(), m.size());
                trace!(
                    target: "podder",
                    "relocated {} elements, capacity {} -> {capacity}",
                    m.size(),
                    m.capacity()
                );
            }
        }
    }

    /// Opens `count` slots at `index`, growing if needed, and returns a pointer
    /// to the first one. The slots are counted in `len()` but not initialized.
    pub(crate) fn open_gap(&mut self, index: usize, count: usize) -> *mut T {
        let len = self.len();
        assert!(index <= len, "insertion index should be <= len");
        let Some(new_len) = len.checked_add(count) else {
            capacity_overflow();
        };
        let capacity = self.capacity();
        if new_len > capacity {
            cold_path();
            self.grow_to(Self::grown_capacity(capacity, new_len));
        }
        // SAFETY: capacity >= new_len, the tail is moved inside the buffer.
        unsafe {
            let gap = self.as_mut_ptr().add(index);
            ptr::copy(gap, gap.add(count), len - index);
            self.repr.set_len(new_len);
            // Inline pointers do not outlive `set_len`.
            self.as_mut_ptr().add(index)
        }
    }

    /// Removes `count` elements starting at `index` without any checks.
    ///
    /// # Safety
    /// `index + count <= len()`.
    unsafe fn remove_span(&mut self, index: usize, count: usize) {
        let len = self.len();
        debug_assert!(index + count <= len);
        // SAFETY: see function doc.
        unsafe {
            let at = self.as_mut_ptr().add(index);
            ptr::copy(at.add(count), at, len - index - count);
            self.repr.set_len(len - count);
        }
    }

    /// Empties the container and makes room for exactly `count` elements.
    ///
    /// Content that fits inline folds the container back to small, releasing the
    /// heap buffer. Otherwise a large enough heap buffer is reused, and a
    /// smaller one is replaced by an exact allocation.
    fn prepare_assign(&mut self, count: usize) -> *mut T {
        if Inline::<T>::HAS_INLINE && count <= Inline::<T>::CAPACITY {
            if !self.is_small() {
                trace!(target: "podder", "folding back into the inline buffer");
                self.release_heap();
            }
            self.repr.set_small(0);
        } else if count > self.capacity() {
            if count > Inline::<T>::MAX_CAPACITY {
                capacity_overflow();
            }
            self.release_heap();
            let buf = HeapBuf::<T, A>::allocate(count);
            self.repr.set_medium(buf.as_ptr(), buf.capacity(), 0);
            trace!(target: "podder", "allocated {count} elements for assignment");
        } else {
            // SAFETY: zero is always a valid length.
            unsafe { self.repr.set_len(0) };
        }
        self.as_mut_ptr()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Podder<T, P, A> {
    /// Constructs a new, empty `Podder`.
    ///
    /// Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::Podder;
    /// let v: Podder<u16> = Podder::new();
    /// assert_eq!(v.len(), 0);
    /// assert_eq!(v.capacity(), <Podder<u16>>::inline_capacity());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            repr: Repr::new(),
            _marker: PhantomData,
        }
    }

    /// Constructs an empty `Podder` that can hold at least `capacity` elements
    /// without growing.
    ///
    /// Allocates exactly `capacity` elements when they do not fit inline.
    ///
    /// # Panics
    /// Panics if `capacity > max_size()`.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_exact_capacity(capacity)
    }

    /// Constructs a `Podder` of `count` zero-initialized elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::Podder;
    /// let v: Podder<u32> = Podder::with_len(40);
    /// assert_eq!(v.len(), 40);
    /// assert!(v.iter().all(|&x| x == 0));
    /// ```
    pub fn with_len(count: usize) -> Self {
        let mut this = Self::new();
        if count <= this.capacity() {
            // SAFETY: `count` fits inline, all-zero is a valid `T`.
            unsafe {
                this.as_mut_ptr().write_bytes(0, count);
                this.repr.set_len(count);
            }
        } else {
            if count > Inline::<T>::MAX_CAPACITY {
                capacity_overflow();
            }
            let buf = HeapBuf::<T, A>::allocate_zeroed(count);
            this.repr.set_medium(buf.as_ptr(), buf.capacity(), count);
        }
        this
    }

    /// Constructs a `Podder` of `count` copies of `value`.
    #[inline]
    pub fn from_elem(value: T, count: usize) -> Self {
        let mut this = Self::with_exact_capacity(count);
        // SAFETY: the capacity is at least `count`.
        unsafe {
            let base = this.as_mut_ptr();
            for i in 0..count {
                base.add(i).write(value);
            }
            this.repr.set_len(count);
        }
        this
    }

    /// Constructs a `Podder` holding the arithmetic progression
    /// `value, value + stride, value + 2 * stride, ...` of `count` elements.
    ///
    /// Integers wrap at their own width.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::Podder;
    /// let v: Podder<i8> = Podder::from_fill(4, 0, -3);
    /// assert_eq!(v, [0, -3, -6, -9]);
    ///
    /// let v: Podder<u8> = Podder::from_fill(3, 1, -1);
    /// assert_eq!(v, [1, 0, 255]);
    /// ```
    pub fn from_fill(count: usize, value: T, stride: isize) -> Self
    where
        T: Stride,
    {
        let mut this = Self::with_exact_capacity(count);
        let mut next = value;
        // SAFETY: the capacity is at least `count`.
        unsafe {
            let base = this.as_mut_ptr();
            for i in 0..count {
                base.add(i).write(next);
                next = next.step(stride);
            }
            this.repr.set_len(count);
        }
        this
    }

    /// Constructs a `Podder` with a copy of `values`.
    ///
    /// Allocates exactly `values.len()` elements when they do not fit inline.
    pub fn from_slice(values: &[T]) -> Self {
        let mut this = Self::with_exact_capacity(values.len());
        // SAFETY: the capacity is at least `values.len()`, `values` is not part of `this`.
        unsafe {
            ptr::copy_nonoverlapping(values.as_ptr(), this.as_mut_ptr(), values.len());
            this.repr.set_len(values.len());
        }
        this
    }

    /// Constructs a `Podder` from an iterator of known length.
    ///
    /// Allocates exactly `iter.len()` elements when they do not fit inline.
    /// If the iterator yields fewer items than it reported, only those are kept.
    pub fn from_exact_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let count = iter.len();
        let mut this = Self::with_exact_capacity(count);
        let base = this.as_mut_ptr();
        let mut written = 0;
        for value in iter.take(count) {
            // SAFETY: `written < count <= capacity`.
            unsafe { base.add(written).write(value) };
            written += 1;
        }
        // SAFETY: the first `written` elements were just initialized.
        unsafe { this.repr.set_len(written) };
        this
    }

    /// Returns the number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.repr.len()
    }

    /// Returns `true` if the container holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the container can hold without growing.
    ///
    /// This is [`inline_capacity`](Self::inline_capacity) while small.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.repr.capacity()
    }

    /// Returns `true` if `len() == capacity()`.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// The largest number of elements a `Podder` of `T` can describe.
    #[inline(always)]
    pub const fn max_size(&self) -> usize {
        Inline::<T>::MAX_CAPACITY
    }

    /// The number of elements that fit without a heap allocation.
    ///
    /// Zero when `T` is larger than the inline buffer or over-aligned,
    /// in which case the container is always [`Model::Medium`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::Podder;
    /// # #[cfg(target_pointer_width = "64")] {
    /// assert_eq!(<Podder<u8>>::inline_capacity(), 23);
    /// assert_eq!(<Podder<u64>>::inline_capacity(), 2);
    /// assert_eq!(<Podder<[u64; 3]>>::inline_capacity(), 0);
    /// # }
    /// ```
    #[inline(always)]
    pub const fn inline_capacity() -> usize {
        Inline::<T>::CAPACITY
    }

    /// The size of the live elements in bytes.
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.len() * mem::size_of::<T>()
    }

    /// The size of the storage in bytes, inline buffer or heap buffer.
    #[inline]
    pub fn capacity_in_bytes(&self) -> usize {
        self.capacity() * mem::size_of::<T>()
    }

    /// Which representation is currently active.
    #[inline(always)]
    pub fn model(&self) -> Model {
        self.repr.model()
    }

    /// Returns `true` while the elements live in the inline buffer.
    #[inline(always)]
    pub fn is_small(&self) -> bool {
        self.repr.is_small()
    }

    /// Returns a raw pointer to the first element.
    ///
    /// While small, the pointer refers into `self` and dangles once `self` moves.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.repr.as_ptr()
    }

    /// Returns a raw mutable pointer to the first element.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.repr.as_mut_ptr()
    }

    /// Extracts a slice containing the entire container.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` elements are initialized and the pointer is aligned.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    /// Extracts a mutable slice of the entire container.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY: the first `len` elements are initialized and the pointer is aligned.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// [`PodderError::OutOfRange`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::{Podder, PodderError, podder};
    /// let v: Podder<u8> = podder![7, 8];
    /// assert_eq!(v.at(1), Ok(&8));
    /// assert_eq!(v.at(2), Err(PodderError::OutOfRange { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, PodderError> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(PodderError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// [`PodderError::OutOfRange`] if `index >= len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, PodderError> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(PodderError::OutOfRange { index, len })
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    /// `index < len()`.
    #[inline(always)]
    pub unsafe fn index_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len());
        // SAFETY: see function doc.
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Replaces the content with `count` copies of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::{Model, Podder, podder};
    /// let mut v: Podder<u32> = podder![1, 2, 3];
    /// v.assign_fill(16, 9);
    /// assert_eq!(v.model(), Model::Medium);
    ///
    /// v.assign_fill(4, 5);
    /// assert_eq!(v.model(), Model::Small);
    /// assert_eq!(v, [5, 5, 5, 5]);
    /// ```
    pub fn assign_fill(&mut self, count: usize, value: T) {
        let base = self.prepare_assign(count);
        // SAFETY: `prepare_assign` made room for `count` elements.
        unsafe {
            for i in 0..count {
                base.add(i).write(value);
            }
            self.repr.set_len(count);
        }
    }

    /// Replaces the content with a copy of `values`.
    pub fn assign_from_slice(&mut self, values: &[T]) {
        let base = self.prepare_assign(values.len());
        // SAFETY: `prepare_assign` made room, `values` cannot borrow from `self`.
        unsafe {
            ptr::copy_nonoverlapping(values.as_ptr(), base, values.len());
            self.repr.set_len(values.len());
        }
    }

    /// Replaces the content with the items of an iterator.
    ///
    /// An iterator with an exact size hint is written in one pass into a
    /// buffer sized like [`assign_fill`](Self::assign_fill) would size it.
    /// Otherwise the lower bound is reserved and the rest is pushed.
    pub fn assign_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        let base = self.prepare_assign(lower);
        if upper == Some(lower) {
            let mut written = 0;
            for value in iter.by_ref().take(lower) {
                // SAFETY: `written < lower`, room was made for `lower`.
                unsafe { base.add(written).write(value) };
                written += 1;
            }
            // SAFETY: the first `written` elements were just initialized.
            unsafe { self.repr.set_len(written) };
        }
        for value in iter {
            self.push_back(value);
        }
    }

    /// Inserts `value` at `index`, shifting the tail right.
    ///
    /// Returns a reference to the inserted element.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        let gap = self.open_gap(index, 1);
        // SAFETY: `open_gap` returned one uninitialized slot inside the buffer.
        unsafe {
            gap.write(value);
            &mut *gap
        }
    }

    /// Inserts `count` copies of `value` at `index`.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::{Podder, podder};
    /// let mut v: Podder<u32> = podder![1, 2, 3];
    /// v.insert_n(1, 3, 0);
    /// assert_eq!(v, [1, 0, 0, 0, 2, 3]);
    /// ```
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) {
        let gap = self.open_gap(index, count);
        // SAFETY: `open_gap` returned `count` uninitialized slots.
        unsafe {
            for i in 0..count {
                gap.add(i).write(value);
            }
        }
    }

    /// Inserts a copy of `values` at `index`.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    pub fn insert_from_slice(&mut self, index: usize, values: &[T]) {
        let gap = self.open_gap(index, values.len());
        // SAFETY: `open_gap` returned `values.len()` slots, `values` is not part of `self`.
        unsafe { ptr::copy_nonoverlapping(values.as_ptr(), gap, values.len()) };
    }

    /// Inserts the items of an iterator at `index`.
    ///
    /// With an exact size hint the gap is opened once. If the iterator then
    /// yields fewer items than it reported, only those are kept. Iterators of
    /// unknown length are appended behind a saved copy of the tail.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    pub fn insert_iter<I: IntoIterator<Item = T>>(&mut self, index: usize, iter: I) {
        assert!(index <= self.len(), "insertion index should be <= len");
        let mut iter = iter.into_iter();
        let mut index = index;
        let (lower, upper) = iter.size_hint();
        if upper == Some(lower) {
            let gap = self.open_gap(index, lower);
            // SAFETY: `open_gap` returned `lower` slots. They are zeroed first so a
            // panicking iterator leaves only valid values behind.
            unsafe { gap.write_bytes(0, lower) };
            let mut written = 0;
            for value in iter.by_ref().take(lower) {
                // SAFETY: `written < lower`.
                unsafe { gap.add(written).write(value) };
                written += 1;
            }
            if written < lower {
                cold_path();
                // SAFETY: the unused slots lie inside the live range.
                unsafe { self.remove_span(index + written, lower - written) };
                return;
            }
            index += lower;
        }
        let Some(first) = iter.next() else {
            return;
        };
        let tail = self.as_slice()[index..].to_vec();
        self.truncate(index);
        self.push_back(first);
        self.extend(iter);
        self.extend_from_slice(&tail);
    }

    /// Inserts the value produced by `f` at `index`.
    ///
    /// # Panics
    /// Panics if `index > len()`.
    #[inline]
    pub fn emplace_with<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> &mut T {
        let value = f();
        self.insert(index, value)
    }

    /// Inserts `value` before the first element.
    #[inline]
    pub fn push_front(&mut self, value: T) -> &mut T {
        self.insert(0, value)
    }

    /// Inserts the value produced by `f` before the first element.
    #[inline]
    pub fn emplace_front_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.emplace_with(0, f)
    }

    /// Appends `value` and returns a reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::{Podder, podder};
    /// let mut v: Podder<u64> = podder![1, 2];
    /// *v.push_back(3) += 10;
    /// assert_eq!(v, [1, 2, 13]);
    /// ```
    #[inline]
    pub fn push_back(&mut self, value: T) -> &mut T {
        if let State::Medium(m) = self.repr.state() {
            if m.size() < m.capacity() {
                let slot = m.end().as_ptr();
                // SAFETY: `end` is the first spare slot of the buffer.
                unsafe {
                    slot.write(value);
                    self.repr.set_len(m.size() + 1);
                    return &mut *slot;
                }
            }
        }
        let len = self.len();
        if len == self.capacity() {
            cold_path();
            self.grow_to(Self::grown_capacity(len, len + 1));
        }
        // SAFETY: there is room for one more element.
        unsafe {
            self.as_mut_ptr().add(len).write(value);
            self.repr.set_len(len + 1);
            &mut *self.as_mut_ptr().add(len)
        }
    }

    /// Appends the value produced by `f`.
    #[inline]
    pub fn emplace_back_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        let value = f();
        self.push_back(value)
    }

    /// Appends a copy of `values`.
    #[inline]
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.insert_from_slice(self.len(), values);
    }

    /// Removes the element at `index`, shifting the tail left.
    ///
    /// Does nothing on an empty container.
    ///
    /// # Panics
    /// Panics if the container is not empty and `index >= len()`.
    #[inline]
    pub fn erase(&mut self, index: usize) {
        let len = self.len();
        if len == 0 {
            return;
        }
        assert!(index < len, "removal index should be < len");
        // SAFETY: `index < len`.
        unsafe { self.erase_unchecked(index) }
    }

    /// Removes the element at `index` without any checks.
    ///
    /// # Safety
    /// `index < len()`.
    #[inline]
    pub unsafe fn erase_unchecked(&mut self, index: usize) {
        // SAFETY: see function doc.
        unsafe { self.remove_span(index, 1) }
    }

    /// Removes every element bitwise equal to `value`, filling each hole with
    /// the current last element. Order is not preserved.
    ///
    /// Returns the number of removed elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::{Podder, podder};
    /// let mut v: Podder<u8> = podder![1, 2, 1, 3, 1];
    /// assert_eq!(v.unordered_erase(&1), 3);
    /// assert_eq!(v, [3, 2]);
    /// ```
    pub fn unordered_erase(&mut self, value: &T) -> usize {
        let slice = self.as_mut_slice();
        let mut len = slice.len();
        let mut i = 0;
        while i < len {
            if same_bytes(&slice[i], value) {
                len -= 1;
                slice[i] = slice[len];
            } else {
                i += 1;
            }
        }
        let removed = slice.len() - len;
        // SAFETY: shrinking.
        unsafe { self.repr.set_len(len) };
        removed
    }

    /// Removes the first element bitwise equal to `value`, filling the hole with
    /// the last element. Order is not preserved.
    ///
    /// `value` is expected to occur at most once. Returns whether it was found.
    ///
    /// # Errors
    /// When [`VALIDATE`](crate::VALIDATE) is on, returns
    /// [`PodderError::DuplicateValue`] without modifying anything if `value`
    /// occurs more than once.
    pub fn unordered_erase_unique(&mut self, value: &T) -> Result<bool, PodderError> {
        let mut hits = self.iter().enumerate().filter(|(_, v)| same_bytes(*v, value));
        let Some((index, _)) = hits.next() else {
            return Ok(false);
        };
        if VALIDATE && hits.next().is_some() {
            return Err(PodderError::DuplicateValue);
        }
        self.unordered_erase_at(index);
        Ok(true)
    }

    /// Removes and returns the element at `index`, replacing it with the last
    /// element. Order is not preserved.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline]
    pub fn unordered_erase_at(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "removal index should be < len");
        let slice = self.as_mut_slice();
        let value = slice[index];
        slice[index] = slice[len - 1];
        // SAFETY: shrinking.
        unsafe { self.repr.set_len(len - 1) };
        value
    }

    /// Removes the first element. Does nothing on an empty container.
    #[inline]
    pub fn pop_front(&mut self) {
        self.erase(0);
    }

    /// Removes and returns the first element, or `None` if empty.
    #[inline]
    pub fn pop_front_get(&mut self) -> Option<T> {
        let value = *self.front()?;
        // SAFETY: not empty.
        unsafe { self.erase_unchecked(0) };
        Some(value)
    }

    /// Removes the last element. Does nothing on an empty container.
    #[inline]
    pub fn pop_back(&mut self) {
        let len = self.len();
        if len != 0 {
            // SAFETY: shrinking.
            unsafe { self.repr.set_len(len - 1) };
        }
    }

    /// Removes and returns the last element, or `None` if empty.
    #[inline]
    pub fn pop_back_get(&mut self) -> Option<T> {
        if self.is_empty() {
            cold_path();
            None
        } else {
            // SAFETY: not empty.
            Some(unsafe { self.pop_back_unchecked() })
        }
    }

    /// Removes and returns the last element without checking for emptiness.
    ///
    /// # Safety
    /// The container is not empty.
    #[inline(always)]
    pub unsafe fn pop_back_unchecked(&mut self) -> T {
        let len = self.len();
        debug_assert!(len != 0);
        // SAFETY: see function doc.
        unsafe {
            let value = *self.as_ptr().add(len - 1);
            self.repr.set_len(len - 1);
            value
        }
    }

    /// Makes the capacity at least `capacity` elements.
    ///
    /// Unlike [`Vec::reserve`], `capacity` is the total, not the additional
    /// count. The growth policy is not applied: when the container grows it
    /// holds exactly `capacity` elements afterwards.
    ///
    /// # Panics
    /// Panics if `capacity > max_size()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use podder::{Podder, podder};
    /// let mut v: Podder<u32> = podder![1];
    /// v.reserve(100);
    /// assert_eq!(v.capacity(), 100);
    /// v.reserve(10);
    /// assert_eq!(v.capacity(), 100);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }
        if capacity > Inline::<T>::MAX_CAPACITY {
            capacity_overflow();
        }
        self.grow_to(capacity);
    }

    /// Shrinks a heap buffer to exactly `len()` elements.
    ///
    /// An empty container releases its buffer and stays medium. A small
    /// container is left untouched.
    pub fn shrink_to_fit(&mut self) {
        let State::Medium(m) = self.repr.state() else {
            return;
        };
        if m.size() == m.capacity() {
            return;
        }
        if m.size() == 0 {
            self.release_heap();
        } else {
            self.grow_to(m.size());
        }
    }

    /// Resizes to `len` elements, zero-filling new slots.
    ///
    /// Grows the capacity to exactly `len` when needed.
    pub fn resize(&mut self, len: usize) {
        let old = self.len();
        if len <= old {
            self.truncate(len);
            return;
        }
        self.reserve(len);
        // SAFETY: capacity >= len, all-zero is a valid `T`.
        unsafe {
            self.as_mut_ptr().add(old).write_bytes(0, len - old);
            self.repr.set_len(len);
        }
    }

    /// Resizes to `len` elements, filling new slots with `value`.
    pub fn resize_fill(&mut self, len: usize, value: T) {
        let old = self.len();
        if len <= old {
            self.truncate(len);
            return;
        }
        self.reserve(len);
        // SAFETY: capacity >= len.
        unsafe {
            let base = self.as_mut_ptr();
            for i in old..len {
                base.add(i).write(value);
            }
            self.repr.set_len(len);
        }
    }

    /// Shortens the container to `len` elements. Has no effect if `len >= len()`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            // SAFETY: shrinking.
            unsafe { self.repr.set_len(len) };
        }
    }

    /// Removes all elements. The capacity is kept.
    #[inline]
    pub fn clear(&mut self) {
        // SAFETY: zero is always a valid length.
        unsafe { self.repr.set_len(0) };
    }

    /// Exchanges the content of two containers in O(1).
    ///
    /// Pointers into either container are invalidated.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.repr, &mut other.repr);
    }

    /// Copies the elements into a [`Vec`].
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Default for Podder<T, P, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Clone for Podder<T, P, A> {
    #[inline]
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    #[inline]
    fn clone_from(&mut self, source: &Self) {
        self.assign_from_slice(source.as_slice());
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend, const N: usize> From<[T; N]> for Podder<T, P, A> {
    #[inline]
    fn from(value: [T; N]) -> Self {
        Self::from_slice(&value)
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend, const N: usize> From<&[T; N]> for Podder<T, P, A> {
    #[inline]
    fn from(value: &[T; N]) -> Self {
        Self::from_slice(value)
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> From<&[T]> for Podder<T, P, A> {
    #[inline]
    fn from(value: &[T]) -> Self {
        Self::from_slice(value)
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> From<&mut [T]> for Podder<T, P, A> {
    #[inline]
    fn from(value: &mut [T]) -> Self {
        Self::from_slice(value)
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> From<Vec<T>> for Podder<T, P, A> {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self::from_slice(&value)
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> From<Podder<T, P, A>> for Vec<T> {
    #[inline]
    fn from(value: Podder<T, P, A>) -> Self {
        value.into_vec()
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> FromIterator<T> for Podder<T, P, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Extend<T> for Podder<T, P, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let wanted = self.len().saturating_add(lower);
        if wanted > self.capacity() {
            self.grow_to(Self::grown_capacity(self.capacity(), wanted));
        }
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Pod, P: GrowthPolicy, A: Backend> Extend<&'a T> for Podder<T, P, A> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

/// An iterator that moves out of a [`Podder`].
///
/// Created by the `into_iter` method of [`Podder`] (provided by the [`IntoIterator`] trait).
pub struct IntoIter<T: Pod, P: GrowthPolicy = VisualStudio, A: Backend = Global> {
    vec: Podder<T, P, A>,
    front: usize,
    back: usize,
}

impl<T: Pod, P: GrowthPolicy, A: Backend> IntoIter<T, P, A> {
    /// Returns the remaining items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.vec.as_slice()[self.front..self.back]
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> IntoIterator for Podder<T, P, A> {
    type Item = T;
    type IntoIter = IntoIter<T, P, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let back = self.len();
        IntoIter {
            vec: self,
            front: 0,
            back,
        }
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> Iterator for IntoIter<T, P, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front < back <= len`.
        let value = unsafe { *self.vec.index_unchecked(self.front) };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> DoubleEndedIterator for IntoIter<T, P, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: `front <= back < len`.
        Some(unsafe { *self.vec.index_unchecked(self.back) })
    }
}

impl<T: Pod, P: GrowthPolicy, A: Backend> ExactSizeIterator for IntoIter<T, P, A> {}

impl<T: Pod, P: GrowthPolicy, A: Backend> FusedIterator for IntoIter<T, P, A> {}

impl<T: Pod + fmt::Debug, P: GrowthPolicy, A: Backend> fmt::Debug for IntoIter<T, P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
