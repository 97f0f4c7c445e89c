//! The allocation capability behind the medium representation.
//!
//! A [`Backend`] is a type, not a value: the container stays three words
//! no matter which backend it uses. All functions either succeed or abort
//! the process; there is no recoverable allocation error.

use alloc::alloc::{Layout, alloc, alloc_zeroed, dealloc, handle_alloc_error, realloc};
use core::{marker::PhantomData, mem, ptr::NonNull};

/// Raw byte allocator used by [`Podder`](crate::Podder) for its heap buffer.
///
/// # Safety
///
/// Implementations must behave like [`GlobalAlloc`](core::alloc::GlobalAlloc):
/// returned blocks are valid for the requested layout, `reallocate` preserves
/// the first `min(old, new)` bytes, and `deallocate` accepts every block
/// produced by this backend. On failure, implementations must not return;
/// they should call [`handle_alloc_error`].
pub unsafe trait Backend {
    /// Allocates a block for `layout`. `layout.size()` is never zero.
    fn allocate(layout: Layout) -> NonNull<u8>;

    /// Allocates a zero-filled block for `layout`. `layout.size()` is never zero.
    fn allocate_zeroed(layout: Layout) -> NonNull<u8> {
        let ptr = Self::allocate(layout);
        // SAFETY: freshly allocated block of `layout.size()` bytes.
        unsafe { ptr.as_ptr().write_bytes(0, layout.size()) };
        ptr
    }

    /// Resizes `ptr` from `old` to `new_size` bytes, moving it if needed.
    ///
    /// # Safety
    /// - `ptr` was returned by this backend for `old`.
    /// - `new_size` is not zero and, rounded up to `old.align()`, does not overflow `isize`.
    unsafe fn reallocate(ptr: NonNull<u8>, old: Layout, new_size: usize) -> NonNull<u8>;

    /// Releases `ptr`.
    ///
    /// # Safety
    /// `ptr` was returned by this backend for `layout` and is not used afterwards.
    unsafe fn deallocate(ptr: NonNull<u8>, layout: Layout);
}

/// The Rust global allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Global;

unsafe impl Backend for Global {
    #[inline]
    fn allocate(layout: Layout) -> NonNull<u8> {
        // SAFETY: callers never pass a zero-sized layout.
        let ptr = unsafe { alloc(layout) };
        NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout))
    }

    #[inline]
    fn allocate_zeroed(layout: Layout) -> NonNull<u8> {
        // SAFETY: callers never pass a zero-sized layout.
        let ptr = unsafe { alloc_zeroed(layout) };
        NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout))
    }

    #[inline]
    unsafe fn reallocate(ptr: NonNull<u8>, old: Layout, new_size: usize) -> NonNull<u8> {
        // SAFETY: see function doc.
        let new_ptr = unsafe { realloc(ptr.as_ptr(), old, new_size) };
        NonNull::new(new_ptr).unwrap_or_else(|| {
            // SAFETY: `new_size` was validated by the caller.
            handle_alloc_error(unsafe { Layout::from_size_align_unchecked(new_size, old.align()) })
        })
    }

    #[inline]
    unsafe fn deallocate(ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: see function doc.
        unsafe { dealloc(ptr.as_ptr(), layout) }
    }
}

/// An owned heap buffer of `capacity` elements of `T`.
///
/// This handle has no `Drop`: ownership is tracked by the medium
/// representation, which rebuilds the handle with [`HeapBuf::from_raw`]
/// whenever it needs to resize or release the buffer.
///
/// A capacity of zero means "no allocation" and uses a dangling pointer.
pub(crate) struct HeapBuf<T, A> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<fn() -> A>,
}

impl<T, A: Backend> HeapBuf<T, A> {
    /// The layout of `capacity` elements, panicking on overflow.
    #[inline]
    fn layout(capacity: usize) -> Layout {
        match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        }
    }

    /// An empty handle that owns nothing.
    #[inline]
    pub(crate) const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for exactly `capacity` elements.
    #[inline]
    pub(crate) fn allocate(capacity: usize) -> Self {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Self::dangling();
        }
        let ptr = A::allocate(Self::layout(capacity));
        Self {
            ptr: ptr.cast(),
            capacity,
            _marker: PhantomData,
        }
    }

    /// Allocates room for exactly `capacity` elements, all bytes zeroed.
    #[inline]
    pub(crate) fn allocate_zeroed(capacity: usize) -> Self {
        if capacity == 0 || mem::size_of::<T>() == 0 {
            return Self::dangling();
        }
        let ptr = A::allocate_zeroed(Self::layout(capacity));
        Self {
            ptr: ptr.cast(),
            capacity,
            _marker: PhantomData,
        }
    }

    /// Rebuilds a handle from the parts stored in the medium representation.
    ///
    /// # Safety
    /// `ptr` and `capacity` describe a buffer produced by this type with the same `A`.
    #[inline]
    pub(crate) const unsafe fn from_raw(ptr: NonNull<T>, capacity: usize) -> Self {
        Self {
            ptr,
            capacity,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) const fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity to exactly `capacity` elements.
    ///
    /// The backend grows in place when it can and relocates otherwise;
    /// the first `min(old, new)` elements are preserved either way.
    /// A new capacity of zero releases the buffer.
    pub(crate) fn resize(&mut self, capacity: usize) {
        if capacity == self.capacity {
            return;
        }
        if self.capacity == 0 {
            *self = Self::allocate(capacity);
            return;
        }
        if capacity == 0 {
            let old = core::mem::replace(self, Self::dangling());
            old.release();
            return;
        }
        let old = Self::layout(self.capacity);
        let new = Self::layout(capacity);
        // SAFETY: the buffer was allocated with `old`, `new.size()` is non-zero and valid.
        let ptr = unsafe { A::reallocate(self.ptr.cast(), old, new.size()) };
        self.ptr = ptr.cast();
        self.capacity = capacity;
    }

    /// Returns the buffer to the backend.
    #[inline]
    pub(crate) fn release(self) {
        if self.capacity != 0 && mem::size_of::<T>() != 0 {
            // SAFETY: the buffer was allocated with this layout by `A`.
            unsafe { A::deallocate(self.ptr.cast(), Self::layout(self.capacity)) }
        }
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
