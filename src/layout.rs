//! The three-word representation shared by the small and medium modes.
//!
//! ```text
//!            word 0            word 1            word 2 (little-endian)
//! medium: [ size            ][ end             ][ capacity      | 0x00 ]
//! small:  [ inline buffer ..................................... | tag  ]
//! ```
//!
//! The last byte of the union is the tag byte in small mode. In medium mode the
//! same byte is the most significant byte of `capacity`, which is stored in
//! little-endian order and bounded by [`MAX_CAPACITY`], so it is always zero
//! there. The tag packs the small length into bits 0-4 and the is-small flag
//! into bit 5.
//!
//! Medium mode never stores the begin pointer: it is `end - size`.
//!
//! Only the flag bit decides which mode is active. Every accessor here checks
//! it first and never reads the fields of the inactive mode.

use core::{
    marker::PhantomData,
    mem::{self, MaybeUninit},
    ptr::NonNull,
};

use static_assertions::const_assert_eq;

use crate::backend::capacity_overflow;

/// Size in bytes of every representation.
pub(crate) const REPR_SIZE: usize = 3 * mem::size_of::<usize>();

/// Bit 5 of the tag byte.
pub(crate) const SMALL_FLAG: u8 = 0b0010_0000;

/// Bits 0-4 of the tag byte.
pub(crate) const LEN_MASK: u8 = 0b0001_1111;

/// The largest heap capacity: the top byte of the capacity word doubles as
/// the tag byte and must stay zero.
pub(crate) const MAX_CAPACITY: usize = usize::MAX >> 8;

/// Which representation a [`Podder`](crate::Podder) currently uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    /// Elements live in the inline buffer.
    Small,
    /// Elements live in a heap buffer.
    Medium,
}

impl core::fmt::Display for Model {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Model::Small => "small",
            Model::Medium => "medium",
        })
    }
}

#[repr(C)]
pub(crate) struct Medium<T> {
    size: usize,
    end: NonNull<T>,
    capacity_le: usize,
}

impl<T> Clone for Medium<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Medium<T> {}

impl<T> Medium<T> {
    #[inline(always)]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        usize::from_le(self.capacity_le)
    }

    #[inline(always)]
    pub(crate) const fn end(&self) -> NonNull<T> {
        self.end
    }

    #[inline(always)]
    pub(crate) const fn begin(&self) -> NonNull<T> {
        // SAFETY: `end` is always `begin + size` within one allocation.
        unsafe { self.end.sub(self.size) }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
struct Small {
    buffer: [MaybeUninit<u8>; REPR_SIZE - 1],
    tag: u8,
}

/// Decoded view of a [`Repr`].
pub(crate) enum State<T> {
    Small { len: usize },
    Medium(Medium<T>),
}

/// The bit-packed storage of a [`Podder`](crate::Podder).
#[repr(C)]
pub(crate) union Repr<T> {
    medium: Medium<T>,
    small: Small,
}

impl<T> Clone for Repr<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Repr<T> {}

const_assert_eq!(mem::size_of::<Repr<u8>>(), REPR_SIZE);
const_assert_eq!(mem::size_of::<Repr<u64>>(), REPR_SIZE);
const_assert_eq!(mem::size_of::<Repr<[u8; 100]>>(), REPR_SIZE);
const_assert_eq!(mem::align_of::<Repr<u8>>(), mem::align_of::<usize>());

/// Per-element-type constants of the layout.
pub(crate) struct Inline<T>(PhantomData<T>);

impl<T> Inline<T> {
    const NOT_ZST: () = assert!(mem::size_of::<T>() != 0, "podder does not support zero-sized types");

    /// Elements that fit in the inline buffer, 0 if the small mode is unreachable.
    pub(crate) const CAPACITY: usize = {
        let size = mem::size_of::<T>();
        if size == 0 || mem::align_of::<T>() > mem::align_of::<usize>() {
            0
        } else {
            let n = (REPR_SIZE - 1) / size;
            if n > LEN_MASK as usize { LEN_MASK as usize } else { n }
        }
    };

    /// Whether the small mode is reachable at all for `T`.
    pub(crate) const HAS_INLINE: bool = Self::CAPACITY != 0;

    /// The largest capacity the medium mode can describe.
    pub(crate) const MAX_CAPACITY: usize = {
        let by_bytes = isize::MAX as usize / mem::size_of::<T>();
        if by_bytes < MAX_CAPACITY { by_bytes } else { MAX_CAPACITY }
    };
}

impl<T> Repr<T> {
    /// An empty container: small if `T` fits inline, an unallocated medium otherwise.
    #[inline]
    pub(crate) const fn new() -> Self {
        let () = Inline::<T>::NOT_ZST;
        if Inline::<T>::HAS_INLINE {
            Repr {
                small: Small {
                    buffer: [MaybeUninit::uninit(); REPR_SIZE - 1],
                    tag: SMALL_FLAG,
                },
            }
        } else {
            Repr {
                medium: Medium {
                    size: 0,
                    end: NonNull::dangling(),
                    capacity_le: 0,
                },
            }
        }
    }

    #[inline(always)]
    fn tag(&self) -> u8 {
        // SAFETY: the last byte is initialized in both modes.
        unsafe { self.small.tag }
    }

    #[inline(always)]
    pub(crate) fn is_small(&self) -> bool {
        Inline::<T>::HAS_INLINE && self.tag() & SMALL_FLAG != 0
    }

    #[inline(always)]
    pub(crate) fn model(&self) -> Model {
        if self.is_small() { Model::Small } else { Model::Medium }
    }

    #[inline(always)]
    pub(crate) fn state(&self) -> State<T> {
        if self.is_small() {
            State::Small {
                len: (self.tag() & LEN_MASK) as usize,
            }
        } else {
            // SAFETY: the flag says medium.
            State::Medium(unsafe { self.medium })
        }
    }

    /// Start of the inline buffer. Valid to write even in medium mode,
    /// which the medium-to-small transition relies on.
    #[inline(always)]
    pub(crate) fn inline_ptr(&mut self) -> *mut T {
        // The buffer sits at offset 0 of the `repr(C)` union.
        (self as *mut Self).cast::<T>()
    }

    #[inline(always)]
    fn inline_ptr_const(&self) -> *const T {
        (self as *const Self).cast::<T>()
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        match self.state() {
            State::Small { len } => len,
            State::Medium(m) => m.size(),
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        match self.state() {
            State::Small { .. } => Inline::<T>::CAPACITY,
            State::Medium(m) => m.capacity(),
        }
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const T {
        match self.state() {
            State::Small { .. } => self.inline_ptr_const(),
            State::Medium(m) => m.begin().as_ptr(),
        }
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        match self.state() {
            State::Small { .. } => self.inline_ptr(),
            State::Medium(m) => m.begin().as_ptr(),
        }
    }

    /// Sets the length without touching the elements or the mode.
    ///
    /// # Safety
    /// `len <= capacity()`; elements `..len` are initialized.
    #[inline(always)]
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        match self.state() {
            State::Small { .. } => self.set_small(len),
            State::Medium(m) => {
                // SAFETY: `len <= capacity`.
                let end = unsafe { m.begin().add(len) };
                self.medium = Medium {
                    size: len,
                    end,
                    capacity_le: m.capacity_le,
                };
            }
        }
    }

    /// Switches to (or stays in) small mode with `len` elements.
    ///
    /// Does not release a heap buffer; callers do that first.
    #[inline(always)]
    pub(crate) fn set_small(&mut self, len: usize) {
        debug_assert!(len <= Inline::<T>::CAPACITY);
        let tag = (self as *mut Self).cast::<u8>().wrapping_add(REPR_SIZE - 1);
        // SAFETY: the tag byte is the last byte of `self`, writable in both modes.
        unsafe { tag.write(len as u8 | SMALL_FLAG) };
    }

    /// Switches to (or stays in) medium mode over `begin[..capacity]` with `size` live elements.
    ///
    /// Does not release a previous heap buffer; callers do that first.
    #[inline(always)]
    pub(crate) fn set_medium(&mut self, begin: NonNull<T>, capacity: usize, size: usize) {
        debug_assert!(size <= capacity);
        if capacity > MAX_CAPACITY {
            capacity_overflow();
        }
        self.medium = Medium {
            size,
            // SAFETY: `size <= capacity`, inside the allocation.
            end: unsafe { begin.add(size) },
            capacity_le: capacity.to_le(),
        };
    }
}
