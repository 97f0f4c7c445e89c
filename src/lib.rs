//! ## Intro
//!
//! A small-vector for plain-old-data elements that is only three machine words.
//!
//! Similar to [`SmallVec`], but the inline buffer and the heap bookkeeping share
//! the same three words: there is no separate discriminant field. The last byte
//! of the container is either the length/flag tag of the inline buffer or the
//! (always zero) top byte of the heap capacity.
//!
//! Many workloads hold lots of short sequences of integers, indices or small
//! `repr(C)` records. `Podder` keeps them inline (23 bytes on 64-bit targets)
//! and transparently moves them to the heap once they outgrow that space.
//!
//! ```
//! # use podder::{Model, Podder, podder};
//! let mut v: Podder<u16> = podder![1, 2, 3];
//! assert_eq!(v.model(), Model::Small);
//!
//! // Growing past the inline buffer moves everything to the heap.
//! v.extend(4..=20);
//! assert_eq!(v.model(), Model::Medium);
//!
//! // Assigning a short sequence folds it back.
//! v.assign_from_slice(&[7, 8]);
//! assert_eq!(v.model(), Model::Small);
//! ```
//!
//! ## Element types
//!
//! Elements must implement [`bytemuck::Pod`]: they are moved with plain byte
//! copies and compared byte for byte. Zero-sized types are rejected at
//! compile time.
//!
//! ## Representations
//!
//! | Model | Storage | Capacity |
//! |-------|---------|----------|
//! | [`Model::Small`] | inline | [`Podder::inline_capacity`], at most 31 |
//! | [`Model::Medium`] | heap | allocated element count |
//!
//! Types larger than the inline buffer, or aligned stricter than `usize`,
//! are always medium.
//!
//! ## Customization
//!
//! - [`GrowthPolicy`]: how the heap capacity grows, see [`growth`].
//! - [`Backend`]: where heap buffers come from, [`Global`] by default.
//!
//! ## Comparisons
//!
//! Equality and ordering are bytewise, and ordering has no length tie-break:
//! a strict prefix is neither less, greater nor equal. See [`cmp`](crate::cmp).
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`. The `std` feature (on by
//! default) adds [`std::io::Write`] for `Podder<u8>`.
//!
//! ## Optional features
//!
//! ### `serde`
//!
//! [`Podder`] implements `Serialize` and `Deserialize` as a sequence.
//!
//! ### `validate`
//!
//! Turns on the precondition checks that otherwise only run in debug builds,
//! see [`VALIDATE`].
//!
//! [`SmallVec`]: https://docs.rs/smallvec/latest/smallvec
//! [`std::io::Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
#![no_std]

extern crate alloc;

mod utils;

pub mod backend;
pub mod cmp;
mod container;
mod error;
pub mod growth;
mod layout;
mod stride;
mod traits;

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "std")]
mod std_io;

#[doc(inline)]
pub use backend::{Backend, Global};
#[doc(inline)]
pub use container::{IntoIter, Podder};
#[doc(inline)]
pub use error::PodderError;
#[doc(inline)]
pub use growth::GrowthPolicy;
pub use layout::Model;
pub use stride::Stride;

/// Whether precondition checks are active.
///
/// On in debug builds and whenever the `validate` feature is enabled. Checked
/// operations such as [`Podder::unordered_erase_unique`] report violations
/// as a [`PodderError`] when this is `true`.
pub const VALIDATE: bool = cfg!(any(debug_assertions, feature = "validate"));
