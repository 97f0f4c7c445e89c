//! Growth policies used when a [`Podder`](crate::Podder) runs out of room.
//!
//! A policy only knows how to take a single step, [`GrowthPolicy::grow`].
//! [`required_capacity`] repeats that step until the requested size fits,
//! so even a policy with a tiny step converges.
//!
//! Growth only applies to mutating operations (`insert`, `push_back`, ...).
//! Constructors, assignment and [`reserve`](crate::Podder::reserve) always
//! allocate the exact number of elements they need.

/// A single-step capacity growth function.
///
/// # Contract
///
/// `grow` must be deterministic and `grow(c) > c` for every `c >= 1`,
/// otherwise [`required_capacity`] never terminates.
/// Results are expected to saturate at `usize::MAX` instead of overflowing.
pub trait GrowthPolicy {
    /// Returns the capacity that follows `capacity`.
    fn grow(capacity: usize) -> usize;
}

/// Returns the smallest capacity reachable from `capacity` by repeated
/// application of `P::grow` that is `>= requested`.
///
/// At least one step is always taken, so the result is strictly greater than
/// `capacity` for a well-behaved policy.
///
/// # Examples
///
/// ```
/// use podder::growth::{VisualStudio, required_capacity};
///
/// // 4 -> 6 -> 9 -> 13
/// assert_eq!(required_capacity::<VisualStudio>(4, 10), 13);
/// // A single step is enough here.
/// assert_eq!(required_capacity::<VisualStudio>(10, 11), 15);
/// ```
pub fn required_capacity<P: GrowthPolicy>(capacity: usize, requested: usize) -> usize {
    let mut next = P::grow(capacity);
    while next < requested {
        let step = P::grow(next);
        debug_assert!(step > next, "growth policy did not grow from {next}");
        next = step;
    }
    next
}

/// The growth policy of the MSVC `std::vector`: `max(2, c + c / 2)`.
///
/// This is the default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualStudio;

impl GrowthPolicy for VisualStudio {
    #[inline]
    fn grow(capacity: usize) -> usize {
        core::cmp::max(2, capacity.saturating_add(capacity / 2))
    }
}

/// Grows by the rational factor `NUM / DEN`, rounding as `(NUM * c + 1) / DEN`,
/// with a floor of 2.
///
/// `NUM` must be greater than `DEN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ratio<const NUM: usize, const DEN: usize>;

impl<const NUM: usize, const DEN: usize> Ratio<NUM, DEN> {
    const VALID: () = assert!(DEN > 0 && NUM > DEN, "ratio growth requires NUM > DEN > 0");
}

impl<const NUM: usize, const DEN: usize> GrowthPolicy for Ratio<NUM, DEN> {
    #[inline]
    fn grow(capacity: usize) -> usize {
        let () = Self::VALID;
        let next = (NUM as u128 * capacity as u128 + 1) / DEN as u128;
        let next = usize::try_from(next).unwrap_or(usize::MAX);
        // Small ratios can round back down to `capacity`, e.g. 11/10 at 5.
        core::cmp::max(2, core::cmp::max(next, capacity.saturating_add(1)))
    }
}

#[cfg(target_pointer_width = "64")]
mod golden {
    // The two largest consecutive Fibonacci numbers below 2^63.
    pub(super) const NUM: usize = 7_540_113_804_746_346_429;
    pub(super) const DEN: usize = 4_660_046_610_375_530_309;
}

#[cfg(not(target_pointer_width = "64"))]
mod golden {
    // The two largest consecutive Fibonacci numbers below 2^31.
    pub(super) const NUM: usize = 1_836_311_903;
    pub(super) const DEN: usize = 1_134_903_170;
}

/// Grows by the golden ratio.
pub type Golden = Ratio<{ golden::NUM }, { golden::DEN }>;

/// Grows by a fixed number of elements per step.
///
/// Cheap on memory, but every growth of a large container relocates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Additive<const STEP: usize>;

impl<const STEP: usize> Additive<STEP> {
    const VALID: () = assert!(STEP > 0, "additive growth requires a non-zero step");
}

impl<const STEP: usize> GrowthPolicy for Additive<STEP> {
    #[inline]
    fn grow(capacity: usize) -> usize {
        let () = Self::VALID;
        capacity.saturating_add(STEP)
    }
}
