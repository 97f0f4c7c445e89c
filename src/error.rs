use thiserror::Error;

/// Errors reported by the checked [`Podder`](crate::Podder) operations.
///
/// Allocation failure is not part of this type: the backend aborts through
/// [`handle_alloc_error`](alloc::alloc::handle_alloc_error) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PodderError {
    /// [`Podder::at`](crate::Podder::at) was called with `index >= len`.
    #[error("index out of bounds, pos = {index}, size = {len}.")]
    OutOfRange { index: usize, len: usize },

    /// [`Podder::unordered_erase_unique`](crate::Podder::unordered_erase_unique) found the
    /// value more than once.
    ///
    /// Only reported when [`VALIDATE`](crate::VALIDATE) is on.
    #[error("unordered_erase_unique applied to a podder holding duplicates of the erased value")]
    DuplicateValue,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn out_of_range_message_names_index_and_size() {
        let err = PodderError::OutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index out of bounds, pos = 7, size = 3.");
    }
}
