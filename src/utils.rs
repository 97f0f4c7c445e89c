use bytemuck::Pod;

/// Marks the branch it is called from as unlikely.
#[cold]
#[inline(always)]
pub(crate) const fn cold_path() {}

/// The object representation of `slice`.
#[inline(always)]
pub(crate) fn bytes_of_slice<T: Pod>(slice: &[T]) -> &[u8] {
    bytemuck::cast_slice(slice)
}

/// Bitwise equality of two values.
#[inline(always)]
pub(crate) fn same_bytes<T: Pod>(a: &T, b: &T) -> bool {
    bytemuck::bytes_of(a) == bytemuck::bytes_of(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_equality_is_bitwise() {
        assert!(same_bytes(&f32::NAN, &f32::NAN));
        assert!(!same_bytes(&0.0f32, &-0.0f32));
        assert_eq!(bytes_of_slice(&[0x0102u16]).len(), 2);
    }
}
