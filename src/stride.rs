/// Element types that can be filled as an arithmetic progression.
///
/// Used by [`Podder::from_fill`](crate::Podder::from_fill): the element after
/// `v` is `v.step(stride)`. Integer types wrap around at their own width, so a
/// negative stride on an unsigned type counts down modulo `2^bits`.
pub trait Stride: Copy {
    /// Returns `self + stride`.
    fn step(self, stride: isize) -> Self;
}

macro_rules! impl_stride_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Stride for $ty {
                #[inline(always)]
                fn step(self, stride: isize) -> Self {
                    self.wrapping_add(stride as $ty)
                }
            }
        )*
    };
}

impl_stride_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_stride_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Stride for $ty {
                #[inline(always)]
                fn step(self, stride: isize) -> Self {
                    self + stride as $ty
                }
            }
        )*
    };
}

impl_stride_float!(f32, f64);
