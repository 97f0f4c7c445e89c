extern crate std;

use core::ptr;
use std::io::{IoSlice, Write};

use crate::{Backend, GrowthPolicy, Podder};

/// Write is implemented for `Podder<u8>` by appending to the container.
/// The container grows as needed, following its growth policy.
impl<P: GrowthPolicy, A: Backend> Write for Podder<u8, P, A> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline(always)]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> std::io::Result<usize> {
        let num = bufs.iter().map(|b| b.len()).sum::<usize>();

        let mut dst = self.open_gap(self.len(), num);
        for buf in bufs {
            // SAFETY: the gap holds `num` bytes, the sum of all buffer lengths.
            unsafe {
                ptr::copy_nonoverlapping(buf.as_ptr(), dst, buf.len());
                dst = dst.add(buf.len());
            }
        }

        Ok(num)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        Write::write(self, buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Model, growth::Additive};

    #[test]
    fn write_and_vectored() {
        let mut v: Podder<u8> = Podder::new();

        let n = v.write(b"hello").unwrap();
        assert_eq!(n, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v, b"hello");
        assert_eq!(v.model(), Model::Small);

        let bufs = [IoSlice::new(b" "), IoSlice::new(b"world")];
        let n = v.write_vectored(&bufs).unwrap();
        assert_eq!(n, 6);
        assert_eq!(v, b"hello world");
    }

    #[test]
    fn write_all_grows() {
        let mut v: Podder<u8, Additive<16>> = Podder::new();
        let data = [b'x'; 257];
        v.write_all(&data).unwrap();
        assert_eq!(v.len(), 257);
        assert_eq!(v.model(), Model::Medium);
        assert!(v.as_slice().iter().all(|&c| c == b'x'));
    }

    #[test]
    fn write_vectored_across_boundary() {
        let mut v: Podder<u8> = Podder::from_slice(b"0123456789");
        let chunk = [b'-'; 20];
        let bufs = [IoSlice::new(&chunk), IoSlice::new(b"!")];
        assert_eq!(v.write_vectored(&bufs).unwrap(), 21);
        assert_eq!(&v[..10], b"0123456789");
        assert_eq!(&v[10..30], &chunk[..]);
        assert_eq!(v.back(), Some(&b'!'));
    }
}
