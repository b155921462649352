//! Elementwise logical operations
//!
//! Every operation works in place on `self` and runs word-parallel over
//! the packed buffer (see [`crate::word`]).

use super::{Mask, check_value};
use crate::binary::ON;
use crate::error::Result;
use crate::word;

impl Mask {
    /// Elementwise AND with `other`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if the masks differ in size.
    pub fn and(&mut self, other: &Mask) -> Result<()> {
        self.check_same_size(other)?;
        word::combine(&mut self.data, &other.data, |a, b| a & b);
        Ok(())
    }

    /// Elementwise OR with `other`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if the masks differ in size.
    pub fn or(&mut self, other: &Mask) -> Result<()> {
        self.check_same_size(other)?;
        word::combine(&mut self.data, &other.data, |a, b| a | b);
        Ok(())
    }

    /// Elementwise XOR with `other`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if the masks differ in size.
    pub fn xor(&mut self, other: &Mask) -> Result<()> {
        self.check_same_size(other)?;
        word::combine(&mut self.data, &other.data, |a, b| a ^ b);
        Ok(())
    }

    /// Elementwise complement, in place.
    pub fn not(&mut self) {
        word::combine_scalar(&mut self.data, ON, |a, b| a ^ b);
    }

    /// AND every element with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`](crate::Error::IllegalValue) if
    /// `value` is neither OFF nor ON.
    pub fn and_scalar(&mut self, value: u8) -> Result<()> {
        check_value(value)?;
        word::combine_scalar(&mut self.data, value, |a, b| a & b);
        Ok(())
    }

    /// OR every element with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`](crate::Error::IllegalValue) if
    /// `value` is neither OFF nor ON.
    pub fn or_scalar(&mut self, value: u8) -> Result<()> {
        check_value(value)?;
        word::combine_scalar(&mut self.data, value, |a, b| a | b);
        Ok(())
    }

    /// XOR every element with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`](crate::Error::IllegalValue) if
    /// `value` is neither OFF nor ON.
    pub fn xor_scalar(&mut self, value: u8) -> Result<()> {
        check_value(value)?;
        word::combine_scalar(&mut self.data, value, |a, b| a ^ b);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::OFF;
    use crate::error::ErrorKind;

    fn pattern(w: usize, h: usize, k: usize) -> Mask {
        Mask::from_fn(w, h, |x, y| (x * k + y * (k + 2)) % 5 < 2).unwrap()
    }

    #[test]
    fn test_and_or_idempotent() {
        let a = pattern(13, 7, 3);
        let mut b = a.clone();
        b.and(&a).unwrap();
        assert_eq!(b, a);
        b.or(&a).unwrap();
        assert_eq!(b, a);
    }

    #[test]
    fn test_xor_with_copy_clears() {
        let a = pattern(13, 7, 3);
        let mut b = a.clone();
        b.xor(&a).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn test_xor_twice_restores() {
        let a = pattern(17, 5, 1);
        let b = pattern(17, 5, 4);
        let mut c = a.clone();
        c.xor(&b).unwrap();
        c.xor(&b).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn test_elementwise_semantics() {
        let a = pattern(9, 9, 2);
        let b = pattern(9, 9, 6);
        let mut and = a.clone();
        and.and(&b).unwrap();
        let mut or = a.clone();
        or.or(&b).unwrap();
        let mut xor = a.clone();
        xor.xor(&b).unwrap();
        for y in 1..=9 {
            for x in 1..=9 {
                let (p, q) = (a.is_on(x, y), b.is_on(x, y));
                assert_eq!(and.is_on(x, y), p && q);
                assert_eq!(or.is_on(x, y), p || q);
                assert_eq!(xor.is_on(x, y), p != q);
            }
        }
        // Stored bytes stay strictly OFF/ON
        assert!(xor.data().iter().all(|&v| v == OFF || v == ON));
    }

    #[test]
    fn test_commutative() {
        let a = pattern(11, 3, 1);
        let b = pattern(11, 3, 3);
        let mut ab = a.clone();
        ab.and(&b).unwrap();
        let mut ba = b.clone();
        ba.and(&a).unwrap();
        assert_eq!(ab, ba);
        let mut ab = a.clone();
        ab.or(&b).unwrap();
        let mut ba = b.clone();
        ba.or(&a).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_not() {
        let a = pattern(19, 2, 2);
        let mut n = a.clone();
        n.not();
        assert_eq!(n.count() + a.count(), a.len());
        assert!(n.data().iter().all(|&v| v == OFF || v == ON));
        n.not();
        assert_eq!(n, a);
    }

    #[test]
    fn test_scalar_ops() {
        let a = pattern(10, 4, 3);
        let mut m = a.clone();
        m.and_scalar(ON).unwrap();
        assert_eq!(m, a);
        m.or_scalar(OFF).unwrap();
        assert_eq!(m, a);
        m.xor_scalar(OFF).unwrap();
        assert_eq!(m, a);
        m.and_scalar(OFF).unwrap();
        assert!(m.is_empty());
        m.or_scalar(ON).unwrap();
        assert_eq!(m.count(), m.len());
        let mut n = a.clone();
        n.xor_scalar(ON).unwrap();
        let mut expected = a.clone();
        expected.not();
        assert_eq!(n, expected);
        assert_eq!(n.and_scalar(2).unwrap_err().kind(), ErrorKind::IllegalInput);
    }

    #[test]
    fn test_size_mismatch() {
        let mut a = pattern(4, 4, 1);
        let orig = a.clone();
        let b = pattern(4, 5, 1);
        assert_eq!(a.and(&b).unwrap_err().kind(), ErrorKind::IncompatibleInput);
        assert_eq!(a.or(&b).unwrap_err().kind(), ErrorKind::IncompatibleInput);
        assert_eq!(a.xor(&b).unwrap_err().kind(), ErrorKind::IncompatibleInput);
        assert_eq!(a, orig);
    }
}
