//! Word-parallel helpers over the packed mask layout
//!
//! Mask elements are stored one per byte (`0x00` for OFF, `0x01` for ON).
//! With that encoding a bytewise AND/OR/XOR of two words equals the
//! elementwise operation on the eight masks elements they hold, so bulk
//! boolean work is done 64 bits at a time with only the tail handled per
//! byte.
//!
//! Complementing is the one operation that must not use `!word`: it would
//! turn `0x01` into `0xFE`. It is an XOR against [`ONES`] instead.

use crate::binary::{OFF, ON};

/// Number of mask elements held by one machine word.
pub const WORD_BYTES: usize = 8;

/// Word with every byte set to ON.
pub const ONES: u64 = 0x0101_0101_0101_0101;

/// Replicate an element value into every byte of a word.
#[inline]
pub fn broadcast(value: u8) -> u64 {
    ONES * u64::from(value)
}

/// Interpret exactly [`WORD_BYTES`] bytes as a word.
#[inline]
pub fn word(chunk: &[u8]) -> u64 {
    let mut buf = [0u8; WORD_BYTES];
    buf.copy_from_slice(chunk);
    u64::from_ne_bytes(buf)
}

/// Load the word starting at `at`, reading OFF for bytes past the end.
///
/// The morphological sweeps read whole padded kernel rows, which may run
/// a few bytes beyond the last mask row. Those positions always meet an
/// OFF kernel byte, so the zero fill never changes a result.
#[inline]
pub fn load(bytes: &[u8], at: usize) -> u64 {
    if let Some(chunk) = bytes.get(at..at + WORD_BYTES) {
        return word(chunk);
    }
    let mut buf = [0u8; WORD_BYTES];
    if at < bytes.len() {
        let tail = &bytes[at..];
        buf[..tail.len()].copy_from_slice(tail);
    }
    u64::from_ne_bytes(buf)
}

/// Count the ON elements of a run.
///
/// Two words are summed so that every byte holds 0, 1 or 2; multiplying by
/// [`ONES`] then accumulates all eight byte sums into the top byte.
pub fn count_on(bytes: &[u8]) -> usize {
    let mut pairs = bytes.chunks_exact(2 * WORD_BYTES);
    let mut count = 0usize;
    for pair in &mut pairs {
        let sum = word(&pair[..WORD_BYTES]) + word(&pair[WORD_BYTES..]);
        count += (sum.wrapping_mul(ONES) >> 56) as usize;
    }
    count
        + pairs
            .remainder()
            .iter()
            .filter(|&&b| b != OFF)
            .count()
}

/// Position of the first ON element of a run, if any.
pub fn find_on(bytes: &[u8]) -> Option<usize> {
    let mut words = bytes.chunks_exact(WORD_BYTES);
    for (i, chunk) in (&mut words).enumerate() {
        if word(chunk) != 0 {
            return chunk
                .iter()
                .position(|&b| b != OFF)
                .map(|p| i * WORD_BYTES + p);
        }
    }
    let base = bytes.len() - words.remainder().len();
    words
        .remainder()
        .iter()
        .position(|&b| b != OFF)
        .map(|p| base + p)
}

/// Whether every element of a run is ON.
pub fn all_on(bytes: &[u8]) -> bool {
    let mut words = bytes.chunks_exact(WORD_BYTES);
    (&mut words).all(|chunk| word(chunk) == ONES) && words.remainder().iter().all(|&b| b == ON)
}

/// Combine `src` into `dst` word by word.
///
/// `op` must act bytewise (AND, OR, XOR and compositions of them).
pub fn combine(dst: &mut [u8], src: &[u8], op: impl Fn(u64, u64) -> u64) {
    debug_assert_eq!(dst.len(), src.len());
    let mut dst_words = dst.chunks_exact_mut(WORD_BYTES);
    let mut src_words = src.chunks_exact(WORD_BYTES);
    for (d, s) in (&mut dst_words).zip(&mut src_words) {
        let r = op(word(d), word(s));
        d.copy_from_slice(&r.to_ne_bytes());
    }
    for (d, &s) in dst_words
        .into_remainder()
        .iter_mut()
        .zip(src_words.remainder())
    {
        *d = (op(u64::from(*d), u64::from(s)) & 0xff) as u8;
    }
}

/// Combine every element of `dst` with a constant element value.
pub fn combine_scalar(dst: &mut [u8], value: u8, op: impl Fn(u64, u64) -> u64) {
    let pattern = broadcast(value);
    let mut dst_words = dst.chunks_exact_mut(WORD_BYTES);
    for d in &mut dst_words {
        let r = op(word(d), pattern);
        d.copy_from_slice(&r.to_ne_bytes());
    }
    for d in dst_words.into_remainder() {
        *d = (op(u64::from(*d), u64::from(value)) & 0xff) as u8;
    }
}
