//! Helper functions on validity bitmaps.
//!
//! A validity bitmap stores one bit per slot. Bit `i` lives in
//! byte `i / 8` at position `i % 8`, least significant bit first.
//! Set bit means the slot is valid, cleared bit means null.
//! Every vector relies on this layout when copying or transferring
//! validity between each other.
use std::ops::Range;

/// Returns number of bytes to hold given number of bits.
#[inline]
pub fn validity_bytes(len_u1: usize) -> usize {
    len_u1 / 8 + (len_u1 & 7 != 0) as usize
}

#[inline]
pub fn bitmap_u8s_get(bm: &[u8], idx: usize) -> bool {
    bm[idx / 8] & (1 << (idx & 7)) != 0
}

#[inline]
pub fn bitmap_u8s_set(bm: &mut [u8], idx: usize, val: bool) {
    let bidx = idx / 8;
    if val {
        bm[bidx] |= 1 << (idx & 7);
    } else {
        bm[bidx] &= !(1 << (idx & 7));
    }
}

/// Returns 1 if bit at given position is set, otherwise 0.
#[inline]
pub fn is_set(bm: &[u8], idx: usize) -> u8 {
    (bm[idx / 8] >> (idx & 7)) & 1
}

#[inline]
pub fn set_validity_bit_to_one(bm: &mut [u8], idx: usize) {
    bm[idx / 8] |= 1 << (idx & 7);
}

/// Set bit at given position to 0 if `val` is 0, otherwise to 1.
#[inline]
pub fn set_validity_bit(bm: &mut [u8], idx: usize, val: u8) {
    bitmap_u8s_set(bm, idx, val != 0)
}

/// Returns value count of true in first `len` bits.
/// The aligned middle part is counted by u64 words.
#[inline]
pub fn bitmap_true_count(bm: &[u8], len: usize) -> usize {
    let len_u8 = len / 8;
    let len_remained = len & 7;
    let (head, body, tail) = bytemuck::pod_align_to::<u8, u64>(&bm[..len_u8]);
    let sum0: usize = head.iter().map(|v| v.count_ones() as usize).sum::<usize>()
        + body.iter().map(|v| v.count_ones() as usize).sum::<usize>()
        + tail.iter().map(|v| v.count_ones() as usize).sum::<usize>();
    if len_remained == 0 {
        sum0
    } else {
        sum0 + (bm[len_u8] & ((1 << len_remained) - 1)).count_ones() as usize
    }
}

/// Returns value count of false in first `len` bits.
#[inline]
pub fn bitmap_false_count(bm: &[u8], len: usize) -> usize {
    len - bitmap_true_count(bm, len)
}

/// Copy bits of source in given range to the start of destination.
///
/// If range start is not multiple of 8, every destination byte is
/// composed of two adjacent source bytes.
/// Bits after the copied length in the last destination byte are
/// cleared.
#[inline]
pub fn copy_bits_range(dst: &mut [u8], src: &[u8], range: Range<usize>) {
    debug_assert!(range.start <= range.end);
    let len = range.end - range.start;
    if len == 0 {
        // nothing to do
        return;
    }
    let len_u8 = validity_bytes(len);
    debug_assert!(dst.len() >= len_u8);
    let start_u8 = range.start / 8;
    let bits = range.start & 7;
    if bits == 0 {
        // memcpy
        dst[..len_u8].copy_from_slice(&src[start_u8..start_u8 + len_u8]);
    } else {
        let rbits = 8 - bits;
        let src_end_u8 = validity_bytes(range.end);
        dst[..len_u8].iter_mut().enumerate().for_each(|(i, b)| {
            let curr = src[start_u8 + i] >> bits;
            let next = if start_u8 + i + 1 < src_end_u8 {
                src[start_u8 + i + 1] << rbits
            } else {
                0
            };
            *b = curr | next;
        });
    }
    let len_remained = len & 7;
    if len_remained != 0 {
        dst[len_u8 - 1] &= (1 << len_remained) - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_bitmap_get_set() {
        let mut bm = vec![0u8; 2];
        set_validity_bit_to_one(&mut bm, 0);
        set_validity_bit_to_one(&mut bm, 9);
        set_validity_bit(&mut bm, 3, 1);
        assert_eq!(&[0b0000_1001, 0b0000_0010], &bm[..]);
        assert_eq!(1, is_set(&bm, 0));
        assert_eq!(0, is_set(&bm, 1));
        assert_eq!(1, is_set(&bm, 9));
        set_validity_bit(&mut bm, 0, 0);
        assert_eq!(0, is_set(&bm, 0));
        assert!(bitmap_u8s_get(&bm, 3));
        bitmap_u8s_set(&mut bm, 3, false);
        assert!(!bitmap_u8s_get(&bm, 3));
    }

    #[test]
    fn test_validity_bytes() {
        assert_eq!(0, validity_bytes(0));
        assert_eq!(1, validity_bytes(1));
        assert_eq!(1, validity_bytes(8));
        assert_eq!(2, validity_bytes(9));
        assert_eq!(usize::MAX / 8 + 1, validity_bytes(usize::MAX));
        assert_eq!(usize::MAX / 8 + 1, validity_bytes(usize::MAX - 3));
    }

    #[test]
    fn test_bitmap_count() {
        let bm = [0xffu8; 32];
        assert_eq!(0, bitmap_true_count(&bm, 0));
        assert_eq!(3, bitmap_true_count(&bm, 3));
        assert_eq!(200, bitmap_true_count(&bm, 200));
        assert_eq!(0, bitmap_false_count(&bm, 200));
        let bm = [0b0101_0101u8; 32];
        assert_eq!(128, bitmap_true_count(&bm, 256));
        assert_eq!(128, bitmap_false_count(&bm, 256));
        assert_eq!(2, bitmap_true_count(&bm, 3));
    }

    #[test]
    fn test_copy_bits_range_aligned() {
        let src = [0b1010_1010u8, 0b1111_0000, 0b0000_1111];
        let mut dst = [0xffu8; 3];
        copy_bits_range(&mut dst, &src, 8..20);
        assert_eq!(&[0b1111_0000, 0b0000_1111, 0xff], &dst);
    }

    #[test]
    fn test_copy_bits_range_unaligned() {
        let src = [0b1010_1010u8, 0b1111_0000];
        let mut dst = [0u8; 2];
        // bits 1..10 of source: 1,0,1,0,1,0,1, 0,0
        copy_bits_range(&mut dst, &src, 1..10);
        assert_eq!(&[0b0101_0101, 0b0000_0000], &dst);
        copy_bits_range(&mut dst, &src, 3..14);
        let expected: Vec<bool> = (3..14).map(|i| bitmap_u8s_get(&src, i)).collect();
        let actual: Vec<bool> = (0..11).map(|i| bitmap_u8s_get(&dst, i)).collect();
        assert_eq!(expected, actual);
        // trailing bits cleared
        assert_eq!(0, dst[1] >> 3);
    }

    #[test]
    fn test_copy_bits_range_rand() {
        let mut rng = rand::thread_rng();
        for _ in 0..512 {
            let size: usize = rng.gen_range(1..1024);
            let bools: Vec<bool> = (0..size).map(|_| rng.gen()).collect();
            let mut src = vec![0u8; validity_bytes(size)];
            for (i, b) in bools.iter().enumerate() {
                bitmap_u8s_set(&mut src, i, *b);
            }
            let start = rng.gen_range(0..size);
            let end = rng.gen_range(start..=size);
            let mut dst = vec![0xffu8; validity_bytes(size)];
            copy_bits_range(&mut dst, &src, start..end);
            let actual: Vec<bool> = (0..end - start).map(|i| bitmap_u8s_get(&dst, i)).collect();
            assert_eq!(&bools[start..end], &actual[..], "range={}..{}", start, end);
            assert_eq!(
                bitmap_true_count(&src[..], end) - bitmap_true_count(&src[..], start),
                bitmap_true_count(&dst, end - start)
            );
        }
    }
}
