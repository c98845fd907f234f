use std::mem::size_of;

/// ByteRepr converts fixed-width values from and to their native-endian
/// byte representation.
///
/// The byte width of a value is always `size_of::<Self>()`.
pub trait ByteRepr: bytemuck::Pod + Default + Copy + PartialEq + std::fmt::Debug {
    /// Byte width of single value.
    const WIDTH: usize = size_of::<Self>();

    /// Read a value from given bytes.
    /// Input length must be identical to the width.
    fn from_bytes(bs: &[u8]) -> Self;

    /// Write value to given bytes.
    /// Input length must be identical to the width.
    fn write_bytes(&self, buf: &mut [u8]);
}

macro_rules! impl_num {
    ($($ty:ty),+) => {
        $(
            impl ByteRepr for $ty {
                #[inline]
                fn from_bytes(bs: &[u8]) -> Self {
                    let mut arr = [0u8; size_of::<$ty>()];
                    arr.copy_from_slice(bs);
                    <$ty>::from_ne_bytes(arr)
                }

                #[inline]
                fn write_bytes(&self, buf: &mut [u8]) {
                    let bs = self.to_ne_bytes();
                    buf.copy_from_slice(&bs);
                }
            }
        )+
    };
}

impl_num!(i8, i16, i32, i64, u16, u32, u64, f32, f64);

impl ByteRepr for u8 {
    #[inline]
    fn from_bytes(bs: &[u8]) -> Self {
        assert_eq!(1, bs.len());
        bs[0]
    }

    #[inline]
    fn write_bytes(&self, buf: &mut [u8]) {
        assert_eq!(1, buf.len());
        buf[0] = *self;
    }
}
